//! Global type-declaration bundle emitter
//!
//! Merges declarations from a fixed subset of modules, in a fixed processing
//! order, into one `declare module` block consumed by the in-editor
//! type-checking surface. A name already emitted by an earlier module is
//! suppressed: first occurrence wins, cross-module, tracked by an
//! [`EmissionState`] value threaded through the emission steps. After the
//! fixed modules, the `templates` constant is re-shaped into an aggregate
//! declaration and each utility module contributes a namespace block of its
//! function signatures.

use crate::diagnostics::ScribeResult;
use crate::emit::EmissionState;
use crate::entry::{DocEntryKind, GroupedExports, ModuleDoc};
use lazy_static::lazy_static;
use regex::Regex;

/// Primary modules in processing order, with their section comments.
/// Audio precedes video and media because it carries the complete type
/// definitions; later duplicates are suppressed.
const DECLARATION_MODULES: &[(&str, &str)] = &[
    ("builder/index", "BUILDER TYPES"),
    ("builder/chat", "CHAT BUILDER TYPES"),
    ("builder/audio", "AUDIO BUILDER TYPES"),
    ("builder/video", "VIDEO BUILDER TYPES"),
    ("builder/media", "IMAGE BUILDER TYPES"),
];

/// Module holding the aggregate templates constant
const TEMPLATES_MODULE: &str = "builder/index";

/// Name of the aggregate templates constant
const TEMPLATES_CONST: &str = "templates";

/// Utility modules emitted as namespace blocks, functions only
const NAMESPACE_MODULES: &[&str] = &[
    "variables/index",
    "similarity/index",
    "quality/index",
    "parser/index",
];

lazy_static! {
    /// Splits a `name(params): returnType` signature into its parts
    static ref METHOD_SIGNATURE_REGEX: Regex =
        Regex::new(r"^(\w+)\((.*?)\):\s*(.+)$").unwrap();
}

/// Declaration bundle emitter
#[derive(Debug)]
pub struct DeclarationEmitter<'a> {
    sdk_module: &'a str,
}

impl<'a> DeclarationEmitter<'a> {
    /// Create an emitter wrapping declarations in the given module name
    pub fn new(sdk_module: &'a str) -> Self {
        Self { sdk_module }
    }

    /// Render the declaration bundle
    pub fn render(&self, modules: &[ModuleDoc]) -> ScribeResult<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("/**".to_string());
        lines.push(format!(
            " * Auto-generated type definitions for {}",
            self.sdk_module
        ));
        lines.push(" * Generated from TypeScript source files via reflection".to_string());
        lines.push(" * DO NOT EDIT MANUALLY - run `scribe` to regenerate".to_string());
        lines.push(" */".to_string());
        lines.push(String::new());
        lines.push("export const TYPE_DEFINITIONS = `".to_string());
        lines.push(format!("declare module '{}' {{", self.sdk_module));

        let mut state = EmissionState::new();
        for (module_name, section) in DECLARATION_MODULES {
            if let Some(module) = find_module(modules, module_name) {
                emit_module(&mut lines, module, section, &mut state);
            }
        }

        emit_templates(&mut lines, modules);
        emit_namespaces(&mut lines, modules);

        lines.push("}".to_string());
        lines.push("`;".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

fn find_module<'m>(modules: &'m [ModuleDoc], name: &str) -> Option<&'m ModuleDoc> {
    modules.iter().find(|m| m.name == name)
}

/// Emit one module's declarations: types, then interfaces, then classes,
/// then functions, suppressing names already claimed by earlier modules
fn emit_module(
    lines: &mut Vec<String>,
    module: &ModuleDoc,
    section: &str,
    state: &mut EmissionState,
) {
    lines.push(String::new());
    lines.push(format!("  // {}", section));

    let grouped = GroupedExports::of(&module.exports);

    for entry in &grouped.types {
        let Some(signature) = &entry.signature else {
            continue;
        };
        if state.claim(DocEntryKind::TypeAlias, &entry.name) {
            lines.push(format!("  export {};", signature));
        }
    }

    for entry in &grouped.interfaces {
        if state.claim(DocEntryKind::Interface, &entry.name) {
            let props = entry
                .properties
                .iter()
                .map(|p| {
                    format!(
                        "    {};",
                        p.signature
                            .clone()
                            .unwrap_or_else(|| format!("{}: unknown", p.name))
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(format!("  export interface {} {{\n{}\n  }}", entry.name, props));
        }
    }

    for entry in &grouped.classes {
        if state.claim(DocEntryKind::Class, &entry.name) {
            let methods = entry
                .methods
                .iter()
                .map(|m| {
                    format!(
                        "    {};",
                        m.signature
                            .clone()
                            .unwrap_or_else(|| format!("{}(): unknown", m.name))
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(format!("  export class {} {{\n{}\n  }}", entry.name, methods));
        }
    }

    for entry in &grouped.functions {
        let Some(signature) = &entry.signature else {
            continue;
        };
        if state.claim(DocEntryKind::Function, &entry.name) {
            lines.push(format!("  export function {};", signature));
        }
    }
}

/// Synthesize the aggregate templates declaration from the constant's
/// attached methods, re-shaped as arrow-typed properties
fn emit_templates(lines: &mut Vec<String>, modules: &[ModuleDoc]) {
    let Some(module) = find_module(modules, TEMPLATES_MODULE) else {
        return;
    };
    let Some(templates) = module.find_export(TEMPLATES_CONST, DocEntryKind::Variable) else {
        return;
    };
    if templates.methods.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("  // TEMPLATES - Pre-built prompt templates".to_string());
    lines.push("  export const templates: {".to_string());
    for method in &templates.methods {
        let Some(signature) = &method.signature else {
            continue;
        };
        if let Some(caps) = METHOD_SIGNATURE_REGEX.captures(signature) {
            // Templates return the builder even when typed as `any`
            let return_type = match &caps[3] {
                "any" => "PromptBuilder",
                other => other,
            };
            lines.push(format!("    {}: ({}) => {};", &caps[1], &caps[2], return_type));
        }
    }
    lines.push("  };".to_string());
}

/// Emit one namespace block per utility module, functions only
fn emit_namespaces(lines: &mut Vec<String>, modules: &[ModuleDoc]) {
    let mut first = true;
    for namespace_module in NAMESPACE_MODULES {
        let Some(module) = find_module(modules, namespace_module) else {
            continue;
        };
        let namespace = namespace_module
            .split('/')
            .next()
            .unwrap_or(namespace_module);

        if first {
            lines.push(String::new());
            lines.push("  // UTILITY MODULES".to_string());
            first = false;
        }

        lines.push(format!("  export namespace {} {{", namespace));
        for entry in &GroupedExports::of(&module.exports).functions {
            if let Some(signature) = &entry.signature {
                lines.push(format!("    export function {};", signature));
            }
        }
        lines.push("  }".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_module;
    use crate::swc::parse_typescript_source;

    fn modules_of(sources: &[(&str, &str)]) -> Vec<ModuleDoc> {
        sources
            .iter()
            .map(|(name, source)| {
                let path = format!("/tmp/{}.ts", name.replace('/', "_"));
                let parsed = parse_typescript_source(path, *source).unwrap();
                extract_module(&parsed, name)
            })
            .collect()
    }

    fn render(sources: &[(&str, &str)]) -> String {
        DeclarationEmitter::new("prompts.chat")
            .render(&modules_of(sources))
            .unwrap()
    }

    #[test]
    fn test_bundle_is_wrapped_in_module_declaration() {
        let output = render(&[("builder/index", "export type Style = 'formal' | 'casual';\n")]);

        assert!(output.contains("export const TYPE_DEFINITIONS = `"));
        assert!(output.contains("declare module 'prompts.chat' {"));
        assert!(output.contains("  // BUILDER TYPES"));
        assert!(output.contains("  export type Style = 'formal' | 'casual';"));
        assert!(output.ends_with("}\n`;\n"));
    }

    #[test]
    fn test_duplicate_name_keeps_first_module_rendering() {
        let output = render(&[
            (
                "builder/audio",
                "export type OutputLength = 'short' | 'medium' | 'long';\n",
            ),
            ("builder/video", "export type OutputLength = 'short';\n"),
        ]);

        // builder/audio is processed before builder/video
        assert!(output.contains("export type OutputLength = 'short' | 'medium' | 'long';"));
        assert!(!output.contains("export type OutputLength = 'short';\n  //"));
        assert_eq!(output.matches("export type OutputLength").count(), 1);
    }

    #[test]
    fn test_audio_processed_before_video_and_media() {
        let output = render(&[
            ("builder/media", "export function media(): void {}\n"),
            ("builder/video", "export function video(): void {}\n"),
            ("builder/audio", "export function audio(): void {}\n"),
        ]);

        let audio = output.find("// AUDIO BUILDER TYPES").unwrap();
        let video = output.find("// VIDEO BUILDER TYPES").unwrap();
        let media = output.find("// IMAGE BUILDER TYPES").unwrap();
        assert!(audio < video);
        assert!(video < media);
    }

    #[test]
    fn test_module_outside_fixed_list_is_ignored() {
        let output = render(&[("builder/extra", "export type Hidden = 'a' | 'b';\n")]);
        assert!(!output.contains("Hidden"));
    }

    #[test]
    fn test_interface_and_class_bodies() {
        let output = render(&[(
            "builder/chat",
            r#"
export interface ChatOptions {
    tone?: string;
    persona: string;
}
export class ChatBuilder {
    tone(tone: string): ChatBuilder { return this; }
}
"#,
        )]);

        assert!(output.contains(
            "  export interface ChatOptions {\n    tone?: string;\n    persona: string;\n  }"
        ));
        assert!(output.contains(
            "  export class ChatBuilder {\n    tone(tone: string): ChatBuilder;\n  }"
        ));
    }

    #[test]
    fn test_templates_aggregate_upgrades_any_return() {
        let output = render(&[(
            "builder/index",
            r#"
export const templates = {
    codeReview: (language: string) => null as any,
    explain: (topic: string): ChatBuilder => null as any,
};
"#,
        )]);

        assert!(output.contains("  // TEMPLATES - Pre-built prompt templates"));
        assert!(output.contains("    codeReview: (language: string) => PromptBuilder;"));
        assert!(output.contains("    explain: (topic: string) => ChatBuilder;"));
    }

    #[test]
    fn test_namespace_blocks_contain_only_functions() {
        let output = render(&[(
            "variables/index",
            r#"
export type VariableKind = 'simple' | 'rich';
export function extractVariables(template: string): string[] { return []; }
"#,
        )]);

        assert!(output.contains("  // UTILITY MODULES"));
        assert!(output.contains("  export namespace variables {"));
        assert!(output
            .contains("    export function extractVariables(template: string): string[];"));
        // The namespace holds functions only; the alias still lands in the
        // primary sections when its module is in the fixed list (it is not)
        assert!(!output.contains("export type VariableKind"));
    }
}
