//! Markdown API reference emitter
//!
//! Renders a table of contents followed by one section per module, with
//! that module's exports grouped by kind in a fixed order: types,
//! interfaces, classes, functions, constants.

use crate::diagnostics::ScribeResult;
use crate::entry::{DocEntry, GroupedExports, ModuleDoc};
use crate::params::Param;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Extracts the type part of a `name[?]: type` signature
    static ref PROP_TYPE_REGEX: Regex = Regex::new(r":\s*(.+)$").unwrap();
}

/// Markdown reference document emitter
#[derive(Debug, Default)]
pub struct ReferenceEmitter;

impl ReferenceEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }

    /// Render the reference document
    pub fn render(&self, modules: &[ModuleDoc]) -> ScribeResult<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("# API Reference\n".to_string());
        lines.push("> Auto-generated from TypeScript source files\n".to_string());

        // Table of contents
        lines.push("## Table of Contents\n".to_string());
        for module in modules {
            lines.push(format!(
                "- [{}](#{})",
                module.name,
                module.name.to_lowercase()
            ));
            let grouped = GroupedExports::of(&module.exports);
            for entry in grouped.functions.iter().chain(grouped.classes.iter()) {
                lines.push(format!(
                    "  - [{}](#{})",
                    entry.name,
                    entry.name.to_lowercase()
                ));
            }
        }
        lines.push(String::new());

        for module in modules {
            self.render_module(&mut lines, module);
        }

        Ok(lines.join("\n"))
    }

    fn render_module(&self, lines: &mut Vec<String>, module: &ModuleDoc) {
        lines.push("---\n".to_string());
        lines.push(format!("## {}\n", module.name));

        if let Some(description) = &module.description {
            lines.push(format!("{}\n", description));
        }

        let grouped = GroupedExports::of(&module.exports);

        if !grouped.types.is_empty() {
            lines.push("### Types\n".to_string());
            for entry in &grouped.types {
                lines.push(format!("#### `{}`\n", entry.name));
                if let Some(description) = &entry.description {
                    lines.push(format!("{}\n", description));
                }
                lines.push("```typescript".to_string());
                lines.push(entry.signature.clone().unwrap_or_default());
                lines.push("```\n".to_string());
            }
        }

        if !grouped.interfaces.is_empty() {
            lines.push("### Interfaces\n".to_string());
            for entry in &grouped.interfaces {
                lines.push(format!("#### `{}`\n", entry.name));
                if let Some(description) = &entry.description {
                    lines.push(format!("{}\n", description));
                }
                if !entry.properties.is_empty() {
                    lines.push("| Property | Type | Description |".to_string());
                    lines.push("|----------|------|-------------|".to_string());
                    for prop in &entry.properties {
                        let signature = prop.signature.as_deref().unwrap_or(&prop.name);
                        let ty = PROP_TYPE_REGEX
                            .captures(signature)
                            .and_then(|c| c.get(1))
                            .map(|m| m.as_str())
                            .unwrap_or("unknown");
                        lines.push(format!(
                            "| `{}` | `{}` | {} |",
                            prop.name,
                            ty,
                            prop.description.as_deref().unwrap_or("-")
                        ));
                    }
                    lines.push(String::new());
                }
            }
        }

        if !grouped.classes.is_empty() {
            lines.push("### Classes\n".to_string());
            for entry in &grouped.classes {
                lines.push(format!("#### `{}`\n", entry.name));
                if let Some(description) = &entry.description {
                    lines.push(format!("{}\n", description));
                }

                if !entry.methods.is_empty() {
                    lines.push("**Methods:**\n".to_string());
                    lines.push("| Method | Description |".to_string());
                    lines.push("|--------|-------------|".to_string());
                    for method in &entry.methods {
                        let signature = method
                            .signature
                            .as_deref()
                            .unwrap_or(&method.name)
                            .replace('\n', " ");
                        lines.push(format!(
                            "| `{}` | {} |",
                            signature,
                            method.description.as_deref().unwrap_or("-")
                        ));
                    }
                    lines.push(String::new());

                    for method in &entry.methods {
                        self.render_method_details(lines, method);
                    }
                }
            }
        }

        if !grouped.functions.is_empty() {
            lines.push("### Functions\n".to_string());
            for entry in &grouped.functions {
                lines.push(format!("#### `{}()`\n", entry.name));
                if let Some(description) = &entry.description {
                    lines.push(format!("{}\n", description));
                }
                if let Some(signature) = &entry.signature {
                    lines.push("```typescript".to_string());
                    lines.push(signature.clone());
                    lines.push("```\n".to_string());
                }
                self.render_parameters(lines, &entry.parameters);
                self.render_returns(lines, entry);
                if !entry.examples.is_empty() {
                    lines.push("**Example:**\n".to_string());
                    for example in &entry.examples {
                        lines.push("```typescript".to_string());
                        lines.push(example.trim().to_string());
                        lines.push("```\n".to_string());
                    }
                }
            }
        }

        if !grouped.variables.is_empty() {
            lines.push("### Constants\n".to_string());
            for entry in &grouped.variables {
                lines.push(format!("#### `{}`\n", entry.name));
                if let Some(description) = &entry.description {
                    lines.push(format!("{}\n", description));
                }
                if let Some(signature) = &entry.signature {
                    lines.push("```typescript".to_string());
                    lines.push(signature.clone());
                    lines.push("```\n".to_string());
                }
            }
        }
    }

    fn render_method_details(&self, lines: &mut Vec<String>, method: &DocEntry) {
        lines.push(format!("##### `{}()`\n", method.name));
        if let Some(description) = &method.description {
            lines.push(format!("{}\n", description));
        }
        if let Some(signature) = &method.signature {
            lines.push("```typescript".to_string());
            lines.push(signature.clone());
            lines.push("```\n".to_string());
        }
        self.render_parameters(lines, &method.parameters);
        self.render_returns(lines, method);
    }

    fn render_parameters(&self, lines: &mut Vec<String>, parameters: &[Param]) {
        if parameters.is_empty() {
            return;
        }
        lines.push("**Parameters:**\n".to_string());
        for param in parameters {
            let optional = if param.optional { " (optional)" } else { "" };
            let default = param
                .default_value
                .as_ref()
                .map(|d| format!(" = `{}`", d))
                .unwrap_or_default();
            let description = param
                .description
                .as_ref()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default();
            lines.push(format!(
                "- `{}`: `{}`{}{}{}",
                param.name, param.ty, optional, default, description
            ));
        }
        lines.push(String::new());
    }

    fn render_returns(&self, lines: &mut Vec<String>, entry: &DocEntry) {
        if let Some(return_type) = &entry.return_type {
            if return_type != "void" {
                let description = entry
                    .return_description
                    .as_ref()
                    .map(|d| format!(" - {}", d))
                    .unwrap_or_default();
                lines.push(format!("**Returns:** `{}`{}\n", return_type, description));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_module;
    use crate::swc::parse_typescript_source;
    use pretty_assertions::assert_eq;

    fn render(sources: &[(&str, &str)]) -> String {
        let modules: Vec<ModuleDoc> = sources
            .iter()
            .map(|(name, source)| {
                let path = format!("/tmp/{}.ts", name.replace('/', "_"));
                let parsed = parse_typescript_source(path, *source).unwrap();
                extract_module(&parsed, name)
            })
            .collect();
        ReferenceEmitter::new().render(&modules).unwrap()
    }

    #[test]
    fn test_toc_lists_modules_functions_and_classes() {
        let output = render(&[(
            "builder/audio",
            r#"
export type Tempo = 'slow' | 'fast';
export function audioPrompt(): void {}
export class AudioBuilder {
    tempo(t: Tempo): this { return this; }
}
"#,
        )]);

        assert!(output.contains("## Table of Contents"));
        assert!(output.contains("- [builder/audio](#builder/audio)"));
        assert!(output.contains("  - [audioPrompt](#audioprompt)"));
        assert!(output.contains("  - [AudioBuilder](#audiobuilder)"));
        // Type aliases do not appear in the TOC
        assert!(!output.contains("  - [Tempo]"));
    }

    #[test]
    fn test_sections_render_in_fixed_kind_order() {
        let output = render(&[(
            "builder/index",
            r#"
export const VERSION = '1.0';
export function prompt(): void {}
export class PromptBuilder {}
export interface Options { tone?: string; }
export type Style = 'formal' | 'casual';
"#,
        )]);

        let types = output.find("### Types").unwrap();
        let interfaces = output.find("### Interfaces").unwrap();
        let classes = output.find("### Classes").unwrap();
        let functions = output.find("### Functions").unwrap();
        let constants = output.find("### Constants").unwrap();
        assert!(types < interfaces);
        assert!(interfaces < classes);
        assert!(classes < functions);
        assert!(functions < constants);
    }

    #[test]
    fn test_interface_property_table() {
        let output = render(&[(
            "config",
            r#"
export interface AudioConfig {
    /** Beats per minute */
    bpm: number;
    feel?: 'calm' | 'wild';
}
"#,
        )]);

        assert!(output.contains("| Property | Type | Description |"));
        assert!(output.contains("| `bpm` | `number` | Beats per minute |"));
        assert!(output.contains("| `feel` | `'calm' | 'wild'` | - |"));
    }

    #[test]
    fn test_class_method_summary_and_details() {
        let output = render(&[(
            "builder/chat",
            r#"
export class ChatBuilder {
    /**
     * Sets the persona tone.
     * @param tone - Tone name
     * @returns The builder
     */
    tone(tone: string): ChatBuilder { return this; }
}
"#,
        )]);

        assert!(output.contains("**Methods:**"));
        assert!(output.contains("| `tone(tone: string): ChatBuilder` | Sets the persona tone. |"));
        assert!(output.contains("##### `tone()`"));
        assert!(output.contains("- `tone`: `string` - Tone name"));
        assert!(output.contains("**Returns:** `ChatBuilder` - The builder"));
    }

    #[test]
    fn test_void_return_suppressed() {
        let output = render(&[(
            "util",
            "export function log(message: string): void {}\n",
        )]);
        assert!(!output.contains("**Returns:**"));
    }

    #[test]
    fn test_function_examples_rendered() {
        let output = render(&[(
            "builder/index",
            r#"
/**
 * Creates a prompt builder.
 * @example
 * const p = prompt().tone('casual');
 */
export function prompt(): PromptBuilder { return null as any; }
"#,
        )]);

        assert!(output.contains("**Example:**"));
        assert!(output.contains("const p = prompt().tone('casual');"));
    }

    #[test]
    fn test_render_is_pure() {
        let sources = [(
            "builder/audio",
            "export class A { genre(g: 'jazz' | 'rock'): void {} }\n",
        )];
        assert_eq!(render(&sources), render(&sources));
    }
}
