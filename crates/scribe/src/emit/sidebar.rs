//! Sidebar data table emitter
//!
//! Produces the TypeScript data file the IDE sidebar renders. Modules are
//! grouped into a fixed set of named categories by substring matching on
//! the module path; the first matching rule wins and a module matching no
//! rule is dropped from this artifact only. Categories render in a fixed
//! display order, independent of the match order.

use crate::diagnostics::ScribeResult;
use crate::entry::{DocEntry, GroupedExports, ModuleDoc};
use crate::params::Param;
use indexmap::IndexMap;
use serde::Serialize;

/// Substring rules in match order; first hit wins
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("variables", "Variables"),
    ("similarity", "Similarity"),
    ("quality", "Quality"),
    ("parser", "Parser"),
    ("chat", "Chat Prompts"),
    ("media", "Image Prompts"),
    ("image", "Image Prompts"),
    ("video", "Video Prompts"),
    ("audio", "Audio Prompts"),
    ("builder", "Text Prompts"),
];

/// Category display order in the generated file
const CATEGORY_ORDER: &[&str] = &[
    "Text Prompts",
    "Chat Prompts",
    "Image Prompts",
    "Video Prompts",
    "Audio Prompts",
    "Variables",
    "Similarity",
    "Quality",
    "Parser",
];

/// Parameter payload serialized into sidebar items
#[derive(Serialize)]
struct SidebarParam<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Sidebar data table emitter
#[derive(Debug, Default)]
pub struct SidebarEmitter;

impl SidebarEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }

    /// Render the sidebar data file
    pub fn render(&self, modules: &[ModuleDoc]) -> ScribeResult<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("/**".to_string());
        lines.push(" * Auto-generated API documentation for IDE sidebar".to_string());
        lines.push(" * Generated from TypeScript source files via reflection".to_string());
        lines.push(" * DO NOT EDIT MANUALLY - run `scribe` to regenerate".to_string());
        lines.push(" */".to_string());
        lines.push(String::new());
        lines.push("export interface ApiSection {".to_string());
        lines.push("  name: string;".to_string());
        lines.push("  items: ApiItem[];".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push("export interface ApiItem {".to_string());
        lines.push("  name: string;".to_string());
        lines.push(
            "  type: \"function\" | \"class\" | \"type\" | \"interface\" | \"const\" | \"method\";"
                .to_string(),
        );
        lines.push("  signature?: string;".to_string());
        lines.push("  description?: string;".to_string());
        lines.push("  example?: string;".to_string());
        lines.push("  returns?: string;".to_string());
        lines.push("  params?: { name: string; type: string; description?: string }[];".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push("export const API_DOCS: ApiSection[] = [".to_string());

        let groups = categorize(modules);

        for category in CATEGORY_ORDER {
            let Some(group_modules) = groups.get(category) else {
                continue;
            };
            if group_modules.is_empty() {
                continue;
            }

            let mut items: Vec<String> = Vec::new();
            for module in group_modules {
                self.push_module_items(&mut items, module)?;
            }

            if !items.is_empty() {
                lines.push("  {".to_string());
                lines.push(format!("    name: \"{}\",", category));
                lines.push("    items: [".to_string());
                lines.push(items.join(",\n"));
                lines.push("    ],".to_string());
                lines.push("  },".to_string());
            }
        }

        lines.push("];".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }

    fn push_module_items(&self, items: &mut Vec<String>, module: &ModuleDoc) -> ScribeResult<()> {
        let grouped = GroupedExports::of(&module.exports);

        for entry in &grouped.functions {
            items.push(self.function_item(&format!("{}()", entry.name), "function", entry)?);
        }

        for entry in &grouped.classes {
            items.push(self.plain_item(&entry.name, "class", entry)?);
            for method in &entry.methods {
                items.push(self.function_item(&format!(".{}()", method.name), "method", method)?);
            }
        }

        for entry in &grouped.interfaces {
            items.push(self.plain_item(&entry.name, "interface", entry)?);
        }

        for entry in &grouped.types {
            items.push(self.signature_item(&entry.name, "type", entry)?);
        }

        for entry in &grouped.variables {
            items.push(self.signature_item(&entry.name, "const", entry)?);
            for method in &entry.methods {
                items.push(self.function_item(
                    &format!("{}.{}()", entry.name, method.name),
                    "method",
                    method,
                )?);
            }
        }

        Ok(())
    }

    /// Item with signature, returns and params (functions and methods)
    fn function_item(&self, name: &str, ty: &str, entry: &DocEntry) -> ScribeResult<String> {
        let params: Vec<SidebarParam> = entry.parameters.iter().map(sidebar_param).collect();
        Ok(format!(
            "    {{\n      name: \"{}\",\n      type: \"{}\",\n      signature: {},\n      description: {},\n      returns: {},\n      params: {},\n    }}",
            name,
            ty,
            serde_json::to_string(entry.signature.as_deref().unwrap_or(&entry.name))?,
            serde_json::to_string(entry.description_text())?,
            serde_json::to_string(entry.return_type.as_deref().unwrap_or(""))?,
            serde_json::to_string(&params)?,
        ))
    }

    /// Item with only name, type and description (classes and interfaces)
    fn plain_item(&self, name: &str, ty: &str, entry: &DocEntry) -> ScribeResult<String> {
        Ok(format!(
            "    {{\n      name: \"{}\",\n      type: \"{}\",\n      description: {},\n    }}",
            name,
            ty,
            serde_json::to_string(entry.description_text())?,
        ))
    }

    /// Item with signature and description (types and constants)
    fn signature_item(&self, name: &str, ty: &str, entry: &DocEntry) -> ScribeResult<String> {
        Ok(format!(
            "    {{\n      name: \"{}\",\n      type: \"{}\",\n      signature: {},\n      description: {},\n    }}",
            name,
            ty,
            serde_json::to_string(entry.signature.as_deref().unwrap_or(""))?,
            serde_json::to_string(entry.description_text())?,
        ))
    }
}

fn sidebar_param(param: &Param) -> SidebarParam<'_> {
    SidebarParam {
        name: &param.name,
        ty: &param.ty,
        description: param.description.as_deref(),
    }
}

/// Assign each module to the first matching category, keeping display order
fn categorize(modules: &[ModuleDoc]) -> IndexMap<&'static str, Vec<&ModuleDoc>> {
    let mut groups: IndexMap<&'static str, Vec<&ModuleDoc>> = IndexMap::new();
    for category in CATEGORY_ORDER {
        groups.insert(*category, Vec::new());
    }

    for module in modules {
        let matched = CATEGORY_RULES
            .iter()
            .find(|(pattern, _)| module.name.contains(pattern));
        if let Some((_, category)) = matched {
            if let Some(group) = groups.get_mut(category) {
                group.push(module);
            }
        }
        // No rule matched: the module is dropped from this artifact only
    }

    groups
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

    #[test]
    fn test_first_matching_rule_wins() {
        // "builder/chat" contains both "chat" and "builder"; the chat rule
        // is checked first
        let modules = modules_of(&[("builder/chat", "export function chatPrompt(): void {}\n")]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        assert!(output.contains("name: \"Chat Prompts\""));
        assert!(!output.contains("name: \"Text Prompts\""));
    }

    #[test]
    fn test_unmatched_module_is_dropped() {
        let modules = modules_of(&[("misc/helpers", "export function help(): void {}\n")]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        assert!(!output.contains("help()"));
        assert!(output.contains("export const API_DOCS: ApiSection[] = ["));
    }

    #[test]
    fn test_display_order_is_fixed() {
        let modules = modules_of(&[
            ("variables/index", "export function extract(): void {}\n"),
            ("builder/index", "export function prompt(): void {}\n"),
        ]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        let text_pos = output.find("\"Text Prompts\"").unwrap();
        let variables_pos = output.find("\"Variables\"").unwrap();
        assert!(text_pos < variables_pos);
    }

    #[test]
    fn test_class_methods_get_member_marker() {
        let modules = modules_of(&[(
            "builder/audio",
            r#"
export class AudioBuilder {
    /** Sets the genre. */
    genre(g: string): AudioBuilder { return this; }
}
"#,
        )]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        assert!(output.contains("name: \"AudioBuilder\""));
        assert!(output.contains("name: \".genre()\""));
        assert!(output.contains("\"Sets the genre.\""));
    }

    #[test]
    fn test_constant_methods_are_name_prefixed() {
        let modules = modules_of(&[(
            "builder/index",
            r#"
export const templates = {
    codeReview: (language: string) => null as any,
};
"#,
        )]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        assert!(output.contains("name: \"templates\""));
        assert!(output.contains("name: \"templates.codeReview()\""));
    }

    #[test]
    fn test_params_json_omits_missing_description() {
        let modules = modules_of(&[(
            "builder/index",
            r#"
/**
 * @param tone - The tone
 */
export function prompt(tone: string, extra: number): void {}
"#,
        )]);
        let output = SidebarEmitter::new().render(&modules).unwrap();

        assert!(output
            .contains(r#"[{"name":"tone","type":"string","description":"The tone"},{"name":"extra","type":"number"}]"#));
    }
}
