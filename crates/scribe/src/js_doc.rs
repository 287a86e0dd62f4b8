//! Documentation-comment interpretation
//!
//! This module parses doc comment blocks (`/** ... */`) into the flat model
//! the extractor consumes: a free-text description, a tag map, and a list of
//! usage examples. Tag handling follows the conventions of the analyzed SDK:
//! `@example` text is collected separately, `@param` entries are namespaced
//! as `param:<name>`, and `@returns`/`@return` normalize to a single key.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Regex for {@link ...} style inline references
    static ref LINK_REGEX: Regex = Regex::new(
        r"\{@(link|linkcode|linkplain)\s+[^}]+\}"
    ).unwrap();
}

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocComment {
    /// Main description text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Tag name to tag text; `@param x` is stored as `param:x`,
    /// `@returns`/`@return` as `returns`. A repeated tag keeps the
    /// last occurrence.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub tags: IndexMap<String, String>,

    /// Collected `@example` snippets, in order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
}

impl DocComment {
    /// Create a new empty doc comment
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a doc comment from a comment string
    ///
    /// Handles both the inner text SWC hands back (starting with `*`) and
    /// full `/** ... */` blocks.
    pub fn parse(comment: &str) -> Self {
        let cleaned = clean_doc_comment(comment);

        let description = extract_description(&cleaned);

        let mut tags = IndexMap::new();
        let mut examples = Vec::new();
        for (name, content) in raw_tags(&cleaned) {
            match name.as_str() {
                "example" => examples.push(content),
                "param" => {
                    let (param_name, doc) = parse_param_content(&content);
                    if !param_name.is_empty() {
                        tags.insert(format!("param:{}", param_name), doc);
                    }
                }
                "returns" | "return" => {
                    tags.insert("returns".to_string(), content);
                }
                _ => {
                    tags.insert(name, content);
                }
            }
        }

        Self {
            description,
            tags,
            examples,
        }
    }

    /// Check if this doc comment carries nothing
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.tags.is_empty() && self.examples.is_empty()
    }

    /// Get the description text of the `param:<name>` tag, if any
    pub fn param_description(&self, name: &str) -> Option<&str> {
        self.tags
            .get(&format!("param:{}", name))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Get the `returns` tag text, if any
    pub fn return_description(&self) -> Option<&str> {
        self.tags
            .get("returns")
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Clean a doc comment by removing delimiters and per-line markers
fn clean_doc_comment(comment: &str) -> String {
    let mut result = String::new();

    for line in comment.lines() {
        let trimmed = line.trim();

        if trimmed == "/**" || trimmed == "*/" || trimmed == "*" {
            if trimmed == "*" && !result.is_empty() {
                result.push('\n');
            }
            continue;
        }

        let mut content = trimmed;

        if content.starts_with("/**") {
            content = content.trim_start_matches("/**").trim_start();
        }

        if let Some(rest) = content.strip_prefix("* ") {
            content = rest;
        } else if let Some(rest) = content.strip_prefix('*') {
            content = rest;
        }

        if content.ends_with("*/") {
            content = content.trim_end_matches("*/").trim_end();
        }

        if !result.is_empty() && !content.is_empty() {
            result.push('\n');
        }
        result.push_str(content);
    }

    // Inline references are flattened away; only literal text survives
    LINK_REGEX.replace_all(result.trim(), "").to_string()
}

/// Extract description text before the first tag
fn extract_description(text: &str) -> Option<String> {
    let first_tag_pos =
        text.find("\n@")
            .or_else(|| if text.starts_with('@') { Some(0) } else { None });

    let desc = match first_tag_pos {
        Some(0) => return None,
        Some(pos) => &text[..pos],
        None => text,
    };

    let trimmed = desc.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split the cleaned comment into raw (tag name, content) pairs
fn raw_tags(text: &str) -> Vec<(String, String)> {
    let mut tags = Vec::new();
    let mut current_tag: Option<(String, String)> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(after_at) = trimmed.strip_prefix('@') {
            if let Some(tag) = current_tag.take() {
                tags.push(tag);
            }

            if let Some(space_pos) = after_at.find(' ') {
                let tag_name = after_at[..space_pos].to_string();
                let content = after_at[space_pos + 1..].trim().to_string();
                current_tag = Some((tag_name, content));
            } else {
                current_tag = Some((after_at.to_string(), String::new()));
            }
        } else if let Some((_, ref mut content)) = current_tag {
            // Continue multi-line tag content
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(trimmed);
        }
    }

    if let Some(tag) = current_tag {
        tags.push(tag);
    }

    tags
}

/// Parse `@param` content into (name, description)
///
/// Accepts `{type} name - description`, `[name=default] description`, and
/// the plain `name description` form.
fn parse_param_content(content: &str) -> (String, String) {
    let rest = strip_brace_type(content);

    if let Some(stripped) = rest.strip_prefix('[') {
        // Optional [name] or [name=default] syntax
        if let Some(bracket_end) = stripped.find(']') {
            let bracket_content = &stripped[..bracket_end];
            let after = stripped[bracket_end + 1..].trim();

            let name = match bracket_content.find('=') {
                Some(eq_pos) => bracket_content[..eq_pos].trim(),
                None => bracket_content.trim(),
            };
            return (name.to_string(), strip_doc_dash(after));
        }
    }

    match rest.find(char::is_whitespace) {
        Some(space_pos) => {
            let name = rest[..space_pos].to_string();
            let doc = strip_doc_dash(rest[space_pos..].trim_start());
            (name, doc)
        }
        None => (rest.to_string(), String::new()),
    }
}

/// Strip a leading `{type}` annotation, handling nested braces
fn strip_brace_type(content: &str) -> &str {
    if !content.starts_with('{') {
        return content;
    }

    let mut depth = 0;
    for (i, c) in content.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return content[i + 1..].trim_start();
                }
            }
            _ => {}
        }
    }
    content
}

/// Strip a leading `-` separator from a description
fn strip_doc_dash(s: &str) -> String {
    s.trim_start_matches('-').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_comment() {
        let doc = DocComment::parse("/** Hello world */");
        assert_eq!(doc.description.as_deref(), Some("Hello world"));
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_parse_multiline_comment() {
        let doc = DocComment::parse(
            r#"/**
             * This is a description.
             * It spans multiple lines.
             */"#,
        );
        let desc = doc.description.unwrap();
        assert!(desc.contains("This is a description"));
        assert!(desc.contains("multiple lines"));
    }

    #[test]
    fn test_param_tag_namespacing() {
        let doc = DocComment::parse(
            r#"/**
             * Sets the tone.
             * @param tone - The tone to use
             */"#,
        );

        assert_eq!(doc.description.as_deref(), Some("Sets the tone."));
        assert_eq!(doc.param_description("tone"), Some("The tone to use"));
    }

    #[test]
    fn test_typed_and_bracketed_params() {
        let doc = DocComment::parse(
            r#"/**
             * @param {string} genre - The genre
             * @param {string} [tempo=moderate] - The tempo
             */"#,
        );

        assert_eq!(doc.param_description("genre"), Some("The genre"));
        assert_eq!(doc.param_description("tempo"), Some("The tempo"));
    }

    #[test]
    fn test_returns_normalization() {
        let doc = DocComment::parse("/** @return The builder */");
        assert_eq!(doc.return_description(), Some("The builder"));

        let doc = DocComment::parse("/** @returns The builder */");
        assert_eq!(doc.return_description(), Some("The builder"));
        assert!(doc.tags.contains_key("returns"));
        assert!(!doc.tags.contains_key("return"));
    }

    #[test]
    fn test_repeated_tag_keeps_last() {
        let doc = DocComment::parse(
            r#"/**
             * @since 1.0
             * @since 2.0
             */"#,
        );
        assert_eq!(doc.tags.get("since").map(|s| s.as_str()), Some("2.0"));
    }

    #[test]
    fn test_example_collection() {
        let doc = DocComment::parse(
            r#"/**
             * Builds a prompt.
             * @example
             * const p = prompt().tone('casual');
             * console.log(p.build());
             * @example
             * prompt().genre('jazz');
             */"#,
        );

        assert_eq!(doc.examples.len(), 2);
        assert!(doc.examples[0].contains("tone('casual')"));
        assert!(doc.examples[1].contains("genre('jazz')"));
        assert!(!doc.tags.contains_key("example"));
    }

    #[test]
    fn test_inline_link_flattening() {
        let doc = DocComment::parse("/** See {@link PromptBuilder} for details */");
        assert_eq!(doc.description.as_deref(), Some("See  for details"));
    }

    #[test]
    fn test_is_empty() {
        assert!(DocComment::new().is_empty());
        assert!(!DocComment::parse("/** x */").is_empty());
    }
}
