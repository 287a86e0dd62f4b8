//! Parameter model and rendering
//!
//! Parameters carry their type as rendered source text; when a parameter has
//! no annotation the `any` sentinel is used.

use serde::{Deserialize, Serialize};

/// Type text used when a parameter carries no annotation
pub const ANY_TYPE: &str = "any";

/// A single function or method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter name
    pub name: String,

    /// Rendered type text (`any` when unannotated)
    #[serde(rename = "type")]
    pub ty: String,

    /// Description sourced from a matching `param:<name>` tag
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Whether the parameter has an optional marker or a default value
    #[serde(default)]
    pub optional: bool,

    /// Rendered initializer text, when a default exists
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,

    /// Whether this is a rest parameter (`...args`)
    #[serde(default)]
    pub is_rest: bool,
}

impl Param {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: None,
            optional: false,
            default_value: None,
            is_rest: false,
        }
    }

    /// Create a parameter with the `any` sentinel type
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ANY_TYPE)
    }

    /// Set the description
    pub fn with_description(mut self, doc: impl Into<String>) -> Self {
        self.description = Some(doc.into());
        self
    }

    /// Mark as optional
    pub fn as_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the default value; a default implies optional
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self.optional = true;
        self
    }

    /// Mark as a rest parameter
    pub fn as_rest(mut self) -> Self {
        self.is_rest = true;
        self
    }

    /// Render as `name[?]: type`, rest parameters prefixed with `...`
    pub fn render(&self) -> String {
        format!(
            "{}{}{}: {}",
            if self.is_rest { "..." } else { "" },
            self.name,
            if self.optional { "?" } else { "" },
            self.ty
        )
    }
}

/// Render a parameter list as it appears inside a call signature
pub fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::render)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let param = Param::new("tone", "string");
        assert_eq!(param.render(), "tone: string");
    }

    #[test]
    fn test_render_optional() {
        let param = Param::new("options", "BuilderOptions").as_optional();
        assert_eq!(param.render(), "options?: BuilderOptions");
    }

    #[test]
    fn test_render_rest() {
        let param = Param::new("tags", "string[]").as_rest();
        assert_eq!(param.render(), "...tags: string[]");
    }

    #[test]
    fn test_default_implies_optional() {
        let param = Param::new("tempo", "string").with_default("'moderate'");
        assert!(param.optional);
        assert_eq!(param.render(), "tempo?: string");
        assert_eq!(param.default_value.as_deref(), Some("'moderate'"));
    }

    #[test]
    fn test_untyped_sentinel() {
        let param = Param::untyped("value");
        assert_eq!(param.render(), "value: any");
    }

    #[test]
    fn test_render_params_joins() {
        let params = vec![
            Param::new("genre", "MusicGenre"),
            Param::new("mood", "string").as_optional(),
        ];
        assert_eq!(render_params(&params), "genre: MusicGenre, mood?: string");
    }
}
