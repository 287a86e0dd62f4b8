//! Core documentation model
//!
//! `DocEntry` is the unit of documentation: one exported declaration, class
//! member, or object-literal method. A `ModuleDoc` holds the ordered exports
//! of one analyzed module. Entries are built once by the extractor and never
//! mutated afterwards.

use crate::js_doc::DocComment;
use crate::params::Param;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of documented entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocEntryKind {
    /// TypeScript interface
    Interface,
    /// Type alias
    TypeAlias,
    /// Top-level function
    Function,
    /// Class declaration
    Class,
    /// Class method or object-literal method
    Method,
    /// Interface or class property
    Property,
    /// Variable or constant binding
    Variable,
}

impl DocEntryKind {
    /// Get display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            DocEntryKind::Interface => "interface",
            DocEntryKind::TypeAlias => "type",
            DocEntryKind::Function => "function",
            DocEntryKind::Class => "class",
            DocEntryKind::Method => "method",
            DocEntryKind::Property => "property",
            DocEntryKind::Variable => "const",
        }
    }

    /// Whether entries of this kind may carry nested properties/methods
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            DocEntryKind::Interface | DocEntryKind::Class | DocEntryKind::Variable
        )
    }
}

/// One documented declaration or member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    /// Symbol name; never empty, anonymous declarations synthesize one
    pub name: String,

    /// Entry kind
    pub kind: DocEntryKind,

    /// Free-text description from the doc comment
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Rendered type or call signature
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<String>,

    /// Ordered parameter list (functions and methods)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Param>,

    /// Rendered return type (functions and methods)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<String>,

    /// Text of the `returns` tag
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_description: Option<String>,

    /// Nested property entries (interfaces and classes only)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub properties: Vec<DocEntry>,

    /// Nested method entries (classes and object-valued constants only)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub methods: Vec<DocEntry>,

    /// Usage examples from `example` tags
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,

    /// Remaining tags from the doc comment
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub tags: IndexMap<String, String>,

    /// True only for top-level entries reachable from the export set
    #[serde(default)]
    pub exported: bool,
}

impl DocEntry {
    /// Create a bare entry of the given kind
    pub fn new(name: impl Into<String>, kind: DocEntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            signature: None,
            parameters: Vec::new(),
            return_type: None,
            return_description: None,
            properties: Vec::new(),
            methods: Vec::new(),
            examples: Vec::new(),
            tags: IndexMap::new(),
            exported: false,
        }
    }

    /// Attach description, examples and tags from a doc comment
    pub fn with_doc(mut self, doc: DocComment) -> Self {
        self.description = doc.description;
        self.examples = doc.examples;
        self.tags = doc.tags;
        self
    }

    /// Set the signature
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as exported
    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// Check if this entry has a description
    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// Description text, defaulting to the empty string
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Documentation for one analyzed module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDoc {
    /// Relative module path, extension stripped (e.g. `builder/audio`)
    pub name: String,

    /// Module-level description, if recovered
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Top-level exports in declaration order
    pub exports: Vec<DocEntry>,
}

impl ModuleDoc {
    /// Create a module doc
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            exports: Vec::new(),
        }
    }

    /// Find an export by name and kind
    pub fn find_export(&self, name: &str, kind: DocEntryKind) -> Option<&DocEntry> {
        self.exports
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }
}

/// A module's exports partitioned by kind, preserving declaration order
///
/// Every emitter works from this one partition instead of re-deriving its
/// own kind filters.
#[derive(Debug, Default)]
pub struct GroupedExports<'a> {
    /// Type aliases
    pub types: Vec<&'a DocEntry>,
    /// Interfaces
    pub interfaces: Vec<&'a DocEntry>,
    /// Classes
    pub classes: Vec<&'a DocEntry>,
    /// Functions
    pub functions: Vec<&'a DocEntry>,
    /// Variables and constants
    pub variables: Vec<&'a DocEntry>,
}

impl<'a> GroupedExports<'a> {
    /// Partition a list of entries by kind
    pub fn of(entries: &'a [DocEntry]) -> Self {
        let mut grouped = Self::default();
        for entry in entries {
            match entry.kind {
                DocEntryKind::TypeAlias => grouped.types.push(entry),
                DocEntryKind::Interface => grouped.interfaces.push(entry),
                DocEntryKind::Class => grouped.classes.push(entry),
                DocEntryKind::Function => grouped.functions.push(entry),
                DocEntryKind::Variable => grouped.variables.push(entry),
                // Member kinds never appear at the top level
                DocEntryKind::Method | DocEntryKind::Property => {}
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_names() {
        assert_eq!(DocEntryKind::TypeAlias.display_name(), "type");
        assert_eq!(DocEntryKind::Variable.display_name(), "const");
        assert!(DocEntryKind::Class.is_compound());
        assert!(!DocEntryKind::Function.is_compound());
    }

    #[test]
    fn test_with_doc() {
        let doc = DocComment::parse("/** Builds prompts. @since 2.0 */");
        let entry = DocEntry::new("PromptBuilder", DocEntryKind::Class).with_doc(doc);
        assert_eq!(entry.description.as_deref(), Some("Builds prompts."));
    }

    #[test]
    fn test_grouping_preserves_order() {
        let entries = vec![
            DocEntry::new("B", DocEntryKind::Function),
            DocEntry::new("A", DocEntryKind::TypeAlias),
            DocEntry::new("C", DocEntryKind::Function),
            DocEntry::new("D", DocEntryKind::Class),
        ];

        let grouped = GroupedExports::of(&entries);
        assert_eq!(
            grouped.functions.iter().map(|e| &e.name).collect::<Vec<_>>(),
            vec!["B", "C"]
        );
        assert_eq!(grouped.types.len(), 1);
        assert_eq!(grouped.classes.len(), 1);
        assert!(grouped.interfaces.is_empty());
    }

    #[test]
    fn test_find_export() {
        let mut module = ModuleDoc::new("builder/audio");
        module
            .exports
            .push(DocEntry::new("templates", DocEntryKind::Variable));

        assert!(module
            .find_export("templates", DocEntryKind::Variable)
            .is_some());
        assert!(module
            .find_export("templates", DocEntryKind::Class)
            .is_none());
    }
}
