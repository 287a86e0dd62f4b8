//! SWC/deno_ast TypeScript parsing utilities
//!
//! This module wraps deno_ast (which wraps SWC) behind the small surface the
//! rest of the crate needs: parsing a module, rendering any node span back to
//! its literal source text, and recovering attached documentation comments.
//!
//! Comment recovery requires converting an SWC `BytePos` into a deno_ast
//! `SourcePos`; that conversion lives in exactly one place,
//! [`ParsedModule::comment_blocks_at`], and every doc-comment lookup goes
//! through it.

use crate::diagnostics::{ScribeError, ScribeResult};
use deno_ast::swc::ast as swc_ast;
use deno_ast::swc::common::comments::{Comment, CommentKind};
use deno_ast::swc::common::{BytePos, Span};
use deno_ast::{MediaType, ParseParams, ParsedSource, SourcePos};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Information about the source file
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// The file path
    pub path: PathBuf,
    /// The source text
    pub text: Arc<str>,
}

impl SourceInfo {
    /// Create source info from a file path and content
    pub fn new(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Get the source text as a string slice
    pub fn source_text(&self) -> &str {
        &self.text
    }

    /// Extract source text for a span
    pub fn text_for_span(&self, span: Span) -> &str {
        let start = span.lo.0 as usize;
        let end = span.hi.0 as usize;
        &self.text[start.min(self.text.len())..end.min(self.text.len())]
    }
}

/// A parsed TypeScript module with source information
#[derive(Debug)]
pub struct ParsedModule {
    /// The parsed source from deno_ast
    pub source: ParsedSource,
    /// Source information for text lookups
    pub source_info: SourceInfo,
}

impl ParsedModule {
    /// Get the module AST
    pub fn module(&self) -> &swc_ast::Module {
        match self.source.program_ref() {
            deno_ast::ProgramRef::Module(m) => m,
            deno_ast::ProgramRef::Script(_) => {
                // parse_module never yields a script
                panic!("Expected module but got script")
            }
        }
    }

    /// Get the source text
    pub fn source_text(&self) -> &str {
        self.source_info.source_text()
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.source_info.path
    }

    /// Extract source text for a span
    pub fn text_for_span(&self, span: Span) -> &str {
        self.source_info.text_for_span(span)
    }

    /// Get the comment blocks leading a position.
    ///
    /// This is the single place where an SWC byte position is cast into a
    /// deno_ast source position to reach the comment map; everything else
    /// in the crate goes through this accessor.
    pub fn comment_blocks_at(&self, pos: BytePos) -> Vec<Comment> {
        let source_pos = SourcePos::unsafely_from_byte_pos(pos);
        self.source
            .comments()
            .get_leading(source_pos)
            .map(|v| v.to_vec())
            .unwrap_or_default()
    }

    /// Get the documentation comment attached to a span.
    ///
    /// Only the first doc-style block comment (`/** ... */`) leading the
    /// span is returned; any further blocks are ignored.
    pub fn doc_comment_for_span(&self, span: Span) -> Option<String> {
        let leading = self.comment_blocks_at(span.lo);

        for comment in leading.iter() {
            if comment.kind == CommentKind::Block {
                let text = comment.text.to_string();
                // Doc comments start with a second asterisk
                if text.starts_with('*') {
                    return Some(text);
                }
            }
        }
        None
    }
}

/// Parse a TypeScript file from disk
pub fn parse_typescript_file(path: impl AsRef<Path>) -> ScribeResult<ParsedModule> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        ScribeError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;

    parse_typescript_source(path, text)
}

/// Parse TypeScript source code from a string
pub fn parse_typescript_source(
    path: impl AsRef<Path>,
    source: impl Into<Arc<str>>,
) -> ScribeResult<ParsedModule> {
    let path = path.as_ref();
    let source: Arc<str> = source.into();

    let media_type = MediaType::from_path(path);

    let specifier = deno_ast::ModuleSpecifier::from_file_path(path)
        .map_err(|_| ScribeError::InvalidPath(path.display().to_string()))?;

    let parsed = deno_ast::parse_module(ParseParams {
        specifier,
        text: source.clone(),
        media_type,
        capture_tokens: true,
        scope_analysis: false,
        maybe_syntax: None,
    })
    .map_err(|e| ScribeError::TypeScriptParse(format!("{}", e)))?;

    let source_info = SourceInfo::new(path, source);

    Ok(ParsedModule {
        source: parsed,
        source_info,
    })
}

/// Get the span of a module item
pub fn module_item_span(item: &swc_ast::ModuleItem) -> Span {
    use deno_ast::swc::common::Spanned;
    match item {
        swc_ast::ModuleItem::ModuleDecl(decl) => decl.span(),
        swc_ast::ModuleItem::Stmt(stmt) => stmt.span(),
    }
}

/// Convert a property name to a string
pub fn prop_name_to_string(name: &swc_ast::PropName) -> String {
    match name {
        swc_ast::PropName::Ident(i) => i.sym.to_string(),
        swc_ast::PropName::Str(s) => String::from_utf8_lossy(s.value.as_bytes()).to_string(),
        swc_ast::PropName::Num(n) => n.value.to_string(),
        swc_ast::PropName::BigInt(b) => format!("{:?}", b.value),
        swc_ast::PropName::Computed(c) => {
            if let swc_ast::Expr::Ident(i) = c.expr.as_ref() {
                format!("[{}]", i.sym)
            } else {
                "[computed]".to_string()
            }
        }
    }
}

/// Format a qualified name (e.g., Namespace.Type)
pub fn format_qualified_name(name: &swc_ast::TsQualifiedName) -> String {
    let left = match &name.left {
        swc_ast::TsEntityName::Ident(i) => i.sym.to_string(),
        swc_ast::TsEntityName::TsQualifiedName(q) => format_qualified_name(q),
    };
    format!("{}.{}", left, name.right.sym)
}

/// Render an entity name (identifier or qualified path) as a string
pub fn entity_name_to_string(name: &swc_ast::TsEntityName) -> String {
    match name {
        swc_ast::TsEntityName::Ident(i) => i.sym.to_string(),
        swc_ast::TsEntityName::TsQualifiedName(q) => format_qualified_name(q),
    }
}
