//! Shared analysis context
//!
//! One `AnalysisContext` is built per generator run over the full, fixed
//! module list, so that cross-module type references can be resolved later.
//! Paths that do not exist are filtered out silently before any parsing;
//! a module the parser cannot handle is dropped with a diagnostic and the
//! rest of the run continues. The only fatal outcome is an empty context.

use crate::diagnostics::{Diagnostic, DiagnosticsCollector, ScribeError, ScribeResult};
use crate::swc::{parse_typescript_file, ParsedModule};
use std::path::{Path, PathBuf};

/// Parsed modules for one generator run, in list order
#[derive(Debug)]
pub struct AnalysisContext {
    modules: Vec<(String, ParsedModule)>,
}

impl AnalysisContext {
    /// Build a context from an explicit ordered file list.
    ///
    /// `root` anchors module names: `<root>/builder/audio.ts` becomes the
    /// module `builder/audio`.
    pub fn build(
        root: &Path,
        files: &[PathBuf],
        diagnostics: &mut DiagnosticsCollector,
    ) -> ScribeResult<Self> {
        let existing: Vec<&PathBuf> = files.iter().filter(|p| p.exists()).collect();

        let mut modules = Vec::new();
        for path in existing {
            match parse_typescript_file(path) {
                Ok(parsed) => {
                    modules.push((module_name(root, path), parsed));
                }
                Err(e) => {
                    diagnostics.add(
                        Diagnostic::error(format!("failed to parse module: {}", e))
                            .in_file(path.clone()),
                    );
                }
            }
        }

        if modules.is_empty() {
            return Err(ScribeError::NoModules);
        }

        Ok(Self { modules })
    }

    /// Build a context from modules that were already parsed.
    ///
    /// Useful when the caller owns parsing, e.g. over in-memory sources.
    pub fn from_modules(modules: Vec<(String, ParsedModule)>) -> Self {
        Self { modules }
    }

    /// Number of parsed modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the context holds no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate modules in list order
    pub fn modules(&self) -> impl Iterator<Item = (&str, &ParsedModule)> {
        self.modules.iter().map(|(name, parsed)| (name.as_str(), parsed))
    }

    /// Look up a module by name
    pub fn get(&self, name: &str) -> ScribeResult<&ParsedModule> {
        self.modules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, parsed)| parsed)
            .ok_or_else(|| ScribeError::ModuleNotFound(name.to_string()))
    }
}

/// Derive a module name from its path: relative to `root`, extension
/// stripped, `/` separators.
fn module_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let stripped = relative.with_extension("");
    stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
