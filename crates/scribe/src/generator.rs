//! Generator - one-shot pipeline driver
//!
//! A full run is always: build the analysis context over the fixed module
//! list, extract every module, resolve literal options globally, render the
//! four artifacts, then write them wholesale as the terminal step. There is
//! no partial or incremental mode; per-module failures are recorded on the
//! diagnostics collector and never abort the run.

use crate::context::AnalysisContext;
use crate::diagnostics::{DiagnosticsCollector, ScribeResult};
use crate::emit::{self, Artifacts};
use crate::entry::ModuleDoc;
use crate::extract::extract_module;
use crate::profile::GeneratorProfile;
use crate::resolve::{resolve_literal_options, LiteralOptionTable};
use std::path::PathBuf;

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Modules that produced exports
    pub module_count: usize,
    /// Total exports across those modules
    pub export_count: usize,
    /// Resolved method option sets
    pub method_option_count: usize,
    /// Resolved type alias sets
    pub type_alias_count: usize,
    /// Artifact files written, in output order
    pub written: Vec<PathBuf>,
}

/// The documentation generator
pub struct Generator {
    profile: GeneratorProfile,
    diagnostics: DiagnosticsCollector,
}

impl Generator {
    /// Create a generator with the given profile
    pub fn new(profile: GeneratorProfile) -> Self {
        Self {
            profile,
            diagnostics: DiagnosticsCollector::new(),
        }
    }

    /// Get the profile
    pub fn profile(&self) -> &GeneratorProfile {
        &self.profile
    }

    /// Get the diagnostics collected so far
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    /// Build the model and render the artifacts without writing anything
    pub fn generate(
        &mut self,
    ) -> ScribeResult<(Vec<ModuleDoc>, LiteralOptionTable, Artifacts)> {
        let paths = self.profile.module_paths();
        let ctx =
            AnalysisContext::build(&self.profile.source_root, &paths, &mut self.diagnostics)?;

        // Extraction is per-module and order-preserving; modules without
        // exports contribute nothing
        let mut modules = Vec::new();
        for (name, parsed) in ctx.modules() {
            let module = extract_module(parsed, name);
            if !module.exports.is_empty() {
                modules.push(module);
            }
        }

        // Phase-1 collection runs over every module before any Phase-2
        // resolution, inside resolve_literal_options
        let options = resolve_literal_options(&ctx, self.profile.merge_policy);

        let artifacts = emit::render_all(&modules, &options, &self.profile)?;

        Ok((modules, options, artifacts))
    }

    /// Run the full pipeline and write all four artifacts
    pub fn run(&mut self) -> ScribeResult<RunSummary> {
        let (modules, options, artifacts) = self.generate()?;

        let outputs = [
            (self.profile.outputs.reference.clone(), &artifacts.reference),
            (self.profile.outputs.sidebar.clone(), &artifacts.sidebar),
            (
                self.profile.outputs.declarations.clone(),
                &artifacts.declarations,
            ),
            (self.profile.outputs.options.clone(), &artifacts.options),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (path, text) in outputs {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, text)?;
            written.push(path);
        }

        Ok(RunSummary {
            module_count: modules.len(),
            export_count: modules.iter().map(|m| m.exports.len()).sum(),
            method_option_count: options.method_options.len(),
            type_alias_count: options.type_aliases.len(),
            written,
        })
    }
}
