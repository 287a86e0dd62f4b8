//! Artifact emitters
//!
//! Four independent, order-sensitive text generators over the same immutable
//! model. Each emitter is pure: the same model always renders to the same
//! text, and nothing here holds state across runs. Cross-module dedup in the
//! declaration bundle goes through an explicit [`EmissionState`] value
//! instead of shared mutable sets.

pub mod declarations;
pub mod options;
pub mod reference;
pub mod sidebar;

pub use declarations::DeclarationEmitter;
pub use options::OptionsEmitter;
pub use reference::ReferenceEmitter;
pub use sidebar::SidebarEmitter;

use crate::diagnostics::ScribeResult;
use crate::entry::{DocEntryKind, ModuleDoc};
use crate::profile::GeneratorProfile;
use crate::resolve::LiteralOptionTable;
use std::collections::HashSet;

/// The four artifact texts produced by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Human-readable markdown reference
    pub reference: String,
    /// Sidebar data table
    pub sidebar: String,
    /// Global type-declaration bundle
    pub declarations: String,
    /// Autocomplete option tables
    pub options: String,
}

/// Render all four artifacts from the model
pub fn render_all(
    modules: &[ModuleDoc],
    options: &LiteralOptionTable,
    profile: &GeneratorProfile,
) -> ScribeResult<Artifacts> {
    Ok(Artifacts {
        reference: ReferenceEmitter::new().render(modules)?,
        sidebar: SidebarEmitter::new().render(modules)?,
        declarations: DeclarationEmitter::new(&profile.sdk_module).render(modules)?,
        options: OptionsEmitter::new().render(options)?,
    })
}

/// Record of names already emitted, per kind.
///
/// Threaded through the declaration bundle so that the first-processed
/// module's rendering of a name wins and later modules are skipped.
#[derive(Debug, Default)]
pub struct EmissionState {
    emitted: HashSet<(DocEntryKind, String)>,
}

impl EmissionState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a name for a kind; returns false when it was already emitted
    pub fn claim(&mut self, kind: DocEntryKind, name: &str) -> bool {
        self.emitted.insert((kind, name.to_string()))
    }
}
