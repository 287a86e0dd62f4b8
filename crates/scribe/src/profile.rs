//! Generator run profile
//!
//! The profile fixes what a run analyzes and where the artifacts land. The
//! defaults carry the prompts.chat SDK layout: an explicit ordered module
//! list (never a directory scan) rooted at the SDK source tree, and the four
//! artifact destinations. A TOML file with the same shape can override any
//! field from the CLI.

use crate::resolve::MergePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Artifact destinations, each overwritten wholesale on every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputPaths {
    /// Human-readable markdown reference
    pub reference: PathBuf,
    /// Sidebar data table consumed by the IDE UI
    pub sidebar: PathBuf,
    /// Global type-declaration bundle for the editor surface
    pub declarations: PathBuf,
    /// Autocomplete option tables
    pub options: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            reference: PathBuf::from("packages/prompts.chat/API.md"),
            sidebar: PathBuf::from("src/data/api-docs.ts"),
            declarations: PathBuf::from("src/data/type-definitions.ts"),
            options: PathBuf::from("src/data/method-options.ts"),
        }
    }
}

/// Configuration for one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorProfile {
    /// Root the module list and module names are anchored at
    pub source_root: PathBuf,

    /// Ordered list of modules to analyze, relative to `source_root`.
    /// Paths that do not exist are filtered out silently.
    pub modules: Vec<PathBuf>,

    /// Module name the declaration bundle wraps its declarations in
    pub sdk_module: String,

    /// Conflict policy for same-named methods in the literal resolver
    pub merge_policy: MergePolicy,

    /// Artifact destinations
    pub outputs: OutputPaths,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("packages/prompts.chat/src"),
            modules: [
                "variables/index.ts",
                "similarity/index.ts",
                "quality/index.ts",
                "parser/index.ts",
                "builder/index.ts",
                "builder/chat.ts",
                "builder/media.ts",
                "builder/video.ts",
                "builder/audio.ts",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            sdk_module: "prompts.chat".to_string(),
            merge_policy: MergePolicy::default(),
            outputs: OutputPaths::default(),
        }
    }
}

impl GeneratorProfile {
    /// Absolute-ish module paths: the list joined onto the source root
    pub fn module_paths(&self) -> Vec<PathBuf> {
        self.modules
            .iter()
            .map(|m| self.source_root.join(m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = GeneratorProfile::default();
        assert_eq!(profile.modules.len(), 9);
        assert_eq!(profile.sdk_module, "prompts.chat");
        assert_eq!(profile.merge_policy, MergePolicy::PreferLonger);
        assert!(profile
            .module_paths()
            .iter()
            .all(|p| p.starts_with(&profile.source_root)));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let profile: GeneratorProfile = serde_json::from_str(
            r#"{ "source-root": "sdk/src", "merge-policy": "keep-first" }"#,
        )
        .unwrap();

        assert_eq!(profile.source_root, PathBuf::from("sdk/src"));
        assert_eq!(profile.merge_policy, MergePolicy::KeepFirst);
        assert_eq!(profile.modules.len(), 9);
        assert_eq!(
            profile.outputs.sidebar,
            PathBuf::from("src/data/api-docs.ts")
        );
    }
}
