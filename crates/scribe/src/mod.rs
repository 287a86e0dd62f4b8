//! scribe: API documentation and type-artifact generator for the
//! prompts.chat SDK
//!
//! This crate analyzes a fixed list of TypeScript SDK modules with
//! deno_ast/SWC, builds a documentation model of every exported
//! declaration, resolves the string-literal option sets reachable from
//! class method parameters across all modules, and renders four artifacts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ AnalysisContext  │  deno_ast/SWC parse, one shared context
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┐
//!    ▼            ▼
//! ┌───────────┐ ┌────────────────┐
//! │ ModuleDoc │ │ LiteralOption  │
//! │ (extract) │ │ Table (resolve)│
//! └─────┬─────┘ └───────┬────────┘
//!       └───────┬───────┘
//!               ▼
//!   ┌───────────────────────┐
//!   │ reference · sidebar   │
//!   │ declarations · options│
//!   └───────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use scribe::{Generator, GeneratorProfile};
//!
//! let mut generator = Generator::new(GeneratorProfile::default());
//! let summary = generator.run().expect("generation failed");
//! println!("{} modules documented", summary.module_count);
//! ```

// Core model
pub mod entry;
pub mod js_doc;
pub mod params;

// Parsing and analysis
pub mod context;
pub mod extract;
pub mod resolve;
pub mod swc;

// Output generation
pub mod emit;
pub mod generator;
pub mod printer;

// Support
pub mod diagnostics;
pub mod profile;

// Re-exports for convenience
pub use context::AnalysisContext;
pub use diagnostics::{Diagnostic, DiagnosticsCollector, ScribeError, ScribeResult};
pub use emit::{Artifacts, EmissionState};
pub use entry::{DocEntry, DocEntryKind, GroupedExports, ModuleDoc};
pub use generator::{Generator, RunSummary};
pub use js_doc::DocComment;
pub use params::Param;
pub use printer::SummaryPrinter;
pub use profile::{GeneratorProfile, OutputPaths};
pub use resolve::{resolve_literal_options, LiteralOptionTable, MergePolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
