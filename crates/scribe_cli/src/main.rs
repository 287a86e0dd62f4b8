//! scribe command line driver
//!
//! Runs the documentation generator once: load the profile, analyze the
//! fixed module list, write the four artifacts, print a summary. Per-module
//! failures are reported on stderr and never change the exit code; only a
//! fatal condition (no valid modules, unwritable output) exits non-zero.

use anyhow::{Context, Result};
use scribe::{Generator, GeneratorProfile, SummaryPrinter};
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config: Option<PathBuf> = None;
    let mut use_color = true;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "--no-color" => use_color = false,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("scribe {}", scribe::VERSION);
                return Ok(());
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    let profile = load_profile(config)?;
    let mut generator = Generator::new(profile);
    let summary = generator
        .run()
        .context("documentation generation failed")?;

    // Per-module failures were collected along the way; report them but
    // keep the exit code at zero
    generator.diagnostics().print();
    SummaryPrinter::new(use_color).print(&summary)?;

    Ok(())
}

/// Load the run profile: an explicit `--config` path, else `scribe.toml`
/// in the working directory when present, else the built-in defaults.
fn load_profile(config: Option<PathBuf>) -> Result<GeneratorProfile> {
    let path = match config {
        Some(path) => path,
        None => {
            let default = PathBuf::from("scribe.toml");
            if !default.exists() {
                return Ok(GeneratorProfile::default());
            }
            default
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let profile: GeneratorProfile = toml::from_str(&text)
        .with_context(|| format!("invalid profile in {}", path.display()))?;
    Ok(profile)
}

fn print_usage() {
    println!("scribe {} - documentation generator for the prompts.chat SDK", scribe::VERSION);
    println!();
    println!("Usage: scribe [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Profile TOML (defaults to ./scribe.toml when present)");
    println!("      --no-color       Disable colored output");
    println!("  -h, --help           Print this help");
    println!("  -V, --version        Print the version");
}
