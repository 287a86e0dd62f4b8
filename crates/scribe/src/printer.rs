//! Terminal run-summary printer
//!
//! Prints the end-of-run report: one line per written artifact and the
//! model counts, with optional ANSI colors for terminals that support
//! them. Diagnostics go to stderr through the collector, not through this
//! printer.

use crate::generator::RunSummary;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Run summary printer
pub struct SummaryPrinter {
    use_color: bool,
}

impl SummaryPrinter {
    /// Create a new printer
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Render the summary as plain lines
    pub fn render_lines(&self, summary: &RunSummary) -> Vec<String> {
        let mut lines: Vec<String> = summary
            .written
            .iter()
            .map(|path| format!("generated {}", path.display()))
            .collect();
        lines.push(format!(
            "Parsed {} modules with {} exports",
            summary.module_count, summary.export_count
        ));
        lines.push(format!(
            "Extracted {} method options and {} type aliases",
            summary.method_option_count, summary.type_alias_count
        ));
        lines
    }

    /// Print the summary to stdout
    pub fn print(&self, summary: &RunSummary) -> io::Result<()> {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);

        for path in &summary.written {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(&mut stdout, "generated")?;
            stdout.reset()?;
            writeln!(&mut stdout, " {}", path.display())?;
        }

        writeln!(
            &mut stdout,
            "Parsed {} modules with {} exports",
            summary.module_count, summary.export_count
        )?;
        writeln!(
            &mut stdout,
            "Extracted {} method options and {} type aliases",
            summary.method_option_count, summary.type_alias_count
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_lines() {
        let summary = RunSummary {
            module_count: 9,
            export_count: 42,
            method_option_count: 17,
            type_alias_count: 23,
            written: vec![PathBuf::from("API.md"), PathBuf::from("data/api-docs.ts")],
        };

        let lines = SummaryPrinter::new(false).render_lines(&summary);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "generated API.md");
        assert_eq!(lines[2], "Parsed 9 modules with 42 exports");
        assert_eq!(lines[3], "Extracted 17 method options and 23 type aliases");
    }
}
