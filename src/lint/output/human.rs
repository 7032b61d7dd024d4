//! Human-readable output formatter.
//!
//! Formats lint results for terminal display with optional color support.

use super::LintFormatter;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::linter::LintResult;
use console::style;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        let label = severity.to_string();
        if !self.use_color {
            return label;
        }
        match severity {
            Severity::Error => style(label).red().bold().to_string(),
            Severity::Warning => style(label).yellow().bold().to_string(),
            Severity::Info => style(label).cyan().to_string(),
            Severity::Hint => style(label).dim().to_string(),
        }
    }

    fn write_diagnostic<W: Write>(&self, diag: &Diagnostic, writer: &mut W) -> std::io::Result<()> {
        // Header line: error[code]: message
        writeln!(
            writer,
            "{}[{}]: {}",
            self.severity_prefix(diag.severity),
            diag.code,
            diag.message
        )?;

        // Location line
        writeln!(
            writer,
            "  --> {}:{}:{}",
            diag.span.file.display(),
            diag.span.start_line,
            diag.span.start_col
        )?;

        // Suggested replacement, when one exists
        if let Some(replacement) = diag.args.get("match") {
            writeln!(writer, "   = help: replace with '{}'", replacement)?;
        }

        // Related info
        for related in &diag.related {
            writeln!(
                writer,
                "   = note: {} ({}:{})",
                related.message,
                related.span.file.display(),
                related.span.start_line
            )?;
        }

        writeln!(writer)
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(&self, result: &LintResult, writer: &mut W) -> std::io::Result<()> {
        for diagnostic in result.iter() {
            self.write_diagnostic(diagnostic, writer)?;
        }

        let errors = result.count(Severity::Error);
        let warnings = result.count(Severity::Warning);
        if errors > 0 || warnings > 0 {
            writeln!(writer, "Found {} error(s) and {} warning(s)", errors, warnings)?;
        } else if result.is_clean() {
            writeln!(writer, "No problems found")?;
        }

        Ok(())
    }
}
