//! JSON output formatter.
//!
//! Formats lint results as machine-readable JSON for tooling integration.
//! Diagnostics are grouped per document, with structured args and related
//! locations preserved for quick-fix consumers.

use super::LintFormatter;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::linter::LintResult;
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    documents: Vec<JsonDocument<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    file: String,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    hints: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, result: &LintResult, writer: &mut W) -> std::io::Result<()> {
        let documents: Vec<_> = result
            .diagnostics
            .iter()
            .map(|(file, diagnostics)| JsonDocument {
                file: file.display().to_string(),
                diagnostics,
            })
            .collect();

        let output = JsonOutput {
            documents,
            summary: JsonSummary {
                total: result.total(),
                errors: result.count(Severity::Error),
                warnings: result.count(Severity::Warning),
                infos: result.count(Severity::Info),
                hints: result.count(Severity::Hint),
            },
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}
