//! Automatic fix application.
//!
//! Some diagnostics carry enough structure to be fixed mechanically: an
//! unknown variable reference with a confident suggestion, a template name
//! that should match its directory. This module turns those into byte-range
//! replacements and applies them per file, bottom-up so earlier offsets stay
//! valid.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::codes::DiagnosticCode;
use super::diagnostic::Diagnostic;
use super::linter::LintResult;

/// A text replacement that can be applied automatically.
#[derive(Debug, Clone)]
pub struct Fix {
    /// File to modify.
    pub file: PathBuf,
    /// Start byte offset.
    pub start: usize,
    /// End byte offset.
    pub end: usize,
    /// Replacement text.
    pub replacement: String,
}

/// Result of attempting to apply fixes.
#[derive(Debug)]
pub struct FixResult {
    /// Number of fixes applied.
    pub applied: usize,
    /// Errors that occurred during fixing.
    pub errors: Vec<String>,
}

/// Diagnostic codes whose `match` argument is a drop-in replacement for the
/// span content.
const REPLACEABLE: &[DiagnosticCode] = &[
    DiagnosticCode::UnknownVariable,
    DiagnosticCode::NameFolderMismatch,
];

/// Engine for applying automatic fixes.
pub struct FixEngine;

impl FixEngine {
    /// Create a new fix engine.
    pub fn new() -> Self {
        Self
    }

    /// Derive the applicable fixes from a lint result.
    ///
    /// Only diagnostics with a replaceable code and a `match` argument
    /// qualify; everything else needs a human.
    pub fn collect_fixes(&self, result: &LintResult) -> Vec<Fix> {
        result
            .iter()
            .filter_map(|diagnostic| self.fix_for(diagnostic))
            .collect()
    }

    fn fix_for(&self, diagnostic: &Diagnostic) -> Option<Fix> {
        if !REPLACEABLE.contains(&diagnostic.code) {
            return None;
        }
        let replacement = diagnostic.args.get("match")?;
        Some(Fix {
            file: diagnostic.span.file.clone(),
            start: diagnostic.span.start_offset,
            end: diagnostic.span.end_offset,
            replacement: replacement.clone(),
        })
    }

    /// Apply fixes, grouped per file.
    pub fn apply_fixes(&self, fixes: &[Fix]) -> FixResult {
        let mut applied = 0;
        let mut errors = Vec::new();

        let mut fixes_by_file: HashMap<&Path, Vec<&Fix>> = HashMap::new();
        for fix in fixes {
            fixes_by_file
                .entry(fix.file.as_path())
                .or_default()
                .push(fix);
        }

        for (file, file_fixes) in fixes_by_file {
            match self.apply_fixes_to_file(file, &file_fixes) {
                Ok(count) => applied += count,
                Err(e) => errors.push(format!("{}: {}", file.display(), e)),
            }
        }

        FixResult { applied, errors }
    }

    /// Replace ranges in a string, last-to-first. Exposed for hosts that
    /// hold documents in memory instead of on disk.
    pub fn apply_to_text(&self, text: &str, fixes: &[&Fix]) -> String {
        let mut sorted = fixes.to_vec();
        sorted.sort_by(|a, b| b.start.cmp(&a.start));

        let mut content = text.to_string();
        for fix in &sorted {
            if fix.start <= fix.end && fix.end <= content.len() {
                content = format!(
                    "{}{}{}",
                    &content[..fix.start],
                    &fix.replacement,
                    &content[fix.end..]
                );
            }
        }
        content
    }

    fn apply_fixes_to_file(&self, file: &Path, fixes: &[&Fix]) -> Result<usize, String> {
        let content =
            fs::read_to_string(file).map_err(|e| format!("Failed to read file: {}", e))?;
        let new_content = self.apply_to_text(&content, fixes);
        fs::write(file, new_content).map_err(|e| format!("Failed to write file: {}", e))?;
        Ok(fixes.len())
    }
}

impl Default for FixEngine {
    fn default() -> Self {
        Self::new()
    }
}
