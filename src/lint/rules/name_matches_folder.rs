//! Name-matches-folder validation.
//!
//! The manifest's `name` is what gets installed; keeping it equal to the
//! template directory name avoids surprises in org listings.

use async_trait::async_trait;

use crate::error::Result;
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Warns when the manifest `name` differs from the directory basename.
pub struct NameMatchesFolderRule;

#[async_trait]
impl LintRule for NameMatchesFolderRule {
    fn name(&self) -> &'static str {
        "name-matches-folder"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some((node, declared)) = ctx.manifest_string("name") else {
            return Ok(vec![]);
        };
        let Some(folder) = ctx.root.file_name().and_then(|n| n.to_str()) else {
            return Ok(vec![]);
        };
        if declared == folder {
            return Ok(vec![]);
        }
        Ok(vec![Diagnostic::at_node(
            ctx.manifest,
            node,
            DiagnosticCode::NameFolderMismatch,
            Severity::Warning,
            format!("Template name '{declared}' does not match its directory '{folder}'"),
        )
        .with_arg("name", declared)
        .with_arg("match", folder)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    #[tokio::test]
    async fn mismatch_warns_at_name_value() {
        // The test manifest lives under /tpl.
        let diags = run_rule(&NameMatchesFolderRule, r#"{"name": "Other"}"#, &[]).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::NameFolderMismatch);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].args.get("match").map(String::as_str), Some("tpl"));
    }

    #[tokio::test]
    async fn matching_name_passes() {
        let diags = run_rule(&NameMatchesFolderRule, r#"{"name": "tpl"}"#, &[]).await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn non_string_name_is_ignored() {
        let diags = run_rule(&NameMatchesFolderRule, r#"{"name": 3}"#, &[]).await;
        assert!(diags.is_empty());
    }
}
