//! Rules over the folder definition satellite.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{duplicate_diagnostics, occurrence, Occurrence};
use crate::error::Result;
use crate::json::{query, Segment};
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Flags folder shares that target the same grantee twice. The duplicate
/// wins last on install, which is never what the author meant.
pub struct DuplicateShareRule;

#[async_trait]
impl LintRule for DuplicateShareRule {
    fn name(&self) -> &'static str {
        "duplicate-shares"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Folder
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(doc) = ctx.satellite("folderDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
        for share in query::find_all(tree, tree.root(), &[Segment::Key("shares"), Segment::Any]) {
            let share_type = tree
                .object_get(share, "shareType")
                .and_then(|n| tree.string_value(n))
                .unwrap_or_default();
            let shared_with = tree
                .object_get(share, "sharedWithId")
                .and_then(|n| tree.string_value(n))
                .unwrap_or_default();
            groups
                .entry(format!("{share_type}:{shared_with}"))
                .or_default()
                .push(occurrence(&doc, share));
        }

        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::DuplicateShare,
            Severity::Warning,
            |key| format!("Duplicate share for '{key}'"),
            |key| format!("'{key}' is also shared here"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    const MANIFEST: &str = r#"{"folderDefinition": "folder.json"}"#;

    #[tokio::test]
    async fn duplicate_grantee_is_flagged() {
        let diags = run_rule(
            &DuplicateShareRule,
            MANIFEST,
            &[(
                "folder.json",
                r#"{"shares": [
                    {"accessType": "View", "shareType": "Organization", "sharedWithId": "00D1"},
                    {"accessType": "Edit", "shareType": "Organization", "sharedWithId": "00D1"}
                ]}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::DuplicateShare);
        }
    }

    #[tokio::test]
    async fn distinct_grantees_pass() {
        let diags = run_rule(
            &DuplicateShareRule,
            MANIFEST,
            &[(
                "folder.json",
                r#"{"shares": [
                    {"accessType": "View", "shareType": "Organization", "sharedWithId": "00D1"},
                    {"accessType": "View", "shareType": "Role", "sharedWithId": "00E5"}
                ]}"#,
            )],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn missing_folder_file_is_silent() {
        let diags = run_rule(&DuplicateShareRule, MANIFEST, &[]).await;
        assert!(diags.is_empty());
    }
}
