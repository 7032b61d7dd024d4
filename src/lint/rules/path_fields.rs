//! Validation of manifest fields that reference other files.
//!
//! Covers the registered relative-path fields ([`PathFieldRule`]), fields
//! that resolve to the same file ([`DuplicatePathUsageRule`]), and the size
//! cap on referenced CSVs ([`CsvSizeRule`]).

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{duplicate_diagnostics, occurrence, Occurrence};
use crate::error::Result;
use crate::json::{query, NodeKind};
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::fields::{AssetKind, SourceKind, MAX_CSV_SIZE, PATH_FIELDS};
use crate::lint::rule::LintRule;
use crate::lint::workspace::FileStat;
use crate::util::is_valid_relative_path;

/// Checks every registered relative-path field: the value must be a string,
/// a valid template-relative path, and must resolve to an existing file.
pub struct PathFieldRule;

#[async_trait]
impl LintRule for PathFieldRule {
    fn name(&self) -> &'static str {
        "path-fields"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let mut diagnostics = Vec::new();

        for field in PATH_FIELDS {
            for node in query::find_all(tree, tree.root(), field.pattern) {
                let value = match &tree.node(node).kind {
                    NodeKind::String { value } => value.as_str(),
                    NodeKind::Null => {
                        continue;
                    }
                    _ => {
                        diagnostics.push(Diagnostic::at_node(
                            ctx.manifest,
                            node,
                            DiagnosticCode::PathValueMissing,
                            Severity::Error,
                            format!("Expected a relative path to a {}", field.kind.describe()),
                        ));
                        continue;
                    }
                };

                if !is_valid_relative_path(value) {
                    diagnostics.push(Diagnostic::at_node(
                        ctx.manifest,
                        node,
                        DiagnosticCode::PathInvalid,
                        Severity::Error,
                        format!(
                            "'{value}' is not a valid path relative to the template directory"
                        ),
                    ));
                    continue;
                }

                let resolved = ctx.root.join(value.trim());
                let stat = ctx.workspace.stat(&resolved).await;
                if !stat.exists() {
                    diagnostics.push(
                        Diagnostic::at_node(
                            ctx.manifest,
                            node,
                            DiagnosticCode::PathFileMissing,
                            Severity::Error,
                            format!("Referenced {} '{value}' does not exist", field.kind.describe()),
                        )
                        .with_arg("path", value),
                    );
                } else if !stat.is_file() {
                    diagnostics.push(Diagnostic::at_node(
                        ctx.manifest,
                        node,
                        DiagnosticCode::PathNotAFile,
                        Severity::Error,
                        format!("'{value}' is a directory, expected a {}", field.kind.describe()),
                    ));
                }
            }
        }

        Ok(diagnostics)
    }
}

/// Flags two or more path fields resolving to the identical file. Each
/// occurrence gets its own diagnostic with the siblings in related info.
pub struct DuplicatePathUsageRule;

#[async_trait]
impl LintRule for DuplicatePathUsageRule {
    fn name(&self) -> &'static str {
        "duplicate-path-usage"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();

        for field in PATH_FIELDS {
            for node in query::find_all(tree, tree.root(), field.pattern) {
                let Some(value) = tree.string_value(node) else {
                    continue;
                };
                if !is_valid_relative_path(value) {
                    continue;
                }
                groups
                    .entry(value.trim().to_string())
                    .or_default()
                    .push(occurrence(ctx.manifest, node));
            }
        }

        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::PathDuplicateUsage,
            Severity::Warning,
            |path| format!("File '{path}' is referenced by more than one field"),
            |path| format!("'{path}' is also referenced here"),
        ))
    }
}

/// Referenced external CSV files must stay under [`MAX_CSV_SIZE`] bytes.
/// The finding is reported against the referencing field, not the file.
pub struct CsvSizeRule;

#[async_trait]
impl LintRule for CsvSizeRule {
    fn name(&self) -> &'static str {
        "csv-size"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let mut diagnostics = Vec::new();

        for field in PATH_FIELDS.iter().filter(|f| f.kind == AssetKind::Csv) {
            for node in query::find_all(tree, tree.root(), field.pattern) {
                let Some(value) = tree.string_value(node) else {
                    continue;
                };
                if !is_valid_relative_path(value) {
                    continue;
                }
                let stat = ctx.workspace.stat(&ctx.root.join(value.trim())).await;
                if let FileStat::File { size } = stat {
                    if size > MAX_CSV_SIZE {
                        diagnostics.push(
                            Diagnostic::at_node(
                                ctx.manifest,
                                node,
                                DiagnosticCode::CsvFileTooLarge,
                                Severity::Warning,
                                format!(
                                    "CSV file '{value}' is {size} bytes, over the {MAX_CSV_SIZE} byte limit"
                                ),
                            )
                            .with_arg("path", value),
                        );
                    }
                }
            }
        }

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    #[tokio::test]
    async fn reports_missing_file() {
        let diags = run_rule(
            &PathFieldRule,
            r#"{"variableDefinition": "variables.json"}"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::PathFileMissing);
        assert_eq!(diags[0].json_path.as_deref(), Some("variableDefinition"));
    }

    #[tokio::test]
    async fn reports_invalid_path() {
        let diags = run_rule(
            &PathFieldRule,
            r#"{"variableDefinition": "../variables.json"}"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::PathInvalid);
    }

    #[tokio::test]
    async fn reports_non_string_value() {
        let diags = run_rule(&PathFieldRule, r#"{"variableDefinition": 42}"#, &[]).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::PathValueMissing);
    }

    #[tokio::test]
    async fn reports_directory_target() {
        let diags = run_rule(
            &PathFieldRule,
            r#"{"variableDefinition": "sub"}"#,
            &[("sub/inner.json", "{}")],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::PathNotAFile);
    }

    #[tokio::test]
    async fn accepts_existing_file() {
        let diags = run_rule(
            &PathFieldRule,
            r#"{"variableDefinition": "variables.json"}"#,
            &[("variables.json", "{}")],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn null_value_is_ignored() {
        let diags = run_rule(&PathFieldRule, r#"{"variableDefinition": null}"#, &[]).await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn array_path_fields_are_checked() {
        let diags = run_rule(
            &PathFieldRule,
            r#"{"dashboards": [{"file": "d1.json"}, {"file": "d2.json"}]}"#,
            &[("d1.json", "{}")],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].json_path.as_deref(), Some("dashboards[1].file"));
    }

    #[tokio::test]
    async fn duplicate_usage_flags_each_occurrence() {
        let diags = run_rule(
            &DuplicatePathUsageRule,
            r#"{"variableDefinition": "shared.json", "uiDefinition": "shared.json"}"#,
            &[("shared.json", "{}")],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::PathDuplicateUsage);
            assert_eq!(diag.related.len(), 1);
        }
    }

    #[tokio::test]
    async fn distinct_paths_are_not_duplicates() {
        let diags = run_rule(
            &DuplicatePathUsageRule,
            r#"{"variableDefinition": "a.json", "uiDefinition": "b.json"}"#,
            &[],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn oversized_csv_is_flagged() {
        let big = "x".repeat((MAX_CSV_SIZE + 1) as usize);
        let diags = run_rule(
            &CsvSizeRule,
            r#"{"externalFiles": [{"name": "d", "file": "data.csv"}]}"#,
            &[("data.csv", &big)],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::CsvFileTooLarge);
    }

    #[tokio::test]
    async fn small_csv_passes() {
        let diags = run_rule(
            &CsvSizeRule,
            r#"{"externalFiles": [{"name": "d", "file": "data.csv"}]}"#,
            &[("data.csv", "a,b\n1,2\n")],
        )
        .await;
        assert!(diags.is_empty());
    }
}
