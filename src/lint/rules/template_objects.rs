//! Minimum-content checks per template type.
//!
//! A template that ships nothing is not installable. What "nothing" means
//! depends on the declared `templateType`: app-like templates need at least
//! one asset of any kind, dashboard templates exactly one dashboard, data
//! templates at least one data object.

use async_trait::async_trait;

use crate::error::Result;
use crate::json::{JsonTree, NodeId};
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, RelatedInfo, Severity};
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Arrays that make an app-like template non-empty.
const APP_OBJECT_ARRAYS: &[&str] = &[
    "dashboards",
    "lenses",
    "eltDataflows",
    "recipes",
    "externalFiles",
    "datasetFiles",
    "components",
];

/// Arrays that make a data template non-empty.
const DATA_OBJECT_ARRAYS: &[&str] = &[
    "externalFiles",
    "datasetFiles",
    "recipes",
    "eltDataflows",
];

/// Enforces the per-type minimum object counts.
pub struct TemplateObjectsRule;

#[async_trait]
impl LintRule for TemplateObjectsRule {
    fn name(&self) -> &'static str {
        "template-objects"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let declared = ctx
            .manifest_string("templateType")
            .map(|(node, value)| (node, value.to_ascii_lowercase()));
        // The type field itself when present, the whole manifest otherwise.
        let anchor = declared
            .as_ref()
            .map_or_else(|| tree.root(), |(node, _)| *node);

        let mut diagnostics = Vec::new();
        match declared.as_ref().map(|(_, value)| value.as_str()) {
            Some("dashboard") => {
                let count = tree
                    .object_get(tree.root(), "dashboards")
                    .map_or(0, |d| tree.elements(d).len());
                if count != 1 {
                    diagnostics.push(Diagnostic::at_node(
                        ctx.manifest,
                        anchor,
                        DiagnosticCode::DashboardSingleRequired,
                        Severity::Error,
                        format!(
                            "Dashboard templates must contain exactly one dashboard, found {count}"
                        ),
                    ));
                }
            }
            Some("data") => {
                if let Some(diag) = missing_objects(
                    ctx,
                    tree,
                    anchor,
                    DATA_OBJECT_ARRAYS,
                    DiagnosticCode::DataMissingObjects,
                    "Data templates must include at least one external file, dataset, recipe, or dataflow",
                ) {
                    diagnostics.push(diag);
                }
            }
            // Unrecognized and absent types get the permissive app handling.
            _ => {
                if let Some(diag) = missing_objects(
                    ctx,
                    tree,
                    anchor,
                    APP_OBJECT_ARRAYS,
                    DiagnosticCode::TemplateMissingObjects,
                    "App templates must include at least one dashboard, lens, dataflow, recipe, dataset, external file, or component",
                ) {
                    diagnostics.push(diag);
                }
            }
        }
        Ok(diagnostics)
    }
}

/// Aggregate count across the qualifying arrays; zero yields one diagnostic
/// on the anchor with related info on every present-but-empty array.
fn missing_objects(
    ctx: &RuleContext<'_>,
    tree: &JsonTree,
    anchor: NodeId,
    arrays: &[&str],
    code: DiagnosticCode,
    message: &str,
) -> Option<Diagnostic> {
    let mut total = 0usize;
    let mut empty_arrays: Vec<RelatedInfo> = Vec::new();

    for key in arrays {
        if let Some(node) = tree.object_get(tree.root(), key) {
            let len = tree.elements(node).len();
            total += len;
            if len == 0 {
                empty_arrays.push(RelatedInfo {
                    span: ctx.manifest.span_of(node),
                    message: format!("'{key}' is empty"),
                });
            }
        }
    }
    // Extended types contribute through their nested per-type arrays.
    if let Some(extended) = tree.object_get(tree.root(), "extendedTypes") {
        for &prop in tree.properties(extended) {
            if let Some(value) = tree.property_value(prop) {
                let len = tree.elements(value).len();
                total += len;
                if len == 0 {
                    if let Some(key) = tree.property_key(prop) {
                        empty_arrays.push(RelatedInfo {
                            span: ctx.manifest.span_of(value),
                            message: format!("extended type '{key}' is empty"),
                        });
                    }
                }
            }
        }
    }

    (total == 0).then(|| {
        Diagnostic::at_node(ctx.manifest, anchor, code, Severity::Error, message)
            .with_related_sorted(empty_arrays)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    #[tokio::test]
    async fn empty_app_template_is_flagged_once() {
        let diags = run_rule(&TemplateObjectsRule, r#"{"templateType": "app"}"#, &[]).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::TemplateMissingObjects);
        assert_eq!(diags[0].json_path.as_deref(), Some("templateType"));
    }

    #[tokio::test]
    async fn one_dashboard_satisfies_app_minimum() {
        let diags = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "app", "dashboards": [{"name": "d", "file": "d.json"}]}"#,
            &[],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn empty_arrays_appear_in_related_info() {
        let diags = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "app", "dashboards": [], "lenses": []}"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].related.len(), 2);
    }

    #[tokio::test]
    async fn type_is_case_insensitive() {
        let diags = run_rule(&TemplateObjectsRule, r#"{"templateType": "APP"}"#, &[]).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::TemplateMissingObjects);
    }

    #[tokio::test]
    async fn absent_type_defaults_to_app_handling() {
        let diags = run_rule(&TemplateObjectsRule, "{}", &[]).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::TemplateMissingObjects);
    }

    #[tokio::test]
    async fn dashboard_type_needs_exactly_one() {
        let none = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "dashboard", "dashboards": []}"#,
            &[],
        )
        .await;
        assert_eq!(none.len(), 1);
        assert_eq!(none[0].code, DiagnosticCode::DashboardSingleRequired);

        let two = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "dashboard", "dashboards": [{"file": "a.json"}, {"file": "b.json"}]}"#,
            &[],
        )
        .await;
        assert_eq!(two.len(), 1);

        let one = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "dashboard", "dashboards": [{"file": "a.json"}]}"#,
            &[],
        )
        .await;
        assert!(one.is_empty());
    }

    #[tokio::test]
    async fn data_type_checks_data_objects() {
        let empty = run_rule(&TemplateObjectsRule, r#"{"templateType": "data"}"#, &[]).await;
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].code, DiagnosticCode::DataMissingObjects);

        let filled = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "data", "externalFiles": [{"name": "f", "file": "f.csv"}]}"#,
            &[],
        )
        .await;
        assert!(filled.is_empty());
    }

    #[tokio::test]
    async fn extended_types_count_toward_minimum() {
        let diags = run_rule(
            &TemplateObjectsRule,
            r#"{"templateType": "app", "extendedTypes": {"discoveryStories": [{"file": "s.json"}]}}"#,
            &[],
        )
        .await;
        assert!(diags.is_empty());
    }
}
