//! Deprecated manifest fields that clash with their replacements.
//!
//! Older manifests carried a single rules file and flat icon fields. The
//! current format uses a `rules` array and a structured `icons` object;
//! declaring both generations at once is flagged on the deprecated side,
//! whether or not the values agree.

use async_trait::async_trait;

use crate::error::Result;
use crate::json::query;
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// A deprecated field and the replacement that conflicts with it.
struct DeprecatedPair {
    /// Path of the deprecated field.
    deprecated: &'static [&'static str],
    /// Path of the replacement field.
    replacement: &'static [&'static str],
    code: DiagnosticCode,
    severity: Severity,
}

const PAIRS: &[DeprecatedPair] = &[
    DeprecatedPair {
        deprecated: &["ruleDefinition"],
        replacement: &["rules"],
        code: DiagnosticCode::DeprecatedRuleDefinition,
        severity: Severity::Error,
    },
    DeprecatedPair {
        deprecated: &["assetIcon"],
        replacement: &["icons", "appBadge"],
        code: DiagnosticCode::DeprecatedIconField,
        severity: Severity::Warning,
    },
    DeprecatedPair {
        deprecated: &["templateIcon"],
        replacement: &["icons", "templateBadge"],
        code: DiagnosticCode::DeprecatedIconField,
        severity: Severity::Warning,
    },
];

/// Flags manifests that declare both sides of a deprecated/replacement
/// field pair.
pub struct DeprecatedFieldsRule;

#[async_trait]
impl LintRule for DeprecatedFieldsRule {
    fn name(&self) -> &'static str {
        "deprecated-fields"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let mut diagnostics = Vec::new();

        for pair in PAIRS {
            let Some(deprecated) = query::property_at(tree, tree.root(), pair.deprecated) else {
                continue;
            };
            if query::property_at(tree, tree.root(), pair.replacement).is_none() {
                continue;
            }
            diagnostics.push(Diagnostic::at_node(
                ctx.manifest,
                deprecated,
                pair.code,
                pair.severity,
                format!(
                    "'{}' is deprecated and ignored when '{}' is present",
                    pair.deprecated.join("."),
                    pair.replacement.join(".")
                ),
            ));
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    #[tokio::test]
    async fn both_rule_fields_flag_the_legacy_one() {
        let diags = run_rule(
            &DeprecatedFieldsRule,
            r#"{"ruleDefinition": "old.json", "rules": [{"file": "new.json"}]}"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::DeprecatedRuleDefinition);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].json_path.as_deref(), Some("ruleDefinition"));
    }

    #[tokio::test]
    async fn legacy_alone_is_accepted() {
        let diags = run_rule(
            &DeprecatedFieldsRule,
            r#"{"ruleDefinition": "old.json"}"#,
            &[],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn icon_conflicts_warn_per_pair() {
        let diags = run_rule(
            &DeprecatedFieldsRule,
            r#"{
                "assetIcon": "16.png",
                "templateIcon": "default.png",
                "icons": {
                    "appBadge": {"name": "16.png"},
                    "templateBadge": {"name": "default.png"}
                }
            }"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::DeprecatedIconField);
            assert_eq!(diag.severity, Severity::Warning);
        }
    }

    #[tokio::test]
    async fn equal_values_still_conflict() {
        let diags = run_rule(
            &DeprecatedFieldsRule,
            r#"{"assetIcon": "same.png", "icons": {"appBadge": {"name": "same.png"}}}"#,
            &[],
        )
        .await;
        assert_eq!(diags.len(), 1);
    }
}
