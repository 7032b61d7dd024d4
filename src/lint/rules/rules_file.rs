//! Rules over the template rules files.
//!
//! One template may carry several rules files (the legacy `ruleDefinition`
//! plus every `rules[*].file` entry); constants, rule names, and macros
//! share a namespace across all of them, so uniqueness is checked over the
//! whole set at once.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{duplicate_diagnostics, occurrence, Occurrence};
use crate::error::Result;
use crate::json::{query, Segment};
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::document::Document;
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Collect occurrences of a string-valued pattern across all rules files,
/// keyed by the string value.
async fn collect_names(
    ctx: &RuleContext<'_>,
    pattern: &[Segment<'_>],
) -> BTreeMap<String, Vec<Occurrence>> {
    let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
    for doc in ctx.rules_documents().await {
        let Some(tree) = doc.tree() else { continue };
        for node in query::find_all(tree, tree.root(), pattern) {
            if let Some(name) = tree.string_value(node) {
                groups
                    .entry(name.to_string())
                    .or_default()
                    .push(occurrence(&doc, node));
            }
        }
    }
    groups
}

/// Constants must be unique across all rules files.
pub struct DuplicateConstantRule;

#[async_trait]
impl LintRule for DuplicateConstantRule {
    fn name(&self) -> &'static str {
        "duplicate-constants"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Rules
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let groups = collect_names(
            ctx,
            &[
                Segment::Key("constants"),
                Segment::Any,
                Segment::Key("name"),
            ],
        )
        .await;
        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::DuplicateConstant,
            Severity::Warning,
            |name| format!("Duplicate constant '{name}'"),
            |name| format!("'{name}' is also defined here"),
        ))
    }
}

/// Rule names should be unique; duplicates make action logs ambiguous.
pub struct DuplicateRuleNameRule;

#[async_trait]
impl LintRule for DuplicateRuleNameRule {
    fn name(&self) -> &'static str {
        "duplicate-rule-names"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Rules
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let groups =
            collect_names(ctx, &[Segment::Key("rules"), Segment::Any, Segment::Key("name")]).await;
        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::DuplicateRuleName,
            Severity::Hint,
            |name| format!("Duplicate rule name '{name}'"),
            |name| format!("'{name}' is also used here"),
        ))
    }
}

/// Macro definitions are keyed by `namespace:name` and must be unique.
pub struct DuplicateMacroRule;

#[async_trait]
impl LintRule for DuplicateMacroRule {
    fn name(&self) -> &'static str {
        "duplicate-macros"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Rules
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
        for doc in ctx.rules_documents().await {
            let Some(tree) = doc.tree() else { continue };
            for ns_node in query::find_all(tree, tree.root(), &[Segment::Key("macros"), Segment::Any])
            {
                let namespace = tree
                    .object_get(ns_node, "namespace")
                    .and_then(|n| tree.string_value(n))
                    .unwrap_or_default();
                for name_node in query::find_all(
                    tree,
                    ns_node,
                    &[Segment::Key("definitions"), Segment::Any, Segment::Key("name")],
                ) {
                    if let Some(name) = tree.string_value(name_node) {
                        groups
                            .entry(format!("{namespace}:{name}"))
                            .or_default()
                            .push(occurrence(&doc, name_node));
                    }
                }
            }
        }
        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::DuplicateMacro,
            Severity::Warning,
            |key| format!("Duplicate macro '{key}'"),
            |key| format!("'{key}' is also defined here"),
        ))
    }
}

/// A macro with no `returns` and no actions does nothing at runtime.
pub struct NoOpMacroRule;

#[async_trait]
impl LintRule for NoOpMacroRule {
    fn name(&self) -> &'static str {
        "no-op-macros"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Rules
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        for doc in ctx.rules_documents().await {
            let Some(tree) = doc.tree() else { continue };
            for definition in query::find_all(
                tree,
                tree.root(),
                &[
                    Segment::Key("macros"),
                    Segment::Any,
                    Segment::Key("definitions"),
                    Segment::Any,
                ],
            ) {
                check_definition(&doc, definition, &mut diagnostics);
            }
        }
        Ok(diagnostics)
    }
}

fn check_definition(doc: &Arc<Document>, definition: crate::json::NodeId, out: &mut Vec<Diagnostic>) {
    let Some(tree) = doc.tree() else { return };
    let has_returns = tree.object_get(definition, "returns").is_some();
    let has_actions = tree
        .object_get(definition, "actions")
        .is_some_and(|a| !tree.elements(a).is_empty());
    if has_returns || has_actions {
        return;
    }
    let name = tree
        .object_get(definition, "name")
        .and_then(|n| tree.string_value(n))
        .unwrap_or("(unnamed)");
    out.push(Diagnostic::at_node(
        doc,
        definition,
        DiagnosticCode::MacroNoOp,
        Severity::Info,
        format!("Macro '{name}' has no returns value and no actions; it will do nothing"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    const MANIFEST: &str = r#"{"ruleDefinition": "rules.json"}"#;

    #[tokio::test]
    async fn two_constants_named_x_yield_two_diagnostics() {
        let diags = run_rule(
            &DuplicateConstantRule,
            MANIFEST,
            &[(
                "rules.json",
                r#"{"constants": [{"name": "X", "value": 1}, {"name": "X", "value": 2}]}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::DuplicateConstant);
            assert_eq!(diag.related.len(), 1);
        }
        // Each diagnostic points at the other occurrence.
        assert_ne!(
            diags[0].span.start_offset,
            diags[0].related[0].span.start_offset
        );
    }

    #[tokio::test]
    async fn duplicates_across_files_are_caught() {
        let manifest = r#"{"ruleDefinition": "a.json", "rules": [{"file": "b.json"}]}"#;
        let diags = run_rule(
            &DuplicateConstantRule,
            manifest,
            &[
                ("a.json", r#"{"constants": [{"name": "X"}]}"#),
                ("b.json", r#"{"constants": [{"name": "X"}]}"#),
            ],
        )
        .await;
        assert_eq!(diags.len(), 2);
    }

    #[tokio::test]
    async fn rule_name_duplicates_are_hints() {
        let diags = run_rule(
            &DuplicateRuleNameRule,
            MANIFEST,
            &[(
                "rules.json",
                r#"{"rules": [{"name": "r"}, {"name": "r"}]}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Hint);
    }

    #[tokio::test]
    async fn macros_are_keyed_by_namespace() {
        // Same name in different namespaces is fine.
        let distinct = run_rule(
            &DuplicateMacroRule,
            MANIFEST,
            &[(
                "rules.json",
                r#"{"macros": [
                    {"namespace": "a", "definitions": [{"name": "m", "returns": "1"}]},
                    {"namespace": "b", "definitions": [{"name": "m", "returns": "1"}]}
                ]}"#,
            )],
        )
        .await;
        assert!(distinct.is_empty());

        let clashing = run_rule(
            &DuplicateMacroRule,
            MANIFEST,
            &[(
                "rules.json",
                r#"{"macros": [
                    {"namespace": "a", "definitions": [{"name": "m", "returns": "1"}, {"name": "m", "returns": "2"}]}
                ]}"#,
            )],
        )
        .await;
        assert_eq!(clashing.len(), 2);
        assert!(clashing[0].message.contains("a:m"));
    }

    #[tokio::test]
    async fn no_op_macro_is_informational() {
        let diags = run_rule(
            &NoOpMacroRule,
            MANIFEST,
            &[(
                "rules.json",
                r#"{"macros": [{"namespace": "a", "definitions": [
                    {"name": "empty"},
                    {"name": "acts", "actions": [{"action": "eval"}]},
                    {"name": "rets", "returns": "x"},
                    {"name": "hollow", "actions": []}
                ]}]}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::MacroNoOp);
            assert_eq!(diag.severity, Severity::Info);
        }
    }

    #[tokio::test]
    async fn no_rules_files_is_silent() {
        let diags = run_rule(&DuplicateConstantRule, "{}", &[]).await;
        assert!(diags.is_empty());
    }
}
