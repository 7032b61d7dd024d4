//! Rules over the UI pages satellite.
//!
//! Pages reference variables declared in the variables satellite; the
//! references must resolve, and some variable types can only be rendered by
//! Visualforce-backed pages. Embedded-app templates are further restricted
//! to Visualforce pages outright.

use async_trait::async_trait;

use super::unknown_variable_diagnostic;
use crate::error::Result;
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, Severity};
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Variable types only a Visualforce page can collect.
const VFPAGE_ONLY_TYPES: &[&str] = &["DateTimeType", "ObjectType", "DatasetAnyFieldType"];

/// Resolves page variable references against the variables satellite.
pub struct UiVariableRefRule;

#[async_trait]
impl LintRule for UiVariableRefRule {
    fn name(&self) -> &'static str {
        "ui-variable-refs"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Ui
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(declared) = ctx.variable_types().await else {
            return Ok(vec![]);
        };
        let Some(doc) = ctx.satellite("uiDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        let pages = tree.object_get(tree.root(), "pages");
        for page in pages.map(|p| tree.elements(p)).unwrap_or_default() {
            let is_vf_page = tree.object_get(*page, "vfPage").is_some();
            let Some(variables) = tree.object_get(*page, "variables") else {
                continue;
            };
            for var in tree.elements(variables) {
                let Some(name_node) = tree.object_get(*var, "name") else {
                    continue;
                };
                let Some(name) = tree.string_value(name_node) else {
                    continue;
                };
                match declared.get(name) {
                    None => {
                        diagnostics.push(unknown_variable_diagnostic(
                            &doc, name_node, name, &declared,
                        ));
                    }
                    Some(declared_type)
                        if !is_vf_page && VFPAGE_ONLY_TYPES.contains(&declared_type.as_str()) =>
                    {
                        diagnostics.push(
                            Diagnostic::at_node(
                                &doc,
                                name_node,
                                DiagnosticCode::UnsupportedVariableType,
                                Severity::Error,
                                format!(
                                    "Variable '{name}' has type {declared_type}, which is only \
                                     supported on Visualforce pages"
                                ),
                            )
                            .with_arg("name", name)
                            .with_arg("type", declared_type),
                        );
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(diagnostics)
    }
}

/// Embedded-app templates may only declare Visualforce-backed pages.
pub struct EmbeddedAppPageRule;

#[async_trait]
impl LintRule for EmbeddedAppPageRule {
    fn name(&self) -> &'static str {
        "embedded-app-pages"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Ui
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let is_embedded = ctx
            .manifest_string("templateType")
            .is_some_and(|(_, t)| t.eq_ignore_ascii_case("embeddedapp"));
        if !is_embedded {
            return Ok(vec![]);
        }
        let Some(doc) = ctx.satellite("uiDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        let pages = tree.object_get(tree.root(), "pages");
        for page in pages.map(|p| tree.elements(p)).unwrap_or_default() {
            if tree.object_get(*page, "vfPage").is_some() {
                continue;
            }
            let title = tree
                .object_get(*page, "title")
                .and_then(|t| tree.string_value(t))
                .unwrap_or("(untitled)");
            diagnostics.push(Diagnostic::at_node(
                &doc,
                *page,
                DiagnosticCode::EmbeddedAppPageContent,
                Severity::Warning,
                format!(
                    "Embedded app templates only support Visualforce pages; page '{title}' has \
                     no vfPage"
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

    const MANIFEST: &str =
        r#"{"variableDefinition": "variables.json", "uiDefinition": "ui.json"}"#;

    #[tokio::test]
    async fn unknown_reference_gets_a_suggestion() {
        let diags = run_rule(
            &UiVariableRefRule,
            MANIFEST,
            &[
                ("variables.json", r#"{"foo": {}}"#),
                (
                    "ui.json",
                    r#"{"pages": [{"title": "P1", "variables": [{"name": "fooo"}]}]}"#,
                ),
            ],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnknownVariable);
        assert_eq!(diags[0].args.get("match").map(String::as_str), Some("foo"));
        assert_eq!(diags[0].args.get("name").map(String::as_str), Some("fooo"));
    }

    #[tokio::test]
    async fn known_reference_passes() {
        let diags = run_rule(
            &UiVariableRefRule,
            MANIFEST,
            &[
                ("variables.json", r#"{"foo": {}}"#),
                (
                    "ui.json",
                    r#"{"pages": [{"variables": [{"name": "foo"}]}]}"#,
                ),
            ],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn vfpage_only_type_rejected_on_plain_page() {
        let diags = run_rule(
            &UiVariableRefRule,
            MANIFEST,
            &[
                (
                    "variables.json",
                    r#"{"when": {"variableType": {"type": "DateTimeType"}}}"#,
                ),
                (
                    "ui.json",
                    r#"{"pages": [{"variables": [{"name": "when"}]}]}"#,
                ),
            ],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnsupportedVariableType);
    }

    #[tokio::test]
    async fn vfpage_only_type_allowed_on_vf_page() {
        let diags = run_rule(
            &UiVariableRefRule,
            MANIFEST,
            &[
                (
                    "variables.json",
                    r#"{"when": {"variableType": {"type": "DateTimeType"}}}"#,
                ),
                (
                    "ui.json",
                    r#"{"pages": [{"vfPage": {"name": "Pick", "namespace": "acme"}, "variables": [{"name": "when"}]}]}"#,
                ),
            ],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn missing_variables_file_checks_nothing() {
        let diags = run_rule(
            &UiVariableRefRule,
            MANIFEST,
            &[(
                "ui.json",
                r#"{"pages": [{"variables": [{"name": "anything"}]}]}"#,
            )],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn embedded_app_rejects_plain_pages() {
        let manifest = r#"{"templateType": "embeddedapp", "uiDefinition": "ui.json"}"#;
        let diags = run_rule(
            &EmbeddedAppPageRule,
            manifest,
            &[(
                "ui.json",
                r#"{"pages": [{"title": "Setup"}, {"title": "Pick", "vfPage": {"name": "P"}}]}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::EmbeddedAppPageContent);
        assert!(diags[0].message.contains("Setup"));
    }

    #[tokio::test]
    async fn app_templates_allow_plain_pages() {
        let manifest = r#"{"templateType": "app", "uiDefinition": "ui.json"}"#;
        let diags = run_rule(
            &EmbeddedAppPageRule,
            manifest,
            &[("ui.json", r#"{"pages": [{"title": "Setup"}]}"#)],
        )
        .await;
        assert!(diags.is_empty());
    }
}
