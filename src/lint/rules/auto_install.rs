//! Rules over the auto-install configuration satellite.
//!
//! Auto-install answers the setup wizard ahead of time: the keys under
//! `configuration.appConfiguration.values` are variable names and must
//! resolve against the variables satellite.

use async_trait::async_trait;

use super::unknown_variable_diagnostic;
use crate::error::Result;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::Diagnostic;
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Resolves auto-install value keys against the declared variables.
pub struct AutoInstallVariableRefRule;

#[async_trait]
impl LintRule for AutoInstallVariableRefRule {
    fn name(&self) -> &'static str {
        "auto-install-variable-refs"
    }

    fn source(&self) -> SourceKind {
        SourceKind::AutoInstall
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(declared) = ctx.variable_types().await else {
            return Ok(vec![]);
        };
        let Some(doc) = ctx.satellite("autoInstallDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let Some(values) = tree
            .object_get(tree.root(), "configuration")
            .and_then(|c| tree.object_get(c, "appConfiguration"))
            .and_then(|a| tree.object_get(a, "values"))
        else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        for &prop in tree.properties(values) {
            let Some(name) = tree.property_key(prop) else {
                continue;
            };
            if !declared.contains_key(name) {
                let key = tree.property_key_node(prop).unwrap_or(prop);
                diagnostics.push(unknown_variable_diagnostic(&doc, key, name, &declared));
            }
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::codes::DiagnosticCode;
    use crate::lint::rules::testing::run_rule;

    const MANIFEST: &str = r#"{
        "variableDefinition": "variables.json",
        "autoInstallDefinition": "auto-install.json"
    }"#;

    #[tokio::test]
    async fn unknown_value_key_is_flagged() {
        let diags = run_rule(
            &AutoInstallVariableRefRule,
            MANIFEST,
            &[
                ("variables.json", r#"{"region": {}}"#),
                (
                    "auto-install.json",
                    r#"{"configuration": {"appConfiguration": {"values": {"regionn": "emea"}}}}"#,
                ),
            ],
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnknownVariable);
        assert_eq!(
            diags[0].args.get("match").map(String::as_str),
            Some("region")
        );
    }

    #[tokio::test]
    async fn declared_value_keys_pass() {
        let diags = run_rule(
            &AutoInstallVariableRefRule,
            MANIFEST,
            &[
                ("variables.json", r#"{"region": {}}"#),
                (
                    "auto-install.json",
                    r#"{"configuration": {"appConfiguration": {"values": {"region": "emea"}}}}"#,
                ),
            ],
        )
        .await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn missing_sections_are_silent() {
        let diags = run_rule(
            &AutoInstallVariableRefRule,
            MANIFEST,
            &[
                ("variables.json", r#"{"region": {}}"#),
                ("auto-install.json", r#"{"configuration": {}}"#),
            ],
        )
        .await;
        assert!(diags.is_empty());
    }
}
