//! Rules over the variables definition satellite.
//!
//! Variable names feed code generation downstream, so they must be
//! identifiers. Exclude lists may embed `/pattern/flags` pseudo-regexes that
//! the runtime compiles later; broken ones are caught here instead.

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::json::{JsonTree, NodeId};
use crate::lint::codes::DiagnosticCode;
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::{Diagnostic, RelatedInfo, Severity};
use crate::lint::document::Document;
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;
use crate::util::is_valid_identifier;

/// Flag characters the runtime accepts on a pseudo-regex.
const ALLOWED_FLAGS: &str = "gimsuy";

/// Variable keys must be valid identifiers.
pub struct VariableNameRule;

#[async_trait]
impl LintRule for VariableNameRule {
    fn name(&self) -> &'static str {
        "variable-names"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Variables
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(doc) = ctx.satellite("variableDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        for &prop in tree.properties(tree.root()) {
            let Some(name) = tree.property_key(prop) else {
                continue;
            };
            if !is_valid_identifier(name) {
                let key = tree.property_key_node(prop).unwrap_or(prop);
                diagnostics.push(
                    Diagnostic::at_node(
                        &doc,
                        key,
                        DiagnosticCode::InvalidVariableName,
                        Severity::Error,
                        format!(
                            "'{name}' is not a valid variable name; use a letter or underscore \
                             followed by letters, digits, or underscores"
                        ),
                    )
                    .with_arg("name", name),
                );
            }
        }
        Ok(diagnostics)
    }
}

/// Validates `/pattern/flags` pseudo-regex entries in variable exclude
/// lists.
pub struct ExcludesRegexRule;

#[async_trait]
impl LintRule for ExcludesRegexRule {
    fn name(&self) -> &'static str {
        "excludes-regex"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Variables
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(doc) = ctx.satellite("variableDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        for &prop in tree.properties(tree.root()) {
            let Some(excludes) = tree
                .property_value(prop)
                .and_then(|value| tree.object_get(value, "excludes"))
            else {
                continue;
            };
            check_excludes_list(&doc, tree, excludes, &mut diagnostics);
        }
        Ok(diagnostics)
    }
}

fn check_excludes_list(
    doc: &Document,
    tree: &JsonTree,
    excludes: NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut regex_entries: Vec<NodeId> = Vec::new();

    for entry in tree.elements(excludes) {
        let Some(value) = tree.string_value(*entry) else {
            continue;
        };
        if !value.starts_with('/') {
            // Plain literal exclude, nothing to compile.
            continue;
        }
        regex_entries.push(*entry);
        if let Some(diag) = check_pseudo_regex(doc, *entry, value) {
            diagnostics.push(diag);
        }
    }

    if regex_entries.len() > 1 {
        let related: Vec<RelatedInfo> = regex_entries
            .iter()
            .map(|entry| RelatedInfo {
                span: doc.span_of(*entry),
                message: "regex exclude defined here".to_string(),
            })
            .collect();
        diagnostics.push(
            Diagnostic::at_node(
                doc,
                excludes,
                DiagnosticCode::MultipleRegexExcludes,
                Severity::Warning,
                format!(
                    "{} regex excludes found; only the first will be applied at runtime",
                    regex_entries.len()
                ),
            )
            .with_related_sorted(related),
        );
    }
}

fn check_pseudo_regex(doc: &Document, node: NodeId, value: &str) -> Option<Diagnostic> {
    let close = value.rfind('/').unwrap_or(0);
    if close == 0 {
        return Some(Diagnostic::at_node(
            doc,
            node,
            DiagnosticCode::RegexMissingClosingSlash,
            Severity::Error,
            "Regex exclude is missing its closing '/'",
        ));
    }

    let pattern = &value[1..close];
    let flags = &value[close + 1..];

    let mut seen = Vec::new();
    for flag in flags.chars() {
        if !ALLOWED_FLAGS.contains(flag) {
            return Some(
                Diagnostic::at_node(
                    doc,
                    node,
                    DiagnosticCode::RegexInvalidFlags,
                    Severity::Error,
                    format!("Unknown regex flag '{flag}'; allowed flags are '{ALLOWED_FLAGS}'"),
                )
                .with_arg("flags", flags),
            );
        }
        if seen.contains(&flag) {
            return Some(
                Diagnostic::at_node(
                    doc,
                    node,
                    DiagnosticCode::RegexInvalidFlags,
                    Severity::Error,
                    format!("Regex flag '{flag}' is repeated"),
                )
                .with_arg("flags", flags),
            );
        }
        seen.push(flag);
    }

    if let Err(err) = compile_pattern(pattern, flags) {
        return Some(Diagnostic::at_node(
            doc,
            node,
            DiagnosticCode::RegexCompileError,
            Severity::Error,
            compile_error_message(&err),
        ));
    }
    None
}

/// Compile the pattern the way the runtime will, mapping the flags the
/// engine understands onto inline modifiers. `g`, `u`, and `y` only affect
/// match iteration, not syntax.
fn compile_pattern(pattern: &str, flags: &str) -> std::result::Result<Regex, regex::Error> {
    let inline: String = flags.chars().filter(|c| "ims".contains(*c)).collect();
    if inline.is_empty() {
        Regex::new(pattern)
    } else {
        Regex::new(&format!("(?{inline}){pattern}"))
    }
}

/// The engine's error text, flattened, without doubling up an "invalid
/// regular expression" prefix the engine may already supply.
fn compile_error_message(err: &regex::Error) -> String {
    let engine: String = err
        .to_string()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if engine.to_ascii_lowercase().starts_with("invalid regular expression") {
        engine
    } else {
        format!("Invalid regular expression: {engine}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::testing::run_rule;

    const MANIFEST: &str = r#"{"variableDefinition": "variables.json"}"#;

    async fn lint_variables(variables: &str) -> Vec<Diagnostic> {
        run_rule(
            &ExcludesRegexRule,
            MANIFEST,
            &[("variables.json", variables)],
        )
        .await
    }

    #[tokio::test]
    async fn bare_slash_is_missing_closing() {
        let diags = lint_variables(r#"{"v": {"excludes": ["/"]}}"#).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::RegexMissingClosingSlash);
    }

    #[tokio::test]
    async fn unbalanced_bracket_is_one_compile_error() {
        let diags = lint_variables(r#"{"v": {"excludes": ["/[/"]}}"#).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::RegexCompileError);
    }

    #[tokio::test]
    async fn valid_regex_passes() {
        let diags = lint_variables(r#"{"v": {"excludes": ["/^Acme_.*$/i"]}}"#).await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn literal_entries_are_not_regexes() {
        let diags = lint_variables(r#"{"v": {"excludes": ["Acme", "Other ("]}}"#).await;
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn unknown_flag_is_flagged() {
        let diags = lint_variables(r#"{"v": {"excludes": ["/x/q"]}}"#).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::RegexInvalidFlags);
    }

    #[tokio::test]
    async fn repeated_flag_is_flagged() {
        let diags = lint_variables(r#"{"v": {"excludes": ["/x/ii"]}}"#).await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::RegexInvalidFlags);
    }

    #[tokio::test]
    async fn two_regex_entries_warn_once_with_related() {
        let diags = lint_variables(
            r#"{"v": {"excludes": ["/a/", "literal", "/b/"]}}"#,
        )
        .await;
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::MultipleRegexExcludes);
        assert_eq!(diags[0].related.len(), 2);
        // Related entries are sorted by position.
        assert!(
            diags[0].related[0].span.start_offset < diags[0].related[1].span.start_offset
        );
    }

    #[tokio::test]
    async fn invalid_names_are_reported() {
        let diags = run_rule(
            &VariableNameRule,
            MANIFEST,
            &[(
                "variables.json",
                r#"{"good_1": {}, "1bad": {}, "has space": {}}"#,
            )],
        )
        .await;
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, DiagnosticCode::InvalidVariableName);
        }
    }

    #[tokio::test]
    async fn missing_variables_file_yields_nothing() {
        let diags = run_rule(&ExcludesRegexRule, MANIFEST, &[]).await;
        assert!(diags.is_empty());
    }
}
