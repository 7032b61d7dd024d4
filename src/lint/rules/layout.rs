//! Rules over the layout definition satellite.
//!
//! Layout pages place items in rows; items of type `Variable` reference
//! declarations in the variables satellite by name.

use async_trait::async_trait;

use super::unknown_variable_diagnostic;
use crate::error::Result;
use crate::json::{query, Segment};
use crate::lint::context::RuleContext;
use crate::lint::diagnostic::Diagnostic;
use crate::lint::fields::SourceKind;
use crate::lint::rule::LintRule;

/// Resolves layout `Variable` items against the declared variables.
pub struct LayoutVariableRefRule;

#[async_trait]
impl LintRule for LayoutVariableRefRule {
    fn name(&self) -> &'static str {
        "layout-variable-refs"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Layout
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let Some(declared) = ctx.variable_types().await else {
            return Ok(vec![]);
        };
        let Some(doc) = ctx.satellite("layoutDefinition").await else {
            return Ok(vec![]);
        };
        let Some(tree) = doc.tree() else {
            return Ok(vec![]);
        };

        let mut diagnostics = Vec::new();
        for item in query::find_all(
            tree,
            tree.root(),
            &[
                Segment::Key("pages"),
                Segment::Any,
                Segment::Key("layout"),
                Segment::Key("rows"),
                Segment::Any,
                Segment::Key("items"),
                Segment::Any,
            ],
        ) {
            let is_variable = tree
                .object_get(item, "type")
                .and_then(|t| tree.string_value(t))
                .is_some_and(|t| t == "Variable");
            if !is_variable {
                continue;
            }
            let Some(name_node) = tree.object_get(item, "name") else {
                continue;
            };
            let Some(name) = tree.string_value(name_node) else {
                continue;
            };
            if !declared.contains_key(name) {
                diagnostics.push(unknown_variable_diagnostic(&doc, name_node, name, &declared));
            }
        }
        Ok(diagnostics)
    }
}
