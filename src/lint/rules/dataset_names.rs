//! Dataset name uniqueness across the manifest.
//!
//! `datasetFiles` and `externalFiles` both create datasets at install time,
//! so their names share one namespace.

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

const NAME_PATTERNS: &[&[Segment<'static>]] = &[
    &[
        Segment::Key("datasetFiles"),
        Segment::Any,
        Segment::Key("name"),
    ],
    &[
        Segment::Key("externalFiles"),
        Segment::Any,
        Segment::Key("name"),
    ],
];

/// Flags dataset-shaped entries that share a name.
pub struct DuplicateDatasetNameRule;

#[async_trait]
impl LintRule for DuplicateDatasetNameRule {
    fn name(&self) -> &'static str {
        "duplicate-dataset-name"
    }

    fn source(&self) -> SourceKind {
        SourceKind::TemplateInfo
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
        let tree = ctx.manifest_tree();
        let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();

        for pattern in NAME_PATTERNS {
            for node in query::find_all(tree, tree.root(), pattern) {
                if let Some(name) = tree.string_value(node) {
                    groups
                        .entry(name.to_string())
                        .or_default()
                        .push(occurrence(ctx.manifest, node));
                }
            }
        }

        Ok(duplicate_diagnostics(
            groups,
            DiagnosticCode::DuplicateDatasetName,
            Severity::Warning,
            |name| format!("Duplicate dataset name '{name}'"),
            |name| format!("'{name}' is also used here"),
        ))
    }
}
