//! Built-in lint rules.
//!
//! This module contains all the built-in validation rules, one file per
//! concern, grouped by the source file each rule inspects.

pub mod auto_install;
pub mod dataset_names;
pub mod deprecated_fields;
pub mod folder;
pub mod layout;
pub mod name_matches_folder;
pub mod path_fields;
pub mod rules_file;
pub mod template_objects;
pub mod ui;
pub mod variables;

pub use auto_install::AutoInstallVariableRefRule;
pub use dataset_names::DuplicateDatasetNameRule;
pub use deprecated_fields::DeprecatedFieldsRule;
pub use folder::DuplicateShareRule;
pub use layout::LayoutVariableRefRule;
pub use name_matches_folder::NameMatchesFolderRule;
pub use path_fields::{CsvSizeRule, DuplicatePathUsageRule, PathFieldRule};
pub use rules_file::{
    DuplicateConstantRule, DuplicateMacroRule, DuplicateRuleNameRule, NoOpMacroRule,
};
pub use template_objects::TemplateObjectsRule;
pub use ui::{EmbeddedAppPageRule, UiVariableRefRule};
pub use variables::{ExcludesRegexRule, VariableNameRule};

use std::collections::BTreeMap;

use crate::json::{query, NodeId};
use crate::lint::codes::DiagnosticCode;
use crate::lint::diagnostic::{Diagnostic, RelatedInfo, Severity, Span};
use crate::lint::document::Document;
use crate::util::fuzzy_nearest;

/// One value occurrence inside a loaded document, for grouping duplicates.
pub(crate) struct Occurrence {
    pub span: Span,
    pub json_path: Option<String>,
}

/// Record where a node sits, for duplicate grouping.
pub(crate) fn occurrence(doc: &Document, node: NodeId) -> Occurrence {
    let json_path = doc.tree().and_then(|tree| {
        let path = query::path_of(tree, node);
        (!path.is_empty()).then(|| query::path_to_display_string(&path))
    });
    Occurrence {
        span: doc.span_of(node),
        json_path,
    }
}

/// Expand groups of 2+ occurrences into per-member diagnostics, each with
/// related information pointing at the sibling occurrences sorted by
/// position.
pub(crate) fn duplicate_diagnostics(
    groups: BTreeMap<String, Vec<Occurrence>>,
    code: DiagnosticCode,
    severity: Severity,
    message: impl Fn(&str) -> String,
    related_message: impl Fn(&str) -> String,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (key, members) in groups {
        if members.len() < 2 {
            continue;
        }
        for (index, member) in members.iter().enumerate() {
            let related: Vec<RelatedInfo> = members
                .iter()
                .enumerate()
                .filter(|(other_index, _)| *other_index != index)
                .map(|(_, other)| RelatedInfo {
                    span: other.span.clone(),
                    message: related_message(&key),
                })
                .collect();
            let mut diagnostic =
                Diagnostic::new(code, severity, message(&key), member.span.clone())
                    .with_related_sorted(related);
            diagnostic.json_path = member.json_path.clone();
            diagnostics.push(diagnostic);
        }
    }
    diagnostics
}

/// Diagnostic for a reference to a variable that is not declared, with a
/// "did you mean" suggestion in the structured args when a near match
/// exists.
pub(crate) fn unknown_variable_diagnostic(
    doc: &Document,
    node: NodeId,
    name: &str,
    declared: &BTreeMap<String, String>,
) -> Diagnostic {
    let candidates: Vec<&str> = declared.keys().map(String::as_str).collect();
    let suggestion = fuzzy_nearest(&candidates, name, 1).first().copied();

    let message = match suggestion {
        Some(best) => format!("Unknown variable '{name}'. Did you mean '{best}'?"),
        None => format!("Unknown variable '{name}'"),
    };
    let mut diagnostic = Diagnostic::at_node(
        doc,
        node,
        DiagnosticCode::UnknownVariable,
        Severity::Warning,
        message,
    )
    .with_arg("name", name);
    if let Some(best) = suggestion {
        diagnostic = diagnostic.with_arg("match", best);
    }
    diagnostic
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared scaffolding for rule tests.

    use std::path::Path;
    use std::sync::Arc;

    use crate::lint::cache::DocumentCache;
    use crate::lint::context::RuleContext;
    use crate::lint::diagnostic::Diagnostic;
    use crate::lint::document::Document;
    use crate::lint::rule::LintRule;
    use crate::lint::workspace::MemoryWorkspace;

    /// Run one rule against a manifest plus satellite files rooted at
    /// `/tpl`.
    pub async fn run_rule(
        rule: &dyn LintRule,
        manifest: &str,
        files: &[(&str, &str)],
    ) -> Vec<Diagnostic> {
        let ws = Arc::new(MemoryWorkspace::new());
        for (path, text) in files {
            ws.insert(format!("/tpl/{path}"), *text);
        }
        let doc = Document::parse(Path::new("/tpl/template-info.json"), manifest.to_string());
        let tree = doc.tree().expect("test manifest must parse");
        let cache = DocumentCache::new(ws.clone());
        let ctx = RuleContext {
            root: Path::new("/tpl"),
            manifest: &doc,
            tree,
            cache: &cache,
            workspace: ws.as_ref(),
        };
        rule.check(&ctx).await.expect("rule must not fail")
    }
}
