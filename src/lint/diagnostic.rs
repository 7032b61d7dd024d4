//! Lint diagnostic messages.
//!
//! A [`Diagnostic`] is one finding: an owning file, a source span, a
//! severity, a stable [`DiagnosticCode`], and optionally a JSON path for
//! quick-fix targeting, structured string arguments, and related locations.
//! Even a cross-file finding has exactly one owning file; the other side
//! shows up in related information.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::codes::DiagnosticCode;
use super::document::Document;
use crate::json::{query, NodeId, NodeKind};

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Editor-grade nudge, not worth surfacing prominently.
    Hint,
    /// Informational finding.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that breaks the template.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A source range in a file, with both line/column and byte-offset forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// File path.
    pub file: PathBuf,
    /// Starting line (1-indexed).
    pub start_line: usize,
    /// Starting column (1-indexed).
    pub start_col: usize,
    /// Ending line (1-indexed).
    pub end_line: usize,
    /// Ending column (1-indexed).
    pub end_col: usize,
    /// Starting byte offset.
    pub start_offset: usize,
    /// Ending byte offset (exclusive).
    pub end_offset: usize,
}

/// Additional information related to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    /// Location of the related information.
    pub span: Span,
    /// Message explaining the relationship.
    pub message: String,
}

/// A diagnostic produced by a lint rule.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Stable code identifying the violated rule.
    pub code: DiagnosticCode,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Source location in the owning file.
    pub span: Span,
    /// Dotted JSON path of the offending node, for quick-fix targeting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    /// Structured arguments for quick-fix consumption.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
    /// Additional related locations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit span.
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            span,
            json_path: None,
            args: BTreeMap::new(),
            related: Vec::new(),
        }
    }

    /// Create a diagnostic anchored at a tree node of `doc`.
    ///
    /// The span sheds the quote characters of string nodes; the JSON path is
    /// derived from the node's position in the tree (property nodes classify
    /// by their key).
    pub fn at_node(
        doc: &Document,
        node: NodeId,
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        let mut diagnostic = Self::new(code, severity, message, doc.span_of(node));
        if let Some(tree) = doc.tree() {
            let path = query::path_of(tree, node);
            if !path.is_empty() {
                diagnostic.json_path = Some(query::path_to_display_string(&path));
            }
        }
        diagnostic
    }

    /// Add a structured argument.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related.push(RelatedInfo {
            span,
            message: message.into(),
        });
        self
    }

    /// Add related information for several sites at once, sorted by source
    /// position for deterministic output.
    pub fn with_related_sorted(mut self, mut sites: Vec<RelatedInfo>) -> Self {
        sites.sort_by(|a, b| {
            (&a.span.file, a.span.start_offset).cmp(&(&b.span.file, b.span.start_offset))
        });
        self.related.extend(sites);
        self
    }
}

/// Byte range of a node with string quotes shaved off.
pub(crate) fn node_range(doc: &Document, node: NodeId) -> (usize, usize) {
    let Some(tree) = doc.tree() else {
        return (0, 0);
    };
    let n = tree.node(node);
    match n.kind {
        NodeKind::String { .. } if n.len >= 2 => (n.offset + 1, n.end() - 1),
        _ => (n.offset, n.end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn doc(text: &str) -> Document {
        Document::parse(Path::new("/tpl/template-info.json"), text.to_string())
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Hint < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn string_nodes_shed_quotes() {
        let d = doc(r#"{"name": "Sales"}"#);
        let tree = d.tree().unwrap();
        let value = tree.object_get(tree.root(), "name").unwrap();
        let diag = Diagnostic::at_node(
            &d,
            value,
            DiagnosticCode::NameFolderMismatch,
            Severity::Warning,
            "mismatch",
        );
        assert_eq!(
            &d.text()[diag.span.start_offset..diag.span.end_offset],
            "Sales"
        );
    }

    #[test]
    fn non_string_nodes_keep_raw_span() {
        let d = doc(r#"{"count": 42}"#);
        let tree = d.tree().unwrap();
        let value = tree.object_get(tree.root(), "count").unwrap();
        let diag = Diagnostic::at_node(
            &d,
            value,
            DiagnosticCode::TemplateMissingObjects,
            Severity::Error,
            "bad",
        );
        assert_eq!(
            &d.text()[diag.span.start_offset..diag.span.end_offset],
            "42"
        );
    }

    #[test]
    fn json_path_points_at_field() {
        let d = doc(r#"{"rules": [{"name": "r"}]}"#);
        let tree = d.tree().unwrap();
        let rules = tree.object_get(tree.root(), "rules").unwrap();
        let first = tree.elements(rules)[0];
        let prop = tree.object_property(first, "name").unwrap();
        let diag = Diagnostic::at_node(
            &d,
            prop,
            DiagnosticCode::DuplicateRuleName,
            Severity::Hint,
            "dup",
        );
        assert_eq!(diag.json_path.as_deref(), Some("rules[0].name"));
    }

    #[test]
    fn related_info_is_sorted_by_position() {
        let d = doc(r#"{"a": 1, "b": 2}"#);
        let tree = d.tree().unwrap();
        let a = tree.object_get(tree.root(), "a").unwrap();
        let b = tree.object_get(tree.root(), "b").unwrap();
        let diag = Diagnostic::at_node(
            &d,
            a,
            DiagnosticCode::DuplicateConstant,
            Severity::Warning,
            "dup",
        )
        .with_related_sorted(vec![
            RelatedInfo {
                span: d.span_of(b),
                message: "second".into(),
            },
            RelatedInfo {
                span: d.span_of(a),
                message: "first".into(),
            },
        ]);
        assert_eq!(diag.related[0].message, "first");
        assert_eq!(diag.related[1].message, "second");
    }

    #[test]
    fn args_round_trip() {
        let d = doc("{}");
        let tree = d.tree().unwrap();
        let diag = Diagnostic::at_node(
            &d,
            tree.root(),
            DiagnosticCode::UnknownVariable,
            Severity::Warning,
            "unknown",
        )
        .with_arg("name", "fooo")
        .with_arg("match", "foo");
        assert_eq!(diag.args.get("match").map(String::as_str), Some("foo"));
    }
}
