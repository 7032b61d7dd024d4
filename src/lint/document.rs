//! Parsed source documents.
//!
//! A [`Document`] pairs the raw text of one template file with its parsed
//! JSONC tree (absent when the file does not parse) and a line-start table
//! for offset/position conversions. Documents are immutable for the duration
//! of a lint run.

use std::path::{Path, PathBuf};

use super::diagnostic::{node_range, Span};
use crate::json::{self, JsonTree, NodeId};

/// One loaded template source file.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    text: String,
    tree: Option<JsonTree>,
    line_starts: Vec<usize>,
}

impl Document {
    /// Parse `text` into a document. A document that fails to parse still
    /// carries its text; it just has no tree.
    pub fn parse(path: &Path, text: String) -> Self {
        let tree = match json::parse(&text) {
            Ok(tree) => Some(tree),
            Err(err) => {
                tracing::debug!("failed to parse {}: {}", path.display(), err);
                None
            }
        };
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter_map(|(i, b)| (b == b'\n').then_some(i + 1)),
            )
            .collect();
        Self {
            path: path.to_path_buf(),
            text,
            tree,
            line_starts,
        }
    }

    /// File path this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed tree, absent for syntactically broken documents.
    pub fn tree(&self) -> Option<&JsonTree> {
        self.tree.as_ref()
    }

    /// 1-indexed line and column of a byte offset.
    pub fn position_at(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line] + 1;
        (line + 1, col)
    }

    /// Byte offset of a 1-indexed line and column; clamped to the text end.
    pub fn offset_at(&self, line: usize, col: usize) -> usize {
        let start = self
            .line_starts
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(self.text.len());
        (start + col.saturating_sub(1)).min(self.text.len())
    }

    /// Span of a byte range in this document.
    pub fn span_of_range(&self, start: usize, end: usize) -> Span {
        let (start_line, start_col) = self.position_at(start);
        let (end_line, end_col) = self.position_at(end);
        Span {
            file: self.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
            start_offset: start,
            end_offset: end,
        }
    }

    /// Span of a tree node, with string quotes excluded.
    pub fn span_of(&self, node: NodeId) -> Span {
        let (start, end) = node_range(self, node);
        self.span_of_range(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse(Path::new("variables.json"), text.to_string())
    }

    #[test]
    fn positions_are_one_indexed() {
        let d = doc("{\n  \"a\": 1\n}");
        assert_eq!(d.position_at(0), (1, 1));
        assert_eq!(d.position_at(2), (2, 1));
        assert_eq!(d.position_at(4), (2, 3));
    }

    #[test]
    fn offset_and_position_round_trip() {
        let d = doc("{\n  \"key\": \"value\"\n}");
        for offset in [0, 3, 10, d.text().len() - 1] {
            let (line, col) = d.position_at(offset);
            assert_eq!(d.offset_at(line, col), offset);
        }
    }

    #[test]
    fn broken_document_has_no_tree() {
        let d = doc("{ not json");
        assert!(d.tree().is_none());
        assert_eq!(d.text(), "{ not json");
    }

    #[test]
    fn span_covers_node() {
        let d = doc(r#"{"a": "xyz"}"#);
        let tree = d.tree().unwrap();
        let value = tree.object_get(tree.root(), "a").unwrap();
        let span = d.span_of(value);
        assert_eq!(span.start_line, 1);
        assert_eq!(&d.text()[span.start_offset..span.end_offset], "xyz");
    }
}
