//! Shared state handed to every rule during one lint run.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::cache::DocumentCache;
use super::document::Document;
use super::workspace::Workspace;
use crate::json::{query, JsonTree, NodeId, Segment};
use crate::util::is_valid_relative_path;

/// Default variable type when a declaration does not name one.
pub const DEFAULT_VARIABLE_TYPE: &str = "StringType";

/// Everything a rule may look at: the template root, the parsed manifest,
/// the per-run document cache, and the host workspace for stats.
pub struct RuleContext<'run> {
    /// Template directory the manifest lives in.
    pub root: &'run Path,
    /// The parsed manifest document.
    pub manifest: &'run Document,
    /// The manifest tree. An unparsable manifest never reaches the rules.
    pub tree: &'run JsonTree,
    /// Per-run satellite cache shared by all rule groups.
    pub cache: &'run DocumentCache,
    /// Host file access, for existence and size checks.
    pub workspace: &'run dyn Workspace,
}

impl<'run> RuleContext<'run> {
    /// The manifest tree.
    pub fn manifest_tree(&self) -> &'run JsonTree {
        self.tree
    }

    /// The string value of a top-level manifest field, with its value node.
    pub fn manifest_string(&self, key: &str) -> Option<(NodeId, &'run str)> {
        let tree = self.manifest_tree();
        let value = tree.object_get(tree.root(), key)?;
        tree.string_value(value).map(|s| (value, s))
    }

    /// Load the satellite referenced by a top-level manifest field, if the
    /// field holds a valid relative path.
    pub async fn satellite(&self, key: &str) -> Option<Arc<Document>> {
        let (_, rel) = self.manifest_string(key)?;
        if !is_valid_relative_path(rel) {
            return None;
        }
        self.cache.load(self.root, rel).await
    }

    /// All rules files referenced by the manifest: the legacy
    /// `ruleDefinition` plus every `rules[*].file` entry.
    pub async fn rules_documents(&self) -> Vec<Arc<Document>> {
        let tree = self.manifest_tree();
        let mut rels: Vec<&str> = Vec::new();
        if let Some((_, rel)) = self.manifest_string("ruleDefinition") {
            rels.push(rel);
        }
        for node in query::find_all(
            tree,
            tree.root(),
            &[Segment::Key("rules"), Segment::Any, Segment::Key("file")],
        ) {
            if let Some(rel) = tree.string_value(node) {
                rels.push(rel);
            }
        }

        let mut docs = Vec::new();
        for rel in rels {
            if !is_valid_relative_path(rel) {
                continue;
            }
            if let Some(doc) = self.cache.load(self.root, rel).await {
                docs.push(doc);
            }
        }
        docs
    }

    /// The declared variables of this template: name to declared type.
    ///
    /// Returns `None` when there is no usable variables satellite, which
    /// callers must treat as "nothing to check against", not as an error.
    pub async fn variable_types(&self) -> Option<BTreeMap<String, String>> {
        let doc = self.satellite("variableDefinition").await?;
        let tree = doc.tree()?;
        let mut types = BTreeMap::new();
        for &prop in tree.properties(tree.root()) {
            let Some(name) = tree.property_key(prop) else {
                continue;
            };
            let declared = tree
                .property_value(prop)
                .and_then(|value| tree.object_get(value, "variableType"))
                .and_then(|vt| tree.object_get(vt, "type"))
                .and_then(|t| tree.string_value(t))
                .unwrap_or(DEFAULT_VARIABLE_TYPE);
            types.insert(name.to_string(), declared.to_string());
        }
        Some(types)
    }
}
