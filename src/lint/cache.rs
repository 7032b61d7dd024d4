//! Per-run document cache.
//!
//! One lint run loads each satellite file at most once, no matter how many
//! rules ask for it. The cache is owned by a single run and thrown away with
//! it; there is no reuse across runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::document::Document;
use super::workspace::Workspace;

/// Cache of loaded satellite documents, scoped to one lint run.
///
/// Keys are resolved paths. Failed loads (missing, unreadable, unparsable)
/// are memoized as absent so repeated lookups stay cheap. Callers must gate
/// relative paths through [`crate::util::is_valid_relative_path`] before
/// asking the cache.
pub struct DocumentCache {
    workspace: Arc<dyn Workspace>,
    docs: Mutex<HashMap<PathBuf, Option<Arc<Document>>>>,
}

impl DocumentCache {
    /// Create an empty cache over the given workspace.
    pub fn new(workspace: Arc<dyn Workspace>) -> Self {
        Self {
            workspace,
            docs: Mutex::new(HashMap::new()),
        }
    }

    /// Load a document by template-relative path, deduplicating repeated
    /// loads within the run.
    ///
    /// The lock is held across the read so two rules racing on the same path
    /// still cost exactly one underlying read.
    pub async fn load(&self, base_dir: &Path, rel_path: &str) -> Option<Arc<Document>> {
        let path = base_dir.join(rel_path.trim());
        let mut docs = self.docs.lock().await;
        if let Some(cached) = docs.get(&path) {
            return cached.clone();
        }
        let loaded = match self.workspace.read_to_string(&path).await {
            Ok(text) => {
                let doc = Document::parse(&path, text);
                if doc.tree().is_some() {
                    Some(Arc::new(doc))
                } else {
                    None
                }
            }
            Err(err) => {
                tracing::debug!("could not load {}: {}", path.display(), err);
                None
            }
        };
        docs.insert(path, loaded.clone());
        loaded
    }
}
