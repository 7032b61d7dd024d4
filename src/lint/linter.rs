//! The lint orchestrator.
//!
//! One [`TemplateLinter::lint`] call is one full pass over a template
//! directory: parse the manifest, hand it to the optional pre-rule hook, run
//! the per-source rule groups concurrently against a fresh document cache,
//! and return the diagnostics grouped by owning document. Nothing carries
//! over between passes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cache::DocumentCache;
use super::context::RuleContext;
use super::diagnostic::{Diagnostic, Severity};
use super::document::Document;
use super::fields::{SourceKind, MANIFEST_FILE_NAME};
use super::registry::RuleRegistry;
use super::workspace::Workspace;

/// Callback invoked with the parsed manifest before any rule runs, so a
/// host can extract satellite metadata whether or not linting finds
/// problems.
pub type ManifestHook = Box<dyn Fn(&Document) + Send + Sync>;

/// Diagnostics of one lint pass, grouped by owning document and sorted by
/// source position within each document.
#[derive(Debug, Default)]
pub struct LintResult {
    /// Diagnostics per document path.
    pub diagnostics: BTreeMap<PathBuf, Vec<Diagnostic>>,
}

impl LintResult {
    /// Whether the pass found nothing at all.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.values().all(|d| d.is_empty())
    }

    /// Total number of diagnostics.
    pub fn total(&self) -> usize {
        self.diagnostics.values().map(Vec::len).sum()
    }

    /// Number of diagnostics at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity == severity).count()
    }

    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.iter().any(|d| d.severity == Severity::Error)
    }

    /// Iterate over every diagnostic in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.values().flatten()
    }
}

/// Drives lint passes over template directories.
pub struct TemplateLinter {
    workspace: Arc<dyn Workspace>,
    registry: RuleRegistry,
    manifest_hook: Option<ManifestHook>,
}

impl TemplateLinter {
    /// Create a linter with the built-in rule set.
    pub fn new(workspace: Arc<dyn Workspace>) -> Self {
        Self {
            workspace,
            registry: RuleRegistry::with_builtins(),
            manifest_hook: None,
        }
    }

    /// Replace the rule registry.
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Install a hook that sees the parsed manifest before any rule runs.
    pub fn with_manifest_hook(mut self, hook: ManifestHook) -> Self {
        self.manifest_hook = Some(hook);
        self
    }

    /// Run one full lint pass over the template directory.
    ///
    /// Every call is a complete pass with its own cache; there is no
    /// incremental reuse. A manifest that is missing or fails to parse
    /// yields an empty result (syntax errors are the host's concern). The
    /// caller owns debouncing: do not start a new pass for the same
    /// directory while one is in flight.
    pub async fn lint(&self, template_dir: &Path) -> LintResult {
        let manifest_path = template_dir.join(MANIFEST_FILE_NAME);
        let text = match self.workspace.read_to_string(&manifest_path).await {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("no manifest at {}: {}", manifest_path.display(), err);
                return LintResult::default();
            }
        };
        let manifest = Document::parse(&manifest_path, text);
        let Some(tree) = manifest.tree() else {
            tracing::debug!("manifest {} does not parse", manifest_path.display());
            return LintResult::default();
        };

        if let Some(hook) = &self.manifest_hook {
            hook(&manifest);
        }

        let cache = DocumentCache::new(self.workspace.clone());
        let ctx = RuleContext {
            root: template_dir,
            manifest: &manifest,
            tree,
            cache: &cache,
            workspace: self.workspace.as_ref(),
        };

        // Independent source groups run concurrently; rules inside a group
        // run in order and share the cache with everyone else.
        let [a, b, c, d, e, f, g] = SourceKind::ALL;
        let groups = tokio::join!(
            self.run_group(a, &ctx),
            self.run_group(b, &ctx),
            self.run_group(c, &ctx),
            self.run_group(d, &ctx),
            self.run_group(e, &ctx),
            self.run_group(f, &ctx),
            self.run_group(g, &ctx),
        );
        let all = [groups.0, groups.1, groups.2, groups.3, groups.4, groups.5, groups.6];

        let mut result = LintResult::default();
        for diagnostic in all.into_iter().flatten() {
            result
                .diagnostics
                .entry(diagnostic.span.file.clone())
                .or_default()
                .push(diagnostic);
        }
        for diagnostics in result.diagnostics.values_mut() {
            diagnostics.sort_by_key(|d| (d.span.start_offset, d.span.end_offset, d.code));
        }
        result
    }

    /// Run one source group, isolating each rule's failure.
    async fn run_group(&self, source: SourceKind, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for rule in self.registry.rules_for(source) {
            match rule.check(ctx).await {
                Ok(found) => diagnostics.extend(found),
                Err(err) => {
                    tracing::warn!(rule = rule.name(), "lint rule failed: {err}");
                }
            }
        }
        diagnostics
    }
}
