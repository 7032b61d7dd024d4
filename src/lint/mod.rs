//! Template validation and linting.
//!
//! This module is the linting engine: it parses a template bundle's
//! manifest and satellites, cross-checks them, and produces located
//! diagnostics with stable codes.
//!
//! # Overview
//!
//! - **Rules** - Individual validation checks ([`LintRule`] trait), grouped
//!   by the source file they inspect
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Diagnostics** - Findings with severity, stable code, and related
//!   locations ([`Diagnostic`])
//! - **Orchestration** - One full pass per call ([`TemplateLinter`]),
//!   satellites cached per run ([`DocumentCache`])
//!
//! # Example
//!
//! ```
//! use wavelint::lint::{RuleRegistry, Severity};
//!
//! let registry = RuleRegistry::with_builtins();
//! assert!(!registry.is_empty());
//!
//! // Severity has ordering
//! assert!(Severity::Hint < Severity::Warning);
//! assert!(Severity::Warning < Severity::Error);
//! ```

pub mod cache;
pub mod codes;
pub mod context;
pub mod diagnostic;
pub mod document;
pub mod fields;
pub mod fix;
pub mod linter;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod workspace;

pub use cache::DocumentCache;
pub use codes::DiagnosticCode;
pub use context::RuleContext;
pub use diagnostic::{Diagnostic, RelatedInfo, Severity, Span};
pub use document::Document;
pub use fields::{AssetKind, SourceKind, MANIFEST_FILE_NAME, MAX_CSV_SIZE};
pub use fix::{Fix, FixEngine, FixResult};
pub use linter::{LintResult, ManifestHook, TemplateLinter};
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter};
pub use registry::RuleRegistry;
pub use rule::LintRule;
pub use workspace::{FileStat, FsWorkspace, MemoryWorkspace, Workspace};
