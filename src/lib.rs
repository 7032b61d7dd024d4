//! Wavelint - linter for CRM analytics app-template bundles.
//!
//! A template bundle is a directory holding one `template-info.json`
//! manifest plus the satellite files it references by relative path
//! (variables, UI pages, rules, folder, auto-install, and layout
//! definitions). Wavelint parses all of them, cross-checks consistency, and
//! reports findings as located diagnostics with stable codes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`json`] - JSONC parsing and tree queries
//! - [`lint`] - The linting engine: rules, diagnostics, orchestration
//! - [`util`] - Path, identifier, and fuzzy-matching helpers
//!
//! # Example
//!
//! ```
//! use wavelint::json::{parse, query, Segment};
//!
//! let tree = parse(r#"{"dashboards": [{"file": "d.json"}]}"#).unwrap();
//! let files = query::find_all(
//!     &tree,
//!     tree.root(),
//!     &[Segment::Key("dashboards"), Segment::Any, Segment::Key("file")],
//! );
//! assert_eq!(files.len(), 1);
//! ```
//!
//! For full lint passes over a directory, see [`lint::TemplateLinter`].

pub mod cli;
pub mod error;
pub mod json;
pub mod lint;
pub mod util;

pub use error::{Result, WavelintError};
