//! JSONC parsing and tree queries.
//!
//! Template bundles are authored in JSON-with-comments, and every diagnostic
//! needs a byte-accurate source location, so parsing goes through a small
//! lexer/parser pair of our own rather than a serde round-trip:
//!
//! - [`tree`] - arena-backed syntax tree with offsets and parent links
//! - [`lexer`] - JSONC tokenizer
//! - [`parser`] - recursive-descent parser ([`parse`])
//! - [`query`] - path-pattern matching over parsed trees

mod lexer;
mod parser;
pub mod query;
pub mod tree;

pub use parser::{parse, ParseError};
pub use query::{OwnedSegment, Segment};
pub use tree::{JsonTree, Node, NodeId, NodeKind};
