//! Lint rule definitions.
//!
//! This module provides the core trait for defining lint rules:
//!
//! - [`LintRule`] - The trait that all lint rules must implement
//!
//! Rules are grouped by the [`SourceKind`] they inspect; the orchestrator
//! runs independent groups concurrently. A rule reads one or more parsed
//! trees through the [`RuleContext`] and appends diagnostics; it has no
//! other side effects. A rule that fails does so in isolation: the error is
//! logged by the orchestrator and sibling rules still run.

use async_trait::async_trait;

use super::context::RuleContext;
use super::diagnostic::Diagnostic;
use super::fields::SourceKind;
use crate::error::Result;

/// A lint rule that validates part of a template bundle.
#[async_trait]
pub trait LintRule: Send + Sync {
    /// Short machine-readable rule name, used in logs.
    fn name(&self) -> &'static str;

    /// Which source file group this rule belongs to.
    fn source(&self) -> SourceKind;

    /// Inspect the template and return any diagnostics.
    async fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>>;
}
