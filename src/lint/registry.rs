//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores all available lint rules, grouped by the
//! source file they inspect, and is what the orchestrator dispatches over.

use super::fields::SourceKind;
use super::rule::LintRule;
use super::rules::{
    AutoInstallVariableRefRule, CsvSizeRule, DeprecatedFieldsRule, DuplicateConstantRule,
    DuplicateDatasetNameRule, DuplicateMacroRule, DuplicatePathUsageRule, DuplicateRuleNameRule,
    DuplicateShareRule, EmbeddedAppPageRule, ExcludesRegexRule, LayoutVariableRefRule,
    NameMatchesFolderRule, NoOpMacroRule, PathFieldRule, TemplateObjectsRule,
    UiVariableRefRule, VariableNameRule,
};

/// Registry of all available lint rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PathFieldRule));
        registry.register(Box::new(DuplicatePathUsageRule));
        registry.register(Box::new(TemplateObjectsRule));
        registry.register(Box::new(DeprecatedFieldsRule));
        registry.register(Box::new(NameMatchesFolderRule));
        registry.register(Box::new(CsvSizeRule));
        registry.register(Box::new(DuplicateDatasetNameRule));
        registry.register(Box::new(VariableNameRule));
        registry.register(Box::new(ExcludesRegexRule));
        registry.register(Box::new(UiVariableRefRule));
        registry.register(Box::new(EmbeddedAppPageRule));
        registry.register(Box::new(DuplicateConstantRule));
        registry.register(Box::new(DuplicateRuleNameRule));
        registry.register(Box::new(DuplicateMacroRule));
        registry.register(Box::new(NoOpMacroRule));
        registry.register(Box::new(DuplicateShareRule));
        registry.register(Box::new(AutoInstallVariableRefRule));
        registry.register(Box::new(LayoutVariableRefRule));
        registry
    }

    /// Register a lint rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Iterate over the rules of one source group.
    pub fn rules_for(&self, source: SourceKind) -> impl Iterator<Item = &dyn LintRule> {
        self.rules
            .iter()
            .filter(move |r| r.source() == source)
            .map(|r| r.as_ref())
    }

    /// Iterate over all rules.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
