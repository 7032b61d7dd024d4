//! Stable diagnostic codes.
//!
//! Every distinct rule violation has its own code so downstream consumers
//! (quick-fix matching, suppression lists) can pattern-match reliably. The
//! set is closed; rules never mint code strings at runtime.

use serde::Serialize;

/// Closed set of diagnostic codes, one per distinct rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A registered relative-path field is present but has no string value.
    PathValueMissing,
    /// A relative-path field value is empty, absolute, or escapes the
    /// template directory.
    PathInvalid,
    /// A relative-path field points at a file that does not exist.
    PathFileMissing,
    /// A relative-path field resolves to a directory.
    PathNotAFile,
    /// Two or more relative-path fields resolve to the identical file.
    PathDuplicateUsage,
    /// An app template declares none of the objects that make it usable.
    TemplateMissingObjects,
    /// A dashboard template must declare exactly one dashboard.
    DashboardSingleRequired,
    /// A data template declares no data objects.
    DataMissingObjects,
    /// Legacy `ruleDefinition` used alongside the `rules` array.
    DeprecatedRuleDefinition,
    /// Legacy flat icon field used alongside the structured `icons` object.
    DeprecatedIconField,
    /// The manifest `name` does not match the template directory name.
    NameFolderMismatch,
    /// A referenced external CSV exceeds the size limit.
    CsvFileTooLarge,
    /// Two dataset-shaped entries share a name.
    DuplicateDatasetName,
    /// A variable key is not a valid identifier.
    InvalidVariableName,
    /// An exclude entry opens a regex with `/` but never closes it.
    RegexMissingClosingSlash,
    /// An exclude regex carries unknown or repeated flags.
    RegexInvalidFlags,
    /// An exclude regex does not compile.
    RegexCompileError,
    /// More than one regex-shaped exclude entry in a single list.
    MultipleRegexExcludes,
    /// A referenced variable is not declared in the variables file.
    UnknownVariable,
    /// A referenced variable has a type this context cannot render.
    UnsupportedVariableType,
    /// A non-Visualforce page inside an embedded-app template.
    EmbeddedAppPageContent,
    /// Two constants share a name.
    DuplicateConstant,
    /// Two rules share a name.
    DuplicateRuleName,
    /// Two macro definitions share a namespace-qualified name.
    DuplicateMacro,
    /// A macro with no return value and no actions.
    MacroNoOp,
    /// Two folder shares target the same grantee.
    DuplicateShare,
}

impl DiagnosticCode {
    /// The stable string form consumers match against.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathValueMissing => "path-value-missing",
            Self::PathInvalid => "path-invalid",
            Self::PathFileMissing => "path-file-missing",
            Self::PathNotAFile => "path-not-a-file",
            Self::PathDuplicateUsage => "path-duplicate-usage",
            Self::TemplateMissingObjects => "template-missing-objects",
            Self::DashboardSingleRequired => "dashboard-single-required",
            Self::DataMissingObjects => "data-missing-objects",
            Self::DeprecatedRuleDefinition => "deprecated-rule-definition",
            Self::DeprecatedIconField => "deprecated-icon-field",
            Self::NameFolderMismatch => "name-folder-mismatch",
            Self::CsvFileTooLarge => "csv-file-too-large",
            Self::DuplicateDatasetName => "duplicate-dataset-name",
            Self::InvalidVariableName => "invalid-variable-name",
            Self::RegexMissingClosingSlash => "regex-missing-closing-slash",
            Self::RegexInvalidFlags => "regex-invalid-flags",
            Self::RegexCompileError => "regex-compile-error",
            Self::MultipleRegexExcludes => "multiple-regex-excludes",
            Self::UnknownVariable => "unknown-variable",
            Self::UnsupportedVariableType => "unsupported-variable-type",
            Self::EmbeddedAppPageContent => "embedded-app-page-content",
            Self::DuplicateConstant => "duplicate-constant",
            Self::DuplicateRuleName => "duplicate-rule-name",
            Self::DuplicateMacro => "duplicate-macro",
            Self::MacroNoOp => "macro-no-op",
            Self::DuplicateShare => "duplicate-share",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
