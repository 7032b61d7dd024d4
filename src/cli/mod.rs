//! Command-line interface for wavelint.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and the lint-and-report flow behind it.
//!
//! # Exit codes
//!
//! - `0` - no findings at error severity
//! - `1` - at least one error (or warning with `--strict`)
//! - `2` - usage problems: no template directory, no manifest

pub mod args;

pub use args::{Cli, Commands, CompletionsArgs};

use std::io::Write;
use std::sync::Arc;

use clap::CommandFactory;

use crate::error::{Result, WavelintError};
use crate::lint::{
    FileStat, FixEngine, FsWorkspace, HumanFormatter, JsonFormatter, LintFormatter, LintResult,
    SarifFormatter, Severity, TemplateLinter, Workspace, MANIFEST_FILE_NAME,
};

/// Run the CLI and return the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    if let Some(Commands::Completions(args)) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "wavelint", &mut std::io::stdout());
        return Ok(0);
    }

    let workspace = Arc::new(FsWorkspace);
    if workspace.stat(&cli.template).await != FileStat::Directory {
        return Err(WavelintError::NotADirectory {
            path: cli.template.clone(),
        });
    }
    let manifest_path = cli.template.join(MANIFEST_FILE_NAME);
    if !workspace.stat(&manifest_path).await.is_file() {
        return Err(WavelintError::ManifestNotFound {
            path: manifest_path,
        });
    }

    let linter = TemplateLinter::new(workspace);
    let mut result = linter.lint(&cli.template).await;

    if cli.fix {
        let engine = FixEngine::new();
        let fixes = engine.collect_fixes(&result);
        if !fixes.is_empty() {
            let outcome = engine.apply_fixes(&fixes);
            tracing::info!("applied {} fix(es)", outcome.applied);
            for error in &outcome.errors {
                tracing::warn!("fix failed: {error}");
            }
            // Re-lint so the report reflects the fixed files.
            result = linter.lint(&cli.template).await;
        }
    }

    let mut stdout = std::io::stdout().lock();
    format_result(&cli, &result, &mut stdout)?;

    let failed = result.has_errors() || (cli.strict && result.count(Severity::Warning) > 0);
    Ok(if failed { 1 } else { 0 })
}

fn format_result<W: Write>(cli: &Cli, result: &LintResult, writer: &mut W) -> Result<()> {
    match cli.format.as_str() {
        "json" => JsonFormatter::new().format(result, writer)?,
        "sarif" => {
            SarifFormatter::new("wavelint", env!("CARGO_PKG_VERSION")).format(result, writer)?;
        }
        _ => {
            let use_color = !cli.no_color && console::colors_enabled();
            HumanFormatter::new(use_color).format(result, writer)?;
        }
    }
    writeln!(writer)?;
    Ok(())
}
