//! Error types for wavelint operations.
//!
//! Recoverable template problems never surface here; they become
//! diagnostics with a location and a stable code. This module only covers
//! operational failures: missing bundles, IO trouble, and wrapped
//! unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wavelint operations.
#[derive(Debug, Error)]
pub enum WavelintError {
    /// The template directory has no manifest to lint.
    #[error("No template manifest found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// The lint target is not a directory.
    #[error("Not a template directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A fix could not be applied because the file changed underneath it.
    #[error("Stale fix for {path}: {message}")]
    StaleFix { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for wavelint operations.
pub type Result<T> = std::result::Result<T, WavelintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_not_found_displays_path() {
        let err = WavelintError::ManifestNotFound {
            path: PathBuf::from("/tpl/template-info.json"),
        };
        assert!(err.to_string().contains("/tpl/template-info.json"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WavelintError = io_err.into();
        assert!(matches!(err, WavelintError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(WavelintError::NotADirectory {
                path: PathBuf::from("x"),
            })
        }
        assert!(returns_error().is_err());
    }
}
