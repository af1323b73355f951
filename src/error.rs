//! Error types for Tessup operations.
//!
//! This module defines [`TessupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - One variant per provisioning stage, so the failing stage is always
//!   identifiable from the error alone
//! - Stage errors carry the external tool's own diagnostic text as detail;
//!   no further wrapping is added
//! - Use `anyhow::Error` (via `TessupError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for Tessup operations.
#[derive(Debug, Error)]
pub enum TessupError {
    /// Package index refresh failed.
    #[error("Index refresh failed: {detail}")]
    RefreshFailed { detail: String },

    /// Batch package install failed.
    #[error("Package install failed: {detail}")]
    InstallFailed { detail: String },

    /// Post-install verification failed.
    #[error("Verification of '{binary}' failed: {detail}")]
    VerifyFailed { binary: String, detail: String },

    /// A package set was constructed with no package names.
    #[error("Package set is empty: nothing to install")]
    EmptyPackageSet,

    /// Host mutation was requested without consent in a non-interactive run.
    #[error("Installing packages requires consent: pass --yes to proceed non-interactively")]
    ConsentRequired,

    /// Shell command could not be spawned or was killed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TessupError {
    /// Name of the provisioning stage this error belongs to, if any.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            Self::RefreshFailed { .. } => Some("refresh"),
            Self::InstallFailed { .. } => Some("install"),
            Self::VerifyFailed { .. } => Some("verify"),
            _ => None,
        }
    }
}

/// Result type alias for Tessup operations.
pub type Result<T> = std::result::Result<T, TessupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_failed_displays_detail() {
        let err = TessupError::RefreshFailed {
            detail: "Could not resolve 'archive.ubuntu.com'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Index refresh failed"));
        assert!(msg.contains("archive.ubuntu.com"));
    }

    #[test]
    fn install_failed_displays_detail() {
        let err = TessupError::InstallFailed {
            detail: "E: Unable to locate package libtesseract-dev".into(),
        };
        assert!(err.to_string().contains("libtesseract-dev"));
    }

    #[test]
    fn verify_failed_displays_binary_and_detail() {
        let err = TessupError::VerifyFailed {
            binary: "tesseract".into(),
            detail: "command not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("tesseract"));
        assert!(msg.contains("command not found"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = TessupError::CommandFailed {
            command: "apt-get update".into(),
            code: Some(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get update"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn consent_required_mentions_flag() {
        let err = TessupError::ConsentRequired;
        assert!(err.to_string().contains("--yes"));
    }

    #[test]
    fn stage_names_match_variants() {
        assert_eq!(
            TessupError::RefreshFailed { detail: "x".into() }.stage(),
            Some("refresh")
        );
        assert_eq!(
            TessupError::InstallFailed { detail: "x".into() }.stage(),
            Some("install")
        );
        assert_eq!(
            TessupError::VerifyFailed {
                binary: "t".into(),
                detail: "x".into()
            }
            .stage(),
            Some("verify")
        );
        assert_eq!(TessupError::EmptyPackageSet.stage(), None);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TessupError = io_err.into();
        assert!(matches!(err, TessupError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(TessupError::EmptyPackageSet)
        }
        assert!(returns_error().is_err());
    }
}
