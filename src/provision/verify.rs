//! Post-install verification via the installed binary's version query.

use crate::error::{Result, TessupError};
use crate::shell::execute_quiet;

use super::{diagnostic_tail, VersionedExecutable};

/// Name of the primary executable the install is expected to provide.
pub const OCR_BINARY: &str = "tesseract";

/// The installed OCR engine, queried through its `--version` flag.
///
/// Older tesseract releases print the version banner to stderr, so both
/// streams are captured and whichever is non-empty is surfaced.
#[derive(Debug, Default)]
pub struct TesseractBinary;

impl TesseractBinary {
    /// Create a new handle on the installed binary.
    pub fn new() -> Self {
        Self
    }

    /// The version-query command.
    pub fn version_command() -> String {
        format!("{} --version", OCR_BINARY)
    }
}

impl VersionedExecutable for TesseractBinary {
    fn name(&self) -> &str {
        OCR_BINARY
    }

    fn version(&mut self) -> Result<String> {
        let command = Self::version_command();
        tracing::debug!(%command, "querying binary version");

        let result = execute_quiet(&command)?;
        if result.success {
            let output = if result.stdout.trim().is_empty() {
                result.stderr
            } else {
                result.stdout
            };
            Ok(output)
        } else {
            Err(TessupError::VerifyFailed {
                binary: OCR_BINARY.to_string(),
                detail: detail_for(&result),
            })
        }
    }
}

fn detail_for(result: &crate::shell::CommandResult) -> String {
    let tail = diagnostic_tail(&result.combined_output(), 5);
    if tail.is_empty() {
        match result.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "not found on the search path".to_string(),
        }
    } else {
        tail
    }
}

/// Extract a dotted version number from version-query output.
///
/// Display decoration only; verification passes on exit status alone.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

/// Version of the installed binary, or None if it is missing or failing.
/// Used by the read-only status report.
pub fn query_version() -> Option<String> {
    let mut binary = TesseractBinary::new();
    binary
        .version()
        .ok()
        .map(|output| extract_version(&output).unwrap_or_else(|| output.trim().to_string()))
}
