//! apt-get backend for the [`PackageManager`] trait.

use std::collections::HashMap;

use crate::error::{Result, TessupError};
use crate::packages::PackageSpec;
use crate::shell::{execute, execute_streaming, CommandOptions, CommandResult, OutputCallback};

use super::{diagnostic_tail, PackageManager};

/// How many trailing output lines to surface when apt fails.
const ERROR_TAIL_LINES: usize = 15;

/// Package manager backend driving `apt-get`.
///
/// Both calls run under `DEBIAN_FRONTEND=noninteractive`; the install adds
/// `-y` so apt never waits on a prompt. Consent is collected by the caller
/// before any of this runs.
#[derive(Debug, Default)]
pub struct AptManager;

impl AptManager {
    /// Create a new apt backend.
    pub fn new() -> Self {
        Self
    }

    /// The index-refresh command.
    pub fn refresh_command() -> String {
        "apt-get update".to_string()
    }

    /// The batched install command for `spec`, names in declaration order.
    pub fn install_command(spec: &PackageSpec) -> String {
        format!("apt-get install -y {}", spec.joined())
    }

    fn options() -> CommandOptions {
        let mut env = HashMap::new();
        env.insert(
            "DEBIAN_FRONTEND".to_string(),
            "noninteractive".to_string(),
        );
        CommandOptions {
            env,
            capture_stdout: true,
            capture_stderr: true,
        }
    }

    fn run(command: &str, output: Option<OutputCallback>) -> Result<CommandResult> {
        let options = Self::options();
        match output {
            Some(callback) => execute_streaming(command, &options, callback),
            None => execute(command, &options),
        }
    }
}

impl PackageManager for AptManager {
    fn refresh(&mut self, output: Option<OutputCallback>) -> Result<()> {
        let command = Self::refresh_command();
        tracing::debug!(%command, "refreshing package index");

        let result = Self::run(&command, output)?;
        if result.success {
            Ok(())
        } else {
            Err(TessupError::RefreshFailed {
                detail: diagnostic_tail(&result.combined_output(), ERROR_TAIL_LINES),
            })
        }
    }

    fn install(&mut self, spec: &PackageSpec, output: Option<OutputCallback>) -> Result<()> {
        let command = Self::install_command(spec);
        tracing::debug!(%command, "installing packages");

        let result = Self::run(&command, output)?;
        if result.success {
            Ok(())
        } else {
            Err(TessupError::InstallFailed {
                detail: diagnostic_tail(&result.combined_output(), ERROR_TAIL_LINES),
            })
        }
    }
}

/// Installed version of a package, or None if it is not installed (or the
/// host has no dpkg at all). Used by the read-only status report.
pub fn query_package(name: &str) -> Option<String> {
    let command = format!("dpkg-query -W -f='${{Version}}' {}", name);
    match crate::shell::execute_quiet(&command) {
        Ok(result) if result.success => {
            let version = result.stdout.trim().trim_matches('\'').to_string();
            if version.is_empty() {
                None
            } else {
                Some(version)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_command_is_apt_update() {
        assert_eq!(AptManager::refresh_command(), "apt-get update");
    }

    #[test]
    fn install_command_is_batched_and_ordered() {
        let spec = PackageSpec::new(["pkg-a", "pkg-b", "pkg-c"]).unwrap();
        assert_eq!(
            AptManager::install_command(&spec),
            "apt-get install -y pkg-a pkg-b pkg-c"
        );
    }

    #[test]
    fn install_command_for_ocr_toolchain() {
        let spec = PackageSpec::ocr_toolchain();
        assert_eq!(
            AptManager::install_command(&spec),
            "apt-get install -y tesseract-ocr libtesseract-dev tesseract-ocr-eng"
        );
    }

    #[test]
    fn options_force_noninteractive_frontend() {
        let options = AptManager::options();
        assert_eq!(
            options.env.get("DEBIAN_FRONTEND").map(String::as_str),
            Some("noninteractive")
        );
        assert!(options.capture_stdout);
        assert!(options.capture_stderr);
    }

    #[test]
    fn query_package_absent_returns_none() {
        // No host has a package by this name
        assert_eq!(query_package("tessup-no-such-package-xyzzy"), None);
    }
}
