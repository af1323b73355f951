//! The provisioning sequence.
//!
//! `Start → RefreshIndex → InstallPackages → Verify → Done`, with a single
//! absorbing failure state reachable from each working step. No retries,
//! no backward transitions, no branching: the first error propagates out
//! and nothing after it runs.

use crate::error::Result;
use crate::packages::PackageSpec;
use crate::ui::{live_output_callback, UserInterface};

use super::verify::extract_version;
use super::{PackageManager, VersionedExecutable};

/// Outcome of a fully successful run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// The verifier's captured output, surfaced verbatim to the operator.
    pub version_output: String,

    /// Best-effort extracted version number, for the success line only.
    pub version: Option<String>,
}

/// Runs the three-step provisioning sequence against injected capabilities.
pub struct Provisioner<'a> {
    manager: &'a mut dyn PackageManager,
    executable: &'a mut dyn VersionedExecutable,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner over the given package manager and binary.
    pub fn new(
        manager: &'a mut dyn PackageManager,
        executable: &'a mut dyn VersionedExecutable,
    ) -> Self {
        Self {
            manager,
            executable,
        }
    }

    /// Run the sequence to completion or first failure.
    pub fn run(
        &mut self,
        spec: &PackageSpec,
        ui: &mut dyn UserInterface,
    ) -> Result<ProvisionReport> {
        tracing::info!("refreshing package index");
        let mut spinner = ui.start_spinner("Refreshing package index");
        let callback = spinner
            .progress_bar()
            .map(|bar| live_output_callback(bar, "Refreshing package index".to_string(), 2));
        match self.manager.refresh(callback) {
            Ok(()) => spinner.finish_success("Package index refreshed"),
            Err(e) => {
                spinner.finish_error("Package index refresh failed");
                return Err(e);
            }
        }

        tracing::info!(packages = %spec, "installing packages");
        let label = format!("Installing {} packages", spec.len());
        let mut spinner = ui.start_spinner(&label);
        let callback = spinner
            .progress_bar()
            .map(|bar| live_output_callback(bar, label.clone(), 2));
        match self.manager.install(spec, callback) {
            Ok(()) => spinner.finish_success(&format!("Installed {}", spec)),
            Err(e) => {
                spinner.finish_error("Package install failed");
                return Err(e);
            }
        }

        let binary = self.executable.name().to_string();
        tracing::info!(%binary, "verifying installation");
        let mut spinner = ui.start_spinner(&format!("Verifying '{}'", binary));
        match self.executable.version() {
            Ok(version_output) => {
                let version = extract_version(&version_output);
                let summary = match &version {
                    Some(v) => format!("'{}' reports version {}", binary, v),
                    None => format!("'{}' answered the version query", binary),
                };
                spinner.finish_success(&summary);
                Ok(ProvisionReport {
                    version_output,
                    version,
                })
            }
            Err(e) => {
                spinner.finish_error(&format!("Verification of '{}' failed", binary));
                Err(e)
            }
        }
    }
}
