//! Status command implementation.
//!
//! The `tessup status` command reports the current provisioning state
//! without mutating anything: which toolchain packages are installed, and
//! whether the OCR binary answers a version query.

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::packages::PackageSpec;
use crate::provision::apt::query_package;
use crate::provision::verify::{query_version, OCR_BINARY};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Installed state of a single package.
#[derive(Debug, Serialize)]
pub struct PackageStatus {
    pub name: String,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Outcome of the binary's version query.
#[derive(Debug, Serialize)]
pub struct BinaryStatus {
    pub name: String,
    pub responding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Full read-only provisioning report.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub packages: Vec<PackageStatus>,
    pub binary: BinaryStatus,
    pub provisioned: bool,
}

/// Probes the report is collected through, injectable for tests.
pub struct StatusProbes<'a> {
    /// Installed version of a package, None when absent.
    pub package_version: &'a dyn Fn(&str) -> Option<String>,
    /// Version reported by the binary, None when missing or failing.
    pub binary_version: &'a dyn Fn() -> Option<String>,
}

/// Probes backed by the real host (dpkg-query and the binary itself).
pub fn host_probes() -> StatusProbes<'static> {
    StatusProbes {
        package_version: &query_package,
        binary_version: &query_version,
    }
}

/// Collect the report for `spec` through the given probes.
pub fn collect(spec: &PackageSpec, probes: &StatusProbes<'_>) -> StatusReport {
    let packages: Vec<PackageStatus> = spec
        .names()
        .iter()
        .map(|name| {
            let version = (probes.package_version)(name);
            PackageStatus {
                name: name.clone(),
                installed: version.is_some(),
                version,
            }
        })
        .collect();

    let binary_version = (probes.binary_version)();
    let binary = BinaryStatus {
        name: OCR_BINARY.to_string(),
        responding: binary_version.is_some(),
        version: binary_version,
    };

    let provisioned = packages.iter().all(|p| p.installed) && binary.responding;

    StatusReport {
        packages,
        binary,
        provisioned,
    }
}

/// The status command implementation.
pub struct StatusCommand {
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(args: StatusArgs) -> Self {
        Self { args }
    }

    fn render_human(report: &StatusReport, ui: &mut dyn UserInterface) {
        ui.show_header("Tesseract OCR toolchain - Status");

        ui.message("Packages:");
        for pkg in &report.packages {
            if pkg.installed {
                let version = pkg.version.as_deref().unwrap_or("unknown");
                ui.message(&format!("  ✓ {} {}", pkg.name, version));
            } else {
                ui.message(&format!("  ✗ {} (not installed)", pkg.name));
            }
        }

        ui.message("");
        if report.binary.responding {
            let version = report.binary.version.as_deref().unwrap_or("unknown");
            ui.message(&format!(
                "  ✓ {} answers a version query ({})",
                report.binary.name, version
            ));
        } else {
            ui.message(&format!(
                "  ✗ {} does not answer a version query",
                report.binary.name
            ));
        }

        ui.message("");
        if report.provisioned {
            ui.success("Host is fully provisioned");
        } else {
            ui.warning("Host is not fully provisioned. Run 'tessup run' to provision.");
        }
    }

    fn render_json(report: &StatusReport, ui: &mut dyn UserInterface) -> Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?;
        ui.message(&json);
        Ok(())
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let spec = PackageSpec::ocr_toolchain();
        let report = collect(&spec, &host_probes());

        if self.args.json {
            Self::render_json(&report, ui)?;
        } else {
            Self::render_human(&report, ui);
        }

        if report.provisioned {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
