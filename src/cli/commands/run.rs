//! Run command implementation.
//!
//! The `tessup run` command (also the default when no subcommand is given)
//! executes the provisioning sequence: refresh the package index, install
//! the OCR toolchain packages, verify the installed binary.

use crate::cli::args::RunArgs;
use crate::context::ExecContext;
use crate::error::{Result, TessupError};
use crate::packages::PackageSpec;
use crate::provision::{AptManager, Provisioner, TesseractBinary};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    /// Collect consent for mutating the host.
    ///
    /// `--yes` is standing consent. Otherwise an interactive session is
    /// asked once; a non-interactive session without `--yes` is an error,
    /// never a silent install.
    fn consent(&self, spec: &PackageSpec, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.args.yes {
            return Ok(true);
        }
        if self.args.non_interactive || !ui.is_interactive() {
            return Err(TessupError::ConsentRequired);
        }
        ui.confirm(
            &format!("Install {} packages via apt-get?", spec.len()),
            true,
        )
    }

    /// Warn about environment problems before anything mutates.
    ///
    /// Warnings only: a host with sudoless apt or a local mirror is still
    /// allowed to try, and the failing step reports the real diagnostic.
    fn preflight(ctx: &ExecContext, ui: &mut dyn UserInterface) {
        if !ctx.elevated {
            ui.warning(
                "Not running as root; apt-get will likely refuse to modify the package database",
            );
        }
        if !ctx.network_available {
            ui.warning("Network appears unreachable; the index refresh may fail");
        }
    }

    fn show_plan(spec: &PackageSpec, ui: &mut dyn UserInterface) {
        ui.message("Would run:");
        ui.message(&format!("  {}", AptManager::refresh_command()));
        ui.message(&format!("  {}", AptManager::install_command(spec)));
        ui.message(&format!("  {}", TesseractBinary::version_command()));
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let spec = PackageSpec::ocr_toolchain();

        ui.show_header("Tesseract OCR toolchain");
        ui.message(&format!("Packages: {}", spec));

        if self.args.dry_run {
            Self::show_plan(&spec, ui);
            ui.success("Dry-run complete, nothing was executed");
            return Ok(CommandResult::success());
        }

        if !self.consent(&spec, ui)? {
            ui.warning("Aborted: no packages were installed");
            return Ok(CommandResult::failure(1));
        }

        let ctx = ExecContext::detect();
        Self::preflight(&ctx, ui);

        let mut manager = AptManager::new();
        let mut binary = TesseractBinary::new();
        let report = Provisioner::new(&mut manager, &mut binary).run(&spec, ui)?;

        // The verifier's output is the operator-facing evidence of success.
        ui.message("");
        for line in report.version_output.lines() {
            ui.message(line);
        }
        ui.success("Provisioning complete");

        Ok(CommandResult::success())
    }
}
