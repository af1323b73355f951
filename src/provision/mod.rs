//! Host provisioning: index refresh, batch install, post-install verification.
//!
//! The sequence logic in [`sequence`] runs against two capability traits so
//! it can be tested without mutating a real host:
//!
//! - [`PackageManager`] - refreshes the package index and installs packages
//! - [`VersionedExecutable`] - answers a version query, proving the install
//!
//! Concrete implementations: [`AptManager`] (apt-get backend) and
//! [`TesseractBinary`].

pub mod apt;
pub mod sequence;
pub mod verify;

pub use apt::AptManager;
pub use sequence::{ProvisionReport, Provisioner};
pub use verify::TesseractBinary;

use crate::error::Result;
use crate::packages::PackageSpec;
use crate::shell::OutputCallback;

/// Capability interface over the system package manager.
pub trait PackageManager {
    /// Synchronize the local package index with upstream repositories.
    fn refresh(&mut self, output: Option<OutputCallback>) -> Result<()>;

    /// Install all packages in `spec` in one batched, non-interactive call.
    ///
    /// All-or-nothing: implementations must report failure if any named
    /// package fails to install.
    fn install(&mut self, spec: &PackageSpec, output: Option<OutputCallback>) -> Result<()>;
}

/// Capability interface over an installed executable that reports a version.
pub trait VersionedExecutable {
    /// Name of the executable, as looked up on the search path.
    fn name(&self) -> &str;

    /// Invoke the executable with its version-query flag and return the
    /// captured output. Exit status zero is the only pass criterion; the
    /// text is evidence for the operator, never parsed for correctness.
    fn version(&mut self) -> Result<String>;
}

/// Last few non-empty lines of a command's output, used as error detail.
///
/// Package managers print long transcripts; the tail is where apt puts
/// its `E:` diagnostics.
pub(crate) fn diagnostic_tail(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
