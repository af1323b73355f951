//! Tessup - Tesseract OCR toolchain provisioning.
//!
//! Tessup is a CLI tool that bootstraps a host for an OCR pipeline: it
//! refreshes the system package index, installs the Tesseract engine with
//! its development headers and language data in one batched apt call, and
//! proves the install by querying the binary's version. The sequence is
//! strictly linear and fail-fast; the first failing step aborts the run
//! with a non-zero exit.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`context`] - Explicitly-passed execution context (privilege, network)
//! - [`error`] - Error types and result aliases
//! - [`packages`] - The fixed, ordered package set
//! - [`provision`] - Provisioning sequence and capability traits
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output, spinners, and prompts
//!
//! # Example
//!
//! ```
//! use tessup::packages::PackageSpec;
//! use tessup::provision::AptManager;
//!
//! let spec = PackageSpec::ocr_toolchain();
//! assert_eq!(
//!     AptManager::install_command(&spec),
//!     "apt-get install -y tesseract-ocr libtesseract-dev tesseract-ocr-eng"
//! );
//! ```

pub mod cli;
pub mod context;
pub mod error;
pub mod packages;
pub mod provision;
pub mod shell;
pub mod ui;

pub use error::{Result, TessupError};
