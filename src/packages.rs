//! The set of packages to provision.
//!
//! A [`PackageSpec`] is an ordered list of package names, fixed at authoring
//! time. Order carries no install-time meaning (the whole set goes to the
//! package manager in one call) but is preserved so logs and generated
//! commands are reproducible run-to-run.

use serde::Serialize;

use crate::error::{Result, TessupError};

/// Packages required by the OCR toolchain: the engine itself, its
/// development headers, and the English language-data pack.
pub const OCR_PACKAGES: [&str; 3] = ["tesseract-ocr", "libtesseract-dev", "tesseract-ocr-eng"];

/// An ordered, non-empty set of package names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSpec {
    names: Vec<String>,
}

impl PackageSpec {
    /// Create a package spec from a list of names.
    ///
    /// Returns [`TessupError::EmptyPackageSet`] if `names` is empty.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(TessupError::EmptyPackageSet);
        }
        Ok(Self { names })
    }

    /// The fixed package set for the OCR toolchain.
    pub fn ocr_toolchain() -> Self {
        Self {
            names: OCR_PACKAGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Package names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of packages in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// A spec is never empty, but clippy insists the pair exists.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names joined with single spaces, for building install commands.
    pub fn joined(&self) -> String {
        self.names.join(" ")
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_rejected() {
        let result = PackageSpec::new(Vec::<String>::new());
        assert!(matches!(result, Err(TessupError::EmptyPackageSet)));
    }

    #[test]
    fn ocr_toolchain_has_expected_packages() {
        let spec = PackageSpec::ocr_toolchain();
        assert_eq!(
            spec.names(),
            &["tesseract-ocr", "libtesseract-dev", "tesseract-ocr-eng"]
        );
    }

    #[test]
    fn order_is_preserved() {
        let spec = PackageSpec::new(["pkg-c", "pkg-a", "pkg-b"]).unwrap();
        assert_eq!(spec.names(), &["pkg-c", "pkg-a", "pkg-b"]);
    }

    #[test]
    fn joined_produces_command_arguments() {
        let spec = PackageSpec::new(["pkg-a", "pkg-b"]).unwrap();
        assert_eq!(spec.joined(), "pkg-a pkg-b");
    }

    #[test]
    fn display_is_comma_separated() {
        let spec = PackageSpec::ocr_toolchain();
        assert_eq!(
            spec.to_string(),
            "tesseract-ocr, libtesseract-dev, tesseract-ocr-eng"
        );
    }

    #[test]
    fn len_counts_packages() {
        assert_eq!(PackageSpec::ocr_toolchain().len(), 3);
        assert!(!PackageSpec::ocr_toolchain().is_empty());
    }

    #[test]
    fn serializes_to_json_array() {
        let spec = PackageSpec::new(["pkg-a"]).unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("pkg-a"));
    }
}
