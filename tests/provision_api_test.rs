//! Integration tests for the provisioning sequence through the public API.
//!
//! The sequence runs against the capability traits with doubles standing in
//! for apt and the installed binary, so no host mutation happens here.

use tessup::error::{Result, TessupError};
use tessup::packages::PackageSpec;
use tessup::provision::{PackageManager, Provisioner, VersionedExecutable};
use tessup::shell::OutputCallback;
use tessup::ui::MockUI;

/// Scriptable package manager double.
#[derive(Default)]
struct ScriptedManager {
    refresh_error: Option<String>,
    install_error: Option<String>,
    refresh_calls: usize,
    install_calls: Vec<Vec<String>>,
}

impl PackageManager for ScriptedManager {
    fn refresh(&mut self, _output: Option<OutputCallback>) -> Result<()> {
        self.refresh_calls += 1;
        match &self.refresh_error {
            Some(detail) => Err(TessupError::RefreshFailed {
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }

    fn install(&mut self, spec: &PackageSpec, _output: Option<OutputCallback>) -> Result<()> {
        self.install_calls.push(spec.names().to_vec());
        match &self.install_error {
            Some(detail) => Err(TessupError::InstallFailed {
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Scriptable binary double.
struct ScriptedBinary {
    version_output: Option<String>,
    queries: usize,
}

impl ScriptedBinary {
    fn answering(output: &str) -> Self {
        Self {
            version_output: Some(output.to_string()),
            queries: 0,
        }
    }

    fn missing() -> Self {
        Self {
            version_output: None,
            queries: 0,
        }
    }
}

impl VersionedExecutable for ScriptedBinary {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&mut self) -> Result<String> {
        self.queries += 1;
        match &self.version_output {
            Some(output) => Ok(output.clone()),
            None => Err(TessupError::VerifyFailed {
                binary: "tesseract".into(),
                detail: "not found on the search path".into(),
            }),
        }
    }
}

fn ocr_spec() -> PackageSpec {
    PackageSpec::ocr_toolchain()
}

#[test]
fn successful_run_surfaces_the_version_banner() {
    let mut manager = ScriptedManager::default();
    let mut binary = ScriptedBinary::answering("tesseract 4.1.1\n leptonica-1.82.0\n");
    let mut ui = MockUI::new();

    let report = Provisioner::new(&mut manager, &mut binary)
        .run(&ocr_spec(), &mut ui)
        .unwrap();

    assert_eq!(manager.refresh_calls, 1);
    assert_eq!(binary.queries, 1);
    assert!(report.version_output.starts_with("tesseract 4.1.1"));
    assert_eq!(report.version.as_deref(), Some("4.1.1"));
}

#[test]
fn install_gets_the_whole_spec_in_one_call() {
    let mut manager = ScriptedManager::default();
    let mut binary = ScriptedBinary::answering("tesseract 5.3.0\n");
    let mut ui = MockUI::new();

    Provisioner::new(&mut manager, &mut binary)
        .run(&ocr_spec(), &mut ui)
        .unwrap();

    assert_eq!(manager.install_calls.len(), 1);
    assert_eq!(
        manager.install_calls[0],
        vec!["tesseract-ocr", "libtesseract-dev", "tesseract-ocr-eng"]
    );
}

#[test]
fn missing_package_aborts_before_verification() {
    let mut manager = ScriptedManager {
        install_error: Some("E: Unable to locate package libtesseract-dev".to_string()),
        ..Default::default()
    };
    let mut binary = ScriptedBinary::answering("tesseract 4.1.1\n");
    let mut ui = MockUI::new();

    let err = Provisioner::new(&mut manager, &mut binary)
        .run(&ocr_spec(), &mut ui)
        .unwrap_err();

    assert!(err.to_string().contains("libtesseract-dev"));
    assert_eq!(err.stage(), Some("install"));
    assert_eq!(binary.queries, 0, "verifier must never run after a failed install");
}

#[test]
fn refresh_failure_stops_the_whole_sequence() {
    let mut manager = ScriptedManager {
        refresh_error: Some("Could not resolve 'archive.ubuntu.com'".to_string()),
        ..Default::default()
    };
    let mut binary = ScriptedBinary::answering("tesseract 4.1.1\n");
    let mut ui = MockUI::new();

    let err = Provisioner::new(&mut manager, &mut binary)
        .run(&ocr_spec(), &mut ui)
        .unwrap_err();

    assert_eq!(err.stage(), Some("refresh"));
    assert!(manager.install_calls.is_empty());
    assert_eq!(binary.queries, 0);
}

#[test]
fn broken_binary_fails_verification() {
    let mut manager = ScriptedManager::default();
    let mut binary = ScriptedBinary::missing();
    let mut ui = MockUI::new();

    let err = Provisioner::new(&mut manager, &mut binary)
        .run(&ocr_spec(), &mut ui)
        .unwrap_err();

    assert_eq!(err.stage(), Some("verify"));
    assert!(err.to_string().contains("tesseract"));
}

#[test]
fn already_provisioned_host_succeeds_on_every_run() {
    // Re-install is the package manager's no-op and still reports success
    let mut manager = ScriptedManager::default();
    let mut binary = ScriptedBinary::answering("tesseract 4.1.1\n");

    for _ in 0..2 {
        let mut ui = MockUI::new();
        let report = Provisioner::new(&mut manager, &mut binary)
            .run(&ocr_spec(), &mut ui)
            .unwrap();
        assert_eq!(report.version.as_deref(), Some("4.1.1"));
    }

    assert_eq!(manager.refresh_calls, 2);
    assert_eq!(manager.install_calls.len(), 2);
}

#[test]
fn custom_spec_names_pass_through_unchanged() {
    let spec = PackageSpec::new(["pkg-a", "pkg-b", "pkg-c"]).unwrap();
    let mut manager = ScriptedManager::default();
    let mut binary = ScriptedBinary::answering("v1.0\n");
    let mut ui = MockUI::new();

    Provisioner::new(&mut manager, &mut binary)
        .run(&spec, &mut ui)
        .unwrap();

    assert_eq!(manager.install_calls[0], vec!["pkg-a", "pkg-b", "pkg-c"]);
}
