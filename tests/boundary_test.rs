use std::path::PathBuf;

use tag_release::boundary::BoundaryWarning;
use tag_release::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "latest".to_string(),
        reason: "version string (latest) is invalid".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("latest"),
        "Message should name the tag, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("is invalid"),
        "Message should carry the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_manifest_missing_display() {
    let warning = BoundaryWarning::ManifestMissing {
        path: PathBuf::from("./package.json"),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("./package.json"));
    assert!(display_msg.contains("not written"));
}

#[test]
fn test_boundary_warning_manifest_without_version_display() {
    let warning = BoundaryWarning::ManifestWithoutVersion {
        path: PathBuf::from("package.json"),
    };

    assert_eq!(
        warning.to_string(),
        "package.json declares no version field, version not written"
    );
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "nightly".to_string(),
        reason: "not a version".to_string(),
    };
    ui::display_boundary_warning(&warning);
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::ManifestMissing {
        path: PathBuf::from("package.json"),
    };
    assert_eq!(a.clone(), a);
    assert_ne!(
        a,
        BoundaryWarning::ManifestWithoutVersion {
            path: PathBuf::from("package.json")
        }
    );
}
