use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues met during a release.
/// These are reported to the user and the release carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A listed tag is not a version tag and is left out of ordering
    UnparsableTag { tag: String, reason: String },
    /// `--write-to-package` was given but there is no manifest
    ManifestMissing { path: PathBuf },
    /// The manifest exists but has no version field to replace
    ManifestWithoutVersion { path: PathBuf },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            BoundaryWarning::ManifestMissing { path } => {
                write!(f, "No manifest at {}, version not written", path.display())
            }
            BoundaryWarning::ManifestWithoutVersion { path } => {
                write!(
                    f,
                    "{} declares no version field, version not written",
                    path.display()
                )
            }
        }
    }
}
