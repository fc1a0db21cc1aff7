use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for tag-release operations
#[derive(Error, Debug)]
pub enum TagReleaseError {
    #[error("version string ({0}) is invalid")]
    InvalidVersionFormat(String),

    #[error("invalid {name} ({value}). valid --{name} arguments ({valid})")]
    InvalidArgument {
        name: String,
        value: String,
        valid: String,
    },

    #[error("{command} failed: {stderr}")]
    CommandFailure { command: String, stderr: String },

    #[error("{cause}; local changes were left in the stash, restore them with `git stash pop`")]
    StashLeftBehind { cause: Box<TagReleaseError> },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest error in {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-release
pub type Result<T> = std::result::Result<T, TagReleaseError>;

impl TagReleaseError {
    /// Create an invalid version error for the offending string
    pub fn invalid_version(input: impl Into<String>) -> Self {
        TagReleaseError::InvalidVersionFormat(input.into())
    }

    /// Create an invalid argument error listing the accepted values
    pub fn invalid_argument(
        name: impl Into<String>,
        value: impl Into<String>,
        valid: &[&str],
    ) -> Self {
        TagReleaseError::InvalidArgument {
            name: name.into(),
            value: value.into(),
            valid: valid.join(", "),
        }
    }

    /// Create a command failure carrying the captured stderr
    pub fn command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        TagReleaseError::CommandFailure {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Wrap a failure that happened while local changes were stashed
    pub fn stash_left_behind(cause: TagReleaseError) -> Self {
        TagReleaseError::StashLeftBehind {
            cause: Box::new(cause),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TagReleaseError::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagReleaseError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_version_carries_input() {
        let err = TagReleaseError::invalid_version("vv1.0.0");
        assert_eq!(err.to_string(), "version string (vv1.0.0) is invalid");
    }

    #[test]
    fn test_invalid_argument_lists_options() {
        let err = TagReleaseError::invalid_argument("stage", "beta", &["release", "rc", "stage"]);
        assert_eq!(
            err.to_string(),
            "invalid stage (beta). valid --stage arguments (release, rc, stage)"
        );
    }

    #[test]
    fn test_command_failure_display() {
        let err = TagReleaseError::command("git push", "remote rejected");
        assert_eq!(err.to_string(), "git push failed: remote rejected");
    }

    #[test]
    fn test_stash_left_behind_names_restore_command() {
        let err = TagReleaseError::stash_left_behind(TagReleaseError::command(
            "git fetch origin main --tags",
            "network unreachable",
        ));
        assert_eq!(
            err.to_string(),
            "git fetch origin main --tags failed: network unreachable; local changes were left in the stash, restore them with `git stash pop`"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TagReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_manifest_error_includes_path() {
        let err = TagReleaseError::manifest("package.json", "Invalid JSON");
        let msg = err.to_string();
        assert!(msg.contains("package.json"));
        assert!(msg.contains("Invalid JSON"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TagReleaseError::config("x"), "Configuration error"),
            (TagReleaseError::invalid_version("x"), "version string"),
            (TagReleaseError::command("git tag", "x"), "git tag failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
