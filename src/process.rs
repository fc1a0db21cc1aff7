//! External process execution.
//!
//! Every git interaction goes through [`CommandRunner`], a single-method
//! seam that [`crate::git::mock::MockRunner`] replaces in tests.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, TagReleaseError};

/// Runs an external program to completion and returns its output
pub trait CommandRunner {
    /// Run `program` with `args`.
    ///
    /// # Returns
    /// * `Ok(String)` - Trimmed stdout lines joined by `\n` on exit status 0
    /// * `Err(CommandFailure)` - Trimmed stderr lines on any other exit status
    /// * `Err(Spawn)` - If the program could not be started
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        (**self).run(program, args)
    }
}

/// Runner backed by `std::process::Command`, blocking until exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let rendered = display_command(program, args);
        debug!(command = %rendered, "Running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| TagReleaseError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(collect_lines(&output.stdout))
        } else {
            let stderr = collect_lines(&output.stderr);
            debug!(command = %rendered, status = ?output.status.code(), %stderr, "Command failed");
            Err(TagReleaseError::command(rendered, stderr))
        }
    }
}

/// Render a command line for logs and error messages
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_lines(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim()
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_command_returns_stdout() {
        let out = SystemRunner.run("git", &["--version"]).unwrap();
        assert!(out.starts_with("git version"), "unexpected output: {}", out);
    }

    #[test]
    fn test_failed_command_returns_stderr() {
        let err = SystemRunner.run("git", &["not-a-real-command"]).unwrap_err();
        match err {
            TagReleaseError::CommandFailure { command, stderr } => {
                assert_eq!(command, "git not-a-real-command");
                assert!(stderr.contains("not-a-real-command"));
            }
            other => panic!("expected CommandFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .run("definitely-not-a-program-tag-release", &[])
            .unwrap_err();
        assert!(matches!(err, TagReleaseError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_lines_are_trimmed() {
        let out = SystemRunner
            .run("sh", &["-c", "printf '  v1.0.0  \\n\\tv1.1.0 \\n\\n'"])
            .unwrap();
        assert_eq!(out, "v1.0.0\nv1.1.0");
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_lines_are_trimmed() {
        let err = SystemRunner
            .run("sh", &["-c", "printf ' first \\n second ' >&2; exit 3"])
            .unwrap_err();
        assert!(matches!(
            err,
            TagReleaseError::CommandFailure { ref stderr, .. } if stderr == "first\nsecond"
        ));
    }

    #[test]
    fn test_collect_lines_empty_output() {
        assert_eq!(collect_lines(b""), "");
    }

    #[test]
    fn test_display_command() {
        assert_eq!(display_command("git", &["tag", "-l"]), "git tag -l");
    }
}
