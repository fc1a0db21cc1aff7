//! Git operations expressed as calls to the git executable
//!
//! [`GitClient`] turns each operation tag-release needs into one
//! [`CommandRunner`] invocation, so the whole release flow can run against
//! [`mock::MockRunner`] in tests.
//!
//! ```rust
//! # use tag_release::git::{GitClient, MockRunner};
//! let mut runner = MockRunner::new();
//! runner.respond("git tag -l", "v1.0.0\nv1.1.0-rc.0");
//! let git = GitClient::new(&runner, "git");
//! assert_eq!(git.list_tags().unwrap(), vec!["v1.0.0", "v1.1.0-rc.0"]);
//! ```

pub mod mock;

pub use mock::MockRunner;

use crate::error::Result;
use crate::process::CommandRunner;

const NOTHING_TO_STASH: &str = "no local changes to save";

/// Git operations used by the release flow
pub struct GitClient<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> GitClient<R> {
    /// Create a client invoking `binary` through `runner`
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        GitClient {
            runner,
            binary: binary.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.runner.run(&self.binary, args)
    }

    /// Name of the checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        self.git(&["branch", "--show-current"])
    }

    /// All local tag names, blank lines dropped
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let out = self.git(&["tag", "-l"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Delete the given local tags; no command is issued for an empty list
    pub fn delete_local_tags(&self, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let mut args = vec!["tag", "-d"];
        args.extend(tags.iter().map(String::as_str));
        self.git(&args)?;
        Ok(())
    }

    /// Stash uncommitted changes including untracked files
    ///
    /// # Returns
    /// * `Ok(true)` - A stash entry was created and must be popped
    /// * `Ok(false)` - The working tree was clean
    pub fn stash_including_untracked(&self) -> Result<bool> {
        let out = self.git(&["stash", "--include-untracked"])?;
        Ok(!out.to_lowercase().contains(NOTHING_TO_STASH))
    }

    /// Restore the most recent stash entry
    pub fn stash_pop(&self) -> Result<()> {
        self.git(&["stash", "pop"])?;
        Ok(())
    }

    /// Fetch `branch` and all tags from `remote`
    pub fn fetch_tags(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["fetch", remote, branch, "--tags"])?;
        Ok(())
    }

    /// Delete tags on `remote`
    pub fn delete_remote_tags(&self, remote: &str, tags: &[String]) -> Result<()> {
        let mut args = vec!["push", "--delete", "--no-verify", remote];
        args.extend(tags.iter().map(String::as_str));
        self.git(&args)?;
        Ok(())
    }

    /// Stage a single file, commit it and push `branch` to `remote`
    pub fn commit_file(&self, path: &str, message: &str, remote: &str, branch: &str) -> Result<()> {
        self.git(&["add", path])?;
        self.git(&["commit", "-m", message])?;
        self.git(&["push", "--no-verify", remote, branch])?;
        Ok(())
    }

    /// Create an annotated tag at HEAD
    pub fn create_annotated_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.git(&["tag", tag, "-m", message])?;
        Ok(())
    }

    /// Push a single tag to `remote`
    pub fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.git(&["push", "--no-verify", remote, tag])?;
        Ok(())
    }
}
