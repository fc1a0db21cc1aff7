//! Release workflow orchestration
//!
//! Keeps the release flow separate from argument parsing so it can be
//! driven programmatically, and against a scripted runner in tests.

use std::cell::{OnceCell, RefCell};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::tag::sort_parsed_tags;
use crate::domain::{
    plan_next_tag, superseded_tags, BranchContext, ReleasePlan, ReleaseStage, ReleaseType, Tag,
    Version,
};
use crate::error::{Result, TagReleaseError};
use crate::git::GitClient;
use crate::manifest::{self, ManifestUpdate};
use crate::process::{CommandRunner, SystemRunner};
use crate::ui;

/// Arguments for one release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Version field to bump
    pub release_type: ReleaseType,

    /// Kind of tag to create
    pub stage: ReleaseStage,

    /// Rewrite the manifest version and push that commit before tagging
    pub write_to_package: bool,
}

/// Result of a successful release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// The tag that was created and pushed
    pub tag: String,

    /// The branch the tag was cut from
    pub branch: String,

    /// Staged tags removed from the remote
    pub deleted_tags: Vec<String>,

    /// Whether the manifest version was rewritten and pushed
    pub manifest_updated: bool,
}

/// Drives one release attempt against a git repository
///
/// Steps run strictly in order and the first failure aborts the rest;
/// git operations already performed are not undone.
pub struct TagOrchestrator<R: CommandRunner> {
    git: GitClient<R>,
    args: ReleaseArgs,
    config: Config,
    workdir: PathBuf,
    branch: OnceCell<BranchContext>,
    ignored_tags: RefCell<BTreeSet<String>>,
}

impl<R: CommandRunner> TagOrchestrator<R> {
    pub fn new(runner: R, args: ReleaseArgs, config: Config) -> Self {
        let git = GitClient::new(runner, config.git.clone());
        TagOrchestrator {
            git,
            args,
            config,
            workdir: PathBuf::from("."),
            branch: OnceCell::new(),
            ignored_tags: RefCell::new(BTreeSet::new()),
        }
    }

    /// Resolve the manifest path against `workdir` instead of the current directory
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Current branch, queried from git at most once per orchestrator
    pub fn current_branch(&self) -> Result<&BranchContext> {
        if let Some(branch) = self.branch.get() {
            return Ok(branch);
        }
        let name = self.git.current_branch()?;
        info!(branch = %name, "Resolved current branch");
        Ok(self.branch.get_or_init(|| BranchContext::new(name)))
    }

    /// Replace local tags with the remote ones and return them by precedence
    ///
    /// Uncommitted work is stashed around the fetch. The sentinel tag is
    /// always part of the result; tags that are not versions are skipped,
    /// with one warning per tag for the lifetime of the orchestrator.
    pub fn sync_tags(&self) -> Result<Vec<Tag>> {
        let local = self.git.list_tags()?;
        self.git.delete_local_tags(&local)?;

        let stashed = self.git.stash_including_untracked()?;
        let fetched = self
            .current_branch()
            .and_then(|branch| self.git.fetch_tags(&self.config.remote, &branch.name));
        if stashed {
            fetched.map_err(TagReleaseError::stash_left_behind)?;
            self.git.stash_pop()?;
        } else {
            fetched?;
        }

        let mut names = self.git.list_tags()?;
        names.push(self.config.sentinel_tag.clone());

        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            match Tag::parse(name.as_str()) {
                Ok(tag) => tags.push(tag),
                Err(e) => {
                    if self.ignored_tags.borrow_mut().insert(name.clone()) {
                        warn!(tag = %name, "Skipping tag that is not a version");
                        ui::display_boundary_warning(&BoundaryWarning::UnparsableTag {
                            tag: name,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
        sort_parsed_tags(&mut tags);
        info!(count = tags.len(), "Synchronized remote tags");
        Ok(tags)
    }

    /// Work out the next tag from the remote tags
    pub fn plan(&self) -> Result<ReleasePlan> {
        let tags = self.sync_tags()?;
        let branch = self.current_branch()?;
        let plan = plan_next_tag(&tags, self.args.release_type, self.args.stage, branch)?;
        info!(base = %plan.base_tag, tag = %plan.tag, iteration = plan.iteration, "Planned next tag");
        ui::display_proposed_tag(plan.previous_tag(), &plan.tag);
        Ok(plan)
    }

    /// Delete remote candidate and feature-stage tags of a released version
    pub fn cleanup_superseded(&self, version: &Version) -> Result<Vec<String>> {
        let tags = self.sync_tags()?;
        let stale = superseded_tags(&tags, version);
        if !stale.is_empty() {
            ui::display_deleted_tags(&stale);
            self.git.delete_remote_tags(&self.config.remote, &stale)?;
            info!(count = stale.len(), "Deleted superseded remote tags");
        }
        Ok(stale)
    }

    /// Write the tag's version into the manifest and push that commit
    ///
    /// # Returns
    /// * `Ok(true)` - The manifest was rewritten, committed and pushed
    /// * `Ok(false)` - No manifest, or no version field in it
    pub fn write_manifest(&self, tag: &str) -> Result<bool> {
        let path = self.workdir.join(&self.config.manifest);
        let version = strip_version_prefix(tag);

        match manifest::write_version(&path, version)? {
            ManifestUpdate::Updated { previous } => {
                info!(path = %path.display(), %previous, %version, "Updated manifest version");
                let file_name = manifest_name(&path);
                ui::display_status(&format!("PUSHING CHANGES TO {}", file_name));
                let branch = self.current_branch()?;
                self.git.commit_file(
                    &path.to_string_lossy(),
                    &format!("chore: update {} version ({})", file_name, tag),
                    &self.config.remote,
                    &branch.name,
                )?;
                Ok(true)
            }
            ManifestUpdate::Missing => {
                warn!(path = %path.display(), "Manifest not found");
                ui::display_boundary_warning(&BoundaryWarning::ManifestMissing { path });
                Ok(false)
            }
            ManifestUpdate::NoVersionField => {
                warn!(path = %path.display(), "Manifest has no version field");
                ui::display_boundary_warning(&BoundaryWarning::ManifestWithoutVersion { path });
                Ok(false)
            }
        }
    }

    /// Create the annotated tag and push it; returns the tag name used
    pub fn create_tag(&self, tag: &str) -> Result<String> {
        let tag = tag.replace('/', "-");
        let branch = self.current_branch()?;
        let message = format!(
            "release: {} release {}, from branch ({}).",
            self.args.release_type, tag, branch.name
        );
        self.git.create_annotated_tag(&tag, &message)?;
        self.git.push_tag(&self.config.remote, &tag)?;
        ui::display_success(&format!("CREATED NEW TAG {}", tag));
        Ok(tag)
    }

    /// Run the whole release: plan, clean up, write manifest, tag and push
    pub fn create_release(&self) -> Result<ReleaseOutcome> {
        ui::display_status("FETCHING REMOTE TAGS...");
        let plan = self.plan()?;

        let deleted_tags = if self.args.stage == ReleaseStage::Release {
            self.cleanup_superseded(&plan.bumped)?
        } else {
            Vec::new()
        };

        let manifest_updated = if self.args.write_to_package {
            self.write_manifest(&plan.tag)?
        } else {
            false
        };

        let tag = self.create_tag(&plan.tag)?;
        let branch = self.current_branch()?.name.clone();

        Ok(ReleaseOutcome {
            tag,
            branch,
            deleted_tags,
            manifest_updated,
        })
    }
}

/// Main release workflow against the system git
pub fn run_release(args: ReleaseArgs, config: Config) -> Result<ReleaseOutcome> {
    TagOrchestrator::new(SystemRunner, args, config).create_release()
}

fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix(['v', 'V']).unwrap_or(tag)
}

fn manifest_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRunner;

    fn args(release_type: ReleaseType, stage: ReleaseStage) -> ReleaseArgs {
        ReleaseArgs {
            release_type,
            stage,
            write_to_package: false,
        }
    }

    #[test]
    fn test_strip_version_prefix() {
        assert_eq!(strip_version_prefix("v1.2.3"), "1.2.3");
        assert_eq!(strip_version_prefix("V1.2.3-rc.0"), "1.2.3-rc.0");
        assert_eq!(strip_version_prefix("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_branch_queried_once() {
        let mut runner = MockRunner::new();
        runner.respond("git branch --show-current", "main");
        let orchestrator = TagOrchestrator::new(
            &runner,
            args(ReleaseType::Minor, ReleaseStage::Release),
            Config::default(),
        );

        assert_eq!(orchestrator.current_branch().unwrap().name, "main");
        assert_eq!(orchestrator.current_branch().unwrap().name, "main");
        assert_eq!(runner.calls(), vec!["git branch --show-current"]);
    }

    #[test]
    fn test_sync_tags_skips_non_version_tags() {
        let mut runner = MockRunner::new();
        runner
            .respond("git branch --show-current", "main")
            .respond("git tag -l", "")
            .respond("git tag -l", "v1.0.0\nlatest\nv1.1.0-rc.0")
            .respond("git stash --include-untracked", "No local changes to save");
        let orchestrator = TagOrchestrator::new(
            &runner,
            args(ReleaseType::Minor, ReleaseStage::Release),
            Config::default(),
        );

        let names: Vec<String> = orchestrator
            .sync_tags()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["v1.1.0-rc.0", "v1.0.0", "v0.0.0"]);
        assert!(!runner.was_called("git stash pop"));
    }

    #[test]
    fn test_ignored_tag_warned_once_across_syncs() {
        let mut runner = MockRunner::new();
        runner
            .respond("git branch --show-current", "main")
            .respond("git tag -l", "v1.0.0\nlatest");
        let orchestrator = TagOrchestrator::new(
            &runner,
            args(ReleaseType::Minor, ReleaseStage::Release),
            Config::default(),
        );

        orchestrator.sync_tags().unwrap();
        orchestrator.sync_tags().unwrap();
        assert_eq!(
            orchestrator.ignored_tags.borrow().iter().collect::<Vec<_>>(),
            vec!["latest"]
        );
    }

    #[test]
    fn test_create_tag_replaces_slashes() {
        let mut runner = MockRunner::new();
        runner.respond("git branch --show-current", "story/12");
        let orchestrator = TagOrchestrator::new(
            &runner,
            args(ReleaseType::Patch, ReleaseStage::Stage),
            Config::default(),
        );

        let tag = orchestrator.create_tag("v1.0.1-story/12.0").unwrap();
        assert_eq!(tag, "v1.0.1-story-12.0");
        assert!(runner.was_called("git push --no-verify origin v1.0.1-story-12.0"));
    }
}
