//! Tag precedence and next-tag planning.
//!
//! Precedence, highest first: major, minor, patch, then an unstaged tag over
//! any staged one, `rc` over any other stage, other stages alphabetically,
//! and finally the higher iteration.

use crate::domain::branch::BranchContext;
use crate::domain::release::{ReleaseStage, ReleaseType};
use crate::domain::version::{is_pure_tag, Version};
use crate::error::Result;
use std::cmp::Ordering;

const CANDIDATE_STAGE: &str = "rc";

/// A git tag together with its parsed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub version: Version,
}

impl Tag {
    /// Parse a raw tag name
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let version = Version::parse(&name)?;
        Ok(Tag { name, version })
    }

    /// Whether this tag is a final release (no stage suffix)
    pub fn is_pure(&self) -> bool {
        is_pure_tag(&self.name)
    }
}

/// Precedence comparator: `Less` means `a` ranks ahead of `b`
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    b.major
        .cmp(&a.major)
        .then_with(|| b.minor.cmp(&a.minor))
        .then_with(|| b.patch.cmp(&a.patch))
        .then_with(|| compare_stages(a.stage.as_deref(), b.stage.as_deref()))
        .then_with(|| b.iteration.cmp(&a.iteration))
}

fn compare_stages(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) if a == b => Ordering::Equal,
        (Some(CANDIDATE_STAGE), Some(_)) => Ordering::Less,
        (Some(_), Some(CANDIDATE_STAGE)) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Sort parsed tags by precedence, most recent first (stable)
pub fn sort_parsed_tags(tags: &mut [Tag]) {
    tags.sort_by(|a, b| compare_versions(&a.version, &b.version));
}

/// Sort raw tag names by precedence, most recent first
///
/// Every name must parse; the first one that does not fails the sort.
pub fn sort_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>> {
    let mut parsed = tags
        .iter()
        .map(|t| Tag::parse(t.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    sort_parsed_tags(&mut parsed);
    Ok(parsed.into_iter().map(|t| t.name).collect())
}

/// The next tag to create and how it was derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Highest pure tag, the version that was bumped
    pub base_tag: String,
    /// Newest existing tag for the bumped version in the requested stage
    pub latest_tag: Option<String>,
    /// Bumped version without any stage
    pub bumped: Version,
    /// Number of existing tags for the bumped version in the requested stage
    pub iteration: u64,
    /// Final tag name
    pub tag: String,
}

impl ReleasePlan {
    /// The tag shown as the starting point of this release
    pub fn previous_tag(&self) -> &str {
        self.latest_tag.as_deref().unwrap_or(&self.base_tag)
    }
}

/// Compute the next tag from tags already sorted by precedence
///
/// With no pure tag at all the bump starts from `v0.0.0`. Fails when the
/// base tag's bumped field is already at its maximum.
pub fn plan_next_tag(
    sorted: &[Tag],
    release_type: ReleaseType,
    stage: ReleaseStage,
    branch: &BranchContext,
) -> Result<ReleasePlan> {
    let base = sorted.iter().find(|t| t.is_pure());
    let (base_tag, base_version) = match base {
        Some(tag) => (tag.name.clone(), tag.version.clone()),
        None => ("v0.0.0".to_string(), Version::new(0, 0, 0)),
    };
    let bumped = base_version.bump(release_type)?;

    let wanted_stage = match stage {
        ReleaseStage::Stage => branch.name.as_str(),
        ReleaseStage::Release | ReleaseStage::Candidate => CANDIDATE_STAGE,
    };
    let related: Vec<&Tag> = sorted
        .iter()
        .filter(|t| {
            !t.is_pure()
                && t.version.same_release(&bumped)
                && t.version.stage.as_deref() == Some(wanted_stage)
        })
        .collect();
    let iteration = related.len() as u64;

    let tag = match stage {
        ReleaseStage::Release => bumped.tag(),
        ReleaseStage::Candidate => format!("{}-{}.{}", bumped.tag(), CANDIDATE_STAGE, iteration),
        ReleaseStage::Stage => format!("{}-{}.{}", bumped.tag(), branch.stage_suffix(), iteration),
    };

    Ok(ReleasePlan {
        base_tag,
        latest_tag: related.first().map(|t| t.name.clone()),
        bumped,
        iteration,
        tag,
    })
}

/// Staged tags left behind for `version` once it is released
pub fn superseded_tags(sorted: &[Tag], version: &Version) -> Vec<String> {
    sorted
        .iter()
        .filter(|t| !t.is_pure() && t.version.same_release(version))
        .map(|t| t.name.clone())
        .collect()
}
