use crate::domain::release::ReleaseType;
use crate::error::{Result, TagReleaseError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:v)?([0-9]+)\.([0-9]+)\.([0-9]+)(?:-(\S+)\.([0-9]+))?$")
        .expect("version pattern is valid")
});

static PURE_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:v)?[0-9]+\.[0-9]+\.[0-9]+$").expect("pure tag pattern is valid")
});

/// Version parsed from a release tag
///
/// `stage` is the tag suffix with every `-` turned into `/`, so
/// `v0.0.1-story-1190-20.15` has stage `story/1190/20` and iteration 15.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub stage: Option<String>,
    pub iteration: u64,
}

impl Version {
    /// Create an unstaged version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            stage: None,
            iteration: 0,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3-rc.4")
    pub fn parse(tag: &str) -> Result<Self> {
        let caps = VERSION_PATTERN
            .captures(tag)
            .ok_or_else(|| TagReleaseError::invalid_version(tag))?;

        let number = |idx: usize| -> Result<u64> {
            caps.get(idx)
                .map_or(Ok(0), |m| m.as_str().parse::<u64>())
                .map_err(|_| TagReleaseError::invalid_version(tag))
        };

        Ok(Version {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            stage: caps.get(4).map(|m| m.as_str().replace('-', "/")),
            iteration: number(5)?,
        })
    }

    /// Bump the field named by `release_type`, zeroing the fields below it
    ///
    /// The result is always an unstaged version. A field already at
    /// `u64::MAX` cannot be bumped and fails with `InvalidVersionFormat`.
    pub fn bump(&self, release_type: ReleaseType) -> Result<Self> {
        let next = |field: u64| {
            field
                .checked_add(1)
                .ok_or_else(|| TagReleaseError::invalid_version(self.tag()))
        };
        Ok(match release_type {
            ReleaseType::Major => Version::new(next(self.major)?, 0, 0),
            ReleaseType::Minor => Version::new(self.major, next(self.minor)?, 0),
            ReleaseType::Patch => Version::new(self.major, self.minor, next(self.patch)?),
        })
    }

    /// True when both versions share major.minor.patch, whatever their stage
    pub fn same_release(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Tag name for this version, with the conventional `v` prefix
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl FromStr for Version {
    type Err = TagReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(stage) = &self.stage {
            write!(f, "-{}.{}", stage.replace('/', "-"), self.iteration)?;
        }
        Ok(())
    }
}

/// Whether a tag is a final release: `[v]MAJOR.MINOR.PATCH` and nothing else
pub fn is_pure_tag(tag: &str) -> bool {
    PURE_TAG_PATTERN.is_match(tag)
}
