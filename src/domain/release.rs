//! Release vocabulary: which version field to bump and which kind of tag to cut.

use crate::error::{Result, TagReleaseError};
use std::fmt;
use std::str::FromStr;

/// Version field incremented by a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseType {
    Major,
    #[default]
    Minor,
    Patch,
}

impl ReleaseType {
    pub const VARIANTS: [&'static str; 3] = ["major", "minor", "patch"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = TagReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            other => Err(TagReleaseError::invalid_argument(
                "type",
                other,
                &Self::VARIANTS,
            )),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of tag produced by a release
///
/// - `Release` -> `v1.3.0`
/// - `Candidate` -> `v1.3.0-rc.2`
/// - `Stage` -> `v1.3.0-story-1190.0`, suffixed by the current branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    Release,
    Candidate,
    Stage,
}

impl ReleaseStage {
    pub const VARIANTS: [&'static str; 3] = ["release", "rc", "stage"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStage::Release => "release",
            ReleaseStage::Candidate => "rc",
            ReleaseStage::Stage => "stage",
        }
    }
}

impl FromStr for ReleaseStage {
    type Err = TagReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "release" => Ok(ReleaseStage::Release),
            "rc" => Ok(ReleaseStage::Candidate),
            "stage" => Ok(ReleaseStage::Stage),
            other => Err(TagReleaseError::invalid_argument(
                "stage",
                other,
                &Self::VARIANTS,
            )),
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_parse() {
        assert_eq!("major".parse::<ReleaseType>().unwrap(), ReleaseType::Major);
        assert_eq!("minor".parse::<ReleaseType>().unwrap(), ReleaseType::Minor);
        assert_eq!("patch".parse::<ReleaseType>().unwrap(), ReleaseType::Patch);
    }

    #[test]
    fn test_release_type_default_is_minor() {
        assert_eq!(ReleaseType::default(), ReleaseType::Minor);
    }

    #[test]
    fn test_release_type_invalid_lists_options() {
        let err = "huge".parse::<ReleaseType>().unwrap_err();
        assert!(matches!(err, TagReleaseError::InvalidArgument { .. }));
        assert!(err.to_string().contains("major, minor, patch"));
    }

    #[test]
    fn test_release_stage_parse() {
        assert_eq!(
            "release".parse::<ReleaseStage>().unwrap(),
            ReleaseStage::Release
        );
        assert_eq!("rc".parse::<ReleaseStage>().unwrap(), ReleaseStage::Candidate);
        assert_eq!("stage".parse::<ReleaseStage>().unwrap(), ReleaseStage::Stage);
    }

    #[test]
    fn test_release_stage_is_case_sensitive() {
        assert!("RC".parse::<ReleaseStage>().is_err());
    }

    #[test]
    fn test_display_round_trips_cli_names() {
        for name in ReleaseStage::VARIANTS {
            assert_eq!(name.parse::<ReleaseStage>().unwrap().to_string(), name);
        }
    }
}
