//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod release;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use release::{ReleaseStage, ReleaseType};
pub use tag::{plan_next_tag, sort_tags, superseded_tags, ReleasePlan, Tag};
pub use version::{is_pure_tag, Version};
