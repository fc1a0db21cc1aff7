//! User interface module - console output for a release run.
//!
//! tag-release never prompts; everything here only prints.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_deleted_tags, display_failure, display_proposed_tag,
    display_status, display_success, format_tag_list,
};
