//! Pure formatting functions for console output.
//!
//! Progress lines go to stdout, warnings and failures to stderr.

use crate::boundary::BoundaryWarning;

/// Format and print a failure line in red.
pub fn display_failure(message: &str) {
    eprintln!("\x1b[31mFAILED\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Display the tag a release starts from and the tag it creates.
pub fn display_proposed_tag(previous: &str, next: &str) {
    println!("LATEST TAG (\x1b[31m{}\x1b[0m)", previous);
    println!("BUMPING TAG (\x1b[32m{}\x1b[0m)", next);
}

/// Display the remote tags about to be deleted.
pub fn display_deleted_tags(tags: &[String]) {
    println!("CLEANING UP TAGS");
    println!("DELETING REMOTE TAGS {}", format_tag_list(tags));
}

/// Render tags as `[a, b, c]`.
pub fn format_tag_list(tags: &[String]) -> String {
    format!("[{}]", tags.join(", "))
}
