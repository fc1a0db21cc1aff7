pub mod orchestration;

pub use orchestration::{run_release, ReleaseArgs, ReleaseOutcome, TagOrchestrator};
