use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tag_release::cli::{run_release, ReleaseArgs};
use tag_release::config;
use tag_release::domain::{ReleaseStage, ReleaseType};
use tag_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "tag-release",
    version,
    about = "Compute, create and push the next release tag from the remote tags"
)]
struct Args {
    #[arg(
        short,
        long,
        required = true,
        help = "Kind of tag to create (release, rc, stage)"
    )]
    stage: ReleaseStage,

    #[arg(
        short = 't',
        long = "type",
        num_args = 0..=1,
        default_value = "minor",
        default_missing_value = "minor",
        help = "Version field to bump (major, minor, patch)"
    )]
    release_type: ReleaseType,

    #[arg(short, long, help = "Write the new version into package.json and push it")]
    write_to_package: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Log every git command to stderr")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "tag_release=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config =
        config::load_config(args.config.as_deref()).context("Error loading configuration")?;

    let outcome = run_release(
        ReleaseArgs {
            release_type: args.release_type,
            stage: args.stage,
            write_to_package: args.write_to_package,
        },
        config,
    )?;

    tracing::info!(
        tag = %outcome.tag,
        branch = %outcome.branch,
        deleted = outcome.deleted_tags.len(),
        manifest_updated = outcome.manifest_updated,
        "Release finished"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_failure(&format!("{:#}", e));
        std::process::exit(1);
    }
}
