//! retrodate: spread working-tree changes over backdated commits
//!
//! Repoints the configured remote, then commits every changed, deleted or
//! untracked file on its own, spread over the configured window of days.

use anyhow::{Context, Result};
use clap::Parser;
use retrodate::config::{Backend, Config};
use retrodate::{RandomEntropy, Synthesizer};
use retrodate_git::{GitCli, GitRepo, VersionControl};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;
    let settings = config.load_settings()?;
    let repo_path = config
        .repo_path()
        .context("Could not determine the current directory; pass --repo")?;

    let mut vcs: Box<dyn VersionControl> = match config.backend {
        Backend::Cli => Box::new(GitCli::discover(&repo_path)?),
        Backend::Libgit2 => Box::new(GitRepo::discover(&repo_path)?),
    };
    info!("Using repository at {}", vcs.workdir().display());

    let entropy = match config.seed {
        Some(seed) => RandomEntropy::seeded(seed),
        None => RandomEntropy::from_os(),
    };
    let mut synthesizer = Synthesizer::new(vcs.as_mut(), &settings, entropy);

    if config.dry_run {
        let schedule = synthesizer.plan(config.commits_per_day())?;
        let json = serde_json::to_string_pretty(&schedule).context("Failed to render plan")?;
        println!("{json}");
        return Ok(());
    }

    if !config.keep_remote {
        synthesizer
            .rewrite_remote()
            .context("Failed to rewrite the remote URL")?;
    }

    let report = synthesizer.run(config.commits_per_day())?;
    if !report.found_no_changes() {
        info!("{}", report.summary());
    }
    Ok(())
}
