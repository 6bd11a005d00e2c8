//! `generate`: write the javadoc options file for resolution files.
//!
//! All resolution files of one invocation share a single
//! [`AvailabilityProber`], so a documentation host linked from several source
//! sets is probed once. Files are processed concurrently; a failure in one
//! does not stop the others, but the command exits with an error if any
//! file failed.

use super::CliConfig;
use crate::config::LinksConfig;
use crate::core::user_friendly_error;
use crate::links::{LinkOutput, LinkSetBuilder, LinkSettings, LinkSummary};
use crate::probe::{AvailabilityProber, ProbePolicy};
use crate::resolution::Resolution;
use crate::utils::MultiProgress;
use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Generate the options file for one or more resolution files.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Resolution files written by the build tool.
    #[arg(required = true, value_name = "RESOLUTION")]
    resolutions: Vec<PathBuf>,

    /// Skip the availability check of documentation hosts.
    #[arg(long)]
    no_check: bool,
}

impl GenerateCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let links_config = LinksConfig::load(config.config_path.as_deref(), &cwd).await?;
        let mut settings = links_config.settings()?;
        if self.no_check {
            settings.check_availability = false;
        }
        let policy = links_config.probe.policy()?;
        self.run(settings, policy, config).await
    }

    async fn run(self, settings: LinkSettings, policy: ProbePolicy, config: &CliConfig) -> Result<()> {
        let prober = Arc::new(AvailabilityProber::http(policy)?);
        let settings = Arc::new(settings);
        if !settings.check_availability {
            info!("Javadoc availability checks are disabled");
        }

        let results = generate_all(&self.resolutions, &settings, &prober, config.progress_enabled()).await;

        let mut failed = 0;
        for (path, result) in self.resolutions.iter().zip(results) {
            match result {
                Ok((output, summary)) => {
                    if !config.quiet {
                        print_summary(path, &output, &summary);
                    }
                }
                Err(err) => {
                    failed += 1;
                    user_friendly_error(err).display();
                }
            }
        }

        if failed > 0 {
            bail!("Link generation failed for {failed} of {} resolution files", self.resolutions.len());
        }
        Ok(())
    }
}

/// Builds every resolution file concurrently with one shared prober.
///
/// Results are returned in the order of `resolutions`.
pub async fn generate_all(
    resolutions: &[PathBuf],
    settings: &Arc<LinkSettings>,
    prober: &Arc<AvailabilityProber>,
    progress: bool,
) -> Vec<Result<(LinkOutput, LinkSummary)>> {
    let multi = MultiProgress::new(progress);
    let tasks = resolutions.iter().map(|path| {
        let spinner = multi.add_spinner(path.display().to_string());
        let builder =
            LinkSetBuilder::new(Arc::clone(settings), Arc::clone(prober)).with_progress(spinner.clone());
        async move {
            let result = generate_one(&builder, path).await;
            match &result {
                Ok(_) => spinner.finish_with_message("done"),
                Err(_) => spinner.finish_with_message("failed"),
            }
            result
        }
    });
    join_all(tasks).await
}

async fn generate_one(builder: &LinkSetBuilder, path: &Path) -> Result<(LinkOutput, LinkSummary)> {
    let resolution = Resolution::load(path).await?;
    let output = resolution.output();
    let summary = builder
        .build(&resolution.views(), &output)
        .await
        .with_context(|| format!("Failed to generate javadoc links for {}", path.display()))?;
    Ok((output, summary))
}

fn print_summary(path: &Path, output: &LinkOutput, summary: &LinkSummary) {
    println!(
        "{} {} -> {}",
        "✓".green(),
        path.display(),
        output.links_file.display().to_string().cyan()
    );
    println!(
        "    {} links, {} offline, {} source paths, {} skipped",
        summary.remote_links, summary.offline_links, summary.source_paths, summary.skipped
    );
}
