//! `probe`: run the availability check against arbitrary URLs.

use super::{CliConfig, OutputFormat};
use crate::config::LinksConfig;
use crate::probe::{Availability, AvailabilityProber, ProbeReport};
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

/// Check documentation URLs for an element-list or package-list.
#[derive(Args, Debug)]
pub struct ProbeCommand {
    /// Documentation base URLs.
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ProbeResult {
    url: String,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Arc<ProbeReport>>,
}

impl ProbeCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let links_config = LinksConfig::load(config.config_path.as_deref(), &cwd).await?;
        let prober = AvailabilityProber::http(links_config.probe.policy()?)?;
        self.run(&prober).await
    }

    async fn run(self, prober: &AvailabilityProber) -> Result<()> {
        let availability = join_all(self.urls.iter().map(|url| prober.is_available(url))).await;
        let results: Vec<ProbeResult> = self
            .urls
            .into_iter()
            .zip(availability)
            .map(|(url, availability)| match availability {
                Availability::Available => ProbeResult {
                    url,
                    available: true,
                    report: None,
                },
                Availability::Unavailable(report) => ProbeResult {
                    url,
                    available: false,
                    report: Some(report),
                },
            })
            .collect();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Text => {
                for result in &results {
                    match &result.report {
                        None => println!("{} {}", "✓".green(), result.url),
                        Some(report) => println!("{} {}", "✗".red(), report),
                    }
                }
            }
        }

        let unavailable = results.iter().filter(|r| !r.available).count();
        if unavailable > 0 {
            bail!("{unavailable} of {} documentation URLs are unavailable", results.len());
        }
        Ok(())
    }
}
