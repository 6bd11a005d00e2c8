//! `resolve`: show where dependencies link to, without touching the network.

use super::{CliConfig, OutputFormat};
use crate::config::LinksConfig;
use crate::links::LinkSettings;
use crate::model::DependencyId;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

/// Print the documentation link of dependency coordinates.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Coordinates as `group:module:version`.
    #[arg(required = true, value_name = "COORDINATE")]
    pub(crate) coordinates: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

/// How one coordinate was treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateStatus {
    /// A link would be written.
    Linked,
    /// Rejected by the global filter.
    Filtered,
    /// Matches a skip prefix.
    Excluded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedCoordinate {
    pub coordinates: String,
    pub status: CoordinateStatus,
    /// The link, also reported for filtered dependencies.
    pub link: String,
}

/// Resolves every coordinate against `settings`.
///
/// Fails on the first coordinate that does not parse.
pub fn resolve_coordinates(
    settings: &LinkSettings,
    coordinates: &[String],
) -> Result<Vec<ResolvedCoordinate>> {
    coordinates
        .iter()
        .map(|raw| -> Result<ResolvedCoordinate> {
            let id: DependencyId = raw.parse()?;
            let status = if !settings.filter.test(&id) {
                CoordinateStatus::Filtered
            } else if settings.is_skipped(&id) {
                CoordinateStatus::Excluded
            } else {
                CoordinateStatus::Linked
            };
            Ok(ResolvedCoordinate {
                coordinates: id.coordinates(),
                status,
                link: settings.resolve(&id),
            })
        })
        .collect()
}

impl ResolveCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let links_config = LinksConfig::load(config.config_path.as_deref(), &cwd).await?;
        let settings = links_config.settings()?;
        let resolved = resolve_coordinates(&settings, &self.coordinates)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
            OutputFormat::Text => {
                for entry in &resolved {
                    match entry.status {
                        CoordinateStatus::Linked => {
                            println!("{} {} -> {}", "✓".green(), entry.coordinates, entry.link.cyan());
                        }
                        CoordinateStatus::Filtered => println!(
                            "{} {} {}",
                            "-".yellow(),
                            entry.coordinates,
                            "(filtered, no link)".dimmed()
                        ),
                        CoordinateStatus::Excluded => println!(
                            "{} {} {}",
                            "-".yellow(),
                            entry.coordinates,
                            "(excluded, no link)".dimmed()
                        ),
                    }
                }
            }
        }
        Ok(())
    }
}
