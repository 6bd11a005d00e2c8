//! Generation of the javadoc link options file for one source set.
//!
//! The [`LinkSetBuilder`] turns the three resolved [`ArtifactViews`] of a
//! source set into the directive lines consumed by the javadoc tool:
//!
//! - `-link <url>` for a dependency whose docs are only available online
//! - `-linkoffline <url> <dir>` when the dependency's javadoc archive was
//!   resolved too; the archive is unpacked into `<dir>` so javadoc reads the
//!   package index locally and only the rendered links point at `<url>`
//! - `-sourcepath <path>` for every sources artifact
//!
//! Lines are sorted before writing, so the file content depends only on the
//! set of inputs and not on the order the host resolved them in.
//!
//! # Outputs
//!
//! Both outputs are regenerated on every run. The options file is deleted
//! before any work starts and written atomically once every directive is
//! known; the unpack directory is wiped and recreated. When an availability
//! check fails the run aborts and no options file exists afterwards.

pub mod archive;

pub use archive::extract_archive;

use crate::constants::DEFAULT_JAVADOC_PROVIDER;
use crate::core::LinksError;
use crate::filter::DependencyFilter;
use crate::model::{ArtifactViews, DependencyId, ResolvedArtifact};
use crate::probe::{Availability, AvailabilityProber};
use crate::rules::RuleSet;
use crate::utils::{self, ProgressBar};
use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Link policy shared by every source set of one invocation.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Template for dependencies no override rule matches.
    pub default_template: String,
    /// Probe every link before writing it.
    pub check_availability: bool,
    /// Coordinate prefixes that never produce a link.
    pub skip: Vec<String>,
    /// Dependencies rejected here never produce a link.
    pub filter: DependencyFilter,
    /// Ordered override rules.
    pub rules: RuleSet,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            default_template: DEFAULT_JAVADOC_PROVIDER.to_string(),
            check_availability: true,
            skip: Vec::new(),
            filter: DependencyFilter::default(),
            rules: RuleSet::with_defaults(),
        }
    }
}

impl LinkSettings {
    /// Whether `id` should be linked at all.
    pub fn accepts(&self, id: &DependencyId) -> bool {
        self.filter.test(id) && !self.is_skipped(id)
    }

    /// Whether the coordinates of `id` start with a skip prefix.
    pub fn is_skipped(&self, id: &DependencyId) -> bool {
        let coordinates = id.coordinates();
        self.skip.iter().any(|prefix| coordinates.starts_with(prefix.as_str()))
    }

    /// Link for `id` according to the rules and default template.
    pub fn resolve(&self, id: &DependencyId) -> String {
        self.rules.resolve(&self.default_template, id)
    }
}

/// Where one source set's outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutput {
    /// The options file.
    pub links_file: PathBuf,
    /// Parent of the per-dependency unpack directories.
    pub unpack_dir: PathBuf,
}

/// What a run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkSummary {
    /// `-link` lines.
    pub remote_links: usize,
    /// `-linkoffline` lines.
    pub offline_links: usize,
    /// `-sourcepath` lines.
    pub source_paths: usize,
    /// API artifacts that produced no link: local, filtered or skipped.
    pub skipped: usize,
}

impl LinkSummary {
    pub const fn total_lines(&self) -> usize {
        self.remote_links + self.offline_links + self.source_paths
    }
}

/// A dependency that passed filtering, with its resolved link.
struct Candidate<'a> {
    id: &'a DependencyId,
    link: String,
}

/// Computes and writes the options file of one source set.
#[derive(Debug, Clone)]
pub struct LinkSetBuilder {
    settings: Arc<LinkSettings>,
    prober: Arc<AvailabilityProber>,
    progress: ProgressBar,
}

impl LinkSetBuilder {
    pub fn new(settings: Arc<LinkSettings>, prober: Arc<AvailabilityProber>) -> Self {
        Self {
            settings,
            prober,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports each step on `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Generates the options file for `views` into `output`.
    pub async fn build(&self, views: &ArtifactViews, output: &LinkOutput) -> Result<LinkSummary> {
        utils::remove_file_if_exists(&output.links_file)?;
        utils::reset_dir(&output.unpack_dir)?;

        let mut summary = LinkSummary::default();
        let candidates = self.select(&views.api, &mut summary);

        if self.settings.check_availability {
            self.check_all(&candidates).await?;
        }

        let javadocs: HashMap<&DependencyId, &ResolvedArtifact> = views
            .javadoc
            .iter()
            .filter_map(|artifact| artifact.id.as_ref().map(|id| (id, artifact)))
            .collect();

        let mut lines = Vec::with_capacity(candidates.len() + views.sources.len());
        for candidate in &candidates {
            match javadocs.get(candidate.id) {
                Some(javadoc) => {
                    self.progress.set_message(format!("unpacking {}", candidate.id));
                    let target = output.unpack_dir.join(candidate.id.unpack_dir_name());
                    extract_archive(&javadoc.file, &target).await?;
                    let target = utils::absolute(&target)?;
                    debug!(target: "links", "{} -> {} (offline, {})", candidate.id, candidate.link, target.display());
                    lines.push(format!("-linkoffline {} {}", candidate.link, target.display()));
                    summary.offline_links += 1;
                }
                None => {
                    debug!(target: "links", "{} -> {}", candidate.id, candidate.link);
                    lines.push(format!("-link {}", candidate.link));
                    summary.remote_links += 1;
                }
            }
        }

        for sources in &views.sources {
            let path = utils::absolute(&sources.file)?;
            lines.push(format!("-sourcepath {}", path.display()));
            summary.source_paths += 1;
        }

        // Duplicates are kept: one line per linked artifact.
        lines.sort();
        let content = lines.join("\n");
        utils::atomic_write(&output.links_file, content.as_bytes())?;

        info!(
            target: "links",
            "Wrote {} ({} links, {} offline, {} source paths, {} skipped)",
            output.links_file.display(),
            summary.remote_links,
            summary.offline_links,
            summary.source_paths,
            summary.skipped
        );
        Ok(summary)
    }

    fn select<'a>(&self, api: &'a [ResolvedArtifact], summary: &mut LinkSummary) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::with_capacity(api.len());
        for artifact in api {
            let Some(id) = &artifact.id else {
                debug!(target: "links", "Skipping {}: not an external module", artifact.file.display());
                summary.skipped += 1;
                continue;
            };
            if !self.settings.accepts(id) {
                debug!(target: "links", "Skipping {}: excluded", id);
                summary.skipped += 1;
                continue;
            }
            candidates.push(Candidate {
                id,
                link: self.settings.resolve(id),
            });
        }
        candidates
    }

    /// Probes every distinct link concurrently; the first failing candidate
    /// in input order is reported.
    async fn check_all(&self, candidates: &[Candidate<'_>]) -> Result<(), LinksError> {
        self.progress.set_message(format!("checking {} links", candidates.len()));
        let results = join_all(candidates.iter().map(|c| self.prober.is_available(&c.link))).await;

        for (candidate, availability) in candidates.iter().zip(results) {
            if let Availability::Unavailable(report) = availability {
                return Err(LinksError::AvailabilityCheckFailed {
                    link: candidate.link.clone(),
                    coordinates: candidate.id.coordinates(),
                    report,
                });
            }
        }
        Ok(())
    }
}
