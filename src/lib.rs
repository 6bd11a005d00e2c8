//! javadoc-links: cross-module javadoc links for JVM builds.
//!
//! Given the resolved dependencies of a source set, this crate decides which
//! dependencies get a documentation link, maps each one to its hosted
//! javadoc, optionally verifies that the host really serves a javadoc index,
//! unpacks javadoc archives for offline linking, and writes the
//! `-link`/`-linkoffline`/`-sourcepath` options file consumed by the javadoc
//! tool.
//!
//! # Architecture Overview
//!
//! The host build tool resolves three views of a source set (API classpath,
//! javadoc archives, sources archives) and hands them over in a resolution
//! file. Everything after that happens here:
//!
//! 1. [`filter`] drops snapshots and other unwanted dependencies
//! 2. [`rules`] picks the documentation URL, first matching override wins
//! 3. [`probe`] checks the URL once per invocation, priming javadoc.io when it
//!    answers 403 for docs it has not extracted yet
//! 4. [`links`] unpacks javadoc archives and writes the sorted options file
//!
//! # Core Modules
//!
//! - [`model`] - Dependency identifiers and resolved artifacts
//! - [`filter`] - Dependency filters
//! - [`rules`] - Link override rules and template substitution
//! - [`probe`] - Memoized availability checks with retry and priming
//! - [`links`] - The options file builder
//! - [`resolution`] - Resolution files written by the build tool
//! - [`config`] - Project and global configuration
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - File and progress helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use javadoc_links::links::{LinkOutput, LinkSetBuilder, LinkSettings};
//! use javadoc_links::model::{ArtifactViews, DependencyId, ResolvedArtifact};
//! use javadoc_links::probe::{AvailabilityProber, ProbePolicy};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let prober = Arc::new(AvailabilityProber::http(ProbePolicy::default())?);
//! let builder = LinkSetBuilder::new(Arc::new(LinkSettings::default()), prober);
//!
//! let views = ArtifactViews {
//!     api: vec![ResolvedArtifact::external(
//!         "libs/guava-33.0.0-jre.jar",
//!         DependencyId::new("com.google.guava", "guava", "33.0.0-jre"),
//!     )],
//!     ..ArtifactViews::default()
//! };
//! let output = LinkOutput {
//!     links_file: "build/links.options".into(),
//!     unpack_dir: "build/unpackedJavadocs".into(),
//! };
//! let summary = builder.build(&views, &output).await?;
//! println!("{} links written", summary.total_lines());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod filter;
pub mod links;
pub mod model;
pub mod probe;
pub mod resolution;
pub mod rules;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
