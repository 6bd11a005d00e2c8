//! Dependency identity and resolved artifact views.
//!
//! A [`DependencyId`] is the key used for every matching decision: filters,
//! override rules, skip prefixes and the correlation between the API, javadoc
//! and sources views all compare identifiers or their canonical
//! `group:module:version` string.
//!
//! # Snapshots
//!
//! Repositories with unique snapshots resolve `1.0-SNAPSHOT` to a timestamped
//! version such as `1.0-20240105.120000-7`. When the host reports that
//! timestamped version it is stored in [`DependencyId::snapshot_version`] and
//! takes the place of the nominal version in [`coordinates`], so cache keys and
//! filters see the concrete artifact that was resolved.

use crate::core::LinksError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Suffix of nominal snapshot versions.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Identifier of an externally resolved module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyId {
    /// Group (organisation) of the module, e.g. `com.google.guava`.
    pub group: String,
    /// Module (artifact) name, e.g. `guava`.
    pub module: String,
    /// Nominal version as declared, e.g. `33.0.0-jre` or `1.0-SNAPSHOT`.
    pub version: String,
    /// Timestamped version of a uniquely resolved snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_version: Option<String>,
}

impl DependencyId {
    /// Creates an identifier for a release (non-timestamped) version.
    pub fn new(group: impl Into<String>, module: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
            snapshot_version: None,
        }
    }

    /// Marks this identifier as a unique snapshot resolved to `snapshot_version`.
    #[must_use]
    pub fn with_snapshot_version(mut self, snapshot_version: impl Into<String>) -> Self {
        self.snapshot_version = Some(snapshot_version.into());
        self
    }

    /// The version that was actually resolved.
    #[must_use]
    pub fn resolved_version(&self) -> &str {
        self.snapshot_version.as_deref().unwrap_or(&self.version)
    }

    /// Canonical `group:module:version` string.
    #[must_use]
    pub fn coordinates(&self) -> String {
        coordinates(self)
    }

    /// Whether this identifier denotes a snapshot build.
    ///
    /// True for timestamped unique snapshots and for versions ending in `-SNAPSHOT`.
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        self.snapshot_version.is_some() || self.version.ends_with(SNAPSHOT_SUFFIX)
    }

    /// Directory name used when unpacking this dependency's javadoc archive.
    #[must_use]
    pub fn unpack_dir_name(&self) -> String {
        self.coordinates().replace(':', "_")
    }
}

/// Formats `group:module:version`, preferring the resolved snapshot version.
#[must_use]
pub fn coordinates(id: &DependencyId) -> String {
    let version = id.resolved_version();
    let mut out = String::with_capacity(id.group.len() + id.module.len() + version.len() + 2);
    out.push_str(&id.group);
    out.push(':');
    out.push_str(&id.module);
    out.push(':');
    out.push_str(version);
    out
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinates())
    }
}

impl FromStr for DependencyId {
    type Err = LinksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, module, version]
                if !group.is_empty() && !module.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *module, *version))
            }
            _ => Err(LinksError::InvalidCoordinate {
                coordinate: s.to_string(),
            }),
        }
    }
}

/// One artifact file from a resolved dependency view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Location of the artifact on disk.
    pub file: PathBuf,
    /// Identifier of the module that produced it; `None` for local project modules.
    pub id: Option<DependencyId>,
}

impl ResolvedArtifact {
    /// An artifact from an external module.
    pub fn external(file: impl Into<PathBuf>, id: DependencyId) -> Self {
        Self {
            file: file.into(),
            id: Some(id),
        }
    }

    /// An artifact produced by a module of the same build.
    pub fn local(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            id: None,
        }
    }
}

/// The three resolved views of one source set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactViews {
    /// API-surface dependencies, the ones that receive links.
    pub api: Vec<ResolvedArtifact>,
    /// Javadoc archives published for (some of) the API dependencies.
    pub javadoc: Vec<ResolvedArtifact>,
    /// Sources archives, each emitted as a `-sourcepath` directive.
    pub sources: Vec<ResolvedArtifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_release() {
        let id = DependencyId::new("com.example", "foo", "1.0");
        assert_eq!(id.coordinates(), "com.example:foo:1.0");
        assert_eq!(id.to_string(), "com.example:foo:1.0");
    }

    #[test]
    fn test_coordinates_prefer_snapshot_timestamp() {
        let id = DependencyId::new("org.incendo", "cloud-core", "2.0.0-SNAPSHOT")
            .with_snapshot_version("2.0.0-20240105.120000-7");
        assert_eq!(id.coordinates(), "org.incendo:cloud-core:2.0.0-20240105.120000-7");
        assert!(id.is_snapshot());
    }

    #[test]
    fn test_coordinates_distinguish_each_field() {
        let a = DependencyId::new("a.b", "c", "1");
        let b = DependencyId::new("a", "b.c", "1");
        let c = DependencyId::new("a.b", "c", "2");
        assert_ne!(a.coordinates(), b.coordinates());
        assert_ne!(a.coordinates(), c.coordinates());
        assert_eq!(a.coordinates(), a.coordinates());
    }

    #[test]
    fn test_is_snapshot_nominal_suffix() {
        assert!(DependencyId::new("g", "m", "1.0-SNAPSHOT").is_snapshot());
        assert!(!DependencyId::new("g", "m", "1.0").is_snapshot());
        assert!(!DependencyId::new("g", "m", "1.0-snapshot-like").is_snapshot());
    }

    #[test]
    fn test_unpack_dir_name() {
        let id = DependencyId::new("com.example", "foo", "1.0");
        assert_eq!(id.unpack_dir_name(), "com.example_foo_1.0");
    }

    #[test]
    fn test_parse_coordinate() {
        let id: DependencyId = "io.papermc.paper:paper-api:1.20.4".parse().unwrap();
        assert_eq!(id, DependencyId::new("io.papermc.paper", "paper-api", "1.20.4"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "a:b", "a:b:c:d", "a::1", ":b:1"] {
            let err = bad.parse::<DependencyId>().unwrap_err();
            assert!(matches!(err, LinksError::InvalidCoordinate { .. }), "{bad}");
        }
    }
}
