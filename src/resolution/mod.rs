//! Resolution files: the hand-off from the host build tool.
//!
//! The host resolves the API, javadoc and sources views of one source set and
//! writes them to a TOML document. Each entry names a file and, for
//! dependencies that come from a repository, its module coordinates. Entries
//! without coordinates (project outputs, local jars) are kept as local
//! artifacts so they can still contribute source paths.
//!
//! ```toml
//! output = "build/tmp/prepareJavadocLinks/links.options"
//! unpack-dir = "build/tmp/prepareJavadocLinks/unpackedJavadocs"
//!
//! [[api]]
//! file = "/home/user/.m2/repository/com/example/foo/1.0/foo-1.0.jar"
//! group = "com.example"
//! module = "foo"
//! version = "1.0"
//!
//! [[sources]]
//! file = "src/main/java"
//! ```
//!
//! Relative paths are resolved against the directory containing the
//! resolution file.

use crate::constants::{LINKS_FILE_NAME, UNPACK_DIR_NAME};
use crate::core::LinksError;
use crate::links::LinkOutput;
use crate::model::{ArtifactViews, DependencyId, ResolvedArtifact};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One resolved file as written by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArtifactEntry {
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_version: Option<String>,
}

impl ArtifactEntry {
    /// Module identity, if all three coordinates are present.
    pub fn id(&self) -> Option<DependencyId> {
        match (&self.group, &self.module, &self.version) {
            (Some(group), Some(module), Some(version)) => {
                let id = DependencyId::new(group, module, version);
                Some(match &self.snapshot_version {
                    Some(snapshot) => id.with_snapshot_version(snapshot),
                    None => id,
                })
            }
            _ => None,
        }
    }
}

/// Parsed resolution file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResolutionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpack_dir: Option<PathBuf>,
    #[serde(default)]
    pub api: Vec<ArtifactEntry>,
    #[serde(default)]
    pub javadoc: Vec<ArtifactEntry>,
    #[serde(default)]
    pub sources: Vec<ArtifactEntry>,
}

/// A resolution file together with the directory its paths are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Where the file was read from.
    pub path: PathBuf,
    pub file: ResolutionFile,
}

impl ResolutionFile {
    /// Parses TOML content; `origin` only appears in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, LinksError> {
        toml::from_str(content).map_err(|e| LinksError::ResolutionParseError {
            file: origin.display().to_string(),
            reason: e.message().to_string(),
        })
    }
}

impl Resolution {
    /// Reads and parses the resolution file at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read resolution file: {}", path.display()))?;
        let file = ResolutionFile::parse(&content, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    fn artifacts(&self, entries: &[ArtifactEntry]) -> Vec<ResolvedArtifact> {
        entries
            .iter()
            .map(|entry| ResolvedArtifact {
                file: self.resolve_path(&entry.file),
                id: entry.id(),
            })
            .collect()
    }

    /// The three views with paths resolved.
    pub fn views(&self) -> ArtifactViews {
        ArtifactViews {
            api: self.artifacts(&self.file.api),
            javadoc: self.artifacts(&self.file.javadoc),
            sources: self.artifacts(&self.file.sources),
        }
    }

    /// Output locations, defaulting to siblings of the resolution file.
    pub fn output(&self) -> LinkOutput {
        let links_file = match &self.file.output {
            Some(path) => self.resolve_path(path),
            None => self.base_dir().join(LINKS_FILE_NAME),
        };
        let unpack_dir = match &self.file.unpack_dir {
            Some(path) => self.resolve_path(path),
            None => self.base_dir().join(UNPACK_DIR_NAME),
        };
        LinkOutput {
            links_file,
            unpack_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
output = "out/links.options"

[[api]]
file = "libs/foo-1.0.jar"
group = "com.example"
module = "foo"
version = "1.0"

[[api]]
file = "/abs/bar.jar"
group = "com.example"
module = "bar"
version = "2.0-SNAPSHOT"
snapshot-version = "2.0-20240101.101010-3"

[[api]]
file = "build/classes"

[[sources]]
file = "src/main/java"
"#;

    #[tokio::test]
    async fn test_load_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let resolution = Resolution::load(&path).await.unwrap();
        let views = resolution.views();

        assert_eq!(views.api.len(), 3);
        assert_eq!(views.api[0].file, temp.path().join("libs/foo-1.0.jar"));
        assert_eq!(views.api[0].id, Some(DependencyId::new("com.example", "foo", "1.0")));
        assert_eq!(views.api[1].file, PathBuf::from("/abs/bar.jar"));
        assert_eq!(
            views.api[1].id.as_ref().map(DependencyId::coordinates).as_deref(),
            Some("com.example:bar:2.0-20240101.101010-3")
        );
        assert_eq!(views.api[2].id, None);
        assert_eq!(views.sources[0].file, temp.path().join("src/main/java"));
        assert!(views.javadoc.is_empty());

        let output = resolution.output();
        assert_eq!(output.links_file, temp.path().join("out/links.options"));
        assert_eq!(output.unpack_dir, temp.path().join("unpackedJavadocs"));
    }

    #[test]
    fn test_partial_coordinates_are_local() {
        let entry = ArtifactEntry {
            file: PathBuf::from("x.jar"),
            group: Some("com.example".to_string()),
            module: None,
            version: Some("1.0".to_string()),
            snapshot_version: None,
        };
        assert_eq!(entry.id(), None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = ResolutionFile::parse("[[api]]\nfile = 3\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, LinksError::ResolutionParseError { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ResolutionFile::parse("outputs = \"x\"\n", Path::new("r.toml")).is_err());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Resolution::load(&temp.path().join("nope.toml")).await.unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
