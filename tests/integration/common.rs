//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use javadoc_links::links::{LinkOutput, LinkSetBuilder, LinkSettings};
use javadoc_links::probe::{AvailabilityProber, ProbePolicy};
use javadoc_links::test_utils::FakeTransport;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Scratch build directory with a scripted documentation host.
pub struct TestBuild {
    pub temp: TempDir,
    pub transport: Arc<FakeTransport>,
}

impl TestBuild {
    pub fn new(transport: FakeTransport) -> Self {
        javadoc_links::test_utils::init_test_logging(None);
        Self {
            temp: TempDir::new().unwrap(),
            transport: Arc::new(transport),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn output(&self) -> LinkOutput {
        LinkOutput {
            links_file: self.path().join("prepareJavadocLinks/links.options"),
            unpack_dir: self.path().join("prepareJavadocLinks/unpackedJavadocs"),
        }
    }

    pub fn prober(&self) -> Arc<AvailabilityProber> {
        let policy = ProbePolicy {
            retry_delay: Duration::from_millis(1),
            ..ProbePolicy::default()
        };
        Arc::new(AvailabilityProber::new(self.transport.clone(), policy))
    }

    pub fn builder(&self, settings: LinkSettings) -> LinkSetBuilder {
        LinkSetBuilder::new(Arc::new(settings), self.prober())
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn links(&self) -> String {
        std::fs::read_to_string(self.output().links_file).unwrap()
    }
}

/// Settings with a plain documentation host and checks off.
pub fn example_settings() -> LinkSettings {
    LinkSettings {
        default_template: "https://docs.example.com/{group}/{name}/{version}".to_string(),
        check_availability: false,
        ..LinkSettings::default()
    }
}
