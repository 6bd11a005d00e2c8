//! Test utilities for javadoc-links
//!
//! Helpers shared by unit tests and the integration test target (through the
//! `test-utils` feature): logging setup, an in-memory [`ProbeTransport`] with
//! scripted responses, and builders for javadoc archives and resolution files.
//!
//! # Example
//!
//! ```rust,no_run
//! use javadoc_links::probe::{AvailabilityProber, ProbePolicy};
//! use javadoc_links::test_utils::FakeTransport;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let transport = Arc::new(
//!     FakeTransport::new().with_status("https://docs.example.com/foo/element-list", 200),
//! );
//! let prober = AvailabilityProber::new(transport.clone(), ProbePolicy::default());
//! assert!(prober.is_available("https://docs.example.com/foo").await.is_available());
//! assert_eq!(transport.total_calls(), 1);
//! # }
//! ```

use crate::probe::ProbeTransport;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, Once};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if it is set; with neither,
/// logging stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=probe=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

#[derive(Debug, Clone)]
enum Scripted {
    Status(u16),
    Error(String),
}

/// In-memory [`ProbeTransport`] answering from a script.
///
/// Each URL maps to a queue of responses; the last response of a queue is
/// repeated once the others are used up. URLs without a script get the
/// default status (404 unless changed). Every request is recorded.
#[derive(Debug)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    default_status: u16,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            default_status: 404,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer `url` with `code`.
    pub fn with_status(self, url: impl Into<String>, code: u16) -> Self {
        self.script(url, [Scripted::Status(code)])
    }

    /// Answer `url` with `codes` in order, repeating the last one.
    pub fn with_sequence(self, url: impl Into<String>, codes: impl IntoIterator<Item = u16>) -> Self {
        self.script(url, codes.into_iter().map(Scripted::Status))
    }

    /// Fail every request to `url` without a response.
    pub fn with_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.script(url, [Scripted::Error(message.into())])
    }

    /// Status for URLs without a script.
    pub fn with_default_status(mut self, code: u16) -> Self {
        self.default_status = code;
        self
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn script(self, url: impl Into<String>, responses: impl IntoIterator<Item = Scripted>) -> Self {
        self.scripts.lock().unwrap().insert(url.into(), responses.into_iter().collect());
        self
    }

    /// Number of requests sent to any URL.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of requests sent to `url`.
    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|called| called.as_str() == url).count()
    }

    fn next_response(&self, url: &str) -> Scripted {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => {
                queue.pop_front().unwrap_or(Scripted::Status(self.default_status))
            }
            Some(queue) => queue.front().cloned().unwrap_or(Scripted::Status(self.default_status)),
            None => Scripted::Status(self.default_status),
        }
    }
}

#[async_trait]
impl ProbeTransport for FakeTransport {
    async fn status(&self, url: &str) -> Result<u16> {
        self.calls.lock().unwrap().push(url.to_string());
        let response = self.next_response(url);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match response {
            Scripted::Status(code) => Ok(code),
            Scripted::Error(message) => Err(anyhow!(message)),
        }
    }
}

/// Writes a zip archive at `path` holding `entries` as `(name, content)` pairs.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Minimal javadoc jar for `package`, as produced by the javadoc tool.
pub fn write_javadoc_jar(path: &Path, package: &str) {
    let page = format!("{}/package-summary.html", package.replace('.', "/"));
    write_zip(path, &[("element-list", &format!("{package}\n")), (&page, "<html></html>")]);
}
