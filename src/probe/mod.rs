//! Build-scoped availability checks for documentation hosts.
//!
//! Before a link is written, the [`AvailabilityProber`] confirms that the
//! resolved base URL actually serves a javadoc index (`element-list` or
//! `package-list`). Results are memoized per URL for the lifetime of the
//! prober, which is created once per invocation and shared by every module
//! processed in it, so a host linked from many modules is probed once.
//!
//! # State machine
//!
//! For each distinct base URL:
//! - **Uncached**: probe every index path; any `200` makes the URL available.
//! - **Forbidden on a primeable host**: when every probe returned `403` and the
//!   URL starts with the policy's priming prefix, a priming request is sent to
//!   the derived static URL, the prober waits [`ProbePolicy::retry_delay`] and
//!   runs the probe cycle again, for at most [`ProbePolicy::max_attempts`]
//!   cycles in total.
//! - **Unavailable**: anything else, or retries exhausted. The
//!   [`ProbeReport`] keeps every probed URL with its status or error.
//!
//! # Concurrency
//!
//! The cache maps each URL to a [`tokio::sync::OnceCell`]. Concurrent first
//! callers for the same URL wait on the same cell, so the network work for a
//! URL happens once no matter how many modules ask for it in parallel.

pub mod transport;

pub use transport::{HttpTransport, ProbeTransport};

use crate::constants::{
    DEFAULT_MAX_PROBE_ATTEMPTS, DEFAULT_PRIMING_PREFIX, DEFAULT_PRIMING_REPLACEMENT,
    DEFAULT_PROBE_TIMEOUT, DEFAULT_RETRY_DELAY, PROBE_PATHS,
};
use crate::core::LinksError;
use dashmap::DashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, warn};

/// Status code that triggers the priming path.
const HTTP_FORBIDDEN: u16 = 403;
const HTTP_OK: u16 = 200;

/// Cache-priming rule for a documentation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priming {
    /// Base URLs starting with this prefix are eligible for priming.
    pub prefix: String,
    /// The prefix is replaced with this to build the priming URL.
    pub replacement: String,
}

impl Priming {
    /// Priming URL for `base`, if the host matches.
    #[must_use]
    pub fn priming_url(&self, base: &str) -> Option<String> {
        base.strip_prefix(self.prefix.as_str()).map(|rest| format!("{}{rest}", self.replacement))
    }
}

/// Retry and timeout parameters of the prober.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePolicy {
    /// Probe cycles attempted for a primeable host, including the first.
    pub max_attempts: u32,
    /// Wait between a priming request and the next cycle.
    pub retry_delay: Duration,
    /// Timeout of each HTTP request.
    pub timeout: Duration,
    /// Host-specific priming, `None` to never retry.
    pub priming: Option<Priming>,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_PROBE_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: DEFAULT_PROBE_TIMEOUT,
            priming: Some(Priming {
                prefix: DEFAULT_PRIMING_PREFIX.to_string(),
                replacement: DEFAULT_PRIMING_REPLACEMENT.to_string(),
            }),
        }
    }
}

/// Result of a single probe request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeOutcome {
    /// A response arrived with this status code.
    Status(u16),
    /// No response; the transport error message.
    Error(String),
}

/// A probed URL that did not answer `200`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    /// Full URL of the index file.
    pub url: String,
    /// What came back.
    pub outcome: ProbeOutcome,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Status(code) => write!(f, "Got {code} response code from {}", self.url),
            ProbeOutcome::Error(message) => {
                write!(f, "Error getting response from {}: {message}", self.url)
            }
        }
    }
}

/// Diagnostics for a URL that could not be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Normalized base URL.
    pub url: String,
    /// Probe cycles performed.
    pub attempts: u32,
    /// Failures of the last cycle, one per index path.
    pub failures: Vec<ProbeFailure>,
    /// Extra context, e.g. exhausted retries or a failed priming request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not locate element-list or package-list for docs: '{}'", self.url)?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        if let Some(note) = &self.note {
            write!(f, "\n  ({note})")?;
        }
        Ok(())
    }
}

/// Memoized availability of a documentation URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// An index file answered `200`.
    Available,
    /// Nothing answered `200`; see the report.
    Unavailable(Arc<ProbeReport>),
}

impl Availability {
    /// Whether the URL was confirmed.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Why a probe cycle did not confirm the URL.
#[derive(Debug)]
enum CycleError {
    /// All probes were forbidden and the host was primed; worth another cycle.
    Primed(Vec<ProbeFailure>),
    /// All probes were forbidden on a primeable host, but no attempts are left.
    Exhausted(Vec<ProbeFailure>),
    /// The priming request itself could not be sent.
    PrimingFailed(Vec<ProbeFailure>, String),
    /// Plain failure, no retry.
    Failed(Vec<ProbeFailure>),
}

/// Shared, memoizing availability checker.
pub struct AvailabilityProber {
    transport: Arc<dyn ProbeTransport>,
    policy: ProbePolicy,
    cache: DashMap<String, Arc<OnceCell<Availability>>>,
}

impl fmt::Debug for AvailabilityProber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityProber")
            .field("policy", &self.policy)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl AvailabilityProber {
    /// Creates a prober over an arbitrary transport.
    pub fn new(transport: Arc<dyn ProbeTransport>, policy: ProbePolicy) -> Self {
        Self {
            transport,
            policy,
            cache: DashMap::new(),
        }
    }

    /// Creates a prober backed by [`HttpTransport`] using the policy's timeout.
    pub fn http(policy: ProbePolicy) -> Result<Self, LinksError> {
        let transport = HttpTransport::new(policy.timeout)?;
        Ok(Self::new(Arc::new(transport), policy))
    }

    /// Number of URLs with a cache entry.
    #[must_use]
    pub fn cached_urls(&self) -> usize {
        self.cache.len()
    }

    /// Cached result for `url`, without probing.
    #[must_use]
    pub fn cached(&self, url: &str) -> Option<Availability> {
        self.cache.get(&normalize_base(url)).and_then(|cell| cell.get().cloned())
    }

    /// Checks whether `url` serves javadoc, probing at most once per URL.
    pub async fn is_available(&self, url: &str) -> Availability {
        let base = normalize_base(url);
        // Clone the cell out so no map shard lock is held across the await.
        let cell = Arc::clone(self.cache.entry(base.clone()).or_default().value());
        cell.get_or_init(|| self.check(&base)).await.clone()
    }

    async fn check(&self, base: &str) -> Availability {
        let max_attempts = self.policy.max_attempts.max(1);
        let strategy = FixedInterval::new(self.policy.retry_delay).take(max_attempts as usize - 1);

        let mut attempt = 0u32;
        let result = RetryIf::spawn(
            strategy,
            || {
                attempt += 1;
                self.probe_cycle(base, attempt < max_attempts)
            },
            |e: &CycleError| matches!(e, CycleError::Primed(_)),
        )
        .await;

        let (failures, note) = match result {
            Ok(()) => return Availability::Available,
            Err(CycleError::Primed(failures) | CycleError::Exhausted(failures)) => (
                failures,
                Some(format!("still not available after {attempt} attempts")),
            ),
            Err(CycleError::PrimingFailed(failures, reason)) => {
                (failures, Some(format!("priming request failed: {reason}")))
            }
            Err(CycleError::Failed(failures)) => (failures, None),
        };

        let report = ProbeReport {
            url: base.to_string(),
            attempts: attempt,
            failures,
            note,
        };
        error!(target: "probe", "{}", report);
        Availability::Unavailable(Arc::new(report))
    }

    /// Probes every index path once.
    ///
    /// `may_retry` is false on the final attempt so no priming request is sent
    /// when its result could not be used.
    async fn probe_cycle(&self, base: &str, may_retry: bool) -> Result<(), CycleError> {
        let mut failures = Vec::with_capacity(PROBE_PATHS.len());
        for path in PROBE_PATHS {
            let url = format!("{base}{path}");
            match self.transport.status(&url).await {
                Ok(HTTP_OK) => {
                    debug!(target: "probe", "Found javadoc index at {}", url);
                    return Ok(());
                }
                Ok(code) => failures.push(ProbeFailure {
                    url,
                    outcome: ProbeOutcome::Status(code),
                }),
                Err(err) => failures.push(ProbeFailure {
                    url,
                    outcome: ProbeOutcome::Error(format!("{err:#}")),
                }),
            }
        }

        let all_forbidden =
            failures.iter().all(|f| f.outcome == ProbeOutcome::Status(HTTP_FORBIDDEN));
        let priming_url = if all_forbidden {
            self.policy.priming.as_ref().and_then(|p| p.priming_url(base))
        } else {
            None
        };
        let Some(priming_url) = priming_url else {
            return Err(CycleError::Failed(failures));
        };
        if !may_retry {
            return Err(CycleError::Exhausted(failures));
        }

        warn!(
            target: "probe",
            "Got 403 for element-list and package-list of '{}', will attempt to prime docs and then retry in {:?}...",
            base,
            self.policy.retry_delay
        );
        match self.transport.status(&priming_url).await {
            Ok(HTTP_OK) => Err(CycleError::Primed(failures)),
            Ok(code) => {
                error!(
                    target: "probe",
                    "Attempt to prime docs via '{}' returned response code {}",
                    priming_url,
                    code
                );
                Err(CycleError::Primed(failures))
            }
            Err(err) => {
                error!(target: "probe", "Failed to prime javadocs at '{}': {:#}", priming_url, err);
                Err(CycleError::PrimingFailed(failures, format!("{err:#}")))
            }
        }
    }
}

/// Appends a trailing `/` so index paths can be concatenated.
#[must_use]
pub fn normalize_base(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
