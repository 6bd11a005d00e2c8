//! Global constants used throughout the javadoc-links codebase.
//!
//! This module contains default URLs, probe parameters, file names and other
//! values that are shared across modules. Defining them centrally keeps the
//! probe policy and output layout discoverable in one place.

use std::time::Duration;

/// Link template used when no override rule matches a dependency.
///
/// Placeholders `{group}`, `{name}` and `{version}` are replaced with the
/// dependency's coordinates.
pub const DEFAULT_JAVADOC_PROVIDER: &str = "https://javadoc.io/doc/{group}/{name}/{version}";

/// Index files that a javadoc site is expected to serve, relative to its base URL.
///
/// Modern javadoc emits `element-list`; older doclets only produce `package-list`.
pub const PROBE_PATHS: &[&str] = &["element-list", "package-list"];

/// URL prefix of the documentation host that needs cache priming before retries.
pub const DEFAULT_PRIMING_PREFIX: &str = "https://javadoc.io/doc/";

/// Replacement prefix used to build the priming request URL.
pub const DEFAULT_PRIMING_REPLACEMENT: &str = "https://javadoc.io/static/";

/// Total number of probe cycles attempted for a primeable host (3).
pub const DEFAULT_MAX_PROBE_ATTEMPTS: u32 = 3;

/// Delay between a priming request and the next probe cycle (15 seconds).
///
/// javadoc.io answers 403 until the docs for a version have been extracted
/// on its side, which usually takes several seconds after the first request.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(15);

/// Timeout applied to every individual probe request (30 seconds).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable that overrides `check-javadoc-availability`.
pub const CHECK_AVAILABILITY_ENV: &str = "JAVADOC_LINKS_CHECK_AVAILABILITY";

/// Environment variable pointing at the user-global configuration file.
pub const GLOBAL_CONFIG_ENV: &str = "JAVADOC_LINKS_CONFIG_PATH";

/// Directory below the platform config dir holding the global configuration.
pub const GLOBAL_CONFIG_DIR: &str = "javadoc-links";

/// Environment variable that disables progress spinners when set to `1`.
pub const NO_PROGRESS_ENV: &str = "JAVADOC_LINKS_NO_PROGRESS";

/// Name of the project configuration file searched in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "javadoc-links.toml";

/// Default name of the generated options file, next to the resolution file.
pub const LINKS_FILE_NAME: &str = "links.options";

/// Default name of the directory holding unpacked javadoc archives.
pub const UNPACK_DIR_NAME: &str = "unpackedJavadocs";

/// User agent sent with probe requests.
pub const USER_AGENT: &str = concat!("javadoc-links/", env!("CARGO_PKG_VERSION"));
