//! Progress indicators for link generation.
//!
//! Progress output is suppressed when the `JAVADOC_LINKS_NO_PROGRESS`
//! environment variable is set or when the caller asks for it (`--no-progress`,
//! `--quiet`). A suppressed indicator is a hidden `indicatif` bar, so callers
//! never need to branch on whether progress is shown.

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{
    MultiProgress as IndicatifMulti, ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle,
};
use std::time::Duration;

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some()
}

/// Thin wrapper over an `indicatif` bar with this tool's styling.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// A spinner for work of unknown size, ticking every 100ms.
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// A bar that never draws anything.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }
}

/// Stacks one indicator per resolution file when several are generated at once.
#[derive(Debug)]
pub struct MultiProgress {
    inner: IndicatifMulti,
    enabled: bool,
}

impl MultiProgress {
    /// Creates a container; with `enabled == false` every added bar is hidden.
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: IndicatifMulti::new(),
            enabled: enabled && !is_progress_disabled(),
        }
    }

    pub fn add_spinner(&self, prefix: impl Into<String>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_prefix(prefix);
        ProgressBar {
            inner: self.inner.add(spinner.inner),
        }
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
