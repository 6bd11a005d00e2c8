//! Dependency filters deciding which modules take part in link generation.
//!
//! Filters are pure predicates over a [`DependencyId`]. They are used twice:
//! once globally, to drop dependencies before any link is computed, and once
//! per [`OverrideRule`](crate::rules::OverrideRule) to select the rule that
//! produces a dependency's link.
//!
//! Filters deserialize from configuration tables tagged with `kind`:
//!
//! ```toml
//! [filter]
//! kind = "no-snapshots"
//! except-for = ["org.incendo:"]
//! ```

use crate::model::DependencyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Predicate over a dependency identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DependencyFilter {
    /// Rejects snapshot builds unless their coordinates start with an allow-listed prefix.
    NoSnapshots {
        /// Coordinate prefixes that pass regardless of snapshot status.
        #[serde(default, rename = "except-for")]
        except_for: BTreeSet<String>,
    },
    /// Accepts identifiers whose coordinates start with any of the prefixes.
    StartsWithAnyOf {
        /// Coordinate prefixes, e.g. `net.kyori:` or `com.example:foo:`.
        prefixes: Vec<String>,
    },
    /// Accepts everything.
    PassThrough,
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self::no_snapshots()
    }
}

impl DependencyFilter {
    /// `NoSnapshots` with an empty allow-list.
    #[must_use]
    pub fn no_snapshots() -> Self {
        Self::NoSnapshots {
            except_for: BTreeSet::new(),
        }
    }

    /// `StartsWithAnyOf` from anything that yields strings.
    pub fn starts_with_any_of<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StartsWithAnyOf {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates the filter.
    #[must_use]
    pub fn test(&self, id: &DependencyId) -> bool {
        match self {
            Self::NoSnapshots {
                except_for,
            } => {
                let coords = id.coordinates();
                if except_for.iter().any(|prefix| coords.starts_with(prefix.as_str())) {
                    return true;
                }
                !id.is_snapshot()
            }
            Self::StartsWithAnyOf {
                prefixes,
            } => {
                let coords = id.coordinates();
                prefixes.iter().any(|prefix| coords.starts_with(prefix.as_str()))
            }
            Self::PassThrough => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> DependencyId {
        DependencyId::new("org.incendo", "cloud-core", "2.0.0-SNAPSHOT")
    }

    #[test]
    fn test_no_snapshots_rejects_nominal_snapshot() {
        assert!(!DependencyFilter::no_snapshots().test(&snapshot()));
    }

    #[test]
    fn test_no_snapshots_rejects_timestamped_snapshot() {
        let id = DependencyId::new("org.incendo", "cloud-core", "2.0.0-SNAPSHOT")
            .with_snapshot_version("2.0.0-20240105.120000-7");
        assert!(!DependencyFilter::no_snapshots().test(&id));
    }

    #[test]
    fn test_no_snapshots_accepts_release() {
        let id = DependencyId::new("com.example", "foo", "1.0");
        assert!(DependencyFilter::no_snapshots().test(&id));
    }

    #[test]
    fn test_no_snapshots_allow_list_passes() {
        let filter = DependencyFilter::NoSnapshots {
            except_for: BTreeSet::from(["org.incendo:".to_string()]),
        };
        assert!(filter.test(&snapshot()));
        assert!(!filter.test(&DependencyId::new("net.kyori", "adventure-api", "4.0.0-SNAPSHOT")));
    }

    #[test]
    fn test_starts_with_any_of() {
        let filter = DependencyFilter::starts_with_any_of(["net.kyori:", "io.papermc.paper:paper-api:"]);
        assert!(filter.test(&DependencyId::new("net.kyori", "adventure-api", "4.17.0")));
        assert!(filter.test(&DependencyId::new("io.papermc.paper", "paper-api", "1.20.4")));
        assert!(!filter.test(&DependencyId::new("io.papermc.paper", "paper-mojangapi", "1.20.4")));
    }

    #[test]
    fn test_starts_with_empty_prefix_list_matches_nothing() {
        let filter = DependencyFilter::starts_with_any_of(Vec::<String>::new());
        assert!(!filter.test(&DependencyId::new("g", "m", "1")));
    }

    #[test]
    fn test_pass_through() {
        assert!(DependencyFilter::PassThrough.test(&snapshot()));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let filter: DependencyFilter =
            toml::from_str("kind = \"no-snapshots\"\nexcept-for = [\"org.incendo:\"]").unwrap();
        assert_eq!(
            filter,
            DependencyFilter::NoSnapshots {
                except_for: BTreeSet::from(["org.incendo:".to_string()]),
            }
        );

        let filter: DependencyFilter = toml::from_str("kind = \"pass-through\"").unwrap();
        assert_eq!(filter, DependencyFilter::PassThrough);
    }
}
