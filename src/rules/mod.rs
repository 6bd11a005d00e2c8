//! Override rules mapping dependencies to documentation links.
//!
//! A [`RuleSet`] is an ordered list of [`OverrideRule`]s. Resolution walks the
//! list in registration order and the first rule whose filter accepts the
//! dependency produces the link; when nothing matches, the caller's default
//! template is used. The list is fixed once link generation starts, so the
//! same inputs always yield the same links.
//!
//! # Templates
//!
//! Templates contain the literal tokens `{group}`, `{name}` and `{version}`.
//! Replacement is plain substring substitution: there is no escaping and any
//! other braces are left untouched.
//!
//! ```rust
//! use javadoc_links::model::DependencyId;
//! use javadoc_links::rules::replace_variables;
//!
//! let id = DependencyId::new("com.example", "foo", "1.0");
//! assert_eq!(
//!     replace_variables("https://docs.example.com/{group}/{name}/{version}", &id),
//!     "https://docs.example.com/com.example/foo/1.0"
//! );
//! ```

use crate::filter::DependencyFilter;
use crate::model::DependencyId;
use serde::{Deserialize, Serialize};

/// Substitutes `{group}`, `{name}` and `{version}` in `template`.
#[must_use]
pub fn replace_variables(template: &str, id: &DependencyId) -> String {
    template
        .replace("{group}", &id.group)
        .replace("{name}", &id.module)
        .replace("{version}", &id.version)
}

/// Computes a documentation link for a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinkOverride {
    /// Uses the default template.
    PassThrough,
    /// Uses a fixed template with the usual placeholders.
    Simple {
        /// Link template.
        template: String,
    },
    /// PaperMC hosts one javadoc per `major.minor` release line.
    PaperApi,
    /// Adventure libraries live on a dedicated host keyed by module name.
    Kyori,
    /// Log4j publishes per-module javadoc under one shared site.
    Log4j,
}

impl LinkOverride {
    /// Resolves the link for `id`.
    #[must_use]
    pub fn link(&self, default_provider: &str, id: &DependencyId) -> String {
        match self {
            Self::PassThrough => replace_variables(default_provider, id),
            Self::Simple {
                template,
            } => replace_variables(template, id),
            Self::PaperApi => {
                let release_line = id.version.split('.').take(2).collect::<Vec<_>>().join(".");
                format!("https://jd.papermc.io/paper/{release_line}/")
            }
            Self::Kyori => {
                let name = id.module.replace("adventure-", "");
                if name.contains("examination") {
                    return Self::PassThrough.link(default_provider, id);
                }
                format!("https://jd.advntr.dev/{name}/{}", id.version)
            }
            Self::Log4j => {
                format!("https://logging.apache.org/log4j/2.x/javadoc/{}/", id.module)
            }
        }
    }
}

/// A filter paired with the link override it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Decides whether this rule applies.
    pub filter: DependencyFilter,
    /// Produces the link when it does.
    pub link: LinkOverride,
}

impl OverrideRule {
    /// Rule applying `link` to every coordinate starting with `prefix`.
    pub fn for_prefix(prefix: impl Into<String>, link: LinkOverride) -> Self {
        Self {
            filter: DependencyFilter::starts_with_any_of([prefix.into()]),
            link,
        }
    }
}

/// Ordered, first-match-wins list of override rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<OverrideRule>,
}

impl RuleSet {
    /// An empty rule set; every dependency falls through to the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules for well-known documentation hosts.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            rules: default_overrides(),
        }
    }

    /// Appends a rule after all existing ones.
    pub fn push(&mut self, rule: OverrideRule) {
        self.rules.push(rule);
    }

    /// Registers a fixed link template for one dependency.
    ///
    /// `key` is `group:name` or `group:name:version`. A `group:name` key gets a
    /// trailing `:` so that `com.example:foo` does not also match
    /// `com.example:foo-extras`; a versioned key is used as given.
    pub fn override_dependency(&mut self, key: &str, template: impl Into<String>) {
        let prefix = if key.ends_with(':') || key.matches(':').count() >= 2 {
            key.to_string()
        } else {
            format!("{key}:")
        };
        self.push(OverrideRule::for_prefix(
            prefix,
            LinkOverride::Simple {
                template: template.into(),
            },
        ));
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> {
        self.rules.iter()
    }

    /// Returns the first rule accepting `id`, if any.
    #[must_use]
    pub fn matching_rule(&self, id: &DependencyId) -> Option<&OverrideRule> {
        self.rules.iter().find(|rule| rule.filter.test(id))
    }

    /// Resolves the documentation link for `id`.
    #[must_use]
    pub fn resolve(&self, default_provider: &str, id: &DependencyId) -> String {
        match self.matching_rule(id) {
            Some(rule) => rule.link.link(default_provider, id),
            None => replace_variables(default_provider, id),
        }
    }
}

impl Extend<OverrideRule> for RuleSet {
    fn extend<T: IntoIterator<Item = OverrideRule>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl FromIterator<OverrideRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = OverrideRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

fn default_overrides() -> Vec<OverrideRule> {
    vec![
        OverrideRule::for_prefix("net.kyori:", LinkOverride::Kyori),
        OverrideRule::for_prefix("io.papermc.paper:paper-api:", LinkOverride::PaperApi),
        OverrideRule {
            filter: DependencyFilter::starts_with_any_of([
                "org.apache.logging.log4j:log4j-api:",
                "org.apache.logging.log4j:log4j-core:",
            ]),
            link: LinkOverride::Log4j,
        },
    ]
}
