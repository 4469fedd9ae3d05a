//! Detection patterns.
//!
//! Patterns are compiled once, when the engine is built, and kept in a
//! fixed ordered collection. Order is significant: each pattern scans the
//! text produced by the previous ones.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{MaskingError, Result};

/// Definition of a detection pattern as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Name of the pattern (e.g. "ipv4", "hostname"); doubles as its category.
    pub name: String,

    /// Regex to match.
    pub regex: String,

    /// Prefix for masked values (e.g. "IP-", "HOST-").
    #[serde(default)]
    pub masked_prefix: String,
}

impl PatternConfig {
    /// Creates a new pattern definition.
    pub fn new(
        name: impl Into<String>,
        regex: impl Into<String>,
        masked_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
            masked_prefix: masked_prefix.into(),
        }
    }
}

/// Default pattern catalog: IPv4 addresses, then dotted hostnames.
///
/// The hostname pattern only matches names with at least one dot and an
/// alphabetic TLD (`db01.example.com`), never bare words such as `server01`.
/// Configure a broader pattern to mask single-label host names.
pub fn default_patterns() -> Vec<PatternConfig> {
    vec![
        PatternConfig::new("ipv4", r"\b(?:\d{1,3}\.){3}\d{1,3}\b", "IP-"),
        PatternConfig::new(
            "hostname",
            r"\b(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}\b",
            "HOST-",
        ),
    ]
}

/// A compiled detection pattern.
#[derive(Clone)]
pub struct Pattern {
    name: String,
    category: Category,
    regex: Regex,
    masked_prefix: String,
}

impl Pattern {
    /// Compiles a single pattern definition.
    ///
    /// # Errors
    ///
    /// Returns `MaskingError::PatternCompilation` naming the pattern when the
    /// regex is invalid.
    pub fn compile(config: &PatternConfig) -> Result<Self> {
        let regex = Regex::new(&config.regex)
            .map_err(|e| MaskingError::pattern_compilation(&config.name, e))?;

        Ok(Self {
            name: config.name.clone(),
            category: Category::pattern(&config.name),
            regex,
            masked_prefix: config.masked_prefix.clone(),
        })
    }

    /// Returns the pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category used for values matched by this pattern.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the configured masked prefix.
    pub fn masked_prefix(&self) -> &str {
        &self.masked_prefix
    }

    /// Returns every matched substring in order of occurrence.
    ///
    /// Duplicates are kept. Overlaps are resolved by the regex engine's
    /// leftmost-first semantics.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .field("masked_prefix", &self.masked_prefix)
            .finish()
    }
}

/// Ordered, immutable set of compiled patterns.
///
/// # Examples
///
/// ```
/// use redmask_core::{PatternConfig, PatternSet};
///
/// let set = PatternSet::compile(&[
///     PatternConfig::new("digits", r"\d+", "N-"),
/// ]).unwrap();
///
/// let pattern = set.iter().next().unwrap();
/// assert_eq!(pattern.find_all("a1 b22 c1"), vec!["1", "22", "1"]);
/// assert_eq!(set.prefix_for("digits"), Some("N-"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    prefixes: HashMap<String, String>,
}

impl PatternSet {
    /// Compiles every pattern, in order.
    ///
    /// The whole construction fails on the first invalid regex.
    pub fn compile(configs: &[PatternConfig]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(configs.len());
        let mut prefixes = HashMap::with_capacity(configs.len());

        for config in configs {
            let pattern = Pattern::compile(config)?;
            // First definition wins, same as a linear scan by name.
            prefixes
                .entry(pattern.name.clone())
                .or_insert_with(|| pattern.masked_prefix.clone());
            patterns.push(pattern);
        }

        Ok(Self { patterns, prefixes })
    }

    /// Returns an empty pattern set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterates patterns in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Returns the configured prefix for the pattern with this name.
    pub fn prefix_for(&self, name: &str) -> Option<&str> {
        self.prefixes.get(name).map(String::as_str)
    }

    /// Returns the prefixes keyed by pattern name.
    pub fn prefixes(&self) -> &HashMap<String, String> {
        &self.prefixes
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
