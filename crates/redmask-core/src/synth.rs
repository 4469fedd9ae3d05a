//! Deterministic value synthesis.
//!
//! A masked value is derived from `SHA-256(original ‖ category)`. The same
//! pair always yields the same output, so a store eviction followed by a
//! miss reproduces the value that was cached before.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::category::Category;
use crate::pattern::PatternSet;

/// Category tag formatted as an IPv4 address.
pub const IPV4_CATEGORY: &str = "ipv4";

/// Category tag formatted as a hostname.
pub const HOSTNAME_CATEGORY: &str = "hostname";

/// First octet of synthesized addresses (10.0.0.0/8, never routed publicly).
const MASKED_IPV4_NETWORK: u8 = 10;

/// Domain suffix of synthesized hostnames.
const MASKED_HOST_SUFFIX: &str = "masked.local";

/// Produces masked values for (original, category) pairs.
///
/// Implementations must be pure: no I/O, no randomness.
pub trait Synthesize: Send + Sync {
    /// Returns the masked value for `original` in `category`.
    fn synthesize(&self, original: &str, category: &Category) -> String;
}

/// SHA-256 based synthesizer with category-specific formatting.
///
/// # Examples
///
/// ```
/// use redmask_core::{Category, DigestSynthesizer, Synthesize};
///
/// let synth = DigestSynthesizer::default();
/// let masked = synth.synthesize("alice", &Category::attribute("username"));
///
/// assert!(masked.starts_with("username-"));
/// assert_eq!(masked.len(), "username-".len() + 12);
/// assert_eq!(masked, synth.synthesize("alice", &Category::attribute("username")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DigestSynthesizer {
    prefixes: HashMap<String, String>,
}

impl DigestSynthesizer {
    /// Creates a synthesizer with an explicit prefix table.
    pub fn new(prefixes: HashMap<String, String>) -> Self {
        Self { prefixes }
    }

    /// Creates a synthesizer using the prefixes of the given patterns.
    pub fn from_patterns(patterns: &PatternSet) -> Self {
        Self::new(patterns.prefixes().clone())
    }

    fn digest(original: &str, category: &Category) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(original.as_bytes());
        hasher.update(category.as_str().as_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

impl Synthesize for DigestSynthesizer {
    fn synthesize(&self, original: &str, category: &Category) -> String {
        let hash = Self::digest(original, category);

        match category.as_str() {
            IPV4_CATEGORY => {
                return format!(
                    "{}.{}.{}.{}",
                    MASKED_IPV4_NETWORK, hash[0], hash[1], hash[2]
                );
            }
            HOSTNAME_CATEGORY => {
                return format!("host-{}.{}", hex::encode(&hash[..4]), MASKED_HOST_SUFFIX);
            }
            _ => {}
        }

        let hex_id = hex::encode(&hash[..6]);

        if let Some(field) = category.field_name() {
            return format!("{field}-{hex_id}");
        }

        match self.prefixes.get(category.as_str()) {
            Some(prefix) => format!("{prefix}{hex_id}"),
            None => hex_id,
        }
    }
}
