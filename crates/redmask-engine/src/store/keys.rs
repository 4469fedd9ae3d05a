//! Store key generation.

use std::fmt;

use redmask_core::Category;

/// Prefix of forward keys (original → masked).
pub const FORWARD_PREFIX: &str = "mask";

/// Prefix of reverse keys (masked → original).
pub const REVERSE_PREFIX: &str = "unmask";

/// Key of a mapping entry.
///
/// Keys are not normalized: categories and values are case sensitive, and
/// the value is embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// `mask:<category>:<original>`
    Forward { category: String, original: String },
    /// `unmask:<category>:<masked>`
    Reverse { category: String, masked: String },
}

impl StoreKey {
    /// Key of the forward entry for an original value.
    ///
    /// # Examples
    ///
    /// ```
    /// use redmask_core::Category;
    /// use redmask_engine::store::StoreKey;
    ///
    /// let key = StoreKey::forward(&Category::pattern("ipv4"), "10.0.0.1");
    /// assert_eq!(key.to_string(), "mask:ipv4:10.0.0.1");
    /// ```
    pub fn forward(category: &Category, original: &str) -> Self {
        Self::Forward {
            category: category.as_str().to_string(),
            original: original.to_string(),
        }
    }

    /// Key of the reverse entry for a masked value.
    pub fn reverse(category: &Category, masked: &str) -> Self {
        Self::Reverse {
            category: category.as_str().to_string(),
            masked: masked.to_string(),
        }
    }

    /// Returns the category part.
    pub fn category(&self) -> &str {
        match self {
            Self::Forward { category, .. } | Self::Reverse { category, .. } => category,
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward { category, original } => {
                write!(f, "{FORWARD_PREFIX}:{category}:{original}")
            }
            Self::Reverse { category, masked } => {
                write!(f, "{REVERSE_PREFIX}:{category}:{masked}")
            }
        }
    }
}
