//! Category tags for masking units.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker that prefixes categories derived from attribute field names.
pub const ATTRIBUTE_MARKER: &str = "attribute_";

/// Namespace tag for a class of sensitive value.
///
/// A category is either the name of a detection pattern (`"ipv4"`,
/// `"hostname"`, ...) or a synthetic tag built from a record field name
/// (`"attribute_username"`). It namespaces store keys and selects the
/// formatting rule used when a masked value is synthesized.
///
/// # Examples
///
/// ```
/// use redmask_core::Category;
///
/// let category = Category::attribute("username");
/// assert_eq!(category.as_str(), "attribute_username");
/// assert_eq!(category.field_name(), Some("username"));
///
/// let pattern = Category::pattern("ipv4");
/// assert_eq!(pattern.field_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Wraps a raw category string as is.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Category for a named detection pattern.
    pub fn pattern(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Category for an attribute field: `attribute_<field>`.
    pub fn attribute(field: &str) -> Self {
        Self(format!("{ATTRIBUTE_MARKER}{field}"))
    }

    /// Returns the raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the field name when this is an attribute category.
    ///
    /// The bare marker (`"attribute_"`) is not treated as an attribute
    /// category because it names no field.
    pub fn field_name(&self) -> Option<&str> {
        self.0
            .strip_prefix(ATTRIBUTE_MARKER)
            .filter(|field| !field.is_empty())
    }

    /// Returns true when this category was derived from a field name.
    pub fn is_attribute(&self) -> bool {
        self.field_name().is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
