use crate::error::ConfigError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The reserved id under which a section's default instance is registered.
pub const DEFAULT_KEY: &str = "default";

/// Words that cannot be used as configuration identifiers.
///
/// Identifiers double as attribute names in downstream tooling, so the usual
/// language-keyword set is off limits.
const RESERVED_WORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "false", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "none",
    "nonlocal", "not", "or", "pass", "raise", "return", "true", "try", "while", "with", "yield",
];

/// Checks that `id` is a usable configuration identifier.
///
/// Valid identifiers start with a letter or underscore, continue with
/// alphanumerics or underscores, and are not reserved words. Returns the
/// input on success so call sites can validate-and-forward in one step.
pub fn validate_id(id: &str) -> Result<&str, ConfigError> {
    let mut chars = id.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && !RESERVED_WORDS.contains(&id.to_ascii_lowercase().as_str()) {
        Ok(id)
    } else {
        Err(ConfigError::InvalidIdentifier { id: id.to_string() })
    }
}

/// A validated configuration identifier.
///
/// Construction is the only validation point; once a `ConfigId` exists it is
/// immutable and always holds a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConfigId(String);

// Hand-written so deserialization cannot sidestep validation.
impl<'de> Deserialize<'de> for ConfigId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Self::new(id).map_err(D::Error::custom)
    }
}

impl ConfigId {
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self(id))
    }

    /// The reserved default-section id.
    pub fn default_id() -> Self {
        Self(DEFAULT_KEY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_KEY
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConfigId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
