//! Shared types used across the pastewatch application.
//!
//! This module defines common newtypes and structs that provide type safety
//! and clear domain modeling.

use crate::error::PastewatchError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for paste identifiers with validation.
///
/// A paste identifier is the short opaque token from the site's frontier
/// links with the leading path separator stripped. It must be non-empty
/// and must not contain separators or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasteId(String);

impl PasteId {
    /// Create a new `PasteId` from a string.
    ///
    /// # Errors
    /// Returns error if the identifier is empty or contains `/`, `?`, `#`
    /// or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, PastewatchError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that a string is a usable paste token.
    fn validate(id: &str) -> Result<(), PastewatchError> {
        static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = TOKEN_REGEX
            .get_or_init(|| Regex::new(r"^[^/?#\s]+$").expect("token regex is hardcoded and valid"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(PastewatchError::Validation(format!(
                "invalid paste ID: must be a non-empty path segment, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One configured sensitive-data pattern.
///
/// Definitions are immutable after startup. Identity is the `category`
/// label; two definitions carrying the same `pattern` text share a single
/// compiled matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Human-readable category label (e.g. "Email Address")
    pub category: String,
    /// Regular-expression source text, matched case-insensitively against
    /// multi-line content
    pub pattern: String,
}

impl PatternDefinition {
    /// Create a new pattern definition.
    #[must_use]
    pub fn new(category: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_id_valid() {
        let id = "dR7wq2Lx";
        let paste_id = PasteId::new(id).expect("valid paste ID");
        assert_eq!(paste_id.as_str(), id);
    }

    #[test]
    fn test_paste_id_invalid() {
        let invalid_ids = vec!["", "abc/def", "with space", "tab\there", "a?b", "a#b"];

        for id in invalid_ids {
            assert!(PasteId::new(id).is_err(), "should fail for: {id:?}");
        }
    }

    #[test]
    fn test_paste_id_display() {
        let id = PasteId::new("Xy9Kp3Qz").expect("valid paste ID");
        assert_eq!(id.to_string(), "Xy9Kp3Qz");
    }

    #[test]
    fn test_paste_id_serde_transparent() {
        let id = PasteId::new("dR7wq2Lx").expect("valid paste ID");
        let json = serde_json::to_string(&id).expect("serialize paste ID");
        assert_eq!(json, "\"dR7wq2Lx\"");
    }

    #[test]
    fn test_pattern_definition_roundtrip() {
        let def = PatternDefinition::new("Email Address", r"[a-z]+@[a-z]+\.[a-z]+");
        let json = serde_json::to_string(&def).expect("serialize definition");
        let parsed: PatternDefinition = serde_json::from_str(&json).expect("parse definition");
        assert_eq!(parsed, def);
    }
}
