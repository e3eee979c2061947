// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Maximum codec name length; keeps the first table column aligned.
const MAX_CODEC_NAME_LEN: usize = 64;

/// Validated codec display name.
///
/// Must be non-empty, at most 64 chars, and free of control characters,
/// commas (table column separator) and pipes (chart label separator).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodecName(String);

impl CodecName {
    /// Create a new CodecName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name,
                reason: "Codec name cannot be empty".to_string(),
            });
        }

        if name.chars().count() > MAX_CODEC_NAME_LEN {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name.clone(),
                reason: format!(
                    "Codec name too long: {} chars (max {})",
                    name.chars().count(),
                    MAX_CODEC_NAME_LEN
                ),
            });
        }

        if name
            .chars()
            .any(|c| c.is_control() || c == ',' || c == '|')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name,
                reason: "Codec name must not contain control characters, ',' or '|'".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CodecName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CodecName> for String {
    fn from(name: CodecName) -> Self {
        name.0
    }
}

/// A repetition count that is never zero.
///
/// Used for iteration and trial counts so the per-call mean never divides
/// by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Count(u32);

impl Count {
    /// Create a new Count with validation.
    pub fn new(field: &'static str, value: u32) -> Result<Self, HardValidationError> {
        if value == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field,
                value: value.to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Create a Count, raising zero to one.
    pub fn at_least_one(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Get the inner count.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Count {
    type Error = HardValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new("count", value)
    }
}

impl From<Count> for u32 {
    fn from(count: Count) -> Self {
        count.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_name_valid() {
        assert!(CodecName::new("json").is_ok());
        assert!(CodecName::new("xstream (stax with conv)").is_ok());
        assert!(CodecName::new("stax/woodstox").is_ok());
    }

    #[test]
    fn test_codec_name_invalid() {
        assert!(CodecName::new("").is_err());
        assert!(CodecName::new("   ").is_err());
        assert!(CodecName::new("a".repeat(65)).is_err());
        assert!(CodecName::new("json,fast").is_err());
        assert!(CodecName::new("json|fast").is_err());
        assert!(CodecName::new("json\n").is_err());
    }

    #[test]
    fn test_count_valid() {
        assert_eq!(Count::new("trials", 1).unwrap().get(), 1);
        assert_eq!(Count::new("iterations", 2000).unwrap().get(), 2000);
    }

    #[test]
    fn test_count_invalid() {
        let err = Count::new("trials", 0).unwrap_err();
        assert!(err.to_string().contains("trials"));
    }

    #[test]
    fn test_count_at_least_one() {
        assert_eq!(Count::at_least_one(0).get(), 1);
        assert_eq!(Count::at_least_one(20).get(), 20);
    }
}
