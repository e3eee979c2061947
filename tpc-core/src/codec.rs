// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Codec plugin contract.
//!
//! Every competing serialization strategy implements [`ObjectCodec`]. The
//! benchmark only ever holds `dyn ObjectCodec` values and never depends on
//! a concrete adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecResult;
use crate::payload::Media;

/// Display grouping for codecs. Has no effect on measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecFamily {
    /// Compact binary formats
    Binary,
    /// Hand-written layouts native to this crate
    Native,
    /// Text and markup formats
    Text,
}

impl fmt::Display for CodecFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecFamily::Binary => write!(f, "binary"),
            CodecFamily::Native => write!(f, "native"),
            CodecFamily::Text => write!(f, "text"),
        }
    }
}

/// A serialization strategy under test.
///
/// Implementations must be deterministic in `create` (same field values on
/// every call), must not mutate the input in `serialize`, and must accept
/// the same buffer in `deserialize` any number of times.
pub trait ObjectCodec {
    /// Stable display identifier.
    fn name(&self) -> &str;

    /// Grouping used for display ordering.
    fn family(&self) -> CodecFamily {
        CodecFamily::Binary
    }

    /// Build one canonical payload instance.
    fn create(&self) -> CodecResult<Media> {
        Ok(Media::fixture())
    }

    /// Encode the payload into a fresh byte buffer.
    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>>;

    /// Decode a buffer previously produced by [`ObjectCodec::serialize`].
    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media>;
}
