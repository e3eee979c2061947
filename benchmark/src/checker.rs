// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Round-trip correctness check.
//!
//! Construct, serialize, deserialize, compare. A difference is a warning:
//! it is surfaced separately from timings and never stops measurement.

use std::fmt;

use serde::{Deserialize, Serialize};
use tpc_core::{CodecResult, ObjectCodec};

/// A codec produced a payload different from its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectnessMismatch {
    /// Codec name.
    pub codec: String,
    /// Human-readable description.
    pub message: String,
    /// Fields whose values changed during the round-trip.
    pub differing_fields: Vec<String>,
}

impl fmt::Display for CorrectnessMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.differing_fields.is_empty() {
            write!(f, " [fields: {}]", self.differing_fields.join(", "))?;
        }
        Ok(())
    }
}

/// Round-trip one fixture through `codec`.
///
/// Returns `Ok(None)` when the output equals the input. Errors from the
/// codec itself propagate; they are plugin defects, not mismatches.
pub fn verify_round_trip(codec: &dyn ObjectCodec) -> CodecResult<Option<CorrectnessMismatch>> {
    let input = codec.create()?;
    let bytes = codec.serialize(&input)?;
    let output = codec.deserialize(&bytes)?;

    if input == output {
        return Ok(None);
    }

    Ok(Some(CorrectnessMismatch {
        codec: codec.name().to_string(),
        message: format!(
            "serializer '{}' failed round-trip test (ser+deser produces object different from input)",
            codec.name()
        ),
        differing_fields: input
            .differing_fields(&output)
            .into_iter()
            .map(String::from)
            .collect(),
    }))
}
