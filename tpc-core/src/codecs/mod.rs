// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Built-in codec adapters.
//!
//! The benchmark core never depends on these. They give the runner a
//! representative set of strategies to compare out of the box.
//!
//! # Codecs
//!
//! - **bincode**: serde-driven compact binary (binary)
//! - **msgpack**: MessagePack with field names (binary)
//! - **manual**: hand-written length-prefixed layout (native)
//! - **json**: serde_json (text)
//! - **yaml**: serde_yaml (text)

mod binary;
mod manual;
mod text;

use std::sync::Arc;

use crate::codec::ObjectCodec;

pub use binary::{BincodeCodec, MsgpackCodec};
pub use manual::ManualCodec;
pub use text::{JsonCodec, YamlCodec};

/// All built-in codecs: binary first, then native, then text.
pub fn default_codecs() -> Vec<Arc<dyn ObjectCodec>> {
    vec![
        Arc::new(BincodeCodec),
        Arc::new(MsgpackCodec),
        Arc::new(ManualCodec),
        Arc::new(JsonCodec),
        Arc::new(YamlCodec),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecFamily;
    use crate::payload::Media;

    #[test]
    fn test_round_trip_law() {
        for codec in default_codecs() {
            let input = codec.create().unwrap();
            let bytes = codec.serialize(&input).unwrap();
            let output = codec.deserialize(&bytes).unwrap();
            assert_eq!(input, output, "codec {} failed round-trip", codec.name());
        }
    }

    #[test]
    fn test_absent_copyright_stays_absent() {
        for codec in default_codecs() {
            let input = Media::fixture();
            assert!(input.copyright.is_none());
            let output = codec.deserialize(&codec.serialize(&input).unwrap()).unwrap();
            assert_eq!(output.copyright, None, "codec {}", codec.name());
        }
    }

    #[test]
    fn test_present_and_empty_copyright_round_trip() {
        for copyright in ["", "(c) 2009"] {
            let mut input = Media::fixture();
            input.copyright = Some(copyright.to_string());
            for codec in default_codecs() {
                let output = codec.deserialize(&codec.serialize(&input).unwrap()).unwrap();
                assert_eq!(
                    output.copyright.as_deref(),
                    Some(copyright),
                    "codec {}",
                    codec.name()
                );
            }
        }
    }

    #[test]
    fn test_buffer_reusable_for_repeated_decodes() {
        for codec in default_codecs() {
            let bytes = codec.serialize(&codec.create().unwrap()).unwrap();
            let first = codec.deserialize(&bytes).unwrap();
            let second = codec.deserialize(&bytes).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_families_are_grouped() {
        let families: Vec<CodecFamily> = default_codecs().iter().map(|c| c.family()).collect();
        let mut sorted = families.clone();
        sorted.sort_by_key(|f| match f {
            CodecFamily::Binary => 0,
            CodecFamily::Native => 1,
            CodecFamily::Text => 2,
        });
        assert_eq!(families, sorted);
    }

    #[test]
    fn test_garbage_input_is_an_encoding_error() {
        for codec in default_codecs() {
            assert!(
                codec.deserialize(&[0xff, 0x00, 0x13]).is_err(),
                "codec {} accepted garbage",
                codec.name()
            );
        }
    }
}
