//! Serde-driven binary codecs.

use crate::codec::{CodecFamily, ObjectCodec};
use crate::error::{CodecError, CodecResult};
use crate::payload::Media;

/// bincode with the standard (varint, little-endian) configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl ObjectCodec for BincodeCodec {
    fn name(&self) -> &str {
        "bincode"
    }

    fn family(&self) -> CodecFamily {
        CodecFamily::Binary
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        bincode::serde::encode_to_vec(media, bincode::config::standard())
            .map_err(CodecError::serialize)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        let (media, read) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(CodecError::deserialize)?;
        if read != bytes.len() {
            return Err(CodecError::deserialize(format!(
                "{} trailing bytes after payload",
                bytes.len() - read
            )));
        }
        Ok(media)
    }
}

/// MessagePack encoding structs as maps so field names travel on the wire.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgpackCodec;

impl ObjectCodec for MsgpackCodec {
    fn name(&self) -> &str {
        "msgpack"
    }

    fn family(&self) -> CodecFamily {
        CodecFamily::Binary
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        rmp_serde::to_vec_named(media).map_err(CodecError::serialize)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        rmp_serde::from_slice(bytes).map_err(CodecError::deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bincode_is_more_compact_than_msgpack() {
        let media = Media::fixture();
        let bincode = BincodeCodec.serialize(&media).unwrap();
        let msgpack = MsgpackCodec.serialize(&media).unwrap();
        assert!(bincode.len() < msgpack.len());
    }

    #[test]
    fn test_bincode_rejects_trailing_bytes() {
        let mut bytes = BincodeCodec.serialize(&Media::fixture()).unwrap();
        bytes.push(0);
        let err = BincodeCodec.deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }
}
