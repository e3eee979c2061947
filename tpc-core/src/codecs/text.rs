//! Text codecs.

use crate::codec::{CodecFamily, ObjectCodec};
use crate::error::{CodecError, CodecResult};
use crate::payload::Media;

/// Compact JSON via serde_json.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl ObjectCodec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn family(&self) -> CodecFamily {
        CodecFamily::Text
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(media).map_err(CodecError::serialize)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        serde_json::from_slice(bytes).map_err(CodecError::deserialize)
    }
}

/// YAML via serde_yaml.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlCodec;

impl ObjectCodec for YamlCodec {
    fn name(&self) -> &str {
        "yaml"
    }

    fn family(&self) -> CodecFamily {
        CodecFamily::Text
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        serde_yaml::to_string(media)
            .map(String::into_bytes)
            .map_err(CodecError::serialize)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        serde_yaml::from_slice(bytes).map_err(CodecError::deserialize)
    }
}
