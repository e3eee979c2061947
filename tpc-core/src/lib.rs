//! tpc Core Library
//!
//! Core of the serializer comparison benchmark. Provides the media payload
//! every codec round-trips, the codec plugin contract and ordered registry,
//! the built-in codec adapters, error types and configuration parsing.

pub mod codec;
pub mod codecs;
pub mod config;
pub mod error;
pub mod payload;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use codec::{CodecFamily, ObjectCodec};
pub use config::{Config, ConfigLoader, MeasurementSettings};
pub use error::{
    CodecError, CodecResult, EncodingStage, HardValidationError, TpcError, TpcResult,
};
pub use payload::{Media, Player};
pub use registry::{CodecEntry, CodecRegistry};
pub use types::{CodecName, Count};
