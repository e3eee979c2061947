//! Ordered codec registry.
//!
//! Keeps codecs in registration order. Registering the same instance twice
//! is ignored; registering two different instances under one name is
//! rejected because results are keyed by name.

use std::sync::Arc;

use crate::codec::ObjectCodec;
use crate::error::{HardValidationError, TpcResult};
use crate::types::CodecName;

/// Entry in the codec registry.
#[derive(Clone)]
pub struct CodecEntry {
    /// Validated display name.
    pub name: CodecName,
    /// The codec itself.
    pub codec: Arc<dyn ObjectCodec>,
}

impl std::fmt::Debug for CodecEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecEntry")
            .field("name", &self.name)
            .field("family", &self.codec.family())
            .finish()
    }
}

/// Insertion-ordered set of codecs.
#[derive(Debug, Default, Clone)]
pub struct CodecRegistry {
    entries: Vec<CodecEntry>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a codec.
    ///
    /// Returns `Ok(false)` if this exact instance is already registered.
    pub fn register(&mut self, codec: Arc<dyn ObjectCodec>) -> TpcResult<bool> {
        if self.entries.iter().any(|e| Arc::ptr_eq(&e.codec, &codec)) {
            return Ok(false);
        }

        let name = CodecName::new(codec.name())?;
        if self.entries.iter().any(|e| e.name == name) {
            return Err(HardValidationError::DuplicateCodecName {
                name: name.to_string(),
            }
            .into());
        }

        tracing::debug!(codec = %name, family = %codec.family(), "Registered codec");
        self.entries.push(CodecEntry { name, codec });
        Ok(true)
    }

    /// Register every codec in order.
    pub fn register_all(
        &mut self,
        codecs: impl IntoIterator<Item = Arc<dyn ObjectCodec>>,
    ) -> TpcResult<()> {
        for codec in codecs {
            self.register(codec)?;
        }
        Ok(())
    }

    /// Keep only the named codecs, preserving registration order.
    ///
    /// Fails if a name does not match any registered codec.
    pub fn retain_named(&mut self, names: &[CodecName]) -> TpcResult<()> {
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.entries.iter().any(|e| &e.name == *n))
        {
            return Err(HardValidationError::UnknownCodec {
                name: unknown.to_string(),
            }
            .into());
        }

        self.entries.retain(|e| names.contains(&e.name));
        Ok(())
    }

    /// Iterate over entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CodecEntry> {
        self.entries.iter()
    }

    /// Get the names of all codecs in registration order.
    pub fn names(&self) -> Vec<CodecName> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Get the number of registered codecs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecResult, TpcError};
    use crate::payload::Media;

    struct Named(&'static str);

    impl ObjectCodec for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn serialize(&self, _media: &Media) -> CodecResult<Vec<u8>> {
            Ok(vec![0])
        }

        fn deserialize(&self, _bytes: &[u8]) -> CodecResult<Media> {
            Ok(Media::fixture())
        }
    }

    fn names(registry: &CodecRegistry) -> Vec<String> {
        registry.names().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut registry = CodecRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            assert!(registry.register(Arc::new(Named(name))).unwrap());
        }
        assert_eq!(names(&registry), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_same_instance_ignored() {
        let mut registry = CodecRegistry::new();
        let codec: Arc<dyn ObjectCodec> = Arc::new(Named("json"));

        assert!(registry.register(Arc::clone(&codec)).unwrap());
        assert!(!registry.register(codec).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = CodecRegistry::new();
        registry.register(Arc::new(Named("json"))).unwrap();

        let result = registry.register(Arc::new(Named("json")));
        assert!(matches!(
            result,
            Err(TpcError::HardValidation(
                HardValidationError::DuplicateCodecName { .. }
            ))
        ));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut registry = CodecRegistry::new();
        assert!(registry.register(Arc::new(Named("a,b"))).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_retain_named_keeps_registration_order() {
        let mut registry = CodecRegistry::new();
        for name in ["bincode", "json", "yaml"] {
            registry.register(Arc::new(Named(name))).unwrap();
        }

        let wanted = vec![
            CodecName::new("yaml").unwrap(),
            CodecName::new("bincode").unwrap(),
        ];
        registry.retain_named(&wanted).unwrap();
        assert_eq!(names(&registry), vec!["bincode", "yaml"]);
    }

    #[test]
    fn test_retain_named_unknown() {
        let mut registry = CodecRegistry::new();
        registry.register(Arc::new(Named("json"))).unwrap();

        let result = registry.retain_named(&[CodecName::new("protobuf").unwrap()]);
        assert!(result.is_err());
        assert_eq!(registry.len(), 1);
    }
}
