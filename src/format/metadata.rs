//! Key components and the metadata wildcard
//!
//! A metadata record is keyed by a composite key in which at least one
//! component is the wildcard rather than a real value. Ordinary records never
//! contain the wildcard.
//!
//! ## Wildcard-aware encoding (`MetadataKeyCoder`)
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Tag (1)  │ Inner encoding (tag 1 only) │
//! └──────────┴─────────────────────────────┘
//! ```
//! - 0x00: metadata wildcard, nothing follows
//! - 0x01: value, followed by the inner coder's encoding

use std::fmt;
use std::io::{Read, Write};

use crate::coder::{read_byte, Coder};
use crate::error::{IsmError, Result};

/// Tag written for the metadata wildcard
pub const METADATA_TAG: u8 = 0x00;

/// Tag written before an ordinary value
pub const VALUE_TAG: u8 = 0x01;

// =============================================================================
// Key Components
// =============================================================================

/// One component of a composite key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyComponent<K> {
    /// A real key value
    Value(K),
    /// Placeholder marking the key as a metadata key
    MetadataWildcard,
}

impl<K> KeyComponent<K> {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, KeyComponent::MetadataWildcard)
    }

    /// Borrow the value, or `None` for the wildcard
    pub fn as_value(&self) -> Option<&K> {
        match self {
            KeyComponent::Value(v) => Some(v),
            KeyComponent::MetadataWildcard => None,
        }
    }
}

impl<K> From<K> for KeyComponent<K> {
    fn from(value: K) -> Self {
        KeyComponent::Value(value)
    }
}

impl<K: fmt::Display> fmt::Display for KeyComponent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyComponent::Value(v) => fmt::Display::fmt(v, f),
            KeyComponent::MetadataWildcard => f.write_str("META"),
        }
    }
}

/// Returns true iff any component is the metadata wildcard
pub fn is_metadata_key<K>(key: &[KeyComponent<K>]) -> bool {
    key.iter().any(KeyComponent::is_wildcard)
}

// =============================================================================
// Component Coders
// =============================================================================

/// Wraps a value coder so the component may also be the metadata wildcard
#[derive(Debug, Clone)]
pub struct MetadataKeyCoder<C> {
    key_coder: C,
}

impl<C> MetadataKeyCoder<C> {
    pub fn new(key_coder: C) -> Self {
        Self { key_coder }
    }

    pub fn key_coder(&self) -> &C {
        &self.key_coder
    }
}

impl<K, C> Coder<KeyComponent<K>> for MetadataKeyCoder<C>
where
    C: Coder<K>,
{
    fn encode(&self, value: &KeyComponent<K>, out: &mut dyn Write) -> Result<()> {
        match value {
            KeyComponent::MetadataWildcard => {
                out.write_all(&[METADATA_TAG])?;
                Ok(())
            }
            KeyComponent::Value(v) => {
                out.write_all(&[VALUE_TAG])?;
                self.key_coder.encode(v, out)
            }
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<KeyComponent<K>> {
        match read_byte(input, "metadata key tag")? {
            METADATA_TAG => Ok(KeyComponent::MetadataWildcard),
            VALUE_TAG => Ok(KeyComponent::Value(self.key_coder.decode(input)?)),
            tag => Err(IsmError::Format(format!(
                "Expected metadata key tag 0x00 or 0x01 but got 0x{:02x}",
                tag
            ))),
        }
    }

    fn name(&self) -> String {
        format!("MetadataKeyCoder({})", self.key_coder.name())
    }

    fn verify_deterministic(&self) -> Result<()> {
        self.key_coder
            .verify_deterministic()
            .map_err(|e| IsmError::NonDeterministic {
                coder: self.name(),
                reason: format!("Expected key coder to be deterministic: {}", e),
            })
    }

    fn consistent_with_equals(&self) -> bool {
        self.key_coder.consistent_with_equals()
    }

    fn encoded_size(&self, value: &KeyComponent<K>) -> Option<u64> {
        match value {
            KeyComponent::MetadataWildcard => Some(1),
            KeyComponent::Value(v) => self.key_coder.encoded_size(v).map(|n| n + 1),
        }
    }
}

/// Lifts a value coder into a key-component coder with no wildcard support
///
/// The encoding is exactly the inner coder's; a wildcard cannot be encoded.
#[derive(Debug, Clone)]
pub struct PlainKeyCoder<C> {
    key_coder: C,
}

impl<C> PlainKeyCoder<C> {
    pub fn new(key_coder: C) -> Self {
        Self { key_coder }
    }

    pub fn key_coder(&self) -> &C {
        &self.key_coder
    }
}

impl<K, C> Coder<KeyComponent<K>> for PlainKeyCoder<C>
where
    C: Coder<K>,
{
    fn encode(&self, value: &KeyComponent<K>, out: &mut dyn Write) -> Result<()> {
        match value {
            KeyComponent::Value(v) => self.key_coder.encode(v, out),
            KeyComponent::MetadataWildcard => Err(IsmError::Argument(format!(
                "{} cannot encode the metadata wildcard; wrap it in a MetadataKeyCoder",
                self.key_coder.name()
            ))),
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<KeyComponent<K>> {
        Ok(KeyComponent::Value(self.key_coder.decode(input)?))
    }

    fn name(&self) -> String {
        self.key_coder.name()
    }

    fn verify_deterministic(&self) -> Result<()> {
        self.key_coder.verify_deterministic()
    }

    fn consistent_with_equals(&self) -> bool {
        self.key_coder.consistent_with_equals()
    }

    fn encoded_size(&self, value: &KeyComponent<K>) -> Option<u64> {
        value.as_value().and_then(|v| self.key_coder.encoded_size(v))
    }
}
