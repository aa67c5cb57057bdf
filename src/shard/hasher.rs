//! Composite-key shard hasher
//!
//! Serializes a composite key and derives its shard id from the leading
//! shard-key components.
//!
//! ## Algorithm
//! 1. Metadata keys hash their first `metadata_shard_key_arity` components and
//!    land in shards 128..=255; ordinary keys hash their first
//!    `shard_key_arity` components and land in shards 0..=127.
//! 2. The shard-key components are encoded into one buffer and hashed with
//!    MurmurHash3 x86_32 (seed `1225801234`), masked to 7 bits.
//! 3. Remaining components are appended to the same buffer without
//!    affecting the hash.

use std::io::Write;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};

use crate::coder::Coder;
use crate::error::{IsmError, Result};
use crate::format::{is_metadata_key, KeyComponent, ShardId};

use super::murmur3::murmur3_x86_32;

/// Seed for every shard hash in an Ism file
pub const HASH_SEED: u32 = 1_225_801_234;

/// Mask applied to the hash; also the highest ordinary shard id
pub const SHARD_BITS: u32 = 0x7F;

/// Added to the masked hash of metadata keys
pub const METADATA_SHARD_OFFSET: ShardId = (SHARD_BITS + 1) as ShardId;

/// Coder for one key component, shared across threads
pub type ComponentCoder<K> = Arc<dyn Coder<KeyComponent<K>>>;

/// A serialized key together with its shard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKey {
    /// Shard the key belongs to
    pub shard_id: ShardId,
    /// Encoding of all supplied components, back to back
    pub bytes: Bytes,
    /// End offset within `bytes` of each component's encoding
    pub component_offsets: Vec<usize>,
}

impl EncodedKey {
    /// Bytes of the component at `index`
    pub fn component_bytes(&self, index: usize) -> Option<&[u8]> {
        let end = *self.component_offsets.get(index)?;
        let start = match index {
            0 => 0,
            _ => self.component_offsets[index - 1],
        };
        Some(&self.bytes[start..end])
    }
}

/// Returns true iff `shard_id` belongs to the metadata shard range
pub fn is_metadata_shard(shard_id: ShardId) -> bool {
    shard_id >= METADATA_SHARD_OFFSET
}

/// Computes shard ids for composite keys
#[derive(Debug, Clone)]
pub struct ShardHasher<K> {
    shard_key_arity: usize,
    metadata_shard_key_arity: usize,
    key_coders: Vec<ComponentCoder<K>>,
}

impl<K> ShardHasher<K> {
    /// Create a hasher; arities are validated by the record coder
    pub(crate) fn new(
        shard_key_arity: usize,
        metadata_shard_key_arity: usize,
        key_coders: Vec<ComponentCoder<K>>,
    ) -> Self {
        Self {
            shard_key_arity,
            metadata_shard_key_arity,
            key_coders,
        }
    }

    pub fn key_coders(&self) -> &[ComponentCoder<K>] {
        &self.key_coders
    }

    /// Number of leading components that pick the shard of `key`
    pub fn shard_key_arity_for(&self, key: &[KeyComponent<K>]) -> usize {
        if is_metadata_key(key) {
            self.metadata_shard_key_arity
        } else {
            self.shard_key_arity
        }
    }

    /// Shard id of a full or partial key
    pub fn hash(&self, key: &[KeyComponent<K>]) -> Result<ShardId> {
        Ok(self.encode_and_hash(key)?.shard_id)
    }

    /// Serialize a full or partial key and compute its shard id
    pub fn encode_and_hash(&self, key: &[KeyComponent<K>]) -> Result<EncodedKey> {
        if key.len() > self.key_coders.len() {
            return Err(IsmError::Argument(format!(
                "Expected at most {} key component(s) but received {}",
                self.key_coders.len(),
                key.len()
            )));
        }

        let (arity, offset) = if is_metadata_key(key) {
            (self.metadata_shard_key_arity, METADATA_SHARD_OFFSET)
        } else {
            (self.shard_key_arity, 0)
        };

        if key.len() < arity {
            return Err(IsmError::Argument(format!(
                "Expected at least {} key component(s) but received {}",
                arity,
                key.len()
            )));
        }

        let mut writer = BytesMut::new().writer();
        let mut component_offsets = Vec::with_capacity(key.len());

        for (index, component) in key.iter().enumerate().take(arity) {
            self.encode_component(index, component, &mut writer)?;
            component_offsets.push(writer.get_ref().len());
        }

        let hash = murmur3_x86_32(writer.get_ref(), HASH_SEED);
        let shard_id = (hash & SHARD_BITS) as ShardId + offset;

        for (index, component) in key.iter().enumerate().skip(arity) {
            self.encode_component(index, component, &mut writer)?;
            component_offsets.push(writer.get_ref().len());
        }

        let bytes = writer.into_inner().freeze();
        tracing::trace!(shard_id, key_len = bytes.len(), "Computed shard for key");

        Ok(EncodedKey {
            shard_id,
            bytes,
            component_offsets,
        })
    }

    fn encode_component(
        &self,
        index: usize,
        component: &KeyComponent<K>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let coder = &self.key_coders[index];
        coder.encode(component, out).map_err(|e| match e {
            IsmError::Io(io) => IsmError::State(format!(
                "Failed to hash key component {} with coder {}: {}",
                index,
                coder.name(),
                io
            )),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::{BigEndianIntCoder, StringUtf8Coder};
    use crate::format::{MetadataKeyCoder, PlainKeyCoder};

    fn int_hasher() -> ShardHasher<i32> {
        ShardHasher::new(
            1,
            1,
            vec![
                Arc::new(MetadataKeyCoder::new(BigEndianIntCoder)) as ComponentCoder<i32>,
                Arc::new(PlainKeyCoder::new(BigEndianIntCoder)) as ComponentCoder<i32>,
            ],
        )
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let hasher = int_hasher();
        let encoded = hasher
            .encode_and_hash(&[KeyComponent::Value(1), KeyComponent::Value(2)])
            .unwrap();
        assert_eq!(encoded.component_offsets, vec![5, 9]);
        assert_eq!(encoded.bytes.len(), 9);
        assert_eq!(encoded.component_bytes(1), Some(&[0, 0, 0, 2][..]));
        assert_eq!(encoded.component_bytes(2), None);
    }

    #[test]
    fn test_only_shard_key_is_hashed() {
        let hasher = int_hasher();
        let a = hasher
            .hash(&[KeyComponent::Value(42), KeyComponent::Value(1)])
            .unwrap();
        let b = hasher
            .hash(&[KeyComponent::Value(42), KeyComponent::Value(99)])
            .unwrap();
        let partial = hasher.hash(&[KeyComponent::Value(42)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, partial);
    }

    #[test]
    fn test_metadata_shards_are_offset() {
        let hasher = int_hasher();
        let shard = hasher.hash(&[KeyComponent::MetadataWildcard]).unwrap();
        assert!(is_metadata_shard(shard));
        let expected = (murmur3_x86_32(&[0x00], HASH_SEED) & SHARD_BITS) as ShardId + 128;
        assert_eq!(shard, expected);
    }

    #[test]
    fn test_too_few_components() {
        let hasher = int_hasher();
        let empty: Vec<KeyComponent<i32>> = vec![];
        assert!(matches!(hasher.hash(&empty), Err(IsmError::Argument(_))));
    }

    #[test]
    fn test_too_many_components() {
        let hasher = int_hasher();
        let key = vec![KeyComponent::Value(1); 3];
        let err = hasher.hash(&key).unwrap_err();
        assert!(err.to_string().contains("at most 2"));
    }

    #[test]
    fn test_zero_metadata_arity_hashes_empty_prefix() {
        let hasher: ShardHasher<String> = ShardHasher::new(
            1,
            0,
            vec![Arc::new(MetadataKeyCoder::new(StringUtf8Coder)) as ComponentCoder<String>],
        );
        let encoded = hasher
            .encode_and_hash(&[KeyComponent::MetadataWildcard])
            .unwrap();
        let expected = (murmur3_x86_32(&[], HASH_SEED) & SHARD_BITS) as ShardId + 128;
        assert_eq!(encoded.shard_id, expected);
        assert_eq!(&encoded.bytes[..], &[0x00]);
    }
}
