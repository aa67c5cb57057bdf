//! Shard descriptors and the shard index
//!
//! A descriptor locates one shard's data block and data index within the
//! file. The writer learns the block offset first and the index offset only
//! after the block is written, so descriptors are built in two steps:
//!
//! ```text
//! PartialShardDescriptor { id, block_offset }
//!     └── with_index_offset(..) ──► ShardDescriptor { id, block_offset, index_offset }
//! ```
//!
//! Only the complete `ShardDescriptor` can be encoded.
//!
//! ## Format
//! ```text
//! ┌─────────────┬───────────────────────┬───────────────────────┐
//! │ Id (varint) │ BlockOffset (varlong) │ IndexOffset (varlong) │
//! └─────────────┴───────────────────────┴───────────────────────┘
//! ```
//!
//! The shard index is a list of descriptors: a varint count, then each
//! descriptor back to back.

use std::fmt;
use std::io::{Read, Write};

use crate::coder::{varint, Coder, ListCoder};
use crate::error::{IsmError, Result};

use super::ShardId;

/// A shard whose data index has not been written yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialShardDescriptor {
    id: ShardId,
    block_offset: u64,
}

impl PartialShardDescriptor {
    pub fn new(id: ShardId, block_offset: u64) -> Self {
        Self { id, block_offset }
    }

    pub fn id(&self) -> ShardId {
        self.id
    }

    pub fn block_offset(&self) -> u64 {
        self.block_offset
    }

    /// Complete the descriptor once the data index position is known
    pub fn with_index_offset(self, index_offset: u64) -> ShardDescriptor {
        ShardDescriptor::new(self.id, self.block_offset, index_offset)
    }
}

/// A complete shard descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardDescriptor {
    id: ShardId,
    block_offset: u64,
    index_offset: u64,
}

impl ShardDescriptor {
    pub fn new(id: ShardId, block_offset: u64, index_offset: u64) -> Self {
        Self {
            id,
            block_offset,
            index_offset,
        }
    }

    pub fn id(&self) -> ShardId {
        self.id
    }

    /// Absolute file position where the data block begins
    pub fn block_offset(&self) -> u64 {
        self.block_offset
    }

    /// Absolute file position where the data index begins
    pub fn index_offset(&self) -> u64 {
        self.index_offset
    }
}

impl fmt::Display for ShardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IsmShard{{id={}, blockOffset={}, indexOffset={}}}",
            self.id, self.block_offset, self.index_offset
        )
    }
}

/// Coder for `ShardDescriptor`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShardDescriptorCoder;

impl Coder<ShardDescriptor> for ShardDescriptorCoder {
    fn encode(&self, value: &ShardDescriptor, out: &mut dyn Write) -> Result<()> {
        varint::encode_u32(u32::from(value.id), out)?;
        varint::encode_u64(value.block_offset, out)?;
        varint::encode_u64(value.index_offset, out)?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<ShardDescriptor> {
        let raw_id = varint::decode_u32(input)?;
        let id = ShardId::try_from(raw_id)
            .map_err(|_| IsmError::Format(format!("Shard id {} is outside 0..=255", raw_id)))?;
        let block_offset = varint::decode_u64(input)?;
        let index_offset = varint::decode_u64(input)?;
        Ok(ShardDescriptor::new(id, block_offset, index_offset))
    }

    fn name(&self) -> String {
        "IsmShardCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &ShardDescriptor) -> Option<u64> {
        Some(
            (varint::encoded_len(u64::from(value.id))
                + varint::encoded_len(value.block_offset)
                + varint::encoded_len(value.index_offset)) as u64,
        )
    }
}

/// Coder for the shard index
pub type ShardIndexCoder = ListCoder<ShardDescriptorCoder>;

/// Returns the coder for the shard index
pub fn shard_index_coder() -> ShardIndexCoder {
    ListCoder::new(ShardDescriptorCoder)
}
