//! Shard Module
//!
//! Maps composite keys to shard ids.
//!
//! ## Shard id space
//! ```text
//! ┌────────────────────────────┬────────────────────────────┐
//! │ 0..=127 ordinary records   │ 128..=255 metadata records │
//! └────────────────────────────┴────────────────────────────┘
//! ```
//!
//! The two ranges never overlap, so a reader can tell from the shard index
//! alone which shards hold metadata.

mod hasher;
mod murmur3;

pub use hasher::{
    is_metadata_shard, ComponentCoder, EncodedKey, ShardHasher, HASH_SEED,
    METADATA_SHARD_OFFSET, SHARD_BITS,
};
pub use murmur3::murmur3_x86_32;
