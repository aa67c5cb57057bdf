//! Format Module
//!
//! Byte-level structures of an Ism file.
//!
//! ## File Layout
//! ```text
//! ┌──────────────────────────────┐
//! │ Shard 0: data block          │  records, keys prefix-delta encoded
//! │ Shard 0: data index          │
//! ├──────────────────────────────┤
//! │ ...                          │
//! ├──────────────────────────────┤
//! │ Shard N: data block          │
//! │ Shard N: data index          │
//! ├──────────────────────────────┤
//! │ Bloom filter                 │  ◄── Footer.bloom_filter_position
//! ├──────────────────────────────┤
//! │ Shard index (descriptors)    │  ◄── Footer.index_position
//! ├──────────────────────────────┤
//! │ Footer (25 bytes)            │
//! └──────────────────────────────┘
//! ```
//!
//! ## Responsibilities
//! - Key prefixes for delta-compressed keys
//! - Records and their wire encoding
//! - Shard descriptors and the shard index
//! - The fixed-length footer

mod footer;
mod key_prefix;
mod metadata;
mod record;
mod record_coder;
mod shard;

pub use footer::{Footer, FooterCoder};
pub use key_prefix::{KeyPrefix, KeyPrefixCoder};
pub use metadata::{
    is_metadata_key, KeyComponent, MetadataKeyCoder, PlainKeyCoder, METADATA_TAG, VALUE_TAG,
};
pub use record::{IsmRecord, Payload};
pub use record_coder::RecordCoder;
pub use shard::{
    shard_index_coder, PartialShardDescriptor, ShardDescriptor, ShardDescriptorCoder,
    ShardIndexCoder,
};

/// Identifies a shard; 0..=127 hold records, 128..=255 hold metadata
pub type ShardId = u8;
