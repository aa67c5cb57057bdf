//! # ismfile
//!
//! Core of the Ism file format: an immutable, sorted, sharded key/value file.
//! - Composite keys, with metadata keys marked by a wildcard component
//! - Shard assignment by MurmurHash3 over the leading key components
//! - Prefix-delta key compression
//! - Record, shard-index and footer codecs
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  IsmRecord<K, V>                            │
//! │          (key components + value or metadata)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RecordCoder                              │
//! │        (per-component coders + value coder)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ ShardHasher │          │  KeyPrefix  │
//!   │  (Murmur3)  │          │   (delta)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────────────────────┐
//!   │ Shard index + Footer        │
//!   │ (file trailer)              │
//!   └─────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod coder;
pub mod format;
pub mod shard;
pub mod inspect;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{IsmError, Result};
pub use config::{IsmConfig, IsmConfigBuilder};
pub use coder::{decode_from_slice, encode_to_vec, Coder, StructuralValue};
pub use format::{
    is_metadata_key, shard_index_coder, Footer, FooterCoder, IsmRecord, KeyComponent, KeyPrefix,
    KeyPrefixCoder, MetadataKeyCoder, PartialShardDescriptor, Payload, PlainKeyCoder,
    RecordCoder, ShardDescriptor, ShardDescriptorCoder, ShardId, ShardIndexCoder,
};
pub use shard::{ComponentCoder, EncodedKey, ShardHasher};
pub use inspect::{read_trailer, Trailer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ismfile
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
