//! Record coder
//!
//! Encodes an `IsmRecord` as its key components followed by its payload.
//!
//! ## Format
//! ```text
//! ┌──────────────┬─────┬──────────────┬─────────────────────────────────┐
//! │ Component 1  │ ... │ Component N  │ Value  -or-  Metadata (len+raw) │
//! └──────────────┴─────┴──────────────┴─────────────────────────────────┘
//! ```
//!
//! Each component uses its own coder. The payload is the value (value coder)
//! for ordinary keys and the metadata blob (`ByteArrayCoder`) for metadata
//! keys. This coder alone does not produce an Ism file; the writer lays
//! records out into shard blocks.

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::coder::{self, ByteArrayCoder, Coder, StructuralValue};
use crate::config::IsmConfig;
use crate::error::{IsmError, Result};
use crate::shard::{ComponentCoder, EncodedKey, ShardHasher};

use super::metadata::{is_metadata_key, KeyComponent};
use super::record::{IsmRecord, Payload};
use super::ShardId;

/// Coder for `IsmRecord<K, V>`
#[derive(Debug, Clone)]
pub struct RecordCoder<K, V> {
    config: IsmConfig,
    hasher: ShardHasher<K>,
    value_coder: Arc<dyn Coder<V>>,
}

impl<K, V> RecordCoder<K, V>
where
    K: Send + Sync + fmt::Debug,
    V: Send + Sync + fmt::Debug,
{
    /// Create a record coder from per-component key coders and a value coder
    pub fn new(
        config: IsmConfig,
        key_coders: Vec<ComponentCoder<K>>,
        value_coder: Arc<dyn Coder<V>>,
    ) -> Result<Self> {
        let n = key_coders.len();
        if n == 0 {
            return Err(IsmError::Argument(
                "Expected at least one key component coder".to_string(),
            ));
        }
        if config.shard_key_arity == 0 || config.shard_key_arity > n {
            return Err(IsmError::Argument(format!(
                "Shard key arity {} must be between 1 and {}",
                config.shard_key_arity, n
            )));
        }
        if config.metadata_shard_key_arity > n {
            return Err(IsmError::Argument(format!(
                "Metadata shard key arity {} must be at most {}",
                config.metadata_shard_key_arity, n
            )));
        }

        let record_coder = Self {
            config,
            hasher: ShardHasher::new(
                config.shard_key_arity,
                config.metadata_shard_key_arity,
                key_coders,
            ),
            value_coder,
        };

        if config.verify_determinism {
            record_coder.verify_deterministic()?;
        }

        tracing::debug!(
            components = n,
            shard_key_arity = config.shard_key_arity,
            metadata_shard_key_arity = config.metadata_shard_key_arity,
            "Created record coder"
        );

        Ok(record_coder)
    }

    pub fn config(&self) -> &IsmConfig {
        &self.config
    }

    /// Number of key components every record must have
    pub fn key_arity(&self) -> usize {
        self.hasher.key_coders().len()
    }

    pub fn key_component_coders(&self) -> &[ComponentCoder<K>] {
        self.hasher.key_coders()
    }

    pub fn key_component_coder(&self, index: usize) -> Option<&ComponentCoder<K>> {
        self.hasher.key_coders().get(index)
    }

    pub fn value_coder(&self) -> &Arc<dyn Coder<V>> {
        &self.value_coder
    }

    pub fn hasher(&self) -> &ShardHasher<K> {
        &self.hasher
    }

    /// Number of leading components that pick the shard of `key`
    pub fn shard_key_arity_for(&self, key: &[KeyComponent<K>]) -> usize {
        self.hasher.shard_key_arity_for(key)
    }

    /// Shard id of a full or partial key
    pub fn hash(&self, key: &[KeyComponent<K>]) -> Result<ShardId> {
        self.hasher.hash(key)
    }

    /// Serialize a full or partial key and compute its shard id
    pub fn encode_and_hash(&self, key: &[KeyComponent<K>]) -> Result<EncodedKey> {
        self.hasher.encode_and_hash(key)
    }

    /// Check that only the key component coders are deterministic
    ///
    /// Keys are hashed and sorted by their encoding; values are not.
    pub fn validate_key_coders(&self) -> Result<()> {
        for coder in self.hasher.key_coders() {
            coder.verify_deterministic().map_err(|e| {
                IsmError::Argument(format!(
                    "Key component coder {} is expected to be deterministic: {}",
                    coder.name(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Structural form of `record`; equal forms mean equal encodings
    pub fn structural_value(
        &self,
        record: &IsmRecord<K, V>,
    ) -> Result<StructuralValue<IsmRecord<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        if record.key_components().len() != self.key_arity() {
            return Err(IsmError::State(format!(
                "Expected the number of key component coders {} to match the number of key components {}",
                self.key_arity(),
                record.key_components().len()
            )));
        }
        coder::structural_value(self, record)
    }
}

impl<K, V> Coder<IsmRecord<K, V>> for RecordCoder<K, V>
where
    K: Send + Sync + fmt::Debug,
    V: Send + Sync + fmt::Debug,
{
    fn encode(&self, record: &IsmRecord<K, V>, out: &mut dyn Write) -> Result<()> {
        let key = record.key_components();
        if key.len() != self.key_arity() {
            return Err(IsmError::Argument(format!(
                "Expected {} key component(s) but received {}",
                self.key_arity(),
                key.len()
            )));
        }
        for (coder, component) in self.hasher.key_coders().iter().zip(key) {
            coder.encode(component, out)?;
        }
        match record.payload() {
            Payload::Metadata(metadata) => ByteArrayCoder.encode(metadata, out),
            Payload::Value(value) => self.value_coder.encode(value, out),
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<IsmRecord<K, V>> {
        let mut key = Vec::with_capacity(self.key_arity());
        for coder in self.hasher.key_coders() {
            key.push(coder.decode(input)?);
        }
        if is_metadata_key(&key) {
            IsmRecord::meta(key, ByteArrayCoder.decode(input)?)
        } else {
            IsmRecord::of(key, self.value_coder.decode(input)?)
        }
    }

    fn name(&self) -> String {
        let components: Vec<String> = self.hasher.key_coders().iter().map(|c| c.name()).collect();
        format!(
            "IsmRecordCoder([{}], {})",
            components.join(", "),
            self.value_coder.name()
        )
    }

    fn verify_deterministic(&self) -> Result<()> {
        for (index, coder) in self.hasher.key_coders().iter().enumerate() {
            if let Err(e) = coder.verify_deterministic() {
                tracing::warn!(index, coder = %coder.name(), "Key component coder is not deterministic");
                return Err(IsmError::NonDeterministic {
                    coder: format!("key component {} ({})", index, coder.name()),
                    reason: format!("Key component coders expected to be deterministic: {}", e),
                });
            }
        }
        if let Err(e) = self.value_coder.verify_deterministic() {
            tracing::warn!(coder = %self.value_coder.name(), "Value coder is not deterministic");
            return Err(IsmError::NonDeterministic {
                coder: format!("value ({})", self.value_coder.name()),
                reason: format!("Value coder expected to be deterministic: {}", e),
            });
        }
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        self.hasher
            .key_coders()
            .iter()
            .all(|c| c.consistent_with_equals())
            && self.value_coder.consistent_with_equals()
    }
}
