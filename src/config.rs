//! Configuration for Ism record coders
//!
//! Centralized configuration with sensible defaults.

/// Configuration shared by the record coder and shard hasher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsmConfig {
    // -------------------------------------------------------------------------
    // Sharding Configuration
    // -------------------------------------------------------------------------
    /// Number of leading key components hashed to pick the shard of an
    /// ordinary (value) record. Must be in `1..=N` for N key components.
    pub shard_key_arity: usize,

    /// Number of leading key components hashed to pick the shard of a
    /// metadata record. Must be in `0..=N`.
    pub metadata_shard_key_arity: usize,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Run determinism verification on all coders when a record coder is built
    pub verify_determinism: bool,
}

impl Default for IsmConfig {
    fn default() -> Self {
        Self {
            shard_key_arity: 1,
            metadata_shard_key_arity: 1,
            verify_determinism: true,
        }
    }
}

impl IsmConfig {
    /// Create a new config builder
    pub fn builder() -> IsmConfigBuilder {
        IsmConfigBuilder::default()
    }
}

/// Builder for IsmConfig
#[derive(Default)]
pub struct IsmConfigBuilder {
    config: IsmConfig,
}

impl IsmConfigBuilder {
    /// Set the number of key components hashed for value records
    pub fn shard_key_arity(mut self, arity: usize) -> Self {
        self.config.shard_key_arity = arity;
        self
    }

    /// Set the number of key components hashed for metadata records
    pub fn metadata_shard_key_arity(mut self, arity: usize) -> Self {
        self.config.metadata_shard_key_arity = arity;
        self
    }

    /// Enable or disable determinism verification at construction
    pub fn verify_determinism(mut self, verify: bool) -> Self {
        self.config.verify_determinism = verify;
        self
    }

    pub fn build(self) -> IsmConfig {
        self.config
    }
}
