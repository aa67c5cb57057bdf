//! Ism file footer
//!
//! Fixed-length trailer at the very end of the file. It locates the shard
//! index and bloom filter and records the number of keys.
//!
//! ## Format (25 bytes)
//! ```text
//! ┌────────────────────┬────────────────────────┬───────────────────┬─────────────┐
//! │ IndexPosition (8)  │ BloomFilterPosition (8)│ NumberOfKeys (8)  │ Version (1) │
//! └────────────────────┴────────────────────────┴───────────────────┴─────────────┘
//! ```
//! All integers are big-endian. Only version 2 is supported.

use std::fmt;
use std::io::{Read, Write};

use bytes::{Buf, BufMut};

use crate::coder::{read_exact, Coder};
use crate::error::{IsmError, Result};

/// The footer of an Ism file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Footer {
    index_position: u64,
    bloom_filter_position: u64,
    number_of_keys: u64,
}

impl Footer {
    /// Bytes per 64-bit field
    pub const LONG_BYTES: usize = 8;

    /// Encoded size of every footer
    pub const FIXED_LENGTH: usize = 3 * Self::LONG_BYTES + 1;

    /// The only supported format version
    pub const VERSION: u8 = 2;

    pub fn new(index_position: u64, bloom_filter_position: u64, number_of_keys: u64) -> Self {
        Self {
            index_position,
            bloom_filter_position,
            number_of_keys,
        }
    }

    /// Absolute file position of the shard index
    pub fn index_position(&self) -> u64 {
        self.index_position
    }

    /// Absolute file position of the bloom filter
    pub fn bloom_filter_position(&self) -> u64 {
        self.bloom_filter_position
    }

    pub fn number_of_keys(&self) -> u64 {
        self.number_of_keys
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Footer{{version={}, indexPosition={}, bloomFilterPosition={}, numberOfKeys={}}}",
            Self::VERSION,
            self.index_position,
            self.bloom_filter_position,
            self.number_of_keys
        )
    }
}

/// Coder for `Footer`
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterCoder;

impl Coder<Footer> for FooterCoder {
    fn encode(&self, value: &Footer, out: &mut dyn Write) -> Result<()> {
        let mut buf = [0u8; Footer::FIXED_LENGTH];
        let mut cursor = &mut buf[..];
        cursor.put_u64(value.index_position);
        cursor.put_u64(value.bloom_filter_position);
        cursor.put_u64(value.number_of_keys);
        cursor.put_u8(Footer::VERSION);
        out.write_all(&buf)?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Footer> {
        let mut raw = [0u8; Footer::FIXED_LENGTH];
        read_exact(input, &mut raw, "footer")?;

        let mut buf = &raw[..];
        let footer = Footer::new(buf.get_u64(), buf.get_u64(), buf.get_u64());
        let version = buf.get_u8();
        if version != Footer::VERSION {
            return Err(IsmError::Format(format!(
                "Unknown version {}. Only version {} is currently supported.",
                version,
                Footer::VERSION
            )));
        }
        Ok(footer)
    }

    fn name(&self) -> String {
        "FooterCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, _value: &Footer) -> Option<u64> {
        Some(Footer::FIXED_LENGTH as u64)
    }
}
