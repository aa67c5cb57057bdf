//! Key prefix for prefix-delta key compression
//!
//! Each key in a data block or data index is stored relative to the key
//! before it:
//!
//! ```text
//! current_key = previous_key[0..shared] ++ read(unshared)
//! ```
//!
//! ## Format
//! ```text
//! ┌──────────────────────┬────────────────────────┐
//! │ Shared (varint)      │ Unshared (varint)      │
//! └──────────────────────┴────────────────────────┘
//! ```

use std::fmt;
use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::coder::{varint, Coder};
use crate::error::{IsmError, Result};

/// Number of bytes a key shares with its predecessor and how many follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyPrefix {
    shared_key_size: u32,
    unshared_key_size: u32,
}

impl KeyPrefix {
    pub fn new(shared_key_size: u32, unshared_key_size: u32) -> Self {
        Self {
            shared_key_size,
            unshared_key_size,
        }
    }

    /// Compute the prefix that encodes `current` relative to `previous`
    pub fn between(previous: &[u8], current: &[u8]) -> Result<Self> {
        let shared = previous
            .iter()
            .zip(current)
            .take_while(|(a, b)| a == b)
            .count();
        let unshared = current.len() - shared;
        let to_u32 = |n: usize| {
            u32::try_from(n)
                .map_err(|_| IsmError::Argument(format!("Key length {} exceeds u32", n)))
        };
        Ok(Self::new(to_u32(shared)?, to_u32(unshared)?))
    }

    pub fn shared_key_size(&self) -> u32 {
        self.shared_key_size
    }

    pub fn unshared_key_size(&self) -> u32 {
        self.unshared_key_size
    }

    /// Rebuild the current key from its predecessor and the unshared bytes
    pub fn reconstruct(&self, previous: &[u8], unshared: &[u8]) -> Result<Bytes> {
        let shared = self.shared_key_size as usize;
        if shared > previous.len() {
            return Err(IsmError::Format(format!(
                "Key prefix shares {} bytes but the previous key has only {}",
                shared,
                previous.len()
            )));
        }
        if unshared.len() != self.unshared_key_size as usize {
            return Err(IsmError::Format(format!(
                "Key prefix expects {} unshared bytes but got {}",
                self.unshared_key_size,
                unshared.len()
            )));
        }
        let mut key = BytesMut::with_capacity(shared + unshared.len());
        key.put_slice(&previous[..shared]);
        key.put_slice(unshared);
        Ok(key.freeze())
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KeyPrefix{{sharedKeySize={}, unsharedKeySize={}}}",
            self.shared_key_size, self.unshared_key_size
        )
    }
}

/// Coder for `KeyPrefix` as two varints
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPrefixCoder;

impl Coder<KeyPrefix> for KeyPrefixCoder {
    fn encode(&self, value: &KeyPrefix, out: &mut dyn Write) -> Result<()> {
        varint::encode_u32(value.shared_key_size, out)?;
        varint::encode_u32(value.unshared_key_size, out)?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<KeyPrefix> {
        let shared = varint::decode_u32(input)?;
        let unshared = varint::decode_u32(input)?;
        Ok(KeyPrefix::new(shared, unshared))
    }

    fn name(&self) -> String {
        "KeyPrefixCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &KeyPrefix) -> Option<u64> {
        Some(
            (varint::encoded_len(u64::from(value.shared_key_size))
                + varint::encoded_len(u64::from(value.unshared_key_size))) as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_shares_common_prefix() {
        let prefix = KeyPrefix::between(b"apple", b"apricot").unwrap();
        assert_eq!(prefix, KeyPrefix::new(2, 5));
    }

    #[test]
    fn test_between_first_key() {
        let prefix = KeyPrefix::between(b"", b"abc").unwrap();
        assert_eq!(prefix, KeyPrefix::new(0, 3));
    }

    #[test]
    fn test_reconstruct() {
        let prefix = KeyPrefix::new(2, 5);
        let key = prefix.reconstruct(b"apple", b"ricot").unwrap();
        assert_eq!(&key[..], b"apricot");
    }

    #[test]
    fn test_reconstruct_rejects_oversized_share() {
        let prefix = KeyPrefix::new(9, 0);
        assert!(prefix.reconstruct(b"abc", b"").unwrap_err().is_format());
    }
}
