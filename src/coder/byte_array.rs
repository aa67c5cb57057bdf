//! Raw byte coder
//!
//! Format: varint byte length, then the bytes. Used for metadata blobs.

use std::io::{Read, Write};

use bytes::Bytes;

use crate::error::Result;

use super::{read_len_prefixed, varint, Coder};

/// Coder for raw bytes as a length-prefixed run
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteArrayCoder;

impl Coder<Bytes> for ByteArrayCoder {
    fn encode(&self, value: &Bytes, out: &mut dyn Write) -> Result<()> {
        varint::encode_u64(value.len() as u64, out)?;
        out.write_all(value)?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Bytes> {
        let len = varint::decode_u64(input)?;
        Ok(Bytes::from(read_len_prefixed(input, len, "byte array")?))
    }

    fn name(&self) -> String {
        "ByteArrayCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    // `Bytes` compares by content
    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &Bytes) -> Option<u64> {
        Some((varint::encoded_len(value.len() as u64) + value.len()) as u64)
    }
}
