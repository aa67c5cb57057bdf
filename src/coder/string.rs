//! UTF-8 string coder
//!
//! Format: varint byte length, then the UTF-8 bytes.

use std::io::{Read, Write};

use crate::error::{IsmError, Result};

use super::{read_len_prefixed, varint, Coder};

/// Coder for `String` as length-prefixed UTF-8
#[derive(Debug, Clone, Copy, Default)]
pub struct StringUtf8Coder;

impl Coder<String> for StringUtf8Coder {
    fn encode(&self, value: &String, out: &mut dyn Write) -> Result<()> {
        varint::encode_u64(value.len() as u64, out)?;
        out.write_all(value.as_bytes())?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<String> {
        let len = varint::decode_u64(input)?;
        let bytes = read_len_prefixed(input, len, "string")?;
        String::from_utf8(bytes)
            .map_err(|e| IsmError::Format(format!("String is not valid UTF-8: {}", e)))
    }

    fn name(&self) -> String {
        "StringUtf8Coder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &String) -> Option<u64> {
        Some((varint::encoded_len(value.len() as u64) + value.len()) as u64)
    }
}
