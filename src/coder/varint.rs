//! Variable-length integers
//!
//! Unsigned LEB128: seven payload bits per byte, least significant group
//! first, high bit set on every byte except the last.
//!
//! ```text
//! 300 = 0b1_0010_1100  ->  [0xAC, 0x02]
//! ```

use std::io::{self, Read, Write};

use crate::error::{IsmError, Result};

use super::{read_byte, Coder};

/// Longest encoding of a `u32`
pub const MAX_VARINT_BYTES: usize = 5;

/// Longest encoding of a `u64`
pub const MAX_VARLONG_BYTES: usize = 10;

/// Write `value` as a varint
pub fn encode_u64(mut value: u64, out: &mut dyn Write) -> io::Result<()> {
    let mut buf = [0u8; MAX_VARLONG_BYTES];
    let mut n = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[n] = byte;
            n += 1;
            break;
        }
        buf[n] = byte | 0x80;
        n += 1;
    }
    out.write_all(&buf[..n])
}

/// Write `value` as a varint
pub fn encode_u32(value: u32, out: &mut dyn Write) -> io::Result<()> {
    encode_u64(u64::from(value), out)
}

/// Read a varint of up to 64 bits
pub fn decode_u64(input: &mut dyn Read) -> Result<u64> {
    let mut result = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = read_byte(input, "varint")?;
        // The tenth byte carries only the top bit of a u64.
        if shift == 63 && byte > 1 {
            return Err(IsmError::Format(format!(
                "Varint overflows 64 bits (final byte 0x{:02x})",
                byte
            )));
        }
        result |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

/// Read a varint that must fit in 32 bits
pub fn decode_u32(input: &mut dyn Read) -> Result<u32> {
    let value = decode_u64(input)?;
    u32::try_from(value)
        .map_err(|_| IsmError::Format(format!("Varint {} does not fit in 32 bits", value)))
}

/// Number of bytes `value` occupies as a varint
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

// =============================================================================
// Coders
// =============================================================================

/// Coder for `u32` as a varint
#[derive(Debug, Clone, Copy, Default)]
pub struct VarIntCoder;

impl Coder<u32> for VarIntCoder {
    fn encode(&self, value: &u32, out: &mut dyn Write) -> Result<()> {
        Ok(encode_u32(*value, out)?)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<u32> {
        decode_u32(input)
    }

    fn name(&self) -> String {
        "VarIntCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &u32) -> Option<u64> {
        Some(encoded_len(u64::from(*value)) as u64)
    }
}

/// Coder for `u64` as a varint
#[derive(Debug, Clone, Copy, Default)]
pub struct VarLongCoder;

impl Coder<u64> for VarLongCoder {
    fn encode(&self, value: &u64, out: &mut dyn Write) -> Result<()> {
        Ok(encode_u64(*value, out)?)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<u64> {
        decode_u64(input)
    }

    fn name(&self) -> String {
        "VarLongCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, value: &u64) -> Option<u64> {
        Some(encoded_len(*value) as u64)
    }
}
