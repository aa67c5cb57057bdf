//! Fixed-width big-endian integer coders
//!
//! Big-endian two's complement keeps non-negative values in unsigned
//! lexicographic order, which is what sorted keys need.

use std::io::{Read, Write};

use crate::error::Result;

use super::{read_exact, Coder};

/// Coder for `i32` as 4 big-endian bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct BigEndianIntCoder;

impl Coder<i32> for BigEndianIntCoder {
    fn encode(&self, value: &i32, out: &mut dyn Write) -> Result<()> {
        out.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<i32> {
        let mut buf = [0u8; 4];
        read_exact(input, &mut buf, "big-endian int")?;
        Ok(i32::from_be_bytes(buf))
    }

    fn name(&self) -> String {
        "BigEndianIntCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, _value: &i32) -> Option<u64> {
        Some(4)
    }
}

/// Coder for `i64` as 8 big-endian bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct BigEndianLongCoder;

impl Coder<i64> for BigEndianLongCoder {
    fn encode(&self, value: &i64, out: &mut dyn Write) -> Result<()> {
        out.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<i64> {
        let mut buf = [0u8; 8];
        read_exact(input, &mut buf, "big-endian long")?;
        Ok(i64::from_be_bytes(buf))
    }

    fn name(&self) -> String {
        "BigEndianLongCoder".to_string()
    }

    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }

    fn consistent_with_equals(&self) -> bool {
        true
    }

    fn encoded_size(&self, _value: &i64) -> Option<u64> {
        Some(8)
    }
}
