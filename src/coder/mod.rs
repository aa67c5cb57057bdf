//! Coder Module
//!
//! The byte-level encode/decode capability every part of the Ism format is
//! built on, plus the base coders the format itself depends on.
//!
//! ## Responsibilities
//! - Encode a value onto a byte sink and decode it back from a byte source
//! - Report whether equal values always produce identical bytes
//!   (required for anything that is hashed or sorted by its encoding)
//! - Report whether decoded values can be compared with `==` directly
//! - Cheap size estimates for fixed or trivially sized encodings
//!
//! ## Nesting
//! Every coder writes a self-delimiting ("nested") encoding, so values can be
//! concatenated back to back and decoded positionally.

mod byte_array;
mod datum;
mod list;
mod primitive;
mod string;
pub mod varint;

use std::fmt;
use std::io::{Read, Write};

use bytes::Bytes;

use crate::error::{IsmError, Result};

pub use byte_array::ByteArrayCoder;
pub use datum::{Datum, DatumCoder, DatumValue};
pub use list::ListCoder;
pub use primitive::{BigEndianIntCoder, BigEndianLongCoder};
pub use string::StringUtf8Coder;
pub use varint::{VarIntCoder, VarLongCoder};

// =============================================================================
// Coder Trait
// =============================================================================

/// Encodes and decodes values of type `T` to and from byte streams.
///
/// Implementations hold no mutable state and may be shared across threads.
pub trait Coder<T>: Send + Sync + fmt::Debug {
    /// Write the nested encoding of `value` to `out`
    fn encode(&self, value: &T, out: &mut dyn Write) -> Result<()>;

    /// Read one nested encoding from `input`
    fn decode(&self, input: &mut dyn Read) -> Result<T>;

    /// Human-readable identity used in error messages
    fn name(&self) -> String;

    /// Succeeds iff equal values always encode to identical bytes
    fn verify_deterministic(&self) -> Result<()> {
        Err(IsmError::NonDeterministic {
            coder: self.name(),
            reason: "coder does not guarantee a deterministic encoding".to_string(),
        })
    }

    /// True iff two decoded values are equal exactly when their encodings are
    fn consistent_with_equals(&self) -> bool {
        false
    }

    /// Encoded size of `value` when it can be computed without encoding
    fn encoded_size(&self, _value: &T) -> Option<u64> {
        None
    }
}

// =============================================================================
// Byte-slice helpers
// =============================================================================

/// Encode a single value into a fresh buffer
pub fn encode_to_vec<T, C>(coder: &C, value: &T) -> Result<Vec<u8>>
where
    C: Coder<T> + ?Sized,
{
    let mut out: Vec<u8> = Vec::new();
    coder.encode(value, &mut out)?;
    Ok(out)
}

/// Decode a single value that must span all of `bytes`
pub fn decode_from_slice<T, C>(coder: &C, bytes: &[u8]) -> Result<T>
where
    C: Coder<T> + ?Sized,
{
    let mut input = bytes;
    let value = coder.decode(&mut input)?;
    if !input.is_empty() {
        return Err(IsmError::Format(format!(
            "{} trailing byte(s) after decoding with {}",
            input.len(),
            coder.name()
        )));
    }
    Ok(value)
}

// =============================================================================
// Structural values
// =============================================================================

/// A value in a form whose `==` matches equality of its encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructuralValue<T> {
    /// The value itself; its own equality already agrees with its encoding
    Value(T),
    /// The encoded bytes of the value
    Encoded(Bytes),
}

/// Returns the structural form of `value` under `coder`
pub fn structural_value<T, C>(coder: &C, value: &T) -> Result<StructuralValue<T>>
where
    T: Clone,
    C: Coder<T> + ?Sized,
{
    if coder.consistent_with_equals() {
        Ok(StructuralValue::Value(value.clone()))
    } else {
        Ok(StructuralValue::Encoded(Bytes::from(encode_to_vec(coder, value)?)))
    }
}

// =============================================================================
// Stream helpers
// =============================================================================

/// Read exactly one byte, treating end of input as truncation
pub(crate) fn read_byte(input: &mut dyn Read, what: &str) -> Result<u8> {
    let mut byte = [0u8; 1];
    input
        .read_exact(&mut byte)
        .map_err(|e| IsmError::from_decode(e, what))?;
    Ok(byte[0])
}

/// Fill `buf` completely, treating end of input as truncation
pub(crate) fn read_exact(input: &mut dyn Read, buf: &mut [u8], what: &str) -> Result<()> {
    input
        .read_exact(buf)
        .map_err(|e| IsmError::from_decode(e, what))
}

/// Read a length-prefixed run of `len` bytes without trusting `len` for allocation
pub(crate) fn read_len_prefixed(input: &mut dyn Read, len: u64, what: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    input.take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) != len {
        return Err(IsmError::Format(format!(
            "Truncated input while decoding {}: expected {} bytes, got {}",
            what,
            len,
            buf.len()
        )));
    }
    Ok(buf)
}
