//! Ordered list coder
//!
//! Format: varint element count, then each element back to back.

use std::io::{Read, Write};

use crate::error::{IsmError, Result};

use super::{varint, Coder};

/// Cap on capacity reserved up front; the count comes from untrusted input
const MAX_PREALLOCATED: usize = 1024;

/// Coder for `Vec<T>` using an element coder
#[derive(Debug, Clone, Default)]
pub struct ListCoder<C> {
    element_coder: C,
}

impl<C> ListCoder<C> {
    pub fn new(element_coder: C) -> Self {
        Self { element_coder }
    }

    pub fn element_coder(&self) -> &C {
        &self.element_coder
    }
}

impl<T, C> Coder<Vec<T>> for ListCoder<C>
where
    C: Coder<T>,
{
    fn encode(&self, value: &Vec<T>, out: &mut dyn Write) -> Result<()> {
        let count = u32::try_from(value.len()).map_err(|_| {
            IsmError::Argument(format!("List of {} elements is too long to encode", value.len()))
        })?;
        varint::encode_u32(count, out)?;
        for element in value {
            self.element_coder.encode(element, out)?;
        }
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Vec<T>> {
        let count = varint::decode_u32(input)? as usize;
        let mut elements = Vec::with_capacity(count.min(MAX_PREALLOCATED));
        for _ in 0..count {
            elements.push(self.element_coder.decode(input)?);
        }
        Ok(elements)
    }

    fn name(&self) -> String {
        format!("ListCoder({})", self.element_coder.name())
    }

    fn verify_deterministic(&self) -> Result<()> {
        self.element_coder.verify_deterministic()
    }

    fn consistent_with_equals(&self) -> bool {
        self.element_coder.consistent_with_equals()
    }
}
