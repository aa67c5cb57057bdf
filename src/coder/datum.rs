//! Heterogeneous key components
//!
//! A composite key mixes component types (an int followed by a string, say)
//! while a record coder is generic over one component type. `Datum` is that
//! one type, and `DatumCoder` lifts a typed coder into a `Coder<Datum>`.

use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;

use bytes::Bytes;

use crate::error::{IsmError, Result};

use super::Coder;

/// A single dynamically typed key component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Datum {
    Int(i32),
    Long(i64),
    Str(String),
    Bytes(Bytes),
}

impl Datum {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Datum::Int(_) => "Int",
            Datum::Long(_) => "Long",
            Datum::Str(_) => "Str",
            Datum::Bytes(_) => "Bytes",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Int(v) => write!(f, "{}", v),
            Datum::Long(v) => write!(f, "{}", v),
            Datum::Str(v) => write!(f, "{:?}", v),
            Datum::Bytes(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Long(v)
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Str(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Str(v.to_string())
    }
}

impl From<Bytes> for Datum {
    fn from(v: Bytes) -> Self {
        Datum::Bytes(v)
    }
}

/// A Rust type that has a matching `Datum` variant
pub trait DatumValue: Sized {
    /// Variant name this type maps to
    const KIND: &'static str;

    /// Borrow the inner value if `datum` is the matching variant
    fn from_datum(datum: &Datum) -> Option<&Self>;

    /// Wrap into the matching variant
    fn into_datum(self) -> Datum;
}

macro_rules! datum_value {
    ($ty:ty, $variant:ident) => {
        impl DatumValue for $ty {
            const KIND: &'static str = stringify!($variant);

            fn from_datum(datum: &Datum) -> Option<&Self> {
                match datum {
                    Datum::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_datum(self) -> Datum {
                Datum::$variant(self)
            }
        }
    };
}

datum_value!(i32, Int);
datum_value!(i64, Long);
datum_value!(String, Str);
datum_value!(Bytes, Bytes);

/// Adapts a `Coder<T>` into a `Coder<Datum>` for one `Datum` variant
#[derive(Debug, Clone)]
pub struct DatumCoder<C, T> {
    inner: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> DatumCoder<C, T>
where
    C: Coder<T>,
    T: DatumValue,
{
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn unwrap<'a>(&self, datum: &'a Datum) -> Result<&'a T> {
        T::from_datum(datum).ok_or_else(|| {
            IsmError::Argument(format!(
                "{} expects a {} component but received {}",
                self.inner.name(),
                T::KIND,
                datum.kind()
            ))
        })
    }
}

impl<C, T> Coder<Datum> for DatumCoder<C, T>
where
    C: Coder<T>,
    T: DatumValue + fmt::Debug,
{
    fn encode(&self, value: &Datum, out: &mut dyn Write) -> Result<()> {
        let inner = self.unwrap(value)?;
        self.inner.encode(inner, out)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Datum> {
        Ok(self.inner.decode(input)?.into_datum())
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn verify_deterministic(&self) -> Result<()> {
        self.inner.verify_deterministic()
    }

    fn consistent_with_equals(&self) -> bool {
        self.inner.consistent_with_equals()
    }

    fn encoded_size(&self, value: &Datum) -> Option<u64> {
        T::from_datum(value).and_then(|v| self.inner.encoded_size(v))
    }
}
