//! Ism records
//!
//! A record is a composite key plus exactly one payload. Ordinary keys carry
//! a value, metadata keys carry a metadata blob; the constructors enforce the
//! pairing so no record can hold the wrong kind.

use std::fmt;

use bytes::Bytes;

use crate::error::{IsmError, Result};

use super::metadata::{is_metadata_key, KeyComponent};

/// The payload carried by a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload<V> {
    /// Domain value of an ordinary record
    Value(V),
    /// Raw bytes of a metadata record
    Metadata(Bytes),
}

/// A composite key and its payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsmRecord<K, V> {
    key: Vec<KeyComponent<K>>,
    payload: Payload<V>,
}

impl<K, V> IsmRecord<K, V> {
    /// Create an ordinary record; the key must not contain the wildcard
    pub fn of(key: Vec<KeyComponent<K>>, value: V) -> Result<Self> {
        if key.is_empty() {
            return Err(IsmError::Argument(
                "Expected non-empty list of key components".to_string(),
            ));
        }
        if is_metadata_key(&key) {
            return Err(IsmError::Argument(
                "Expected key components to not contain metadata key".to_string(),
            ));
        }
        Ok(Self {
            key,
            payload: Payload::Value(value),
        })
    }

    /// Create a metadata record; the key must contain the wildcard
    pub fn meta(key: Vec<KeyComponent<K>>, metadata: impl Into<Bytes>) -> Result<Self> {
        if key.is_empty() {
            return Err(IsmError::Argument(
                "Expected non-empty list of key components".to_string(),
            ));
        }
        if !is_metadata_key(&key) {
            return Err(IsmError::Argument(
                "Expected key components to contain metadata key".to_string(),
            ));
        }
        Ok(Self {
            key,
            payload: Payload::Metadata(metadata.into()),
        })
    }

    pub fn key_components(&self) -> &[KeyComponent<K>] {
        &self.key
    }

    pub fn key_component(&self, index: usize) -> Option<&KeyComponent<K>> {
        self.key.get(index)
    }

    pub fn payload(&self) -> &Payload<V> {
        &self.payload
    }

    pub fn is_metadata(&self) -> bool {
        matches!(self.payload, Payload::Metadata(_))
    }

    /// The value of an ordinary record
    pub fn value(&self) -> Result<&V> {
        match &self.payload {
            Payload::Value(v) => Ok(v),
            Payload::Metadata(_) => Err(IsmError::State(
                "This is a metadata record and not a value record".to_string(),
            )),
        }
    }

    /// The metadata of a metadata record
    pub fn metadata(&self) -> Result<&Bytes> {
        match &self.payload {
            Payload::Metadata(m) => Ok(m),
            Payload::Value(_) => Err(IsmError::State(
                "This is a value record and not a metadata record".to_string(),
            )),
        }
    }

    /// Split into key and payload
    pub fn into_parts(self) -> (Vec<KeyComponent<K>>, Payload<V>) {
        (self.key, self.payload)
    }
}

impl<K: fmt::Display, V: fmt::Debug> fmt::Display for IsmRecord<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IsmRecord{keyComponents=[")?;
        for (i, component) in self.key.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", component)?;
        }
        match &self.payload {
            Payload::Value(v) => write!(f, "], value={:?}}}", v),
            Payload::Metadata(m) => write!(f, "], metadata={:?}}}", m),
        }
    }
}
