//! Ism file trailer inspection
//!
//! Reads the footer and shard index from the tail of a written file. No
//! records are read and no keys are searched.
//!
//! ```text
//! ... │ Bloom filter │ Shard index │ Footer (25) │ EOF
//!                    ▲             ▲
//!                    │             └── file_size - 25
//!                    └── footer.index_position
//! ```

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::coder::{decode_from_slice, Coder};
use crate::error::{IsmError, Result};
use crate::format::{shard_index_coder, Footer, FooterCoder, ShardDescriptor};
use crate::shard::is_metadata_shard;

/// Footer and shard index of an Ism file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub footer: Footer,
    pub shards: Vec<ShardDescriptor>,
    pub file_size: u64,
}

impl Trailer {
    /// Descriptors of shards holding ordinary records
    pub fn record_shards(&self) -> impl Iterator<Item = &ShardDescriptor> {
        self.shards.iter().filter(|s| !is_metadata_shard(s.id()))
    }

    /// Descriptors of shards holding metadata records
    pub fn metadata_shards(&self) -> impl Iterator<Item = &ShardDescriptor> {
        self.shards.iter().filter(|s| is_metadata_shard(s.id()))
    }
}

/// Read the footer and shard index of the file at `path`
pub fn read_trailer(path: &Path) -> Result<Trailer> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let footer_len = Footer::FIXED_LENGTH as u64;

    if file_size < footer_len {
        return Err(IsmError::Format(format!(
            "File of {} bytes is too small to hold a {} byte footer",
            file_size, footer_len
        )));
    }

    // Footer
    let footer_start = file_size - footer_len;
    file.seek(SeekFrom::Start(footer_start))?;
    let footer = FooterCoder.decode(&mut file)?;

    tracing::debug!(
        file_size,
        index_position = footer.index_position(),
        bloom_filter_position = footer.bloom_filter_position(),
        number_of_keys = footer.number_of_keys(),
        "Read footer"
    );

    if footer.index_position() > footer_start {
        return Err(IsmError::Format(format!(
            "Shard index position {} lies past the footer at {}",
            footer.index_position(),
            footer_start
        )));
    }
    if footer.bloom_filter_position() > footer.index_position() {
        return Err(IsmError::Format(format!(
            "Bloom filter position {} lies past the shard index at {}",
            footer.bloom_filter_position(),
            footer.index_position()
        )));
    }

    // Shard index spans everything between its position and the footer
    file.seek(SeekFrom::Start(footer.index_position()))?;
    let mut index_data = Vec::new();
    file.by_ref()
        .take(footer_start - footer.index_position())
        .read_to_end(&mut index_data)?;
    let shards = decode_from_slice(&shard_index_coder(), &index_data)?;

    tracing::debug!(shards = shards.len(), "Read shard index");

    Ok(Trailer {
        footer,
        shards,
        file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_too_small_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0u8; 10]).unwrap();
        let err = read_trailer(file.path()).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_trailer(&dir.path().join("missing.ism")).unwrap_err();
        assert!(matches!(err, IsmError::Io(_)));
    }
}
