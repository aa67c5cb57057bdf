//! Tests for trailer inspection
//!
//! These tests verify:
//! - Footer and shard index are read back from a hand-assembled file
//! - Record and metadata shards are told apart
//! - Corrupt trailers are rejected

use std::path::PathBuf;

use ismfile::{
    encode_to_vec, read_trailer, shard_index_coder, Footer, FooterCoder, PartialShardDescriptor,
    ShardDescriptor,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.ism");
    (temp_dir, path)
}

/// Lay out data blocks, a bloom filter, the shard index and the footer
fn assemble_file(shards: &[ShardDescriptor], data_len: usize, bloom_len: usize) -> Vec<u8> {
    let mut file = vec![0xAA; data_len];

    let bloom_filter_position = file.len() as u64;
    file.extend(std::iter::repeat(0xBB).take(bloom_len));

    let index_position = file.len() as u64;
    file.extend(encode_to_vec(&shard_index_coder(), &shards.to_vec()).unwrap());

    let footer = Footer::new(index_position, bloom_filter_position, 42);
    file.extend(encode_to_vec(&FooterCoder, &footer).unwrap());
    file
}

// =============================================================================
// Trailer Tests
// =============================================================================

#[test]
fn test_read_trailer() {
    let (_temp, path) = setup_temp_file();
    let shards = vec![
        PartialShardDescriptor::new(3, 0).with_index_offset(40),
        PartialShardDescriptor::new(91, 50).with_index_offset(90),
        PartialShardDescriptor::new(143, 100).with_index_offset(110),
    ];
    let bytes = assemble_file(&shards, 120, 16);
    std::fs::write(&path, &bytes).unwrap();

    let trailer = read_trailer(&path).unwrap();

    assert_eq!(trailer.file_size, bytes.len() as u64);
    assert_eq!(trailer.footer.bloom_filter_position(), 120);
    assert_eq!(trailer.footer.index_position(), 136);
    assert_eq!(trailer.footer.number_of_keys(), 42);
    assert_eq!(trailer.shards, shards);
    assert_eq!(trailer.record_shards().count(), 2);
    assert_eq!(
        trailer.metadata_shards().map(|s| s.id()).collect::<Vec<_>>(),
        vec![143]
    );
}

#[test]
fn test_read_trailer_empty_index() {
    let (_temp, path) = setup_temp_file();
    std::fs::write(&path, assemble_file(&[], 0, 0)).unwrap();

    let trailer = read_trailer(&path).unwrap();

    assert!(trailer.shards.is_empty());
    assert_eq!(trailer.file_size, 1 + Footer::FIXED_LENGTH as u64);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_read_trailer_bad_version() {
    let (_temp, path) = setup_temp_file();
    let mut bytes = assemble_file(&[ShardDescriptor::new(1, 0, 10)], 10, 4);
    let last = bytes.len() - 1;
    bytes[last] = 9;
    std::fs::write(&path, &bytes).unwrap();

    let err = read_trailer(&path).unwrap_err();

    assert!(err.is_format());
    assert!(err.to_string().contains("Unknown version 9"));
}

#[test]
fn test_read_trailer_index_past_footer() {
    let (_temp, path) = setup_temp_file();
    let footer = Footer::new(1_000, 0, 0);
    std::fs::write(&path, encode_to_vec(&FooterCoder, &footer).unwrap()).unwrap();

    let err = read_trailer(&path).unwrap_err();

    assert!(err.is_format());
}

#[test]
fn test_read_trailer_bloom_past_index() {
    let (_temp, path) = setup_temp_file();
    let mut bytes = vec![0u8];
    bytes.extend(encode_to_vec(&FooterCoder, &Footer::new(0, 1, 0)).unwrap());
    std::fs::write(&path, &bytes).unwrap();

    let err = read_trailer(&path).unwrap_err();

    assert!(err.is_format());
}

#[test]
fn test_read_trailer_garbage_index() {
    let (_temp, path) = setup_temp_file();
    let mut bytes = vec![0x05, 0x01];
    bytes.extend(encode_to_vec(&FooterCoder, &Footer::new(0, 0, 0)).unwrap());
    std::fs::write(&path, &bytes).unwrap();

    let err = read_trailer(&path).unwrap_err();

    assert!(err.is_format());
}
