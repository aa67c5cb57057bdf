//! Tests for shard assignment
//!
//! These tests verify:
//! - Known shard ids for fixed keys
//! - Ordinary and metadata keys land in disjoint shard ranges
//! - Only the shard-key prefix influences the shard
//! - Arity validation on full and partial keys
//! - MurmurHash3 x86_32 against published vectors

use std::sync::Arc;

use ismfile::coder::{BigEndianIntCoder, StringUtf8Coder};
use ismfile::shard::{is_metadata_shard, murmur3_x86_32, HASH_SEED, METADATA_SHARD_OFFSET};
use ismfile::{
    ComponentCoder, IsmConfig, IsmError, KeyComponent, MetadataKeyCoder, PlainKeyCoder,
    RecordCoder,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn coder_with(
    config: IsmConfig,
    key_coders: Vec<ComponentCoder<i32>>,
) -> RecordCoder<i32, String> {
    RecordCoder::new(config, key_coders, Arc::new(StringUtf8Coder)).unwrap()
}

fn plain_int() -> ComponentCoder<i32> {
    Arc::new(PlainKeyCoder::new(BigEndianIntCoder))
}

fn meta_int() -> ComponentCoder<i32> {
    Arc::new(MetadataKeyCoder::new(BigEndianIntCoder))
}

// =============================================================================
// Known Shard Tests
// =============================================================================

#[test]
fn test_known_value_shard() {
    let coder = coder_with(IsmConfig::default(), vec![plain_int(), plain_int()]);

    let encoded = coder
        .encode_and_hash(&[KeyComponent::Value(7), KeyComponent::Value(8)])
        .unwrap();

    assert_eq!(encoded.shard_id, 91);
    assert_eq!(&encoded.bytes[..], &[0, 0, 0, 7, 0, 0, 0, 8]);
    assert_eq!(encoded.component_offsets, vec![4, 8]);
}

#[test]
fn test_known_metadata_shard() {
    let coder = coder_with(IsmConfig::default(), vec![meta_int(), plain_int()]);

    let shard = coder.hash(&[KeyComponent::MetadataWildcard]).unwrap();

    assert_eq!(shard, 143);
    assert!(is_metadata_shard(shard));
}

#[test]
fn test_tagged_value_shard_differs_from_plain() {
    let tagged = coder_with(IsmConfig::default(), vec![meta_int()]);

    let encoded = tagged.encode_and_hash(&[KeyComponent::Value(7)]).unwrap();

    assert_eq!(&encoded.bytes[..], &[0x01, 0, 0, 0, 7]);
    let expected = (murmur3_x86_32(&[0x01, 0, 0, 0, 7], HASH_SEED) & 0x7F) as u8;
    assert_eq!(encoded.shard_id, expected);
}

// =============================================================================
// Shard Range Tests
// =============================================================================

#[test]
fn test_value_keys_stay_below_metadata_range() {
    let coder = coder_with(IsmConfig::default(), vec![meta_int()]);

    for i in -500..500 {
        let shard = coder.hash(&[KeyComponent::Value(i)]).unwrap();
        assert!(shard < METADATA_SHARD_OFFSET, "key {} -> shard {}", i, shard);
    }
}

#[test]
fn test_metadata_keys_stay_in_metadata_range() {
    let config = IsmConfig::builder().metadata_shard_key_arity(2).build();
    let coder = coder_with(config, vec![meta_int(), meta_int()]);

    for i in -500..500 {
        let shard = coder
            .hash(&[KeyComponent::Value(i), KeyComponent::MetadataWildcard])
            .unwrap();
        assert!(shard >= METADATA_SHARD_OFFSET, "key {} -> shard {}", i, shard);
    }
}

#[test]
fn test_suffix_does_not_change_shard() {
    let coder = coder_with(IsmConfig::default(), vec![plain_int(), plain_int(), plain_int()]);

    let partial = coder.hash(&[KeyComponent::Value(42)]).unwrap();
    for j in 0..20 {
        let full = coder
            .hash(&[KeyComponent::Value(42), KeyComponent::Value(j), KeyComponent::Value(-j)])
            .unwrap();
        assert_eq!(full, partial);
    }
}

#[test]
fn test_hash_is_stable() {
    let coder = coder_with(IsmConfig::default(), vec![plain_int()]);

    let first = coder.hash(&[KeyComponent::Value(12345)]).unwrap();
    let second = coder.hash(&[KeyComponent::Value(12345)]).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// Arity Tests
// =============================================================================

#[test]
fn test_key_shorter_than_shard_arity() {
    let config = IsmConfig::builder().shard_key_arity(2).build();
    let coder = coder_with(config, vec![plain_int(), plain_int()]);

    let err = coder.hash(&[KeyComponent::Value(1)]).unwrap_err();

    assert!(matches!(err, IsmError::Argument(_)));
    assert!(err.to_string().contains("at least 2"));
}

#[test]
fn test_metadata_key_reports_metadata_arity() {
    let config = IsmConfig::builder()
        .shard_key_arity(1)
        .metadata_shard_key_arity(2)
        .build();
    let coder = coder_with(config, vec![meta_int(), meta_int()]);

    let err = coder.hash(&[KeyComponent::MetadataWildcard]).unwrap_err();

    assert!(err.to_string().contains("at least 2"), "{}", err);
}

#[test]
fn test_key_longer_than_coders() {
    let coder = coder_with(IsmConfig::default(), vec![plain_int()]);

    let err = coder
        .hash(&[KeyComponent::Value(1), KeyComponent::Value(2)])
        .unwrap_err();

    assert!(matches!(err, IsmError::Argument(_)));
}

#[test]
fn test_wildcard_through_plain_coder() {
    let coder = coder_with(IsmConfig::default(), vec![plain_int()]);

    let err = coder.hash(&[KeyComponent::MetadataWildcard]).unwrap_err();

    assert!(matches!(err, IsmError::Argument(_)));
}

// =============================================================================
// MurmurHash3 Tests
// =============================================================================

#[test]
fn test_murmur3_vectors() {
    assert_eq!(murmur3_x86_32(b"", 0), 0);
    assert_eq!(murmur3_x86_32(b"", 1), 0x514E_28B7);
    assert_eq!(murmur3_x86_32(b"", 0xFFFF_FFFF), 0x81F1_6F39);
    assert_eq!(murmur3_x86_32(&[0, 0, 0, 0], 0), 0x2362_F9DE);
    assert_eq!(murmur3_x86_32(b"aaaa", 0x9747_B28C), 0x5A97_808A);
    assert_eq!(murmur3_x86_32(b"abc", 0), 0xB3DD_93FA);
    assert_eq!(murmur3_x86_32(b"Hello, world!", 0x9747_B28C), 0x2488_4CBA);
    assert_eq!(
        murmur3_x86_32(b"The quick brown fox jumps over the lazy dog", 0x9747_B28C),
        0x2FA8_26CD
    );
}
