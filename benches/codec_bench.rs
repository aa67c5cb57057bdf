//! Benchmarks for Ism codec operations

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ismfile::coder::{BigEndianLongCoder, StringUtf8Coder};
use ismfile::shard::murmur3_x86_32;
use ismfile::{
    decode_from_slice, encode_to_vec, shard_index_coder, ComponentCoder, IsmConfig, IsmRecord,
    KeyComponent, MetadataKeyCoder, PlainKeyCoder, RecordCoder, ShardDescriptor,
};

fn record_coder() -> RecordCoder<i64, String> {
    RecordCoder::new(
        IsmConfig::default(),
        vec![
            Arc::new(MetadataKeyCoder::new(BigEndianLongCoder)) as ComponentCoder<i64>,
            Arc::new(PlainKeyCoder::new(BigEndianLongCoder)) as ComponentCoder<i64>,
        ],
        Arc::new(StringUtf8Coder),
    )
    .unwrap()
}

fn hash_benchmarks(c: &mut Criterion) {
    let coder = record_coder();
    let key: Vec<KeyComponent<i64>> = vec![KeyComponent::Value(1_234_567), KeyComponent::Value(89)];
    let payload = vec![0x5Au8; 64];

    c.bench_function("murmur3_64_bytes", |b| {
        b.iter(|| murmur3_x86_32(black_box(&payload), black_box(1_225_801_234)))
    });

    c.bench_function("encode_and_hash", |b| {
        b.iter(|| coder.encode_and_hash(black_box(&key)).unwrap())
    });
}

fn record_benchmarks(c: &mut Criterion) {
    let coder = record_coder();
    let record = IsmRecord::of(
        vec![KeyComponent::Value(1_234_567), KeyComponent::Value(89)],
        "value".repeat(20),
    )
    .unwrap();
    let bytes = encode_to_vec(&coder, &record).unwrap();

    c.bench_function("record_encode", |b| {
        b.iter(|| encode_to_vec(&coder, black_box(&record)).unwrap())
    });

    c.bench_function("record_decode", |b| {
        b.iter(|| decode_from_slice(&coder, black_box(&bytes)).unwrap())
    });
}

fn shard_index_benchmarks(c: &mut Criterion) {
    let shards: Vec<ShardDescriptor> = (0..=255u8)
        .map(|id| ShardDescriptor::new(id, u64::from(id) * 4096, u64::from(id) * 4096 + 3000))
        .collect();
    let bytes = encode_to_vec(&shard_index_coder(), &shards).unwrap();

    c.bench_function("shard_index_decode_256", |b| {
        b.iter(|| {
            let decoded: Vec<ShardDescriptor> =
                decode_from_slice(&shard_index_coder(), black_box(&bytes)).unwrap();
            decoded
        })
    });
}

criterion_group!(
    benches,
    hash_benchmarks,
    record_benchmarks,
    shard_index_benchmarks
);
criterion_main!(benches);
