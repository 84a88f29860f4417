use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mote_crypto::{BlockCipher, Eax, Speck, SpeckSmall, SpeckTiny, Xts};
use std::hint::black_box;

/// Benchmark raw block encryption for each cipher variant.
fn bench_speck_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("speck_block");
    group.throughput(Throughput::Bytes(16));

    let key = [0x01u8; 32];

    let mut full = Speck::new();
    full.set_key(&key).unwrap();
    group.bench_function("full", |b| {
        let mut block = [0x42u8; 16];
        b.iter(|| full.encrypt_block(black_box(&mut block)));
    });

    let mut small = SpeckSmall::new();
    small.set_key(&key).unwrap();
    group.bench_function("small", |b| {
        let mut block = [0x42u8; 16];
        b.iter(|| small.encrypt_block(black_box(&mut block)));
    });

    let mut tiny = SpeckTiny::new();
    tiny.set_key(&key).unwrap();
    group.bench_function("tiny", |b| {
        let mut block = [0x42u8; 16];
        b.iter(|| tiny.encrypt_block(black_box(&mut block)));
    });

    group.finish();
}

/// Benchmark a full EAX seal (IV, payload, tag) across payload sizes.
fn bench_eax_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("eax_seal");

    let key = [0x01u8; 16];
    let iv = [0x02u8; 16];
    let sizes = [64usize, 256, 1024, 4096];

    for size in sizes {
        let plaintext = vec![0x42u8; size];
        let mut ciphertext = vec![0u8; size];
        let mut eax = Eax::new(Speck::new());
        eax.set_key(&key).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("seal", size), &size, |b, _| {
            b.iter(|| {
                eax.set_iv(black_box(&iv)).unwrap();
                eax.encrypt(black_box(&mut ciphertext), black_box(&plaintext))
                    .unwrap();
                let mut tag = [0u8; 16];
                eax.compute_tag(&mut tag).unwrap();
                black_box(tag)
            });
        });
    }

    group.finish();
}

/// Benchmark XTS sector encryption for common sector sizes.
fn bench_xts_sector(c: &mut Criterion) {
    let mut group = c.benchmark_group("xts_sector");

    let key = [0x01u8; 64];
    let sizes = [512usize, 4096];

    for size in sizes {
        let mut xts = Xts::new(Speck::new(), Speck::new());
        xts.set_key(&key).unwrap();
        xts.set_sector_size(size).unwrap();
        xts.set_tweak(&1u64.to_le_bytes()).unwrap();

        let plaintext = vec![0x42u8; size];
        let mut ciphertext = vec![0u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encrypt", size), &size, |b, _| {
            b.iter(|| xts.encrypt_sector(black_box(&mut ciphertext), black_box(&plaintext)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_speck_block, bench_eax_seal, bench_xts_sector);
criterion_main!(benches);
