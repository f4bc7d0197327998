use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use keeper_share::{Config, ShamirShare, SplitMode, codec};

// For comprehensive benchmarks across data sizes, see benches/in_memory_benchmarks.rs

fn benchmark_split(c: &mut Criterion) {
    // Many shares to stress the evaluation loop
    let mut scheme = ShamirShare::builder(255, 3).build().unwrap();
    let secret = vec![0x55u8; 1024];
    c.bench_function("split 1024 bytes into 255", |b| {
        b.iter(|| {
            let shares = scheme.split(black_box(&secret)).unwrap();
            black_box(shares);
        })
    });

    let config = Config::new().with_mode(SplitMode::Parallel);
    let mut parallel = ShamirShare::builder(255, 3)
        .with_config(config)
        .build()
        .unwrap();
    c.bench_function("parallel split 1024 bytes into 255", |b| {
        b.iter(|| {
            let shares = parallel.split(black_box(&secret)).unwrap();
            black_box(shares);
        })
    });
}

fn benchmark_reconstruct(c: &mut Criterion) {
    let mut scheme = ShamirShare::builder(5, 3).build().unwrap();
    let secret = b"my secret data";
    let shares = scheme.split(secret).unwrap();
    c.bench_function("reconstruct secret", |b| {
        b.iter(|| {
            let result = ShamirShare::reconstruct(black_box(&shares)).unwrap();
            black_box(result);
        })
    });
}

fn benchmark_codec(c: &mut Criterion) {
    let mut scheme = ShamirShare::builder(5, 3).build().unwrap();
    let shares = scheme.split(&[0xA5u8; 64]).unwrap();
    let encoded = codec::encode(&shares[0]);
    c.bench_function("encode and decode share", |b| {
        b.iter(|| {
            let text = codec::encode(black_box(&shares[0]));
            black_box(codec::decode(black_box(&encoded)).unwrap());
            black_box(text);
        })
    });
}

criterion_group!(benches, benchmark_split, benchmark_reconstruct, benchmark_codec);
criterion_main!(benches);
