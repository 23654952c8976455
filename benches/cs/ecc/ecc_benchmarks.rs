use channel_codes::cs::ecc::{BitSequence, ChipCodec, CrcEngine, HammingEncoder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bit_pattern(len: usize) -> BitSequence {
    let bits: String = (0..len)
        .map(|i| if (i * 7 + 3) % 5 < 2 { '1' } else { '0' })
        .collect();
    bits.parse().unwrap()
}

fn bench_cdma(c: &mut Criterion) {
    let codec = ChipCodec::new("(1,-1,1,1,-1,-1,1,-1)".parse().unwrap());
    let data = bit_pattern(1024);
    let signal = codec.encode(&data);

    c.bench_function("cdma_encode_1024", |b| b.iter(|| codec.encode(black_box(&data))));
    c.bench_function("cdma_decode_1024", |b| b.iter(|| codec.decode(black_box(&signal))));
}

fn bench_crc(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc_long_division");
    for generator in ["1011", "10011", "100000111", "11000000000000101"] {
        let engine = CrcEngine::new(generator.parse().unwrap()).unwrap();
        let data = bit_pattern(512);
        group.bench_with_input(BenchmarkId::from_parameter(generator), &data, |b, data| {
            b.iter(|| engine.compute(black_box(data)))
        });
    }
    group.finish();
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_encode");
    let encoder = HammingEncoder::new();
    for len in [4, 11, 26, 57, 120] {
        let data = bit_pattern(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| encoder.encode(black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cdma, bench_crc, bench_hamming);
criterion_main!(benches);
