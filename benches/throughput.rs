use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use hczip::{compress, compressed_size_bound, decompress, Extent, Profile, Slice, SliceMut};

const SAMPLE_SIZE: usize = 30;
const WARM_UP_TIME: Duration = Duration::from_secs(3);
const MEASURE_TIME: Duration = Duration::from_secs(5);

const SEED_VALUES: u64 = 334;
const SIDE: usize = 512;

fn gen_smooth_field(side: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let noise: f32 = rng.gen();
    (0..side * side)
        .map(|i| {
            let (y, x) = (i / side, i % side);
            ((x as f32) * 0.013).sin() * ((y as f32) * 0.007).cos() + noise
        })
        .collect()
}

fn criterion_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_2d");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.throughput(Throughput::Bytes((SIDE * SIDE * 4) as u64));

    let extent = Extent::new(&[SIDE, SIDE]).unwrap();
    let data = gen_smooth_field(SIDE, SEED_VALUES);
    let input = Slice::new(&data, extent).unwrap();
    let mut stream = vec![0u8; compressed_size_bound::<f32>(&extent)];

    for profile in [Profile::Fast, Profile::Strong] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{profile:?}")),
            &profile,
            |b, &profile| b.iter(|| compress(&input, &mut stream, profile).unwrap()),
        );
    }
    group.finish();
}

fn criterion_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_2d");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.throughput(Throughput::Bytes((SIDE * SIDE * 4) as u64));

    let extent = Extent::new(&[SIDE, SIDE]).unwrap();
    let data = gen_smooth_field(SIDE, SEED_VALUES);
    let input = Slice::new(&data, extent).unwrap();
    let mut stream = vec![0u8; compressed_size_bound::<f32>(&extent)];
    let len = compress(&input, &mut stream, Profile::Strong).unwrap();
    stream.truncate(len);

    let mut restored = vec![0f32; data.len()];
    group.bench_function("Strong", |b| {
        b.iter(|| {
            let mut output = SliceMut::new(&mut restored, extent).unwrap();
            decompress(&stream, &mut output).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_compress, criterion_decompress);
criterion_main!(benches);
