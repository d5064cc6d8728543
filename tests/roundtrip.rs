//! End-to-end round-trip tests across every supported dimensionality and
//! value width.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use hczip::{
    compress, compressed_size_bound, decompress, Extent, Profile, Slice, SliceMut,
};

const SEED_EXTENTS: u64 = 334;
const SEED_VALUES: u64 = 114514;

fn round_trip_f32(data: &[f32], lengths: &[usize], profile: Profile) {
    let extent = Extent::new(lengths).unwrap();
    let bound = compressed_size_bound::<f32>(&extent);
    let mut stream = vec![0u8; bound];
    let len = compress(&Slice::new(data, extent).unwrap(), &mut stream, profile).unwrap();
    assert!(len <= bound, "bound violated for {lengths:?}");

    let mut restored = vec![0f32; data.len()];
    let consumed = decompress(
        &stream[..len],
        &mut SliceMut::new(&mut restored, extent).unwrap(),
    )
    .unwrap();
    assert_eq!(consumed, len);
    for (i, (a, b)) in data.iter().zip(&restored).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "bit mismatch at {i} for {lengths:?}");
    }
}

fn round_trip_f64(data: &[f64], lengths: &[usize], profile: Profile) {
    let extent = Extent::new(lengths).unwrap();
    let bound = compressed_size_bound::<f64>(&extent);
    let mut stream = vec![0u8; bound];
    let len = compress(&Slice::new(data, extent).unwrap(), &mut stream, profile).unwrap();
    assert!(len <= bound, "bound violated for {lengths:?}");

    let mut restored = vec![0f64; data.len()];
    let consumed = decompress(
        &stream[..len],
        &mut SliceMut::new(&mut restored, extent).unwrap(),
    )
    .unwrap();
    assert_eq!(consumed, len);
    for (i, (a, b)) in data.iter().zip(&restored).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "bit mismatch at {i} for {lengths:?}");
    }
}

fn random_f32_bits(rng: &mut ChaChaRng, len: usize) -> Vec<f32> {
    (0..len).map(|_| f32::from_bits(rng.gen())).collect()
}

fn random_f64_bits(rng: &mut ChaChaRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| f64::from_bits(rng.gen())).collect()
}

#[test]
fn random_extents_f32_all_dims() {
    let mut ext_rng = ChaChaRng::seed_from_u64(SEED_EXTENTS);
    let mut val_rng = ChaChaRng::seed_from_u64(SEED_VALUES);
    for dims in 1..=3usize {
        let s = match dims {
            1 => 4096,
            2 => 64,
            _ => 16,
        };
        for _ in 0..4 {
            let lengths: Vec<usize> = (0..dims).map(|_| ext_rng.gen_range(1..4 * s)).collect();
            let n: usize = lengths.iter().product();
            let data = random_f32_bits(&mut val_rng, n);
            round_trip_f32(&data, &lengths, Profile::Strong);
            round_trip_f32(&data, &lengths, Profile::Fast);
        }
    }
}

#[test]
fn random_extents_f64_all_dims() {
    let mut ext_rng = ChaChaRng::seed_from_u64(SEED_EXTENTS + 1);
    let mut val_rng = ChaChaRng::seed_from_u64(SEED_VALUES + 1);
    for dims in 1..=3usize {
        let s = match dims {
            1 => 4096,
            2 => 64,
            _ => 16,
        };
        for _ in 0..3 {
            let lengths: Vec<usize> = (0..dims).map(|_| ext_rng.gen_range(1..4 * s)).collect();
            let n: usize = lengths.iter().product();
            let data = random_f64_bits(&mut val_rng, n);
            round_trip_f64(&data, &lengths, Profile::Strong);
        }
    }
}

#[test]
fn uniform_random_127_squared() {
    let mut rng = ChaChaRng::seed_from_u64(1);
    let data: Vec<f32> = (0..127 * 127).map(|_| rng.gen()).collect();
    round_trip_f32(&data, &[127, 127], Profile::Strong);
}

#[test]
fn uniform_random_63_cubed_f64() {
    let mut rng = ChaChaRng::seed_from_u64(2);
    let data: Vec<f64> = (0..63 * 63 * 63).map(|_| rng.gen()).collect();
    round_trip_f64(&data, &[63, 63, 63], Profile::Strong);
}

#[test]
fn smooth_field_2d() {
    // A slowly varying field, the workload the transform is built for.
    let data: Vec<f32> = (0..200 * 200)
        .map(|i| {
            let (y, x) = (i / 200, i % 200);
            ((x as f32) * 0.01).sin() + ((y as f32) * 0.02).cos()
        })
        .collect();
    let extent = Extent::new(&[200, 200]).unwrap();
    let mut stream = vec![0u8; compressed_size_bound::<f32>(&extent)];
    let len = compress(
        &Slice::new(&data, extent).unwrap(),
        &mut stream,
        Profile::Strong,
    )
    .unwrap();
    // Correlated data must beat the raw encoding with room to spare.
    assert!(len < 200 * 200 * 4);
    round_trip_f32(&data, &[200, 200], Profile::Strong);
}

#[test]
fn sub_hypercube_arrays_are_all_border() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    round_trip_f32(&random_f32_bits(&mut rng, 5), &[5], Profile::Strong);
    round_trip_f32(&random_f32_bits(&mut rng, 63 * 10), &[63, 10], Profile::Strong);
    round_trip_f32(
        &random_f32_bits(&mut rng, 15 * 15 * 15),
        &[15, 15, 15],
        Profile::Strong,
    );
    round_trip_f64(&random_f64_bits(&mut rng, 1), &[1], Profile::Strong);
}

#[test]
fn special_values_everywhere() {
    let specials = [
        0.0f32,
        -0.0,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::from_bits(0x7fc0_0000),
        f32::from_bits(0x7fc1_2345),
        f32::from_bits(0xff80_0001),
        f32::MIN_POSITIVE,
        f32::MAX,
    ];
    let data: Vec<f32> = (0..70 * 70).map(|i| specials[i % specials.len()]).collect();
    round_trip_f32(&data, &[70, 70], Profile::Strong);
    round_trip_f32(&data, &[70, 70], Profile::Fast);
}

#[test]
fn first_chunk_zero_regression() {
    // Historic decoder bug: an all-zero first column group tripped an
    // optimized payload scan.
    for dims_lengths in [vec![8192], vec![130, 64], vec![32, 16, 16]] {
        let n: usize = dims_lengths.iter().product();
        let mut rng = ChaChaRng::seed_from_u64(4);
        let mut data = random_f32_bits(&mut rng, n);
        for v in data.iter_mut().take(32) {
            *v = 0.0;
        }
        round_trip_f32(&data, &dims_lengths, Profile::Strong);
    }
}

#[test]
fn constant_array_compresses_to_near_nothing() {
    let extent = Extent::new(&[64, 64]).unwrap();
    let data = vec![3.25f32; extent.num_elements()];
    let mut stream = vec![0u8; compressed_size_bound::<f32>(&extent)];
    let len = compress(
        &Slice::new(&data, extent).unwrap(),
        &mut stream,
        Profile::Strong,
    )
    .unwrap();
    // One dense word per block at most, plus headers.
    assert!(len < 1024);
    round_trip_f32(&data, &[64, 64], Profile::Strong);
}
