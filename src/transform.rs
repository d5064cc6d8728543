//! Reversible integer transform applied to one hypercube of words.
//!
//! The forward transform rotates the sign bit of every word to the
//! least-significant position, takes wrapping differences along each axis of
//! the cube, and complements words whose difference came out negative, so
//! that spatially correlated inputs turn into words with long runs of zero
//! bits. All three steps are exactly invertible in modular arithmetic.

use crate::codec::Profile;
use crate::extent::{side_length, HYPERCUBE_ELEMENTS};
use crate::value::Bits;

/// Applies the forward block transform in place.
///
/// `block` must hold exactly [`HYPERCUBE_ELEMENTS`] words laid out
/// first-major. The differential pass sequence depends on `dims` and
/// `profile`; see [`Profile`].
pub fn block_transform<B: Bits>(block: &mut [B], dims: usize, profile: Profile) {
    assert_eq!(block.len(), HYPERCUBE_ELEMENTS);
    for w in block.iter_mut() {
        *w = w.rotate_left(1);
    }
    let s = side_length(dims);
    match (dims, profile) {
        (1, _) => {
            forward_difference(block, s, 1);
        }
        (2, Profile::Fast) => {
            for row in 0..s {
                forward_difference(&mut block[row * s..(row + 1) * s], s, 1);
            }
        }
        (2, Profile::Strong) => {
            for row in 0..s {
                forward_difference(&mut block[row * s..(row + 1) * s], s, 1);
            }
            for col in 0..s {
                forward_difference(&mut block[col..], s, s);
            }
        }
        (3, Profile::Fast) => {
            for line in 0..s * s {
                forward_difference(&mut block[line * s..(line + 1) * s], s, 1);
            }
        }
        (3, Profile::Strong) => {
            for i in 0..s * s {
                forward_difference(&mut block[i..], s, s * s);
            }
            for line in 0..s * s {
                forward_difference(&mut block[line * s..(line + 1) * s], s, 1);
            }
            for plane in 0..s {
                for i in 0..s {
                    forward_difference(&mut block[plane * s * s + i..], s, s);
                }
            }
        }
        _ => unreachable!("dimensionality must be 1, 2, or 3"),
    }
    for w in block.iter_mut() {
        *w = complement_negative(*w);
    }
}

/// Applies the inverse block transform in place, undoing
/// [`block_transform`] exactly.
pub fn inverse_block_transform<B: Bits>(block: &mut [B], dims: usize, profile: Profile) {
    assert_eq!(block.len(), HYPERCUBE_ELEMENTS);
    for w in block.iter_mut() {
        *w = complement_negative(*w);
    }
    let s = side_length(dims);
    match (dims, profile) {
        (1, _) => {
            inverse_difference(block, s, 1);
        }
        (2, Profile::Fast) => {
            for row in 0..s {
                inverse_difference(&mut block[row * s..(row + 1) * s], s, 1);
            }
        }
        (2, Profile::Strong) => {
            for col in 0..s {
                inverse_difference(&mut block[col..], s, s);
            }
            for row in 0..s {
                inverse_difference(&mut block[row * s..(row + 1) * s], s, 1);
            }
        }
        (3, Profile::Fast) => {
            for line in 0..s * s {
                inverse_difference(&mut block[line * s..(line + 1) * s], s, 1);
            }
        }
        (3, Profile::Strong) => {
            for plane in 0..s {
                for i in 0..s {
                    inverse_difference(&mut block[plane * s * s + i..], s, s);
                }
            }
            for line in 0..s * s {
                inverse_difference(&mut block[line * s..(line + 1) * s], s, 1);
            }
            for i in 0..s * s {
                inverse_difference(&mut block[i..], s, s * s);
            }
        }
        _ => unreachable!("dimensionality must be 1, 2, or 3"),
    }
    for w in block.iter_mut() {
        *w = w.rotate_right(1);
    }
}

/// Replaces each of the `n` words strided `stride` apart by its wrapping
/// difference with the previous one; position 0 is unchanged.
fn forward_difference<B: Bits>(line: &mut [B], n: usize, stride: usize) {
    let mut prev = line[0];
    for i in 1..n {
        let cur = line[i * stride];
        line[i * stride] = cur.wrapping_sub(&prev);
        prev = cur;
    }
}

/// Wrapping prefix sum over `n` words strided `stride` apart.
fn inverse_difference<B: Bits>(line: &mut [B], n: usize, stride: usize) {
    for i in 1..n {
        line[i * stride] = line[i * stride].wrapping_add(&line[(i - 1) * stride]);
    }
}

/// Flips the low `W-1` bits of words whose high bit is set. An involution:
/// the high bit is left untouched, so applying it twice is the identity.
#[inline(always)]
fn complement_negative<B: Bits>(w: B) -> B {
    if w >> (B::WIDTH - 1) == B::zero() {
        w
    } else {
        w ^ (B::max_value() >> 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn random_block_u32(seed: u64) -> Vec<u32> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..HYPERCUBE_ELEMENTS).map(|_| rng.gen()).collect()
    }

    fn random_block_u64(seed: u64) -> Vec<u64> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..HYPERCUBE_ELEMENTS).map(|_| rng.gen()).collect()
    }

    #[test]
    fn test_complement_negative_involution() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..1000 {
            let w: u64 = rng.gen();
            assert_eq!(complement_negative(complement_negative(w)), w);
        }
        assert_eq!(complement_negative(0u32), 0);
        assert_eq!(complement_negative(u32::MAX), 1 << 31);
    }

    #[test]
    fn test_difference_round_trip() {
        let mut line = vec![5u32, 17, 2, 0xffff_fff0, 3, 3, 3, 100];
        let orig = line.clone();
        forward_difference(&mut line, 8, 1);
        assert_eq!(line[0], 5);
        assert_eq!(line[1], 12);
        inverse_difference(&mut line, 8, 1);
        assert_eq!(line, orig);
    }

    #[test]
    fn test_block_transform_involution() {
        for dims in 1..=3 {
            for profile in [Profile::Fast, Profile::Strong] {
                let orig = random_block_u32(42 + dims as u64);
                let mut block = orig.clone();
                block_transform(&mut block, dims, profile);
                assert_ne!(block, orig);
                inverse_block_transform(&mut block, dims, profile);
                assert_eq!(block, orig, "dims={dims} profile={profile:?}");

                let orig = random_block_u64(1042 + dims as u64);
                let mut block = orig.clone();
                block_transform(&mut block, dims, profile);
                inverse_block_transform(&mut block, dims, profile);
                assert_eq!(block, orig, "dims={dims} profile={profile:?}");
            }
        }
    }

    #[test]
    fn test_ramp_collapses_to_constant_rows() {
        // A linear ramp along the contiguous axis leaves every position
        // except the row heads with the same small difference word.
        let mut block: Vec<u32> = (0..HYPERCUBE_ELEMENTS)
            .map(|i| ((i % 64) as f32).to_bits())
            .collect();
        block_transform(&mut block, 2, Profile::Fast);
        let inner: Vec<u32> = (0..64)
            .flat_map(|row| block[row * 64 + 2..(row + 1) * 64].to_vec())
            .collect();
        assert!(inner.windows(2).filter(|w| w[0] == w[1]).count() > inner.len() / 2);
    }
}
