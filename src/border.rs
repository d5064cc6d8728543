//! Serialization of the border: every value outside the hypercube-covered
//! prefix of the array.
//!
//! The border decomposes into one slab per axis. Slab `a` holds the values
//! whose coordinate along axis `a` lies past the covered prefix, with every
//! earlier axis unrestricted and every later axis restricted to its prefix;
//! the slabs are disjoint and cover the border exactly. Values are emitted
//! as raw words in slab order, row-major within each slab.

use crate::extent::{Extent, Slice, SliceMut};
use crate::stream::{WordReader, WordWriter};
use crate::value::Value;
use crate::Result;

/// Invokes `f` with the linear index of every border value, in canonical
/// slab order.
fn for_each_border_index<F: FnMut(usize)>(extent: &Extent, mut f: F) {
    match extent.dims() {
        1 => {
            for c0 in extent.trimmed(0)..extent.length(0) {
                f(c0);
            }
        }
        2 => {
            let (n0, n1) = (extent.length(0), extent.length(1));
            let (t0, t1) = (extent.trimmed(0), extent.trimmed(1));
            for c0 in t0..n0 {
                for c1 in 0..t1 {
                    f(c0 * n1 + c1);
                }
            }
            for c0 in 0..n0 {
                for c1 in t1..n1 {
                    f(c0 * n1 + c1);
                }
            }
        }
        3 => {
            let (n0, n1, n2) = (extent.length(0), extent.length(1), extent.length(2));
            let (t0, t1, t2) = (extent.trimmed(0), extent.trimmed(1), extent.trimmed(2));
            for c0 in t0..n0 {
                for c1 in 0..t1 {
                    for c2 in 0..t2 {
                        f((c0 * n1 + c1) * n2 + c2);
                    }
                }
            }
            for c0 in 0..n0 {
                for c1 in t1..n1 {
                    for c2 in 0..t2 {
                        f((c0 * n1 + c1) * n2 + c2);
                    }
                }
            }
            for c0 in 0..n0 {
                for c1 in 0..n1 {
                    for c2 in t2..n2 {
                        f((c0 * n1 + c1) * n2 + c2);
                    }
                }
            }
        }
        _ => unreachable!("dimensionality must be 1, 2, or 3"),
    }
}

/// Appends every border value of `input` to `writer` as a raw word.
pub fn encode_border<T: Value>(
    input: &Slice<'_, T>,
    writer: &mut WordWriter<'_, T::Bits>,
) -> Result<()> {
    let extent = input.extent();
    let data = input.data();
    let mut result = Ok(());
    for_each_border_index(&extent, |idx| {
        if result.is_ok() {
            result = writer.write(data[idx].to_bits());
        }
    });
    result
}

/// Reads the border values of `output` back from `reader`.
pub fn decode_border<T: Value>(
    reader: &mut WordReader<'_, T::Bits>,
    output: &mut SliceMut<'_, T>,
) -> Result<()> {
    let extent = output.extent();
    let data = output.data_mut();
    let mut result = Ok(());
    for_each_border_index(&extent, |idx| {
        if result.is_ok() {
            match reader.read() {
                Ok(word) => data[idx] = T::from_bits(word),
                Err(e) => result = Err(e),
            }
        }
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_indices(extent: &Extent) -> Vec<usize> {
        let mut v = Vec::new();
        for_each_border_index(extent, |i| v.push(i));
        v
    }

    #[test]
    fn test_covers_border_exactly_once() {
        for lengths in [vec![4097], vec![70, 130], vec![17, 33, 20]] {
            let extent = Extent::new(&lengths).unwrap();
            let mut indices = collect_indices(&extent);
            assert_eq!(indices.len(), extent.num_border_elements());
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), extent.num_border_elements());
            assert!(indices.iter().all(|&i| i < extent.num_elements()));
        }
    }

    #[test]
    fn test_single_trailing_value_1d() {
        let extent = Extent::new(&[4097]).unwrap();
        assert_eq!(collect_indices(&extent), vec![4096]);
    }

    #[test]
    fn test_aligned_extent_has_no_border() {
        let extent = Extent::new(&[64, 128]).unwrap();
        assert!(collect_indices(&extent).is_empty());
    }

    #[test]
    fn test_trailing_slab_3d() {
        // 65x16x16: only the first axis has a remainder, so the border is
        // the 16x16 slab at first coordinate 64.
        let extent = Extent::new(&[65, 16, 16]).unwrap();
        let indices = collect_indices(&extent);
        assert_eq!(indices.len(), 256);
        assert!(indices.iter().all(|&i| i / 256 == 64));
    }

    #[test]
    fn test_round_trip() {
        let extent = Extent::new(&[70, 70]).unwrap();
        let data: Vec<f32> = (0..extent.num_elements()).map(|i| i as f32).collect();
        let input = Slice::new(&data, extent).unwrap();

        let mut buf = vec![0u8; extent.num_border_elements() * 4];
        let len = {
            let mut w = WordWriter::<u32>::new(&mut buf);
            encode_border(&input, &mut w).unwrap();
            w.pos()
        };
        assert_eq!(len, buf.len());

        let mut restored = vec![0f32; extent.num_elements()];
        {
            let mut output = SliceMut::new(&mut restored, extent).unwrap();
            let mut r = WordReader::<u32>::new(&buf);
            decode_border(&mut r, &mut output).unwrap();
        }
        let mut expected = vec![0f32; extent.num_elements()];
        for_each_border_index(&extent, |i| expected[i] = data[i]);
        assert_eq!(restored, expected);
    }
}
