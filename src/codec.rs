//! The hypercube codec: block scheduling, stream assembly, and the
//! top-level compression entry points.
//!
//! Compression tiles the array into non-overlapping hypercubes in
//! first-major index order and runs each through the pipeline: gather with
//! [`Value::to_bits`], [`block_transform`], then per column group
//! [`transpose_bits`] and [`encode_zero_columns`]. The variable-length
//! blocks land in the stream body behind a header and a per-block offset
//! table, and the border values follow as raw words. Decompression mirrors
//! every step.
//!
//! For 32-bit values the offset-table entries are 32 bits wide, which limits
//! one stream's block payload to 4 GiB; chunked streams (see
//! [`crate::driver`]) sidestep the limit.

use crate::border::{decode_border, encode_border};
use crate::error::{Error, Result};
use crate::extent::{Extent, Slice, SliceMut, HYPERCUBE_ELEMENTS, MAX_DIMS};
use crate::stream::{Header, WordReader, WordWriter, HEADER_BYTES};
use crate::transform::{block_transform, inverse_block_transform};
use crate::transpose::transpose_bits;
use crate::value::{Bits, Value};
use crate::zero_columns::{decode_zero_columns, encode_zero_columns};
use num_traits::{Bounded, Zero};

/// Tuning profile for the block transform's differential pass sequence.
///
/// `Strong` (the default) decorrelates along every axis: dimension 1 runs a
/// single stride-1 pass; dimension 2 runs stride-1 then stride-S; dimension 3
/// runs stride-S², stride-1, then stride-S. `Fast` runs only the stride-1
/// pass, trading ratio for throughput. The choice is recorded in the stream
/// header, so decompression is self-describing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Throughput-tuned: differences along the contiguous axis only.
    Fast,
    /// Ratio-tuned: differences along every axis.
    #[default]
    Strong,
}

impl Profile {
    /// Returns the axis-order byte stored in the stream header.
    pub fn axis_order_byte(self) -> u8 {
        match self {
            Self::Fast => 0,
            Self::Strong => 1,
        }
    }

    /// Parses the axis-order byte of a stream header.
    ///
    /// # Errors
    ///
    /// An error is returned for an unknown byte value.
    pub fn from_axis_order_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Self::Fast),
            1 => Ok(Self::Strong),
            b => Err(Error::BadConfig(format!("unknown axis-order byte {b}"))),
        }
    }
}

/// A back-end able to compress and decompress arrays of `T`.
///
/// Every implementation must produce the byte stream defined by the serial
/// reference ([`SerialCodec`]) for the same input, extent, and profile;
/// accelerated back-ends differ only in how they get there.
pub trait Backend<T: Value> {
    /// Compresses `input` into `output`, returning the stream length in
    /// bytes. `output` must hold at least
    /// [`compressed_size_bound`]`(input.extent())` bytes.
    fn compress(&self, input: &Slice<'_, T>, output: &mut [u8]) -> Result<usize>;

    /// Decompresses one stream from the front of `input` into `output`,
    /// returning the number of bytes consumed.
    fn decompress(&self, input: &[u8], output: &mut SliceMut<'_, T>) -> Result<usize>;
}

/// The single-threaded reference back-end.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use hczip::{compressed_size_bound, Backend, Extent, SerialCodec, Slice, SliceMut};
///
/// let extent = Extent::new(&[100])?;
/// let data: Vec<f64> = (0..100).map(|i| (i as f64).sin()).collect();
///
/// let codec = SerialCodec::default();
/// let mut stream = vec![0u8; compressed_size_bound::<f64>(&extent)];
/// let len = codec.compress(&Slice::new(&data, extent)?, &mut stream)?;
///
/// let mut restored = vec![0f64; 100];
/// let consumed = codec.decompress(&stream[..len], &mut SliceMut::new(&mut restored, extent)?)?;
/// assert_eq!(consumed, len);
/// assert_eq!(restored, data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialCodec {
    profile: Profile,
}

impl SerialCodec {
    /// Creates a codec with the given profile.
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Returns the profile.
    pub fn profile(&self) -> Profile {
        self.profile
    }
}

impl<T: Value> Backend<T> for SerialCodec {
    fn compress(&self, input: &Slice<'_, T>, output: &mut [u8]) -> Result<usize> {
        compress(input, output, self.profile)
    }

    fn decompress(&self, input: &[u8], output: &mut SliceMut<'_, T>) -> Result<usize> {
        decompress(input, output)
    }
}

/// Returns a conservative upper bound on the compressed size of an array
/// with the given extent, in bytes.
///
/// The bound assumes every block keeps all of its header and data words.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use hczip::{compressed_size_bound, Extent};
///
/// let extent = Extent::new(&[4096])?;
/// // One block: 128 header words plus up to 4096 data words, one table
/// // entry, and the 20-byte stream header.
/// assert_eq!(compressed_size_bound::<f32>(&extent), 20 + 4 + (128 + 4096) * 4);
/// # Ok(())
/// # }
/// ```
pub fn compressed_size_bound<T: Value>(extent: &Extent) -> usize {
    let bytes = T::Bits::BYTES;
    let h = extent.num_hypercubes();
    let max_block = (HYPERCUBE_ELEMENTS / T::Bits::WIDTH + HYPERCUBE_ELEMENTS) * bytes;
    HEADER_BYTES + h * bytes + h * max_block + extent.num_border_elements() * bytes
}

/// Compresses `input` into `output` with the given profile, returning the
/// stream length in bytes.
///
/// Compression is total: it fails only if `output` is smaller than
/// [`compressed_size_bound`] requires.
pub fn compress<T: Value>(
    input: &Slice<'_, T>,
    output: &mut [u8],
    profile: Profile,
) -> Result<usize> {
    let extent = input.extent();
    let bound = compressed_size_bound::<T>(&extent);
    if output.len() < bound {
        return Err(Error::ShortInput {
            need: bound,
            have: output.len(),
        });
    }

    let header = Header {
        width: T::Bits::WIDTH as u8,
        profile,
        extent,
    };
    header.encode(output)?;

    let num_hypercubes = extent.num_hypercubes();
    let table_bytes = num_hypercubes * T::Bits::BYTES;
    let (table_buf, body_buf) = output[HEADER_BYTES..].split_at_mut(table_bytes);

    let mut offsets = Vec::with_capacity(num_hypercubes);
    let mut cube = vec![T::Bits::zero(); HYPERCUBE_ELEMENTS];
    let mut writer = WordWriter::<T::Bits>::new(body_buf);
    for index in 0..num_hypercubes {
        offsets.push(writer.pos());
        load_hypercube(input, extent.hypercube_origin(index), &mut cube);
        block_transform(&mut cube, extent.dims(), profile);
        for group in cube.chunks_mut(T::Bits::WIDTH) {
            transpose_bits(group);
            encode_zero_columns(group, &mut writer)?;
        }
    }
    encode_border(input, &mut writer)?;
    let body_len = writer.pos();

    let mut table = WordWriter::<T::Bits>::new(table_buf);
    for offset in offsets {
        debug_assert!(offset <= T::Bits::max_value().to_usize());
        table.write(T::Bits::from_usize(offset))?;
    }

    Ok(HEADER_BYTES + table_bytes + body_len)
}

/// Decompresses one stream from the front of `input` into `output`,
/// returning the number of bytes consumed. When `input` holds exactly one
/// stream, the return value equals `input.len()`.
///
/// # Errors
///
/// An error is returned if the stream header disagrees with `output`'s
/// extent or value width, or if the stream runs short of the words its
/// headers announce.
pub fn decompress<T: Value>(input: &[u8], output: &mut SliceMut<'_, T>) -> Result<usize> {
    let header = Header::decode(input)?;
    if header.width as usize != T::Bits::WIDTH {
        return Err(Error::BadConfig(format!(
            "stream holds {}-bit values, but {}-bit values were requested",
            header.width,
            T::Bits::WIDTH
        )));
    }
    let extent = output.extent();
    if header.extent != extent {
        return Err(Error::BadConfig(format!(
            "stream extent {:?} does not match output extent {:?}",
            header.extent, extent
        )));
    }

    let num_hypercubes = extent.num_hypercubes();
    let table_end = HEADER_BYTES + num_hypercubes * T::Bits::BYTES;
    if input.len() < table_end {
        return Err(Error::ShortInput {
            need: table_end,
            have: input.len(),
        });
    }
    let mut table = WordReader::<T::Bits>::new(&input[HEADER_BYTES..table_end]);
    let mut offsets = Vec::with_capacity(num_hypercubes);
    for _ in 0..num_hypercubes {
        offsets.push(table.read()?.to_usize());
    }

    let body = &input[table_end..];
    let mut reader = WordReader::<T::Bits>::new(body);
    let mut cube = vec![T::Bits::zero(); HYPERCUBE_ELEMENTS];
    for (index, &offset) in offsets.iter().enumerate() {
        reader.seek(offset)?;
        for group in cube.chunks_mut(T::Bits::WIDTH) {
            decode_zero_columns(&mut reader, group)?;
            transpose_bits(group);
        }
        inverse_block_transform(&mut cube, extent.dims(), header.profile);
        store_hypercube(output, extent.hypercube_origin(index), &cube);
    }
    decode_border(&mut reader, output)?;

    Ok(table_end + reader.pos())
}

/// Gathers one hypercube at `origin` into `cube`, reinterpreting each value
/// as its storage bits.
fn load_hypercube<T: Value>(input: &Slice<'_, T>, origin: [usize; MAX_DIMS], cube: &mut [T::Bits]) {
    let extent = input.extent();
    let data = input.data();
    let s = extent.side_length();
    match extent.dims() {
        1 => {
            for (dst, src) in cube.iter_mut().zip(&data[origin[0]..origin[0] + s]) {
                *dst = src.to_bits();
            }
        }
        2 => {
            let n1 = extent.length(1);
            for y in 0..s {
                let base = (origin[0] + y) * n1 + origin[1];
                for (dst, src) in cube[y * s..(y + 1) * s].iter_mut().zip(&data[base..base + s]) {
                    *dst = src.to_bits();
                }
            }
        }
        3 => {
            let (n1, n2) = (extent.length(1), extent.length(2));
            for z in 0..s {
                for y in 0..s {
                    let base = ((origin[0] + z) * n1 + origin[1] + y) * n2 + origin[2];
                    let line = (z * s + y) * s;
                    for (dst, src) in cube[line..line + s].iter_mut().zip(&data[base..base + s]) {
                        *dst = src.to_bits();
                    }
                }
            }
        }
        _ => unreachable!("dimensionality must be 1, 2, or 3"),
    }
}

/// Scatters `cube` back to its position at `origin` in `output`.
fn store_hypercube<T: Value>(
    output: &mut SliceMut<'_, T>,
    origin: [usize; MAX_DIMS],
    cube: &[T::Bits],
) {
    let extent = output.extent();
    let s = extent.side_length();
    let data = output.data_mut();
    match extent.dims() {
        1 => {
            for (dst, &src) in data[origin[0]..origin[0] + s].iter_mut().zip(cube) {
                *dst = T::from_bits(src);
            }
        }
        2 => {
            let n1 = extent.length(1);
            for y in 0..s {
                let base = (origin[0] + y) * n1 + origin[1];
                for (dst, &src) in data[base..base + s].iter_mut().zip(&cube[y * s..(y + 1) * s]) {
                    *dst = T::from_bits(src);
                }
            }
        }
        3 => {
            let (n1, n2) = (extent.length(1), extent.length(2));
            for z in 0..s {
                for y in 0..s {
                    let base = ((origin[0] + z) * n1 + origin[1] + y) * n2 + origin[2];
                    let line = (z * s + y) * s;
                    for (dst, &src) in data[base..base + s].iter_mut().zip(&cube[line..line + s]) {
                        *dst = T::from_bits(src);
                    }
                }
            }
        }
        _ => unreachable!("dimensionality must be 1, 2, or 3"),
    }
}
