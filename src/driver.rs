//! Chunked stream driver: feeds fixed-extent slabs of a byte stream through
//! the codec.
//!
//! The driver treats its input as a sequence of chunks, each a raw
//! little-endian dump of one array of the declared extent. Compression reads
//! whole chunks and concatenates the resulting streams; decompression
//! decodes one stream at a time, carrying any unconsumed tail bytes over to
//! the next read. End-of-input must land exactly on a stream boundary;
//! trailing padding is rejected.

use std::io::{self, Read, Write};

use crate::codec::{compress, compressed_size_bound, decompress, Profile};
use crate::error::{Error, Result};
use crate::extent::{Extent, Slice, SliceMut};
use crate::value::{Bits, Value};
use num_traits::Zero;

/// Accumulated sizes of one driver run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChunkStats {
    /// Number of chunks processed.
    pub chunks: usize,
    /// Total raw bytes read (compression) or written (decompression).
    pub raw_bytes: u64,
    /// Total compressed bytes written (compression) or read (decompression).
    pub compressed_bytes: u64,
}

impl ChunkStats {
    /// Returns the ratio of raw to compressed bytes.
    pub fn ratio(&self) -> f64 {
        self.raw_bytes as f64 / self.compressed_bytes as f64
    }
}

/// Compresses `input` chunk by chunk into `output`.
///
/// # Errors
///
/// An error is returned if `input` is empty, if its size is not a multiple
/// of the chunk size, or on any I/O failure.
pub fn compress_stream<T: Value, R: Read, W: Write>(
    mut input: R,
    mut output: W,
    extent: Extent,
    profile: Profile,
) -> Result<ChunkStats> {
    let num_elements = extent.num_elements();
    let chunk_bytes = num_elements * T::Bits::BYTES;
    let mut raw = vec![0u8; chunk_bytes];
    let mut values = vec![T::from_bits(T::Bits::zero()); num_elements];
    let mut stream = vec![0u8; compressed_size_bound::<T>(&extent)];

    let mut stats = ChunkStats::default();
    loop {
        let got = read_full(&mut input, &mut raw)?;
        if got == 0 && stats.chunks > 0 {
            break;
        }
        if got < chunk_bytes {
            return Err(Error::BadConfig(format!(
                "input size is not a multiple of the {chunk_bytes}-byte array size"
            )));
        }

        for (value, bytes) in values.iter_mut().zip(raw.chunks_exact(T::Bits::BYTES)) {
            *value = T::from_bits(T::Bits::read_le(bytes));
        }
        let len = compress(&Slice::new(&values, extent)?, &mut stream, profile)?;
        output.write_all(&stream[..len])?;

        stats.chunks += 1;
        stats.raw_bytes += chunk_bytes as u64;
        stats.compressed_bytes += len as u64;
    }
    output.flush()?;
    Ok(stats)
}

/// Decompresses a concatenation of streams from `input` into `output`,
/// writing one raw chunk per stream.
///
/// # Errors
///
/// An error is returned if a stream is malformed, if the input ends in the
/// middle of a stream, or on any I/O failure.
pub fn decompress_stream<T: Value, R: Read, W: Write>(
    mut input: R,
    mut output: W,
    extent: Extent,
) -> Result<ChunkStats> {
    let num_elements = extent.num_elements();
    let chunk_bytes = num_elements * T::Bits::BYTES;
    let bound = compressed_size_bound::<T>(&extent);
    let mut buf = vec![0u8; bound];
    let mut filled = 0;
    let mut values = vec![T::from_bits(T::Bits::zero()); num_elements];
    let mut raw = vec![0u8; chunk_bytes];

    let mut stats = ChunkStats::default();
    loop {
        filled += read_full(&mut input, &mut buf[filled..])?;
        if filled == 0 {
            break;
        }

        let consumed = {
            let mut slice = SliceMut::new(&mut values, extent)?;
            decompress(&buf[..filled], &mut slice)?
        };
        for (bytes, value) in raw.chunks_exact_mut(T::Bits::BYTES).zip(&values) {
            value.to_bits().write_le(bytes);
        }
        output.write_all(&raw)?;

        buf.copy_within(consumed..filled, 0);
        filled -= consumed;
        stats.chunks += 1;
        stats.raw_bytes += chunk_bytes as u64;
        stats.compressed_bytes += consumed as u64;
    }
    output.flush()?;
    Ok(stats)
}

/// Reads until `buf` is full or the reader reports end of input, returning
/// the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
