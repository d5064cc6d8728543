//! # hczip
//!
//! A lossless compressor for dense 1-, 2-, and 3-dimensional arrays of
//! IEEE-754 single- or double-precision floats, aimed at scientific
//! simulation and visualization dumps where values are spatially correlated.
//! The exact bit pattern of every input value is recovered, including signed
//! zeros, infinities, and NaN payloads; nothing is ever quantized.
//!
//! ## Pipeline
//!
//! The array is tiled into hypercubes of 4096 values (4096, 64x64, or
//! 16x16x16 depending on dimensionality). Each hypercube is reinterpreted as
//! unsigned words ([`Value`]), decorrelated by a reversible integer
//! transform ([`transform`]), transposed into bit planes ([`transpose`]),
//! and compacted by dropping all-zero planes ([`zero_columns`]). Whatever
//! the tiling does not cover is appended verbatim ([`border`]). The result
//! is a self-describing stream ([`stream`]) that decodes back to the exact
//! input.
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use hczip::{compress, compressed_size_bound, decompress, Extent, Profile, Slice, SliceMut};
//!
//! let extent = Extent::new(&[70, 70])?;
//! let data: Vec<f32> = (0..extent.num_elements()).map(|i| (i % 97) as f32).collect();
//!
//! let mut stream = vec![0u8; compressed_size_bound::<f32>(&extent)];
//! let len = compress(&Slice::new(&data, extent)?, &mut stream, Profile::Strong)?;
//!
//! let mut restored = vec![0f32; data.len()];
//! let consumed = decompress(&stream[..len], &mut SliceMut::new(&mut restored, extent)?)?;
//! assert_eq!(consumed, len);
//! assert_eq!(restored, data);
//! # Ok(())
//! # }
//! ```
//!
//! For file and pipe workloads, [`driver`] feeds fixed-extent chunks of a
//! byte stream through the codec; the `hczip` binary wraps it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod border;
pub mod codec;
pub mod driver;
pub mod error;
pub mod extent;
pub mod stream;
pub mod transform;
pub mod transpose;
pub mod value;
pub mod zero_columns;

pub use codec::{compress, compressed_size_bound, decompress, Backend, Profile, SerialCodec};
pub use error::{Error, Result};
pub use extent::{Extent, Slice, SliceMut, HYPERCUBE_ELEMENTS};
pub use value::{Bits, Value};
