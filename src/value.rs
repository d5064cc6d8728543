//! Conversions between floating-point values and same-width unsigned words.
//!
//! The codec never performs floating-point arithmetic: every value is
//! reinterpreted as an unsigned integer of the same width on the way in and
//! back again on the way out, so NaN payloads, signed zeros, and infinities
//! survive the round trip bit for bit.

use std::fmt::Debug;

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

/// An unsigned machine word the codec operates on.
///
/// Implemented for [`u32`] and [`u64`], matching the two supported value
/// widths. The bound on [`PrimInt`] supplies shifts, rotations, and popcount;
/// the wrapping bounds supply the modular arithmetic of the block transform.
pub trait Bits:
    PrimInt + WrappingAdd + WrappingSub + Debug + Send + Sync + 'static
{
    /// Width of the word in bits.
    const WIDTH: usize;

    /// Width of the word in bytes.
    const BYTES: usize;

    /// Writes the word into `dst[..Self::BYTES]` in little-endian order.
    fn write_le(self, dst: &mut [u8]);

    /// Reads a word from `src[..Self::BYTES]` in little-endian order.
    fn read_le(src: &[u8]) -> Self;

    /// Converts from `usize`, truncating high bits.
    fn from_usize(x: usize) -> Self;

    /// Converts to `usize`.
    fn to_usize(self) -> usize;
}

impl Bits for u32 {
    const WIDTH: usize = 32;
    const BYTES: usize = 4;

    #[inline(always)]
    fn write_le(self, dst: &mut [u8]) {
        dst[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline(always)]
    fn read_le(src: &[u8]) -> Self {
        Self::from_le_bytes(src[..4].try_into().unwrap())
    }

    #[inline(always)]
    fn from_usize(x: usize) -> Self {
        x as Self
    }

    #[inline(always)]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl Bits for u64 {
    const WIDTH: usize = 64;
    const BYTES: usize = 8;

    #[inline(always)]
    fn write_le(self, dst: &mut [u8]) {
        dst[..8].copy_from_slice(&self.to_le_bytes());
    }

    #[inline(always)]
    fn read_le(src: &[u8]) -> Self {
        Self::from_le_bytes(src[..8].try_into().unwrap())
    }

    #[inline(always)]
    fn from_usize(x: usize) -> Self {
        x as Self
    }

    #[inline(always)]
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// A floating-point sample type the codec accepts.
///
/// # Examples
///
/// ```
/// use hczip::Value;
///
/// assert_eq!(1.0f32.to_bits(), 0x3f80_0000);
/// assert_eq!(<f32 as Value>::from_bits(0x3f80_0000), 1.0);
/// ```
pub trait Value: Copy + Debug + Send + Sync + 'static {
    /// The unsigned word holding this value's storage bits.
    type Bits: Bits;

    /// Reinterprets the value's storage bits as an unsigned word.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets an unsigned word as a value of this type.
    fn from_bits(bits: Self::Bits) -> Self;
}

impl Value for f32 {
    type Bits = u32;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl Value for f64 {
    type Bits = u64;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_bits(bits: u64) -> Self {
        Self::from_bits(bits)
    }
}
