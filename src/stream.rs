//! Stream framing: the fixed header and word-granular cursors over
//! caller-owned byte buffers.
//!
//! Everything on the wire is little-endian. A stream consists of the
//! [`Header`], an offset table of `H` entries (each as wide as one word),
//! the concatenated hypercube blocks, and the raw border words.

use std::marker::PhantomData;

use crate::codec::Profile;
use crate::error::{Error, Result};
use crate::extent::{Extent, MAX_DIMS};
use crate::value::Bits;

/// Magic identifier opening every stream.
pub const MAGIC: [u8; 4] = *b"HCZ1";

/// Size of the fixed stream header in bytes: the 4-byte magic, four
/// configuration bytes, and three little-endian u32 extent slots (unused
/// slots are zero).
pub const HEADER_BYTES: usize = 20;

/// The fixed self-describing stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Width of one value in bits (32 or 64).
    pub width: u8,
    /// Differential pass sequence used by the block transform.
    pub profile: Profile,
    /// Shape of the encoded array.
    pub extent: Extent,
}

impl Header {
    /// Encodes the header into `dst`, returning [`HEADER_BYTES`].
    ///
    /// # Errors
    ///
    /// An error is returned if `dst` is shorter than [`HEADER_BYTES`].
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize> {
        if dst.len() < HEADER_BYTES {
            return Err(Error::ShortInput {
                need: HEADER_BYTES,
                have: dst.len(),
            });
        }
        dst[..4].copy_from_slice(&MAGIC);
        dst[4] = self.extent.dims() as u8;
        dst[5] = self.width;
        dst[6] = self.profile.axis_order_byte();
        dst[7] = 0;
        for axis in 0..MAX_DIMS {
            let n = if axis < self.extent.dims() {
                self.extent.length(axis) as u32
            } else {
                0
            };
            dst[8 + 4 * axis..12 + 4 * axis].copy_from_slice(&n.to_le_bytes());
        }
        Ok(HEADER_BYTES)
    }

    /// Decodes and validates a header from the front of `src`.
    ///
    /// # Errors
    ///
    /// An error is returned if `src` is too short, the magic does not match,
    /// or any configuration byte is out of range.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_BYTES {
            return Err(Error::ShortInput {
                need: HEADER_BYTES,
                have: src.len(),
            });
        }
        if src[..4] != MAGIC {
            return Err(Error::BadConfig("stream magic mismatch".into()));
        }
        let dims = src[4] as usize;
        if !(1..=MAX_DIMS).contains(&dims) {
            return Err(Error::BadConfig(format!(
                "dimensionality byte must be in 1..=3, but got {dims}"
            )));
        }
        let width = src[5];
        if width != 32 && width != 64 {
            return Err(Error::BadConfig(format!(
                "width byte must be 32 or 64, but got {width}"
            )));
        }
        let profile = Profile::from_axis_order_byte(src[6])?;
        let mut lengths = [0usize; MAX_DIMS];
        for (axis, slot) in lengths.iter_mut().enumerate() {
            *slot =
                u32::from_le_bytes(src[8 + 4 * axis..12 + 4 * axis].try_into().unwrap()) as usize;
        }
        let extent = Extent::new(&lengths[..dims])?;
        Ok(Self {
            width,
            profile,
            extent,
        })
    }
}

/// Writes words of type `B` into a caller-owned byte buffer, little-endian,
/// tracking the byte position.
#[derive(Debug)]
pub struct WordWriter<'a, B> {
    buf: &'a mut [u8],
    pos: usize,
    _marker: PhantomData<B>,
}

impl<'a, B: Bits> WordWriter<'a, B> {
    /// Creates a writer over `buf` starting at byte 0.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            _marker: PhantomData,
        }
    }

    /// Appends one word.
    ///
    /// # Errors
    ///
    /// An error is returned if the word would not fit.
    #[inline]
    pub fn write(&mut self, word: B) -> Result<()> {
        if self.pos + B::BYTES > self.buf.len() {
            return Err(Error::ShortInput {
                need: self.pos + B::BYTES,
                have: self.buf.len(),
            });
        }
        word.write_le(&mut self.buf[self.pos..]);
        self.pos += B::BYTES;
        Ok(())
    }

    /// Returns the number of bytes written so far.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Reads words of type `B` from a byte buffer, little-endian, tracking the
/// byte position.
#[derive(Debug, Clone)]
pub struct WordReader<'a, B> {
    buf: &'a [u8],
    pos: usize,
    _marker: PhantomData<B>,
}

impl<'a, B: Bits> WordReader<'a, B> {
    /// Creates a reader over `buf` starting at byte 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            _marker: PhantomData,
        }
    }

    /// Reads the next word.
    ///
    /// # Errors
    ///
    /// An error is returned if fewer than `B::BYTES` bytes remain.
    #[inline]
    pub fn read(&mut self) -> Result<B> {
        if self.pos + B::BYTES > self.buf.len() {
            return Err(Error::ShortInput {
                need: self.pos + B::BYTES,
                have: self.buf.len(),
            });
        }
        let word = B::read_le(&self.buf[self.pos..]);
        self.pos += B::BYTES;
        Ok(word)
    }

    /// Moves the cursor to byte position `pos`.
    ///
    /// # Errors
    ///
    /// An error is returned if `pos` lies past the end of the buffer.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(Error::ShortInput {
                need: pos,
                have: self.buf.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Returns the current byte position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}
