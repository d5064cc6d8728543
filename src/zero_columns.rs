//! Zero-column elimination for one transposed column group.
//!
//! After the transpose, most high bit planes of a correlated group are
//! all-zero words. Each group is emitted as one header word naming the
//! non-zero planes, followed by exactly those planes. The header maps plane
//! `i` to bit `W-1-i`, so plane 0 occupies the most-significant bit, and the
//! payload preserves ascending plane order. Decoding is a popcount-driven
//! scatter; no explicit length is stored anywhere.

use crate::stream::{WordReader, WordWriter};
use crate::value::Bits;
use crate::Result;

/// Encodes one column group of `W` words: header first, then every non-zero
/// word in ascending index order.
pub fn encode_zero_columns<B: Bits>(group: &[B], writer: &mut WordWriter<'_, B>) -> Result<()> {
    debug_assert_eq!(group.len(), B::WIDTH);
    let mut header = B::zero();
    for (i, &w) in group.iter().enumerate() {
        if w != B::zero() {
            header = header | (B::one() << (B::WIDTH - 1 - i));
        }
    }
    writer.write(header)?;
    for &w in group {
        if w != B::zero() {
            writer.write(w)?;
        }
    }
    Ok(())
}

/// Decodes one column group: reads the header, then scatters the announced
/// words back into `group`, zero-filling the rest.
///
/// # Errors
///
/// An error is returned if the header announces more words than the stream
/// holds.
pub fn decode_zero_columns<B: Bits>(reader: &mut WordReader<'_, B>, group: &mut [B]) -> Result<()> {
    debug_assert_eq!(group.len(), B::WIDTH);
    let header = reader.read()?;
    let announced = header.count_ones() as usize * B::BYTES;
    if reader.remaining() < announced {
        return Err(crate::Error::ShortInput {
            need: reader.pos() + announced,
            have: reader.pos() + reader.remaining(),
        });
    }
    for (i, slot) in group.iter_mut().enumerate() {
        *slot = if (header >> (B::WIDTH - 1 - i)) & B::one() != B::zero() {
            reader.read()?
        } else {
            B::zero()
        };
    }
    Ok(())
}
