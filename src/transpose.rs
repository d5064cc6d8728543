//! Bit-plane transpose of a column group.
//!
//! A column group of W words is viewed as a W x W bit matrix whose rows are
//! the words, most-significant bit first. Transposing it turns word k of the
//! output into bit plane k of the input: adjacent values that agree in their
//! high bits produce all-zero high planes, which the zero-column stage then
//! drops.

use crate::value::Bits;

/// Transposes `words` as a W x W bit matrix in place.
///
/// Output word `k` collects bit `W-1-k` of every input word `j`, placed at
/// bit `W-1-j`. The operation is its own inverse.
///
/// # Panics
///
/// It will panic if `words.len()` is not the bit width of `B`.
///
/// # Examples
///
/// ```
/// use hczip::transpose::transpose_bits;
///
/// let mut words = [0u32; 32];
/// words[0] = 1;
/// transpose_bits(&mut words);
/// // The lowest bit of word 0 becomes the highest bit of word 31.
/// assert_eq!(words[31], 1 << 31);
/// ```
pub fn transpose_bits<B: Bits>(words: &mut [B]) {
    assert_eq!(words.len(), B::WIDTH);
    let mut planes = [B::zero(); 64];
    for (k, plane) in planes[..B::WIDTH].iter_mut().enumerate() {
        let mut acc = B::zero();
        for (j, &w) in words.iter().enumerate() {
            acc = acc | (((w >> (B::WIDTH - 1 - k)) & B::one()) << (B::WIDTH - 1 - j));
        }
        *plane = acc;
    }
    words.copy_from_slice(&planes[..B::WIDTH]);
}
