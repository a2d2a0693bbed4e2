//! Variable-length integer encodings.
//!
//! Both schemes split a 64-bit integer into 7-bit chunks, most significant
//! chunk first on the wire, with the continuation bit set on every byte
//! except the last. The `word` scheme is the plain unsigned encoding; the
//! `int` scheme carries the sign in bit 6 of the most significant chunk,
//! prepending one disambiguation chunk when that bit would otherwise
//! disagree with the sign of the value.
//!
//! The decoding halves live on [`TsonBytes`](crate::encoding::TsonBytes),
//! next to the rest of the input plumbing.

use crate::encoding::constants::*;
use smallvec::{smallvec, SmallVec};

/// Wire bytes of a single varint. A 64-bit value needs at most ten chunks.
pub type Digits = SmallVec<[u8; 10]>;

/// Encodes a `u64` as the smallest possible sequence of wire bytes.
///
/// # Example
///
/// ```
/// use tson::varint::word_digits;
///
/// // values under 128 are a single byte
/// assert_eq!(&word_digits(4)[..], [4]);
///
/// // larger values carry the continuation bit on all but the last byte
/// assert_eq!(&word_digits(128)[..], [0x81, 0x00]);
/// ```
pub fn word_digits(mut w: u64) -> Digits {
    let mut chunks: Digits = smallvec![];
    loop {
        chunks.push((w & u64::from(CHUNK_MASK)) as u8);
        w >>= 7;
        if w == 0 {
            break;
        }
    }
    wire(chunks)
}

/// Encodes an `i64` as the smallest sign-disambiguated sequence of wire
/// bytes.
///
/// # Example
///
/// ```
/// use tson::varint::int_digits;
///
/// assert_eq!(&int_digits(-1)[..], [0x7f]);
/// assert_eq!(&int_digits(64)[..], [0x80, 0x40]);
/// ```
pub fn int_digits(i: i64) -> Digits {
    let neg = i < 0;
    let mut x = i;
    let mut chunks: Digits = smallvec![];
    loop {
        chunks.push((x & i64::from(CHUNK_MASK)) as u8);
        x >>= 7;
        // an all-zeroes (or, negative, all-ones) remainder carries no
        // further information
        let done = if neg { x == -1 } else { x == 0 };
        if done {
            break;
        }
    }
    let top = chunks[chunks.len() - 1];
    if (top & SIGN_CHUNK_BIT != 0) != neg {
        chunks.push(if neg { PAD_NEGATIVE } else { PAD_POSITIVE });
    }
    wire(chunks)
}

// Chunks arrive least significant first; the wire order is the reverse,
// continuation-marked on every byte except the final one.
fn wire(chunks: Digits) -> Digits {
    let mut out = Digits::new();
    for &chunk in chunks[1..].iter().rev() {
        out.push(chunk | CONT_BIT);
    }
    out.push(chunks[0]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_zero_is_one_byte() {
        assert_eq!(&word_digits(0)[..], [0x00]);
    }

    #[test]
    fn word_seven_bit_boundary() {
        assert_eq!(&word_digits(127)[..], [0x7f]);
        assert_eq!(&word_digits(128)[..], [0x81, 0x00]);
        assert_eq!(&word_digits(300)[..], [0x82, 0x2c]);
    }

    #[test]
    fn word_max_is_ten_bytes() {
        let digs = word_digits(u64::max_value());
        assert_eq!(digs.len(), 10);
        assert_eq!(digs[0], 0x81);
        assert_eq!(digs[9], 0x7f);
    }

    #[test]
    fn int_reference_vectors() {
        let vectors: &[(i64, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (63, &[0x3f]),
            (64, &[0x80, 0x40]),
            (127, &[0x80, 0x7f]),
            (128, &[0x81, 0x00]),
            (-1, &[0x7f]),
            (-64, &[0x40]),
            (-65, &[0xff, 0x3f]),
            (-128, &[0xff, 0x00]),
        ];
        for (i, bytes) in vectors {
            assert_eq!(&int_digits(*i)[..], *bytes, "encoding {}", i);
        }
    }

    #[test]
    fn final_byte_terminates() {
        for &w in &[0u64, 1, 127, 128, 1 << 20, u64::max_value()] {
            let digs = word_digits(w);
            assert_eq!(digs[digs.len() - 1] & CONT_BIT, 0);
        }
        for &i in &[0i64, -1, 64, -65, i64::min_value(), i64::max_value()] {
            let digs = int_digits(i);
            assert_eq!(digs[digs.len() - 1] & CONT_BIT, 0);
        }
    }

    #[test]
    fn at_most_one_pad_chunk() {
        for i in -100_000i64..100_000 {
            let digs = int_digits(i);
            if digs.len() >= 2 && (digs[0] == 0x80 || digs[0] == 0xff) {
                // a pad chunk is only justified when the next chunk's sign
                // bit disagrees with the value's sign
                let next_sign = digs[1] & SIGN_CHUNK_BIT != 0;
                assert_eq!(next_sign, i >= 0, "redundant pad encoding {}", i);
            }
        }
    }
}
