use super::{constants::*, *};
use crate::{
    float::Float,
    malformed,
    shape::{Atom, Shape},
};
use bytes::Bytes;
use std::{
    cmp,
    ops::{Deref, DerefMut},
};

// Wire lengths are untrusted; never preallocate more than this many slots.
const MAX_PREALLOC: u64 = 4096;

/// A byte cursor the decoder consumes values from.
///
/// Decoding reads exactly the bytes of one value and leaves the unconsumed
/// remainder in place, so several values can be decoded back to back from
/// one buffer.
#[derive(Clone, Debug)]
pub struct TsonBytes(Bytes);

impl Deref for TsonBytes {
    type Target = Bytes;

    fn deref(&self) -> &Bytes { &self.0 }
}

impl DerefMut for TsonBytes {
    fn deref_mut(&mut self) -> &mut Bytes { &mut self.0 }
}

impl From<Bytes> for TsonBytes {
    fn from(b: Bytes) -> Self { TsonBytes(b) }
}

impl From<Vec<u8>> for TsonBytes {
    fn from(v: Vec<u8>) -> Self { TsonBytes(Bytes::from(v)) }
}

impl<'a> From<&'a [u8]> for TsonBytes {
    fn from(s: &'a [u8]) -> Self { TsonBytes(Bytes::from(s)) }
}

impl<'a> From<&'a Vec<u8>> for TsonBytes {
    fn from(v: &'a Vec<u8>) -> Self { TsonBytes(Bytes::from(v.as_slice())) }
}

impl TsonBytes {
    /// Consumes one byte from the front of the buffer.
    #[inline]
    pub fn take_byte(&mut self) -> Result<u8, Error> {
        if self.is_empty() {
            malformed!("buffer was empty, couldn't get byte")
        }
        let byte = self[0];
        self.advance(1);
        Ok(byte)
    }

    /// Consumes `len` bytes from the front of the buffer.
    #[inline]
    pub fn read_many(&mut self, len: usize) -> Result<Bytes, Error> {
        if self.len() >= len {
            Ok(self.split_to(len))
        } else {
            Err(Error::MalformedInput(format!(
                "tried to read {} bytes from buffer of size {}",
                len,
                self.len()
            )))
        }
    }

    /// Reads a word-varint.
    ///
    /// Bytes are folded most significant chunk first until a byte without
    /// the continuation bit terminates the value; running out of input
    /// before that byte is a [`Error::MalformedInput`].
    #[inline]
    pub fn read_word(&mut self) -> Result<u64, Error> {
        let mut acc: u64 = 0;
        loop {
            let byte = self.take_byte()?;
            acc = (acc << 7) | u64::from(byte & CHUNK_MASK);
            if byte & CONT_BIT == 0 {
                return Ok(acc);
            }
        }
    }

    /// Reads an int-varint, sign-extending from bit 6 of the most
    /// significant chunk.
    #[inline]
    pub fn read_int(&mut self) -> Result<i64, Error> {
        let mut acc: u64 = 0;
        let mut chunks = 0usize;
        loop {
            let byte = self.take_byte()?;
            acc = (acc << 7) | u64::from(byte & CHUNK_MASK);
            chunks += 1;
            if byte & CONT_BIT == 0 {
                break;
            }
        }
        let used = chunks * 7;
        if used >= 64 {
            Ok(acc as i64)
        } else {
            // propagate the top bit of the used field through the rest of
            // the word
            let unused = 64 - used;
            Ok(((acc << unused) as i64) >> unused)
        }
    }

    #[inline]
    fn read_u16_le(&mut self) -> Result<u16, Error> {
        let bs = self.read_many(2)?;
        let mut arr = [0u8; 2];
        arr.copy_from_slice(&bs);
        Ok(u16::from_le_bytes(arr))
    }

    #[inline]
    fn read_u32_le(&mut self) -> Result<u32, Error> {
        let bs = self.read_many(4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bs);
        Ok(u32::from_le_bytes(arr))
    }

    #[inline]
    fn read_u64_le(&mut self) -> Result<u64, Error> {
        let bs = self.read_many(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bs);
        Ok(u64::from_le_bytes(arr))
    }
}

/// Decodes one value of `shape` from the front of `buf`.
///
/// On success the consumed bytes are exactly the value's encoding and the
/// remainder stays in `buf`; on failure no partial value is produced.
pub fn read_value(buf: &mut TsonBytes, shape: &Shape) -> Result<Tson, Error> {
    match shape {
        Shape::Atom(atom) => read_atom(buf, *atom),
        Shape::Product(fields) => {
            let mut vals = Vec::with_capacity(fields.len());
            for field in fields {
                vals.push(read_value(buf, &field.shape)?);
            }
            Ok(Tson::Product(vals))
        }
        Shape::Sum(name, alts) => {
            let ix = buf.read_word()?;
            let alt = match alts.get(ix as usize) {
                Some(alt) => alt,
                None => malformed!(
                    "discriminant {} out of range for `{}`, which has {} alternatives",
                    ix,
                    name,
                    alts.len()
                ),
            };
            let payload = read_value(buf, &alt.shape)?;
            Ok(Tson::Variant(ix, Box::new(payload)))
        }
        Shape::Named(_, inner) => read_value(buf, inner),
        Shape::Array(elem) => {
            let len = buf.read_word()?;
            let mut items = Vec::with_capacity(cmp::min(len, MAX_PREALLOC) as usize);
            for _ in 0..len {
                items.push(read_value(buf, elem)?);
            }
            Ok(Tson::Array(items))
        }
        Shape::Defer(f) => read_value(buf, &f()),
    }
}

fn read_atom(buf: &mut TsonBytes, atom: Atom) -> Result<Tson, Error> {
    if let Some((lo, hi)) = atom.int_bounds() {
        let i = buf.read_int()?;
        if i < lo || i > hi {
            malformed!("{} cannot hold {}", atom.name(), i)
        }
        return Ok(Tson::Int(i));
    }
    if let Some(max) = atom.word_max() {
        let w = buf.read_word()?;
        if w > max {
            malformed!("{} cannot hold {}", atom.name(), w)
        }
        return Ok(Tson::Word(w));
    }
    match atom {
        Atom::Half => Ok(Tson::Tfloat(Float::Half(buf.read_u16_le()?))),
        Atom::Single => Ok(Tson::Tfloat(Float::Single(buf.read_u32_le()?))),
        Atom::Double => Ok(Tson::Tfloat(Float::Double(buf.read_u64_le()?))),
        Atom::Char => {
            let w = buf.read_word()?;
            let c = if w <= u64::from(u32::max_value()) {
                std::char::from_u32(w as u32)
            } else {
                None
            };
            match c {
                Some(c) => Ok(Tson::Char(c)),
                None => malformed!("{} is not a Unicode scalar value", w),
            }
        }
        Atom::Bytes => {
            let len = buf.read_int()?;
            if len < 0 {
                malformed!("bytestring length was negative: {}", len)
            }
            Ok(Tson::Byt(buf.read_many(len as usize)?))
        }
        _ => unreachable!("integer atoms are handled above"),
    }
}
