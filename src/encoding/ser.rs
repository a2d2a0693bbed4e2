use super::*;
use crate::{
    float::Float,
    shape::{Atom, Shape},
    unrepresentable,
    varint::{int_digits, word_digits},
};
use bytes::Bytes;
use half::f16;

/// A sink for encoder output.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a word-varint to the output value.
    fn put_word(&mut self, w: u64);
    /// Add an int-varint to the output value.
    fn put_int(&mut self, i: i64);
    /// Add an [`f16`] to the output value.
    fn put_f16(&mut self, f: f16);
    /// Add an [`f32`] to the output value.
    fn put_f32(&mut self, f: f32);
    /// Add an [`f64`] to the output value.
    fn put_f64(&mut self, f: f64);
    /// Add a [`char`] to the output value.
    fn put_char(&mut self, c: char);
    /// Add a length-prefixed bytestring to the output value.
    fn put_bytes(&mut self, b: &Bytes);
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_word(&mut self, w: u64) { self.put_slice(&word_digits(w)) }

    #[inline]
    fn put_int(&mut self, i: i64) { self.put_slice(&int_digits(i)) }

    fn put_f16(&mut self, f: f16) { self.put_slice(&u16::to_le_bytes(f.to_bits())) }

    fn put_f32(&mut self, f: f32) { self.put_slice(&u32::to_le_bytes(f.to_bits())) }

    fn put_f64(&mut self, f: f64) { self.put_slice(&u64::to_le_bytes(f.to_bits())) }

    #[inline]
    fn put_char(&mut self, c: char) { self.put_word(u64::from(u32::from(c))) }

    fn put_bytes(&mut self, b: &Bytes) {
        self.put_int(b.len() as i64);
        self.put_slice(b);
    }
}

/// Encodes `value` at `shape`, appending the bytes to `out`.
///
/// The value must conform to the shape: every mismatch in structure, arity,
/// or primitive range fails with [`Error::Unrepresentable`] before any
/// further output is produced. Values obtained from a [`TsonRep`]
/// implementation always conform to that implementation's own shape.
///
/// [`TsonRep`]: crate::rep::TsonRep
pub fn put_value<S: Serializer>(out: &mut S, shape: &Shape, value: &Tson) -> Result<(), Error> {
    match (shape, value) {
        (Shape::Atom(atom), value) => put_atom(out, *atom, value),
        (Shape::Product(fields), Tson::Product(vals)) => {
            if fields.len() != vals.len() {
                unrepresentable!(
                    "product arity mismatch: shape has {} members, value has {}",
                    fields.len(),
                    vals.len()
                )
            }
            for (field, val) in fields.iter().zip(vals) {
                put_value(out, &field.shape, val)?;
            }
            Ok(())
        }
        (Shape::Sum(name, alts), Tson::Variant(ix, payload)) => {
            let alt = match alts.get(*ix as usize) {
                Some(alt) => alt,
                None => unrepresentable!(
                    "`{}` has {} alternatives, but the discriminant was {}",
                    name,
                    alts.len(),
                    ix
                ),
            };
            out.put_word(*ix);
            put_value(out, &alt.shape, payload)
        }
        (Shape::Named(_, inner), value) => put_value(out, inner, value),
        (Shape::Array(elem), Tson::Array(items)) => {
            out.put_word(items.len() as u64);
            for item in items {
                put_value(out, elem, item)?;
            }
            Ok(())
        }
        (Shape::Defer(f), value) => put_value(out, &f(), value),
        (shape, value) => {
            unrepresentable!("value {:?} does not conform to shape {:?}", value, shape)
        }
    }
}

fn put_atom<S: Serializer>(out: &mut S, atom: Atom, value: &Tson) -> Result<(), Error> {
    match (atom, value) {
        (atom, Tson::Int(i)) => {
            let (lo, hi) = match atom.int_bounds() {
                Some(bounds) => bounds,
                None => unrepresentable!("expected a {} value, found {:?}", atom.name(), value),
            };
            if *i < lo || *i > hi {
                unrepresentable!("{} cannot hold {}", atom.name(), i)
            }
            out.put_int(*i);
            Ok(())
        }
        (atom, Tson::Word(w)) => {
            let max = match atom.word_max() {
                Some(max) => max,
                None => unrepresentable!("expected a {} value, found {:?}", atom.name(), value),
            };
            if *w > max {
                unrepresentable!("{} cannot hold {}", atom.name(), w)
            }
            out.put_word(*w);
            Ok(())
        }
        (Atom::Half, Tson::Tfloat(Float::Half(bits))) => {
            out.put_f16(f16::from_bits(*bits));
            Ok(())
        }
        (Atom::Single, Tson::Tfloat(Float::Single(bits))) => {
            out.put_f32(f32::from_bits(*bits));
            Ok(())
        }
        (Atom::Double, Tson::Tfloat(Float::Double(bits))) => {
            out.put_f64(f64::from_bits(*bits));
            Ok(())
        }
        (Atom::Char, Tson::Char(c)) => {
            out.put_char(*c);
            Ok(())
        }
        (Atom::Bytes, Tson::Byt(bs)) => {
            out.put_bytes(bs);
            Ok(())
        }
        (atom, value) => {
            unrepresentable!("expected a {} value, found {:?}", atom.name(), value)
        }
    }
}
