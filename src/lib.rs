//! # TSON
//!
//! TSON (Typed Serializable Object Notation) is a compact, shape-driven
//! binary serialization format. Unlike its self-describing cousins, TSON
//! writes no field names and no per-value type tags: both sides of a
//! connection are expected to know the [`Shape`] of the data, and the wire
//! carries only what is structurally necessary (lengths and union
//! discriminants). Agreement on the shape itself is checked separately and
//! cheaply, by comparing 64-bit structural [fingerprints](crate::fingerprint)
//! computed from each side's type definitions.
//!
//! # Usage
//!
//! The trait [`TsonRep`] specifies how a type converts to and from the
//! dynamic value model [`Tson`], and what its [`Shape`] is.
//!
//! This trait can usually be auto-derived, and then the type is ready for
//! serialization.
//!
//! For example:
//!
//! ```
//! use tson::prelude::*;
//!
//! #[derive(Clone, Debug, TsonRep, PartialEq)]
//! /// A silly enum, we shall make an example of it.
//! enum SillyEnum {
//!     Foo,
//!     Bar(u8, String),
//!     Baz { x: i32, y: f32 },
//! }
//!
//! let silly_example = SillyEnum::Bar(1, "hello".to_string());
//!
//! // encode
//! let encoded = to_bytes(&silly_example).unwrap();
//!
//! // and then immediately decode, because this is a silly example
//! let decoded: SillyEnum = from_bytes(encoded.as_slice()).unwrap();
//!
//! assert_eq!(silly_example, decoded);
//! ```
//!
//! To catch schema drift before decoding, exchange fingerprints first:
//!
//! ```
//! use tson::prelude::*;
//!
//! // stable across runs and processes built from the same definitions
//! assert_eq!(fingerprint_of::<Vec<u64>>(), fingerprint_of::<Vec<u64>>());
//!
//! // any difference in structure changes the fingerprint
//! assert_ne!(fingerprint_of::<u32>(), fingerprint_of::<u64>());
//! assert_ne!(fingerprint_of::<(u8, char)>(), fingerprint_of::<(char, u8)>());
//! ```
//!
//! # Implementing the `TsonRep` trait
//!
//! While auto-deriving [`TsonRep`] is usually a better idea, it is fairly
//! straight-forward, if not a bit tedious, to implement it by hand. An
//! example:
//!
//! ```
//! use tson::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl TsonRep for Point {
//!     fn shape() -> Shape {
//!         Shape::Named(
//!             "Point",
//!             Box::new(Shape::Product(vec![
//!                 Field::named("x", Shape::defer::<i32>()),
//!                 Field::named("y", Shape::defer::<i32>()),
//!             ])),
//!         )
//!     }
//!
//!     fn to_tson(&self) -> Tson {
//!         Tson::Product(vec![self.x.to_tson(), self.y.to_tson()])
//!     }
//!
//!     fn from_tson(ts: Tson) -> Result<Self, Error> {
//!         let mut fields = ts.into_product()?.into_iter();
//!         let x = pop_tson(&mut fields)?;
//!         let y = pop_tson(&mut fields)?;
//!         match fields.next() {
//!             None => Ok(Point { x, y }),
//!             Some(_) => Err(Error::MalformedInput("too many fields for `Point`".into())),
//!         }
//!     }
//! }
//!
//! let p = Point { x: -1, y: 7 };
//! let bytes = to_bytes(&p).unwrap();
//! assert_eq!(p, from_bytes::<Point, _>(bytes.as_slice()).unwrap());
//! ```
//!
//! # Specification
//!
//! This section describes the TSON binary format. A value's encoding is
//! fully determined by its shape and its content; there is no padding, no
//! alignment, and no framing.
//!
//! ## Words
//!
//! Unsigned 64-bit integers are split into 7-bit chunks, emitted most
//! significant chunk first. Every byte except the last has its high bit
//! (the continuation bit) set. Zero encodes as the single byte `00`, and
//! encodings are always minimal: a leading `80` byte never appears.
//!
//! ## Ints
//!
//! Signed 64-bit integers use the same chunking, with the sign carried by
//! bit 6 of the most significant chunk. Chunks are produced by repeatedly
//! taking the low seven bits and arithmetic-shifting right by seven,
//! stopping once the remainder is 0 (non-negative values) or -1 (negative
//! values). If bit 6 of the most significant chunk disagrees with the sign,
//! a single disambiguation chunk (`00` for non-negative, `7f` for negative)
//! is prepended.
//!
//! | Value | Bytes   |       | Value | Bytes   |
//! | ---   | ---     | ---   | ---   | ---     |
//! | `0`   | `00`    |       | `-1`  | `7f`    |
//! | `1`   | `01`    |       | `-64` | `40`    |
//! | `63`  | `3f`    |       | `-65` | `ff 3f` |
//! | `64`  | `80 40` |       | `-128`| `ff 00` |
//! | `127` | `80 7f` |       |       |         |
//! | `128` | `81 00` |       |       |         |
//!
//! ## Primitives
//!
//! Signed integers of 8, 16, 32, and 64 bits widen to 64 bits and use the
//! int encoding; unsigned integers use the word encoding. Characters are
//! the word encoding of their Unicode scalar value. Floats are fixed-width
//! little-endian IEEE-754: two bytes for half precision, four for single,
//! eight for double. Bytestrings are an int-encoded length followed by the
//! raw bytes.
//!
//! ## Products
//!
//! Record-like values are the concatenation of their members' encodings in
//! declared order, with no tags. The member order is part of the contract
//! between encoder and decoder.
//!
//! ## Sums
//!
//! Union-like values are a word-encoded discriminant, equal to the chosen
//! alternative's declaration index, followed by that alternative's own
//! encoding. A union of up to 128 alternatives therefore pays exactly one
//! byte of overhead. Decoding rejects a discriminant at or beyond the
//! number of alternatives. Booleans and optionals are ordinary two-way
//! sums with no special treatment.
//!
//! ## Arrays
//!
//! Variable-length sequences are a word-encoded element count followed by
//! the element encodings.
//!
//! ## Fingerprints
//!
//! A type's fingerprint is a 64-bit hash computed from its shape alone,
//! never from values. Primitive leaves hash a canonical name; product
//! members fold right-to-left under a product mark; sum alternatives hash
//! their constructor name and fold left-to-right under a choice mark;
//! declared type names enter through [`Shape::Named`] nodes and
//! single-alternative sums. Two parties whose definitions agree in
//! structure, order, and names compute identical fingerprints; any drift in
//! those changes the fingerprint with high probability.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]

/// Procedural macros for autoderiving [`TsonRep`].
pub extern crate tson_macro;

#[macro_use]
mod util;

pub mod encoding;
pub mod errors;
pub mod fingerprint;
pub mod float;
pub mod prelude;
pub mod rep;
pub mod shape;
pub mod varint;

use crate::{errors::Error, float::Float, rep::TsonRep};
use bytes::Bytes;

/// [`Tson`] is the dynamic value model the engine traverses: the bridge
/// between a typed Rust value and its wire bytes.
///
/// A value on its own does not know how to decode (or even print) itself;
/// it is always paired with a [`Shape`] that assigns meaning to its
/// structure. [`TsonRep`] implementations produce values that conform to
/// their own shape.
///
/// # Example
///
/// ```
/// use tson::Tson;
///
/// let b = Tson::Word(1);
///
/// let val = match b {
///     Tson::Word(w) => w,
///     _ => panic!(),
/// };
///
/// assert_eq!(val, 1);
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub enum Tson {
    /// A signed integer, at most 64 bits wide.
    Int(i64),
    /// An unsigned integer, at most 64 bits wide.
    Word(u64),
    /// A float bit pattern.
    Tfloat(Float),
    /// A Unicode scalar value.
    Char(char),
    /// A bytestring.
    Byt(Bytes),
    /// The members of a record, in declared order.
    Product(Vec<Tson>),
    /// A chosen union alternative: discriminant and payload.
    Variant(u64, Box<Tson>),
    /// A variable-length sequence.
    Array(Vec<Tson>),
}

use Tson::*;

impl Tson {
    /// Consumes the value, converting it into the members of a product.
    /// This will return an [`Error`] if the value is not a [`Tson::Product`].
    pub fn into_product(self) -> Result<Vec<Tson>, Error> {
        match self {
            Product(fields) => Ok(fields),
            _ => Err(Error::MalformedInput("this value is not a `Product`".into())),
        }
    }

    /// Consumes the value, converting it into a discriminant and payload.
    /// This will return an [`Error`] if the value is not a [`Tson::Variant`].
    pub fn into_variant(self) -> Result<(u64, Tson), Error> {
        match self {
            Variant(ix, payload) => Ok((ix, *payload)),
            _ => Err(Error::MalformedInput("this value is not a `Variant`".into())),
        }
    }

    /// Consumes the value, converting it into a vector of elements.
    /// This will return an [`Error`] if the value is not a [`Tson::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use tson::prelude::*;
    ///
    /// let ks = vec![1u64, 2, 3].into_tson();
    ///
    /// let elems = ks.into_array().unwrap();
    ///
    /// assert_eq!(elems.len(), 3);
    /// ```
    pub fn into_array(self) -> Result<Vec<Tson>, Error> {
        match self {
            Array(elems) => Ok(elems),
            _ => Err(Error::MalformedInput("this value is not an `Array`".into())),
        }
    }

    /// Consumes the value, converting it into an `i64`.
    /// This will return an [`Error`] if the value is not a [`Tson::Int`].
    pub fn into_int(self) -> Result<i64, Error> {
        match self {
            Int(i) => Ok(i),
            _ => Err(Error::MalformedInput("this value is not an `Int`".into())),
        }
    }

    /// Consumes the value, converting it into a `u64`.
    /// This will return an [`Error`] if the value is not a [`Tson::Word`].
    pub fn into_word(self) -> Result<u64, Error> {
        match self {
            Word(w) => Ok(w),
            _ => Err(Error::MalformedInput("this value is not a `Word`".into())),
        }
    }

    /// Consumes the value, converting it into a [`Float`] bit pattern.
    /// This will return an [`Error`] if the value is not a [`Tson::Tfloat`].
    pub fn into_float(self) -> Result<Float, Error> {
        match self {
            Tfloat(f) => Ok(f),
            _ => Err(Error::MalformedInput("this value is not a float".into())),
        }
    }

    /// Consumes the value, converting it into a `char`.
    /// This will return an [`Error`] if the value is not a [`Tson::Char`].
    pub fn into_char(self) -> Result<char, Error> {
        match self {
            Char(c) => Ok(c),
            _ => Err(Error::MalformedInput("this value is not a `Char`".into())),
        }
    }

    /// Consumes the value, converting it into [`Bytes`].
    /// This will return an [`Error`] if the value is not a bytestring.
    pub fn into_bytes(self) -> Result<Bytes, Error> {
        match self {
            Byt(bs) => Ok(bs),
            _ => Err(Error::MalformedInput("this value is not a bytestring".into())),
        }
    }

    /// Tries to view the value as a bytestring.
    /// This will return an [`Error`] if the value is not a bytestring.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson;
    ///
    /// let foo = Tson::from_static(b"this is an example");
    ///
    /// let foo_bytes = foo.to_bytes().unwrap();
    /// ```
    pub fn to_bytes(&self) -> Result<&Bytes, Error> {
        match self {
            Byt(bs) => Ok(bs),
            _ => Err(Error::MalformedInput("this value is not a bytestring".into())),
        }
    }

    /// Consumes the value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::prelude::*;
    ///
    /// let ks = 1u64.to_tson();
    ///
    /// let num: u64 = ks.into_rep().unwrap();
    ///
    /// assert_eq!(num, 1);
    /// ```
    pub fn into_rep<T: TsonRep>(self) -> Result<T, Error> { T::from_tson(self) }

    /// Converts a bytestring literal to [`Tson`].
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson;
    ///
    /// let ks_foo = Tson::from_static(b"this is an example");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Tson { Byt(Bytes::from_static(bytes)) }
}

// i64 -> Tson, From
from_fn!(Tson, i64, Int);
// i64 -> Tson, TryFrom
try_from_ctor!(Tson, i64, Int);

// u64 -> Tson, From
from_fn!(Tson, u64, Word);
// u64 -> Tson, TryFrom
try_from_ctor!(Tson, u64, Word);

// Float -> Tson, From
from_fn!(Tson, Float, Tfloat);
// Float -> Tson, TryFrom
try_from_ctor!(Tson, Float, Tfloat);

// char -> Tson, From
from_fn!(Tson, char, Char);
// char -> Tson, TryFrom
try_from_ctor!(Tson, char, Char);

// Bytes -> Tson, From
from_fn!(Tson, Bytes, Byt);
// Bytes -> Tson, TryFrom
try_from_ctor!(Tson, Bytes, Byt);

// Narrow integers widen to the native leaves.
from_as!(Tson, i8, i64);
from_as!(Tson, i16, i64);
from_as!(Tson, i32, i64);
from_as!(Tson, u8, u64);
from_as!(Tson, u16, u64);
from_as!(Tson, u32, u64);

// Floats
compose_from!(Tson, Float, half::f16);
compose_from!(Tson, Float, f32);
compose_from!(Tson, Float, f64);

impl From<&str> for Tson {
    fn from(s: &str) -> Tson { Byt(Bytes::from(s)) }
}

impl From<String> for Tson {
    fn from(s: String) -> Tson { Byt(Bytes::from(s)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Tson::from(5i64).into_int().is_ok());

        assert_eq!(Tson::from(7u8).into_word().unwrap(), 7);

        assert_eq!(
            Tson::from("word").to_bytes().unwrap(),
            &Bytes::from("word")
        );

        assert!(Tson::from('x').into_product().is_err());
    }

    #[test]
    fn variant_projection() {
        let v = Variant(1, Box::new(Product(vec![])));
        let (ix, payload) = v.into_variant().unwrap();
        assert_eq!(ix, 1);
        assert_eq!(payload, Product(vec![]));
    }
}
