//! # TSON binary encoder and decoder
//!
//! The traversal engine: walks a [`Shape`] alongside a [`Tson`] value (or a
//! byte cursor) and produces bytes (or a value). Products concatenate,
//! sums write a discriminant then the chosen alternative, arrays write a
//! count then their elements, and atoms delegate to their own codecs.
//!
//! # Example
//!
//! ```
//! use tson::prelude::*;
//!
//! #[derive(Clone, Debug, TsonRep, PartialEq)]
//! struct SomeData {
//!     x: u64,
//!     y: i32,
//! }
//!
//! // here it is storing some data
//! let some_data = SomeData { x: 1, y: 2 };
//!
//! // and we've encoded it
//! let enc = to_bytes(&some_data).unwrap();
//!
//! // decoding returns a `Result`
//! let dec: SomeData = from_bytes(enc.as_slice()).unwrap();
//!
//! assert_eq!(dec, some_data);
//! ```
//!
//! [`Shape`]: crate::shape::Shape

use crate::{errors::Error, rep::TsonRep, Tson};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub(crate) mod constants;

/// Encodes `value` at `shape`, storing output in `out`.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let out = &mut Vec::new();
///
/// encode(&u64::shape(), &Tson::Word(449), out).unwrap();
///
/// assert_eq!(out.as_slice(), [0x83, 0x41]);
/// ```
pub fn encode<S: Serializer>(shape: &crate::shape::Shape, value: &Tson, out: &mut S) -> Result<(), Error> {
    put_value(out, shape, value)
}

/// Encodes `value` at `shape` into a fresh vector of bytes.
pub fn encode_full(shape: &crate::shape::Shape, value: &Tson) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    put_value(&mut out, shape, value)?;
    Ok(out)
}

/// Decodes one value of `shape` from `data`, leaving the unconsumed
/// remainder in the cursor.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let mut buf = TsonBytes::from(vec![0x07, 0xff]);
///
/// let dec = decode(&u64::shape(), &mut buf).unwrap();
///
/// assert_eq!(dec, Tson::Word(7));
/// // one byte of remainder is still in the buffer
/// assert_eq!(buf.len(), 1);
/// ```
pub fn decode(shape: &crate::shape::Shape, data: &mut TsonBytes) -> Result<Tson, Error> {
    read_value(data, shape)
}

/// Decodes one value of `shape` from a buffer, discarding any remainder.
pub fn decode_full<B: Into<TsonBytes>>(shape: &crate::shape::Shape, bs: B) -> Result<Tson, Error> {
    decode(shape, &mut bs.into())
}

/// Encodes a value of any [`TsonRep`] type into a vector of bytes.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let enc = to_bytes(&vec![1u64, 2, 3]).unwrap();
///
/// assert_eq!(enc, [3, 1, 2, 3]);
/// ```
pub fn to_bytes<T: TsonRep>(t: &T) -> Result<Vec<u8>, Error> {
    encode_full(&T::shape(), &t.to_tson())
}

/// Decodes a value of any [`TsonRep`] type from a buffer, discarding any
/// remainder.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let dec: Vec<u64> = from_bytes(vec![3, 1, 2, 3]).unwrap();
///
/// assert_eq!(dec, vec![1, 2, 3]);
/// ```
pub fn from_bytes<T: TsonRep, B: Into<TsonBytes>>(bs: B) -> Result<T, Error> {
    T::from_tson(decode_full(&T::shape(), bs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Alt, Atom, Field, Shape};

    #[test]
    fn bools_are_bare_discriminants() {
        assert_eq!(to_bytes(&false).unwrap(), [0x00]);
        assert_eq!(to_bytes(&true).unwrap(), [0x01]);
    }

    #[test]
    fn unit_encodes_to_nothing() {
        assert!(to_bytes(&()).unwrap().is_empty());
    }

    #[test]
    fn chars_are_scalar_words() {
        assert_eq!(to_bytes(&'w').unwrap(), [0x77]);
        // U+0416 needs two chunks
        assert_eq!(to_bytes(&'Ж').unwrap(), [0x88, 0x16]);
    }

    #[test]
    fn bytestrings_carry_an_int_length() {
        assert_eq!(to_bytes(&String::from("w")).unwrap(), [0x01, 0x77]);
        assert_eq!(to_bytes(&String::new()).unwrap(), [0x00]);
    }

    #[test]
    fn products_concatenate() {
        assert_eq!(to_bytes(&(1u8, 2u8, 3u8)).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn options_are_two_way_sums() {
        assert_eq!(to_bytes(&None::<u64>).unwrap(), [0x00]);
        assert_eq!(to_bytes(&Some(7u64)).unwrap(), [0x01, 0x07]);
    }

    #[test]
    fn named_shapes_are_wire_transparent() {
        let bare = Shape::Atom(Atom::Word64);
        let named = Shape::Named("Wrapper", Box::new(bare.clone()));
        let value = Tson::Word(90);

        assert_eq!(
            encode_full(&named, &value).unwrap(),
            encode_full(&bare, &value).unwrap()
        );
    }

    #[test]
    fn sum_discriminant_is_one_byte_up_to_128() {
        let alts: Vec<Alt> = (0..128).map(|_| Alt::new("A", Shape::unit())).collect();
        let shape = Shape::Sum("Wide", alts);

        let enc = encode_full(&shape, &Tson::Variant(127, Box::new(Tson::Product(vec![]))))
            .unwrap();
        assert_eq!(enc, [0x7f]);
    }

    #[test]
    fn out_of_range_discriminant_is_rejected() {
        let shape = Shape::Sum(
            "Dir",
            vec![
                Alt::new("North", Shape::unit()),
                Alt::new("South", Shape::unit()),
            ],
        );

        match decode_full(&shape, vec![0x02]) {
            Err(Error::MalformedInput(_)) => {}
            other => panic!("expected MalformedInput, got {:?}", other),
        }

        // the same bound holds on the encode side
        match encode_full(&shape, &Tson::Variant(2, Box::new(Tson::Product(vec![])))) {
            Err(Error::Unrepresentable(_)) => {}
            other => panic!("expected Unrepresentable, got {:?}", other),
        }
    }

    #[test]
    fn narrow_atoms_are_range_checked() {
        let shape = Shape::Atom(Atom::Word8);

        match encode_full(&shape, &Tson::Word(300)) {
            Err(Error::Unrepresentable(_)) => {}
            other => panic!("expected Unrepresentable, got {:?}", other),
        }

        // word(300) at a Word8 leaf
        match decode_full(&shape, vec![0x82, 0x2c]) {
            Err(Error::MalformedInput(_)) => {}
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn decode_leaves_the_remainder() {
        let shape = Shape::Product(vec![
            Field::unnamed(Shape::Atom(Atom::Word64)),
            Field::unnamed(Shape::Atom(Atom::Int64)),
        ]);
        let value = Tson::Product(vec![Tson::Word(5), Tson::Int(-1)]);

        let mut enc = encode_full(&shape, &value).unwrap();
        enc.extend_from_slice(b"trailing");

        let mut buf = TsonBytes::from(enc);
        assert_eq!(decode(&shape, &mut buf).unwrap(), value);
        assert_eq!(&buf[..], b"trailing");
    }

    #[test]
    fn exhausted_buffer_fails() {
        let shape = Shape::Atom(Atom::Bytes);
        // claims five bytes, provides two
        match decode_full(&shape, vec![0x05, b'a', b'b']) {
            Err(Error::MalformedInput(_)) => {}
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }
}
