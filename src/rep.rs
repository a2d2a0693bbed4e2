use crate::{
    errors::Error,
    float::Float,
    malformed,
    shape::{Alt, Atom, Field, Shape},
    Tson,
};
use bytes::Bytes;
use half::f16;
use std::{collections::BTreeMap, vec::IntoIter};

/// A value representable as [`Tson`].
///
/// Implementations must uphold one invariant: `to_tson` produces values
/// that conform to `shape()`, and `from_tson` accepts everything the
/// decoder produces at `shape()`. The derive macro takes care of this; see
/// the [crate documentation](crate) for a hand-written example.
pub trait TsonRep: Clone + Sized {
    /// The shape of this type's encoding, derived from its definition
    /// alone.
    fn shape() -> Shape;

    /// Converts value into [`Tson`].
    fn to_tson(&self) -> Tson { self.clone().into_tson() }

    /// Consumes value, converting it into [`Tson`].
    fn into_tson(self) -> Tson { self.to_tson() }

    /// Converts value from [`Tson`].
    fn from_tson(ts: Tson) -> Result<Self, Error>;
}

/// Takes the next field from a product iterator, converting it to `T`.
///
/// This is the workhorse of derived and hand-written `from_tson`
/// implementations.
pub fn pop_tson<T: TsonRep>(iter: &mut IntoIter<Tson>) -> Result<T, Error> {
    match iter.next() {
        Some(ts) => T::from_tson(ts),
        None => malformed!("ran out of fields"),
    }
}

macro_rules! int_rep {
    ($t:ty, $atom:ident) => {
        impl TsonRep for $t {
            fn shape() -> Shape { Shape::Atom(Atom::$atom) }

            fn into_tson(self) -> Tson { Tson::Int(i64::from(self)) }

            fn from_tson(ts: Tson) -> Result<Self, Error> {
                let i = ts.into_int()?;
                if i < i64::from(<$t>::min_value()) || i > i64::from(<$t>::max_value()) {
                    malformed!("{} does not fit in `{}`", i, stringify!($t))
                }
                Ok(i as $t)
            }
        }
    };
}

int_rep!(i8, Int8);
int_rep!(i16, Int16);
int_rep!(i32, Int32);

impl TsonRep for i64 {
    fn shape() -> Shape { Shape::Atom(Atom::Int64) }

    fn into_tson(self) -> Tson { Tson::Int(self) }

    fn from_tson(ts: Tson) -> Result<Self, Error> { ts.into_int() }
}

// Note: sending an `isize` between machines with different word sizes can
// of course lead to issues; the format itself is fixed at 64 bits.
impl TsonRep for isize {
    fn shape() -> Shape { Shape::Atom(Atom::Int64) }

    fn into_tson(self) -> Tson { Tson::Int(self as i64) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let i = ts.into_int()?;
        if i < isize::min_value() as i64 || i > isize::max_value() as i64 {
            malformed!("{} does not fit in `isize`", i)
        }
        Ok(i as isize)
    }
}

macro_rules! word_rep {
    ($t:ty, $atom:ident) => {
        impl TsonRep for $t {
            fn shape() -> Shape { Shape::Atom(Atom::$atom) }

            fn into_tson(self) -> Tson { Tson::Word(u64::from(self)) }

            fn from_tson(ts: Tson) -> Result<Self, Error> {
                let w = ts.into_word()?;
                if w > u64::from(<$t>::max_value()) {
                    malformed!("{} does not fit in `{}`", w, stringify!($t))
                }
                Ok(w as $t)
            }
        }
    };
}

word_rep!(u8, Word8);
word_rep!(u16, Word16);
word_rep!(u32, Word32);

impl TsonRep for u64 {
    fn shape() -> Shape { Shape::Atom(Atom::Word64) }

    fn into_tson(self) -> Tson { Tson::Word(self) }

    fn from_tson(ts: Tson) -> Result<Self, Error> { ts.into_word() }
}

impl TsonRep for usize {
    fn shape() -> Shape { Shape::Atom(Atom::Word64) }

    fn into_tson(self) -> Tson { Tson::Word(self as u64) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let w = ts.into_word()?;
        if w > usize::max_value() as u64 {
            malformed!("{} does not fit in `usize`", w)
        }
        Ok(w as usize)
    }
}

macro_rules! float_rep {
    ($t:ty, $atom:ident, $ctor:ident, $prim:expr) => {
        impl TsonRep for $t {
            fn shape() -> Shape { Shape::Atom(Atom::$atom) }

            fn into_tson(self) -> Tson { Tson::Tfloat(Float::$ctor(self.to_bits())) }

            fn from_tson(ts: Tson) -> Result<Self, Error> {
                match ts.into_float()? {
                    Float::$ctor(bits) => Ok(<$t>::from_bits(bits)),
                    other => malformed!("expected a {} float, found {:?}", $prim, other),
                }
            }
        }
    };
}

float_rep!(f16, Half, Half, "half-precision");
float_rep!(f32, Single, Single, "single-precision");
float_rep!(f64, Double, Double, "double-precision");

// Bool is an ordinary two-way sum; False comes first so that it encodes
// as 0.
impl TsonRep for bool {
    fn shape() -> Shape {
        Shape::Sum(
            "Bool",
            vec![
                Alt::new("False", Shape::unit()),
                Alt::new("True", Shape::unit()),
            ],
        )
    }

    fn into_tson(self) -> Tson { Tson::Variant(self as u64, Box::new(Tson::Product(vec![]))) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let (ix, payload) = ts.into_variant()?;
        if !payload.into_product()?.is_empty() {
            malformed!("`Bool` alternatives have no fields")
        }
        match ix {
            0 => Ok(false),
            1 => Ok(true),
            other => malformed!("`Bool` discriminant out of range: {}", other),
        }
    }
}

impl TsonRep for char {
    fn shape() -> Shape { Shape::Atom(Atom::Char) }

    fn into_tson(self) -> Tson { Tson::Char(self) }

    fn from_tson(ts: Tson) -> Result<Self, Error> { ts.into_char() }
}

impl TsonRep for String {
    fn shape() -> Shape { Shape::Atom(Atom::Bytes) }

    fn into_tson(self) -> Tson { Tson::Byt(Bytes::from(self.into_bytes())) }

    fn to_tson(&self) -> Tson { Tson::Byt(Bytes::from(self.as_bytes())) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        match String::from_utf8(ts.into_bytes()?.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) => malformed!("bytestring was not valid UTF-8"),
        }
    }
}

impl TsonRep for Bytes {
    fn shape() -> Shape { Shape::Atom(Atom::Bytes) }

    fn into_tson(self) -> Tson { Tson::Byt(self) }

    fn from_tson(ts: Tson) -> Result<Self, Error> { ts.into_bytes() }
}

impl TsonRep for () {
    fn shape() -> Shape { Shape::unit() }

    fn into_tson(self) -> Tson { Tson::Product(vec![]) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        if ts.into_product()?.is_empty() {
            Ok(())
        } else {
            malformed!("`()` has no fields")
        }
    }
}

impl<T: TsonRep> TsonRep for Option<T> {
    fn shape() -> Shape {
        Shape::Sum(
            "Option",
            vec![
                Alt::new("None", Shape::unit()),
                Alt::new("Some", Shape::Product(vec![Field::unnamed(Shape::defer::<T>())])),
            ],
        )
    }

    fn to_tson(&self) -> Tson {
        match self {
            None => Tson::Variant(0, Box::new(Tson::Product(vec![]))),
            Some(t) => Tson::Variant(1, Box::new(Tson::Product(vec![t.to_tson()]))),
        }
    }

    fn into_tson(self) -> Tson {
        match self {
            None => Tson::Variant(0, Box::new(Tson::Product(vec![]))),
            Some(t) => Tson::Variant(1, Box::new(Tson::Product(vec![t.into_tson()]))),
        }
    }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let (ix, payload) = ts.into_variant()?;
        let mut fields = payload.into_product()?.into_iter();
        let out = match ix {
            0 => None,
            1 => Some(pop_tson(&mut fields)?),
            other => malformed!("`Option` discriminant out of range: {}", other),
        };
        match fields.next() {
            None => Ok(out),
            Some(_) => malformed!("too many fields for `Option`"),
        }
    }
}

impl<T: TsonRep, E: TsonRep> TsonRep for Result<T, E> {
    fn shape() -> Shape {
        Shape::Sum(
            "Result",
            vec![
                Alt::new("Ok", Shape::Product(vec![Field::unnamed(Shape::defer::<T>())])),
                Alt::new("Err", Shape::Product(vec![Field::unnamed(Shape::defer::<E>())])),
            ],
        )
    }

    fn to_tson(&self) -> Tson {
        match self {
            Ok(t) => Tson::Variant(0, Box::new(Tson::Product(vec![t.to_tson()]))),
            Err(e) => Tson::Variant(1, Box::new(Tson::Product(vec![e.to_tson()]))),
        }
    }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let (ix, payload) = ts.into_variant()?;
        let mut fields = payload.into_product()?.into_iter();
        let out = match ix {
            0 => Ok(pop_tson(&mut fields)?),
            1 => Err(pop_tson(&mut fields)?),
            other => malformed!("`Result` discriminant out of range: {}", other),
        };
        match fields.next() {
            None => Ok(out),
            Some(_) => malformed!("too many fields for `Result`"),
        }
    }
}

impl<T: TsonRep> TsonRep for Vec<T> {
    fn shape() -> Shape { Shape::Array(Box::new(Shape::defer::<T>())) }

    fn into_tson(self) -> Tson { Tson::Array(self.into_iter().map(T::into_tson).collect()) }

    fn to_tson(&self) -> Tson { Tson::Array(self.iter().map(T::to_tson).collect()) }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        ts.into_array()?.into_iter().map(T::from_tson).collect()
    }
}

// Maps ride on arrays of key-value pairs; BTreeMap iteration keeps the
// encoding deterministic.
impl<K: TsonRep + Ord, V: TsonRep> TsonRep for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Array(Box::new(Shape::Product(vec![
            Field::unnamed(Shape::defer::<K>()),
            Field::unnamed(Shape::defer::<V>()),
        ])))
    }

    fn to_tson(&self) -> Tson {
        Tson::Array(
            self.iter()
                .map(|(k, v)| Tson::Product(vec![k.to_tson(), v.to_tson()]))
                .collect(),
        )
    }

    fn into_tson(self) -> Tson {
        Tson::Array(
            self.into_iter()
                .map(|(k, v)| Tson::Product(vec![k.into_tson(), v.into_tson()]))
                .collect(),
        )
    }

    fn from_tson(ts: Tson) -> Result<Self, Error> {
        let mut out = BTreeMap::new();
        for pair in ts.into_array()? {
            let mut fields = pair.into_product()?.into_iter();
            let k = pop_tson(&mut fields)?;
            let v = pop_tson(&mut fields)?;
            if fields.next().is_some() {
                malformed!("map entries are key-value pairs")
            }
            out.insert(k, v);
        }
        Ok(out)
    }
}

impl<T: TsonRep> TsonRep for Box<T> {
    fn shape() -> Shape { Shape::defer::<T>() }

    fn to_tson(&self) -> Tson { (**self).to_tson() }

    fn into_tson(self) -> Tson { (*self).into_tson() }

    fn from_tson(ts: Tson) -> Result<Self, Error> { T::from_tson(ts).map(Box::new) }
}

macro_rules! tuple_rep {
    ($($typ:ident)*) => {
        impl<$($typ: TsonRep),*> TsonRep for ($($typ,)*) {
            fn shape() -> Shape {
                Shape::Product(vec![$(Field::unnamed(Shape::defer::<$typ>())),*])
            }

            #[allow(non_snake_case)]
            fn to_tson(&self) -> Tson {
                let ($($typ,)*) = self;
                Tson::Product(vec![$($typ.to_tson()),*])
            }

            #[allow(non_snake_case)]
            fn into_tson(self) -> Tson {
                let ($($typ,)*) = self;
                Tson::Product(vec![$($typ.into_tson()),*])
            }

            fn from_tson(ts: Tson) -> Result<Self, Error> {
                let mut fields = ts.into_product()?.into_iter();
                let out = ($(pop_tson::<$typ>(&mut fields)?,)*);
                match fields.next() {
                    None => Ok(out),
                    Some(_) => malformed!("too many fields for a tuple"),
                }
            }
        }
    };
}

tuple_rep!(A B);
tuple_rep!(A B C);
tuple_rep!(A B C D);
tuple_rep!(A B C D E);
tuple_rep!(A B C D E F);
tuple_rep!(A B C D E F G);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_ints_are_range_checked() {
        assert!(i8::from_tson(Tson::Int(127)).is_ok());
        assert!(i8::from_tson(Tson::Int(128)).is_err());
        assert!(u16::from_tson(Tson::Word(65_536)).is_err());
    }

    #[test]
    fn string_requires_utf8() {
        assert!(String::from_tson(Tson::Byt(Bytes::from(&[0xff, 0xfe][..]))).is_err());
    }

    #[test]
    fn bool_is_a_sum() {
        assert_eq!(true.into_tson(), Tson::Variant(1, Box::new(Tson::Product(vec![]))));
        assert_eq!(bool::from_tson(false.into_tson()).unwrap(), false);
    }

    #[test]
    fn map_round_trips_through_pairs() {
        let mut m = BTreeMap::new();
        m.insert(String::from("one"), 1u64);
        m.insert(String::from("two"), 2u64);

        let back = BTreeMap::from_tson(m.to_tson()).unwrap();
        assert_eq!(m, back);
    }
}
