//! Static descriptions of how a type is laid out on the wire.
//!
//! A [`Shape`] is derived once from a type's definition (by hand or through
//! `#[derive(TsonRep)]`) and then drives every encode, decode, and
//! fingerprint for that type. Shapes are immutable and depend only on the
//! definition, never on runtime values, so the same definition always yields
//! the same shape on both sides of a connection.

/// A primitive terminal with a fixed codec of its own.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Atom {
    /// Signed integers, widened to `i64` and int-varint encoded.
    Int8,
    Int16,
    Int32,
    Int64,
    /// Unsigned integers, widened to `u64` and word-varint encoded.
    Word8,
    Word16,
    Word32,
    Word64,
    /// IEEE-754 half precision, two little-endian bytes.
    Half,
    /// IEEE-754 single precision, four little-endian bytes.
    Single,
    /// IEEE-754 double precision, eight little-endian bytes.
    Double,
    /// A Unicode scalar value, word-varint encoded.
    Char,
    /// A length-prefixed bytestring.
    Bytes,
}

impl Atom {
    /// The canonical name hashed into fingerprints.
    pub fn name(self) -> &'static str {
        match self {
            Atom::Int8 => "Int8",
            Atom::Int16 => "Int16",
            Atom::Int32 => "Int32",
            Atom::Int64 => "Int64",
            Atom::Word8 => "Word8",
            Atom::Word16 => "Word16",
            Atom::Word32 => "Word32",
            Atom::Word64 => "Word64",
            Atom::Half => "Half",
            Atom::Single => "Single",
            Atom::Double => "Double",
            Atom::Char => "Char",
            Atom::Bytes => "Bytes",
        }
    }

    /// Inclusive bounds for the signed integer atoms.
    pub(crate) fn int_bounds(self) -> Option<(i64, i64)> {
        match self {
            Atom::Int8 => Some((i64::from(i8::min_value()), i64::from(i8::max_value()))),
            Atom::Int16 => Some((i64::from(i16::min_value()), i64::from(i16::max_value()))),
            Atom::Int32 => Some((i64::from(i32::min_value()), i64::from(i32::max_value()))),
            Atom::Int64 => Some((i64::min_value(), i64::max_value())),
            _ => None,
        }
    }

    /// Inclusive upper bound for the unsigned integer atoms.
    pub(crate) fn word_max(self) -> Option<u64> {
        match self {
            Atom::Word8 => Some(u64::from(u8::max_value())),
            Atom::Word16 => Some(u64::from(u16::max_value())),
            Atom::Word32 => Some(u64::from(u32::max_value())),
            Atom::Word64 => Some(u64::max_value()),
            _ => None,
        }
    }
}

/// One member of a [`Shape::Product`].
///
/// The name is kept for diagnostics only; it does not affect the wire
/// layout or the fingerprint.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Field {
    pub name: Option<&'static str>,
    pub shape: Shape,
}

impl Field {
    pub fn named(name: &'static str, shape: Shape) -> Field {
        Field {
            name: Some(name),
            shape,
        }
    }

    pub fn unnamed(shape: Shape) -> Field {
        Field { name: None, shape }
    }
}

/// One alternative of a [`Shape::Sum`]. The constructor name is part of the
/// fingerprint.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Alt {
    pub name: &'static str,
    pub shape: Shape,
}

impl Alt {
    pub fn new(name: &'static str, shape: Shape) -> Alt {
        Alt { name, shape }
    }
}

/// A recursive description of a type's serialization structure.
///
/// # Example
///
/// ```
/// use tson::shape::{Atom, Field, Shape};
///
/// // struct Point { x: i32, y: i32 }
/// let point = Shape::Named(
///     "Point",
///     Box::new(Shape::Product(vec![
///         Field::named("x", Shape::Atom(Atom::Int32)),
///         Field::named("y", Shape::Atom(Atom::Int32)),
///     ])),
/// );
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Shape {
    /// A primitive with its own codec.
    Atom(Atom),
    /// A fixed sequence of members, concatenated in declared order with no
    /// tags. Member order is part of the wire contract.
    Product(Vec<Field>),
    /// A tagged choice among named alternatives, encoded as a word-varint
    /// discriminant (the alternative's declaration index) followed by the
    /// alternative's own encoding.
    Sum(&'static str, Vec<Alt>),
    /// Wire-transparent wrapper that carries a declared type name into the
    /// fingerprint.
    Named(&'static str, Box<Shape>),
    /// A variable-length sequence: a word-varint element count followed by
    /// the element encodings.
    Array(Box<Shape>),
    /// A lazily-resolved reference to another type's shape. Breaks the
    /// cycle for recursive types; transparent everywhere else.
    Defer(fn() -> Shape),
}

impl Shape {
    /// The shape of a zero-field constructor.
    pub fn unit() -> Shape {
        Shape::Product(Vec::new())
    }

    /// A lazy reference to `T`'s shape.
    ///
    /// Derived impls wrap every field shape this way so that recursive
    /// types terminate; for non-recursive types it behaves exactly like
    /// `T::shape()`.
    pub fn defer<T: crate::rep::TsonRep>() -> Shape {
        Shape::Defer(T::shape)
    }
}
