//! Structural type signatures.
//!
//! A fingerprint is a 64-bit hash of a [`Shape`] — never of a value — that
//! two parties can compare before exchanging payloads to detect that their
//! type definitions have drifted apart. Structure, member order,
//! alternative order, constructor names, and declared type names all feed
//! the hash; a change to any of them changes the fingerprint with high
//! probability. Array fingerprints depend only on the element shape, so
//! values of different lengths share one fingerprint.
//!
//! Fingerprints are pure functions of the shape and are cheap, but callers
//! that fingerprint the same type repeatedly should memoize per type.

use crate::{rep::TsonRep, shape::Shape};
use siphasher::sip::SipHasher24;
use std::hash::Hasher;

// Fixed keys make the hash stable across runs and processes. "tson_sig",
// "nature64".
const KEY0: u64 = 0x7473_6f6e_5f73_6967;
const KEY1: u64 = 0x6e61_7475_7265_3634;

// Combination marks. Each kind of node mixes a distinct mark so that
// structurally different shapes hash differently.
const MARK_PRODUCT: u8 = 0x01;
const MARK_CHOICE: u8 = 0x02;
const MARK_VARIANT: u8 = 0x03;
const MARK_DATATYPE: u8 = 0x04;
const MARK_LIST: u8 = 0x05;
const MARK_UNIT: u8 = 0x06;
const MARK_BACKREF: u8 = 0x07;

fn hasher() -> SipHasher24 { SipHasher24::new_with_keys(KEY0, KEY1) }

// Sub-results are always written as little-endian bytes so fingerprints do
// not depend on host endianness.
fn mix1(mark: u8) -> u64 {
    let mut h = hasher();
    h.write_u8(mark);
    h.finish()
}

fn mix2(mark: u8, a: u64) -> u64 {
    let mut h = hasher();
    h.write_u8(mark);
    h.write(&a.to_le_bytes());
    h.finish()
}

fn mix3(mark: u8, a: u64, b: u64) -> u64 {
    let mut h = hasher();
    h.write_u8(mark);
    h.write(&a.to_le_bytes());
    h.write(&b.to_le_bytes());
    h.finish()
}

fn mix_named(name: &str, mark: u8, inner: u64) -> u64 {
    let mut h = hasher();
    h.write(name.as_bytes());
    h.write_u8(mark);
    h.write(&inner.to_le_bytes());
    h.finish()
}

fn atom_fp(name: &str) -> u64 {
    let mut h = hasher();
    h.write(name.as_bytes());
    h.finish()
}

/// Computes the structural fingerprint of a [`Shape`].
///
/// # Example
///
/// ```
/// use tson::fingerprint::fingerprint;
/// use tson::shape::{Atom, Shape};
///
/// let ints = Shape::Array(Box::new(Shape::Atom(Atom::Int64)));
/// let words = Shape::Array(Box::new(Shape::Atom(Atom::Word64)));
///
/// assert_eq!(fingerprint(&ints), fingerprint(&ints));
/// assert_ne!(fingerprint(&ints), fingerprint(&words));
/// ```
pub fn fingerprint(shape: &Shape) -> u64 { walk(shape, &mut Vec::new()) }

/// Computes the fingerprint of `T`'s shape.
pub fn fingerprint_of<T: TsonRep>() -> u64 { fingerprint(&T::shape()) }

fn walk(shape: &Shape, pending: &mut Vec<fn() -> Shape>) -> u64 {
    match shape {
        Shape::Atom(atom) => atom_fp(atom.name()),
        Shape::Product(fields) => {
            let mut acc = mix1(MARK_UNIT);
            for field in fields.iter().rev() {
                acc = mix3(MARK_PRODUCT, walk(&field.shape, pending), acc);
            }
            acc
        }
        Shape::Sum(name, alts) => {
            let mut acc: Option<u64> = None;
            for alt in alts {
                let alt_fp = mix_named(alt.name, MARK_VARIANT, walk(&alt.shape, pending));
                acc = Some(match acc {
                    None => alt_fp,
                    Some(prev) => mix3(MARK_CHOICE, prev, alt_fp),
                });
            }
            let folded = acc.unwrap_or_else(|| mix1(MARK_CHOICE));
            if alts.len() == 1 {
                // distinguishes a single-alternative wrapper type from its
                // bare payload
                mix_named(name, MARK_DATATYPE, folded)
            } else {
                folded
            }
        }
        Shape::Named(name, inner) => mix_named(name, MARK_DATATYPE, walk(inner, pending)),
        Shape::Array(elem) => mix2(MARK_LIST, walk(elem, pending)),
        Shape::Defer(f) => {
            // re-entry into a shape still being fingerprinted marks the
            // cycle with its distance, so recursive types terminate
            if let Some(pos) = pending.iter().rposition(|g| *g == *f) {
                mix2(MARK_BACKREF, (pending.len() - pos) as u64)
            } else {
                pending.push(*f);
                let fp = walk(&f(), pending);
                pending.pop();
                fp
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Alt, Atom, Field, Shape};

    fn atom(a: Atom) -> Shape { Shape::Atom(a) }

    #[test]
    fn atoms_hash_their_names() {
        assert_eq!(atom_fp("Int64"), fingerprint(&atom(Atom::Int64)));
        assert_ne!(fingerprint(&atom(Atom::Int64)), fingerprint(&atom(Atom::Word64)));
    }

    #[test]
    fn empty_product_is_the_unit_mark() {
        assert_eq!(fingerprint(&Shape::unit()), mix1(MARK_UNIT));
    }

    #[test]
    fn product_order_matters() {
        let ab = Shape::Product(vec![
            Field::unnamed(atom(Atom::Int8)),
            Field::unnamed(atom(Atom::Char)),
        ]);
        let ba = Shape::Product(vec![
            Field::unnamed(atom(Atom::Char)),
            Field::unnamed(atom(Atom::Int8)),
        ]);
        assert_ne!(fingerprint(&ab), fingerprint(&ba));
    }

    #[test]
    fn field_names_do_not_matter() {
        let named = Shape::Product(vec![Field::named("x", atom(Atom::Int32))]);
        let unnamed = Shape::Product(vec![Field::unnamed(atom(Atom::Int32))]);
        assert_eq!(fingerprint(&named), fingerprint(&unnamed));
    }

    #[test]
    fn multi_alternative_sums_ignore_the_type_name() {
        let alts = || {
            vec![
                Alt::new("A", Shape::unit()),
                Alt::new("B", Shape::unit()),
            ]
        };
        assert_eq!(
            fingerprint(&Shape::Sum("X", alts())),
            fingerprint(&Shape::Sum("Y", alts()))
        );
    }

    #[test]
    fn single_alternative_sums_absorb_the_type_name() {
        let wrap = |name| Shape::Sum(name, vec![Alt::new("Mk", atom(Atom::Int64))]);
        assert_ne!(fingerprint(&wrap("X")), fingerprint(&wrap("Y")));
        assert_ne!(fingerprint(&wrap("X")), fingerprint(&atom(Atom::Int64)));
    }
}
