//! Proptest strategies for TSON shapes and values.
//!
//! [`arb_shape`] generates well-formed shapes; [`arb_value`] generates
//! values conforming to a given shape; [`arb_shape_and_value`] pairs the
//! two for shape-driven round-trip properties.

use bytes::Bytes;
use proptest::prelude::*;
use proptest::strategy::Union;
use tson::{
    float::Float,
    shape::{Alt, Atom, Field, Shape},
    Tson,
};

// Name pools for generated sums; shapes only ever carry static names.
const TYPE_NAMES: &[&str] = &["Alpha", "Beta", "Gamma", "Delta"];
const ALT_NAMES: &[&str] = &["A", "B", "C"];

/// arbitrary Atom for use with proptest
pub fn arb_atom() -> impl Strategy<Value = Atom> {
    prop::sample::select(vec![
        Atom::Int8,
        Atom::Int16,
        Atom::Int32,
        Atom::Int64,
        Atom::Word8,
        Atom::Word16,
        Atom::Word32,
        Atom::Word64,
        Atom::Half,
        Atom::Single,
        Atom::Double,
        Atom::Char,
        Atom::Bytes,
    ])
}

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    ".*".prop_map(|s| -> Bytes { Bytes::from(s) })
}

/// arbitrary well-formed Shape for use with proptest
///
/// Sums always have at least one alternative, and `Defer` nodes are never
/// generated; everything else appears, nested a few levels deep.
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = arb_atom().prop_map(Shape::Atom);
    leaf.prop_recursive(
        4,  // max depth
        24, // max nodes
        4,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(|shapes| {
                    Shape::Product(shapes.into_iter().map(Field::unnamed).collect())
                }),
                (
                    prop::sample::select(TYPE_NAMES.to_vec()),
                    prop::collection::vec(inner.clone(), 1..4)
                )
                    .prop_map(|(name, shapes)| {
                        let alts = shapes
                            .into_iter()
                            .enumerate()
                            .map(|(i, shape)| Alt::new(ALT_NAMES[i], shape))
                            .collect();
                        Shape::Sum(name, alts)
                    }),
                inner.clone().prop_map(|shape| Shape::Array(Box::new(shape))),
                (prop::sample::select(TYPE_NAMES.to_vec()), inner).prop_map(|(name, shape)| {
                    Shape::Named(name, Box::new(shape))
                }),
            ]
        },
    )
}

fn arb_atom_value(atom: Atom) -> BoxedStrategy<Tson> {
    match atom {
        Atom::Int8 => any::<i8>().prop_map(|i| Tson::Int(i64::from(i))).boxed(),
        Atom::Int16 => any::<i16>().prop_map(|i| Tson::Int(i64::from(i))).boxed(),
        Atom::Int32 => any::<i32>().prop_map(|i| Tson::Int(i64::from(i))).boxed(),
        Atom::Int64 => any::<i64>().prop_map(Tson::Int).boxed(),
        Atom::Word8 => any::<u8>().prop_map(|w| Tson::Word(u64::from(w))).boxed(),
        Atom::Word16 => any::<u16>().prop_map(|w| Tson::Word(u64::from(w))).boxed(),
        Atom::Word32 => any::<u32>().prop_map(|w| Tson::Word(u64::from(w))).boxed(),
        Atom::Word64 => any::<u64>().prop_map(Tson::Word).boxed(),
        Atom::Half => any::<u16>()
            .prop_map(|bits| Tson::Tfloat(Float::Half(bits)))
            .boxed(),
        Atom::Single => any::<f32>()
            .prop_map(|f| Tson::Tfloat(Float::Single(f.to_bits())))
            .boxed(),
        Atom::Double => any::<f64>()
            .prop_map(|f| Tson::Tfloat(Float::Double(f.to_bits())))
            .boxed(),
        Atom::Char => any::<char>().prop_map(Tson::Char).boxed(),
        Atom::Bytes => arb_bs().prop_map(Tson::Byt).boxed(),
    }
}

/// arbitrary Tson conforming to `shape`, for use with proptest
pub fn arb_value(shape: &Shape) -> BoxedStrategy<Tson> {
    match shape {
        Shape::Atom(atom) => arb_atom_value(*atom),
        Shape::Product(fields) => {
            let mut strat: BoxedStrategy<Vec<Tson>> = Just(Vec::new()).boxed();
            for field in fields {
                let elem = arb_value(&field.shape);
                strat = (strat, elem)
                    .prop_map(|(mut vals, val)| {
                        vals.push(val);
                        vals
                    })
                    .boxed();
            }
            strat.prop_map(Tson::Product).boxed()
        }
        Shape::Sum(_, alts) => {
            let choices: Vec<BoxedStrategy<Tson>> = alts
                .iter()
                .enumerate()
                .map(|(ix, alt)| {
                    let ix = ix as u64;
                    arb_value(&alt.shape)
                        .prop_map(move |payload| Tson::Variant(ix, Box::new(payload)))
                        .boxed()
                })
                .collect();
            Union::new(choices).boxed()
        }
        Shape::Named(_, inner) => arb_value(inner),
        Shape::Array(elem) => prop::collection::vec(arb_value(elem), 0..4)
            .prop_map(Tson::Array)
            .boxed(),
        Shape::Defer(f) => arb_value(&f()),
    }
}

/// arbitrary (Shape, conforming Tson) pair for use with proptest
pub fn arb_shape_and_value() -> impl Strategy<Value = (Shape, Tson)> {
    arb_shape().prop_flat_map(|shape| {
        let values = arb_value(&shape);
        values.prop_map(move |value| (shape.clone(), value))
    })
}
