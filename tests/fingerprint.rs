use tson::prelude::*;

#[derive(Clone, Debug, TsonRep, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Clone, Debug, TsonRep, PartialEq)]
enum Chain {
    End,
    Link(u64, Box<Chain>),
}

fn atom(a: Atom) -> Shape {
    Shape::Atom(a)
}

#[test]
fn repeated_calls_agree() {
    let shape = Point::shape();
    assert_eq!(fingerprint(&shape), fingerprint(&shape));
    assert_eq!(fingerprint_of::<Point>(), fingerprint_of::<Point>());
    assert_eq!(fingerprint_of::<Vec<Option<u8>>>(), fingerprint_of::<Vec<Option<u8>>>());
}

#[test]
fn derived_shapes_match_hand_written_ones() {
    let by_hand = Shape::Named(
        "Point",
        Box::new(Shape::Product(vec![
            Field::named("x", atom(Atom::Int32)),
            Field::named("y", atom(Atom::Int32)),
        ])),
    );
    assert_eq!(fingerprint_of::<Point>(), fingerprint(&by_hand));
}

#[test]
fn field_order_changes_the_fingerprint() {
    let xy = Shape::Product(vec![
        Field::unnamed(atom(Atom::Int32)),
        Field::unnamed(atom(Atom::Word64)),
    ]);
    let yx = Shape::Product(vec![
        Field::unnamed(atom(Atom::Word64)),
        Field::unnamed(atom(Atom::Int32)),
    ]);
    assert_ne!(fingerprint(&xy), fingerprint(&yx));
}

#[test]
fn arity_changes_the_fingerprint() {
    let one = Shape::Product(vec![Field::unnamed(atom(Atom::Int32))]);
    let two = Shape::Product(vec![
        Field::unnamed(atom(Atom::Int32)),
        Field::unnamed(atom(Atom::Int32)),
    ]);
    assert_ne!(fingerprint(&one), fingerprint(&two));
    assert_ne!(fingerprint(&Shape::unit()), fingerprint(&one));
}

#[test]
fn primitive_kind_changes_the_fingerprint() {
    assert_ne!(fingerprint(&atom(Atom::Int8)), fingerprint(&atom(Atom::Int16)));
    assert_ne!(fingerprint(&atom(Atom::Single)), fingerprint(&atom(Atom::Double)));
    assert_ne!(fingerprint_of::<u32>(), fingerprint_of::<i32>());
}

#[test]
fn alternative_order_changes_the_fingerprint() {
    let ab = Shape::Sum(
        "E",
        vec![
            Alt::new("A", atom(Atom::Int64)),
            Alt::new("B", atom(Atom::Char)),
        ],
    );
    let ba = Shape::Sum(
        "E",
        vec![
            Alt::new("B", atom(Atom::Char)),
            Alt::new("A", atom(Atom::Int64)),
        ],
    );
    assert_ne!(fingerprint(&ab), fingerprint(&ba));
}

#[test]
fn constructor_names_change_the_fingerprint() {
    let before = Shape::Sum(
        "E",
        vec![Alt::new("Old", Shape::unit()), Alt::new("B", Shape::unit())],
    );
    let after = Shape::Sum(
        "E",
        vec![Alt::new("New", Shape::unit()), Alt::new("B", Shape::unit())],
    );
    assert_ne!(fingerprint(&before), fingerprint(&after));
}

#[test]
fn declared_type_names_enter_through_wrappers() {
    let inner = atom(Atom::Word64);

    // a named wrapper is distinguished from its bare payload
    let named = Shape::Named("Meters", Box::new(inner.clone()));
    assert_ne!(fingerprint(&named), fingerprint(&inner));

    // and from the same structure under another name
    let other = Shape::Named("Seconds", Box::new(inner.clone()));
    assert_ne!(fingerprint(&named), fingerprint(&other));
}

#[test]
fn array_fingerprints_depend_only_on_the_element() {
    assert_eq!(
        fingerprint_of::<Vec<u64>>(),
        fingerprint(&Shape::Array(Box::new(atom(Atom::Word64))))
    );
    assert_ne!(fingerprint_of::<Vec<u64>>(), fingerprint_of::<Vec<i64>>());
}

#[test]
fn recursive_types_terminate() {
    let fp = fingerprint_of::<Chain>();
    assert_eq!(fp, fingerprint_of::<Chain>());

    // the cycle is part of the structure: a chain of words is not a bare
    // pair of words
    let flat = Shape::Sum(
        "Chain",
        vec![
            Alt::new("End", Shape::unit()),
            Alt::new(
                "Link",
                Shape::Product(vec![
                    Field::unnamed(atom(Atom::Word64)),
                    Field::unnamed(atom(Atom::Word64)),
                ]),
            ),
        ],
    );
    assert_ne!(fp, fingerprint(&flat));
}

#[test]
fn builtin_sums_are_ordinary_shapes() {
    // Bool, Option, and Result are plain two-way sums; their fingerprints
    // come from the same rules as user-defined unions
    assert_ne!(fingerprint_of::<bool>(), fingerprint_of::<Option<()>>());
    assert_ne!(
        fingerprint_of::<Option<u64>>(),
        fingerprint_of::<Result<u64, u64>>()
    );
    assert_ne!(
        fingerprint_of::<Option<u64>>(),
        fingerprint_of::<Option<i64>>()
    );
}
