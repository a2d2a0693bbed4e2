pub use crate::{
    encoding::{
        decode, decode_full, encode, encode_full, from_bytes, to_bytes, Serializer,
        SerializerExt, TsonBytes,
    },
    errors::Error,
    fingerprint::{fingerprint, fingerprint_of},
    float::Float,
    rep::{pop_tson, TsonRep},
    shape::{Alt, Atom, Field, Shape},
    tson_macro::*,
    Tson,
};
pub use bytes::Bytes;
pub use half::f16;
