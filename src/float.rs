use crate::shape::Atom;
use half::f16;
use std::convert::TryFrom;

/// An IEEE-754 bit pattern at one of the three supported precisions.
///
/// Bit patterns rather than native floats are stored so that [`Tson`]
/// values can derive `Eq`, `Ord`, and `Hash`, and so that NaN payloads
/// survive a round trip unchanged.
///
/// [`Tson`]: crate::Tson
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub enum Float {
    Half(u16),
    Single(u32),
    Double(u64),
}

use Float::*;

impl Float {
    /// The leaf kind this bit pattern belongs to.
    pub fn atom(self) -> Atom {
        match self {
            Half(_) => Atom::Half,
            Single(_) => Atom::Single,
            Double(_) => Atom::Double,
        }
    }
}

impl From<f16> for Float {
    fn from(f: f16) -> Float { Half(f.to_bits()) }
}

impl From<f32> for Float {
    fn from(f: f32) -> Float { Single(f.to_bits()) }
}

impl From<f64> for Float {
    fn from(f: f64) -> Float { Double(f.to_bits()) }
}

impl TryFrom<Float> for f16 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Half(n) => Ok(f16::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f32 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Single(n) => Ok(f32::from_bits(n)),
            _ => Err(f),
        }
    }
}

impl TryFrom<Float> for f64 {
    type Error = Float;

    fn try_from(f: Float) -> Result<Self, Float> {
        match f {
            Double(n) => Ok(f64::from_bits(n)),
            _ => Err(f),
        }
    }
}
