use failure::Fail;

/// The two ways a TSON operation can go wrong.
///
/// Decoding fails with [`Error::MalformedInput`] as soon as the input cannot
/// be the encoding of a value of the expected shape; no partial value is ever
/// produced. Encoding fails with [`Error::Unrepresentable`] when a value does
/// not conform to the shape it is being encoded against, or exceeds the range
/// of a narrow primitive.
#[derive(Clone, Debug, Fail)]
pub enum Error {
    /// The input buffer cannot be decoded at the expected shape.
    #[fail(display = "malformed input: {}", _0)]
    MalformedInput(String),
    /// The value cannot be encoded at the expected shape.
    #[fail(display = "unrepresentable value: {}", _0)]
    Unrepresentable(String),
}

#[macro_export]
/// Early-returns an [`Error::MalformedInput`](crate::errors::Error) built
/// from a format string.
macro_rules! malformed {
    ($($arg:tt)*) => {
        return Err($crate::errors::Error::MalformedInput(format!($($arg)*)))
    };
}

#[macro_export]
/// Early-returns an [`Error::Unrepresentable`](crate::errors::Error) built
/// from a format string.
macro_rules! unrepresentable {
    ($($arg:tt)*) => {
        return Err($crate::errors::Error::Unrepresentable(format!($($arg)*)))
    };
}
