/// Continuation bit, set on every varint byte except the last. 0x80
pub(crate) const CONT_BIT: u8 = 0b1000_0000;
/// The low seven payload bits of a varint byte. 0x7f
pub(crate) const CHUNK_MASK: u8 = 0b0111_1111;
/// Sign bit of the most significant chunk of an int varint. 0x40
pub(crate) const SIGN_CHUNK_BIT: u8 = 0b0100_0000;
/// Chunk prepended to disambiguate a non-negative int varint.
pub(crate) const PAD_POSITIVE: u8 = 0b0000_0000;
/// Chunk prepended to disambiguate a negative int varint.
pub(crate) const PAD_NEGATIVE: u8 = 0b0111_1111;
