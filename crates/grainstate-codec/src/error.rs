//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the declared value was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The tag byte does not name a supported value kind.
    #[error("unknown type tag: {tag:#04x}")]
    UnknownTag {
        /// The offending tag byte.
        tag: u8,
    },

    /// A boolean payload byte was neither 0x00 nor 0x01.
    #[error("invalid boolean byte: {byte:#04x}")]
    InvalidBool {
        /// The offending payload byte.
        byte: u8,
    },

    /// Text or a map key was not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// A declared length exceeds the bytes actually remaining.
    #[error("declared length {declared} exceeds remaining input {remaining}")]
    LengthOverrun {
        /// Length claimed by the header.
        declared: u64,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// A single string, blob, or container is too large for the u32
    /// length field.
    #[error("value too large to encode: {len} bytes")]
    TooLarge {
        /// Actual length of the value.
        len: usize,
    },

    /// Containers nested deeper than the decoder allows.
    #[error("containers nested deeper than {max} levels")]
    TooDeep {
        /// Maximum nesting depth the decoder accepts.
        max: usize,
    },

    /// The top level of a state record was not a map.
    #[error("expected a map at the top level, found {found}")]
    NotAMap {
        /// Name of the kind that was found instead.
        found: &'static str,
    },

    /// Bytes remained after the top-level value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}
