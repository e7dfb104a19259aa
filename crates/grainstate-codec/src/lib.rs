//! grainstate-codec — self-describing binary codec for grain state.
//!
//! Grain state is a dynamically-typed attribute map. This crate gives it
//! a closed value domain ([`Value`]) and a compact tagged binary encoding
//! that round-trips every representable value exactly: integers stay
//! integers, floats stay floats (bit-exact), and byte strings never decay
//! into text.
//!
//! # Wire format
//!
//! One tag byte per value, followed by a fixed or length-prefixed
//! payload. All multi-byte quantities are big-endian; string and blob
//! lengths are u32. Map keys are UTF-8 strings encoded as a bare length
//! plus bytes (no tag). The format is self-describing: a decoder needs
//! no schema.
//!
//! # Usage
//!
//! ```
//! use grainstate_codec::{decode_state, encode_state, StateMap, Value};
//!
//! let mut state = StateMap::new();
//! state.insert("visits".to_string(), Value::Int(42));
//!
//! let bytes = encode_state(&state).unwrap();
//! assert_eq!(decode_state(&bytes).unwrap(), state);
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod value;

pub use decoder::{decode, decode_state, Decoder};
pub use encoder::{encode, encode_state, Encoder};
pub use error::{CodecError, CodecResult};
pub use value::{StateMap, Value};
