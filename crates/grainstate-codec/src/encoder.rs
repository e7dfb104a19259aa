//! Tagged binary encoder.

use crate::error::{CodecError, CodecResult};
use crate::value::{StateMap, Value};

pub(crate) const TAG_NULL: u8 = 0x00;
pub(crate) const TAG_BOOL: u8 = 0x01;
pub(crate) const TAG_INT: u8 = 0x02;
pub(crate) const TAG_FLOAT: u8 = 0x03;
pub(crate) const TAG_TEXT: u8 = 0x04;
pub(crate) const TAG_BYTES: u8 = 0x05;
pub(crate) const TAG_LIST: u8 = 0x06;
pub(crate) const TAG_MAP: u8 = 0x07;

/// Encode a single value to bytes.
///
/// # Errors
///
/// Fails only when a single string, blob, or container exceeds the u32
/// length field (more than 4 GiB), which no chunkable payload reaches.
pub fn encode(value: &Value) -> CodecResult<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

/// Encode a state record (top-level map) to bytes.
pub fn encode_state(state: &StateMap) -> CodecResult<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.buffer.push(TAG_MAP);
    encoder.encode_map(state)?;
    Ok(encoder.into_bytes())
}

/// A buffer-owning encoder for the tagged binary format.
pub struct Encoder {
    buffer: Vec<u8>,
}

impl Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode a value into the buffer.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        match value {
            Value::Null => {
                self.buffer.push(TAG_NULL);
                Ok(())
            }
            Value::Bool(b) => {
                self.buffer.push(TAG_BOOL);
                self.buffer.push(u8::from(*b));
                Ok(())
            }
            Value::Int(n) => {
                self.buffer.push(TAG_INT);
                self.buffer.extend_from_slice(&n.to_be_bytes());
                Ok(())
            }
            Value::Float(f) => {
                // Bit pattern, not the numeric value: NaN payloads and
                // signed zero survive the round trip.
                self.buffer.push(TAG_FLOAT);
                self.buffer.extend_from_slice(&f.to_bits().to_be_bytes());
                Ok(())
            }
            Value::Text(s) => {
                self.buffer.push(TAG_TEXT);
                self.encode_len_prefixed(s.as_bytes())
            }
            Value::Bytes(b) => {
                self.buffer.push(TAG_BYTES);
                self.encode_len_prefixed(b)
            }
            Value::List(items) => {
                self.buffer.push(TAG_LIST);
                self.encode_count(items.len())?;
                for item in items {
                    self.encode(item)?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                self.buffer.push(TAG_MAP);
                self.encode_map(entries)
            }
        }
    }

    /// Encode the entries of a map (count + key/value pairs, no tag).
    fn encode_map(&mut self, entries: &StateMap) -> CodecResult<()> {
        self.encode_count(entries.len())?;
        for (key, value) in entries {
            self.encode_len_prefixed(key.as_bytes())?;
            self.encode(value)?;
        }
        Ok(())
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn encode_len_prefixed(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| CodecError::TooLarge {
            len: bytes.len(),
        })?;
        self.buffer.extend_from_slice(&len.to_be_bytes());
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn encode_count(&mut self, count: usize) -> CodecResult<()> {
        let count = u32::try_from(count).map_err(|_| CodecError::TooLarge { len: count })?;
        self.buffer.extend_from_slice(&count.to_be_bytes());
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_null() {
        assert_eq!(encode(&Value::Null).unwrap(), vec![TAG_NULL]);
    }

    #[test]
    fn encode_bool() {
        assert_eq!(encode(&Value::Bool(false)).unwrap(), vec![TAG_BOOL, 0x00]);
        assert_eq!(encode(&Value::Bool(true)).unwrap(), vec![TAG_BOOL, 0x01]);
    }

    #[test]
    fn encode_int_big_endian() {
        assert_eq!(
            encode(&Value::Int(1)).unwrap(),
            vec![TAG_INT, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(
            encode(&Value::Int(-1)).unwrap(),
            vec![TAG_INT, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn encode_float_bit_pattern() {
        let bits = 1.5f64.to_bits().to_be_bytes();
        let mut expected = vec![TAG_FLOAT];
        expected.extend_from_slice(&bits);
        assert_eq!(encode(&Value::Float(1.5)).unwrap(), expected);
    }

    #[test]
    fn encode_text() {
        assert_eq!(
            encode(&Value::Text("ab".to_string())).unwrap(),
            vec![TAG_TEXT, 0, 0, 0, 2, b'a', b'b']
        );
        assert_eq!(
            encode(&Value::Text(String::new())).unwrap(),
            vec![TAG_TEXT, 0, 0, 0, 0]
        );
    }

    #[test]
    fn encode_bytes() {
        assert_eq!(
            encode(&Value::Bytes(vec![9, 8])).unwrap(),
            vec![TAG_BYTES, 0, 0, 0, 2, 9, 8]
        );
    }

    #[test]
    fn encode_list() {
        assert_eq!(
            encode(&Value::List(vec![Value::Null, Value::Bool(true)])).unwrap(),
            vec![TAG_LIST, 0, 0, 0, 2, TAG_NULL, TAG_BOOL, 0x01]
        );
    }

    #[test]
    fn encode_nested_map() {
        let mut entries = StateMap::new();
        entries.insert("a".to_string(), Value::Null);
        assert_eq!(
            encode(&Value::Map(entries)).unwrap(),
            vec![TAG_MAP, 0, 0, 0, 1, 0, 0, 0, 1, b'a', TAG_NULL]
        );
    }

    #[test]
    fn encode_state_is_a_tagged_map() {
        let state = StateMap::new();
        assert_eq!(encode_state(&state).unwrap(), vec![TAG_MAP, 0, 0, 0, 0]);
    }
}
