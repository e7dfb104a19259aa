//! Tagged binary decoder.

use crate::encoder::{
    TAG_BOOL, TAG_BYTES, TAG_FLOAT, TAG_INT, TAG_LIST, TAG_MAP, TAG_NULL, TAG_TEXT,
};
use crate::error::{CodecError, CodecResult};
use crate::value::{StateMap, Value};

/// Decode a single value from bytes.
///
/// # Errors
///
/// Returns an error if the input is truncated, carries an unknown tag,
/// contains invalid UTF-8, or has bytes left over after the value.
pub fn decode(bytes: &[u8]) -> CodecResult<Value> {
    let mut decoder = Decoder::new(bytes);
    let value = decoder.decode()?;
    decoder.finish()?;
    Ok(value)
}

/// Decode a state record (top-level map) from bytes.
///
/// An empty byte sequence decodes as an empty record: a row with no
/// data segments means no stored state, not corruption.
pub fn decode_state(bytes: &[u8]) -> CodecResult<StateMap> {
    if bytes.is_empty() {
        return Ok(StateMap::new());
    }
    let mut decoder = Decoder::new(bytes);
    let entries = match decoder.decode()? {
        Value::Map(entries) => entries,
        other => return Err(CodecError::NotAMap { found: kind_name(&other) }),
    };
    decoder.finish()?;
    Ok(entries)
}

/// Human-readable name of a value's kind, for error messages.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Text(_) => "text",
        Value::Bytes(_) => "bytes",
        Value::List(_) => "list",
        Value::Map(_) => "map",
    }
}

/// A cursor-based decoder for the tagged binary format.
///
/// Every declared length is checked against the bytes actually
/// remaining before anything is allocated, so a corrupt header cannot
/// force a huge allocation. Container nesting is capped at
/// [`MAX_DEPTH`] levels, so a corrupt payload cannot drive the
/// recursion off the stack either.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
}

/// Maximum container nesting the decoder accepts. The decoder recurses
/// once per level, so untrusted input must not control the recursion
/// depth: past this cap a payload is corrupt, not state.
const MAX_DEPTH: usize = 128;

impl<'a> Decoder<'a> {
    /// Create a new decoder over the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
        }
    }

    /// Decode the next value.
    pub fn decode(&mut self) -> CodecResult<Value> {
        let tag = self.read_byte()?;
        match tag {
            TAG_NULL => Ok(Value::Null),
            TAG_BOOL => match self.read_byte()? {
                0x00 => Ok(Value::Bool(false)),
                0x01 => Ok(Value::Bool(true)),
                byte => Err(CodecError::InvalidBool { byte }),
            },
            TAG_INT => {
                let raw = self.read_array::<8>()?;
                Ok(Value::Int(i64::from_be_bytes(raw)))
            }
            TAG_FLOAT => {
                let raw = self.read_array::<8>()?;
                Ok(Value::Float(f64::from_bits(u64::from_be_bytes(raw))))
            }
            TAG_TEXT => {
                let bytes = self.read_len_prefixed()?;
                let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
                Ok(Value::Text(text.to_string()))
            }
            TAG_BYTES => {
                let bytes = self.read_len_prefixed()?;
                Ok(Value::Bytes(bytes.to_vec()))
            }
            TAG_LIST => {
                self.enter()?;
                let count = self.read_count()?;
                // Each element is at least one tag byte.
                let mut items = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    items.push(self.decode()?);
                }
                self.depth -= 1;
                Ok(Value::List(items))
            }
            TAG_MAP => {
                self.enter()?;
                let entries = self.decode_map_entries()?;
                self.depth -= 1;
                Ok(Value::Map(entries))
            }
            tag => Err(CodecError::UnknownTag { tag }),
        }
    }

    /// Decode map entries (count + key/value pairs, no leading tag).
    fn decode_map_entries(&mut self) -> CodecResult<StateMap> {
        let count = self.read_count()?;
        let mut entries = StateMap::new();
        for _ in 0..count {
            let raw_key = self.read_len_prefixed()?;
            let key = std::str::from_utf8(raw_key).map_err(|_| CodecError::InvalidUtf8)?;
            let value = self.decode()?;
            entries.insert(key.to_string(), value);
        }
        Ok(entries)
    }

    /// Fail if any input bytes were not consumed.
    pub fn finish(&self) -> CodecResult<()> {
        if self.pos < self.data.len() {
            return Err(CodecError::TrailingBytes(self.data.len() - self.pos));
        }
        Ok(())
    }

    /// Bytes left in the input.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn enter(&mut self) -> CodecResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CodecError::TooDeep { max: MAX_DEPTH });
        }
        Ok(())
    }

    #[inline]
    fn read_byte(&mut self) -> CodecResult<u8> {
        if self.pos >= self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_len_prefixed(&mut self) -> CodecResult<&'a [u8]> {
        let declared = u64::from(u32::from_be_bytes(self.read_array::<4>()?));
        let remaining = self.remaining();
        if declared > remaining as u64 {
            return Err(CodecError::LengthOverrun {
                declared,
                remaining,
            });
        }
        self.read_bytes(declared as usize)
    }

    fn read_count(&mut self) -> CodecResult<usize> {
        let declared = u64::from(u32::from_be_bytes(self.read_array::<4>()?));
        let remaining = self.remaining();
        // Every element or entry occupies at least one byte, so a count
        // beyond the remaining input is corrupt by construction.
        if declared > remaining as u64 {
            return Err(CodecError::LengthOverrun {
                declared,
                remaining,
            });
        }
        Ok(declared as usize)
    }
}
