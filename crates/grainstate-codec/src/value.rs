//! Dynamic value type for grain-state attribute maps.

use std::collections::BTreeMap;

/// A grain-state record: string keys mapped to dynamic values.
///
/// `BTreeMap` keeps iteration in key order, which makes the encoding of a
/// logical map deterministic regardless of insertion order.
pub type StateMap = BTreeMap<String, Value>;

/// A dynamically-typed attribute value.
///
/// This is the closed domain the codec operates on. Integers and floats
/// are separate cases (no numeric widening on decode), and byte strings
/// are distinct from text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null / absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit IEEE-754 float. Round-trips bit-exactly, including NaN.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested string-keyed map.
    Map(StateMap),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as bytes, if it is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&StateMap> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in this map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<StateMap> for Value {
    fn from(entries: StateMap) -> Self {
        Value::Map(entries)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(false).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_bool(), None);

        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Float(1.5).as_int(), None);
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));

        assert_eq!(Value::Text("hi".to_string()).as_text(), Some("hi"));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));

        let list = Value::List(vec![Value::Int(1)]);
        assert_eq!(list.as_list().map(|items| items.len()), Some(1));
    }

    #[test]
    fn map_get() {
        let mut entries = StateMap::new();
        entries.insert("name".to_string(), Value::from("Alice"));
        entries.insert("age".to_string(), Value::from(30));
        let map = Value::Map(entries);

        assert_eq!(map.get("name"), Some(&Value::Text("Alice".to_string())));
        assert_eq!(map.get("age"), Some(&Value::Int(30)));
        assert_eq!(map.get("missing"), None);
        assert_eq!(Value::Int(1).get("name"), None);
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42u32), Value::Int(42));
        assert_eq!(Value::from(0.5f64), Value::Float(0.5));
        assert_eq!(Value::from("hi"), Value::Text("hi".to_string()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
        assert_eq!(Value::from(()), Value::Null);
    }
}
