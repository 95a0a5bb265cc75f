//! The Bencode value tree.

use std::fmt;

use crate::bytestring::ByteString;
use crate::dictionary::Dictionary;

/// Any Bencode value: exactly one of the four grammar productions.
///
/// Values own their contents outright; a document is a tree.
///
/// ```
/// use bencode_core::{encode, Dictionary, Value};
///
/// let mut info = Dictionary::new();
/// info.insert(b"name", Value::string("example.txt"));
/// info.insert(b"length", 1024i64);
///
/// let encoded = encode(&Value::Dict(info));
/// assert_eq!(encoded, b"d6:lengthi1024e4:name11:example.txte");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A byte string, not necessarily valid UTF-8.
    Bytes(ByteString),
    /// A signed integer. Decoding is bounded to the `i64` range.
    Integer(i64),
    List(Vec<Value>),
    Dict(Dictionary),
}

impl Value {
    /// A byte string holding the UTF-8 bytes of `s`.
    pub fn string(s: &str) -> Self {
        Value::Bytes(ByteString::from_text(s))
    }

    pub fn bytes(b: impl Into<ByteString>) -> Self {
        Value::Bytes(b.into())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&ByteString> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The byte string as UTF-8 text. `None` for other kinds or invalid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()?.as_utf8()
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_dict(self) -> Option<Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Look up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Encode this value; shorthand for [`crate::encode`].
    pub fn to_bencode(&self) -> Vec<u8> {
        crate::encoder::encode(self)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<ByteString> for Value {
    fn from(b: ByteString) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dict(d)
    }
}

/// Renders the JSON projection from [`Value::to_json`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
