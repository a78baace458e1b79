//! Tagged runtime values

use bytes::Bytes;
use std::collections::BTreeMap;

/// A runtime value on the VM operand stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Absence of a value
    Unit,
    /// Boolean
    Boolean(bool),
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    String(String),
    /// Byte vector
    Bytes(Bytes),
    /// Account address
    Address(Bytes),
    /// Ordered list of values
    List(Vec<Value>),
    /// Map-like object with named fields
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Runtime type name, as used by instance checks and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Boolean(_) => "Boolean",
            Value::Int(_) => "Int",
            Value::String(_) => "String",
            Value::Bytes(_) => "ByteVector",
            Value::Address(_) => "Address",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }

    /// Build an object value from field pairs
    pub fn object<const N: usize>(fields: [(&str, Value); N]) -> Value {
        Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
