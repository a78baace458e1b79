//! Native-function dispatch table
//!
//! The table is built from a version's catalogue in enumeration order, so an
//! external-call id in the bytecode indexes the same function everywhere.
//! The pure core of the library is implemented here; chain-specific natives
//! are registered by the embedder, and calling an unregistered id fails with
//! a descriptive error rather than a guess.

use crate::env::Environment;
use crate::error::{VmError, VmResult};
use crate::value::Value;
use bytes::Bytes;
use ride_costs::{Catalogue, LibVersion};

/// Implementation of one native function
pub type NativeFn = fn(&dyn Environment, Vec<Value>) -> VmResult<Value>;

/// Per-version dispatch table, indexed by external-call id
pub struct FunctionTable {
    names: Vec<&'static str>,
    implementations: Vec<Option<NativeFn>>,
}

impl FunctionTable {
    /// Build the table for a library version, wiring the built-in pure
    /// functions and leaving the rest unimplemented.
    pub fn for_version(version: LibVersion) -> Self {
        let catalogue = Catalogue::for_version(version);
        let names: Vec<&'static str> = catalogue.names().collect();
        let implementations = names.iter().map(|name| implementation(name)).collect();
        Self {
            names,
            implementations,
        }
    }

    /// Function identifier behind an external-call id
    pub fn name(&self, id: u8) -> Option<&'static str> {
        self.names.get(id as usize).copied()
    }

    /// Register or replace an implementation by function identifier
    pub fn register(&mut self, name: &str, implementation: NativeFn) -> bool {
        match self.names.iter().position(|&n| n == name) {
            Some(index) => {
                self.implementations[index] = Some(implementation);
                true
            }
            None => false,
        }
    }

    /// Invoke the function behind an external-call id
    pub fn invoke(
        &self,
        id: u8,
        env: &dyn Environment,
        args: Vec<Value>,
    ) -> VmResult<Value> {
        let name = self
            .name(id)
            .ok_or_else(|| VmError::FunctionNotImplemented(format!("id {id}")))?;
        let implementation = self.implementations[id as usize]
            .ok_or_else(|| VmError::FunctionNotImplemented(name.to_string()))?;
        implementation(env, args)
    }
}

/// Built-in implementation behind a catalogue identifier, if any
fn implementation(name: &str) -> Option<NativeFn> {
    Some(match name {
        "0" => native_eq,
        "1" => native_is_instance_of,
        "2" | "throw" => native_throw,
        "100" => native_add,
        "101" => native_sub,
        "102" => native_gt,
        "103" => native_ge,
        "104" => native_mul,
        "105" => native_div,
        "106" => native_mod,
        "107" => native_fraction,
        "200" => native_bytes_size,
        "201" => native_bytes_take,
        "202" => native_bytes_drop,
        "203" => native_bytes_concat,
        "300" => native_string_concat,
        "303" => native_string_take,
        "304" => native_string_drop,
        "305" => native_string_size,
        "400" => native_list_size,
        "401" => native_list_get,
        "410" => native_long_to_bytes,
        "411" => native_string_to_bytes,
        "412" => native_boolean_to_bytes,
        "420" => native_long_to_string,
        "421" => native_boolean_to_string,
        "1040" | "1041" | "1042" | "1043" => native_data_lookup,
        "1100" => native_cons,
        "wavesBalance" => native_waves_balance,
        "!" => native_not,
        "!=" => native_neq,
        "-" => native_neg,
        "isDefined" => native_is_defined,
        "extract" | "value" => native_value,
        "valueOrErrorMessage" => native_value_or_error_message,
        "valueOrElse" => native_value_or_else,
        "parseIntValue" => native_parse_int_value,
        "contains" => native_contains,
        "DataEntry" => native_data_entry,
        _ => return None,
    })
}

fn exactly<const N: usize>(name: &str, args: Vec<Value>) -> VmResult<[Value; N]> {
    let count = args.len();
    args.try_into()
        .map_err(|_| VmError::InvalidArguments(format!("{name}: {count} arguments")))
}

fn int(name: &str, value: &Value) -> VmResult<i64> {
    match value {
        Value::Int(v) => Ok(*v),
        other => Err(VmError::InvalidArguments(format!(
            "{name}: expected Int, got {}",
            other.type_name()
        ))),
    }
}

fn native_eq(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("equality", args)?;
    Ok(Value::Boolean(left == right))
}

fn native_neq(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("inequality", args)?;
    Ok(Value::Boolean(left != right))
}

fn native_is_instance_of(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, type_name] = exactly("isInstanceOf", args)?;
    let Value::String(name) = type_name else {
        return Err(VmError::InvalidArguments(
            "isInstanceOf: type name must be a string".to_string(),
        ));
    };
    Ok(Value::Boolean(value.type_name() == name))
}

fn native_throw(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let message = match args.first() {
        Some(Value::String(message)) => message.clone(),
        _ => "Explicit script termination".to_string(),
    };
    Err(VmError::Throw(message))
}

fn native_add(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("addition", args)?;
    int("addition", &left)?
        .checked_add(int("addition", &right)?)
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_sub(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("subtraction", args)?;
    int("subtraction", &left)?
        .checked_sub(int("subtraction", &right)?)
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_mul(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("multiplication", args)?;
    int("multiplication", &left)?
        .checked_mul(int("multiplication", &right)?)
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_div(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("division", args)?;
    let divisor = int("division", &right)?;
    if divisor == 0 {
        return Err(VmError::DivisionByZero);
    }
    int("division", &left)?
        .checked_div_euclid(divisor)
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_mod(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("modulo", args)?;
    let divisor = int("modulo", &right)?;
    if divisor == 0 {
        return Err(VmError::DivisionByZero);
    }
    int("modulo", &left)?
        .checked_rem_euclid(divisor)
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_fraction(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, numerator, denominator] = exactly("fraction", args)?;
    let denominator = int("fraction", &denominator)?;
    if denominator == 0 {
        return Err(VmError::DivisionByZero);
    }
    let product = int("fraction", &value)? as i128 * int("fraction", &numerator)? as i128;
    i64::try_from(product / denominator as i128)
        .map(Value::Int)
        .map_err(|_| VmError::IntegerOverflow)
}

fn native_gt(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("comparison", args)?;
    Ok(Value::Boolean(int("comparison", &left)? > int("comparison", &right)?))
}

fn native_ge(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("comparison", args)?;
    Ok(Value::Boolean(
        int("comparison", &left)? >= int("comparison", &right)?,
    ))
}

fn native_not(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("negation", args)?;
    match value {
        Value::Boolean(v) => Ok(Value::Boolean(!v)),
        other => Err(VmError::InvalidArguments(format!(
            "negation: expected Boolean, got {}",
            other.type_name()
        ))),
    }
}

fn native_neg(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("unary minus", args)?;
    int("unary minus", &value)?
        .checked_neg()
        .map(Value::Int)
        .ok_or(VmError::IntegerOverflow)
}

fn native_bytes_size(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("size", args)?;
    match value {
        Value::Bytes(v) => Ok(Value::Int(v.len() as i64)),
        other => Err(VmError::InvalidArguments(format!(
            "size: expected ByteVector, got {}",
            other.type_name()
        ))),
    }
}

fn clamp(len: usize, n: i64) -> usize {
    (n.max(0) as usize).min(len)
}

fn native_bytes_take(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, n] = exactly("take", args)?;
    let n = int("take", &n)?;
    match value {
        Value::Bytes(v) => {
            let end = clamp(v.len(), n);
            Ok(Value::Bytes(v.slice(..end)))
        }
        other => Err(VmError::InvalidArguments(format!(
            "take: expected ByteVector, got {}",
            other.type_name()
        ))),
    }
}

fn native_bytes_drop(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, n] = exactly("drop", args)?;
    let n = int("drop", &n)?;
    match value {
        Value::Bytes(v) => {
            let start = clamp(v.len(), n);
            Ok(Value::Bytes(v.slice(start..)))
        }
        other => Err(VmError::InvalidArguments(format!(
            "drop: expected ByteVector, got {}",
            other.type_name()
        ))),
    }
}

fn native_bytes_concat(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("concat", args)?;
    match (left, right) {
        (Value::Bytes(l), Value::Bytes(r)) => {
            let mut out = Vec::with_capacity(l.len() + r.len());
            out.extend_from_slice(&l);
            out.extend_from_slice(&r);
            Ok(Value::Bytes(Bytes::from(out)))
        }
        (l, r) => Err(VmError::InvalidArguments(format!(
            "concat: expected ByteVector arguments, got {} and {}",
            l.type_name(),
            r.type_name()
        ))),
    }
}

fn string_arg(name: &str, value: Value) -> VmResult<String> {
    match value {
        Value::String(v) => Ok(v),
        other => Err(VmError::InvalidArguments(format!(
            "{name}: expected String, got {}",
            other.type_name()
        ))),
    }
}

fn native_string_concat(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [left, right] = exactly("concat", args)?;
    let mut out = string_arg("concat", left)?;
    out.push_str(&string_arg("concat", right)?);
    Ok(Value::String(out))
}

fn native_string_take(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, n] = exactly("take", args)?;
    let n = int("take", &n)?;
    let value = string_arg("take", value)?;
    Ok(Value::String(value.chars().take(clamp(usize::MAX, n)).collect()))
}

fn native_string_drop(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, n] = exactly("drop", args)?;
    let n = int("drop", &n)?;
    let value = string_arg("drop", value)?;
    Ok(Value::String(value.chars().skip(clamp(usize::MAX, n)).collect()))
}

fn native_string_size(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("size", args)?;
    Ok(Value::Int(string_arg("size", value)?.chars().count() as i64))
}

fn native_list_size(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("size", args)?;
    match value {
        Value::List(v) => Ok(Value::Int(v.len() as i64)),
        other => Err(VmError::InvalidArguments(format!(
            "size: expected List, got {}",
            other.type_name()
        ))),
    }
}

fn native_list_get(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, index] = exactly("getElement", args)?;
    let index = int("getElement", &index)?;
    match value {
        Value::List(v) => v
            .get(usize::try_from(index).unwrap_or(usize::MAX))
            .cloned()
            .ok_or_else(|| VmError::Throw(format!("index {index} out of bounds"))),
        other => Err(VmError::InvalidArguments(format!(
            "getElement: expected List, got {}",
            other.type_name()
        ))),
    }
}

fn native_cons(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [head, tail] = exactly("cons", args)?;
    let mut list = match tail {
        Value::List(v) => v,
        Value::Unit => Vec::new(),
        other => {
            return Err(VmError::InvalidArguments(format!(
                "cons: expected List tail, got {}",
                other.type_name()
            )))
        }
    };
    list.insert(0, head);
    Ok(Value::List(list))
}

fn native_long_to_bytes(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("toBytes", args)?;
    let value = int("toBytes", &value)?;
    Ok(Value::Bytes(Bytes::copy_from_slice(&value.to_be_bytes())))
}

fn native_string_to_bytes(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("toBytes", args)?;
    let value = string_arg("toBytes", value)?;
    Ok(Value::Bytes(Bytes::from(value.into_bytes())))
}

fn native_boolean_to_bytes(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("toBytes", args)?;
    match value {
        Value::Boolean(v) => Ok(Value::Bytes(Bytes::from(vec![u8::from(v)]))),
        other => Err(VmError::InvalidArguments(format!(
            "toBytes: expected Boolean, got {}",
            other.type_name()
        ))),
    }
}

fn native_long_to_string(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("toString", args)?;
    Ok(Value::String(int("toString", &value)?.to_string()))
}

fn native_boolean_to_string(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("toString", args)?;
    match value {
        Value::Boolean(v) => Ok(Value::String(v.to_string())),
        other => Err(VmError::InvalidArguments(format!(
            "toString: expected Boolean, got {}",
            other.type_name()
        ))),
    }
}

fn native_is_defined(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("isDefined", args)?;
    Ok(Value::Boolean(value != Value::Unit))
}

fn native_value(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("value", args)?;
    match value {
        Value::Unit => Err(VmError::Throw("value() called on unit".to_string())),
        other => Ok(other),
    }
}

fn native_value_or_error_message(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, message] = exactly("valueOrErrorMessage", args)?;
    match value {
        Value::Unit => Err(VmError::Throw(string_arg("valueOrErrorMessage", message)?)),
        other => Ok(other),
    }
}

fn native_value_or_else(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value, default] = exactly("valueOrElse", args)?;
    match value {
        Value::Unit => Ok(default),
        other => Ok(other),
    }
}

fn native_parse_int_value(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [value] = exactly("parseIntValue", args)?;
    let value = string_arg("parseIntValue", value)?;
    value
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| VmError::Throw(format!("could not parse '{value}' as integer")))
}

fn native_contains(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [haystack, needle] = exactly("contains", args)?;
    let haystack = string_arg("contains", haystack)?;
    let needle = string_arg("contains", needle)?;
    Ok(Value::Boolean(haystack.contains(&needle)))
}

fn native_data_entry(_env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [key, value] = exactly("DataEntry", args)?;
    let key = string_arg("DataEntry", key)?;
    Ok(Value::object([
        ("key", Value::String(key)),
        ("value", value),
    ]))
}

fn native_data_lookup(env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [address, key] = exactly("data lookup", args)?;
    let key = string_arg("data lookup", key)?;
    Ok(env.data_entry(&address, &key).unwrap_or(Value::Unit))
}

fn native_waves_balance(env: &dyn Environment, args: Vec<Value>) -> VmResult<Value> {
    let [address] = exactly("wavesBalance", args)?;
    env.balance(&address, None).map(Value::Int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NullEnvironment;

    fn invoke(name: &str, args: Vec<Value>) -> VmResult<Value> {
        let table = FunctionTable::for_version(LibVersion::V4);
        let catalogue = Catalogue::for_version(LibVersion::V4);
        let id = catalogue.function_index(name).unwrap() as u8;
        table.invoke(id, &NullEnvironment, args)
    }

    #[test]
    fn test_table_order_matches_catalogue() {
        let table = FunctionTable::for_version(LibVersion::V3);
        let catalogue = Catalogue::for_version(LibVersion::V3);
        for (index, name) in catalogue.names().enumerate() {
            assert_eq!(table.name(index as u8), Some(name));
        }
    }

    #[test]
    fn test_equality_and_inequality() {
        assert_eq!(
            invoke("0", vec![Value::Int(1), Value::Int(1)]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            invoke("!=", vec![Value::Int(1), Value::Int(2)]),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            invoke("100", vec![Value::Int(2), Value::Int(3)]),
            Ok(Value::Int(5))
        );
        assert_eq!(
            invoke("101", vec![Value::Int(2), Value::Int(3)]),
            Ok(Value::Int(-1))
        );
        assert_eq!(
            invoke("104", vec![Value::Int(6), Value::Int(7)]),
            Ok(Value::Int(42))
        );
        assert_eq!(
            invoke("105", vec![Value::Int(7), Value::Int(2)]),
            Ok(Value::Int(3))
        );
        assert_eq!(
            invoke("105", vec![Value::Int(7), Value::Int(0)]),
            Err(VmError::DivisionByZero)
        );
        assert_eq!(
            invoke("100", vec![Value::Int(i64::MAX), Value::Int(1)]),
            Err(VmError::IntegerOverflow)
        );
    }

    #[test]
    fn test_fraction() {
        // intermediate product overflows 64 bits, result does not
        assert_eq!(
            invoke(
                "107",
                vec![
                    Value::Int(i64::MAX / 2),
                    Value::Int(4),
                    Value::Int(8)
                ]
            ),
            Ok(Value::Int(i64::MAX / 4))
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            invoke("102", vec![Value::Int(3), Value::Int(2)]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            invoke("103", vec![Value::Int(2), Value::Int(2)]),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_throw_family() {
        assert_eq!(
            invoke("throw", vec![]),
            Err(VmError::Throw("Explicit script termination".to_string()))
        );
        assert_eq!(
            invoke("2", vec![Value::from("bad tx")]),
            Err(VmError::Throw("bad tx".to_string()))
        );
    }

    #[test]
    fn test_string_primitives() {
        assert_eq!(
            invoke("300", vec![Value::from("ab"), Value::from("cd")]),
            Ok(Value::from("abcd"))
        );
        assert_eq!(
            invoke("303", vec![Value::from("abcd"), Value::Int(2)]),
            Ok(Value::from("ab"))
        );
        assert_eq!(
            invoke("304", vec![Value::from("abcd"), Value::Int(2)]),
            Ok(Value::from("cd"))
        );
        assert_eq!(
            invoke("305", vec![Value::from("abcd")]),
            Ok(Value::Int(4))
        );
        assert_eq!(
            invoke("contains", vec![Value::from("abcd"), Value::from("bc")]),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_bytes_primitives() {
        let bytes = Value::Bytes(Bytes::from_static(b"abcd"));
        assert_eq!(invoke("200", vec![bytes.clone()]), Ok(Value::Int(4)));
        assert_eq!(
            invoke("201", vec![bytes.clone(), Value::Int(2)]),
            Ok(Value::Bytes(Bytes::from_static(b"ab")))
        );
        assert_eq!(
            invoke("202", vec![bytes, Value::Int(2)]),
            Ok(Value::Bytes(Bytes::from_static(b"cd")))
        );
    }

    #[test]
    fn test_lists() {
        let list = invoke("1100", vec![Value::Int(1), Value::Unit]).unwrap();
        let list = invoke("1100", vec![Value::Int(0), list]).unwrap();
        assert_eq!(invoke("400", vec![list.clone()]), Ok(Value::Int(2)));
        assert_eq!(
            invoke("401", vec![list.clone(), Value::Int(1)]),
            Ok(Value::Int(1))
        );
        assert!(matches!(
            invoke("401", vec![list, Value::Int(5)]),
            Err(VmError::Throw(_))
        ));
    }

    #[test]
    fn test_value_extractors() {
        assert_eq!(invoke("value", vec![Value::Int(1)]), Ok(Value::Int(1)));
        assert!(matches!(
            invoke("value", vec![Value::Unit]),
            Err(VmError::Throw(_))
        ));
        assert_eq!(
            invoke("valueOrElse", vec![Value::Unit, Value::Int(9)]),
            Ok(Value::Int(9))
        );
        assert_eq!(
            invoke("isDefined", vec![Value::Unit]),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            invoke("isDefined", vec![Value::Int(0)]),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_parse_int_value() {
        assert_eq!(
            invoke("parseIntValue", vec![Value::from("12345")]),
            Ok(Value::Int(12345))
        );
        assert!(matches!(
            invoke("parseIntValue", vec![Value::from("xyz")]),
            Err(VmError::Throw(_))
        ));
    }

    #[test]
    fn test_unimplemented_function_is_an_error() {
        // groth16 verification is the embedder's to register
        let result = invoke("800", vec![]);
        assert_eq!(
            result,
            Err(VmError::FunctionNotImplemented("800".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_implementation() {
        let mut table = FunctionTable::for_version(LibVersion::V4);
        let catalogue = Catalogue::for_version(LibVersion::V4);
        fn stub(_env: &dyn Environment, _args: Vec<Value>) -> VmResult<Value> {
            Ok(Value::Boolean(true))
        }
        assert!(table.register("800", stub));
        assert!(!table.register("no-such-function", stub));
        let id = catalogue.function_index("800").unwrap() as u8;
        assert_eq!(
            table.invoke(id, &NullEnvironment, vec![]),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_chain_state_natives_go_through_the_environment() {
        struct StateEnv;
        impl Environment for StateEnv {
            fn height(&self) -> i64 {
                10
            }
            fn transaction(&self) -> Value {
                Value::Unit
            }
            fn this_contract(&self) -> Value {
                Value::Unit
            }
            fn last_block(&self) -> Value {
                Value::Unit
            }
            fn balance(&self, _address: &Value, _asset: Option<&[u8]>) -> VmResult<i64> {
                Ok(100_000_000)
            }
            fn data_entry(&self, _address: &Value, key: &str) -> Option<Value> {
                (key == "counter").then_some(Value::Int(7))
            }
        }
        let table = FunctionTable::for_version(LibVersion::V3);
        let catalogue = Catalogue::for_version(LibVersion::V3);
        let lookup = catalogue.function_index("1040").unwrap() as u8;
        assert_eq!(
            table.invoke(
                lookup,
                &StateEnv,
                vec![Value::Unit, Value::from("counter")]
            ),
            Ok(Value::Int(7))
        );
        assert_eq!(
            table.invoke(lookup, &StateEnv, vec![Value::Unit, Value::from("missing")]),
            Ok(Value::Unit)
        );
        let balance = catalogue.function_index("wavesBalance").unwrap() as u8;
        assert_eq!(
            table.invoke(balance, &StateEnv, vec![Value::Unit]),
            Ok(Value::Int(100_000_000))
        );
    }

    #[test]
    fn test_instance_check() {
        assert_eq!(
            invoke("1", vec![Value::Int(1), Value::from("Int")]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            invoke("1", vec![Value::Int(1), Value::from("String")]),
            Ok(Value::Boolean(false))
        );
    }
}
