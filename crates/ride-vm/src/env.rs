//! Blockchain state capability
//!
//! Native functions and the `Global` opcode reach chain state only through
//! this trait; the compiler and the estimators never touch it. All accessors
//! are synchronous reads against one consistent snapshot.

use crate::error::VmResult;
use crate::value::Value;

/// Read-only view of chain state during one execution run
pub trait Environment {
    /// Current block height
    fn height(&self) -> i64;

    /// Transaction under validation, as an object value
    fn transaction(&self) -> Value;

    /// Reference to the account the script is attached to
    fn this_contract(&self) -> Value;

    /// Last block information, as an object value
    fn last_block(&self) -> Value;

    /// Balance of an address, optionally in a given asset
    fn balance(&self, address: &Value, asset: Option<&[u8]>) -> VmResult<i64>;

    /// Data entry stored under (address, key), if any
    fn data_entry(&self, address: &Value, key: &str) -> Option<Value>;
}

/// Environment with no chain behind it: every lookup comes back empty.
///
/// Pure scripts never notice; chain-touching natives see height 0, unit
/// values and zero balances.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {
    fn height(&self) -> i64 {
        0
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
        Ok(0)
    }

    fn data_entry(&self, _address: &Value, _key: &str) -> Option<Value> {
        None
    }
}
