//! Terminal execution results

use crate::error::{VmError, VmResult};
use crate::value::Value;
use bytes::Bytes;

/// Ledger action produced by a contract invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write a data entry under the contract account
    DataEntry {
        /// Entry key
        key: String,
        /// Entry value
        value: Value,
    },
    /// Transfer funds out of the contract account
    Transfer {
        /// Recipient address or alias
        recipient: Value,
        /// Amount in minimal units
        amount: i64,
        /// Asset id, or none for the chain currency
        asset: Option<Bytes>,
    },
}

/// Terminal result of one execution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RideResult {
    /// Boolean verdict of a verifier script
    ScriptResult(bool),
    /// Ledger actions of a contract invocation
    DAppResult(Vec<Action>),
}

impl RideResult {
    /// Decode the final stack value into a result.
    ///
    /// A boolean is a verifier verdict; a list of recognised action objects
    /// is a contract result; anything else fails the run.
    pub fn from_value(value: Value) -> VmResult<Self> {
        match value {
            Value::Boolean(verdict) => Ok(RideResult::ScriptResult(verdict)),
            Value::List(items) => {
                let mut actions = Vec::with_capacity(items.len());
                for item in items {
                    actions.push(Action::from_value(item)?);
                }
                Ok(RideResult::DAppResult(actions))
            }
            _ => Err(VmError::InvalidResult(
                "expected a boolean or a list of actions",
            )),
        }
    }
}

impl Action {
    /// Decode one action object
    pub fn from_value(value: Value) -> VmResult<Self> {
        let Value::Object(fields) = value else {
            return Err(VmError::InvalidResult("action is not an object"));
        };
        if let (Some(Value::String(key)), Some(entry)) = (fields.get("key"), fields.get("value")) {
            return Ok(Action::DataEntry {
                key: key.clone(),
                value: entry.clone(),
            });
        }
        if let (Some(recipient), Some(Value::Int(amount))) =
            (fields.get("recipient"), fields.get("amount"))
        {
            let asset = match fields.get("asset") {
                Some(Value::Bytes(asset)) => Some(asset.clone()),
                _ => None,
            };
            return Ok(Action::Transfer {
                recipient: recipient.clone(),
                amount: *amount,
                asset,
            });
        }
        Err(VmError::InvalidResult("unrecognised action object"))
    }
}
