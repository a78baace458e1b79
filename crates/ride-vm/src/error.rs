//! VM error types

use thiserror::Error;

/// Errors produced while executing a program.
///
/// `Throw` is the one script-level failure: it is the deliberate rejection
/// signal of the `throw` function family, not a machine malfunction, and
/// callers are expected to report it as a plain verification failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Pop or peek on an empty operand stack
    #[error("stack underflow")]
    StackUnderflow,

    /// Return without a call frame
    #[error("call stack underflow")]
    CallStackUnderflow,

    /// Operand value of the wrong runtime type
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Required type name
        expected: &'static str,
        /// Actual type name
        actual: &'static str,
    },

    /// A byte that is not an opcode
    #[error("unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Operand bytes missing at the end of the code
    #[error("truncated code at position {0}")]
    TruncatedCode(usize),

    /// Jump or call target outside the code
    #[error("invalid jump target: {0}")]
    InvalidJump(usize),

    /// Constant index with no registered constant behind it
    #[error("constant out of range: {0}")]
    ConstantOutOfRange(u16),

    /// Local slot outside the current frame
    #[error("local slot out of range: {0}")]
    LocalOutOfRange(u16),

    /// Global id outside the predefined set
    #[error("unknown global: {0}")]
    UnknownGlobal(u8),

    /// Field access on a value that has no such field
    #[error("missing property '{0}'")]
    MissingProperty(String),

    /// External function with no registered implementation
    #[error("external function '{0}' not implemented")]
    FunctionNotImplemented(String),

    /// Native function called with malformed arguments
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Integer arithmetic overflow inside a native function
    #[error("integer overflow")]
    IntegerOverflow,

    /// Division or modulo by zero inside a native function
    #[error("division by zero")]
    DivisionByZero,

    /// Execution finished without exactly one result value
    #[error("no result after script execution")]
    NoResult,

    /// A final value that is neither a boolean nor a list of actions
    #[error("invalid script result: {0}")]
    InvalidResult(&'static str),

    /// Dispatch-loop iteration limit exhausted
    #[error("step limit exceeded: {0}")]
    StepLimitExceeded(u64),

    /// Deliberate script-level failure
    #[error("script threw: {0}")]
    Throw(String),
}

impl VmError {
    /// True for the deliberate script-level failure, as opposed to a
    /// machine malfunction
    pub fn is_throw(&self) -> bool {
        matches!(self, Self::Throw(_))
    }
}

/// Result type for VM operations
pub type VmResult<T> = Result<T, VmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", VmError::StackUnderflow), "stack underflow");
        assert_eq!(
            format!("{}", VmError::UnknownOpcode(0xFE)),
            "unknown opcode: 0xfe"
        );
        assert_eq!(
            format!(
                "{}",
                VmError::TypeMismatch {
                    expected: "Boolean",
                    actual: "Int"
                }
            ),
            "type mismatch: expected Boolean, got Int"
        );
        assert_eq!(
            format!("{}", VmError::Throw("nope".to_string())),
            "script threw: nope"
        );
    }

    #[test]
    fn test_throw_is_distinguishable() {
        assert!(VmError::Throw("x".to_string()).is_throw());
        assert!(!VmError::StackUnderflow.is_throw());
        assert!(!VmError::NoResult.is_throw());
    }
}
