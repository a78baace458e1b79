//! Estimation error types

use thiserror::Error;

/// Errors produced while estimating a program or tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// `Return` with no recorded call to come back to
    #[error("empty call stack on return")]
    EmptyCallStack,

    /// A branch marker with no estimation frame to attach to
    #[error("empty frame stack")]
    EmptyFrameStack,

    /// A byte that is not an opcode
    #[error("unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Walked off the end of the code without a halt
    #[error("broken byte code: no halt")]
    BrokenByteCode,

    /// Estimation frames or call records left over at halt
    #[error("unbalanced estimation state at halt")]
    UnbalancedFrames,

    /// An external-call id outside the catalogue
    #[error("unknown external function id {0}")]
    UnknownExternalId(u8),

    /// A called function that the catalogue does not know
    #[error("unresolved function '{0}'")]
    UnresolvedFunction(String),

    /// A node that is not a declaration in a declaration list
    #[error("invalid declaration node")]
    InvalidDeclaration,

    /// Library version outside the supported range
    #[error(transparent)]
    Version(#[from] ride_costs::VersionError),
}

/// Result type for estimation
pub type EstimationResult<T> = Result<T, EstimationError>;
