//! Compilation error types

use thiserror::Error;

/// Errors produced while compiling a tree into a program
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A constant pool outgrew its 16-bit index space
    #[error("constant pool overflow: {0}")]
    PoolOverflow(&'static str),

    /// Compiled code outgrew the 16-bit address space
    #[error("compiled code too large: {0} bytes")]
    CodeTooLarge(usize),

    /// A conditional branch target does not fit a 16-bit relative offset
    #[error("jump target out of range at position {0}")]
    JumpOutOfRange(usize),

    /// More call arguments than the encoding allows
    #[error("too many arguments in call of '{0}'")]
    TooManyArguments(String),

    /// A name that is neither a declaration in scope nor a predefined global
    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),

    /// A called function that is neither declared nor in the catalogue
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// The tree has no verifier expression to compile
    #[error("tree has no verifier")]
    MissingVerifier,

    /// A node that is not valid at this position in the tree
    #[error("unexpected node type: {0}")]
    UnexpectedNode(&'static str),

    /// Library version outside the supported range
    #[error(transparent)]
    Version(#[from] ride_costs::VersionError),
}

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;
