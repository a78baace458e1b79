//! # ride-lang
//!
//! Language core for the RIDE execution engine.
//!
//! This crate provides:
//! - The typed expression tree handed over by the parser
//! - The bytecode instruction set and compiled program model
//! - The compiler turning a tree into a linear program
//! - A disassembler for compiled programs

#![warn(missing_docs)]
#![warn(clippy::all)]

mod compiler;
mod disasm;
mod error;
mod opcode;
mod program;
mod tree;

pub use compiler::compile;
pub use disasm::disasm;
pub use error::{CompileError, CompileResult};
pub use opcode::Opcode;
pub use program::{ConstantRef, Declaration, Program, GLOBALS, MAX_POOL_SIZE};
pub use tree::{Node, Tree};
