//! Compiled program model

use bytes::Bytes;
use ride_costs::LibVersion;

/// Hard cap on every constant pool: indices are encoded in 16 bits
pub const MAX_POOL_SIZE: usize = u16::MAX as usize;

/// Predefined globals addressable by the `Global` opcode, in id order
pub const GLOBALS: &[&str] = &["height", "tx", "this", "lastBlock"];

/// Routing entry of the unified constant index: which typed pool a
/// registered constant lives in, and at which slot.
///
/// `Push` and `Property` operands index this table in registration order;
/// the typed pools keep values of one kind each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantRef {
    /// Slot in the integer pool
    Long(u16),
    /// Slot in the byte-vector pool
    Bytes(u16),
    /// Slot in the string pool
    Str(u16),
}

/// A declaration compiled into the program: a `let` body or a function body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name
    pub name: String,
    /// Offset of the body's first instruction
    pub start: u16,
    /// True for function declarations, false for `let` values
    pub function: bool,
    /// Number of parameters of a function declaration
    pub parameters: u16,
}

/// The compiled artifact: linear bytecode plus constant pools.
///
/// A program is immutable once built and cheap to share read-only between
/// estimation and execution runs; `code` is a reference-counted byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Executable bytecode
    pub code: Bytes,
    /// Integer constant pool
    pub long_constants: Vec<i64>,
    /// Byte-vector constant pool
    pub byte_constants: Vec<Bytes>,
    /// String constant pool
    pub string_constants: Vec<String>,
    /// Unified constant index, in registration order
    pub constants: Vec<ConstantRef>,
    /// Compiled declarations, in source order
    pub declarations: Vec<Declaration>,
    /// Library version the script was compiled against
    pub lib_version: LibVersion,
    /// Offset execution starts at
    pub entry_point: u16,
}

impl Program {
    /// Integer constant at a typed pool slot
    pub fn long_at(&self, slot: u16) -> Option<i64> {
        self.long_constants.get(slot as usize).copied()
    }

    /// Byte-vector constant at a typed pool slot
    pub fn bytes_at(&self, slot: u16) -> Option<&Bytes> {
        self.byte_constants.get(slot as usize)
    }

    /// String constant at a typed pool slot
    pub fn string_at(&self, slot: u16) -> Option<&str> {
        self.string_constants.get(slot as usize).map(String::as_str)
    }

    /// Routing entry behind a unified constant index
    pub fn constant(&self, index: u16) -> Option<ConstantRef> {
        self.constants.get(index as usize).copied()
    }

    /// String behind a unified constant index, if it routes to the string pool
    pub fn constant_string(&self, index: u16) -> Option<&str> {
        match self.constant(index)? {
            ConstantRef::Str(slot) => self.string_at(slot),
            _ => None,
        }
    }

    /// Declaration whose body starts at the given offset
    pub fn declaration_at(&self, start: u16) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.start == start)
    }
}
