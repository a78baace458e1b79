//! Bytecode instruction set
//!
//! Every multi-byte operand is big-endian and every opcode has a fixed
//! operand width, so the estimator and the VM advance the instruction
//! pointer from the opcode byte alone.

/// Bytecode opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Push a constant; operand: 16-bit pool index
    Push = 0,
    /// Discard the top of the operand stack
    Pop = 1,
    /// Push boolean `true`
    True = 2,
    /// Push boolean `false`
    False = 3,
    /// Unconditional forward jump; operand: 16-bit relative offset
    Jump = 4,
    /// Jump if the top of the stack is `false`; operand: 16-bit relative offset
    JumpIfFalse = 5,
    /// Field access; operand: 16-bit string-constant index
    Property = 6,
    /// Call a declared function; operands: 16-bit body address, 16-bit argument count
    Call = 7,
    /// Call a catalogue function; operands: 8-bit function id, 8-bit argument count
    ExternalCall = 8,
    /// Evaluate a declared value; operand: 16-bit body address
    Load = 9,
    /// Read a function argument; operand: 16-bit local slot
    LoadLocal = 10,
    /// Return from a declaration body to the stored position
    Return = 11,
    /// Halt program execution
    Halt = 12,
    /// Push a predefined global; operand: 8-bit global id
    Global = 13,
    /// Block-declaration marker, no operands, no effect at run time
    Declare = 14,
}

impl Opcode {
    /// Try to convert from byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Push),
            1 => Some(Self::Pop),
            2 => Some(Self::True),
            3 => Some(Self::False),
            4 => Some(Self::Jump),
            5 => Some(Self::JumpIfFalse),
            6 => Some(Self::Property),
            7 => Some(Self::Call),
            8 => Some(Self::ExternalCall),
            9 => Some(Self::Load),
            10 => Some(Self::LoadLocal),
            11 => Some(Self::Return),
            12 => Some(Self::Halt),
            13 => Some(Self::Global),
            14 => Some(Self::Declare),
            _ => None,
        }
    }

    /// Operand width in bytes following the opcode byte
    pub fn operand_width(self) -> usize {
        match self {
            Self::Push
            | Self::Jump
            | Self::JumpIfFalse
            | Self::Property
            | Self::Load
            | Self::LoadLocal => 2,
            Self::Call => 4,
            Self::ExternalCall => 2,
            Self::Global => 1,
            Self::Pop
            | Self::True
            | Self::False
            | Self::Return
            | Self::Halt
            | Self::Declare => 0,
        }
    }

    /// True for opcodes that end a linear block of code
    pub fn is_terminator(self) -> bool {
        matches!(self, Self::Return | Self::Halt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_byte_values() {
        assert_eq!(Opcode::Push as u8, 0);
        assert_eq!(Opcode::Pop as u8, 1);
        assert_eq!(Opcode::True as u8, 2);
        assert_eq!(Opcode::False as u8, 3);
        assert_eq!(Opcode::Jump as u8, 4);
        assert_eq!(Opcode::JumpIfFalse as u8, 5);
        assert_eq!(Opcode::Property as u8, 6);
        assert_eq!(Opcode::Call as u8, 7);
        assert_eq!(Opcode::ExternalCall as u8, 8);
        assert_eq!(Opcode::Load as u8, 9);
        assert_eq!(Opcode::LoadLocal as u8, 10);
        assert_eq!(Opcode::Return as u8, 11);
        assert_eq!(Opcode::Halt as u8, 12);
        assert_eq!(Opcode::Global as u8, 13);
        assert_eq!(Opcode::Declare as u8, 14);
    }

    #[test]
    fn test_from_byte_roundtrip() {
        for byte in 0u8..=14 {
            let opcode = Opcode::from_byte(byte).unwrap();
            assert_eq!(opcode as u8, byte);
        }
        assert_eq!(Opcode::from_byte(15), None);
        assert_eq!(Opcode::from_byte(0xFF), None);
    }

    #[test]
    fn test_operand_widths() {
        assert_eq!(Opcode::Push.operand_width(), 2);
        assert_eq!(Opcode::Call.operand_width(), 4);
        assert_eq!(Opcode::ExternalCall.operand_width(), 2);
        assert_eq!(Opcode::Global.operand_width(), 1);
        assert_eq!(Opcode::Halt.operand_width(), 0);
        assert_eq!(Opcode::Declare.operand_width(), 0);
    }

    #[test]
    fn test_terminators() {
        assert!(Opcode::Return.is_terminator());
        assert!(Opcode::Halt.is_terminator());
        assert!(!Opcode::Jump.is_terminator());
    }
}
