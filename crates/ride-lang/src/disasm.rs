//! Program disassembler
//!
//! Renders one instruction per line with resolved constant-pool values,
//! for debugging and test diagnostics.

use crate::opcode::Opcode;
use crate::program::{ConstantRef, Program, GLOBALS};
use std::fmt::Write;

/// Disassemble a program's bytecode into a readable listing.
///
/// Unknown opcode bytes terminate the listing with a `??` line rather than
/// failing: the disassembler is a diagnostic tool, not a validator.
pub fn disasm(program: &Program) -> String {
    let code = program.code.as_ref();
    let mut out = String::new();
    let mut ip = 0;
    while ip < code.len() {
        let byte = code[ip];
        let Some(opcode) = Opcode::from_byte(byte) else {
            let _ = writeln!(out, "{ip:04x} ?? 0x{byte:02x}");
            break;
        };
        let _ = write!(out, "{ip:04x} {}", mnemonic(opcode));
        match opcode {
            Opcode::Push => {
                let index = read_u16(code, ip + 1);
                let _ = write!(out, " {index}");
                match program.constant(index) {
                    Some(ConstantRef::Long(slot)) => {
                        if let Some(value) = program.long_at(slot) {
                            let _ = write!(out, " ; long {value}");
                        }
                    }
                    Some(ConstantRef::Str(slot)) => {
                        if let Some(value) = program.string_at(slot) {
                            let _ = write!(out, " ; string {value:?}");
                        }
                    }
                    Some(ConstantRef::Bytes(slot)) => {
                        if let Some(value) = program.bytes_at(slot) {
                            let _ = write!(out, " ; bytes 0x{}", to_hex(value));
                        }
                    }
                    None => {}
                }
            }
            Opcode::Jump | Opcode::JumpIfFalse => {
                let offset = read_u16(code, ip + 1);
                let _ = write!(out, " +{offset} -> {:04x}", ip + 3 + offset as usize);
            }
            Opcode::Property => {
                let index = read_u16(code, ip + 1);
                match program.constant_string(index) {
                    Some(name) => {
                        let _ = write!(out, " {name:?}");
                    }
                    None => {
                        let _ = write!(out, " {index}");
                    }
                }
            }
            Opcode::Call => {
                let address = read_u16(code, ip + 1);
                let argc = read_u16(code, ip + 3);
                let _ = write!(out, " {address:04x} argc={argc}");
                if let Some(decl) = program.declaration_at(address) {
                    let _ = write!(out, " ; {}", decl.name);
                }
            }
            Opcode::ExternalCall => {
                let id = code.get(ip + 1).copied().unwrap_or(0);
                let argc = code.get(ip + 2).copied().unwrap_or(0);
                let _ = write!(out, " {id} argc={argc}");
            }
            Opcode::Load => {
                let address = read_u16(code, ip + 1);
                let _ = write!(out, " {address:04x}");
                if let Some(decl) = program.declaration_at(address) {
                    let _ = write!(out, " ; {}", decl.name);
                }
            }
            Opcode::LoadLocal => {
                let _ = write!(out, " {}", read_u16(code, ip + 1));
            }
            Opcode::Global => {
                let id = code.get(ip + 1).copied().unwrap_or(0) as usize;
                match GLOBALS.get(id) {
                    Some(name) => {
                        let _ = write!(out, " {name}");
                    }
                    None => {
                        let _ = write!(out, " {id}");
                    }
                }
            }
            _ => {}
        }
        out.push('\n');
        ip += 1 + opcode.operand_width();
    }
    out
}

fn mnemonic(opcode: Opcode) -> &'static str {
    match opcode {
        Opcode::Push => "PUSH",
        Opcode::Pop => "POP",
        Opcode::True => "TRUE",
        Opcode::False => "FALSE",
        Opcode::Jump => "JUMP",
        Opcode::JumpIfFalse => "JUMP_IF_FALSE",
        Opcode::Property => "PROPERTY",
        Opcode::Call => "CALL",
        Opcode::ExternalCall => "EXTERNAL_CALL",
        Opcode::Load => "LOAD",
        Opcode::LoadLocal => "LOAD_LOCAL",
        Opcode::Return => "RETURN",
        Opcode::Halt => "HALT",
        Opcode::Global => "GLOBAL",
        Opcode::Declare => "DECLARE",
    }
}

fn read_u16(code: &[u8], pos: usize) -> u16 {
    match (code.get(pos), code.get(pos + 1)) {
        (Some(&hi), Some(&lo)) => u16::from_be_bytes([hi, lo]),
        _ => 0,
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
