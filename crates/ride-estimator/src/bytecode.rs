//! Bytecode estimator
//!
//! A single flat sweep over the instruction stream. Conditional branches are
//! walked inline in bytecode order; the frame stack keeps their costs apart
//! and folds in the more expensive one. Declaration bodies are walked on
//! first use by following `Load`/`Call` operands, then memoized.

use crate::error::{EstimationError, EstimationResult};
use crate::frame::{CallRecord, Frame};
use crate::weights::Weights;
use crate::Estimation;
use ride_costs::{Catalogue, LibVersion};
use ride_lang::{Opcode, Program};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Estimate the complexity of a compiled program.
///
/// `version` selects the weight table; `catalogue` prices external calls.
/// The two usually agree, but a program may be re-priced under a different
/// accounting version without recompiling.
pub fn estimate_program(
    program: &Program,
    version: LibVersion,
    catalogue: &Catalogue,
) -> EstimationResult<Estimation> {
    let mut walker = Walker {
        code: program.code.as_ref(),
        program,
        catalogue,
        weights: Weights::for_version(version),
        ip: program.entry_point as usize,
        total: 0,
        known: HashSet::new(),
        frames: Vec::new(),
        calls: Vec::new(),
        memoized: HashMap::new(),
        entered_blocks: HashSet::new(),
        blocks: HashSet::new(),
        functions: BTreeMap::new(),
    };
    walker.blocks = walker.scan_blocks()?;
    walker.run()?;
    tracing::debug!(
        "estimated complexity {} under version {}",
        walker.total,
        version.as_u8()
    );
    Ok(Estimation {
        complexity: walker.total,
        functions: walker.functions,
    })
}

struct Walker<'a> {
    code: &'a [u8],
    program: &'a Program,
    catalogue: &'a Catalogue,
    weights: Weights,
    ip: usize,
    /// Root accumulator, active when no frame is open
    total: u64,
    /// Root-scope known values, by body offset
    known: HashSet<usize>,
    frames: Vec<Frame>,
    calls: Vec<CallRecord>,
    /// Function body offset to flat repeat-call cost
    memoized: HashMap<usize, u64>,
    /// Declaration bodies already charged the block weight
    entered_blocks: HashSet<usize>,
    /// Declaration body starts: every position right after a terminator
    blocks: HashSet<usize>,
    /// Reported per-function body costs
    functions: BTreeMap<String, u64>,
}

impl Walker<'_> {
    /// Pre-pass: one linear sweep collecting declaration body starts and
    /// rejecting bytes that are not opcodes.
    fn scan_blocks(&self) -> EstimationResult<HashSet<usize>> {
        let mut blocks = HashSet::new();
        let mut ip = 0;
        while ip < self.code.len() {
            let opcode = Opcode::from_byte(self.code[ip])
                .ok_or(EstimationError::UnknownOpcode(self.code[ip]))?;
            let next = ip + 1 + opcode.operand_width();
            if next > self.code.len() {
                return Err(EstimationError::BrokenByteCode);
            }
            if opcode.is_terminator() && next < self.code.len() {
                blocks.insert(next);
            }
            ip = next;
        }
        Ok(blocks)
    }

    fn add(&mut self, cost: u64) {
        match self.frames.last_mut() {
            Some(frame) => frame.add(cost),
            None => self.total += cost,
        }
    }

    /// Fold a finished frame into its parent, merging its known values
    fn fold(&mut self, frame: Frame) {
        let cost = frame.get();
        match self.frames.last_mut() {
            Some(parent) => {
                parent.add(cost);
                parent.known.extend(frame.known);
            }
            None => {
                self.total += cost;
                self.known.extend(frame.known);
            }
        }
    }

    fn value_is_known(&self, start: usize) -> bool {
        self.frames.iter().any(|frame| frame.known.contains(&start))
            || self.known.contains(&start)
    }

    fn operand_u16(&self, pos: usize) -> EstimationResult<u16> {
        match (self.code.get(pos), self.code.get(pos + 1)) {
            (Some(&hi), Some(&lo)) => Ok(u16::from_be_bytes([hi, lo])),
            _ => Err(EstimationError::BrokenByteCode),
        }
    }

    fn run(&mut self) -> EstimationResult<()> {
        while self.ip < self.code.len() {
            // collapse every frame whose scope ends here
            while self
                .frames
                .last()
                .is_some_and(|frame| frame.next_instruction == Some(self.ip))
            {
                if let Some(frame) = self.frames.pop() {
                    self.fold(frame);
                }
            }
            // first arrival at a declaration body
            if self.weights.declaration_block > 0
                && self.blocks.contains(&self.ip)
                && self.entered_blocks.insert(self.ip)
            {
                self.add(self.weights.declaration_block);
            }

            let byte = self.code[self.ip];
            let opcode =
                Opcode::from_byte(byte).ok_or(EstimationError::UnknownOpcode(byte))?;
            match opcode {
                Opcode::Halt => {
                    if !self.frames.is_empty() || !self.calls.is_empty() {
                        return Err(EstimationError::UnbalancedFrames);
                    }
                    return Ok(());
                }
                Opcode::Return => {
                    let record = self.calls.pop().ok_or(EstimationError::EmptyCallStack)?;
                    let frame = self.frames.pop().ok_or(EstimationError::EmptyFrameStack)?;
                    let cost = frame.get();
                    self.fold(frame);
                    if record.function {
                        let surcharge = record.arg_count * self.weights.call_argument;
                        self.add(surcharge);
                        self.memoized.insert(record.start, surcharge);
                        if let Some(decl) = self.program.declaration_at(record.start as u16) {
                            self.functions.insert(decl.name.clone(), cost);
                        }
                    } else {
                        match self.frames.last_mut() {
                            Some(frame) => frame.known.insert(record.start),
                            None => self.known.insert(record.start),
                        };
                    }
                    self.ip = record.ret;
                }
                Opcode::Push => {
                    self.add(self.weights.constant);
                    self.ip += 3;
                }
                Opcode::Pop => {
                    self.ip += 1;
                }
                Opcode::True | Opcode::False => {
                    self.add(self.weights.constant);
                    self.ip += 1;
                }
                Opcode::Jump => {
                    let offset = self.operand_u16(self.ip + 1)? as usize;
                    let frame = self
                        .frames
                        .last_mut()
                        .ok_or(EstimationError::EmptyFrameStack)?;
                    frame.alternative = true;
                    frame.next_instruction = Some(self.ip + 3 + offset);
                    self.ip += 3;
                }
                Opcode::JumpIfFalse => {
                    self.add(self.weights.conditional);
                    self.frames.push(Frame::new());
                    self.ip += 3;
                }
                Opcode::Property => {
                    self.add(self.weights.property);
                    self.ip += 3;
                }
                Opcode::ExternalCall => {
                    let id = self
                        .code
                        .get(self.ip + 1)
                        .copied()
                        .ok_or(EstimationError::BrokenByteCode)?;
                    let name = self
                        .catalogue
                        .function_at(id as usize)
                        .ok_or(EstimationError::UnknownExternalId(id))?;
                    let cost = self
                        .catalogue
                        .cost(name)
                        .ok_or_else(|| EstimationError::UnresolvedFunction(name.to_string()))?;
                    self.add(cost);
                    self.ip += 3;
                }
                Opcode::Call => {
                    let start = self.operand_u16(self.ip + 1)? as usize;
                    let arg_count = self.operand_u16(self.ip + 3)? as u64;
                    if let Some(&surcharge) = self.memoized.get(&start) {
                        self.add(surcharge);
                        self.ip += 5;
                    } else {
                        self.frames.push(Frame::new());
                        self.calls.push(CallRecord {
                            start,
                            ret: self.ip + 5,
                            function: true,
                            arg_count,
                        });
                        self.ip = start;
                    }
                }
                Opcode::Global => {
                    self.add(self.weights.global);
                    self.ip += 2;
                }
                Opcode::Load => {
                    self.add(self.weights.reference);
                    let start = self.operand_u16(self.ip + 1)? as usize;
                    if self.value_is_known(start) {
                        self.ip += 3;
                    } else {
                        self.frames.push(Frame::new());
                        self.calls.push(CallRecord {
                            start,
                            ret: self.ip + 3,
                            function: false,
                            arg_count: 0,
                        });
                        self.ip = start;
                    }
                }
                Opcode::LoadLocal => {
                    self.add(self.weights.local);
                    self.ip += 3;
                }
                Opcode::Declare => {
                    self.ip += 1;
                }
            }
        }
        Err(EstimationError::BrokenByteCode)
    }
}
