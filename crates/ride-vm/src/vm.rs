//! Bytecode interpreter
//!
//! A single dispatch loop over an operand stack and a call-frame stack.
//! `Load` and `Call` operands are code addresses: both push a frame and jump
//! into a declaration body, whose `Return` comes back with the computed
//! value on the operand stack. Declared values are re-evaluated lazily on
//! every use; function arguments live in slot-indexed frame locals, and
//! value frames inherit the locals in force where the reference occurs.

use crate::env::Environment;
use crate::error::{VmError, VmResult};
use crate::natives::FunctionTable;
use crate::result::RideResult;
use crate::value::Value;
use ride_lang::{ConstantRef, Opcode, Program, GLOBALS};

/// One call frame: where to resume, and the callee's arguments
#[derive(Debug)]
struct Frame {
    return_address: usize,
    locals: Vec<Value>,
}

/// Interpreter state for one run
pub struct Vm<'a> {
    program: &'a Program,
    functions: &'a FunctionTable,
    env: &'a dyn Environment,
    stack: Vec<Value>,
    frames: Vec<Frame>,
    ip: usize,
    step_limit: u64,
}

impl<'a> Vm<'a> {
    /// Create an interpreter over a compiled program.
    ///
    /// Scripts are adversarial input: the dispatch loop counts iterations
    /// against a step limit so a caller can bound a run regardless of what
    /// estimation promised.
    pub fn new(
        program: &'a Program,
        functions: &'a FunctionTable,
        env: &'a dyn Environment,
    ) -> Self {
        Self {
            program,
            functions,
            env,
            stack: Vec::new(),
            frames: vec![Frame {
                return_address: program.code.len(),
                locals: Vec::new(),
            }],
            ip: program.entry_point as usize,
            step_limit: u64::MAX,
        }
    }

    /// Bound the number of dispatch-loop iterations
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = limit;
        self
    }

    /// Execute to a terminal result
    pub fn run(mut self) -> VmResult<RideResult> {
        let value = self.execute()?;
        tracing::debug!("script execution finished with a {}", value.type_name());
        RideResult::from_value(value)
    }

    fn pop(&mut self) -> VmResult<Value> {
        self.stack.pop().ok_or(VmError::StackUnderflow)
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn operand_u16(&self, pos: usize) -> VmResult<u16> {
        let code = self.program.code.as_ref();
        match (code.get(pos), code.get(pos + 1)) {
            (Some(&hi), Some(&lo)) => Ok(u16::from_be_bytes([hi, lo])),
            _ => Err(VmError::TruncatedCode(pos)),
        }
    }

    fn operand_u8(&self, pos: usize) -> VmResult<u8> {
        self.program
            .code
            .get(pos)
            .copied()
            .ok_or(VmError::TruncatedCode(pos))
    }

    fn jump_to(&mut self, target: usize) -> VmResult<()> {
        if target > self.program.code.len() {
            return Err(VmError::InvalidJump(target));
        }
        self.ip = target;
        Ok(())
    }

    fn execute(&mut self) -> VmResult<Value> {
        let code = self.program.code.clone();
        let code = code.as_ref();
        let mut steps: u64 = 0;

        while self.ip < code.len() {
            steps += 1;
            if steps > self.step_limit {
                return Err(VmError::StepLimitExceeded(self.step_limit));
            }

            let byte = code[self.ip];
            let opcode = Opcode::from_byte(byte).ok_or(VmError::UnknownOpcode(byte))?;
            match opcode {
                Opcode::Push => {
                    let index = self.operand_u16(self.ip + 1)?;
                    let value = self.constant(index)?;
                    self.push(value);
                    self.ip += 3;
                }
                Opcode::Pop => {
                    self.pop()?;
                    self.ip += 1;
                }
                Opcode::True => {
                    self.push(Value::Boolean(true));
                    self.ip += 1;
                }
                Opcode::False => {
                    self.push(Value::Boolean(false));
                    self.ip += 1;
                }
                Opcode::Jump => {
                    let offset = self.operand_u16(self.ip + 1)? as i16;
                    self.relative_jump(offset)?;
                }
                Opcode::JumpIfFalse => {
                    // peek, do not pop: the compiler emits an explicit Pop at
                    // the head of both branches
                    let condition = match self.stack.last() {
                        Some(Value::Boolean(condition)) => *condition,
                        Some(other) => {
                            return Err(VmError::TypeMismatch {
                                expected: "Boolean",
                                actual: other.type_name(),
                            })
                        }
                        None => return Err(VmError::StackUnderflow),
                    };
                    if condition {
                        self.ip += 3;
                    } else {
                        let offset = self.operand_u16(self.ip + 1)? as i16;
                        self.relative_jump(offset)?;
                    }
                }
                Opcode::Property => {
                    let index = self.operand_u16(self.ip + 1)?;
                    let field = self
                        .program
                        .constant_string(index)
                        .ok_or(VmError::ConstantOutOfRange(index))?;
                    let object = self.pop()?;
                    let Value::Object(fields) = &object else {
                        return Err(VmError::TypeMismatch {
                            expected: "Object",
                            actual: object.type_name(),
                        });
                    };
                    let value = fields
                        .get(field)
                        .cloned()
                        .ok_or_else(|| VmError::MissingProperty(field.to_string()))?;
                    self.push(value);
                    self.ip += 3;
                }
                Opcode::Call => {
                    let target = self.operand_u16(self.ip + 1)? as usize;
                    let arg_count = self.operand_u16(self.ip + 3)? as usize;
                    let mut locals = Vec::with_capacity(arg_count);
                    for _ in 0..arg_count {
                        locals.push(self.pop()?);
                    }
                    locals.reverse();
                    self.frames.push(Frame {
                        return_address: self.ip + 5,
                        locals,
                    });
                    self.jump_to(target)?;
                }
                Opcode::ExternalCall => {
                    let id = self.operand_u8(self.ip + 1)?;
                    let arg_count = self.operand_u8(self.ip + 2)? as usize;
                    let mut args = Vec::with_capacity(arg_count);
                    for _ in 0..arg_count {
                        args.push(self.pop()?);
                    }
                    args.reverse();
                    let value = self.functions.invoke(id, self.env, args)?;
                    self.push(value);
                    self.ip += 3;
                }
                Opcode::Load => {
                    let target = self.operand_u16(self.ip + 1)? as usize;
                    // a value frame inherits the caller's locals: a `let`
                    // nested in a function body may read that function's
                    // arguments
                    let locals = self
                        .frames
                        .last()
                        .map(|frame| frame.locals.clone())
                        .unwrap_or_default();
                    self.frames.push(Frame {
                        return_address: self.ip + 3,
                        locals,
                    });
                    self.jump_to(target)?;
                }
                Opcode::LoadLocal => {
                    let slot = self.operand_u16(self.ip + 1)?;
                    let frame = self.frames.last().ok_or(VmError::CallStackUnderflow)?;
                    let value = frame
                        .locals
                        .get(slot as usize)
                        .cloned()
                        .ok_or(VmError::LocalOutOfRange(slot))?;
                    self.push(value);
                    self.ip += 3;
                }
                Opcode::Return => {
                    let frame = self.frames.pop().ok_or(VmError::CallStackUnderflow)?;
                    self.ip = frame.return_address;
                }
                Opcode::Halt => break,
                Opcode::Global => {
                    let id = self.operand_u8(self.ip + 1)?;
                    let value = match GLOBALS.get(id as usize).copied() {
                        Some("height") => Value::Int(self.env.height()),
                        Some("tx") => self.env.transaction(),
                        Some("this") => self.env.this_contract(),
                        Some("lastBlock") => self.env.last_block(),
                        _ => return Err(VmError::UnknownGlobal(id)),
                    };
                    self.push(value);
                    self.ip += 2;
                }
                Opcode::Declare => {
                    self.ip += 1;
                }
            }
        }

        if self.stack.len() != 1 {
            return Err(VmError::NoResult);
        }
        self.pop()
    }

    fn relative_jump(&mut self, offset: i16) -> VmResult<()> {
        let base = (self.ip + 3) as i64;
        let target = base + offset as i64;
        if target < 0 {
            return Err(VmError::InvalidJump(0));
        }
        self.jump_to(target as usize)
    }

    fn constant(&self, index: u16) -> VmResult<Value> {
        let entry = self
            .program
            .constant(index)
            .ok_or(VmError::ConstantOutOfRange(index))?;
        let value = match entry {
            ConstantRef::Long(slot) => self.program.long_at(slot).map(Value::Int),
            ConstantRef::Bytes(slot) => self.program.bytes_at(slot).cloned().map(Value::Bytes),
            ConstantRef::Str(slot) => self
                .program
                .string_at(slot)
                .map(|s| Value::String(s.to_string())),
        };
        value.ok_or(VmError::ConstantOutOfRange(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NullEnvironment;
    use bytes::Bytes;
    use ride_costs::LibVersion;
    use ride_lang::{compile, Node, Tree};

    fn run(node: Node) -> VmResult<RideResult> {
        let program = compile(&Tree::expression(3, node)).unwrap();
        let functions = FunctionTable::for_version(LibVersion::V3);
        Vm::new(&program, &functions, &NullEnvironment).run()
    }

    fn raw(code: &[u8]) -> VmResult<RideResult> {
        let program = Program {
            code: Bytes::copy_from_slice(code),
            long_constants: Vec::new(),
            byte_constants: Vec::new(),
            string_constants: Vec::new(),
            constants: Vec::new(),
            declarations: Vec::new(),
            lib_version: LibVersion::V3,
            entry_point: 0,
        };
        let functions = FunctionTable::for_version(LibVersion::V3);
        Vm::new(&program, &functions, &NullEnvironment).run()
    }

    #[test]
    fn test_constant_true() {
        assert_eq!(run(Node::Boolean(true)), Ok(RideResult::ScriptResult(true)));
        assert_eq!(
            run(Node::Boolean(false)),
            Ok(RideResult::ScriptResult(false))
        );
    }

    #[test]
    fn test_conditional_picks_branch() {
        let script = |condition| {
            Node::conditional(
                Node::Boolean(condition),
                Node::Boolean(true),
                Node::Boolean(false),
            )
        };
        assert_eq!(run(script(true)), Ok(RideResult::ScriptResult(true)));
        assert_eq!(run(script(false)), Ok(RideResult::ScriptResult(false)));
    }

    #[test]
    fn test_let_is_lazy_and_reusable() {
        // `let x = 1 + 1; x == 2`
        let node = Node::assignment(
            "x",
            Node::call("100", vec![Node::Long(1), Node::Long(1)]),
            Node::call("0", vec![Node::reference("x"), Node::Long(2)]),
        );
        assert_eq!(run(node), Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_unused_let_with_failing_body_never_runs() {
        // laziness: the bound expression would throw if evaluated
        let node = Node::assignment(
            "boom",
            Node::call("throw", vec![]),
            Node::Boolean(true),
        );
        assert_eq!(run(node), Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_function_call_binds_arguments() {
        // `func second(a, b) = b; second(1, 2) == 2`
        let node = Node::function(
            "second",
            vec!["a", "b"],
            Node::reference("b"),
            Node::call(
                "0",
                vec![
                    Node::call("second", vec![Node::Long(1), Node::Long(2)]),
                    Node::Long(2),
                ],
            ),
        );
        assert_eq!(run(node), Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_let_inside_function_body_sees_arguments() {
        // `func f(a) = { let t = a + 1; t == 3 }; f(2)`
        let node = Node::function(
            "f",
            vec!["a"],
            Node::assignment(
                "t",
                Node::call("100", vec![Node::reference("a"), Node::Long(1)]),
                Node::call("0", vec![Node::reference("t"), Node::Long(3)]),
            ),
            Node::call("f", vec![Node::Long(2)]),
        );
        assert_eq!(run(node), Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_throw_surfaces_as_script_failure() {
        let node = Node::call("2", vec![Node::String("rejected".into())]);
        let result = run(node);
        assert_eq!(result, Err(VmError::Throw("rejected".to_string())));
        assert!(result.unwrap_err().is_throw());
    }

    #[test]
    fn test_property_reads_object_field() {
        // `tx.amount == 100` against an environment exposing a transaction
        struct TxEnv;
        impl Environment for TxEnv {
            fn height(&self) -> i64 {
                0
            }
            fn transaction(&self) -> Value {
                Value::object([("amount", Value::Int(100))])
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
        let node = Node::call(
            "0",
            vec![
                Node::property(Node::reference("tx"), "amount"),
                Node::Long(100),
            ],
        );
        let program = compile(&Tree::expression(3, node)).unwrap();
        let functions = FunctionTable::for_version(LibVersion::V3);
        let result = Vm::new(&program, &functions, &TxEnv).run();
        assert_eq!(result, Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_missing_property_is_fatal() {
        struct TxEnv;
        impl Environment for TxEnv {
            fn height(&self) -> i64 {
                0
            }
            fn transaction(&self) -> Value {
                Value::object([("amount", Value::Int(100))])
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
        let node = Node::call(
            "0",
            vec![
                Node::property(Node::reference("tx"), "fee"),
                Node::Long(100),
            ],
        );
        let program = compile(&Tree::expression(3, node)).unwrap();
        let functions = FunctionTable::for_version(LibVersion::V3);
        let result = Vm::new(&program, &functions, &TxEnv).run();
        assert_eq!(result, Err(VmError::MissingProperty("fee".to_string())));
    }

    #[test]
    fn test_height_global() {
        let node = Node::call("0", vec![Node::reference("height"), Node::Long(0)]);
        assert_eq!(run(node), Ok(RideResult::ScriptResult(true)));
    }

    #[test]
    fn test_jump_if_false_requires_boolean() {
        let node = Node::conditional(Node::Long(1), Node::Boolean(true), Node::Boolean(false));
        assert_eq!(
            run(node),
            Err(VmError::TypeMismatch {
                expected: "Boolean",
                actual: "Int"
            })
        );
    }

    #[test]
    fn test_pop_on_empty_stack() {
        assert_eq!(
            raw(&[Opcode::Pop as u8, Opcode::Halt as u8]),
            Err(VmError::StackUnderflow)
        );
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(raw(&[0xEE]), Err(VmError::UnknownOpcode(0xEE)));
    }

    #[test]
    fn test_no_result_when_stack_is_empty() {
        assert_eq!(raw(&[Opcode::Halt as u8]), Err(VmError::NoResult));
    }

    #[test]
    fn test_no_result_when_stack_holds_two_values() {
        assert_eq!(
            raw(&[Opcode::True as u8, Opcode::True as u8, Opcode::Halt as u8]),
            Err(VmError::NoResult)
        );
    }

    #[test]
    fn test_non_boolean_result_is_invalid() {
        let result = run(Node::Long(1));
        assert_eq!(
            result,
            Err(VmError::InvalidResult(
                "expected a boolean or a list of actions"
            ))
        );
    }

    #[test]
    fn test_step_limit_bounds_execution() {
        let program = compile(&Tree::expression(3, Node::Boolean(true))).unwrap();
        let functions = FunctionTable::for_version(LibVersion::V3);
        let result = Vm::new(&program, &functions, &NullEnvironment)
            .with_step_limit(1)
            .run();
        assert_eq!(result, Err(VmError::StepLimitExceeded(1)));
    }

    #[test]
    fn test_local_slot_out_of_range() {
        // the global frame has no locals to read
        assert_eq!(
            raw(&[Opcode::LoadLocal as u8, 0, 0, Opcode::Halt as u8]),
            Err(VmError::LocalOutOfRange(0))
        );
    }

    #[test]
    fn test_return_from_global_frame_ends_the_run() {
        // frame 0's return address is the end of the code
        assert_eq!(
            raw(&[Opcode::True as u8, Opcode::Return as u8, Opcode::False as u8]),
            Ok(RideResult::ScriptResult(true))
        );
    }
}
