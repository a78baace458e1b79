//! Tree-to-bytecode compiler
//!
//! One recursive-descent pass over the tree. Declaration bodies (`let`
//! expressions and function bodies) are compiled into side streams that are
//! appended after the main stream's `Halt`, each terminated by `Return`;
//! `Load`/`Call` operands are patched to the final body addresses once the
//! layout is known.

use crate::error::{CompileError, CompileResult};
use crate::opcode::Opcode;
use crate::program::{ConstantRef, Declaration, Program, GLOBALS, MAX_POOL_SIZE};
use crate::tree::{Node, Tree};
use bytes::{BufMut, Bytes, BytesMut};
use ride_costs::{Catalogue, LibVersion};

/// Compile a tree's verifier (plus its script-level declarations) into a
/// program for the tree's library version.
pub fn compile(tree: &Tree) -> CompileResult<Program> {
    let version = LibVersion::try_from(tree.lib_version)?;
    let verifier = tree.verifier.as_ref().ok_or(CompileError::MissingVerifier)?;

    let mut compiler = Compiler::new(version);
    for declaration in &tree.declarations {
        compiler.declaration(Stream::Main, declaration)?;
    }
    compiler.node(Stream::Main, verifier)?;
    compiler.assemble()
}

/// Emission target: the main stream or one declaration body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Main,
    Decl(usize),
}

/// Name visible at the current point of the walk
enum Binding {
    Let { name: String, decl: usize },
    Func { name: String, decl: usize },
    Arg { name: String, slot: u16, owner: usize },
}

/// Reference resolution outcome
enum Resolved {
    Local(u16),
    Declared(usize),
    Global(u8),
}

/// A declaration body under construction
struct DeclBody {
    name: String,
    function: bool,
    parameters: u16,
    code: BytesMut,
}

/// A `Load`/`Call` operand awaiting the final body address
struct AddressPatch {
    stream: Stream,
    pos: usize,
    decl: usize,
}

struct Compiler {
    version: LibVersion,
    catalogue: Catalogue,
    main: BytesMut,
    decls: Vec<DeclBody>,
    longs: Vec<i64>,
    byte_pool: Vec<Bytes>,
    strings: Vec<String>,
    constants: Vec<ConstantRef>,
    scope: Vec<Binding>,
    fn_stack: Vec<usize>,
    patches: Vec<AddressPatch>,
}

impl Compiler {
    fn new(version: LibVersion) -> Self {
        Self {
            version,
            catalogue: Catalogue::for_version(version),
            main: BytesMut::new(),
            decls: Vec::new(),
            longs: Vec::new(),
            byte_pool: Vec::new(),
            strings: Vec::new(),
            constants: Vec::new(),
            scope: Vec::new(),
            fn_stack: Vec::new(),
            patches: Vec::new(),
        }
    }

    fn buf(&mut self, stream: Stream) -> &mut BytesMut {
        match stream {
            Stream::Main => &mut self.main,
            Stream::Decl(id) => &mut self.decls[id].code,
        }
    }

    fn op(&mut self, stream: Stream, opcode: Opcode) {
        self.buf(stream).put_u8(opcode as u8);
    }

    /// Register a constant: one slot in its typed pool, one entry in the
    /// unified index. No deduplication, every occurrence gets a fresh slot.
    fn add_constant(&mut self, entry: ConstantRef, pool: &'static str) -> CompileResult<u16> {
        if self.constants.len() >= MAX_POOL_SIZE {
            return Err(CompileError::PoolOverflow(pool));
        }
        self.constants.push(entry);
        Ok((self.constants.len() - 1) as u16)
    }

    fn add_long(&mut self, value: i64) -> CompileResult<u16> {
        self.longs.push(value);
        self.add_constant(ConstantRef::Long((self.longs.len() - 1) as u16), "long constants")
    }

    fn add_bytes(&mut self, value: &[u8]) -> CompileResult<u16> {
        self.byte_pool.push(Bytes::copy_from_slice(value));
        self.add_constant(
            ConstantRef::Bytes((self.byte_pool.len() - 1) as u16),
            "byte constants",
        )
    }

    fn add_string(&mut self, value: &str) -> CompileResult<u16> {
        self.strings.push(value.to_string());
        self.add_constant(
            ConstantRef::Str((self.strings.len() - 1) as u16),
            "string constants",
        )
    }

    /// Reserve a declaration body and record its metadata
    fn reserve_decl(&mut self, name: &str, function: bool, parameters: u16) -> CompileResult<usize> {
        if self.decls.len() >= MAX_POOL_SIZE {
            return Err(CompileError::PoolOverflow("declarations"));
        }
        self.decls.push(DeclBody {
            name: name.to_string(),
            function,
            parameters,
            code: BytesMut::new(),
        });
        Ok(self.decls.len() - 1)
    }

    /// Emit a 16-bit address operand to be patched at assembly time
    fn patch_later(&mut self, stream: Stream, decl: usize) {
        let pos = self.buf(stream).len();
        self.patches.push(AddressPatch { stream, pos, decl });
        self.buf(stream).put_u16(0);
    }

    /// Patch a relative jump operand at `pos` to land on the current position
    fn patch_jump(&mut self, stream: Stream, pos: usize) -> CompileResult<()> {
        let target = self.buf(stream).len();
        let offset = target - (pos + 2);
        if offset > i16::MAX as usize {
            return Err(CompileError::JumpOutOfRange(pos));
        }
        self.buf(stream)[pos..pos + 2].copy_from_slice(&(offset as u16).to_be_bytes());
        Ok(())
    }

    /// Compile a declaration and return the binding it introduces
    fn declaration(&mut self, stream: Stream, node: &Node) -> CompileResult<()> {
        let binding = match node {
            Node::Assignment {
                name, expression, ..
            } => {
                let decl = self.reserve_decl(name, false, 0)?;
                self.node(Stream::Decl(decl), expression)?;
                self.op(Stream::Decl(decl), Opcode::Return);
                let _ = self.add_string(name)?;
                self.op(stream, Opcode::Declare);
                Binding::Let {
                    name: name.clone(),
                    decl,
                }
            }
            Node::FunctionDeclaration {
                name,
                arguments,
                body,
                ..
            } => {
                let parameters = u16::try_from(arguments.len())
                    .map_err(|_| CompileError::TooManyArguments(name.clone()))?;
                let decl = self.reserve_decl(name, true, parameters)?;
                let base = self.scope.len();
                self.fn_stack.push(decl);
                for (slot, argument) in arguments.iter().enumerate() {
                    self.scope.push(Binding::Arg {
                        name: argument.clone(),
                        slot: slot as u16,
                        owner: decl,
                    });
                }
                self.node(Stream::Decl(decl), body)?;
                self.scope.truncate(base);
                self.fn_stack.pop();
                self.op(Stream::Decl(decl), Opcode::Return);
                let _ = self.add_string(name)?;
                self.op(stream, Opcode::Declare);
                Binding::Func {
                    name: name.clone(),
                    decl,
                }
            }
            _ => return Err(CompileError::UnexpectedNode("expected a declaration")),
        };
        self.scope.push(binding);
        Ok(())
    }

    fn node(&mut self, stream: Stream, node: &Node) -> CompileResult<()> {
        match node {
            Node::Long(value) => {
                let index = self.add_long(*value)?;
                self.op(stream, Opcode::Push);
                self.buf(stream).put_u16(index);
            }
            Node::Bytes(value) => {
                let index = self.add_bytes(value)?;
                self.op(stream, Opcode::Push);
                self.buf(stream).put_u16(index);
            }
            Node::String(value) => {
                let index = self.add_string(value)?;
                self.op(stream, Opcode::Push);
                self.buf(stream).put_u16(index);
            }
            Node::Boolean(true) => self.op(stream, Opcode::True),
            Node::Boolean(false) => self.op(stream, Opcode::False),
            Node::Conditional {
                condition,
                true_branch,
                false_branch,
            } => {
                self.node(stream, condition)?;
                self.op(stream, Opcode::JumpIfFalse);
                let on_false = self.buf(stream).len();
                self.buf(stream).put_u16(0);
                self.op(stream, Opcode::Pop);
                self.node(stream, true_branch)?;
                self.op(stream, Opcode::Jump);
                let past_false = self.buf(stream).len();
                self.buf(stream).put_u16(0);
                self.patch_jump(stream, on_false)?;
                self.op(stream, Opcode::Pop);
                self.node(stream, false_branch)?;
                self.patch_jump(stream, past_false)?;
            }
            Node::Assignment { block, .. } | Node::FunctionDeclaration { block, .. } => {
                self.declaration(stream, node)?;
                self.node(stream, block)?;
                self.scope.pop();
            }
            Node::Reference(name) => match self.resolve(name)? {
                Resolved::Local(slot) => {
                    self.op(stream, Opcode::LoadLocal);
                    self.buf(stream).put_u16(slot);
                }
                Resolved::Declared(decl) => {
                    self.op(stream, Opcode::Load);
                    self.patch_later(stream, decl);
                }
                Resolved::Global(id) => {
                    self.op(stream, Opcode::Global);
                    self.buf(stream).put_u8(id);
                }
            },
            Node::FunctionCall { name, arguments } => {
                for argument in arguments {
                    self.node(stream, argument)?;
                }
                let declared = self.scope.iter().rev().find_map(|binding| match binding {
                    Binding::Func { name: n, decl } if n == name => Some(*decl),
                    _ => None,
                });
                if let Some(decl) = declared {
                    let argc = u16::try_from(arguments.len())
                        .map_err(|_| CompileError::TooManyArguments(name.clone()))?;
                    self.op(stream, Opcode::Call);
                    self.patch_later(stream, decl);
                    self.buf(stream).put_u16(argc);
                } else if let Some(index) = self.catalogue.function_index(name) {
                    let id = u8::try_from(index)
                        .map_err(|_| CompileError::PoolOverflow("function table"))?;
                    let argc = u8::try_from(arguments.len())
                        .map_err(|_| CompileError::TooManyArguments(name.clone()))?;
                    self.op(stream, Opcode::ExternalCall);
                    self.buf(stream).put_u8(id);
                    self.buf(stream).put_u8(argc);
                } else {
                    return Err(CompileError::UnknownFunction(name.clone()));
                }
            }
            Node::Property { object, name } => {
                self.node(stream, object)?;
                let index = self.add_string(name)?;
                self.op(stream, Opcode::Property);
                self.buf(stream).put_u16(index);
            }
        }
        Ok(())
    }

    /// Resolve a referenced name against the lexical scope, then the globals
    fn resolve(&self, name: &str) -> CompileResult<Resolved> {
        for binding in self.scope.iter().rev() {
            match binding {
                Binding::Arg {
                    name: n,
                    slot,
                    owner,
                } if n == name => {
                    // arguments of an enclosing function are not addressable
                    // from a nested declaration body
                    if self.fn_stack.last() == Some(owner) {
                        return Ok(Resolved::Local(*slot));
                    }
                    return Err(CompileError::UnresolvedReference(name.to_string()));
                }
                Binding::Let { name: n, decl } if n == name => {
                    return Ok(Resolved::Declared(*decl));
                }
                _ => {}
            }
        }
        if let Some(id) = GLOBALS.iter().position(|&g| g == name) {
            return Ok(Resolved::Global(id as u8));
        }
        Err(CompileError::UnresolvedReference(name.to_string()))
    }

    /// Finish the main stream, lay out declaration bodies, apply address
    /// patches and freeze the program.
    fn assemble(mut self) -> CompileResult<Program> {
        self.main.put_u8(Opcode::Halt as u8);

        let mut starts = Vec::with_capacity(self.decls.len());
        let mut offset = self.main.len();
        for decl in &self.decls {
            starts.push(offset);
            offset += decl.code.len();
        }
        if offset > MAX_POOL_SIZE {
            return Err(CompileError::CodeTooLarge(offset));
        }

        for patch in &self.patches {
            let address = (starts[patch.decl] as u16).to_be_bytes();
            let buf = match patch.stream {
                Stream::Main => &mut self.main,
                Stream::Decl(id) => &mut self.decls[id].code,
            };
            buf[patch.pos..patch.pos + 2].copy_from_slice(&address);
        }

        let mut code = self.main;
        let mut declarations = Vec::with_capacity(self.decls.len());
        for (decl, start) in self.decls.into_iter().zip(starts) {
            code.extend_from_slice(&decl.code);
            declarations.push(Declaration {
                name: decl.name,
                start: start as u16,
                function: decl.function,
                parameters: decl.parameters,
            });
        }

        tracing::debug!(
            "compiled {} bytes of code, {} declarations",
            code.len(),
            declarations.len()
        );
        Ok(Program {
            code: code.freeze(),
            long_constants: self.longs,
            byte_constants: self.byte_pool,
            string_constants: self.strings,
            constants: self.constants,
            declarations,
            lib_version: self.version,
            entry_point: 0,
        })
    }
}
