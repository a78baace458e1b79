//! Expression tree handed over by the parser
//!
//! The parser owns deserialization of script bytes; this crate only consumes
//! the resulting tree. The compiler and the tree estimator each borrow a tree
//! read-only for one full traversal.

/// A single expression tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// 64-bit integer literal
    Long(i64),
    /// Byte vector literal
    Bytes(Vec<u8>),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// `if condition then true_branch else false_branch`
    Conditional {
        /// Condition expression, must evaluate to a boolean
        condition: Box<Node>,
        /// Branch taken on `true`
        true_branch: Box<Node>,
        /// Branch taken on `false`
        false_branch: Box<Node>,
    },
    /// `let name = expression; block`
    Assignment {
        /// Declared name
        name: String,
        /// Bound expression, evaluated lazily on reference
        expression: Box<Node>,
        /// Expression the declaration is visible in
        block: Box<Node>,
    },
    /// Use of a declared name or predefined global
    Reference(String),
    /// `func name(arguments) = body; block`
    FunctionDeclaration {
        /// Declared function name
        name: String,
        /// Parameter names, in declaration order
        arguments: Vec<String>,
        /// Function body
        body: Box<Node>,
        /// Expression the declaration is visible in
        block: Box<Node>,
    },
    /// Call of a declared or catalogue function
    FunctionCall {
        /// Function identifier: a declared name, a user/intrinsic name, or a
        /// decimal native id
        name: String,
        /// Argument expressions, left to right
        arguments: Vec<Node>,
    },
    /// Field access on an object value
    Property {
        /// Object expression
        object: Box<Node>,
        /// Field name
        name: String,
    },
}

impl Node {
    /// Shorthand for a boxed conditional
    pub fn conditional(condition: Node, true_branch: Node, false_branch: Node) -> Node {
        Node::Conditional {
            condition: Box::new(condition),
            true_branch: Box::new(true_branch),
            false_branch: Box::new(false_branch),
        }
    }

    /// Shorthand for a boxed `let`
    pub fn assignment(name: impl Into<String>, expression: Node, block: Node) -> Node {
        Node::Assignment {
            name: name.into(),
            expression: Box::new(expression),
            block: Box::new(block),
        }
    }

    /// Shorthand for a boxed function declaration
    pub fn function(
        name: impl Into<String>,
        arguments: Vec<&str>,
        body: Node,
        block: Node,
    ) -> Node {
        Node::FunctionDeclaration {
            name: name.into(),
            arguments: arguments.into_iter().map(String::from).collect(),
            body: Box::new(body),
            block: Box::new(block),
        }
    }

    /// Shorthand for a function call
    pub fn call(name: impl Into<String>, arguments: Vec<Node>) -> Node {
        Node::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    /// Shorthand for a reference
    pub fn reference(name: impl Into<String>) -> Node {
        Node::Reference(name.into())
    }

    /// Shorthand for a property access
    pub fn property(object: Node, name: impl Into<String>) -> Node {
        Node::Property {
            object: Box::new(object),
            name: name.into(),
        }
    }
}

/// Parsed script: version metadata plus expression trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Library version the script was written against
    pub lib_version: u8,
    /// Content digest of the original script bytes, for cache lookups
    pub digest: Option<[u8; 32]>,
    /// Script-level declarations shared by all entry points
    pub declarations: Vec<Node>,
    /// Callable entry points of a contract script
    pub functions: Vec<Node>,
    /// Verifier expression
    pub verifier: Option<Node>,
}

impl Tree {
    /// Expression script: a single verifier expression, no extra entry points
    pub fn expression(lib_version: u8, verifier: Node) -> Self {
        Self {
            lib_version,
            digest: None,
            declarations: Vec::new(),
            functions: Vec::new(),
            verifier: Some(verifier),
        }
    }
}
