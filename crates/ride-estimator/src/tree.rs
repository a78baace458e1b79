//! Tree-walking estimator
//!
//! The older accounting used for contract scripts with multiple callable
//! entry points: each callable and the verifier is walked independently over
//! the tree itself, with no compilation step. A `let` is priced only if its
//! name is actually referenced; conditional branches are walked in isolated
//! scope snapshots and the more expensive branch wins, together with its
//! resulting scope.

use crate::error::{EstimationError, EstimationResult};
use crate::Estimation;
use ride_costs::{Catalogue, LibVersion};
use ride_lang::{Node, Tree};
use std::collections::{BTreeMap, BTreeSet};

/// Cost of a referenced declaration, charged once when it turns out used
const DECLARATION: u64 = 5;
/// Cost of a constant literal
const CONSTANT: u64 = 1;
/// Cost of referencing a name
const REFERENCE: u64 = 2;
/// Cost of a conditional on top of its condition and winning branch
const CONDITIONAL: u64 = 1;
/// Cost of a field access on top of the object expression
const PROPERTY: u64 = 1;

/// Estimate a tree without compiling it.
///
/// Each callable in `tree.functions` and the verifier are estimated
/// independently, all seeing the script-level declarations; the reported
/// complexity is the most expensive entry point.
pub fn estimate_tree(tree: &Tree, catalogue: &Catalogue) -> EstimationResult<Estimation> {
    LibVersion::try_from(tree.lib_version)?;

    let mut functions = BTreeMap::new();
    let mut complexity = 0;

    for function in &tree.functions {
        let Node::FunctionDeclaration { name, body, .. } = function else {
            return Err(EstimationError::InvalidDeclaration);
        };
        let cost = entry_cost(tree, catalogue, body)?;
        complexity = complexity.max(cost);
        functions.insert(name.clone(), cost);
    }
    if let Some(verifier) = &tree.verifier {
        let cost = entry_cost(tree, catalogue, verifier)?;
        complexity = complexity.max(cost);
    }

    tracing::debug!(
        "tree estimation: complexity {}, {} callables",
        complexity,
        functions.len()
    );
    Ok(Estimation {
        complexity,
        functions,
    })
}

/// Cost of one entry point, with the script-level declarations in scope
fn entry_cost(tree: &Tree, catalogue: &Catalogue, entry: &Node) -> EstimationResult<u64> {
    let mut walker = TreeWalker {
        catalogue,
        used: BTreeSet::new(),
        functions: vec![BTreeMap::new()],
    };
    walker.with_declarations(&tree.declarations, entry)
}

struct TreeWalker<'a> {
    catalogue: &'a Catalogue,
    /// Names referenced but not yet priced
    used: BTreeSet<String>,
    /// Parent-chained memoized user-function costs
    functions: Vec<BTreeMap<String, u64>>,
}

impl TreeWalker<'_> {
    /// Walk a declaration list as if it were a chain of blocks in front of
    /// the entry expression.
    fn with_declarations(&mut self, declarations: &[Node], entry: &Node) -> EstimationResult<u64> {
        let Some(first) = declarations.first() else {
            return self.node(entry);
        };
        match first {
            Node::Assignment {
                name, expression, ..
            } => self.assignment_cost(name, expression, |walker| {
                walker.with_declarations(&declarations[1..], entry)
            }),
            Node::FunctionDeclaration { name, body, .. } => {
                self.declare_function(name, body)?;
                self.with_declarations(&declarations[1..], entry)
            }
            _ => Err(EstimationError::InvalidDeclaration),
        }
    }

    /// Declaration rule: walk the scope the name is visible in first; only a
    /// referenced declaration gets its expression priced. Shadowing an outer
    /// name of the same name must not clobber the outer usage flag.
    fn assignment_cost(
        &mut self,
        name: &str,
        expression: &Node,
        block: impl FnOnce(&mut Self) -> EstimationResult<u64>,
    ) -> EstimationResult<u64> {
        let shadowed = self.used.remove(name);
        let mut cost = block(self)?;
        if self.used.remove(name) {
            cost += self.node(expression)? + DECLARATION;
        }
        if shadowed {
            self.used.insert(name.to_string());
        }
        Ok(cost)
    }

    /// Function rule: price the body once in an isolated scope snapshot and
    /// memoize it flat; the surrounding scope continues unchanged.
    fn declare_function(&mut self, name: &str, body: &Node) -> EstimationResult<()> {
        let snapshot = self.used.clone();
        let cost = self.node(body)?;
        self.used = snapshot;
        if let Some(scope) = self.functions.last_mut() {
            scope.insert(name.to_string(), cost);
        }
        Ok(())
    }

    fn function_cost(&self, name: &str) -> Option<u64> {
        self.functions
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    fn node(&mut self, node: &Node) -> EstimationResult<u64> {
        match node {
            Node::Long(_) | Node::Bytes(_) | Node::String(_) | Node::Boolean(_) => Ok(CONSTANT),
            Node::Reference(name) => {
                self.used.insert(name.clone());
                Ok(REFERENCE)
            }
            Node::Property { object, .. } => Ok(self.node(object)? + PROPERTY),
            Node::Conditional {
                condition,
                true_branch,
                false_branch,
            } => {
                let condition_cost = self.node(condition)?;
                let snapshot = self.used.clone();
                let true_cost = self.node(true_branch)?;
                let true_scope = std::mem::replace(&mut self.used, snapshot);
                let false_cost = self.node(false_branch)?;
                let winner = if true_cost >= false_cost {
                    self.used = true_scope;
                    true_cost
                } else {
                    false_cost
                };
                Ok(condition_cost + winner + CONDITIONAL)
            }
            Node::Assignment {
                name,
                expression,
                block,
            } => self.assignment_cost(name, expression, |walker| walker.node(block)),
            Node::FunctionDeclaration { name, body, block, .. } => {
                self.functions.push(BTreeMap::new());
                self.declare_function(name, body)?;
                let cost = self.node(block)?;
                self.functions.pop();
                Ok(cost)
            }
            Node::FunctionCall { name, arguments } => {
                let mut cost = match self.function_cost(name) {
                    Some(cost) => cost,
                    None => self
                        .catalogue
                        .cost(name)
                        .ok_or_else(|| EstimationError::UnresolvedFunction(name.clone()))?,
                };
                // declarations inside an argument close over themselves and
                // never leak into the caller's scope; usage of outer names
                // must still propagate, or memoized lets would go unpriced
                for argument in arguments {
                    cost += self.node(argument)?;
                }
                Ok(cost)
            }
        }
    }
}
