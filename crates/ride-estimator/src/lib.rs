//! # ride-estimator
//!
//! Static complexity scoring for RIDE scripts.
//!
//! This crate provides:
//! - A bytecode estimator, one walk parameterized by per-version weights
//! - The legacy tree-walking estimator used for contract scripts
//! - Branch-cost reconciliation: the more expensive branch of every
//!   conditional bounds the result
//!
//! Two nodes estimating the same script must arrive at the identical score,
//! so every algorithm here is deterministic and every inconsistency is a
//! hard failure rather than a guess.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bytecode;
mod error;
mod frame;
mod tree;
mod weights;

pub use bytecode::estimate_program;
pub use error::{EstimationError, EstimationResult};
pub use tree::estimate_tree;
pub use weights::Weights;

use std::collections::BTreeMap;

/// Outcome of an estimation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimation {
    /// Total complexity score of the script
    pub complexity: u64,
    /// Per-function scores, keyed by declared name
    pub functions: BTreeMap<String, u64>,
}
