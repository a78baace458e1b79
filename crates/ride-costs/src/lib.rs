//! # ride-costs
//!
//! Cost catalogue for the RIDE execution engine.
//!
//! This crate provides:
//! - Library version selection (`LibVersion`)
//! - Per-version function cost tables, built by layering ordered override
//!   lists on top of the base table
//! - Deterministic function enumeration used to assign external-call ids

#![warn(missing_docs)]
#![warn(clippy::all)]

mod catalogue;
mod tables;
mod version;

pub use catalogue::Catalogue;
pub use version::{LibVersion, VersionError};
