//! Per-version opcode weights
//!
//! The walk is identical across estimator versions; only the points charged
//! per opcode category differ. V1 and V2 share one table, V3 and V4 the
//! other.

use ride_costs::LibVersion;

/// Points charged per opcode category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Constant push (`Push`, `True`, `False`)
    pub constant: u64,
    /// Conditional entry (`JumpIfFalse`)
    pub conditional: u64,
    /// Declared-value reference (`Load`)
    pub reference: u64,
    /// Field access (`Property`)
    pub property: u64,
    /// Predefined global reference (`Global`)
    pub global: u64,
    /// Function argument use (`LoadLocal`)
    pub local: u64,
    /// Per-argument surcharge applied when a function call returns
    pub call_argument: u64,
    /// Charge on first entry into a declaration body
    pub declaration_block: u64,
}

impl Weights {
    /// Weight table in force for a library version
    pub fn for_version(version: LibVersion) -> Self {
        match version {
            LibVersion::V1 | LibVersion::V2 => Self::v1(),
            LibVersion::V3 | LibVersion::V4 => Self::v3(),
        }
    }

    /// V1/V2 accounting
    pub fn v1() -> Self {
        Self {
            constant: 1,
            conditional: 1,
            reference: 2,
            property: 2,
            global: 2,
            local: 1,
            call_argument: 5,
            declaration_block: 5,
        }
    }

    /// V3/V4 accounting
    pub fn v3() -> Self {
        Self {
            constant: 1,
            conditional: 1,
            reference: 1,
            property: 1,
            global: 1,
            local: 1,
            call_argument: 0,
            declaration_block: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_share_tables_pairwise() {
        assert_eq!(Weights::for_version(LibVersion::V1), Weights::v1());
        assert_eq!(Weights::for_version(LibVersion::V2), Weights::v1());
        assert_eq!(Weights::for_version(LibVersion::V3), Weights::v3());
        assert_eq!(Weights::for_version(LibVersion::V4), Weights::v3());
    }

    #[test]
    fn test_tables_differ_only_where_documented() {
        let v1 = Weights::v1();
        let v3 = Weights::v3();
        assert_eq!(v1.constant, v3.constant);
        assert_eq!(v1.conditional, v3.conditional);
        assert_eq!(v1.local, v3.local);
        assert_eq!(v1.reference, 2);
        assert_eq!(v3.reference, 1);
        assert_eq!(v1.property, 2);
        assert_eq!(v3.property, 1);
        assert_eq!(v1.global, 2);
        assert_eq!(v3.global, 1);
        assert_eq!(v1.call_argument, 5);
        assert_eq!(v3.call_argument, 0);
        assert_eq!(v1.declaration_block, 5);
        assert_eq!(v3.declaration_block, 0);
    }
}
