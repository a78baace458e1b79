//! Function cost catalogue

use crate::tables::{BASE, V3_OVERRIDES, V4_OVERRIDES};
use crate::version::LibVersion;
use std::collections::BTreeMap;

/// Immutable per-version mapping from function identifier to fixed cost.
///
/// Function identifiers are either decimal native ids (`"100"`) or
/// user/intrinsic function names (`"throw"`). Enumeration order is the
/// lexicographic key order of the underlying map, which is also the order
/// external-call ids are assigned in.
#[derive(Debug, Clone)]
pub struct Catalogue {
    version: LibVersion,
    costs: BTreeMap<&'static str, u64>,
    index: Vec<&'static str>,
}

impl Catalogue {
    /// Build the catalogue for a library version by layering override lists
    /// onto the base table. V1 and V2 share the base table; V3 and V4 each
    /// apply their ordered override list on top of the previous version.
    pub fn for_version(version: LibVersion) -> Self {
        let mut costs = BTreeMap::new();
        for &(name, cost) in BASE {
            costs.insert(name, cost);
        }
        if version >= LibVersion::V3 {
            for &(name, cost) in V3_OVERRIDES {
                costs.insert(name, cost);
            }
        }
        if version >= LibVersion::V4 {
            for &(name, cost) in V4_OVERRIDES {
                costs.insert(name, cost);
            }
        }
        let index = costs.keys().copied().collect();
        Self {
            version,
            costs,
            index,
        }
    }

    /// Library version this catalogue was built for
    pub fn version(&self) -> LibVersion {
        self.version
    }

    /// Fixed cost of a function, or `None` if the version does not know it
    pub fn cost(&self, name: &str) -> Option<u64> {
        self.costs.get(name).copied()
    }

    /// Number of known functions
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the catalogue is empty (it never is for a valid version)
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All function identifiers in enumeration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.index.iter().copied()
    }

    /// External-call id of a function: its position in enumeration order
    pub fn function_index(&self, name: &str) -> Option<usize> {
        self.index.iter().position(|&candidate| candidate == name)
    }

    /// Function identifier behind an external-call id
    pub fn function_at(&self, index: usize) -> Option<&'static str> {
        self.index.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_v2_share_base_table() {
        let v1 = Catalogue::for_version(LibVersion::V1);
        let v2 = Catalogue::for_version(LibVersion::V2);
        assert_eq!(v1.len(), v2.len());
        for name in v1.names() {
            assert_eq!(v1.cost(name), v2.cost(name));
        }
    }

    #[test]
    fn test_v3_overrides_apply_after_base() {
        let v2 = Catalogue::for_version(LibVersion::V2);
        let v3 = Catalogue::for_version(LibVersion::V3);
        // reduced costs
        assert_eq!(v2.cost("throw"), Some(2));
        assert_eq!(v3.cost("throw"), Some(1));
        assert_eq!(v2.cost("!="), Some(26));
        assert_eq!(v3.cost("!="), Some(1));
        assert_eq!(v2.cost("isDefined"), Some(35));
        assert_eq!(v3.cost("isDefined"), Some(1));
        // new functions
        assert_eq!(v2.cost("parseIntValue"), None);
        assert_eq!(v3.cost("parseIntValue"), Some(20));
        assert_eq!(v3.cost("Unit"), Some(0));
        // untouched entries carry over
        assert_eq!(v3.cost("500"), Some(100));
        assert_eq!(v3.cost("addressFromString"), Some(124));
    }

    #[test]
    fn test_v4_is_superset_of_v3_outside_override_set() {
        let v3 = Catalogue::for_version(LibVersion::V3);
        let v4 = Catalogue::for_version(LibVersion::V4);
        let overridden: Vec<&str> = crate::tables::V4_OVERRIDES
            .iter()
            .map(|&(name, _)| name)
            .collect();
        for name in v3.names() {
            if overridden.contains(&name) {
                continue;
            }
            assert_eq!(v3.cost(name), v4.cost(name), "diverged on {name}");
        }
        for &(name, cost) in crate::tables::V4_OVERRIDES {
            assert_eq!(v4.cost(name), Some(cost));
        }
    }

    #[test]
    fn test_v4_only_keys() {
        let v3 = Catalogue::for_version(LibVersion::V3);
        let v4 = Catalogue::for_version(LibVersion::V4);
        for name in ["2414", "2903", "contains", "valueOrElse", "IntegerEntry"] {
            assert!(v3.cost(name).is_none(), "{name} leaked into V3");
            assert!(v4.cost(name).is_some(), "{name} missing from V4");
        }
    }

    #[test]
    fn test_most_expensive_native() {
        let v4 = Catalogue::for_version(LibVersion::V4);
        assert_eq!(v4.cost("800"), Some(3900));
        let max = v4.names().filter_map(|n| v4.cost(n)).max().unwrap();
        assert_eq!(max, 3900);
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let a = Catalogue::for_version(LibVersion::V4);
        let b = Catalogue::for_version(LibVersion::V4);
        let names_a: Vec<_> = a.names().collect();
        let names_b: Vec<_> = b.names().collect();
        assert_eq!(names_a, names_b);
        let mut sorted = names_a.clone();
        sorted.sort_unstable();
        assert_eq!(names_a, sorted);
    }

    #[test]
    fn test_function_index_roundtrip() {
        let v3 = Catalogue::for_version(LibVersion::V3);
        for (i, name) in v3.names().enumerate() {
            assert_eq!(v3.function_index(name), Some(i));
            assert_eq!(v3.function_at(i), Some(name));
        }
        assert_eq!(v3.function_index("no-such-function"), None);
        assert_eq!(v3.function_at(usize::MAX), None);
    }

    #[test]
    fn test_external_ids_fit_one_byte() {
        // external-call ids are encoded in a single byte
        assert!(Catalogue::for_version(LibVersion::V4).len() <= 256);
    }
}
