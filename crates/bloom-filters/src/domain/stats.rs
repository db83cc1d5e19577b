//! Read-only snapshot of a filter's parameters and load

use serde::{Deserialize, Serialize};

use super::hash_functions::HashFunction;
use super::strategy::StrategyKind;

/// Point-in-time view of a Bloom filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Filter size in bits (m)
    pub size_bits: usize,
    /// Expected number of elements (n)
    pub expected_elements: usize,
    /// Indices per element (k)
    pub hash_count: usize,
    /// Insert calls since creation or the last clear
    pub elements_inserted: usize,
    /// Bits currently set
    pub bits_set: usize,
    /// `bits_set / size_bits`
    pub fill_ratio: f64,
    /// Index derivation strategy
    pub strategy: StrategyKind,
    /// Hash functions seeding the strategy
    pub hash_functions: Vec<HashFunction>,
    /// FPR at the expected number of elements
    pub expected_fpr: f64,
    /// FPR at the current number of elements
    pub current_fpr: f64,
}

impl FilterStats {
    /// Whether more elements were inserted than the filter was sized for
    pub fn is_overloaded(&self) -> bool {
        self.elements_inserted > self.expected_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(elements_inserted: usize) -> FilterStats {
        FilterStats {
            size_bits: 144,
            expected_elements: 10,
            hash_count: 10,
            elements_inserted,
            bits_set: 0,
            fill_ratio: 0.0,
            strategy: StrategyKind::Triple,
            hash_functions: StrategyKind::Triple.default_functions().to_vec(),
            expected_fpr: 0.001,
            current_fpr: 0.0,
        }
    }

    #[test]
    fn test_overloaded_after_expected_elements() {
        assert!(!snapshot(10).is_overloaded());
        assert!(snapshot(11).is_overloaded());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let json = serde_json::to_value(snapshot(3)).unwrap();
        assert_eq!(json["strategy"], "triple");
        assert_eq!(json["hash_functions"][2], "sha3_256");
        assert_eq!(json["elements_inserted"], 3);
    }
}
