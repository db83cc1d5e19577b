//! Property-based tests using `proptest`.
//!
//! These tests verify the membership guarantees and counters of every
//! strategy over arbitrary sizes and elements.

use bloom_filters::{
    BloomFilter, DoubleHashBloomFilter, DoubleHashing, EnhancedDoubleHashing, FilterError,
    IndexStrategy, StrategyKind, TripleHashing,
};
use proptest::prelude::*;

fn strategy_for(kind: StrategyKind) -> Box<dyn IndexStrategy> {
    match kind {
        StrategyKind::Double => Box::new(DoubleHashing::default()),
        StrategyKind::Triple => Box::new(TripleHashing::default()),
        StrategyKind::EnhancedDouble => Box::new(EnhancedDoubleHashing::default()),
    }
}

fn any_kind() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::Double),
        Just(StrategyKind::Triple),
        Just(StrategyKind::EnhancedDouble),
    ]
}

// ---------- Construction ----------

proptest! {
    #[test]
    fn construction_never_fails_for_positive_sizes(m in 1usize..100_000, n in 1usize..10_000) {
        let filter = DoubleHashBloomFilter::new(m, n);
        prop_assert!(filter.is_ok());
        let filter = filter.unwrap();
        let expected_k = ((m as f64 / n as f64) * std::f64::consts::LN_2).ceil() as usize;
        prop_assert_eq!(filter.hash_count(), expected_k.max(1));
        prop_assert!((filter.expected_bits_per_element() - m as f64 / n as f64).abs() < 1e-9);
    }

    #[test]
    fn zero_size_always_rejected(n in 0usize..1_000) {
        let result = DoubleHashBloomFilter::new(0, n);
        prop_assert!(matches!(result, Err(FilterError::InvalidArgument(_))));
    }

    #[test]
    fn zero_expected_elements_always_rejected(m in 0usize..1_000) {
        let result = DoubleHashBloomFilter::new(m, 0);
        prop_assert!(matches!(result, Err(FilterError::InvalidArgument(_))));
    }

    #[test]
    fn probability_sizing_yields_positive_size(p in 0.0001f64..0.5, n in 1usize..5_000) {
        let filter = DoubleHashBloomFilter::with_probability(p, n).unwrap();
        prop_assert!(filter.size() > 0);
        prop_assert!(filter.hash_count() >= 1);
    }
}

// ---------- Membership ----------

proptest! {
    #[test]
    fn no_false_negatives(
        kind in any_kind(),
        m in 1usize..4_096,
        elements in prop::collection::vec("\\PC{0,32}", 1..64),
    ) {
        let mut filter = BloomFilter::with_strategy(m, elements.len(), strategy_for(kind)).unwrap();
        filter.insert_all(&elements);

        for element in &elements {
            prop_assert!(filter.might_contain(element));
        }
        prop_assert!(filter.might_contain_all(&elements));
    }

    #[test]
    fn indices_stay_in_range(
        kind in any_kind(),
        m in 1usize..10_000,
        k in 1usize..40,
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let indices = strategy_for(kind).derive_indices(&payload, k, m);
        prop_assert_eq!(indices.len(), k);
        prop_assert!(indices.iter().all(|&i| i < m));
    }

    #[test]
    fn counters_follow_inserts_and_clear(
        kind in any_kind(),
        batches in prop::collection::vec(prop::collection::vec(any::<u64>(), 0..16), 0..8),
    ) {
        let mut filter = BloomFilter::with_strategy(2_048, 64, strategy_for(kind)).unwrap();
        let mut expected = 0;

        for batch in &batches {
            filter.insert_all(batch);
            expected += batch.len();
            prop_assert_eq!(filter.elements_inserted(), expected);
            prop_assert_eq!(filter.is_empty(), expected == 0);
        }

        match filter.bits_per_element() {
            Ok(bpe) => prop_assert!((bpe - 2_048.0 / expected as f64).abs() < 1e-9),
            Err(e) => {
                prop_assert_eq!(expected, 0);
                prop_assert_eq!(e, FilterError::EmptyFilter);
            }
        }

        filter.clear();
        prop_assert!(filter.is_empty());
        prop_assert_eq!(filter.bits_set(), 0);
    }
}
