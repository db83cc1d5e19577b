//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - INVARIANT-1: k = ceil((m/n) * ln 2), fixed at construction
//! - INVARIANT-2: No false negatives - if inserted, might_contain() MUST return true
//! - INVARIANT-3: The element counter only grows, except for clear() resetting it to 0

use bitvec::prelude::*;
use tracing::{debug, warn};

use super::element::Element;
use super::parameters::{false_positive_probability, BloomFilterParams};
use super::stats::FilterStats;
use super::strategy::{DoubleHashing, EnhancedDoubleHashing, IndexStrategy, TripleHashing};
use crate::error::{FilterError, Result};

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not. Elements cannot be removed.
///
/// The filter is not synchronised: mutation requires `&mut self`, while
/// shared references may query concurrently.
#[derive(Clone, Debug)]
pub struct BloomFilter<S = DoubleHashing> {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Size in bits (m)
    m: usize,
    /// Expected number of elements (n)
    n: usize,
    /// Number of indices per element (k)
    k: usize,
    /// Number of insert calls since creation or the last clear
    count: usize,
    /// Bits per element at the expected load (m / n)
    bits_per_element: f64,
    /// Index derivation strategy
    strategy: S,
}

/// Bloom filter using [`DoubleHashing`]
pub type DoubleHashBloomFilter = BloomFilter<DoubleHashing>;

/// Bloom filter using [`TripleHashing`]
pub type TripleHashBloomFilter = BloomFilter<TripleHashing>;

/// Bloom filter using [`EnhancedDoubleHashing`]
pub type EnhancedDoubleHashBloomFilter = BloomFilter<EnhancedDoubleHashing>;

impl<S: IndexStrategy + Default> BloomFilter<S> {
    /// Create a filter of `size_bits` bits for `expected_elements` elements
    /// using the strategy's default hash functions
    pub fn new(size_bits: usize, expected_elements: usize) -> Result<Self> {
        Self::with_strategy(size_bits, expected_elements, S::default())
    }

    /// Create a filter sized for a target false positive probability
    /// using the strategy's default hash functions
    pub fn with_probability(probability: f64, expected_elements: usize) -> Result<Self> {
        Self::with_probability_and_strategy(probability, expected_elements, S::default())
    }
}

impl<S: IndexStrategy> BloomFilter<S> {
    /// Create a filter with an explicit size and strategy
    ///
    /// # Errors
    /// `InvalidArgument` if either `size_bits` or `expected_elements` is 0.
    pub fn with_strategy(size_bits: usize, expected_elements: usize, strategy: S) -> Result<Self> {
        let params = BloomFilterParams::new(size_bits, expected_elements)?;
        Ok(Self::from_params(params, strategy))
    }

    /// Create a filter sized for `probability` at `expected_elements`
    ///
    /// m = ceil(-n * ln(p) / ln(2)^2)
    ///
    /// # Errors
    /// `InvalidArgument` if `expected_elements` is 0 or `probability` does
    /// not yield a positive size.
    pub fn with_probability_and_strategy(
        probability: f64,
        expected_elements: usize,
        strategy: S,
    ) -> Result<Self> {
        let params = BloomFilterParams::with_probability(probability, expected_elements)?;
        Ok(Self::from_params(params, strategy))
    }

    fn from_params(params: BloomFilterParams, strategy: S) -> Self {
        debug!(
            size_bits = params.size_bits,
            expected_elements = params.expected_elements,
            hash_count = params.hash_count,
            strategy = %strategy.kind(),
            "Created Bloom filter"
        );

        Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            m: params.size_bits,
            n: params.expected_elements,
            k: params.hash_count,
            count: 0,
            bits_per_element: params.bits_per_element,
            strategy,
        }
    }

    fn positions<E: Element + ?Sized>(&self, element: &E) -> Vec<usize> {
        self.strategy
            .derive_indices(&element.payload(), self.k, self.m)
    }

    /// Insert an element into the filter
    ///
    /// After insertion, `might_contain(element)` is guaranteed to return true.
    /// Repeated inserts of the same element are counted again.
    pub fn insert<E: Element + ?Sized>(&mut self, element: &E) {
        for pos in self.positions(element) {
            self.bits.set(pos, true);
        }
        self.count += 1;

        if self.count - 1 == self.n {
            warn!(
                expected_elements = self.n,
                "Bloom filter exceeded its expected number of elements"
            );
        }
    }

    /// Insert every element of `elements`, in iteration order
    pub fn insert_all<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: Element,
    {
        for element in elements {
            self.insert(&element);
        }
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set (never false negative)
    pub fn might_contain<E: Element + ?Sized>(&self, element: &E) -> bool {
        self.positions(element).into_iter().all(|pos| self.bits[pos])
    }

    /// Test if every element might be in the filter, stopping at the first miss
    pub fn might_contain_all<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Element,
    {
        elements
            .into_iter()
            .all(|element| self.might_contain(&element))
    }

    /// Clear the filter (reset all bits and the element count to 0)
    pub fn clear(&mut self) {
        self.bits.fill(false);
        self.count = 0;
        debug!(size_bits = self.m, "Cleared Bloom filter");
    }

    /// Whether nothing has been inserted since creation or the last clear
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// False positive probability after `count` insertions
    ///
    /// Formula: FPR = (1 - e^(-k * count / m))^k
    pub fn probability_of_false_positives(&self, count: usize) -> f64 {
        false_positive_probability(self.m, self.k, count)
    }

    /// False positive probability once the expected number of elements is inserted
    pub fn expected_probability_of_false_positives(&self) -> f64 {
        self.probability_of_false_positives(self.n)
    }

    /// False positive probability at the current number of elements
    pub fn current_probability_of_false_positives(&self) -> f64 {
        self.probability_of_false_positives(self.count)
    }

    /// Bits per element at the expected load (m / n)
    pub fn expected_bits_per_element(&self) -> f64 {
        self.bits_per_element
    }

    /// Bits per element at the current load (m / count)
    ///
    /// # Errors
    /// `EmptyFilter` if nothing has been inserted.
    pub fn bits_per_element(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(FilterError::EmptyFilter);
        }
        Ok(self.m as f64 / self.count as f64)
    }

    /// Get the filter size in bits
    pub fn size(&self) -> usize {
        self.m
    }

    /// Get the expected number of elements
    pub fn expected_elements(&self) -> usize {
        self.n
    }

    /// Get the number of hash indices per element
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of elements inserted
    pub fn elements_inserted(&self) -> usize {
        self.count
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Get the index strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Snapshot of the filter's parameters and load
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            size_bits: self.m,
            expected_elements: self.n,
            hash_count: self.k,
            elements_inserted: self.count,
            bits_set: self.bits_set(),
            fill_ratio: self.bits_set() as f64 / self.m as f64,
            strategy: self.strategy.kind(),
            hash_functions: self.strategy.hash_functions().to_vec(),
            expected_fpr: self.expected_probability_of_false_positives(),
            current_fpr: self.current_probability_of_false_positives(),
        }
    }
}

impl<S: IndexStrategy, T: IndexStrategy> PartialEq<BloomFilter<T>> for BloomFilter<S> {
    fn eq(&self, other: &BloomFilter<T>) -> bool {
        self.m == other.m
            && self.n == other.n
            && self.k == other.k
            && self.count == other.count
            && self.bits_per_element == other.bits_per_element
            && self.strategy.kind() == other.strategy.kind()
            && self.strategy.hash_functions() == other.strategy.hash_functions()
            && self.bits == other.bits
    }
}
