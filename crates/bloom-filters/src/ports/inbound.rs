//! Inbound Ports (Driving Ports)
//!
//! The capability contract callers program against. Every operation
//! delegates to the filter engine.

use crate::domain::{BloomFilter, Element, IndexStrategy};
use crate::error::Result;

/// Approximate set membership API (Driving Port)
pub trait MembershipFilter {
    /// Add an element
    fn add<E: Element + ?Sized>(&mut self, element: &E);

    /// Add every element, in iteration order
    fn add_all<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: Element;

    /// `false` means definitely absent, `true` means possibly present
    fn might_contain<E: Element + ?Sized>(&self, element: &E) -> bool;

    /// Whether every element is possibly present
    fn might_contain_all<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Element;

    /// Reset to empty
    fn clear(&mut self);

    /// Whether nothing has been added since creation or the last clear
    fn is_empty(&self) -> bool;

    /// Bit-array size (m)
    fn size(&self) -> usize;

    /// Elements added so far
    fn number_of_elements(&self) -> usize;

    /// Elements the filter was sized for (n)
    fn expected_number_of_elements(&self) -> usize;

    /// Indices derived per element (k)
    fn number_of_hash_functions(&self) -> usize;

    /// m / n
    fn expected_bits_per_element(&self) -> f64;

    /// m / elements added; fails on an empty filter
    fn bits_per_element(&self) -> Result<f64>;

    /// FPR once `expected_number_of_elements` are added
    fn expected_probability_of_false_positives(&self) -> f64;

    /// FPR at the current number of elements
    fn current_probability_of_false_positives(&self) -> f64;

    /// FPR after `count` elements
    fn probability_of_false_positives(&self, count: usize) -> f64;
}

impl<S: IndexStrategy> MembershipFilter for BloomFilter<S> {
    fn add<E: Element + ?Sized>(&mut self, element: &E) {
        self.insert(element);
    }

    fn add_all<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: Element,
    {
        self.insert_all(elements);
    }

    fn might_contain<E: Element + ?Sized>(&self, element: &E) -> bool {
        BloomFilter::might_contain(self, element)
    }

    fn might_contain_all<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Element,
    {
        BloomFilter::might_contain_all(self, elements)
    }

    fn clear(&mut self) {
        BloomFilter::clear(self);
    }

    fn is_empty(&self) -> bool {
        BloomFilter::is_empty(self)
    }

    fn size(&self) -> usize {
        BloomFilter::size(self)
    }

    fn number_of_elements(&self) -> usize {
        self.elements_inserted()
    }

    fn expected_number_of_elements(&self) -> usize {
        self.expected_elements()
    }

    fn number_of_hash_functions(&self) -> usize {
        self.hash_count()
    }

    fn expected_bits_per_element(&self) -> f64 {
        BloomFilter::expected_bits_per_element(self)
    }

    fn bits_per_element(&self) -> Result<f64> {
        BloomFilter::bits_per_element(self)
    }

    fn expected_probability_of_false_positives(&self) -> f64 {
        BloomFilter::expected_probability_of_false_positives(self)
    }

    fn current_probability_of_false_positives(&self) -> f64 {
        BloomFilter::current_probability_of_false_positives(self)
    }

    fn probability_of_false_positives(&self, count: usize) -> f64 {
        BloomFilter::probability_of_false_positives(self, count)
    }
}
