//! Bloom filter sizing math
//!
//! Formulas:
//! - m = ceil(-n * ln(p) / (ln(2)^2))  -- bits for a target FPR
//! - k = ceil((m / n) * ln(2))          -- hash functions for m and n
//! - FPR = (1 - e^(-k * count / m))^k

use std::f64::consts::LN_2;

use bitvec::prelude::{BitSlice, Lsb0};

use crate::error::{FilterError, Result};

/// Largest bit array the filter can allocate
pub const MAX_SIZE_BITS: usize = BitSlice::<u8, Lsb0>::MAX_BITS;

/// Derived Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Expected number of elements (n)
    pub expected_elements: usize,
    /// Number of hash indices per element (k)
    pub hash_count: usize,
    /// Bits per element at full expected load (m / n)
    pub bits_per_element: f64,
}

impl BloomFilterParams {
    /// Validate `m` and `n` and derive `k`
    pub fn new(size_bits: usize, expected_elements: usize) -> Result<Self> {
        if expected_elements == 0 {
            return Err(FilterError::invalid(
                "expected number of elements must be greater than 0",
            ));
        }
        if size_bits == 0 {
            return Err(FilterError::invalid(
                "size of Bloom filter must be greater than 0",
            ));
        }
        if size_bits > MAX_SIZE_BITS {
            return Err(FilterError::invalid(format!(
                "size of Bloom filter {size_bits} exceeds the maximum of {MAX_SIZE_BITS} bits"
            )));
        }

        Ok(Self {
            size_bits,
            expected_elements,
            hash_count: hash_count(size_bits, expected_elements),
            bits_per_element: size_bits as f64 / expected_elements as f64,
        })
    }

    /// Derive `m` from a target false positive probability, then `k`
    pub fn with_probability(probability: f64, expected_elements: usize) -> Result<Self> {
        if expected_elements == 0 {
            return Err(FilterError::invalid(
                "expected number of elements must be greater than 0",
            ));
        }
        let size_bits = size_for_probability(probability, expected_elements)?;
        Self::new(size_bits, expected_elements)
    }
}

/// Number of bits needed to hold `n` elements at false positive rate `p`
///
/// Fails when the result is not a positive, finite bit count no larger than
/// [`MAX_SIZE_BITS`]. Any `p` outside `(0, 1)` fails this way.
pub fn size_for_probability(probability: f64, expected_elements: usize) -> Result<usize> {
    let n = expected_elements as f64;
    let m = (-n * probability.ln() / (LN_2 * LN_2)).ceil();

    if !m.is_finite() || m < 1.0 || m > MAX_SIZE_BITS as f64 {
        return Err(FilterError::invalid(format!(
            "false positive probability {probability} does not yield a usable filter size"
        )));
    }
    Ok(m as usize)
}

/// Number of hash indices for `m` bits and `n` expected elements
///
/// Uses real-valued `m / n`, so the result is at least 1 whenever both
/// inputs are positive. Integer division would give a smaller `k` for some
/// inputs, e.g. 1 instead of 2 for m = 150, n = 100.
pub fn hash_count(size_bits: usize, expected_elements: usize) -> usize {
    if expected_elements == 0 {
        return 1;
    }
    let k = ((size_bits as f64 / expected_elements as f64) * LN_2).ceil() as usize;
    k.max(1)
}

/// False positive probability after `count` insertions
///
/// Formula: FPR = (1 - e^(-k * count / m))^k
pub fn false_positive_probability(size_bits: usize, hash_count: usize, count: usize) -> f64 {
    if size_bits == 0 {
        return 1.0;
    }
    let k = hash_count as f64;
    let exponent = -k * count as f64 / size_bits as f64;
    (1.0 - exponent.exp()).powf(k)
}
