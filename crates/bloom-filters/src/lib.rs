//! # Bloom Filters
//!
//! Probabilistic set membership with double, triple and enhanced double
//! hashing: "possibly present" or "definitely absent", with a tunable false
//! positive rate and no storage of the elements themselves.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `BloomFilter`: Bit array, counters, sizing and the membership protocol
//!   - `IndexStrategy`: Derives `k` bit positions from 2 or 3 digests
//!     (`DoubleHashing`, `TripleHashing`, `EnhancedDoubleHashing`)
//!   - `HashFunction`: Digest algorithms seeding the strategies
//!   - `BloomConfig`: Configuration with validation
//!   - `BloomConfigBuilder`: Fluent builder for configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port (caller-facing API)
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: k = ceil((m/n) * ln 2), FPR = (1 - e^(-k*count/m))^k
//! - **INVARIANT-2**: No false negatives - if inserted, might_contain() MUST return true
//!
//! Elements can be added but never removed; `clear()` resets the whole filter.
//! The filter is not synchronised for concurrent mutation.
//!
//! ## Usage Example
//!
//! ```
//! use bloom_filters::{DoubleHashBloomFilter, FilterError};
//!
//! // 0.1% false positives at 10 elements: m = 144 bits, k = 10
//! let mut filter = DoubleHashBloomFilter::with_probability(0.001, 10)?;
//! assert_eq!(filter.size(), 144);
//!
//! filter.insert("0xABCD");
//! assert!(filter.might_contain("0xABCD"));
//! assert_eq!(filter.elements_inserted(), 1);
//!
//! filter.clear();
//! assert!(filter.is_empty());
//! assert_eq!(filter.bits_per_element(), Err(FilterError::EmptyFilter));
//! # Ok::<(), FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use domain::{
    BloomConfig, BloomConfigBuilder, BloomFilter, DoubleHashBloomFilter, DoubleHashing, Element,
    EnhancedDoubleHashBloomFilter, EnhancedDoubleHashing, FilterStats, HashFunction,
    IndexStrategy, Sizing, StrategyKind, TripleHashBloomFilter, TripleHashing,
};
pub use error::{FilterError, Result};
pub use ports::MembershipFilter;
