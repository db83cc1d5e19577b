//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter engine
//! - Hash functions and index derivation strategies
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod element;
pub mod hash_functions;
pub mod parameters;
pub mod stats;
pub mod strategy;

pub use bloom_filter::{
    BloomFilter, DoubleHashBloomFilter, EnhancedDoubleHashBloomFilter, TripleHashBloomFilter,
};
pub use config::{BloomConfig, BloomConfigBuilder, Sizing};
pub use element::Element;
pub use hash_functions::HashFunction;
pub use parameters::{false_positive_probability, hash_count, size_for_probability, BloomFilterParams};
pub use stats::FilterStats;
pub use strategy::{
    DoubleHashing, EnhancedDoubleHashing, IndexStrategy, StrategyKind, TripleHashing,
};
