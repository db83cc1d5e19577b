//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_filters::domain::{BloomConfigBuilder, StrategyKind};
//!
//! let config = BloomConfigBuilder::new()
//!     .false_positive_rate(0.001)
//!     .expected_elements(10)
//!     .strategy(StrategyKind::Triple)
//!     .build()
//!     .expect("Valid config");
//!
//! let mut filter = config.build_filter().expect("Valid filter");
//! filter.insert("0xABCD");
//! assert!(filter.might_contain("0xABCD"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bloom_filter::BloomFilter;
use super::hash_functions::HashFunction;
use super::parameters::BloomFilterParams;
use super::strategy::{validate_functions, IndexStrategy, StrategyKind};
use crate::error::{FilterError, Result};

/// How the bit array is sized
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sizing {
    /// Derive the size from a target false positive probability
    FalsePositiveRate {
        probability: f64,
        expected_elements: usize,
    },
    /// Use an explicit size in bits
    Explicit {
        size_bits: usize,
        expected_elements: usize,
    },
}

impl Sizing {
    /// Expected number of elements in either mode
    pub fn expected_elements(&self) -> usize {
        match self {
            Self::FalsePositiveRate {
                expected_elements, ..
            }
            | Self::Explicit {
                expected_elements, ..
            } => *expected_elements,
        }
    }

    /// Resolve to concrete filter parameters
    pub fn params(&self) -> Result<BloomFilterParams> {
        match *self {
            Self::FalsePositiveRate {
                probability,
                expected_elements,
            } => {
                if !(probability > 0.0 && probability < 1.0) {
                    return Err(FilterError::invalid(format!(
                        "false positive probability must be in (0, 1), got {probability}"
                    )));
                }
                BloomFilterParams::with_probability(probability, expected_elements)
            }
            Self::Explicit {
                size_bits,
                expected_elements,
            } => BloomFilterParams::new(size_bits, expected_elements),
        }
    }
}

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomConfig {
    /// Sizing mode and expected elements
    pub sizing: Sizing,
    /// Index derivation strategy
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Hash functions for the strategy; defaults are used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_functions: Option<Vec<HashFunction>>,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            sizing: Sizing::FalsePositiveRate {
                probability: 0.01,
                expected_elements: 1000,
            },
            strategy: StrategyKind::Double,
            hash_functions: None,
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(
        sizing: Sizing,
        strategy: StrategyKind,
        hash_functions: Option<Vec<HashFunction>>,
    ) -> Result<Self> {
        let config = Self {
            sizing,
            strategy,
            hash_functions,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FilterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| FilterError::InvalidConfig(e.to_string()))
    }

    /// Validate sizing and hash functions
    pub fn validate(&self) -> Result<()> {
        let outcome = self.sizing.params().and_then(|_| {
            match &self.hash_functions {
                Some(functions) => validate_functions(self.strategy, functions),
                None => Ok(()),
            }
        });

        if let Err(e) = &outcome {
            debug!(error = %e, strategy = %self.strategy, "Rejected Bloom filter configuration");
        }
        outcome
    }

    /// Builder-style method to set the strategy
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder-style method to set explicit hash functions
    pub fn with_hash_functions(mut self, functions: Vec<HashFunction>) -> Self {
        self.hash_functions = Some(functions);
        self
    }

    /// Build an empty filter described by this configuration
    pub fn build_filter(&self) -> Result<BloomFilter<Box<dyn IndexStrategy>>> {
        let params = self.sizing.params()?;
        let strategy = self.strategy.build(self.hash_functions.as_deref())?;
        BloomFilter::with_strategy(params.size_bits, params.expected_elements, strategy)
    }
}

/// Builder for BloomConfig with validation
///
/// Exactly one of `false_positive_rate` and `size_bits` selects the sizing
/// mode; without either, a 1% false positive rate is used.
#[derive(Default)]
pub struct BloomConfigBuilder {
    probability: Option<f64>,
    size_bits: Option<usize>,
    expected_elements: Option<usize>,
    strategy: Option<StrategyKind>,
    hash_functions: Option<Vec<HashFunction>>,
}

impl BloomConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the filter for a target false positive probability
    pub fn false_positive_rate(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Size the filter explicitly in bits
    pub fn size_bits(mut self, bits: usize) -> Self {
        self.size_bits = Some(bits);
        self
    }

    /// Set the expected number of elements
    pub fn expected_elements(mut self, elements: usize) -> Self {
        self.expected_elements = Some(elements);
        self
    }

    /// Set the index strategy
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set explicit hash functions for the strategy
    pub fn hash_functions(mut self, functions: Vec<HashFunction>) -> Self {
        self.hash_functions = Some(functions);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<BloomConfig> {
        let defaults = BloomConfig::default();
        let expected_elements = self
            .expected_elements
            .unwrap_or_else(|| defaults.sizing.expected_elements());

        let sizing = match (self.probability, self.size_bits) {
            (Some(_), Some(_)) => {
                return Err(FilterError::invalid(
                    "set either a false positive rate or a size in bits, not both",
                ))
            }
            (None, Some(size_bits)) => Sizing::Explicit {
                size_bits,
                expected_elements,
            },
            (probability, None) => Sizing::FalsePositiveRate {
                probability: probability.unwrap_or(0.01),
                expected_elements,
            },
        };

        BloomConfig::new(
            sizing,
            self.strategy.unwrap_or(defaults.strategy),
            self.hash_functions,
        )
    }
}
