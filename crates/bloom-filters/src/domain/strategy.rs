//! Index derivation strategies
//!
//! A strategy turns a payload into `k` bit positions in `[0, m)` using only
//! two or three digest evaluations:
//!
//! | Strategy                | Digests | Recurrence (mod m)                         |
//! |-------------------------|---------|--------------------------------------------|
//! | [`DoubleHashing`]         | 2       | `a += b`                                   |
//! | [`TripleHashing`]         | 3       | `a += b; b += c`                           |
//! | [`EnhancedDoubleHashing`] | 2       | `a += b; b += i`                           |
//!
//! In every strategy the first index is the seed `a` itself, followed by
//! `k - 1` applications of the recurrence.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hash_functions::HashFunction;
use crate::error::{FilterError, Result};

/// Derives bit positions for a payload
pub trait IndexStrategy: fmt::Debug {
    /// Which recurrence this strategy applies
    fn kind(&self) -> StrategyKind;

    /// Hash functions seeding the recurrence, in order
    fn hash_functions(&self) -> &[HashFunction];

    /// Produce `k` indices in `[0, m)` for `payload`
    ///
    /// Returns no indices when `m` is 0, since the range is empty.
    fn derive_indices(&self, payload: &[u8], k: usize, m: usize) -> Vec<usize>;
}

impl<S: IndexStrategy + ?Sized> IndexStrategy for Box<S> {
    fn kind(&self) -> StrategyKind {
        (**self).kind()
    }

    fn hash_functions(&self) -> &[HashFunction] {
        (**self).hash_functions()
    }

    fn derive_indices(&self, payload: &[u8], k: usize, m: usize) -> Vec<usize> {
        (**self).derive_indices(payload, k, m)
    }
}

/// Names one of the provided strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Double hashing
    #[default]
    Double,
    /// Triple hashing
    Triple,
    /// Enhanced double hashing
    EnhancedDouble,
}

impl StrategyKind {
    /// Number of hash functions the strategy needs
    pub fn required_functions(&self) -> usize {
        match self {
            Self::Double | Self::EnhancedDouble => 2,
            Self::Triple => 3,
        }
    }

    /// Hash functions used when none are configured
    pub fn default_functions(&self) -> &'static [HashFunction] {
        match self {
            Self::Double | Self::EnhancedDouble => &DEFAULT_PAIR,
            Self::Triple => &DEFAULT_TRIPLE,
        }
    }

    /// Build the strategy, falling back to the defaults when `functions` is `None`
    pub fn build(&self, functions: Option<&[HashFunction]>) -> Result<Box<dyn IndexStrategy>> {
        let functions = functions.unwrap_or_else(|| self.default_functions());
        Ok(match self {
            Self::Double => Box::new(DoubleHashing::from_functions(functions)?),
            Self::Triple => Box::new(TripleHashing::from_functions(functions)?),
            Self::EnhancedDouble => Box::new(EnhancedDoubleHashing::from_functions(functions)?),
        })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "double",
            Self::Triple => "triple",
            Self::EnhancedDouble => "enhanced-double",
        })
    }
}

const DEFAULT_PAIR: [HashFunction; 2] = [HashFunction::Sha256, HashFunction::Sha512];

const DEFAULT_TRIPLE: [HashFunction; 3] = [
    HashFunction::Sha256,
    HashFunction::Sha512,
    HashFunction::Sha3_256,
];

/// Reject missing, surplus, or repeated hash functions
pub fn validate_functions(kind: StrategyKind, functions: &[HashFunction]) -> Result<()> {
    let required = kind.required_functions();
    if functions.len() < required {
        return Err(FilterError::invalid(format!(
            "{kind} hashing is missing a hash function: expected {required}, got {}",
            functions.len()
        )));
    }
    if functions.len() > required {
        return Err(FilterError::invalid(format!(
            "{kind} hashing takes {required} hash functions, got {}",
            functions.len()
        )));
    }

    for (i, first) in functions.iter().enumerate() {
        if let Some(second) = functions[i + 1..].iter().find(|other| *other == first) {
            return Err(FilterError::invalid(format!(
                "hash functions cannot be the same: {first} and {second}"
            )));
        }
    }
    Ok(())
}

/// Double hashing: `g(i) = a + i * b (mod m)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleHashing {
    functions: [HashFunction; 2],
}

impl DoubleHashing {
    /// Create from two distinct hash functions
    pub fn new(first: HashFunction, second: HashFunction) -> Result<Self> {
        Self::from_functions(&[first, second])
    }

    /// Create from a slice that must hold exactly two distinct hash functions
    pub fn from_functions(functions: &[HashFunction]) -> Result<Self> {
        validate_functions(StrategyKind::Double, functions)?;
        Ok(Self {
            functions: [functions[0], functions[1]],
        })
    }
}

impl Default for DoubleHashing {
    /// SHA-256 and SHA-512
    fn default() -> Self {
        Self {
            functions: DEFAULT_PAIR,
        }
    }
}

impl IndexStrategy for DoubleHashing {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Double
    }

    fn hash_functions(&self) -> &[HashFunction] {
        &self.functions
    }

    fn derive_indices(&self, payload: &[u8], k: usize, m: usize) -> Vec<usize> {
        if m == 0 {
            return Vec::new();
        }
        let mut a = self.functions[0].value_mod(payload, m);
        let b = self.functions[1].value_mod(payload, m);

        let mut indices = Vec::with_capacity(k);
        for i in 0..k {
            if i > 0 {
                a = add_mod(a, b, m);
            }
            indices.push(a);
        }
        indices
    }
}

/// Triple hashing: `a += b; b += c (mod m)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripleHashing {
    functions: [HashFunction; 3],
}

impl TripleHashing {
    /// Create from three pairwise distinct hash functions
    pub fn new(first: HashFunction, second: HashFunction, third: HashFunction) -> Result<Self> {
        Self::from_functions(&[first, second, third])
    }

    /// Create from a slice that must hold exactly three distinct hash functions
    pub fn from_functions(functions: &[HashFunction]) -> Result<Self> {
        validate_functions(StrategyKind::Triple, functions)?;
        Ok(Self {
            functions: [functions[0], functions[1], functions[2]],
        })
    }
}

impl Default for TripleHashing {
    /// SHA-256, SHA-512 and SHA3-256
    fn default() -> Self {
        Self {
            functions: DEFAULT_TRIPLE,
        }
    }
}

impl IndexStrategy for TripleHashing {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Triple
    }

    fn hash_functions(&self) -> &[HashFunction] {
        &self.functions
    }

    fn derive_indices(&self, payload: &[u8], k: usize, m: usize) -> Vec<usize> {
        if m == 0 {
            return Vec::new();
        }
        let mut a = self.functions[0].value_mod(payload, m);
        let mut b = self.functions[1].value_mod(payload, m);
        let c = self.functions[2].value_mod(payload, m);

        let mut indices = Vec::with_capacity(k);
        for i in 0..k {
            if i > 0 {
                a = add_mod(a, b, m);
                b = add_mod(b, c, m);
            }
            indices.push(a);
        }
        indices
    }
}

/// Enhanced double hashing: `a += b; b += i (mod m)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnhancedDoubleHashing {
    functions: [HashFunction; 2],
}

impl EnhancedDoubleHashing {
    /// Create from two distinct hash functions
    pub fn new(first: HashFunction, second: HashFunction) -> Result<Self> {
        Self::from_functions(&[first, second])
    }

    /// Create from a slice that must hold exactly two distinct hash functions
    pub fn from_functions(functions: &[HashFunction]) -> Result<Self> {
        validate_functions(StrategyKind::EnhancedDouble, functions)?;
        Ok(Self {
            functions: [functions[0], functions[1]],
        })
    }
}

impl Default for EnhancedDoubleHashing {
    /// SHA-256 and SHA-512
    fn default() -> Self {
        Self {
            functions: DEFAULT_PAIR,
        }
    }
}

impl IndexStrategy for EnhancedDoubleHashing {
    fn kind(&self) -> StrategyKind {
        StrategyKind::EnhancedDouble
    }

    fn hash_functions(&self) -> &[HashFunction] {
        &self.functions
    }

    fn derive_indices(&self, payload: &[u8], k: usize, m: usize) -> Vec<usize> {
        if m == 0 {
            return Vec::new();
        }
        let mut a = self.functions[0].value_mod(payload, m);
        let mut b = self.functions[1].value_mod(payload, m);

        let mut indices = Vec::with_capacity(k);
        for i in 0..k {
            if i > 0 {
                a = add_mod(a, b, m);
                b = add_mod(b, i % m, m);
            }
            indices.push(a);
        }
        indices
    }
}

/// `(x + y) mod m` for `x, y < m` without overflow
#[inline]
fn add_mod(x: usize, y: usize, m: usize) -> usize {
    if x >= m - y {
        x - (m - y)
    } else {
        x + y
    }
}
