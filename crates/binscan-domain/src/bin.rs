//! Bin module - the normalized issuer identification number

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted identifier length
pub const BIN_MIN_LEN: usize = 6;

/// Longest accepted identifier length
pub const BIN_MAX_LEN: usize = 8;

/// A normalized BIN/IIN
///
/// Always 6 to 8 ASCII digits. Ordering is plain string ordering, which is the
/// processing order for enrichment and the order of every output artifact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bin(String);

impl Bin {
    /// Validate and wrap an identifier
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidBin`] unless the value is 6-8 ASCII digits
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let len_ok = (BIN_MIN_LEN..=BIN_MAX_LEN).contains(&value.len());
        if !len_ok || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidBin(value));
        }
        Ok(Self(value))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits (6, 7 or 8)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a `Bin` cannot be empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Bin {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Bin::parse(value)
    }
}

impl From<Bin> for String {
    fn from(bin: Bin) -> Self {
        bin.0
    }
}

impl AsRef<str> for Bin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
