//! Errors surfaced by evictkit.
//!
//! A missing key is not an error: lookups return `None` (or `NOT_FOUND`
//! through [`IntCache`](crate::traits::IntCache)). Errors only come from two
//! places:
//!
//! | Type               | Raised by                                           |
//! |--------------------|-----------------------------------------------------|
//! | [`ConfigError`]    | `try_new`, `CacheBuilder::try_from_signed`          |
//! | [`InvariantError`] | `check_invariants` on the caches and `FrequencyBuckets` |
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru::LruCache;
//!
//! assert!(LruCache::<i64, i64>::try_new(16).is_ok());
//! assert_eq!(
//!     LruCache::<i64, i64>::try_new(-1).unwrap_err(),
//!     ConfigError::NegativeCapacity { requested: -1 },
//! );
//! ```

use std::fmt;

/// Rejected construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A signed capacity below zero. Never clamped to zero.
    NegativeCapacity { requested: i64 },
    /// A non-negative capacity that does not fit in `usize` on this target.
    CapacityOverflow { requested: i64 },
}

impl ConfigError {
    /// The capacity the caller asked for.
    pub fn requested(&self) -> i64 {
        match *self {
            Self::NegativeCapacity { requested } | Self::CapacityOverflow { requested } => {
                requested
            },
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCapacity { requested } => {
                write!(f, "capacity must be non-negative, got {requested}")
            },
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity {requested} does not fit in usize")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// A broken internal link or count found by `check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }

    /// What was found to be inconsistent.
    pub fn detail(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}

/// Turns a signed capacity into a `usize`.
///
/// Zero is accepted: a zero-capacity cache is valid and stores nothing.
pub fn checked_capacity(capacity: i64) -> Result<usize, ConfigError> {
    if capacity < 0 {
        return Err(ConfigError::NegativeCapacity {
            requested: capacity,
        });
    }
    usize::try_from(capacity).map_err(|_| ConfigError::CapacityOverflow {
        requested: capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_positive_capacities_pass_through() {
        assert_eq!(checked_capacity(0), Ok(0));
        assert_eq!(checked_capacity(2), Ok(2));
    }

    #[test]
    fn negative_capacity_is_reported_not_clamped() {
        let err = checked_capacity(-1).unwrap_err();
        assert_eq!(err, ConfigError::NegativeCapacity { requested: -1 });
        assert_eq!(err.requested(), -1);
        assert_eq!(err.to_string(), "capacity must be non-negative, got -1");
        assert!(matches!(
            checked_capacity(i64::MIN),
            Err(ConfigError::NegativeCapacity { .. })
        ));
    }

    #[test]
    fn invariant_error_prefixes_detail() {
        let err = InvariantError::new("index has 3 keys, list has 2 nodes");
        assert_eq!(err.detail(), "index has 3 keys, list has 2 nodes");
        assert_eq!(
            err.to_string(),
            "cache invariant violated: index has 3 keys, list has 2 nodes"
        );
    }

    #[test]
    fn both_errors_box_as_std_error() {
        let boxed: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(ConfigError::NegativeCapacity { requested: -4 }),
            Box::new(InvariantError::new("stale tail")),
        ];
        assert!(boxed[0].to_string().contains("-4"));
        assert!(boxed[1].to_string().ends_with("stale tail"));
    }
}
