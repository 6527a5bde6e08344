//! Configuration types for the keyed stores.

use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::errors::StoreConfigError;

/// Which entry a full store drops to make room for a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Drop the entry that was inserted first.
    #[default]
    Fifo,
    /// Drop the entry that was read or written least recently.
    Lru,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Lru => "lru",
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = StoreConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lru" => Ok(Self::Lru),
            _ => Err(StoreConfigError::UnknownEviction(s.to_string())),
        }
    }
}

impl std::fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a [`MemoryStore`](crate::MemoryStore).
///
/// Stores are unbounded by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of entries, or `None` for no limit.
    pub capacity: Option<NonZeroUsize>,
    /// Applied only when `capacity` is set.
    pub eviction: EvictionPolicy,
}

impl StoreConfig {
    /// Create a config with no capacity limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create a config holding at most `capacity` entries.
    pub fn bounded(capacity: usize, eviction: EvictionPolicy) -> Result<Self, StoreConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(StoreConfigError::ZeroCapacity)?;
        Ok(Self {
            capacity: Some(capacity),
            eviction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eviction_policy() {
        assert_eq!("fifo".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Fifo));
        assert_eq!(" LRU ".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!(
            "random".parse::<EvictionPolicy>(),
            Err(StoreConfigError::UnknownEviction("random".to_string()))
        );
    }

    #[test]
    fn test_default_is_unbounded() {
        let config = StoreConfig::default();
        assert_eq!(config, StoreConfig::unbounded());
        assert!(config.capacity.is_none());
        assert_eq!(config.eviction, EvictionPolicy::Fifo);
    }

    #[test]
    fn test_bounded_rejects_zero() {
        assert_eq!(
            StoreConfig::bounded(0, EvictionPolicy::Lru),
            Err(StoreConfigError::ZeroCapacity)
        );

        let config = StoreConfig::bounded(3, EvictionPolicy::Lru).unwrap();
        assert_eq!(config.capacity.map(NonZeroUsize::get), Some(3));
    }
}
