//! Per-pair result collections
//!
//! Several endpoints (`Ticker`, `Depth`, `AssetPairs`, `Assets`) return an
//! object keyed by pair or asset name. The key space is defined by the
//! exchange at runtime, so lookups return `Option` instead of assuming the
//! key exists.

use crate::error::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from pair symbol (e.g. "XXBTZEUR") to a decoded record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairMap<T>(HashMap<String, T>);

impl<T> PairMap<T> {
    /// Look up a pair by exact key
    pub fn get(&self, pair: &str) -> Option<&T> {
        self.0.get(pair)
    }

    /// Look up a pair, treating absence as an error
    pub fn require(&self, pair: &str) -> DecodeResult<&T> {
        self.0
            .get(pair)
            .ok_or_else(|| DecodeError::UnknownPair(pair.to_string()))
    }

    /// Remove and return a pair's record
    pub fn take(&mut self, pair: &str) -> Option<T> {
        self.0.remove(pair)
    }

    /// True when the pair is present
    pub fn contains(&self, pair: &str) -> bool {
        self.0.contains_key(pair)
    }

    /// Pair names in the result
    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(pair, record)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no pairs were returned
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The single record when exactly one pair was returned
    ///
    /// Kraken normalizes pair names (`XBTUSD` comes back as `XXBTZUSD`), so
    /// single-pair queries are easier to consume this way.
    pub fn single(&self) -> Option<(&str, &T)> {
        if self.0.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Unwrap into the underlying map
    pub fn into_inner(self) -> HashMap<String, T> {
        self.0
    }
}

impl<T> Default for PairMap<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T> From<HashMap<String, T>> for PairMap<T> {
    fn from(map: HashMap<String, T>) -> Self {
        Self(map)
    }
}

impl<T> FromIterator<(String, T)> for PairMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for PairMap<T> {
    type Item = (String, T);
    type IntoIter = std::collections::hash_map::IntoIter<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
