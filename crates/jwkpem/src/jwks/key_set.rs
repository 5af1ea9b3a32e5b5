//! Converted keys indexed by key ID

use crate::jwks::codec::ConvertedKey;
use std::collections::BTreeMap;

/// Mapping from `kid` to its converted key
///
/// Keys are unique; inserting a key whose `kid` is already present replaces
/// the previous entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: BTreeMap<String, ConvertedKey>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, returning the entry it replaced
    pub fn insert(&mut self, key: ConvertedKey) -> Option<ConvertedKey> {
        self.keys.insert(key.kid.clone(), key)
    }

    pub fn get(&self, kid: &str) -> Option<&ConvertedKey> {
        self.keys.get(kid)
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn kids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConvertedKey> {
        self.keys.values()
    }

    /// Serialize as a JSON object keyed by `kid`
    pub fn to_json(&self) -> String {
        miniserde::json::to_string(&self.keys)
    }
}

impl FromIterator<ConvertedKey> for KeySet {
    fn from_iter<I: IntoIterator<Item = ConvertedKey>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}
