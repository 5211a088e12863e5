//! Word-to-word correction table built from aligned training pairs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One aligned training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub obfuscated: String,
    pub original: String,
}

impl TrainingPair {
    pub fn new(obfuscated: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            obfuscated: obfuscated.into(),
            original: original.into(),
        }
    }
}

/// Splits text into whitespace-delimited tokens. No other normalization.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn token_count(text: &str) -> usize {
    tokens(text).count()
}

/// Lookup table from obfuscated token to restored token.
///
/// Built once from a training set and read-only afterward. When the same
/// obfuscated token is aligned with different corrections, the pair that
/// comes last in the training order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMapping {
    entries: HashMap<String, String>,
}

impl WordMapping {
    /// Aligns each pair position by position up to the shorter side.
    /// Tokens beyond that length on either side are ignored.
    pub fn build<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a TrainingPair>,
    {
        let mut entries = HashMap::new();
        for pair in pairs {
            for (obfuscated, original) in tokens(&pair.obfuscated).zip(tokens(&pair.original)) {
                entries.insert(obfuscated.to_string(), original.to_string());
            }
        }
        Self { entries }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for WordMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
