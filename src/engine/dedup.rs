//! Order-preserving de-duplication of candidate keys.

use rustc_hash::FxHashMap;

use super::expression::CandidateKey;
use crate::language::LanguageSet;

/// An insertion-ordered set of candidate keys.
///
/// Inserting a phonetic string that is already present unions the
/// language sets instead of adding a second entry.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    index: FxHashMap<String, usize>,
    keys: Vec<CandidateKey>,
}

impl CandidateSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, merging languages with an existing entry.
    ///
    /// Returns true if the phonetic string was not present before.
    pub fn insert(&mut self, phonetic: &str, languages: LanguageSet) -> bool {
        if let Some(&i) = self.index.get(phonetic) {
            self.keys[i].languages |= languages;
            return false;
        }
        self.index.insert(phonetic.to_string(), self.keys.len());
        self.keys.push(CandidateKey::new(phonetic, languages));
        true
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the set holds no key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn as_slice(&self) -> &[CandidateKey] {
        &self.keys
    }

    /// Consume the set.
    pub fn into_vec(self) -> Vec<CandidateKey> {
        self.keys
    }
}

impl Extend<CandidateKey> for CandidateSet {
    fn extend<I: IntoIterator<Item = CandidateKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(&key.phonetic, key.languages);
        }
    }
}

impl FromIterator<CandidateKey> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = CandidateKey>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        set.extend(iter);
        set
    }
}

/// Drop repeated phonetic strings, keeping the first occurrence's position.
pub fn dedup(keys: Vec<CandidateKey>) -> Vec<CandidateKey> {
    keys.into_iter().collect::<CandidateSet>().into_vec()
}
