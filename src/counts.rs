//! Per-sequence term counts.
//!
//! Both the document and the query are reduced to a bag of terms before any scoring happens.
//! A [`WordCounts`] may be built once for a document and reused against many queries.

use crate::Error;
use rustc_hash::FxHashMap;

/// Occurrence counts of each distinct token in one token sequence.
///
/// Iteration order depends only on the tokens inserted, never on a per-process seed, so
/// floating-point sums taken over it are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: FxHashMap<String, u64>,
    total: u64,
}

impl WordCounts {
    /// Count of `token` in the sequence (0 if absent).
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Whether `token` occurs at least once.
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the sequence was empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Length of the original sequence (sum of all counts).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Largest single-token count, 0 for an empty sequence.
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Iterate `(token, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut counts: FxHashMap<String, u64> =
            FxHashMap::with_capacity_and_hasher(iter.size_hint().0, Default::default());
        let mut total = 0u64;
        for token in iter {
            let token = token.as_ref();
            // Avoid allocating a key for tokens we've already seen.
            match counts.get_mut(token) {
                Some(c) => *c += 1,
                None => {
                    counts.insert(token.to_owned(), 1);
                }
            }
            total += 1;
        }
        Self { counts, total }
    }
}

/// Count occurrences of each distinct token in `tokens`.
///
/// Empty input yields empty counts.
pub fn count_words<S: AsRef<str>>(tokens: &[S]) -> WordCounts {
    tokens.iter().collect()
}

/// Reject empty documents or queries before any arithmetic can divide by zero.
pub(crate) fn ensure_scorable(document: &WordCounts, query: &WordCounts) -> Result<(), Error> {
    if document.is_empty() {
        return Err(Error::EmptyDocument);
    }
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(())
}
