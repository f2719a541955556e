//! Corpus-wide statistics shared by every scorer.
//!
//! The table is supplied by the caller (however it was built) and is never mutated afterwards,
//! so a single [`CorpusStats`] can be shared across threads without locking.

use crate::Error;
use rustc_hash::FxHashMap;

/// Per-term corpus counts: `(total occurrences, documents containing the term)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TermStats {
    term_count: u64,
    doc_frequency: u64,
}

/// Immutable corpus statistics.
///
/// Deliberately neither `Clone` nor `Default`: wrap it in an `Arc` to share it.
#[derive(Debug)]
pub struct CorpusStats {
    per_word: FxHashMap<String, TermStats>,
    total_docs: u64,
    total_word_count: u64,
    vocab_size: u64,
    smoothing_denominator: f64,
}

impl CorpusStats {
    /// Build corpus statistics from `token -> (corpus term count, document frequency)` entries.
    ///
    /// Rejects `total_docs == 0`, document frequencies of zero or above `total_docs`, and
    /// tables whose term counts overflow `u64`. A repeated token keeps its last entry.
    pub fn new<I, K>(counts: I, total_docs: u64) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, (u64, u64))>,
        K: Into<String>,
    {
        if total_docs == 0 {
            tracing::warn!("rejecting corpus statistics with zero documents");
            return Err(Error::EmptyCorpus);
        }

        let iter = counts.into_iter();
        let mut per_word: FxHashMap<String, TermStats> =
            FxHashMap::with_capacity_and_hasher(iter.size_hint().0, Default::default());
        for (term, (term_count, doc_frequency)) in iter {
            let term = term.into();
            if doc_frequency == 0 {
                tracing::warn!(term = %term, "rejecting corpus statistics: zero document frequency");
                return Err(Error::ZeroDocFrequency { term });
            }
            if doc_frequency > total_docs {
                tracing::warn!(
                    term = %term,
                    doc_frequency,
                    total_docs,
                    "rejecting corpus statistics: document frequency exceeds corpus size"
                );
                return Err(Error::DocFrequencyExceedsTotal {
                    term,
                    doc_frequency,
                    total_docs,
                });
            }
            per_word.insert(
                term,
                TermStats {
                    term_count,
                    doc_frequency,
                },
            );
        }

        // Totals come from the deduplicated map so repeated keys are counted once.
        let mut total_word_count: u64 = 0;
        for stats in per_word.values() {
            total_word_count = total_word_count
                .checked_add(stats.term_count)
                .ok_or(Error::WordCountOverflow)?;
        }
        let vocab_size = per_word.len() as u64;
        let smoothing_denominator = total_word_count as f64 + vocab_size as f64 + 1.0;

        tracing::debug!(
            total_docs,
            total_word_count,
            vocab_size,
            "built corpus statistics"
        );

        Ok(Self {
            per_word,
            total_docs,
            total_word_count,
            vocab_size,
            smoothing_denominator,
        })
    }

    /// Number of documents in the corpus (always >= 1).
    pub fn total_docs(&self) -> u64 {
        self.total_docs
    }

    /// Corpus size in tokens (sum of every term's corpus count).
    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    /// Number of distinct terms in the table.
    pub fn vocab_size(&self) -> u64 {
        self.vocab_size
    }

    /// `total_word_count + vocab_size + 1`, the add-one smoothing denominator.
    pub fn smoothing_denominator(&self) -> f64 {
        self.smoothing_denominator
    }

    /// Average document length in tokens.
    pub fn avg_doc_len(&self) -> f64 {
        self.total_word_count as f64 / self.total_docs as f64
    }

    /// Whether `term` appears in the corpus table.
    pub fn contains(&self, term: &str) -> bool {
        self.per_word.contains_key(term)
    }

    /// Total occurrences of `term` in the corpus (0 if unseen).
    pub fn term_count(&self, term: &str) -> u64 {
        self.per_word.get(term).map_or(0, |s| s.term_count)
    }

    /// Number of corpus documents containing `term` (0 if unseen).
    pub fn doc_frequency(&self, term: &str) -> u64 {
        self.per_word.get(term).map_or(0, |s| s.doc_frequency)
    }

    /// Inverse document frequency: `ln(total_docs / df)`.
    ///
    /// Unseen terms are treated as occurring in exactly one document, so they get the maximum
    /// finite IDF rather than an infinite one.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.per_word.get(term).map_or(1, |s| s.doc_frequency);
        (self.total_docs as f64 / df as f64).ln()
    }

    /// Corpus unigram probability with add-one smoothing:
    /// `(term_count + 1) / smoothing_denominator`. Always in `(0, 1)`.
    pub fn corpus_probability(&self, term: &str) -> f64 {
        (self.term_count(term) as f64 + 1.0) / self.smoothing_denominator
    }

    /// Iterate `(term, (term_count, doc_frequency))` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, (u64, u64))> + '_ {
        self.per_word
            .iter()
            .map(|(t, s)| (t.as_str(), (s.term_count, s.doc_frequency)))
    }
}
