//! Okapi BM25.
//!
//! Standard BM25 with raw `ln(N / df)` IDF, weighted by query term frequency. The average
//! document length comes from the corpus statistics, not from the document being scored.
//!
//! References:
//! - Manning, Raghavan & Schütze (2008). "Introduction to Information Retrieval", §11.4.3.
//! - Robertson & Zaragoza (2009). "The Probabilistic Relevance Framework: BM25 and Beyond."

use crate::corpus::CorpusStats;
use crate::counts::{ensure_scorable, WordCounts};
use crate::Error;

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Bm25Params {
    /// Term-frequency saturation rate.
    pub k1: f64,
    /// Length normalization strength, in `[0, 1]`.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.6, b: 0.75 }
    }
}

impl Bm25Params {
    /// Create BM25 parameters.
    pub fn new(k1: f64, b: f64) -> Self {
        Self { k1, b }
    }

    /// Check that `k1` is finite and non-negative and `b` lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Error::InvalidConfig("k1 must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidConfig("b must be in [0, 1]"));
        }
        Ok(())
    }
}

/// BM25 term-frequency component for one term.
fn bm25_tf(tf: f64, length_ratio: f64, k1: f64, b: f64) -> f64 {
    (k1 + 1.0) * tf / (k1 * ((1.0 - b) + b * length_ratio) + tf)
}

/// BM25 score of a document for a query.
///
/// Query terms absent from the document contribute nothing; repeated query terms count once
/// per occurrence.
pub fn score_bm25(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
    params: Bm25Params,
) -> Result<f64, Error> {
    ensure_scorable(document, query)?;
    Ok(okapi(stats, document, query, params))
}

/// [`score_bm25`] for inputs the caller has already checked are non-empty.
pub(crate) fn okapi(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
    params: Bm25Params,
) -> f64 {
    let avg_doc_len = stats.avg_doc_len();
    // An empty corpus table has no length signal; treat every document as average.
    let length_ratio = if avg_doc_len > 0.0 {
        document.total() as f64 / avg_doc_len
    } else {
        1.0
    };

    let mut score = 0.0;
    for (term, query_count) in query.iter() {
        let tf = document.get(term);
        if tf == 0 {
            continue;
        }
        let idf = stats.idf(term);
        score += query_count as f64 * idf * bm25_tf(tf as f64, length_ratio, params.k1, params.b);
    }
    score
}
