//! Cosine TF-IDF similarity.
//!
//! Uses the "tfc · nfx" weighting: documents get raw term frequency times IDF, cosine
//! normalized over the whole document vector; queries get augmented term frequency
//! (`0.5 + 0.5 * tf / max_tf`) times IDF, unnormalized.
//!
//! References:
//! - Salton & Buckley (1988). "Term-weighting approaches in automatic text retrieval", Table 2.

use crate::corpus::CorpusStats;
use crate::counts::{ensure_scorable, WordCounts};
use crate::Error;

/// Augmented query term frequency, in `[0.5, 1.0]` for `0 < count <= max_count`.
fn augmented_tf(count: u64, max_count: u64) -> f64 {
    0.5 + 0.5 * count as f64 / max_count as f64
}

/// Euclidean length of the full `tf * idf` document vector.
fn document_norm(stats: &CorpusStats, document: &WordCounts) -> f64 {
    document
        .iter()
        .map(|(term, count)| {
            let w = count as f64 * stats.idf(term);
            w * w
        })
        .sum::<f64>()
        .sqrt()
}

/// TF-IDF cosine similarity between a document and a query.
///
/// Only query terms contribute to the inner product, but the document vector is normalized
/// over all of its terms. A document made only of terms that occur in every corpus document
/// has a zero-length vector and scores 0.
pub fn score_tfidf(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
) -> Result<f64, Error> {
    ensure_scorable(document, query)?;
    Ok(cosine(stats, document, query))
}

/// [`score_tfidf`] for inputs the caller has already checked are non-empty.
pub(crate) fn cosine(stats: &CorpusStats, document: &WordCounts, query: &WordCounts) -> f64 {
    let max_query = query.max_count();
    let mut dot = 0.0;
    for (term, query_count) in query.iter() {
        let doc_count = document.get(term);
        if doc_count == 0 {
            continue;
        }
        let idf = stats.idf(term);
        let query_weight = augmented_tf(query_count, max_query) * idf;
        let doc_weight = idf * doc_count as f64;
        dot += query_weight * doc_weight;
    }

    let norm = document_norm(stats, document);
    if norm == 0.0 {
        return 0.0;
    }
    dot / norm
}
