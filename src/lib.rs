//! `qdrel`: query-document relevance scoring over precomputed corpus statistics.
//!
//! Given a corpus-wide table of `token -> (corpus term count, document frequency)` and the
//! number of documents in the corpus, a [`Scorer`] produces five independent relevance signals
//! for a single `(document, query)` pair:
//! - cosine TF-IDF similarity (`tfidf`)
//! - Okapi BM25 (`bm25`)
//! - query-likelihood language models with Jelinek-Mercer, Dirichlet and absolute-discount
//!   smoothing (`lm_jm`, `lm_dirichlet`, `lm_ad`)
//!
//! Scope:
//! - Caller-provided token streams (tokenization and normalization happen upstream)
//! - Immutable, shareable corpus statistics
//! - One document at a time (no candidate generation, no ranking)
//!
//! Non-goals:
//! - Building or persisting the corpus statistics table
//! - Combining the five signals into a single rank
//!
//! ```
//! use qdrel::{CorpusStats, Scorer};
//!
//! let stats = CorpusStats::new([("cat", (3, 2)), ("dog", (5, 3))], 10)?;
//! let scorer = Scorer::with_defaults(stats);
//! let scores = scorer.score(&["cat", "cat", "dog"], &["cat"])?;
//! assert!(scores.bm25 > 0.0);
//! assert!(scores.lm_dirichlet < 0.0);
//! # Ok::<(), qdrel::Error>(())
//! ```
//!
//! References:
//! - Salton & Buckley (1988): term-weighting approaches in automatic text retrieval
//! - Robertson & Zaragoza (2009): BM25 and beyond
//! - Zhai & Lafferty (2001): smoothing methods for language models applied to ad hoc IR

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bm25;
pub mod corpus;
pub mod counts;
pub mod query_likelihood;
pub mod scorer;
pub mod tfidf;

pub use bm25::Bm25Params;
pub use corpus::CorpusStats;
pub use counts::{count_words, WordCounts};
pub use error::{Error, ErrorKind};
pub use query_likelihood::{LmParams, LmScores, SmoothingMethod};
pub use scorer::{ScoreResult, Scorer, ScorerConfig};

mod error {
    /// Errors for relevance scoring.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// Document token list was empty.
        #[error("empty document")]
        EmptyDocument,
        /// Query token list was empty.
        #[error("empty query")]
        EmptyQuery,
        /// Corpus statistics declared zero documents.
        #[error("corpus has no documents")]
        EmptyCorpus,
        /// A term claims to occur in more documents than the corpus holds.
        #[error("term {term:?} has document frequency {doc_frequency} > total docs {total_docs}")]
        DocFrequencyExceedsTotal {
            /// Offending term.
            term: String,
            /// Its declared document frequency.
            doc_frequency: u64,
            /// Declared corpus size in documents.
            total_docs: u64,
        },
        /// A term is listed in the corpus table but occurs in no document.
        #[error("term {term:?} has zero document frequency")]
        ZeroDocFrequency {
            /// Offending term.
            term: String,
        },
        /// Summing corpus term counts overflowed `u64`.
        #[error("corpus word count overflows u64")]
        WordCountOverflow,
        /// Scoring parameters were out of range.
        #[error("invalid scorer configuration: {0}")]
        InvalidConfig(&'static str),
    }

    /// Coarse classification of [`Error`], for callers that only branch on the category.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ErrorKind {
        /// The document or query passed to a scoring call was unusable.
        InvalidInput,
        /// The corpus statistics table was malformed.
        InvalidCorpus,
        /// Tuning parameters were out of range.
        InvalidConfig,
    }

    impl Error {
        /// Category of this error.
        pub fn kind(&self) -> ErrorKind {
            match self {
                Error::EmptyDocument | Error::EmptyQuery => ErrorKind::InvalidInput,
                Error::EmptyCorpus
                | Error::DocFrequencyExceedsTotal { .. }
                | Error::ZeroDocFrequency { .. }
                | Error::WordCountOverflow => ErrorKind::InvalidCorpus,
                Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            }
        }
    }
}
