//! One-stop scorer: all five relevance signals for a `(document, query)` pair.

use crate::bm25::{okapi, Bm25Params};
use crate::corpus::CorpusStats;
use crate::counts::{count_words, ensure_scorable, WordCounts};
use crate::query_likelihood::{all_methods, LmParams};
use crate::tfidf::cosine;
use crate::Error;

/// Tuning parameters for every scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScorerConfig {
    /// BM25 `k1` and `b`.
    pub bm25: Bm25Params,
    /// Language-model `lambda`, `mu` and `delta`.
    pub lm: LmParams,
}

impl ScorerConfig {
    /// Set BM25 term-frequency saturation.
    pub fn with_k1(mut self, k1: f64) -> Self {
        self.bm25.k1 = k1;
        self
    }

    /// Set BM25 length normalization strength.
    pub fn with_b(mut self, b: f64) -> Self {
        self.bm25.b = b;
        self
    }

    /// Set the Jelinek-Mercer corpus weight.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lm.lambda = lambda;
        self
    }

    /// Set the Dirichlet prior strength.
    pub fn with_mu(mut self, mu: f64) -> Self {
        self.lm.mu = mu;
        self
    }

    /// Set the absolute-discount constant.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.lm.delta = delta;
        self
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<(), Error> {
        self.bm25.validate()?;
        self.lm.validate()
    }
}

/// Relevance signals for one `(document, query)` pair.
///
/// Higher is more relevant within each field; fields are not comparable with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    /// Cosine TF-IDF similarity.
    pub tfidf: f64,
    /// Okapi BM25.
    pub bm25: f64,
    /// Query log-likelihood, Jelinek-Mercer smoothing.
    pub lm_jm: f64,
    /// Query log-likelihood, Dirichlet smoothing.
    pub lm_dirichlet: f64,
    /// Query log-likelihood, absolute discounting.
    pub lm_ad: f64,
}

/// Scores documents against queries using one corpus's statistics.
///
/// Build once per corpus; `score` takes `&self`, so a scorer behind an `Arc` can serve any
/// number of threads.
#[derive(Debug)]
pub struct Scorer {
    stats: CorpusStats,
    config: ScorerConfig,
}

impl Scorer {
    /// Create a scorer with explicit tuning parameters.
    pub fn new(stats: CorpusStats, config: ScorerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::from_parts(stats, config))
    }

    /// Create a scorer with the default parameters.
    pub fn with_defaults(stats: CorpusStats) -> Self {
        Self::from_parts(stats, ScorerConfig::default())
    }

    // `config` must already be valid.
    fn from_parts(stats: CorpusStats, config: ScorerConfig) -> Self {
        tracing::debug!(
            total_docs = stats.total_docs(),
            vocab_size = stats.vocab_size(),
            k1 = config.bm25.k1,
            b = config.bm25.b,
            lambda = config.lm.lambda,
            mu = config.lm.mu,
            delta = config.lm.delta,
            "created scorer"
        );
        Self { stats, config }
    }

    /// Build corpus statistics from a counts table and wrap them in a default scorer.
    pub fn from_counts<I, K>(counts: I, total_docs: u64) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, (u64, u64))>,
        K: Into<String>,
    {
        Ok(Self::with_defaults(CorpusStats::new(counts, total_docs)?))
    }

    /// Corpus statistics this scorer was built from.
    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// Tuning parameters in use.
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score a tokenized document against a tokenized query.
    ///
    /// Both token lists must be non-empty and normalized the same way as the corpus table.
    pub fn score<D, Q>(&self, document: &[D], query: &[Q]) -> Result<ScoreResult, Error>
    where
        D: AsRef<str>,
        Q: AsRef<str>,
    {
        self.score_counts(&count_words(document), &count_words(query))
    }

    /// Score pre-counted inputs.
    ///
    /// Lets callers count a document once and score it against many queries.
    pub fn score_counts(
        &self,
        document: &WordCounts,
        query: &WordCounts,
    ) -> Result<ScoreResult, Error> {
        ensure_scorable(document, query)?;

        // The config was validated when the scorer was built.
        let tfidf = cosine(&self.stats, document, query);
        let bm25 = okapi(&self.stats, document, query, self.config.bm25);
        let lm = all_methods(&self.stats, document, query, self.config.lm);

        let result = ScoreResult {
            tfidf,
            bm25,
            lm_jm: lm.jm,
            lm_dirichlet: lm.dirichlet,
            lm_ad: lm.ad,
        };
        tracing::trace!(
            doc_len = document.total(),
            query_len = query.total(),
            ?result,
            "scored document"
        );
        Ok(result)
    }
}
