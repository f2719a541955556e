//! Query likelihood language model scoring.
//!
//! Scores a document by \(\log P(Q|D)\): the log-probability that the document's smoothed
//! unigram model generated the query. Three smoothing methods are supported, all mixing the
//! document's maximum-likelihood model with an add-one smoothed corpus model
//! \(P(w|C) = (\mathrm{cf}_w + 1) / (|C| + |V| + 1)\).
//!
//! Each method reserves some "escape" probability mass \(\alpha_D\) for terms the document does
//! not contain; such terms are scored as \(\alpha_D P(w|C)\).
//!
//! Default parameters are the ones Zhai & Lafferty found best for short (title) queries.
//!
//! References:
//! - Ponte & Croft (1998). "A language modeling approach to information retrieval."
//! - Zhai & Lafferty (2001). "A study of smoothing methods for language models applied to
//!   ad hoc information retrieval", Table 1.

use crate::corpus::CorpusStats;
use crate::counts::{ensure_scorable, WordCounts};
use crate::Error;

/// Smoothing method for query likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingMethod {
    /// Jelinek-Mercer: fixed interpolation with the corpus model.
    ///
    /// `lambda` is the corpus weight, in `(0, 1]`.
    JelinekMercer {
        /// Interpolation weight given to the corpus model.
        lambda: f64,
    },
    /// Dirichlet prior: interpolation weight shrinks as documents get longer.
    ///
    /// `mu` must be finite and `> 0`.
    Dirichlet {
        /// Prior strength, in pseudo-tokens.
        mu: f64,
    },
    /// Absolute discounting: subtract a constant from every seen term count.
    ///
    /// `delta` is in `(0, 1]`.
    AbsoluteDiscount {
        /// Discount applied to each seen term count.
        delta: f64,
    },
}

impl Default for SmoothingMethod {
    fn default() -> Self {
        Self::Dirichlet { mu: 2000.0 }
    }
}

impl SmoothingMethod {
    /// Check the method's parameter is in range.
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Self::JelinekMercer { lambda } => {
                if !(lambda > 0.0 && lambda <= 1.0) {
                    return Err(Error::InvalidConfig("lambda must be in (0, 1]"));
                }
            }
            Self::Dirichlet { mu } => {
                if !(mu.is_finite() && mu > 0.0) {
                    return Err(Error::InvalidConfig("mu must be finite and > 0"));
                }
            }
            Self::AbsoluteDiscount { delta } => {
                if !(delta > 0.0 && delta <= 1.0) {
                    return Err(Error::InvalidConfig("delta must be in (0, 1]"));
                }
            }
        }
        Ok(())
    }

    /// Probability mass \(\alpha_D\) left for terms absent from the document.
    fn escape_mass(&self, doc: &DocModel) -> f64 {
        match *self {
            Self::JelinekMercer { lambda } => lambda,
            Self::Dirichlet { mu } => mu / (doc.len + mu),
            Self::AbsoluteDiscount { delta } => delta * doc.unique_terms / doc.len,
        }
    }

    /// `ln P(w|D)` for a term occurring `tf` times in the document.
    fn seen_log_prob(&self, tf: f64, p_corpus: f64, doc: &DocModel, alpha: f64) -> f64 {
        match *self {
            Self::JelinekMercer { lambda } => {
                let p_ml = tf / doc.len;
                ((1.0 - lambda) * p_ml + lambda * p_corpus).ln()
            }
            Self::Dirichlet { mu } => ((tf + mu * p_corpus) / (doc.len + mu)).ln(),
            Self::AbsoluteDiscount { delta } => {
                ((tf - delta).max(0.0) / doc.len + alpha * p_corpus).ln()
            }
        }
    }
}

/// Document-side quantities shared by every smoothing method.
#[derive(Debug, Clone, Copy)]
struct DocModel {
    len: f64,
    unique_terms: f64,
}

impl DocModel {
    fn new(document: &WordCounts) -> Self {
        Self {
            len: document.total() as f64,
            unique_terms: document.len() as f64,
        }
    }
}

/// Smoothing parameters for all three methods.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LmParams {
    /// Jelinek-Mercer corpus weight.
    pub lambda: f64,
    /// Dirichlet prior strength.
    pub mu: f64,
    /// Absolute-discount constant.
    pub delta: f64,
}

impl Default for LmParams {
    fn default() -> Self {
        Self {
            lambda: 0.1,
            mu: 2000.0,
            delta: 0.7,
        }
    }
}

impl LmParams {
    /// Jelinek-Mercer smoothing with this `lambda`.
    pub fn jelinek_mercer(&self) -> SmoothingMethod {
        SmoothingMethod::JelinekMercer {
            lambda: self.lambda,
        }
    }

    /// Dirichlet smoothing with this `mu`.
    pub fn dirichlet(&self) -> SmoothingMethod {
        SmoothingMethod::Dirichlet { mu: self.mu }
    }

    /// Absolute discounting with this `delta`.
    pub fn absolute_discount(&self) -> SmoothingMethod {
        SmoothingMethod::AbsoluteDiscount { delta: self.delta }
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<(), Error> {
        self.jelinek_mercer().validate()?;
        self.dirichlet().validate()?;
        self.absolute_discount().validate()
    }
}

/// Log-likelihood scores under each smoothing method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmScores {
    /// Jelinek-Mercer.
    pub jm: f64,
    /// Dirichlet prior.
    pub dirichlet: f64,
    /// Absolute discounting.
    pub ad: f64,
}

fn term_log_prob(
    method: &SmoothingMethod,
    tf: u64,
    p_corpus: f64,
    doc: &DocModel,
    alpha: f64,
) -> f64 {
    if tf == 0 {
        (alpha * p_corpus).ln()
    } else {
        method.seen_log_prob(tf as f64, p_corpus, doc, alpha)
    }
}

/// Query log-likelihood of a document under one smoothing method.
pub fn score_query_likelihood(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
    method: SmoothingMethod,
) -> Result<f64, Error> {
    ensure_scorable(document, query)?;
    method.validate()?;

    let doc = DocModel::new(document);
    let alpha = method.escape_mass(&doc);
    let mut log_score = 0.0;
    for (term, query_count) in query.iter() {
        let p_corpus = stats.corpus_probability(term);
        let tf = document.get(term);
        log_score += query_count as f64 * term_log_prob(&method, tf, p_corpus, &doc, alpha);
    }
    Ok(log_score)
}

/// Query log-likelihood under all three smoothing methods in one pass over the query.
///
/// Equal to calling [`score_query_likelihood`] once per method.
pub fn score_all(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
    params: LmParams,
) -> Result<LmScores, Error> {
    ensure_scorable(document, query)?;
    params.validate()?;
    Ok(all_methods(stats, document, query, params))
}

/// [`score_all`] for inputs and parameters the caller has already validated.
pub(crate) fn all_methods(
    stats: &CorpusStats,
    document: &WordCounts,
    query: &WordCounts,
    params: LmParams,
) -> LmScores {
    let doc = DocModel::new(document);
    let methods = [
        params.jelinek_mercer(),
        params.dirichlet(),
        params.absolute_discount(),
    ];
    let alphas = methods.map(|m| m.escape_mass(&doc));

    let mut sums = [0.0f64; 3];
    for (term, query_count) in query.iter() {
        let p_corpus = stats.corpus_probability(term);
        let tf = document.get(term);
        for ((sum, method), &alpha) in sums.iter_mut().zip(&methods).zip(&alphas) {
            *sum += query_count as f64 * term_log_prob(method, tf, p_corpus, &doc, alpha);
        }
    }

    let [jm, dirichlet, ad] = sums;
    LmScores { jm, dirichlet, ad }
}
