//! End-to-end scoring against a small hand-countable corpus.

use qdrel::{CorpusStats, Error, ErrorKind, Scorer, ScorerConfig};
use std::sync::Arc;

// Counts for the three documents:
//   "he went down to the store"
//   "he needed a shovel from the store to shovel the snow"
//   "the snow was five feet deep"
const CORPUS: &[(&str, (u64, u64))] = &[
    ("a", (1, 1)),
    ("deep", (1, 1)),
    ("down", (1, 1)),
    ("feet", (1, 1)),
    ("five", (1, 1)),
    ("from", (1, 1)),
    ("he", (2, 2)),
    ("needed", (1, 1)),
    ("shovel", (2, 1)),
    ("snow", (2, 2)),
    ("store", (2, 2)),
    ("the", (4, 3)),
    ("to", (2, 2)),
    ("was", (1, 1)),
    ("went", (1, 1)),
];
const NDOCS: u64 = 3;

const DOCUMENT: &[&str] = &["the", "store", "sells", "snow", "shovel", "snow"];
const QUERY: &[&str] = &["buy", "snow", "shovel", "shovel"];

fn stats() -> CorpusStats {
    CorpusStats::new(CORPUS.iter().copied(), NDOCS).unwrap()
}

fn scorer() -> Scorer {
    Scorer::with_defaults(stats())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

#[test]
fn corpus_totals() {
    let stats = stats();
    assert_eq!(stats.total_word_count(), 23);
    assert_eq!(stats.vocab_size(), 15);
    assert_eq!(stats.smoothing_denominator(), 39.0);
}

#[test]
fn idf_lookup() {
    let stats = stats();
    assert!(close(stats.idf("deep"), 3f64.ln()));
    assert!(close(stats.idf("the"), 0.0));
    assert!(close(stats.idf("not_in_corpus"), 3f64.ln()));
}

#[test]
fn empty_document_or_query_is_rejected() {
    let scorer = scorer();
    let empty: &[&str] = &[];
    assert_eq!(scorer.score(empty, QUERY), Err(Error::EmptyDocument));
    assert_eq!(scorer.score(DOCUMENT, empty), Err(Error::EmptyQuery));
    let err = scorer.score(empty, empty).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn tfidf_cosine() {
    let scorer = scorer();
    let idf = |t: &str| scorer.stats().idf(t);
    let got = scorer.score(DOCUMENT, QUERY).unwrap().tfidf;

    let max_query_tf = 2.0;
    let query_vector = [
        (0.5 + 0.5 / max_query_tf) * idf("buy"),
        (0.5 + 0.5 / max_query_tf) * idf("snow"),
        (0.5 + 0.5 * 2.0 / max_query_tf) * idf("shovel"),
    ];
    let doc_vector = [0.0, 2.0 * idf("snow"), idf("shovel")];
    let doc_length = [
        idf("the"),
        idf("store"),
        idf("sells"),
        2.0 * idf("snow"),
        idf("shovel"),
    ]
    .iter()
    .map(|w| w * w)
    .sum::<f64>()
    .sqrt();
    let dot: f64 = query_vector
        .iter()
        .zip(doc_vector.iter())
        .map(|(q, d)| q * d)
        .sum();

    assert!(close(got, dot / doc_length));
}

#[test]
fn bm25_okapi() {
    let scorer = scorer();
    let got = scorer.score(DOCUMENT, QUERY).unwrap().bm25;

    let (k1, b) = (1.6, 0.75);
    let lave = 23.0 / 3.0;
    let ld = 6.0;
    let norm = k1 * ((1.0 - b) + b * (ld / lave));
    let snow = (3.0f64 / 2.0).ln() * (k1 + 1.0) * 2.0 / (norm + 2.0);
    let shovel = 3f64.ln() * (k1 + 1.0) * 1.0 / (norm + 1.0);
    // "buy" is not in the document; "shovel" appears twice in the query.
    let expected = snow + 2.0 * shovel;

    assert!(close(got, expected));
}

#[test]
fn language_models() {
    let scorer = scorer();
    let got = scorer.score(DOCUMENT, QUERY).unwrap();

    let p = |t: &str| scorer.stats().corpus_probability(t);
    let (lambda, mu, delta) = (0.1, 2000.0, 0.7);
    let ld = 6.0;
    let unique = 5.0;

    let jm = (lambda * p("buy")).ln()
        + ((1.0 - lambda) * 2.0 / ld + lambda * p("snow")).ln()
        + 2.0 * ((1.0 - lambda) * 1.0 / ld + lambda * p("shovel")).ln();
    assert!(close(got.lm_jm, jm));

    let dirichlet = (mu / (ld + mu) * p("buy")).ln()
        + ((2.0 + mu * p("snow")) / (ld + mu)).ln()
        + 2.0 * ((1.0 + mu * p("shovel")) / (ld + mu)).ln();
    assert!(close(got.lm_dirichlet, dirichlet));

    let alpha = delta * unique / ld;
    let ad = (alpha * p("buy")).ln()
        + ((2.0 - delta) / ld + alpha * p("snow")).ln()
        + 2.0 * ((1.0 - delta) / ld + alpha * p("shovel")).ln();
    assert!(close(got.lm_ad, ad));
}

#[test]
fn pets_scenario() {
    let scorer = Scorer::from_counts([("cat", (3, 2)), ("dog", (5, 3))], 10).unwrap();
    assert!(close(scorer.stats().idf("cat"), 5f64.ln()));
    assert!(close(scorer.stats().idf("fish"), 10f64.ln()));

    let s = scorer.score(&["cat", "cat", "dog"], &["cat"]).unwrap();
    assert!(s.bm25 > 0.0);
    assert!(s.tfidf > 0.0);
    for lm in [s.lm_jm, s.lm_dirichlet, s.lm_ad] {
        assert!(lm.is_finite() && lm < 0.0, "lm score {lm}");
    }
}

#[test]
fn zero_docs_is_invalid_corpus() {
    let err = Scorer::from_counts(CORPUS.iter().copied(), 0).unwrap_err();
    assert_eq!(err, Error::EmptyCorpus);
    assert_eq!(err.kind(), ErrorKind::InvalidCorpus);
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let scorer = scorer();
    let a = scorer.score(DOCUMENT, QUERY).unwrap();
    let b = scorer.score(DOCUMENT, QUERY).unwrap();
    assert_eq!(a.tfidf.to_bits(), b.tfidf.to_bits());
    assert_eq!(a.bm25.to_bits(), b.bm25.to_bits());
    assert_eq!(a.lm_jm.to_bits(), b.lm_jm.to_bits());
    assert_eq!(a.lm_dirichlet.to_bits(), b.lm_dirichlet.to_bits());
    assert_eq!(a.lm_ad.to_bits(), b.lm_ad.to_bits());
}

#[test]
fn tuned_scorer_uses_its_parameters() {
    let config = ScorerConfig::default().with_k1(1.2).with_b(0.0);
    let scorer = Scorer::new(stats(), config).unwrap();
    let got = scorer.score(DOCUMENT, &["snow"]).unwrap().bm25;
    let expected = (3.0f64 / 2.0).ln() * 2.2 * 2.0 / (1.2 + 2.0);
    assert!(close(got, expected));
}

#[test]
fn shared_across_threads() {
    let scorer = Arc::new(scorer());
    let expected = scorer.score(DOCUMENT, QUERY).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            let scorer = Arc::clone(&scorer);
            s.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(scorer.score(DOCUMENT, QUERY).unwrap(), expected);
                }
            });
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn config_and_results_serialize() {
    let config: ScorerConfig = serde_json::from_str(r#"{"bm25": {"k1": 1.2}}"#).unwrap();
    assert_eq!(config.bm25.k1, 1.2);
    assert_eq!(config.bm25.b, 0.75);
    assert_eq!(config.lm, qdrel::LmParams::default());

    let result = scorer().score(DOCUMENT, QUERY).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: qdrel::ScoreResult = serde_json::from_str(&json).unwrap();
    assert!(close(back.tfidf, result.tfidf));
    assert!(close(back.bm25, result.bm25));
    assert!(close(back.lm_jm, result.lm_jm));
    assert!(close(back.lm_dirichlet, result.lm_dirichlet));
    assert!(close(back.lm_ad, result.lm_ad));
}
