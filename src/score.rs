//! String similarity scoring for fuzzy target lookup.
//!
//! Scores are integers in `0..=100`. Both inputs are trimmed and
//! lowercased before comparison.

/// Similarity between a query and a candidate name.
pub trait Scorer {
    fn score(&self, query: &str, candidate: &str) -> u8;
}

/// Normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

/// Jaro-Winkler similarity, which favours shared prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Scorer for Levenshtein {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        to_score(strsim::normalized_levenshtein(
            &normalize(query),
            &normalize(candidate),
        ))
    }
}

impl Scorer for JaroWinkler {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        to_score(strsim::jaro_winkler(&normalize(query), &normalize(candidate)))
    }
}

/// Selectable scoring algorithm.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum,
)]
pub enum ScorerKind {
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl ScorerKind {
    pub fn scorer(self) -> Box<dyn Scorer> {
        match self {
            Self::Levenshtein => Box::new(Levenshtein),
            Self::JaroWinkler => Box::new(JaroWinkler),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn to_score(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}
