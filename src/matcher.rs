use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    config::ArchiveConfig,
    error::Result,
    score::Scorer,
    table::{self, YearRow, YearTable},
};

/// A table row that fuzzy-matched a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRow {
    pub year: u32,
    #[serde(flatten)]
    pub row: YearRow,
    pub match_score: u8,
}

/// Score every distinct target name in `table` against `query`.
///
/// Names keep table order. With `limit = Some(n)` only the `n` best
/// scores survive; ties keep table order.
pub fn score_candidates<'a>(
    table: &'a YearTable,
    query: &str,
    scorer: &dyn Scorer,
    limit: Option<usize>,
) -> IndexMap<&'a str, u8> {
    let mut scores: IndexMap<&str, u8> = IndexMap::new();
    for row in &table.rows {
        scores
            .entry(row.target.as_str())
            .or_insert_with(|| scorer.score(query, &row.target));
    }

    if let Some(limit) = limit {
        let mut ranked: Vec<(&str, u8)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        scores = ranked.into_iter().collect();
    }

    scores
}

/// Rows of `table` whose target scored at least `min_score`, in table
/// order, annotated with that score.
pub fn match_table(
    table: &YearTable,
    query: &str,
    min_score: u8,
    scorer: &dyn Scorer,
    limit: Option<usize>,
) -> Vec<MatchedRow> {
    let scores = score_candidates(table, query, scorer, limit);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let score = *scores.get(row.target.as_str())?;
            (score >= min_score).then(|| MatchedRow {
                year: table.year,
                row: row.clone(),
                match_score: score,
            })
        })
        .collect()
}

/// Fuzzy-match `query` against the targets observed in `year`.
///
/// A year without a directory yields no rows.
pub fn match_year(
    config: &ArchiveConfig,
    year: u32,
    query: &str,
    min_score: u8,
    scorer: &dyn Scorer,
) -> Result<Vec<MatchedRow>> {
    let Some(table) = table::list_year_summary(config, year)? else {
        return Ok(Vec::new());
    };

    let matches =
        match_table(&table, query, min_score, scorer, config.candidate_limit);
    tracing::debug!(year, query, matches = matches.len(), "matched year");
    Ok(matches)
}
