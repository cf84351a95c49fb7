use serde_json::json;

use crate::{
    config::ArchiveConfig,
    error::Result,
    matcher::{self, MatchedRow},
    score::Scorer,
};

/// Fuzzy-search `query` across `years` and rank the combined results.
///
/// 1. Match each year independently (missing years contribute nothing)
/// 2. Concatenate in the order `years` was given
/// 3. Sort by match score, highest first; ties keep year-then-table order
///
/// The same target seen in several years yields one row per year.
pub fn search_target(
    config: &ArchiveConfig,
    query: &str,
    years: &[u32],
    min_score: u8,
    scorer: &dyn Scorer,
) -> Result<Vec<MatchedRow>> {
    let mut combined = Vec::new();
    for &year in years {
        combined.extend(matcher::match_year(
            config, year, query, min_score, scorer,
        )?);
    }

    combined.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    Ok(combined)
}

/// Format results for human-readable terminal output.
pub fn format_human(results: &[MatchedRow]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for (i, r) in results.iter().enumerate() {
        println!(
            "{:>3}. [{:>3}] {} {} ({} observation(s))",
            i + 1,
            r.match_score,
            r.year,
            r.row.target,
            r.row.total_observations,
        );
        println!("     {}", r.row.dates_display());
    }
    println!("\n{} result(s)", results.len());
}

/// Format results as JSON output.
pub fn format_json(results: &[MatchedRow], query: &str) -> Result<()> {
    let value = json!({
        "query": query,
        "result_count": results.len(),
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
