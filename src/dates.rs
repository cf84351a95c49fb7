use std::collections::BTreeSet;

use serde_json::json;

use crate::{
    config::ArchiveConfig,
    error::Result,
    scanner,
    table::{self, YearTable},
};

/// Dates of every row in `table` whose target is exactly `target`.
///
/// Dates come straight from the per-instrument lists, never from the
/// rendered display string, so names containing `", "` are safe.
pub fn dates_in_table<'a>(
    table: &'a YearTable,
    target: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    table.rows_for(target).flat_map(|row| row.dates())
}

/// All observation dates of `target` between `start_year` and `end_year`
/// (inclusive), sorted and deduplicated.
///
/// Years without a directory are skipped. The name must match exactly;
/// an empty range or an unknown target yields an empty list.
pub fn dates_for_target(
    config: &ArchiveConfig,
    target: &str,
    start_year: u32,
    end_year: u32,
) -> Result<Vec<String>> {
    let mut dates = BTreeSet::new();

    for year in start_year..=end_year {
        let Some(scan) = scanner::scan_year(&config.root, year)? else {
            continue;
        };
        let table = table::aggregate(&scan);
        let before = dates.len();
        dates.extend(dates_in_table(&table, target).map(str::to_owned));
        if dates.len() > before {
            tracing::debug!(year, target, "found observations");
        }
    }

    Ok(dates.into_iter().collect())
}

/// Format a date list for human-readable terminal output.
pub fn format_human(target: &str, dates: &[String]) {
    if dates.is_empty() {
        println!("No observations found for '{target}'.");
        return;
    }

    for date in dates {
        println!("{date}");
    }
    println!("\n{} date(s) for '{target}'", dates.len());
}

/// Format a date list as JSON output.
pub fn format_json(
    target: &str,
    start_year: u32,
    end_year: u32,
    dates: &[String],
) -> Result<()> {
    let value = json!({
        "target": target,
        "start_year": start_year,
        "end_year": end_year,
        "date_count": dates.len(),
        "dates": dates,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
