use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    config::ArchiveConfig,
    error::Result,
    scanner::{self, ObservationRecord, YearScan},
};

/// Per-target accumulator for one year.
///
/// `count` always equals the sum of `instrument_counts`, and each
/// instrument's count equals the length of its date list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSummary {
    pub count: usize,
    /// Dates per instrument in scan order, duplicates kept.
    pub dates_by_instrument: IndexMap<String, Vec<String>>,
    pub instrument_counts: IndexMap<String, usize>,
}

impl TargetSummary {
    fn record(&mut self, record: &ObservationRecord) {
        self.count += 1;
        self.dates_by_instrument
            .entry(record.instrument.clone())
            .or_default()
            .push(record.date.clone());
        *self
            .instrument_counts
            .entry(record.instrument.clone())
            .or_default() += 1;
    }
}

/// One row of a [`YearTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearRow {
    pub target: String,
    pub total_observations: usize,
    /// Instruments in the order they were first seen for this target.
    pub dates_by_instrument: IndexMap<String, Vec<String>>,
    /// A count for every instrument used anywhere in the year, zero when
    /// this target was never observed with it.
    pub instrument_counts: BTreeMap<String, usize>,
}

impl YearRow {
    /// Render `"<instrument>: <date>, <date>, <instrument>: <date>"`.
    pub fn dates_display(&self) -> String {
        self.dates_by_instrument
            .iter()
            .map(|(instrument, dates)| {
                format!("{instrument}: {}", dates.join(", "))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Every observation date of this row, across instruments.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.dates_by_instrument
            .values()
            .flat_map(|dates| dates.iter().map(String::as_str))
    }

    pub fn count_for(&self, instrument: &str) -> usize {
        self.instrument_counts.get(instrument).copied().unwrap_or(0)
    }
}

/// Summary of everything observed in one year, most-observed target first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTable {
    pub year: u32,
    /// Number of distinct date directories in the year.
    pub observation_dates: usize,
    /// Every instrument used in the year, sorted by name.
    pub instruments: Vec<String>,
    pub rows: Vec<YearRow>,
}

impl YearTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows whose target name equals `target` exactly.
    pub fn rows_for<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = &'a YearRow> + 'a {
        self.rows.iter().filter(move |row| row.target == target)
    }

    pub fn total_observations(&self) -> usize {
        self.rows.iter().map(|row| row.total_observations).sum()
    }
}

/// Group a year's records by target and build the sorted table.
pub fn aggregate(scan: &YearScan) -> YearTable {
    let mut summaries: IndexMap<String, TargetSummary> = IndexMap::new();
    for record in &scan.records {
        summaries
            .entry(record.target.clone())
            .or_default()
            .record(record);
    }

    let instruments: BTreeSet<&String> = summaries
        .values()
        .flat_map(|summary| summary.instrument_counts.keys())
        .collect();

    let mut rows: Vec<YearRow> = summaries
        .iter()
        .map(|(target, summary)| YearRow {
            target: target.clone(),
            total_observations: summary.count,
            dates_by_instrument: summary.dates_by_instrument.clone(),
            instrument_counts: instruments
                .iter()
                .map(|instrument| {
                    let count = summary
                        .instrument_counts
                        .get(*instrument)
                        .copied()
                        .unwrap_or(0);
                    ((*instrument).clone(), count)
                })
                .collect(),
        })
        .collect();

    // `sort_by` is stable, so ties keep scan order.
    rows.sort_by(|a, b| b.total_observations.cmp(&a.total_observations));

    YearTable {
        year: scan.year,
        observation_dates: scan.dates.len(),
        instruments: instruments.into_iter().cloned().collect(),
        rows,
    }
}

/// Scan and aggregate one year. `Ok(None)` means the archive has no
/// directory for that year.
pub fn list_year_summary(
    config: &ArchiveConfig,
    year: u32,
) -> Result<Option<YearTable>> {
    let Some(scan) = scanner::scan_year(&config.root, year)? else {
        return Ok(None);
    };

    let table = aggregate(&scan);
    tracing::debug!(
        year,
        observation_dates = table.observation_dates,
        targets = table.len(),
        "aggregated year"
    );
    Ok(Some(table))
}

/// Format a year table for human-readable terminal output.
pub fn format_human(table: &YearTable) {
    println!(
        "Year {} - Total number of observation dates: {}",
        table.year, table.observation_dates
    );
    if table.is_empty() {
        println!("No observations recorded.");
        return;
    }

    let target_width = table
        .rows
        .iter()
        .map(|row| row.target.chars().count())
        .max()
        .unwrap_or(0)
        .max("Target".len());

    print!("{:<target_width$}  {:>12}", "Target", "Observations");
    for instrument in &table.instruments {
        print!("  {instrument:>3}");
    }
    println!("  Dates");

    for row in &table.rows {
        print!("{:<target_width$}  {:>12}", row.target, row.total_observations);
        for instrument in &table.instruments {
            let width = instrument.chars().count().max(3);
            print!("  {:>width$}", row.count_for(instrument));
        }
        println!("  {}", row.dates_display());
    }
    println!("\n{} target(s)", table.len());
}

/// Format a year table as JSON output.
pub fn format_json(table: &YearTable) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}
