use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// One `<date>/<instrument>/<target>` directory found under a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub target: String,
    pub instrument: String,
    pub date: String,
}

/// Raw result of walking a single year directory.
#[derive(Debug, Clone, Default)]
pub struct YearScan {
    pub year: u32,
    /// Records in scan order (date, then instrument, then target).
    pub records: Vec<ObservationRecord>,
    /// Every date directory seen, including ones with no observations.
    pub dates: BTreeSet<String>,
}

/// Path of the directory for `year` under the archive root.
pub fn year_dir(root: &Path, year: u32) -> PathBuf {
    root.join(year.to_string())
}

/// Walk `root/<year>/<date>/<instrument>/<target>/` and produce one record
/// per leaf directory.
///
/// Returns `Ok(None)` when the year directory does not exist. Anything that
/// is not a directory is skipped at every level, and entries are visited in
/// lexicographic order so the output is reproducible.
pub fn scan_year(root: &Path, year: u32) -> Result<Option<YearScan>> {
    let dir = year_dir(root, year);
    if !dir.is_dir() {
        tracing::debug!(year, path = %dir.display(), "no directory for year");
        return Ok(None);
    }

    let mut scan = YearScan {
        year,
        ..YearScan::default()
    };

    for (date, date_path) in subdirectories(&dir)? {
        scan.dates.insert(date.clone());
        for (instrument, instrument_path) in subdirectories_or_skip(&date_path)
        {
            for (target, _) in subdirectories_or_skip(&instrument_path) {
                scan.records.push(ObservationRecord {
                    target,
                    instrument: instrument.clone(),
                    date: date.clone(),
                });
            }
        }
    }

    tracing::debug!(
        year,
        records = scan.records.len(),
        dates = scan.dates.len(),
        "scanned year"
    );
    Ok(Some(scan))
}

/// List the year directories directly under the archive root.
///
/// Only directory names that parse as a year number are returned, sorted
/// ascending.
pub fn available_years(root: &Path) -> Result<Vec<u32>> {
    if !root.is_dir() {
        return Err(Error::ArchiveRoot(root.to_path_buf()));
    }

    let mut years: Vec<u32> = subdirectories(root)?
        .into_iter()
        .filter_map(|(name, _)| name.parse().ok())
        .collect();
    years.sort_unstable();
    years.dedup();
    Ok(years)
}

/// Immediate subdirectories of `dir` as `(name, path)`, sorted by name.
fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut results = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        // `Path::is_dir` follows symlinks, so linked directories count.
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        results.push((name, path));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

/// Like [`subdirectories`], but an unreadable directory contributes nothing.
fn subdirectories_or_skip(dir: &Path) -> Vec<(String, PathBuf)> {
    match subdirectories(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), "skipping unreadable directory: {e}");
            Vec::new()
        }
    }
}
