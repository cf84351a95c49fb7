use std::path::Path;

use nightlog::{
    ArchiveConfig,
    dates_for_target,
    list_year_summary,
    score::{JaroWinkler, Levenshtein},
    search_target,
};

fn mkdirs(root: &Path, rel: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(root.join(rel))?;
    Ok(())
}

fn setup_fixture(root: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let leaves = [
        "2020/2020-01-15/CAM1/wasp14",
        "2020/2020-02-10/CAM2/wasp14",
        "2020/2020-02-10/CAM2/hd189733",
        "2020/2020-02-10/SPEC/hd189733",
        "2020/2020-03-01/CAM1/m31",
        "2021/2021-01-01/CAM1/wasp-14",
        "2021/2021-01-02/CAM1/wasp-14",
    ];
    for leaf in leaves {
        mkdirs(root, leaf)?;
    }
    // Stray files are ignored everywhere.
    std::fs::write(root.join("2020/README"), "archive notes")?;
    std::fs::write(root.join("2020/2020-01-15/CAM1/flat.fits"), "x")?;
    // A date with no observations still counts as a date.
    mkdirs(root, "2020/2020-04-01")?;

    Ok(5)
}

#[test]
fn year_summary_matches_directory_triples() -> Result<(), Box<dyn std::error::Error>>
{
    let tmp = tempfile::tempdir()?;
    let triples_2020 = setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    let table = list_year_summary(&config, 2020)?.expect("2020 exists");
    assert_eq!(table.total_observations(), triples_2020);
    assert_eq!(table.observation_dates, 4);
    assert_eq!(table.instruments, vec!["CAM1", "CAM2", "SPEC"]);

    let wasp = table.rows_for("wasp14").next().expect("wasp14 row");
    assert_eq!(wasp.total_observations, 2);
    assert_eq!(wasp.count_for("CAM1"), 1);
    assert_eq!(wasp.count_for("CAM2"), 1);
    assert_eq!(wasp.count_for("SPEC"), 0);

    let order: Vec<_> = table.rows.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(order, vec!["wasp14", "hd189733", "m31"]);
    Ok(())
}

#[test]
fn missing_year_is_no_data() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    assert!(list_year_summary(&config, 1999)?.is_none());
    Ok(())
}

#[test]
fn dates_for_target_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    let dates = dates_for_target(&config, "wasp14", 2020, 2020)?;
    assert_eq!(dates, vec!["2020-01-15", "2020-02-10"]);

    // Default range covers years that do not exist on disk.
    let dates = dates_for_target(
        &config,
        "wasp-14",
        config.start_year,
        config.end_year.max(2021),
    )?;
    assert_eq!(dates, vec!["2021-01-01", "2021-01-02"]);
    Ok(())
}

#[test]
fn search_threshold_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    let strict = search_target(&config, "wasp14", &[2021], 90, &Levenshtein)?;
    assert!(strict.is_empty());

    let loose = search_target(&config, "wasp14", &[2021], 50, &Levenshtein)?;
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0].row.target, "wasp-14");
    assert_eq!(loose[0].row.total_observations, 2);
    Ok(())
}

#[test]
fn search_keeps_one_row_per_year() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    let results =
        search_target(&config, "wasp14", &[2021, 2020, 1999], 50, &Levenshtein)?;
    let found: Vec<_> = results
        .iter()
        .map(|r| (r.year, r.row.target.as_str()))
        .collect();
    assert_eq!(found, vec![(2020, "wasp14"), (2021, "wasp-14")]);
    assert!(results.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    Ok(())
}

#[test]
fn scorer_is_injectable() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    setup_fixture(tmp.path())?;
    let config = ArchiveConfig::new(tmp.path());

    // Jaro-Winkler rates the hyphenated spelling above 90.
    let results = search_target(&config, "wasp14", &[2021], 90, &JaroWinkler)?;
    assert_eq!(results.len(), 1);
    assert!(results[0].match_score >= 90);
    Ok(())
}
