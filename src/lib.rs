//! nightlog - index and search an archive of astronomical observation logs.
//!
//! The archive is a plain directory tree laid out as
//! `<root>/<year>/<date>/<instrument>/<target>/`; the existence of a leaf
//! directory is the whole record. Every query rescans the tree, so results
//! always reflect what is on disk.
//!
//! # Quick start
//!
//! ```no_run
//! use nightlog::{ArchiveConfig, score::Levenshtein};
//!
//! let config = ArchiveConfig::new("/data/DataTree");
//!
//! if let Some(table) = nightlog::list_year_summary(&config, 2020).unwrap() {
//!     for row in &table.rows {
//!         println!("{} {}", row.target, row.total_observations);
//!     }
//! }
//!
//! let dates =
//!     nightlog::dates_for_target(&config, "wasp14", 2006, 2024).unwrap();
//! println!("{dates:?}");
//!
//! let results = nightlog::search_target(
//!     &config,
//!     "wasp14",
//!     &[2011, 2012, 2013],
//!     50,
//!     &Levenshtein,
//! )
//! .unwrap();
//! for r in &results {
//!     println!("{} {} (score: {})", r.year, r.row.target, r.match_score);
//! }
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod matcher;
pub mod scanner;
pub mod score;
pub mod search;
pub mod table;

pub use config::{ArchiveConfig, ConfigOverrides};
pub use dates::dates_for_target;
pub use error::{Error, Result};
pub use matcher::MatchedRow;
pub use search::search_target;
pub use table::{YearRow, YearTable, list_year_summary};
