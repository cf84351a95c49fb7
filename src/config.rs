use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_ROOT: &str = "./DataTree";
pub const DEFAULT_START_YEAR: u32 = 2006;
pub const DEFAULT_END_YEAR: u32 = 2024;
pub const DEFAULT_MIN_SCORE: u8 = 50;

const CONFIG_FILE_NAME: &str = "config.json";

/// Everything a query needs to know about where the archive lives and which
/// defaults apply. Passed explicitly into every top-level operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveConfig {
    /// Directory holding one subdirectory per year.
    pub root: PathBuf,
    /// First year of the default range (inclusive).
    pub start_year: u32,
    /// Last year of the default range (inclusive).
    pub end_year: u32,
    /// Default minimum match score for fuzzy search.
    pub min_score: u8,
    /// When set, only the best `n` candidate names per year are eligible
    /// for a fuzzy match.
    pub candidate_limit: Option<usize>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            min_score: DEFAULT_MIN_SCORE,
            candidate_limit: None,
        }
    }
}

/// Values given explicitly on the command line. These win over everything.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub start_year: Option<u32>,
    pub end_year: Option<u32>,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    root: Option<PathBuf>,
    start_year: Option<u32>,
    end_year: Option<u32>,
    min_score: Option<u8>,
    candidate_limit: Option<usize>,
}

impl ArchiveConfig {
    /// Default configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve the configuration from, in order of increasing priority:
    /// 1. Built-in defaults
    /// 2. A JSON config file (`--config`, `NIGHTLOG_CONFIG`, or
    ///    `$XDG_CONFIG_HOME/nightlog/config.json`)
    /// 3. `NIGHTLOG_*` environment variables
    /// 4. Explicit command-line overrides
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let explicit = overrides
            .config_file
            .clone()
            .or_else(|| std::env::var_os("NIGHTLOG_CONFIG").map(PathBuf::from));

        let config_file = match explicit {
            Some(path) if !path.is_file() => {
                return Err(Error::NotFound {
                    kind: "config file",
                    name: path.display().to_string(),
                });
            }
            Some(path) => Some(path),
            None => xdg::BaseDirectories::with_prefix("nightlog")
                .find_config_file(CONFIG_FILE_NAME),
        };

        Self::resolve_with(overrides, config_file.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    fn resolve_with(
        overrides: &ConfigOverrides,
        config_file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            config.merge_file(path)?;
        }

        if let Some(root) = env("NIGHTLOG_ROOT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            config.root = PathBuf::from(root);
        }
        if let Some(year) = env_value(&env, "NIGHTLOG_START_YEAR")? {
            config.start_year = year;
        }
        if let Some(year) = env_value(&env, "NIGHTLOG_END_YEAR")? {
            config.end_year = year;
        }
        if let Some(score) = env_value(&env, "NIGHTLOG_MIN_SCORE")? {
            config.min_score = score;
        }

        if let Some(ref root) = overrides.root {
            config.root = root.clone();
        }
        if let Some(year) = overrides.start_year {
            config.start_year = year;
        }
        if let Some(year) = overrides.end_year {
            config.end_year = year;
        }

        config.validate()?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: FileConfig = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!(
                "failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        if let Some(root) = file.root {
            // Relative roots in a config file are relative to that file.
            self.root = match path.parent() {
                Some(dir) if root.is_relative() => dir.join(root),
                _ => root,
            };
        }
        if let Some(year) = file.start_year {
            self.start_year = year;
        }
        if let Some(year) = file.end_year {
            self.end_year = year;
        }
        if let Some(score) = file.min_score {
            self.min_score = score;
        }
        if file.candidate_limit.is_some() {
            self.candidate_limit = file.candidate_limit;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_score > 100 {
            return Err(Error::Config(format!(
                "min_score must be between 0 and 100, got {}",
                self.min_score
            )));
        }
        if self.candidate_limit == Some(0) {
            return Err(Error::Config(
                "candidate_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The default year range as an inclusive list, empty when inverted.
    pub fn default_years(&self) -> Vec<u32> {
        (self.start_year..=self.end_year).collect()
    }
}

fn env_value<T: FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = env(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<T>().map(Some).map_err(|_| {
        Error::Config(format!("{key}={trimmed:?} is not a valid number"))
    })
}
