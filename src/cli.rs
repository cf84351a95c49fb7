use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use nightlog::score::ScorerKind;

#[derive(Debug, Parser)]
#[command(
    name = "nightlog",
    about = "Index and search an archive of observation logs"
)]
pub struct Cli {
    /// Archive root holding one directory per year
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Read configuration from this JSON file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// First year of the default range
    #[arg(long, global = true)]
    pub start_year: Option<u32>,

    /// Last year of the default range
    #[arg(long, global = true)]
    pub end_year: Option<u32>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize every target observed in one year
    Summary(SummaryArgs),
    /// List the observation dates of a target
    Dates(DatesArgs),
    /// Fuzzy-search target names across years
    Search(SearchArgs),
    /// List the years present in the archive
    Years(YearsArgs),
    /// Show the resolved configuration
    Status(StatusArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Summary --

#[derive(Debug, Parser)]
pub struct SummaryArgs {
    /// Year to summarize
    pub year: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Dates --

#[derive(Debug, Parser)]
pub struct DatesArgs {
    /// Exact target name (case-sensitive)
    pub target: String,

    /// First year to include (defaults to the configured start year)
    #[arg(long)]
    pub start: Option<u32>,

    /// Last year to include (defaults to the configured end year)
    #[arg(long)]
    pub end: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The target name to look for
    pub query: String,

    /// Years to search (repeatable; defaults to the configured range)
    #[arg(short = 'y', long, num_args = 1..)]
    pub years: Vec<u32>,

    /// Minimum match score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,

    /// Only consider the N best-scoring names per year
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Similarity algorithm
    #[arg(long, value_enum, default_value_t)]
    pub scorer: ScorerKind,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Years --

#[derive(Debug, Parser)]
pub struct YearsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "nightlog",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_search_defaults() {
        let cli = Cli::parse_from(["nightlog", "search", "wasp14"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "wasp14");
                assert!(args.years.is_empty());
                assert_eq!(args.min_score, None);
                assert_eq!(args.limit, None);
                assert_eq!(args.scorer, ScorerKind::Levenshtein);
                assert!(!args.json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn parse_search_years_and_score() {
        let cli = Cli::parse_from([
            "nightlog",
            "search",
            "wasp14",
            "--years",
            "2011",
            "2012",
            "-y",
            "2013",
            "--min-score",
            "90",
            "--scorer",
            "jaro-winkler",
        ]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.years, vec![2011, 2012, 2013]);
                assert_eq!(args.min_score, Some(90));
                assert_eq!(args.scorer, ScorerKind::JaroWinkler);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn min_score_above_100_is_rejected() {
        let result = Cli::try_parse_from([
            "nightlog",
            "search",
            "wasp14",
            "--min-score",
            "101",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_root_after_subcommand() {
        let cli = Cli::parse_from([
            "nightlog", "summary", "2020", "--root", "/data", "--json",
        ]);
        assert_eq!(cli.root, Some(PathBuf::from("/data")));
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.year, 2020);
                assert!(args.json);
            }
            _ => panic!("expected summary command"),
        }
    }

    #[test]
    fn parse_dates_range() {
        let cli = Cli::parse_from([
            "nightlog", "dates", "wasp14", "--start", "2019", "--end", "2021",
        ]);
        match cli.command {
            Command::Dates(args) => {
                assert_eq!(args.target, "wasp14");
                assert_eq!(args.start, Some(2019));
                assert_eq!(args.end, Some(2021));
            }
            _ => panic!("expected dates command"),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
