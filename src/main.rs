use clap::Parser;
use nightlog::{
    ArchiveConfig,
    ConfigOverrides,
    Error,
    dates,
    error,
    scanner,
    search,
    table,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("NIGHTLOG_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let config = ArchiveConfig::resolve(&ConfigOverrides {
        root: cli.root.clone(),
        start_year: cli.start_year,
        end_year: cli.end_year,
        config_file: cli.config.clone(),
    })?;

    match cli.command {
        Command::Summary(args) => cmd_summary(&config, &args)?,
        Command::Dates(args) => cmd_dates(&config, &args)?,
        Command::Search(args) => cmd_search(&config, &args)?,
        Command::Years(args) => cmd_years(&config, args.json)?,
        Command::Status(args) => cmd_status(&config, args.json)?,
        Command::Completions(_) => {}
    }

    Ok(())
}

fn cmd_summary(
    config: &ArchiveConfig,
    args: &cli::SummaryArgs,
) -> error::Result<()> {
    let Some(year_table) = table::list_year_summary(config, args.year)? else {
        if args.json {
            println!("{}", json!({ "year": args.year, "found": false }));
        } else {
            println!("No data found for the year {}.", args.year);
        }
        return Ok(());
    };

    if args.json {
        table::format_json(&year_table)
    } else {
        table::format_human(&year_table);
        Ok(())
    }
}

fn cmd_dates(
    config: &ArchiveConfig,
    args: &cli::DatesArgs,
) -> error::Result<()> {
    let start_year = args.start.unwrap_or(config.start_year);
    let end_year = args.end.unwrap_or(config.end_year);
    if start_year > end_year {
        tracing::warn!(start_year, end_year, "empty year range");
    }

    let found =
        dates::dates_for_target(config, &args.target, start_year, end_year)?;

    if args.json {
        dates::format_json(&args.target, start_year, end_year, &found)
    } else {
        dates::format_human(&args.target, &found);
        Ok(())
    }
}

fn cmd_search(
    config: &ArchiveConfig,
    args: &cli::SearchArgs,
) -> error::Result<()> {
    let mut config = config.clone();
    if args.limit.is_some() {
        config.candidate_limit = args.limit;
        config.validate()?;
    }

    let years = if args.years.is_empty() {
        if config.start_year > config.end_year {
            tracing::warn!(
                start_year = config.start_year,
                end_year = config.end_year,
                "empty year range"
            );
        }
        config.default_years()
    } else {
        args.years.clone()
    };
    let min_score = args.min_score.unwrap_or(config.min_score);
    let scorer = args.scorer.scorer();

    let results = search::search_target(
        &config,
        &args.query,
        &years,
        min_score,
        scorer.as_ref(),
    )?;

    if args.json {
        search::format_json(&results, &args.query)
    } else {
        search::format_human(&results);
        Ok(())
    }
}

fn cmd_years(config: &ArchiveConfig, json: bool) -> error::Result<()> {
    let years = scanner::available_years(&config.root)?;

    if json {
        println!("{}", serde_json::to_string(&years)?);
    } else if years.is_empty() {
        println!("No years found under {}.", config.root.display());
    } else {
        for year in &years {
            println!("{year}");
        }
    }
    Ok(())
}

fn cmd_status(config: &ArchiveConfig, json: bool) -> error::Result<()> {
    let years = match scanner::available_years(&config.root) {
        Ok(years) => Some(years),
        Err(Error::ArchiveRoot(_)) => None,
        Err(e) => return Err(e),
    };

    if json {
        let value = json!({
            "config": config,
            "root_exists": years.is_some(),
            "years": years,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Archive root: {}", config.root.display());
        println!(
            "Default years: {}-{}",
            config.start_year, config.end_year
        );
        println!("Minimum score: {}", config.min_score);
        match config.candidate_limit {
            Some(limit) => println!("Candidate limit: {limit}"),
            None => println!("Candidate limit: none"),
        }
        match years {
            Some(years) => println!("Years on disk: {}", years.len()),
            None => println!("Years on disk: archive root not found"),
        }
    }
    Ok(())
}
