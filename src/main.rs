//! Quarry main entry point
//!
//! This is the command-line interface for the Quarry crawler and search engine.

use anyhow::Context;
use clap::Parser;
use quarry::config::load_config_with_hash;
use quarry::storage::open_storage;
use quarry::{Engine, QuarryError};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quarry: a bounded-domain crawler and search engine
///
/// Quarry crawls one web domain breadth-first while respecting robots.txt,
/// indexes the text pages it finds, and ranks them against free-text
/// queries with TF-IDF weighted cosine similarity.
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version = "1.0.0")]
#[command(about = "A bounded-domain crawler and search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load the index from the saved state instead of crawling
    #[arg(long)]
    import: bool,

    /// Save the index state and write the frequency matrix CSV
    #[arg(long, conflicts_with = "import")]
    export: bool,

    /// Print the crawl report
    #[arg(long)]
    report: bool,

    /// Print the N most common terms
    #[arg(long, value_name = "N")]
    top_terms: Option<usize>,

    /// Print the document clusters
    #[arg(long)]
    clusters: bool,

    /// Answer a single query instead of reading queries from stdin
    #[arg(long, value_name = "QUERY")]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let state_path = PathBuf::from(&config.output.state_path);
    let matrix_path = PathBuf::from(&config.output.matrix_path);
    let mut engine = Engine::new(config, &config_hash).context("Failed to set up engine")?;

    let report = if cli.import {
        handle_import(&mut engine, &state_path)?
    } else {
        engine.build_index().await.context("Crawl failed")?.to_string()
    };

    if cli.report {
        println!("{}", report);
    }

    if cli.export {
        handle_export(&engine, &state_path, &matrix_path)?;
    }

    if let Some(n) = cli.top_terms {
        print_top_terms(&engine, n)?;
    }

    if cli.clusters {
        if let Some(clusters) = engine.clusters() {
            println!("Clusters ({}):\n", clusters.len());
            print!("{}", clusters);
        }
    }

    match cli.query {
        Some(query) => answer_query(&engine, &query),
        None => run_query_loop(&engine)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quarry=info,warn"),
            1 => EnvFilter::new("quarry=debug,info"),
            2 => EnvFilter::new("quarry=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --import: restores the saved state and returns its report
fn handle_import(engine: &mut Engine, state_path: &Path) -> anyhow::Result<String> {
    let storage = open_storage(state_path)
        .with_context(|| format!("Failed to open state database {}", state_path.display()))?;

    match engine.restore(&storage) {
        Ok(report) => Ok(report.to_string()),
        Err(QuarryError::NoSnapshot) => {
            anyhow::bail!("No saved state in {}; run without --import first", state_path.display())
        }
        Err(e) => Err(e).context("Failed to import saved state"),
    }
}

/// Handles --export: saves the snapshot and writes the matrix CSV
fn handle_export(engine: &Engine, state_path: &Path, matrix_path: &Path) -> anyhow::Result<()> {
    let mut storage = open_storage(state_path)
        .with_context(|| format!("Failed to open state database {}", state_path.display()))?;
    engine
        .save(&mut storage)
        .context("Failed to save engine state")?;
    engine
        .export_matrix_csv(matrix_path)
        .with_context(|| format!("Failed to write {}", matrix_path.display()))?;

    println!("✓ State saved to: {}", state_path.display());
    println!("✓ Frequency matrix exported to: {}", matrix_path.display());
    Ok(())
}

fn print_top_terms(engine: &Engine, n: usize) -> anyhow::Result<()> {
    let terms = engine.most_common_terms(n)?;

    println!("Most common terms:");
    println!("{:<6}{:<24}{:>10}{:>10}", "Rank", "Term", "Total", "Docs");
    for (rank, stat) in terms.iter().enumerate() {
        println!(
            "{:<6}{:<24}{:>10}{:>10}",
            rank + 1,
            stat.term,
            stat.total,
            stat.document_frequency
        );
    }
    println!();
    Ok(())
}

/// Reads queries from stdin until `stop` or end of input
fn run_query_loop(engine: &Engine) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter a query (\"stop\" to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read query")?;
        let query = line.trim();

        if query == "stop" {
            break;
        }
        if query.is_empty() {
            continue;
        }

        answer_query(engine, query);
    }

    Ok(())
}

fn answer_query(engine: &Engine, query: &str) {
    match engine.search(query) {
        Ok(results) if results.is_empty() => println!("No results for \"{}\"\n", query),
        Ok(results) => {
            for result in &results {
                println!("{}  {}", result.formatted_score(), result.title);
                println!("        {}", result.url);
                println!("        {}", result.snippet);
            }
            println!();
        }
        Err(e) => println!("{}\n", e),
    }
}
