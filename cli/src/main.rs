use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use streamdex_catalog::{ShowRecord, StreamingService};
use streamdex_core::SearchMode;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "streamdex")]
#[command(about = "Catalog shows and search them through an inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a catalog loaded from a JSON array or JSONL file of shows
    Search {
        /// Input path (.json array or .jsonl, one record per line)
        #[arg(long)]
        input: String,
        /// Query text
        #[arg(long)]
        query: String,
        /// Broaden the search to any matching term, ranked by matches
        #[arg(long, default_value_t = false)]
        broad: bool,
    },
    /// Print index statistics for a catalog file
    Stats {
        /// Input path (.json array or .jsonl, one record per line)
        #[arg(long)]
        input: String,
        /// How many of the heaviest terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, broad } => search(&input, &query, broad),
        Commands::Stats { input, top } => stats(&input, top),
    }
}

fn load_records(path: &Path) -> Result<Vec<ShowRecord>> {
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    } else {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn load_service(input: &str) -> Result<StreamingService> {
    let path = Path::new(input);
    let records = load_records(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("catalog")
        .to_string();
    let start = Instant::now();
    let service = StreamingService::from_records(name, records)?;
    tracing::info!(
        shows = service.all_shows().len(),
        took_s = start.elapsed().as_secs_f64(),
        "catalog loaded"
    );
    Ok(service)
}

fn search(input: &str, query: &str, broad: bool) -> Result<()> {
    let service = load_service(input)?;
    let mode = if broad {
        SearchMode::Broad
    } else {
        SearchMode::Strict
    };
    let start = Instant::now();
    let shows = service.search(query, mode)?;
    tracing::info!(
        hits = shows.len(),
        took_s = start.elapsed().as_secs_f64(),
        "search finished"
    );
    if shows.is_empty() {
        println!("no show matched every term of {query:?}");
        return Ok(());
    }
    for (rank, show) in shows.iter().enumerate() {
        println!("{:>3}. {} ({}, {})", rank + 1, show.title, show.kind, show.year_added);
    }
    Ok(())
}

fn stats(input: &str, top: usize) -> Result<()> {
    let service = load_service(input)?;
    let snapshot = service.index_snapshot();
    let total_postings: usize = snapshot.values().map(Vec::len).sum();
    let mut sizes: Vec<(&String, usize)> = snapshot.iter().map(|(t, p)| (t, p.len())).collect();
    sizes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let heaviest: Vec<_> = sizes
        .into_iter()
        .take(top)
        .map(|(term, postings)| serde_json::json!({ "term": term, "postings": postings }))
        .collect();
    let out = serde_json::json!({
        "shows": service.all_shows().len(),
        "terms": snapshot.len(),
        "postings": total_postings,
        "heaviest_terms": heaviest,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
