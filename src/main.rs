use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use patent_rank::api::create_router;
use patent_rank::engine::DEFAULT_RESULT_LIMIT;
use patent_rank::{SearchEngine, SearchOptions, DEFAULT_MIN_SIMILARITY};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Heuristic relevance ranking for patent records", long_about = None)]
struct Args {
    /// JSON (or .json.gz) array of patent documents
    #[arg(short, long, env = "PATENT_DATA", default_value = "patents.json", global = true)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the collection against a query and print the results
    Search {
        #[arg(short, long)]
        query: String,

        #[arg(short, long, default_value_t = DEFAULT_MIN_SIMILARITY)]
        min_similarity: f64,

        #[arg(short, long, default_value_t = DEFAULT_RESULT_LIMIT)]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP search API
    Serve {
        #[arg(short, long, env = "PATENT_RANK_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patent_rank=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Perform search and display results
fn do_search(engine: &SearchEngine, query: &str, options: &SearchOptions, json: bool) -> Result<()> {
    let start = Instant::now();
    let result = engine
        .search(query, options)
        .context("Failed to search collection")?;
    let duration = start.elapsed();

    if json {
        let hits: Vec<_> = result
            .documents
            .iter()
            .zip(&result.scores)
            .map(|(doc, score)| patent_rank::ScoredDocument::new(doc, *score))
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    println!(
        "{} of {} documents at or above {:.1} in {:?}",
        result.total, result.stats.total_scored, options.min_similarity, duration
    );
    println!();

    for (doc, score) in result.documents.iter().zip(&result.scores) {
        println!("{:>5.1}\t{}\t{}", score, doc.app_no, doc.title);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let engine = SearchEngine::new(args.data.clone());

    match args.command {
        Command::Search {
            query,
            min_similarity,
            limit,
            json,
        } => {
            let options = SearchOptions {
                min_similarity,
                limit: Some(limit),
                offset: 0,
            };
            do_search(&engine, &query, &options, json)?;
        }
        Command::Serve { addr } => {
            // Load eagerly so a bad collection fails at startup
            let count = engine
                .document_count()
                .with_context(|| format!("Failed to load {}", args.data.display()))?;
            tracing::info!(documents = count, %addr, "starting search API");

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            axum::serve(listener, create_router(Arc::new(engine)))
                .await
                .context("Server error")?;
        }
    }

    Ok(())
}
