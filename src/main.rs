//! `validity` command-line entrypoint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use validity::config::Config;
use validity::dataset::{self, AssembleOptions};
use validity::validator::{Query, UrlValidator};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(
    name = "validity",
    about = "Score how well a web page answers a query",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single query against a single URL and print the result as JSON
    Score {
        /// The question the page should answer
        #[arg(short, long)]
        query: String,

        /// Page to score
        #[arg(short, long)]
        url: String,
    },

    /// Score many (prompt, URL) pairs and write them to CSV
    Dataset {
        /// CSV with user_prompt,url_to_check[,custom_rating]; built-in samples (randomly rated 1-5) if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV path (default: ~/Desktop/deliverable.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pairs scored concurrently
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,

        /// Fill ratings missing from the input CSV with random values in 1..=5
        #[arg(long)]
        simulate_ratings: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        embedder = ?config.embedder_path,
        classifier = ?config.classifier_path,
        fallback_mode = config.fallback_mode,
        "Validity starting"
    );

    let validator = UrlValidator::from_config(&config)?;

    match cli.command {
        Commands::Score { query, url } => {
            let query = Query::new(query)?;
            let report = validator.score(&query, &url).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Dataset {
            input,
            output,
            concurrency,
            simulate_ratings,
        } => {
            let pairs = match input {
                Some(path) => dataset::read_pairs(&path)?,
                None => dataset::sample_pairs(),
            };
            let output = output.unwrap_or_else(dataset::default_output_path);

            let rows = dataset::assemble(
                &validator,
                pairs,
                AssembleOptions {
                    concurrency,
                    simulate_ratings,
                },
            )
            .await?;
            dataset::write_csv(&output, &rows)?;

            println!("Dataset CSV saved at: {}", output.display());
        }
    }

    Ok(())
}
