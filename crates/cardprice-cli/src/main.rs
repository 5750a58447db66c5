mod io;

use std::path::PathBuf;

use anyhow::Context;
use cardprice_core::{AppConfig, CardQuery};
use cardprice_scraper::{BatchResolver, PriceClient};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::io::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "cardprice")]
#[command(about = "Resolve trading cards to price-guide listings and extract graded prices")]
struct Cli {
    /// Override `CARDPRICE_BASE_URL`
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve every row of an input CSV and write one price row per listing
    Resolve {
        /// CSV with a header row: card,id,holo,reverse_holo,first_edition,card_count,variant,variant_type
        #[arg(long, short)]
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Queries resolved at once; overrides `CARDPRICE_MAX_CONCURRENT_QUERIES`
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Resolve a single card and print its records as JSON
    Lookup {
        name: String,
        id: String,

        #[arg(long)]
        holo: bool,

        #[arg(long)]
        reverse_holo: bool,

        #[arg(long)]
        first_edition: bool,

        /// Emit one record per listed variant instead of a single best match
        #[arg(long)]
        all_variants: bool,

        #[arg(long)]
        variant_type: Option<String>,

        #[arg(long, default_value = "")]
        card_count: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = cardprice_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(base_url) = cli.base_url.as_deref() {
        apply_base_url(&mut config, base_url)?;
    }

    match cli.command {
        Commands::Resolve {
            input,
            output,
            format,
            concurrency,
        } => {
            if let Some(n) = concurrency {
                config.max_concurrent_queries = n;
            }
            run_resolve(&config, &input, output.as_deref(), format).await
        }
        Commands::Lookup {
            name,
            id,
            holo,
            reverse_holo,
            first_edition,
            all_variants,
            variant_type,
            card_count,
        } => {
            let query = CardQuery::builder(name, id)
                .holo(holo)
                .reverse_holo(reverse_holo)
                .first_edition(first_edition)
                .all_variants(all_variants)
                .variant_type(variant_type)
                .card_count(card_count)
                .build();
            run_lookup(&config, &query).await
        }
    }
}

/// Replaces the configured origin with `raw`, validated like `CARDPRICE_BASE_URL`.
fn apply_base_url(config: &mut AppConfig, raw: &str) -> anyhow::Result<()> {
    config.base_url = cardprice_core::normalize_base_url(raw).context("invalid --base-url")?;
    Ok(())
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<BatchResolver> {
    let client = PriceClient::from_config(config).context("failed to build HTTP client")?;
    Ok(BatchResolver::new(client, config.max_concurrent_queries))
}

async fn run_resolve(
    config: &AppConfig,
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let queries = io::read_queries(input)?;
    let writer = io::open_output(output)?;
    tracing::info!(
        input = %input.display(),
        queries = queries.len(),
        concurrency = config.max_concurrent_queries,
        "starting batch"
    );

    let resolver = build_resolver(config)?;
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; remaining queries will be written as not_available");
            let _ = cancel_tx.send(true);
        }
    });

    let records = resolver.resolve_until(&queries, cancel_rx).await;

    io::write_records(writer, &records, format).context("failed to write output")?;
    tracing::info!(records = records.len(), "output written");
    Ok(())
}

async fn run_lookup(config: &AppConfig, query: &CardQuery) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let records = resolver.resolve_one(query).await;
    io::write_records(std::io::stdout().lock(), &records, OutputFormat::Json)
        .context("failed to write output")
}
