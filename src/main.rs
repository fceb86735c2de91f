mod config;
mod export;
mod filter;
mod lead;
mod pipeline;
mod places;

use std::path::PathBuf;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use pipeline::PlanOptions;
use places::PlacesClient;

pub const USER_AGENT: &str = concat!("leadscout/", env!("CARGO_PKG_VERSION"));

/// Finds local businesses with no proper website via the Google Places
/// API (New) and writes them to a CSV of sales leads.
#[derive(Parser, Debug)]
#[command(name = "leadscout", version, about)]
struct Args {
    /// Business categories to search, comma-separated.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = config::DEFAULT_CATEGORIES.iter().map(ToString::to_string)
    )]
    categories: Vec<String>,

    /// Neighborhoods to search, comma-separated.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = config::DEFAULT_NEIGHBORHOODS.iter().map(ToString::to_string)
    )]
    neighborhoods: Vec<String>,

    #[arg(long, default_value_t = config::DEFAULT_CITY.to_string())]
    city: String,

    #[arg(long, default_value_t = config::DEFAULT_COUNTRY.to_string())]
    country: String,

    /// Maximum candidates fetched per (category, neighborhood) query.
    #[arg(long = "max", default_value_t = 40)]
    max_per_query: usize,

    /// Maximum concurrent place-details fetches.
    #[arg(long, default_value_t = 5)]
    concurrency: usize,

    /// Output CSV path.
    #[arg(long, default_value = "leads.csv")]
    out: PathBuf,

    /// Also keep businesses that already have a proper (non-Facebook)
    /// website.
    #[arg(long)]
    include_with_website: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leadscout=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let places = PlacesClient::from_env(Client::new())?;

    info!(
        categories = %args.categories.join(", "),
        neighborhoods = %args.neighborhoods.join(", "),
        city = %args.city,
        country = %args.country,
        "lead search starting"
    );
    info!(
        max_per_query = args.max_per_query,
        concurrency = args.concurrency,
        include_with_website = args.include_with_website,
        "plan"
    );

    let opts = PlanOptions {
        categories: args.categories,
        neighborhoods: args.neighborhoods,
        city: args.city,
        country: args.country,
        max_per_query: args.max_per_query,
        details_concurrency: args.concurrency,
        include_with_website: args.include_with_website,
    };

    let leads = pipeline::run_plan(&places, &opts).await;

    std::fs::write(&args.out, export::to_csv(&leads))?;
    info!(count = leads.len(), path = %args.out.display(), "leads written");

    Ok(())
}
