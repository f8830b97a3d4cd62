use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod config;
mod error;
mod extractor;
mod fetch;
mod output;
mod poster;
mod scrape;
mod server;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "ottmeta", about = "Poster and title metadata lookups for OTT title pages")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    /// Outbound fetch timeout in seconds (overrides OTT_FETCH_TIMEOUT_SECS)
    #[arg(global = true, long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (/poster, /scrape, /health)
    Serve(server::ServeCmd),
    /// Look up the poster image for any page
    Poster(poster::PosterCmd),
    /// Pull title, year and artwork from a title page on the configured site
    Scrape(scrape::ScrapeCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    output::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and OTT_LOG_FORMAT
    telemetry::config::init_tracing();

    let mut cfg = config::AppConfig::from_env()?;
    if let Some(secs) = cli.timeout { cfg.fetch.timeout = std::time::Duration::from_secs(secs.max(1)); }

    match cli.command {
        Commands::Serve(args) => server::run(&cfg, args).await?,
        Commands::Poster(args) => poster::run(&cfg, args).await?,
        Commands::Scrape(args) => scrape::run(&cfg, args).await?,
    }

    Ok(())
}
