use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use reqwest::Client;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

use landed_cost::config::Config;
use landed_cost::report::{droplist_status, render_droplist, render_quote};
use landed_cost::scrapers::DroplistScraper;
use landed_cost::utils::exchange_rate::{ExchangeRateClient, FixedRate, RateSource};
use landed_cost::utils::http::create_client;
use landed_cost::{load_droplist, quote_price_list};

#[derive(Parser)]
#[command(name = "landed-cost", about = "Estimate the landed cost in CAD of USD droplist items")]
struct Cli {
    /// Configuration file (defaults to ./landed_cost.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Use this USD to CAD rate instead of fetching one
    #[arg(long, global = true)]
    rate: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a comma-separated list of USD amounts
    Quote { prices: String },
    /// Fetch and price the upcoming droplist
    Droplist {
        /// Reference date (YYYY-MM-DD); the drop on or after it is used
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,
    },
}

fn init_logging(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("landed_cost=info".parse()?);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    let config = Config::load(cli.config.as_deref())?;
    let client = create_client(&config)?;

    let rates: Box<dyn RateSource> = match cli.rate {
        Some(rate) => Box::new(FixedRate(rate)),
        None => Box::new(ExchangeRateClient::new(
            client.clone(),
            config.exchange_rate_api_url.clone(),
        )),
    };

    match cli.command {
        Command::Quote { prices } => {
            match quote_price_list(&prices, rates.as_ref(), &config.fees).await {
                Ok(breakdown) => {
                    print!("{}", render_quote(&breakdown, &config.fees));
                    println!("Calculation updated with live rates.");
                }
                Err(e) => {
                    error!("{}", e);
                    println!("{}", e.status_message());
                }
            }
        }
        Command::Droplist { date, watch } => {
            let scraper = DroplistScraper::new(config.catalog.clone());

            if !watch {
                refresh_droplist(&client, rates.as_ref(), &scraper, &config, date).await;
                return Ok(());
            }

            let mut ticker = interval(Duration::from_secs(config.refresh_interval_seconds));
            loop {
                ticker.tick().await;
                info!("--- Refreshing droplist at {} ---", Local::now().format("%Y-%m-%d %H:%M:%S"));
                refresh_droplist(&client, rates.as_ref(), &scraper, &config, date).await;
                info!("Refresh completed, waiting {} seconds", config.refresh_interval_seconds);
            }
        }
    }

    Ok(())
}

async fn refresh_droplist(
    client: &Client,
    rates: &dyn RateSource,
    scraper: &DroplistScraper,
    config: &Config,
    date: Option<NaiveDate>,
) {
    println!("Loading droplist and live rates…");
    let reference = date.unwrap_or_else(|| Local::now().date_naive());

    match load_droplist(client, rates, scraper, reference, &config.fees).await {
        Ok(quote) => {
            print!("{}", render_droplist(&quote, &config.fees));
            println!("{}", droplist_status(&quote));
        }
        Err(e) => {
            error!("{}", e);
            for attempt in e.attempts() {
                info!("Candidate failed: {}", attempt);
            }
            println!("Droplist unavailable. Please try refreshing.");
            println!("{}", e.status_message());
        }
    }
}
