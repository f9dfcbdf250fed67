//! Converter CLI
//!
//! Command-line interface for the Currency Converter API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use converter_client::ConverterClient;

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency Converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency Converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported currencies
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (e.g. USD)
        from: String,
        /// Target currency code (e.g. EUR)
        to: String,
        /// Amount to convert
        amount: f64,
    },
    /// Show conversion history, newest first
    History {
        /// Page size (server default 10, at most 100)
        #[arg(long)]
        limit: Option<u32>,
        /// Number of records to skip
        #[arg(long)]
        offset: Option<u64>,
    },
    /// List every recorded conversion
    Conversions,
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Currencies => {
            let currencies = client.list_currencies().await?;
            for currency in currencies {
                println!("{:<5} {}", currency.code, currency.name);
            }
        }

        Commands::Convert { from, to, amount } => {
            let from = from.to_uppercase();
            let to = to.to_uppercase();
            let result = client.convert(&from, &to, amount).await?;
            println!(
                "{} {} = {} {} (rate {})",
                result.amount,
                result.source_currency,
                result.converted_amount,
                result.target_currency,
                result.exchange_rate
            );
        }

        Commands::History { limit, offset } => {
            let page = client.history(limit, offset).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }

        Commands::Conversions => {
            let conversions = client.conversions().await?;
            println!("{}", serde_json::to_string_pretty(&conversions)?);
        }
    }

    Ok(())
}
