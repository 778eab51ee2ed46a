//! Pioneer Amount Command Line Interface
//!
//! Converts token amounts between decimal strings and smallest units.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pioneer_amount::{ConverterConfig, TokenAmount};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pioneer-cli")]
#[command(about = "Pioneer token amount converter", long_about = None)]
#[command(version)]
struct Cli {
    /// Converter config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the token's decimal places
    #[arg(long)]
    decimals: Option<u32>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a decimal amount (e.g. "1,000.5") to smallest units
    ToBase {
        /// Decimal amount; commas, underscores and spaces are ignored
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Render smallest units as a decimal amount
    Display {
        /// Amount in smallest units
        #[arg(allow_hyphen_values = true)]
        base_units: String,
        /// Fractional digits to keep (defaults to the configured precision)
        #[arg(long)]
        precision: Option<u32>,
        /// Group the integer part with thousands separators
        #[arg(long)]
        grouped: bool,
        /// Append the configured token symbol
        #[arg(long)]
        symbol: bool,
    },
    /// Show the effective converter configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    println!("{}", run(cli)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ConverterConfig> {
    let mut config = ConverterConfig::load(cli.config.as_deref())
        .context("failed to load converter config")?;
    if let Some(decimals) = cli.decimals {
        config.decimal_places = decimals;
        config.default_precision = config.default_precision.min(decimals);
        config.validate().context("invalid --decimals")?;
        tracing::debug!("Decimal places overridden to {}", decimals);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(&cli)?;
    let converter = config.converter().context("invalid decimal places")?;

    let output = match cli.command {
        Commands::ToBase { amount } => {
            let value = converter
                .to_smallest_unit(&amount)
                .with_context(|| format!("failed to convert {amount:?}"))?;
            if cli.json {
                json!({
                    "input": amount,
                    "decimals": converter.decimals(),
                    "base_units": value,
                })
                .to_string()
            } else {
                value.to_string()
            }
        }
        Commands::Display {
            base_units,
            precision,
            grouped,
            symbol,
        } => {
            let value: TokenAmount = base_units
                .parse()
                .with_context(|| format!("failed to parse base units {base_units:?}"))?;
            let precision = precision.unwrap_or(config.default_precision);
            let mut display = if grouped {
                converter.format_token_value(&value, precision)
            } else {
                converter.to_display_string(&value, precision)
            };
            if symbol {
                display = format!("{display} {}", config.symbol);
            }
            if cli.json {
                json!({
                    "base_units": value,
                    "precision": precision,
                    "display": display,
                })
                .to_string()
            } else {
                display
            }
        }
        Commands::Config => {
            if cli.json {
                serde_json::to_string_pretty(&config)?
            } else {
                format!(
                    "decimal_places = {}\ndefault_precision = {}\nsymbol = {:?}",
                    config.decimal_places, config.default_precision, config.symbol
                )
            }
        }
    };

    Ok(output)
}
