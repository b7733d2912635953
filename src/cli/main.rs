//! Command-line front end for the address widget.
//!
//! Runs the "find my location" and autocomplete flows against the Google Maps
//! Platform, or extracts an address from a saved provider response offline.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use address_autofill::{
    AddressWidget, Coordinates, FixedGeolocator, GoogleMapsProvider, NormalizedAddress,
    ProviderConfig, ProviderConfigBuilder, config, extract, format, load_place_document,
    parse_place_document, render,
};

#[derive(Parser, Debug)]
#[command(name = "autofill")]
#[command(about = "Address autocomplete and reverse geocoding", version)]
struct Args {
    /// Maps Platform API key
    #[arg(long, global = true, env = config::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Preferred result language (e.g. "fr")
    #[arg(long, global = true)]
    language: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Print the address as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a position to an address
    Reverse {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// List suggestions for a partial address
    Search {
        /// Text typed into the search box
        text: String,
        /// Resolve the N-th suggestion (1-based) and print its address
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Extract the address from a saved place record or geocode response
    Extract {
        /// JSON file, or "-" for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match &args.command {
        Command::Reverse { lat, lng } => {
            let coords = Coordinates::new(*lat, *lng)?;
            let mut widget = AddressWidget::new(GoogleMapsProvider::new(provider_config(&args)));
            widget.mount().await.context("failed to load the map provider")?;

            info!(%coords, "locating");
            widget
                .find_my_location(&FixedGeolocator::at(coords))
                .await
                .context("reverse geocoding failed")?;

            print_address(widget.address(), args.json)?;
            if !args.json {
                println!("\n{}", widget.input().value());
            }
        }
        Command::Search { text, pick } => {
            let mut widget = AddressWidget::new(GoogleMapsProvider::new(provider_config(&args)));
            widget.mount().await.context("failed to load the map provider")?;
            widget.set_input_text(text.as_str());

            let suggestions = widget.suggestions().await.context("autocomplete failed")?;
            debug!(count = suggestions.len(), "suggestions received");

            match pick {
                None => {
                    for (i, suggestion) in suggestions.iter().enumerate() {
                        println!("{:>2}. {suggestion}", i + 1);
                    }
                }
                Some(n) => {
                    let chosen = n
                        .checked_sub(1)
                        .and_then(|i| suggestions.get(i))
                        .with_context(|| {
                            format!("no suggestion #{n} ({} available)", suggestions.len())
                        })?;
                    let address = widget
                        .choose(chosen)
                        .await
                        .context("failed to resolve the suggestion")?;
                    print_address(address, args.json)?;
                }
            }
        }
        Command::Extract { file } => {
            let place = if file.as_os_str() == "-" {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                parse_place_document(&text, "stdin")?
            } else {
                load_place_document(file)?
            };
            print_address(&extract(place.as_ref()), args.json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "address_autofill=info,autofill=info",
        _ => "address_autofill=debug,autofill=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn provider_config(args: &Args) -> ProviderConfig {
    let mut builder =
        ProviderConfigBuilder::from_config(ProviderConfig::from_env()).timeout_seconds(args.timeout);
    if let Some(key) = &args.api_key {
        builder = builder.api_key(key.as_str());
    }
    if let Some(language) = &args.language {
        builder = builder.language(language.as_str());
    }
    builder.build()
}

fn print_address(address: &NormalizedAddress, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(address)?);
    } else {
        println!("{}", render(address));
        debug!(line = %format(address), "formatted");
    }
    Ok(())
}
