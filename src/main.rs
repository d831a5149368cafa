//! mileage: command-line front end for the award calculator.
//!
//! Usage:
//!   mileage quote --program "Asia Miles" --cabin Business --destination HND --passengers 2
//!   mileage quote --program KrisFlyer --miles 50,000 --ratio 1.05 --bonus 10
//!   mileage programs
//!   mileage set-program KrisFlyer --validity 24 --ratio 1.10

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mileage_calc::pricing::calendar::DATE_FORMAT;
use mileage_calc::pricing::{Cabin, PricingRequest};
use mileage_calc::settings::SettingsStore;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Estimate frequent-flyer miles and points for award tickets")]
struct Args {
    /// Settings file, created with demo content if missing
    #[arg(long, env = "MILEAGE_SETTINGS", default_value = "settings.json", global = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate miles and points for a redemption
    Quote {
        #[arg(long)]
        program: String,

        #[arg(long, default_value = "Economy")]
        cabin: Cabin,

        #[arg(long, default_value_t = 1)]
        passengers: u32,

        /// Transfer bonus percent, e.g. 20 for +20%
        #[arg(long, default_value = "0")]
        bonus: Decimal,

        /// Future ratio multiplier
        #[arg(long, default_value = "1.00")]
        ratio: Decimal,

        /// Origin IATA code (defaults to the configured origin)
        #[arg(long)]
        origin: Option<String>,

        /// Destination IATA code (required unless --miles is given)
        #[arg(long, required_unless_present = "miles")]
        destination: Option<String>,

        /// Miles per person; skips the distance estimate
        #[arg(long)]
        miles: Option<String>,

        /// Operating airline
        #[arg(long, default_value = "")]
        airline: String,

        /// Exchange date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List programs with their validity and default ratio
    Programs,

    /// Change a program's validity and default ratio, then save
    SetProgram {
        name: String,

        #[arg(long)]
        validity: u32,

        #[arg(long)]
        ratio: Decimal,
    },

    /// List known airports
    Airports,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mileage_calc=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let store = SettingsStore::new(&args.settings);
    let mut settings = store
        .load_or_init()
        .with_context(|| format!("loading settings from {}", args.settings.display()))?;

    match args.command {
        Command::Quote {
            program,
            cabin,
            passengers,
            bonus,
            ratio,
            origin,
            destination,
            miles,
            airline,
            date,
        } => {
            let date =
                date.unwrap_or_else(|| chrono::Local::now().format(DATE_FORMAT).to_string());
            let request = match miles {
                Some(miles) => PricingRequest::manual(program, cabin, miles, date),
                None => {
                    let origin = origin.unwrap_or_else(|| settings.origin.clone());
                    let destination = destination.unwrap_or_default();
                    PricingRequest::distance(program, cabin, origin, destination, date)
                }
            }
            .with_passengers(passengers)
            .with_bonus_percent(bonus)
            .with_ratio(ratio)
            .with_airline(airline);

            let result = settings.engine().price(&request)?;
            println!("{}", result);
            println!("(Note: real expiry rules can be more complex. Change validity with set-program.)");
        }
        Command::Programs => {
            println!("{:<28} {:>17} {:>16}", "Program", "Validity (months)", "Default ratio ×");
            for summary in settings.program_summaries() {
                println!(
                    "{:<28} {:>17} {:>16}",
                    summary.name, summary.validity_months, summary.ratio_multiplier
                );
            }
        }
        Command::SetProgram {
            name,
            validity,
            ratio,
        } => {
            settings.update_program(&name, validity, ratio)?;
            store.save(&settings)?;
            println!("Updated {}. Settings saved to {}.", name, store.path().display());
        }
        Command::Airports => {
            for airport in settings.airports.values() {
                println!(
                    "{}  {:<22} {:<16} {:>9.4} {:>10.4}",
                    airport.iata, airport.city, airport.country, airport.lat, airport.lon
                );
            }
        }
    }

    Ok(())
}
