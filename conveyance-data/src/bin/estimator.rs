use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use conveyance_core::calculations::{CostEstimator, MAX_TERM_YEARS};
use conveyance_core::{AmortizationResult, ScheduledPayment};
use conveyance_data::{RateTableLoader, parse_amount};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Property transfer and bond registration cost estimator.
///
/// Loads rate tables from a directory and prints the requested estimate as
/// JSON on stdout. Log output goes to stderr.
#[derive(Debug, Parser)]
#[command(name = "conveyance-estimator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing duty_schedules.json (or .csv), transfer_fees.json
    /// and bond_fees.json.
    #[arg(short, long)]
    tables: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cost of transferring a property, transfer duty included.
    Transfer {
        /// Purchase price, e.g. "R2 000 000" or 2000000.
        #[arg(value_parser = amount_arg)]
        price: Decimal,

        /// Acquisition date (YYYY-MM-DD); defaults to today.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Cost of registering a bond.
    Bond {
        /// Bond amount.
        #[arg(value_parser = amount_arg)]
        amount: Decimal,
    },

    /// Transfer duty only.
    Duty {
        /// Property value.
        #[arg(value_parser = amount_arg)]
        value: Decimal,

        /// Acquisition date (YYYY-MM-DD); defaults to today.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Monthly home loan repayment.
    Repayment {
        /// Loan principal.
        #[arg(value_parser = amount_arg)]
        principal: Decimal,

        /// Annual interest rate in percent, e.g. 10.5.
        #[arg(short, long)]
        rate: Decimal,

        /// Loan term in years.
        #[arg(
            short,
            long,
            default_value_t = 20,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TERM_YEARS))
        )]
        years: u32,

        /// Include the month-by-month schedule.
        #[arg(short, long, default_value_t = false)]
        schedule: bool,
    },

    /// Load and validate the rate tables without calculating anything.
    Validate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RepaymentReport {
    #[serde(flatten)]
    summary: AmortizationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<ScheduledPayment>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    tables: PathBuf,
    duty_schedules: Vec<NaiveDate>,
    transfer_tiers: usize,
    bond_tiers: usize,
}

fn amount_arg(s: &str) -> std::result::Result<Decimal, String> {
    parse_amount(s).ok_or_else(|| format!("'{s}' is not an amount"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    debug!(tables = %cli.tables.display(), "loading rate tables");
    let tables = RateTableLoader::load_dir(&cli.tables)
        .with_context(|| format!("Failed to load rate tables from: {}", cli.tables.display()))?;
    let estimator = CostEstimator::new(&tables);

    match cli.command {
        Command::Transfer { price, date } => {
            print_json(&estimator.transfer_costs(price, date.unwrap_or(today)))
        }
        Command::Bond { amount } => print_json(&estimator.bond_costs(amount)),
        Command::Duty { value, date } => {
            print_json(&estimator.transfer_duty(value, date.unwrap_or(today)))
        }
        Command::Repayment {
            principal,
            rate,
            years,
            schedule,
        } => print_json(&RepaymentReport {
            summary: estimator.repayment(principal, rate, years),
            schedule: schedule.then(|| estimator.repayment_schedule(principal, rate, years)),
        }),
        Command::Validate => {
            info!("rate tables are valid");
            let loaded = estimator.tables();
            print_json(&ValidationReport {
                tables: cli.tables.clone(),
                duty_schedules: loaded
                    .duty_schedules
                    .iter()
                    .map(|schedule| schedule.effective_from)
                    .collect(),
                transfer_tiers: loaded.transfer.tiers.len(),
                bond_tiers: loaded.bond.tiers.len(),
            })
        }
    }
}
