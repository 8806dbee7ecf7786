//! Credit Conveyor CLI
//!
//! Generates offers for a loan request or prices a full applicant profile and
//! prints the result as JSON.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use credit_conveyor::{ApplicantProfile, CreditEngine, LoanRequest, ScoringConfig};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "credit_conveyor", version, about = "Credit scoring and loan pricing")]
struct Cli {
    /// Scoring parameters CSV (defaults to built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the four pre-scoring offers
    Offers {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
        #[arg(long)]
        birth_date: NaiveDate,
    },
    /// Score and price a full applicant profile read from a JSON file
    Price {
        #[arg(long)]
        profile: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_csv_path(path)?,
        None => ScoringConfig::default(),
    };
    let engine = CreditEngine::new(config);
    // The only place the wall clock is read
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let output = match cli.command {
        Command::Offers {
            amount,
            term,
            birth_date,
        } => {
            let request = LoanRequest::new(amount, term, birth_date);
            engine
                .generate_offers(&request, today)
                .map(|offers| serde_json::to_string_pretty(&offers))
        }
        Command::Price { profile } => {
            let file = std::fs::File::open(&profile)
                .with_context(|| format!("opening profile {}", profile.display()))?;
            let profile: ApplicantProfile =
                serde_json::from_reader(file).context("parsing applicant profile")?;
            engine
                .price_credit(&profile, today)
                .map(|credit| serde_json::to_string_pretty(&credit))
        }
    };

    match output {
        Ok(json) => {
            println!("{}", json?);
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            eprintln!("rejected [{}]: {}", reason.code(), reason);
            Ok(ExitCode::from(2))
        }
    }
}
