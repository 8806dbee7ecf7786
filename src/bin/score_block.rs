//! Score and price a block of applicants from CSV
//!
//! Outputs one row per applicant with the priced terms or the rejection code

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use credit_conveyor::applicant::{load_applicants, loader::DEFAULT_APPLICANTS_PATH};
use credit_conveyor::{BatchSummary, ScoringConfig, ScoringRunner};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Price a block of applicant profiles in parallel")]
struct Args {
    /// Applicant profiles CSV
    #[arg(long, default_value = DEFAULT_APPLICANTS_PATH)]
    input: PathBuf,

    /// Output CSV
    #[arg(long, default_value = "block_scoring_output.csv")]
    output: PathBuf,

    /// Scoring parameters CSV (defaults to built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading applicants from {}...", args.input.display());
    let profiles = load_applicants(&args.input)?;
    println!("Loaded {} applicants in {:?}", profiles.len(), start.elapsed());

    let config = match &args.config {
        Some(path) => ScoringConfig::from_csv_path(path)?,
        None => ScoringConfig::default(),
    };
    let runner = ScoringRunner::with_config(config);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Scoring...");
    let scoring_start = Instant::now();
    let results = runner.run_batch(&profiles, today);
    println!("Scoring complete in {:?}", scoring_start.elapsed());

    let mut file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writeln!(file, "Row,Status,Code,RequestedAmount,Amount,Term,Rate,MonthlyPayment,TotalRepayment")?;

    for (row, (profile, result)) in profiles.iter().zip(&results).enumerate() {
        match result {
            Ok(credit) => writeln!(
                file,
                "{},APPROVED,,{},{},{},{},{},{}",
                row + 1,
                credit.requested_amount,
                credit.amount,
                credit.term,
                credit.rate,
                credit.monthly_payment,
                credit.total_repayment,
            )?,
            Err(reason) => writeln!(
                file,
                "{},REJECTED,{},{},,{},,,",
                row + 1,
                reason.code(),
                profile.request.amount,
                profile.request.term,
            )?,
        }
    }

    println!("Output written to {}", args.output.display());

    let summary = BatchSummary::from_results(&results);
    println!("\nBlock Summary:");
    println!("  Applicants:      {}", summary.total);
    println!("  Approved:        {}", summary.approved);
    println!("  Rejected:        {}", summary.rejected);
    for (code, count) in &summary.rejections_by_code {
        println!("    {:<28} {}", code, count);
    }
    println!("  Total principal: {:.2}", summary.total_principal);
    println!("  Total repayment: {:.2}", summary.total_repayment);
    println!("  Weighted rate:   {:.4}", summary.weighted_average_rate);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
