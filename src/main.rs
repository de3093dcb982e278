//! Realty Metrics CLI
//!
//! Runs single-property analyses, strategy comparisons and amortization
//! schedules from JSON requests.

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::{Args, Parser, Subcommand};
use realty_metrics::export::{to_json, write_amortization_csv_path};
use realty_metrics::finance::{amortization_schedule, monthly_payment};
use realty_metrics::{AnalysisEngine, AnalysisRequest, Assumptions, ComparisonRequest};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "realty", version, about = "Real-estate investment metrics")]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand
#[derive(Debug, Args)]
struct EngineArgs {
    /// Directory holding engine_assumptions.csv overrides
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Year building ages are measured against (defaults to the current year)
    #[arg(long, global = true)]
    reference_year: Option<i32>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a single rental property request
    Analyze {
        /// Analysis request JSON
        #[arg(long)]
        input: PathBuf,
    },
    /// Compare flip, rental and vacation-rental strategies
    Compare {
        /// Comparison request JSON
        #[arg(long)]
        input: PathBuf,
    },
    /// Print or export a loan amortization schedule
    Amortize {
        #[arg(long)]
        loan: Decimal,

        /// Annual interest rate in percent
        #[arg(long)]
        rate: Decimal,

        #[arg(long, default_value_t = 30)]
        years: u32,

        /// Write the full schedule as CSV instead of printing a summary
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Engine output plus the time it was produced
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    result: &'a T,
    calculation_timestamp: String,
}

fn load_assumptions(args: &EngineArgs) -> Result<Assumptions> {
    let assumptions = match &args.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .map_err(|e| anyhow!("Failed to load assumptions from {}: {}", dir.display(), e))?,
        None => Assumptions::standard(),
    };
    let year = args.reference_year.unwrap_or_else(|| Local::now().year());
    Ok(assumptions.with_reference_year(year))
}

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid request in {}", path.display()))
}

fn print_stamped<T: Serialize>(result: &T) -> Result<()> {
    let stamped = Stamped {
        result,
        calculation_timestamp: Utc::now().to_rfc3339(),
    };
    println!("{}", to_json(&stamped)?);
    Ok(())
}

fn amortize(loan: Decimal, rate: Decimal, years: u32, output: Option<&Path>) -> Result<()> {
    let schedule = amortization_schedule(loan, rate, years);

    if let Some(path) = output {
        write_amortization_csv_path(path, &schedule)
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        println!("Wrote {} payments to {}", schedule.len(), path.display());
        return Ok(());
    }

    let total_interest: Decimal = schedule.iter().map(|row| row.interest).sum();
    println!("Loan ${} at {}% over {} years", loan, rate, years);
    println!("Monthly payment: ${}", monthly_payment(loan, rate, years));
    println!("Total interest:  ${}", total_interest);
    println!();
    println!("{:>5} {:>4} {:>12} {:>12} {:>12} {:>14}", "Month", "Year", "Payment", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(64));
    for row in schedule.iter().take(12) {
        println!(
            "{:>5} {:>4} {:>12} {:>12} {:>12} {:>14}",
            row.month, row.year, row.payment, row.interest, row.principal, row.balance
        );
    }
    if schedule.len() > 12 {
        println!("... {} more payments", schedule.len() - 12);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { input } => {
            let engine = AnalysisEngine::new(load_assumptions(&cli.engine)?);
            let request: AnalysisRequest = read_request(&input)?;
            let result = engine.analyze(&request).context("Analysis failed")?;
            print_stamped(&result)
        }
        Command::Compare { input } => {
            let engine = AnalysisEngine::new(load_assumptions(&cli.engine)?);
            let request: ComparisonRequest = read_request(&input)?;
            let result = engine.compare(&request).context("Comparison failed")?;
            print_stamped(&result)
        }
        Command::Amortize {
            loan,
            rate,
            years,
            output,
        } => amortize(loan, rate, years, output.as_deref()),
    }
}
