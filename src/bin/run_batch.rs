//! Analyze every property scenario in a CSV file and write a summary CSV
//!
//! Usage: run_batch [scenarios.csv] [summary.csv]

use anyhow::{anyhow, Result};
use realty_metrics::export::write_summary_csv_path;
use realty_metrics::scenario::{load_scenarios, loader::DEFAULT_SCENARIOS_PATH, ScenarioSummary};
use realty_metrics::ScenarioRunner;
use std::env;
use std::time::Instant;

const DEFAULT_OUTPUT_PATH: &str = "batch_summary.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_SCENARIOS_PATH.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    let start = Instant::now();
    println!("Loading scenarios from {}...", input);
    let scenarios = load_scenarios(&input).map_err(|e| anyhow!("Failed to load {}: {}", input, e))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::from_csv().unwrap_or_else(|e| {
        log::warn!("Using standard assumptions ({})", e);
        ScenarioRunner::new()
    });

    let outcomes = runner.run_batch(&scenarios);
    let summaries: Vec<ScenarioSummary> = outcomes.iter().map(ScenarioSummary::from_outcome).collect();

    write_summary_csv_path(&output, &summaries).map_err(|e| anyhow!("Failed to write {}: {}", output, e))?;
    println!("Output written to {}", output);

    println!("\nBatch Summary:");
    for summary in &summaries {
        match &summary.error {
            None => println!(
                "  {:<12} cash flow {:>10}/mo  cap {:>5}%  CoC {:>6}%  warnings {}",
                summary.scenario_id,
                summary.monthly_cash_flow.unwrap_or_default(),
                summary.cap_rate.unwrap_or_default(),
                summary.cash_on_cash.unwrap_or_default(),
                summary.warnings
            ),
            Some(error) => println!("  {:<12} FAILED: {}", summary.scenario_id, error),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
