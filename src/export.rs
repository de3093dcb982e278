//! CSV and JSON writers for engine output
//!
//! Amounts are written with their decimal scale intact (`1957.80`, not `1957.8`).

use crate::finance::AmortizationRow;
use crate::scenario::ScenarioSummary;
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const AMORTIZATION_HEADER: [&str; 6] = ["Month", "Year", "Payment", "Interest", "Principal", "Balance"];

const SUMMARY_HEADER: [&str; 12] = [
    "ScenarioID",
    "Address",
    "PurchasePrice",
    "MonthlyCashFlow",
    "AnnualCashFlow",
    "CapRate",
    "CashOnCash",
    "DSCR",
    "BreakEvenRent",
    "ProjectedROI",
    "Warnings",
    "Error",
];

fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write an amortization schedule as CSV
pub fn write_amortization_csv<W: Write>(writer: W, rows: &[AmortizationRow]) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(AMORTIZATION_HEADER)?;

    for row in rows {
        csv_writer.write_record([
            row.month.to_string(),
            row.year.to_string(),
            row.payment.to_string(),
            row.interest.to_string(),
            row.principal.to_string(),
            row.balance.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_amortization_csv_path<P: AsRef<Path>>(path: P, rows: &[AmortizationRow]) -> Result<(), Box<dyn Error>> {
    write_amortization_csv(File::create(path)?, rows)
}

/// Write one summary line per scenario as CSV
pub fn write_summary_csv<W: Write>(writer: W, summaries: &[ScenarioSummary]) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SUMMARY_HEADER)?;

    for summary in summaries {
        csv_writer.write_record([
            summary.scenario_id.clone(),
            summary.address.clone(),
            optional(summary.purchase_price),
            optional(summary.monthly_cash_flow),
            optional(summary.annual_cash_flow),
            optional(summary.cap_rate),
            optional(summary.cash_on_cash),
            optional(summary.dscr),
            optional(summary.break_even_rent),
            optional(summary.projected_roi),
            summary.warnings.to_string(),
            summary.error.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_summary_csv_path<P: AsRef<Path>>(path: P, summaries: &[ScenarioSummary]) -> Result<(), Box<dyn Error>> {
    write_summary_csv(File::create(path)?, summaries)
}

/// Pretty-printed JSON of any result structure
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, value)
}
