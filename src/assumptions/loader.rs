//! CSV-based assumption overrides
//!
//! Loads `key,value` rows from data/assumptions/engine_assumptions.csv

use rust_decimal::Decimal;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File holding the override rows
pub const OVERRIDES_FILE: &str = "engine_assumptions.csv";

/// Load override rows from `engine_assumptions.csv` in the given directory
pub fn load_overrides(path: &Path) -> Result<Vec<(String, Decimal)>, Box<dyn Error>> {
    let file = File::open(path.join(OVERRIDES_FILE))?;
    load_overrides_from_reader(file)
}

/// Load override rows from any reader with a `key,value` header
pub fn load_overrides_from_reader<R: Read>(reader: R) -> Result<Vec<(String, Decimal)>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut overrides = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record[0].to_string();
        let value = Decimal::from_str(&record[1])
            .map_err(|e| format!("Invalid value for assumption `{}`: {}", key, e))?;
        overrides.push((key, value));
    }

    Ok(overrides)
}
