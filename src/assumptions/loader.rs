//! CSV-based assumption loader
//!
//! Loads the mortality table from CSV files in data/assumptions/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use super::mortality::{MortalityTable, TABLE_MAX_AGE};
use crate::error::{BridgeError, Result};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Mortality table file name inside the assumptions directory
pub const MORTALITY_TABLE_FILE: &str = "mortality_table.csv";

/// Raw CSV row matching mortality_table.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Male-qx")]
    male: f64,
    #[serde(rename = "Female-qx")]
    female: f64,
}

/// Load the mortality table from `<dir>/mortality_table.csv`
pub fn load_mortality_table(dir: &Path) -> Result<MortalityTable> {
    load_mortality_table_file(&dir.join(MORTALITY_TABLE_FILE))
}

/// Load the mortality table from a specific CSV file
pub fn load_mortality_table_file(path: &Path) -> Result<MortalityTable> {
    info!("Loading mortality table from {}", path.display());
    let file = File::open(path)?;
    load_mortality_table_from_reader(file)
}

/// Parse a mortality table with columns `Age,Male-qx,Female-qx`
///
/// Rows may appear in any order. Every age 0..=110 must appear exactly once;
/// rows for older ages are rejected since qx is 1.0 there by definition.
pub fn load_mortality_table_from_reader<R: Read>(reader: R) -> Result<MortalityTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<Option<(f64, f64)>> = vec![None; TABLE_MAX_AGE as usize + 1];

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let idx = row.age as usize;

        if row.age > TABLE_MAX_AGE {
            return Err(BridgeError::AssumptionLoad(format!(
                "mortality row for age {} is past the table end at {}",
                row.age, TABLE_MAX_AGE
            )));
        }
        if rows[idx].is_some() {
            return Err(BridgeError::AssumptionLoad(format!(
                "duplicate mortality row for age {}",
                row.age
            )));
        }

        // Stored as (female, male) like the builtin table
        rows[idx] = Some((row.female, row.male));
    }

    let mut base_rates = Vec::with_capacity(rows.len());
    for (age, row) in rows.into_iter().enumerate() {
        match row {
            Some(rates) => base_rates.push(rates),
            None => {
                return Err(BridgeError::AssumptionLoad(format!(
                    "mortality table has no row for age {}",
                    age
                )))
            }
        }
    }

    debug!("Parsed {} mortality rows", base_rates.len());
    MortalityTable::from_rates(base_rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_csv(last_qx: f64, skip_age: Option<u32>) -> String {
        let mut csv = String::from("Age,Male-qx,Female-qx\n");
        for age in 0..=TABLE_MAX_AGE {
            if Some(age) == skip_age {
                continue;
            }
            let (male, female) = if age == TABLE_MAX_AGE {
                (last_qx, last_qx)
            } else {
                (0.01, 0.005)
            };
            csv.push_str(&format!("{},{},{}\n", age, male, female));
        }
        csv
    }

    #[test]
    fn test_load_shipped_table_matches_builtin() {
        let table = load_mortality_table(Path::new(DEFAULT_ASSUMPTIONS_PATH))
            .expect("Failed to load mortality table");
        assert_eq!(table, MortalityTable::builtin());
    }

    #[test]
    fn test_columns_map_to_gender() {
        let table = load_mortality_table_from_reader(table_csv(1.0, None).as_bytes()).unwrap();
        assert_eq!(table.base_rate(40, crate::profile::Gender::Male), 0.01);
        assert_eq!(table.base_rate(40, crate::profile::Gender::Female), 0.005);
    }

    #[test]
    fn test_missing_age_rejected() {
        let err = load_mortality_table_from_reader(table_csv(1.0, Some(42)).as_bytes()).unwrap_err();
        assert!(err.to_string().contains("age 42"), "{}", err);
    }

    #[test]
    fn test_duplicate_age_rejected() {
        let mut csv = table_csv(1.0, None);
        csv.push_str("7,0.5,0.5\n");
        assert!(load_mortality_table_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_rows_past_table_end_rejected() {
        for age in [111, 114, 4_000_000_000u32] {
            let mut csv = table_csv(1.0, None);
            csv.push_str(&format!("{},0.5,0.5\n", age));
            let err = load_mortality_table_from_reader(csv.as_bytes()).unwrap_err();
            assert!(matches!(err, BridgeError::AssumptionLoad(_)), "{}", err);
        }
    }

    #[test]
    fn test_loaded_table_is_certain_death_past_110() {
        use crate::profile::{Gender, HealthStatus};

        let table = load_mortality_table_from_reader(table_csv(1.0, None).as_bytes()).unwrap();
        for age in 111..=114 {
            assert_eq!(table.base_rate(age, Gender::Male), 1.0);
            assert_eq!(table.base_rate(age, Gender::Female), 1.0);
        }
        assert_eq!(table.survival_probability(108, 110, Gender::Male, HealthStatus::Poor), 0.0);
    }

    #[test]
    fn test_open_terminal_age_rejected() {
        assert!(load_mortality_table_from_reader(table_csv(0.5, None).as_bytes()).is_err());
    }

    #[test]
    fn test_unparsable_row_is_csv_error() {
        let csv = "Age,Male-qx,Female-qx\n0,abc,0.1\n";
        let err = load_mortality_table_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, BridgeError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_mortality_table(Path::new("does/not/exist")).unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
