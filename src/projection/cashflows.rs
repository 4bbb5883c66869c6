//! Cashflow output structures for projections

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single row of projection output for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRow {
    // Timing
    pub month_index: u32,
    pub age_year: u32,
    pub age_month: u32,

    // Decrement and discount applied to this month
    pub survival_probability: f64,
    pub discount_factor: f64,

    // Claim at the standard age
    pub early_cashflow: f64,
    pub early_pv: f64,

    // Claim at the deferred age
    pub delayed_cashflow: f64,
    pub delayed_pv: f64,
}

impl ProjectionRow {
    pub fn new(month_index: u32, age_year: u32, age_month: u32) -> Self {
        Self {
            month_index,
            age_year,
            age_month,
            survival_probability: 1.0,
            discount_factor: 1.0,
            early_cashflow: 0.0,
            early_pv: 0.0,
            delayed_cashflow: 0.0,
            delayed_pv: 0.0,
        }
    }
}

/// Complete result of a monthly projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows from the current age to the terminal age
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a projection row
    pub fn add_row(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_epv_early: f64 = self.rows.iter().map(|r| r.early_pv).sum();
        let total_epv_delayed: f64 = self.rows.iter().map(|r| r.delayed_pv).sum();
        let final_survival = self
            .rows
            .last()
            .map(|r| r.survival_probability)
            .unwrap_or(1.0);

        ProjectionSummary {
            total_months: self.rows.len() as u32,
            total_epv_early,
            total_epv_delayed,
            final_survival,
        }
    }

    /// Write every row as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_epv_early: f64,
    pub total_epv_delayed: f64,
    /// Survival probability applied in the last projected month
    pub final_survival: f64,
}
