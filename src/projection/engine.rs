//! Monthly projection of the early and deferred income streams
//!
//! Lays the EPV calculation out month by month so it can be inspected or
//! exported. Survival has annual granularity (probability of reaching the
//! start of the current age-year) and discounting is monthly.

use log::debug;

use super::cashflows::{ProjectionResult, ProjectionRow};
use super::growth::{growth_series, GrowthPoint};
use crate::assumptions::{Assumptions, TERMINAL_AGE};
use crate::bridge::BridgeEvaluator;
use crate::error::Result;
use crate::profile::ScenarioRequest;
use crate::valuation::monthly_rate_from_annual;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Age at which the monthly projection stops (exclusive)
    pub end_age: u32,

    /// First and last ages of the accumulated-value series
    pub growth_ages: (u32, u32),
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            end_age: TERMINAL_AGE,
            growth_ages: (60, 95),
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine<'a> {
    assumptions: &'a Assumptions,
    config: ProjectionConfig,
}

impl<'a> ProjectionEngine<'a> {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: &'a Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    /// Project both streams monthly from the current age
    ///
    /// Rows are weighted by survival from today; the pre-retirement
    /// conditioning option does not apply here. When the current age is at
    /// or below the standard age the summary totals equal the EPVs reported
    /// by the evaluator with pre-retirement mortality discounted.
    pub fn project(&self, req: &ScenarioRequest) -> Result<ProjectionResult> {
        req.validate()?;

        let benefit = &self.assumptions.benefit;
        let mortality = &self.assumptions.mortality;
        let monthly_rate = monthly_rate_from_annual(req.real_rate_of_return);
        let target_monthly = BridgeEvaluator::new(self.assumptions).target_monthly_income(req);

        let months_total = self.config.end_age.saturating_sub(req.current_age) * 12;
        let mut result = ProjectionResult::new();

        for t in 0..months_total {
            let age_year = req.current_age + t / 12;
            let mut row = ProjectionRow::new(t, age_year, t % 12);

            row.survival_probability = mortality.survival_probability(
                req.current_age,
                age_year,
                req.gender,
                req.health_status,
            );
            row.discount_factor = 1.0 / (1.0 + monthly_rate).powi(t as i32);

            if age_year >= benefit.standard_age {
                row.early_cashflow = req.cpp_estimate_at_65;
            }
            if age_year >= benefit.delayed_age {
                row.delayed_cashflow = target_monthly;
            }

            let weight = row.discount_factor * row.survival_probability;
            row.early_pv = row.early_cashflow * weight;
            row.delayed_pv = row.delayed_cashflow * weight;

            result.add_row(row);
        }

        debug!("Projected {} months from age {}", months_total, req.current_age);
        Ok(result)
    }

    /// Accumulated value of both streams over the configured age range
    pub fn growth(&self, req: &ScenarioRequest) -> Result<Vec<GrowthPoint>> {
        req.validate()?;

        let monthly_rate = monthly_rate_from_annual(req.real_rate_of_return);
        let target_monthly = BridgeEvaluator::new(self.assumptions).target_monthly_income(req);

        Ok(growth_series(
            req.cpp_estimate_at_65,
            target_monthly,
            monthly_rate,
            self.config.growth_ages,
            &self.assumptions.benefit,
        ))
    }
}
