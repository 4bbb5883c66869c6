//! Result record returned for a bridge scenario

use serde::{Deserialize, Serialize};

/// Claiming decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Delay to 70")]
    DelayTo70,
    #[serde(rename = "Take Early (65)")]
    TakeEarly,
}

impl Recommendation {
    /// Majority-survival rule: delay when reaching breakeven is more likely than not
    pub fn from_probability(probability_of_winning: f64) -> Self {
        if probability_of_winning > 0.5 {
            Recommendation::DelayTo70
        } else {
            Recommendation::TakeEarly
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::DelayTo70 => "Delay to 70",
            Recommendation::TakeEarly => "Take Early (65)",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one scenario evaluation, rounded for display
///
/// Currency amounts carry 2 decimals except the bridge cost (whole units);
/// the probability carries 4 decimals and life expectancy 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Savings needed today to fund the bridge
    pub bridge_cost_lump_sum: f64,
    pub target_monthly_income_at_70: f64,
    pub is_affordable: bool,
    pub shortfall_amount: f64,
    pub surplus_amount: f64,
    /// Surplus savings accumulated to age 85
    pub bonus_estate_value_at_85: f64,
    pub breakeven_age_economic: u32,
    /// Probability of surviving to the breakeven age
    pub probability_of_winning: f64,
    pub life_expectancy: f64,
    pub epv_early: f64,
    pub epv_delayed: f64,
    pub recommendation: Recommendation,
    pub recommendation_reasoning: String,
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
