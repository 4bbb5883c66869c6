//! Bridge scenario evaluator
//!
//! Ties the mortality model and the valuation helpers together for a single
//! request. An evaluation is a single synchronous pass with no side effects:
//! the same request against the same assumptions always yields the same result.

use log::debug;

use super::result::{round_to, Recommendation, ScenarioResult};
use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::profile::ScenarioRequest;
use crate::valuation::{
    compound_years, discount_years, economic_breakeven_age, expected_present_value,
    monthly_rate_from_annual, pre_retirement_divisor, present_value_annuity_due,
};

/// Evaluates bridge scenarios against a fixed set of assumptions
#[derive(Debug, Clone, Copy)]
pub struct BridgeEvaluator<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> BridgeEvaluator<'a> {
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    /// Monthly benefit at the deferred age, indexed by wage growth over the deferral
    pub fn target_monthly_income(&self, req: &ScenarioRequest) -> f64 {
        let benefit = &self.assumptions.benefit;
        let wage_index = (1.0 + req.wage_growth).powi(benefit.deferral_years() as i32);
        req.cpp_estimate_at_65 * benefit.delay_factor * wage_index
    }

    /// Validate and evaluate a request
    pub fn evaluate(&self, req: &ScenarioRequest) -> Result<ScenarioResult> {
        req.validate()?;

        let benefit = &self.assumptions.benefit;
        let mortality = &self.assumptions.mortality;
        let rate = req.real_rate_of_return;

        // Rates
        let monthly_rate = monthly_rate_from_annual(rate);

        // Deferred benefit
        let target_monthly = self.target_monthly_income(req);

        // Bridge cost at the standard age, then discounted to today
        let cost_at_standard_age =
            present_value_annuity_due(target_monthly, monthly_rate, benefit.bridge_months);
        let years_to_standard_age = benefit.standard_age.saturating_sub(req.current_age);
        let cost_today = discount_years(cost_at_standard_age, rate, years_to_standard_age);

        // Affordability
        let is_affordable = req.rrsp_savings >= cost_today;
        let shortfall = (cost_today - req.rrsp_savings).max(0.0);
        let surplus = (req.rrsp_savings - cost_today).max(0.0);

        // Surplus left in the estate
        let bonus_estate = if surplus > 0.0 {
            let years_to_estate_age = benefit.estate_age.saturating_sub(req.current_age);
            compound_years(surplus, rate, years_to_estate_age)
        } else {
            0.0
        };

        // Breakeven and the chance of living to it
        let breakeven_age = economic_breakeven_age(
            req.cpp_estimate_at_65,
            target_monthly,
            monthly_rate,
            benefit,
        );
        let probability_of_winning = mortality.survival_probability(
            req.current_age,
            breakeven_age,
            req.gender,
            req.health_status,
        );

        let recommendation = Recommendation::from_probability(probability_of_winning);
        let reasoning = format!(
            "To benefit from delaying, you must live past Age {}. Given your {} health, \
             you have a {:.1}% probability of reaching this milestone.",
            breakeven_age,
            req.health_status,
            probability_of_winning * 100.0
        );

        // Mortality-weighted value of each strategy
        let epv = |payment: f64, start_age: u32| {
            expected_present_value(
                mortality,
                payment,
                start_age,
                req.current_age,
                rate,
                req.gender,
                req.health_status,
            )
        };
        let divisor = pre_retirement_divisor(
            mortality,
            req.current_age,
            benefit.standard_age,
            req.gender,
            req.health_status,
            req.discount_pre_retirement_mortality,
        );
        let epv_early = epv(req.cpp_estimate_at_65, benefit.standard_age) / divisor;
        let epv_delayed = epv(target_monthly, benefit.delayed_age) / divisor;

        let life_expectancy =
            mortality.life_expectancy(req.current_age, req.gender, req.health_status);

        debug!(
            "age {} cost {:.2} breakeven {} p(win) {:.4} -> {}",
            req.current_age, cost_today, breakeven_age, probability_of_winning, recommendation
        );

        Ok(ScenarioResult {
            bridge_cost_lump_sum: cost_today.round(),
            target_monthly_income_at_70: round_to(target_monthly, 2),
            is_affordable,
            shortfall_amount: round_to(shortfall, 2),
            surplus_amount: round_to(surplus, 2),
            bonus_estate_value_at_85: round_to(bonus_estate, 2),
            breakeven_age_economic: breakeven_age,
            probability_of_winning: round_to(probability_of_winning, 4),
            life_expectancy,
            epv_early: round_to(epv_early, 2),
            epv_delayed: round_to(epv_delayed, 2),
            recommendation,
            recommendation_reasoning: reasoning,
        })
    }
}
