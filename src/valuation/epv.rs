//! Expected present value of a mortality-weighted monthly income stream

use super::annuity::monthly_rate_from_annual;
use crate::assumptions::{MortalityTable, TERMINAL_AGE};
use crate::profile::{Gender, HealthStatus};

/// EPV today of `monthly_payment` paid from `start_age` to the terminal age
///
/// Survival is evaluated once per age-year and applied to all twelve
/// payments in that year. Months are counted from `current_age`; when the
/// retiree is already past `start_age` the earlier payments are accumulated
/// forward rather than discounted.
pub fn expected_present_value(
    mortality: &MortalityTable,
    monthly_payment: f64,
    start_age: u32,
    current_age: u32,
    real_rate: f64,
    gender: Gender,
    health: HealthStatus,
) -> f64 {
    let monthly_rate = monthly_rate_from_annual(real_rate);
    let mut epv = 0.0;

    for age in start_age..=TERMINAL_AGE {
        let survival = mortality.survival_probability(current_age, age, gender, health);
        if survival == 0.0 {
            // Survival to every later age is zero as well
            break;
        }

        let years_from_now = age as i32 - current_age as i32;
        for month in 0..12 {
            let months_from_now = years_from_now * 12 + month;
            let discount_factor = 1.0 / (1.0 + monthly_rate).powi(months_from_now);
            epv += monthly_payment * discount_factor * survival;
        }
    }

    epv
}

/// Divisor that conditions an EPV on reaching `anchor_age`
///
/// Returns 1.0 (no adjustment) when pre-retirement mortality is being
/// discounted, when the retiree is already at or past `anchor_age`, or when
/// survival to `anchor_age` is zero.
pub fn pre_retirement_divisor(
    mortality: &MortalityTable,
    current_age: u32,
    anchor_age: u32,
    gender: Gender,
    health: HealthStatus,
    discount_pre_retirement_mortality: bool,
) -> f64 {
    if discount_pre_retirement_mortality || current_age >= anchor_age {
        return 1.0;
    }

    let survival = mortality.survival_probability(current_age, anchor_age, gender, health);
    if survival > 0.0 {
        survival
    } else {
        1.0
    }
}
