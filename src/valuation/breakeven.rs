//! Breakeven ages between claiming at the standard age and deferring
//!
//! Both searches ignore mortality: they answer "how long must you live",
//! and the survival probability to that age is computed separately.

use super::annuity::present_value_annuity_due;
use crate::assumptions::BenefitAssumptions;

/// PV at the standard age of each stream, received up to a candidate age
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamValues {
    pub age: u32,
    pub pv_early: f64,
    pub pv_delayed: f64,
}

/// Value both income streams up to `age`, anchored at the standard age
///
/// The delayed stream is priced at the deferred age and then discounted over
/// the deferral window so the two values are comparable.
pub fn stream_values(
    early_monthly: f64,
    delayed_monthly: f64,
    monthly_rate: f64,
    age: u32,
    benefit: &BenefitAssumptions,
) -> StreamValues {
    let months_early = age.saturating_sub(benefit.standard_age) * 12;
    let pv_early = present_value_annuity_due(early_monthly, monthly_rate, months_early);

    let pv_delayed = if age < benefit.delayed_age {
        0.0
    } else {
        let months_delayed = (age - benefit.delayed_age) * 12;
        let pv_at_delayed_age =
            present_value_annuity_due(delayed_monthly, monthly_rate, months_delayed);
        pv_at_delayed_age / (1.0 + monthly_rate).powi(benefit.deferral_months() as i32)
    };

    StreamValues {
        age,
        pv_early,
        pv_delayed,
    }
}

/// First scanned age at which the deferred stream is worth more, if any
///
/// The gap between the two streams widens monotonically once the deferred
/// benefit starts, so the first crossing is the only one under normal
/// parameters. Should a parameter set ever produce several crossings, the
/// youngest one is reported.
pub fn first_economic_crossing(
    early_monthly: f64,
    delayed_monthly: f64,
    monthly_rate: f64,
    benefit: &BenefitAssumptions,
) -> Option<u32> {
    let (first, last) = benefit.breakeven_scan;
    (first..=last)
        .map(|age| stream_values(early_monthly, delayed_monthly, monthly_rate, age, benefit))
        .find(|values| values.pv_delayed > values.pv_early)
        .map(|values| values.age)
}

/// Economic breakeven age, or the sentinel age when no crossing is found
pub fn economic_breakeven_age(
    early_monthly: f64,
    delayed_monthly: f64,
    monthly_rate: f64,
    benefit: &BenefitAssumptions,
) -> u32 {
    first_economic_crossing(early_monthly, delayed_monthly, monthly_rate, benefit)
        .unwrap_or_else(|| {
            log::debug!(
                "no breakeven within ages {:?}, reporting {}",
                benefit.breakeven_scan,
                benefit.breakeven_sentinel_age
            );
            benefit.breakeven_sentinel_age
        })
}

/// First age by whose end the undiscounted deferred income exceeds the early income
///
/// Counts a full year of payments for every year from the claiming age up
/// to and including the candidate age.
pub fn nominal_breakeven_age(
    early_monthly: f64,
    delayed_monthly: f64,
    benefit: &BenefitAssumptions,
) -> Option<u32> {
    let (_, last) = benefit.breakeven_scan;
    let mut total_early = 0.0;
    let mut total_delayed = 0.0;

    for age in benefit.standard_age..=last {
        total_early += early_monthly * 12.0;
        if age >= benefit.delayed_age {
            total_delayed += delayed_monthly * 12.0;
        }

        if total_delayed > total_early {
            return Some(age);
        }
    }

    None
}
