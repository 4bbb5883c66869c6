//! CPP benefit rules and the fixed ages used by the bridge analysis

/// Fixed benefit-rule constants
///
/// These are process-wide configuration: built once alongside the mortality
/// table and never mutated during an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitAssumptions {
    /// Standard claiming age
    pub standard_age: u32,

    /// Deferred claiming age
    pub delayed_age: u32,

    /// Benefit multiplier for claiming at `delayed_age` instead of `standard_age`
    /// (0.7% per month for 60 months)
    pub delay_factor: f64,

    /// Months of income the bridge must replace
    pub bridge_months: u32,

    /// Age at which any surplus savings are valued for the estate
    pub estate_age: u32,

    /// First and last ages tried by the breakeven scan (inclusive)
    pub breakeven_scan: (u32, u32),

    /// Reported when delaying never overtakes claiming early within the scan
    pub breakeven_sentinel_age: u32,
}

impl BenefitAssumptions {
    /// Years between the standard and the deferred claiming age
    pub fn deferral_years(&self) -> u32 {
        self.delayed_age - self.standard_age
    }

    /// Months between the standard and the deferred claiming age
    pub fn deferral_months(&self) -> u32 {
        self.deferral_years() * 12
    }
}

impl Default for BenefitAssumptions {
    fn default() -> Self {
        Self {
            standard_age: 65,
            delayed_age: 70,
            delay_factor: 1.42,
            bridge_months: 60,
            estate_age: 85,
            breakeven_scan: (66, 105),
            breakeven_sentinel_age: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deferral_window() {
        let benefit = BenefitAssumptions::default();
        assert_eq!(benefit.deferral_years(), 5);
        assert_eq!(benefit.deferral_months(), 60);
        assert_eq!(benefit.deferral_months(), benefit.bridge_months);
    }

    #[test]
    fn test_sentinel_inside_scan() {
        let benefit = BenefitAssumptions::default();
        let (first, last) = benefit.breakeven_scan;
        assert!(first > benefit.standard_age);
        assert!((first..=last).contains(&benefit.breakeven_sentinel_age));
    }
}
