//! Mortality model: base table, health-rated ages, survival and life expectancy
//!
//! The model separates:
//! - Base annual death probabilities (qx) by integer age and gender
//! - A health rating applied as a fixed shift of the lookup age
//!
//! Ages past the end of the table are treated as certain death within the year
//! rather than as an error, matching the table's own terminal entry at 110.

use crate::error::{BridgeError, Result};
use crate::profile::{Gender, HealthStatus};

/// Last age with an explicit entry in the table
pub const TABLE_MAX_AGE: u32 = 110;

/// Age at which every projection stops; qx is 1.0 from here on
pub const TERMINAL_AGE: u32 = 115;

/// Immutable annual mortality table
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityTable {
    /// Base annual mortality rates by age (index = age)
    /// Stored as (female_rate, male_rate)
    base_rates: Vec<(f64, f64)>,
}

/// Apply the health rating to an attained age, clamped to [0, TERMINAL_AGE]
pub fn effective_age(age: u32, health: HealthStatus) -> u32 {
    let shifted = i64::from(age) + i64::from(health.age_shift());
    shifted.clamp(0, i64::from(TERMINAL_AGE)) as u32
}

impl MortalityTable {
    /// Table embedded in the binary (same data as data/assumptions/mortality_table.csv)
    pub fn builtin() -> Self {
        Self {
            base_rates: Self::builtin_base_rates(),
        }
    }

    /// Build a table from (female_rate, male_rate) pairs indexed by age
    ///
    /// Exactly the ages 0..=110 must be present, every rate must lie in [0, 1]
    /// and the age 110 entry must be exactly 1.0.
    pub fn from_rates(base_rates: Vec<(f64, f64)>) -> Result<Self> {
        if base_rates.len() != TABLE_MAX_AGE as usize + 1 {
            return Err(BridgeError::AssumptionLoad(format!(
                "mortality table covers ages 0..={} but must cover exactly 0..={}",
                base_rates.len() as i64 - 1,
                TABLE_MAX_AGE
            )));
        }

        for (age, &(female, male)) in base_rates.iter().enumerate() {
            for qx in [female, male] {
                if !(0.0..=1.0).contains(&qx) {
                    return Err(BridgeError::AssumptionLoad(format!(
                        "qx {} at age {} is outside [0, 1]",
                        qx, age
                    )));
                }
            }
        }

        let (female, male) = base_rates[TABLE_MAX_AGE as usize];
        if female != 1.0 || male != 1.0 {
            return Err(BridgeError::AssumptionLoad(format!(
                "terminal age {} must have qx = 1.0",
                TABLE_MAX_AGE
            )));
        }

        Ok(Self { base_rates })
    }

    /// Number of ages with an explicit entry
    pub fn len(&self) -> usize {
        self.base_rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_rates.is_empty()
    }

    /// Annual probability of death at `age`
    ///
    /// Returns 1.0 for any age past the table end at 110.
    pub fn base_rate(&self, age: u32, gender: Gender) -> f64 {
        if age > TABLE_MAX_AGE {
            return 1.0;
        }

        match self.base_rates.get(age as usize) {
            Some(&(female, male)) => match gender {
                Gender::Female => female,
                Gender::Male => male,
            },
            None => 1.0,
        }
    }

    /// Probability of surviving from `current_age` to `target_age`
    ///
    /// The health rating shifts the starting lookup age once; each following
    /// year reads the next row of the table.
    pub fn survival_probability(
        &self,
        current_age: u32,
        target_age: u32,
        gender: Gender,
        health: HealthStatus,
    ) -> f64 {
        if target_age <= current_age {
            return 1.0;
        }

        let rated_age = effective_age(current_age, health);
        (0..target_age - current_age)
            .map(|i| 1.0 - self.base_rate(rated_age + i, gender))
            .product()
    }

    /// Complete life expectancy (attained age at death), rounded to one decimal
    ///
    /// Curtate expectation plus half a year for deaths occurring mid-year.
    pub fn life_expectancy(&self, current_age: u32, gender: Gender, health: HealthStatus) -> f64 {
        let curtate: f64 = ((current_age + 1)..=TERMINAL_AGE)
            .map(|age| self.survival_probability(current_age, age, gender, health))
            .sum();

        let expectancy = current_age as f64 + curtate + 0.5;
        (expectancy * 10.0).round() / 10.0
    }

    /// Default qx by age, as (female, male) pairs for ages 0 through 110
    fn builtin_base_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (0.0036, 0.0046), (0.0002, 0.0002), (0.0002, 0.0002), (0.0001, 0.0001), (0.0001, 0.0001),
            (0.0001, 0.0001), (0.0001, 0.0001), (0.0001, 0.0001), (0.0001, 0.0001), (0.0001, 0.0001),
            // Age 10-19
            (0.0001, 0.0001), (0.0001, 0.0001), (0.0001, 0.0001), (0.0001, 0.0001), (0.0002, 0.0002),
            (0.0002, 0.0002), (0.0003, 0.0003), (0.0003, 0.0004), (0.0003, 0.0005), (0.0003, 0.0006),
            // Age 20-29
            (0.0004, 0.0006), (0.0004, 0.0009), (0.0004, 0.0009), (0.0004, 0.001), (0.0004, 0.001),
            (0.0005, 0.001), (0.0005, 0.0011), (0.0005, 0.0011), (0.0006, 0.0011), (0.0006, 0.0012),
            // Age 30-39
            (0.0006, 0.0012), (0.0006, 0.0014), (0.0006, 0.0014), (0.0007, 0.0015), (0.0007, 0.0015),
            (0.0007, 0.0015), (0.0008, 0.0015), (0.0008, 0.0016), (0.0008, 0.0017), (0.0009, 0.0017),
            // Age 40-49
            (0.001, 0.0019), (0.0008, 0.0014), (0.0009, 0.0015), (0.001, 0.0016), (0.001, 0.0017),
            (0.0011, 0.0018), (0.0012, 0.0019), (0.0013, 0.0021), (0.0014, 0.0022), (0.0016, 0.0024),
            // Age 50-59
            (0.0017, 0.0026), (0.0018, 0.0028), (0.002, 0.003), (0.0021, 0.0033), (0.0023, 0.0036),
            (0.0025, 0.0039), (0.0027, 0.0043), (0.003, 0.0047), (0.0033, 0.0051), (0.0036, 0.0056),
            // Age 60-69
            (0.0039, 0.0061), (0.0044, 0.0068), (0.0048, 0.0074), (0.0053, 0.0082), (0.0058, 0.009),
            (0.0064, 0.0098), (0.0071, 0.0108), (0.0078, 0.0119), (0.0086, 0.013), (0.0095, 0.0144),
            // Age 70-79
            (0.0105, 0.0158), (0.0118, 0.0176), (0.0131, 0.0194), (0.0145, 0.0214), (0.0162, 0.0237),
            (0.018, 0.0262), (0.0201, 0.0291), (0.0224, 0.0323), (0.0251, 0.0358), (0.028, 0.0397),
            // Age 80-89
            (0.0314, 0.0441), (0.0344, 0.0482), (0.0386, 0.0536), (0.0433, 0.0597), (0.0487, 0.0665),
            (0.0548, 0.0741), (0.0619, 0.0848), (0.0698, 0.0946), (0.0788, 0.1057), (0.089, 0.1181),
            // Age 90-99
            (0.1007, 0.1322), (0.1186, 0.1558), (0.1334, 0.1732), (0.1493, 0.1916), (0.1663, 0.211),
            (0.1866, 0.2338), (0.206, 0.2547), (0.2265, 0.2761), (0.2479, 0.298), (0.27, 0.3202),
            // Age 100-109
            (0.2926, 0.3424), (0.3266, 0.3745), (0.3504, 0.3967), (0.374, 0.4184), (0.3972, 0.4393),
            (0.4197, 0.4594), (0.4415, 0.4784), (0.4623, 0.4963), (0.4819, 0.5131), (0.5004, 0.5287),
            // Age 110 (terminal)
            (1.0, 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_table_shape() {
        let table = MortalityTable::builtin();
        assert_eq!(table.len(), 111);
        assert_eq!(table.base_rate(110, Gender::Male), 1.0);
        assert_eq!(table.base_rate(110, Gender::Female), 1.0);
        assert_eq!(table.base_rate(65, Gender::Male), 0.0098);
        assert_eq!(table.base_rate(65, Gender::Female), 0.0064);
    }

    #[test]
    fn test_base_rate_past_table() {
        let table = MortalityTable::builtin();
        assert_eq!(table.base_rate(111, Gender::Male), 1.0);
        assert_eq!(table.base_rate(115, Gender::Female), 1.0);
        assert_eq!(table.base_rate(200, Gender::Female), 1.0);
    }

    #[test]
    fn test_effective_age() {
        assert_eq!(effective_age(65, HealthStatus::Excellent), 62);
        assert_eq!(effective_age(2, HealthStatus::Excellent), 0);
        assert_eq!(effective_age(65, HealthStatus::Poor), 70);
        assert_eq!(effective_age(112, HealthStatus::Poor), 115);
        for age in 0..=115 {
            assert_eq!(effective_age(age, HealthStatus::Normal), age);
        }
    }

    #[test]
    fn test_effective_age_follows_health_shift() {
        for health in [HealthStatus::Excellent, HealthStatus::Normal, HealthStatus::Poor] {
            for age in 10..=100 {
                let expected = (age as i32 + health.age_shift()) as u32;
                assert_eq!(effective_age(age, health), expected);
            }
        }
    }

    #[test]
    fn test_survival_same_age_is_certain() {
        let table = MortalityTable::builtin();
        for age in [0, 30, 65, 110, 115, 120] {
            for health in [HealthStatus::Excellent, HealthStatus::Normal, HealthStatus::Poor] {
                assert_eq!(table.survival_probability(age, age, Gender::Male, health), 1.0);
            }
        }
        // Backward-looking requests are also certain
        assert_eq!(table.survival_probability(70, 65, Gender::Female, HealthStatus::Poor), 1.0);
    }

    #[test]
    fn test_survival_one_year() {
        let table = MortalityTable::builtin();
        let p = table.survival_probability(65, 66, Gender::Male, HealthStatus::Normal);
        assert_abs_diff_eq!(p, 1.0 - 0.0098, epsilon = 1e-12);

        // Excellent health reads the age 62 row
        let p = table.survival_probability(65, 66, Gender::Male, HealthStatus::Excellent);
        assert_abs_diff_eq!(p, 1.0 - 0.0074, epsilon = 1e-12);
    }

    #[test]
    fn test_survival_to_82() {
        let table = MortalityTable::builtin();
        let p = table.survival_probability(65, 82, Gender::Male, HealthStatus::Normal);
        assert_abs_diff_eq!(p, 0.65735, epsilon = 1e-4);
    }

    #[test]
    fn test_survival_monotonic() {
        let table = MortalityTable::builtin();
        for gender in [Gender::Male, Gender::Female] {
            for health in [HealthStatus::Excellent, HealthStatus::Normal, HealthStatus::Poor] {
                let mut previous = 1.0;
                for target in 41..=120 {
                    let p = table.survival_probability(40, target, gender, health);
                    assert!(p <= previous, "{:?} {:?} age {}", gender, health, target);
                    assert!((0.0..=1.0).contains(&p));
                    previous = p;
                }
                // Nobody survives the terminal age
                assert_eq!(previous, 0.0);
            }
        }
    }

    #[test]
    fn test_health_ordering() {
        let table = MortalityTable::builtin();
        let excellent = table.survival_probability(60, 85, Gender::Male, HealthStatus::Excellent);
        let normal = table.survival_probability(60, 85, Gender::Male, HealthStatus::Normal);
        let poor = table.survival_probability(60, 85, Gender::Male, HealthStatus::Poor);
        assert!(excellent > normal);
        assert!(normal > poor);
    }

    #[test]
    fn test_life_expectancy() {
        let table = MortalityTable::builtin();
        assert_eq!(table.life_expectancy(65, Gender::Male, HealthStatus::Normal), 85.2);
        assert_eq!(table.life_expectancy(65, Gender::Female, HealthStatus::Normal), 87.8);
        assert_eq!(table.life_expectancy(65, Gender::Male, HealthStatus::Excellent), 87.7);
        assert_eq!(table.life_expectancy(65, Gender::Male, HealthStatus::Poor), 81.3);
        // Certain death within the year at the end of the table
        assert_eq!(table.life_expectancy(110, Gender::Male, HealthStatus::Normal), 110.5);
    }

    #[test]
    fn test_from_rates_validation() {
        let mut rates = vec![(0.01, 0.01); 111];
        rates[110] = (1.0, 1.0);
        assert!(MortalityTable::from_rates(rates.clone()).is_ok());

        let short = rates[..100].to_vec();
        assert!(MortalityTable::from_rates(short).is_err());

        let mut past_end = rates.clone();
        past_end.push((0.0, 0.0));
        assert!(MortalityTable::from_rates(past_end).is_err());

        let mut out_of_range = rates.clone();
        out_of_range[50] = (1.5, 0.01);
        assert!(MortalityTable::from_rates(out_of_range).is_err());

        let mut open_ended = rates;
        open_ended[110] = (0.6, 0.6);
        assert!(MortalityTable::from_rates(open_ended).is_err());
    }

    #[test]
    fn test_builtin_passes_validation() {
        let table = MortalityTable::builtin();
        let rebuilt = MortalityTable::from_rates(MortalityTable::builtin_base_rates()).unwrap();
        assert_eq!(table, rebuilt);
    }
}
