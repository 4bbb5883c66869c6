//! Retiree profile and scenario request structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BridgeError, Result};

/// Oldest current age accepted on a request (last age in the mortality table)
pub const MAX_REQUEST_AGE: u32 = 110;

fn default_real_rate_of_return() -> f64 {
    0.01
}

fn default_wage_growth() -> f64 {
    0.011
}

fn default_true() -> bool {
    true
}

/// Gender of the retiree, selects the mortality column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Self-reported health, applied as a fixed shift of the mortality age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Rated 3 years younger
    Excellent,
    #[default]
    #[serde(alias = "average")]
    Normal,
    /// Rated 5 years older
    Poor,
}

impl HealthStatus {
    /// Signed shift applied to the attained age before table lookup
    pub fn age_shift(&self) -> i32 {
        match self {
            HealthStatus::Excellent => -3,
            HealthStatus::Normal => 0,
            HealthStatus::Poor => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Normal => "normal",
            HealthStatus::Poor => "poor",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bridge scenario to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Current age in whole years
    pub current_age: u32,

    /// Monthly CPP benefit if taken at 65
    pub cpp_estimate_at_65: f64,

    /// Liquid savings available to fund the bridge
    pub rrsp_savings: f64,

    #[serde(default)]
    pub health_status: HealthStatus,

    /// Annual real rate of return (decimal)
    #[serde(default = "default_real_rate_of_return")]
    pub real_rate_of_return: f64,

    /// Annual wage growth used to index the deferred benefit (decimal)
    #[serde(default = "default_wage_growth")]
    pub wage_growth: f64,

    /// If false, EPVs are conditioned on surviving to 65
    #[serde(default = "default_true")]
    pub discount_pre_retirement_mortality: bool,

    #[serde(default)]
    pub gender: Gender,
}

impl ScenarioRequest {
    /// Create a request with the default economic assumptions
    pub fn new(current_age: u32, cpp_estimate_at_65: f64, rrsp_savings: f64) -> Self {
        Self {
            current_age,
            cpp_estimate_at_65,
            rrsp_savings,
            health_status: HealthStatus::default(),
            real_rate_of_return: default_real_rate_of_return(),
            wage_growth: default_wage_growth(),
            discount_pre_retirement_mortality: true,
            gender: Gender::default(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_health(mut self, health_status: HealthStatus) -> Self {
        self.health_status = health_status;
        self
    }

    /// Set the real rate of return and wage growth
    pub fn with_rates(mut self, real_rate_of_return: f64, wage_growth: f64) -> Self {
        self.real_rate_of_return = real_rate_of_return;
        self.wage_growth = wage_growth;
        self
    }

    pub fn with_pre_retirement_discount(mut self, discount: bool) -> Self {
        self.discount_pre_retirement_mortality = discount;
        self
    }

    /// Reject requests that would otherwise produce NaN or infinite results
    pub fn validate(&self) -> Result<()> {
        if self.current_age > MAX_REQUEST_AGE {
            return Err(BridgeError::invalid(
                "current_age",
                format!("must be at most {}", MAX_REQUEST_AGE),
            ));
        }

        if !self.cpp_estimate_at_65.is_finite() || self.cpp_estimate_at_65 <= 0.0 {
            return Err(BridgeError::invalid(
                "cpp_estimate_at_65",
                "must be a finite amount greater than zero",
            ));
        }

        if !self.rrsp_savings.is_finite() || self.rrsp_savings < 0.0 {
            return Err(BridgeError::invalid(
                "rrsp_savings",
                "must be a finite, non-negative amount",
            ));
        }

        check_rate("real_rate_of_return", self.real_rate_of_return)?;
        check_rate("wage_growth", self.wage_growth)?;

        Ok(())
    }
}

/// Annual rates must be finite and above -100%
fn check_rate(field: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(BridgeError::invalid(
            field,
            "must be a finite rate greater than -1.0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_defaults() {
        let json = r#"{"current_age": 60, "cpp_estimate_at_65": 1000, "rrsp_savings": 50000}"#;
        let req: ScenarioRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.gender, Gender::Male);
        assert_eq!(req.health_status, HealthStatus::Normal);
        assert_eq!(req.real_rate_of_return, 0.01);
        assert_eq!(req.wage_growth, 0.011);
        assert!(req.discount_pre_retirement_mortality);
        assert_eq!(req, ScenarioRequest::new(60, 1000.0, 50000.0));
    }

    #[test]
    fn test_average_is_normal_health() {
        let health: HealthStatus = serde_json::from_str(r#""average""#).unwrap();
        assert_eq!(health, HealthStatus::Normal);

        // Serializes back under the canonical name
        assert_eq!(serde_json::to_string(&health).unwrap(), r#""normal""#);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let json = r#"{"current_age": 60, "cpp_estimate_at_65": 1000, "rrsp_savings": 0, "gender": "other"}"#;
        assert!(serde_json::from_str::<ScenarioRequest>(json).is_err());
    }

    #[test]
    fn test_negative_age_rejected_at_parse() {
        let json = r#"{"current_age": -1, "cpp_estimate_at_65": 1000, "rrsp_savings": 0}"#;
        assert!(serde_json::from_str::<ScenarioRequest>(json).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ScenarioRequest::new(65, 1000.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_names_offending_field() {
        let cases = [
            (ScenarioRequest::new(111, 1000.0, 0.0), "current_age"),
            (ScenarioRequest::new(65, 0.0, 0.0), "cpp_estimate_at_65"),
            (ScenarioRequest::new(65, f64::NAN, 0.0), "cpp_estimate_at_65"),
            (ScenarioRequest::new(65, 1000.0, -1.0), "rrsp_savings"),
            (ScenarioRequest::new(65, 1000.0, f64::INFINITY), "rrsp_savings"),
            (
                ScenarioRequest::new(65, 1000.0, 0.0).with_rates(f64::NAN, 0.0),
                "real_rate_of_return",
            ),
            (
                ScenarioRequest::new(65, 1000.0, 0.0).with_rates(0.03, -1.0),
                "wage_growth",
            ),
        ];

        for (req, field) in cases {
            let err = req.validate().unwrap_err();
            assert_eq!(err.field(), Some(field), "{:?}", req);
        }
    }

    #[test]
    fn test_health_age_shift() {
        assert_eq!(HealthStatus::Excellent.age_shift(), -3);
        assert_eq!(HealthStatus::Normal.age_shift(), 0);
        assert_eq!(HealthStatus::Poor.age_shift(), 5);
        assert_eq!(HealthStatus::Poor.to_string(), "poor");
    }
}
