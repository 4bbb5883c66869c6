//! Retiree profile and scenario request structures

mod data;

pub use data::{Gender, HealthStatus, ScenarioRequest, MAX_REQUEST_AGE};
