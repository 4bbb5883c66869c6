//! CPP Bridge - actuarial engine for the claim-at-65 vs. defer-to-70 decision
//!
//! This library provides:
//! - An age/gender mortality table with health-rated ages, survival
//!   probabilities and life expectancy
//! - Annuity-due pricing and mortality-weighted expected present values
//! - Economic and nominal breakeven ages for deferring the benefit
//! - A bridge scenario evaluator producing a recommendation with rationale
//! - Monthly projections and accumulated-value series for inspection and charting

pub mod error;
pub mod profile;
pub mod assumptions;
pub mod valuation;
pub mod bridge;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::BridgeError;
pub use profile::{Gender, HealthStatus, ScenarioRequest};
pub use assumptions::{Assumptions, BenefitAssumptions, MortalityTable};
pub use bridge::{BridgeEvaluator, Recommendation, ScenarioResult};
pub use projection::{ProjectionEngine, ProjectionResult, ProjectionRow};
pub use scenario::ScenarioRunner;
