//! CPP bridge scenario evaluation
//!
//! Answers one question for a retiree: should the CPP benefit be claimed at
//! 65, or deferred to 70 with savings "bridging" the five-year gap?
//!
//! # Steps
//!
//! 1. Derive the deferred benefit (delay factor and wage indexing)
//! 2. Price the bridge as a 60-month annuity-due at 65, discounted to today
//! 3. Compare against savings (shortfall / surplus and the surplus left at 85)
//! 4. Find the economic breakeven age and the probability of reaching it
//! 5. Value both strategies as mortality-weighted EPVs
//!
//! # Example
//!
//! ```rust,ignore
//! use cpp_bridge::{Assumptions, BridgeEvaluator, ScenarioRequest};
//!
//! let assumptions = Assumptions::default_pricing();
//! let request = ScenarioRequest::new(60, 1000.0, 150_000.0).with_rates(0.03, 0.011);
//! let result = BridgeEvaluator::new(&assumptions).evaluate(&request)?;
//! println!("{}: {}", result.recommendation, result.recommendation_reasoning);
//! ```

mod evaluator;
mod result;

pub use evaluator::BridgeEvaluator;
pub use result::{Recommendation, ScenarioResult};
