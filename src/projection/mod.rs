//! Month-by-month projection of the two claiming strategies

mod engine;
mod cashflows;
mod growth;

pub use engine::{ProjectionEngine, ProjectionConfig};
pub use cashflows::{ProjectionRow, ProjectionResult, ProjectionSummary};
pub use growth::{growth_series, crossover_age, GrowthPoint};
