//! Scenario runner for single and batch evaluations
//!
//! Loads assumptions once, then evaluates any number of requests against
//! them without re-reading CSV files.

use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::bridge::{BridgeEvaluator, ScenarioResult};
use crate::error::Result;
use crate::profile::ScenarioRequest;
use crate::projection::{GrowthPoint, ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for savings in [50_000.0, 100_000.0, 150_000.0] {
///     let request = ScenarioRequest::new(60, 1000.0, savings);
///     let result = runner.evaluate(&request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the embedded mortality table
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::default_pricing(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Evaluate a single request
    pub fn evaluate(&self, request: &ScenarioRequest) -> Result<ScenarioResult> {
        BridgeEvaluator::new(&self.assumptions).evaluate(request)
    }

    /// Evaluate independent requests in parallel
    ///
    /// Results are returned in request order; an invalid request fails on its
    /// own without affecting the others.
    pub fn evaluate_batch(&self, requests: &[ScenarioRequest]) -> Vec<Result<ScenarioResult>> {
        let evaluator = BridgeEvaluator::new(&self.assumptions);
        requests
            .par_iter()
            .map(|request| evaluator.evaluate(request))
            .collect()
    }

    /// Monthly projection of both streams for a request
    pub fn project(&self, request: &ScenarioRequest) -> Result<ProjectionResult> {
        ProjectionEngine::new(&self.assumptions, ProjectionConfig::default()).project(request)
    }

    /// Accumulated-value series of both streams for a request
    pub fn growth(&self, request: &ScenarioRequest) -> Result<Vec<GrowthPoint>> {
        ProjectionEngine::new(&self.assumptions, ProjectionConfig::default()).growth(request)
    }

    /// Get reference to the loaded assumptions
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
