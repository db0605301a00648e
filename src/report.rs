//! Human-readable and JSON reporting of a single solver run.

use crate::instance::TspInstance;
use crate::solution::Solution;
use serde::{Deserialize, Serialize};

/// Outcome of one solver run on one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub instance: String,
    pub algorithm: String,
    pub vertices: usize,
    pub tour: Vec<usize>,
    pub cost: f64,
    /// Expected optimum taken from the instance file name
    pub reference_optimum: Option<f64>,
    /// `(cost - reference) / reference * 100`
    pub relative_error: Option<f64>,
    /// Wall-clock time in seconds
    pub elapsed: f64,
    pub iterations: Option<usize>,
}

impl SolveReport {
    pub fn new(instance: &TspInstance, solution: &Solution, elapsed: f64) -> Self {
        SolveReport {
            instance: instance.name.clone(),
            algorithm: solution.algorithm.clone(),
            vertices: instance.dimension(),
            tour: solution.tour.clone(),
            cost: solution.cost,
            reference_optimum: instance.reference_optimum,
            relative_error: instance
                .reference_optimum
                .and_then(|reference| relative_error(solution.cost, reference)),
            elapsed,
            iterations: solution.iterations,
        }
    }
}

/// Percentage by which `cost` exceeds `reference`.
///
/// `None` for a zero reference, which carries no scale.
pub fn relative_error(cost: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 {
        None
    } else {
        Some((cost - reference) / reference * 100.0)
    }
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "========== Results ==========")?;
        writeln!(f, "Instance: {} ({} vertices)", self.instance, self.vertices)?;
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Tour: {:?}", self.tour)?;
        writeln!(f, "Cost: {:.2}", self.cost)?;
        if let Some(reference) = self.reference_optimum {
            writeln!(f, "Expected optimum: {:.2}", reference)?;
        }
        if let Some(error) = self.relative_error {
            writeln!(f, "Relative error: {:.2}%", error)?;
        }
        if let Some(iter) = self.iterations {
            writeln!(f, "Tours evaluated: {}", iter)?;
        }
        write!(f, "Time: {:.8}s", self.elapsed)
    }
}
