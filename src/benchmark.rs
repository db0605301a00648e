//! Benchmarking module.
//!
//! Runs the exact and the approximate solver over a set of instances,
//! collects per-run results and aggregates them per algorithm.

use crate::exact::{BruteForceSolver, ExactConfig, PRACTICAL_MAX_VERTICES};
use crate::heuristics::MstApproximation;
use crate::instance::TspInstance;
use crate::report::relative_error;
use crate::solution::Solution;
use crate::solver::TspSolver;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;

/// Result of running a single algorithm on an instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm name
    pub algorithm: String,
    /// Instance name
    pub instance: String,
    /// Number of vertices
    pub dimension: usize,
    /// Tour cost
    pub cost: f64,
    /// Computation time in seconds
    pub time: f64,
    /// Candidate tours evaluated (exact solver only)
    pub iterations: Option<usize>,
    /// Relative error in percent to the best known cost (if available)
    pub gap_to_best: Option<f64>,
}

/// Aggregated statistics for an algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    /// Algorithm name
    pub algorithm: String,
    /// Number of instances solved
    pub num_instances: usize,
    /// Average cost
    pub avg_cost: f64,
    /// Best cost
    pub best_cost: f64,
    /// Worst cost
    pub worst_cost: f64,
    /// Standard deviation of cost
    pub std_cost: f64,
    /// Average time
    pub avg_time: f64,
    /// Total time
    pub total_time: f64,
    /// Average gap to best known
    pub avg_gap: Option<f64>,
    /// Worst gap to best known
    pub max_gap: Option<f64>,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Skip the exact solver above this many vertices
    pub exact_max_size: usize,
    /// Run the exact search on the rayon pool
    pub parallel_exact: bool,
    /// Draw a progress bar while running
    pub show_progress: bool,
    /// Output directory
    pub output_dir: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            exact_max_size: PRACTICAL_MAX_VERTICES,
            parallel_exact: false,
            show_progress: true,
            output_dir: "results".to_string(),
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<AlgorithmResult>,
    best_known: HashMap<String, f64>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            best_known: HashMap::new(),
        }
    }

    /// Set best known solution for an instance
    pub fn set_best_known(&mut self, instance_name: &str, cost: f64) {
        self.best_known.insert(instance_name.to_string(), cost);
    }

    /// Run the exact solver, unless the instance is too large for it.
    ///
    /// Without a reference optimum the exact cost becomes the best known cost.
    pub fn run_exact(&mut self, instance: &TspInstance) -> Option<Solution> {
        if instance.dimension() > self.config.exact_max_size {
            log::info!(
                "Skipping exact solver on {} (n={} > {})",
                instance.name,
                instance.dimension(),
                self.config.exact_max_size
            );
            return None;
        }

        let solver = BruteForceSolver::with_config(ExactConfig {
            parallel: self.config.parallel_exact,
        });

        match solver.solve(&instance.matrix) {
            Ok(solution) => {
                self.best_known
                    .entry(instance.name.clone())
                    .or_insert(solution.cost);
                self.record_result(instance, &solution);
                Some(solution)
            }
            Err(e) => {
                log::error!("Exact solver failed on {}: {}", instance.name, e);
                None
            }
        }
    }

    /// Run the MST approximation
    pub fn run_approximation(&mut self, instance: &TspInstance) -> Option<Solution> {
        match MstApproximation::new().solve(&instance.matrix) {
            Ok(solution) => {
                self.record_result(instance, &solution);
                Some(solution)
            }
            Err(e) => {
                log::error!("MST approximation failed on {}: {}", instance.name, e);
                None
            }
        }
    }

    /// Run full benchmark on an instance
    pub fn run_full_benchmark(&mut self, instance: &TspInstance) {
        log::info!("Running benchmark on instance: {}", instance.name);

        if let Some(reference) = instance.reference_optimum {
            self.set_best_known(&instance.name, reference);
        }

        self.run_exact(instance);
        self.run_approximation(instance);
    }

    /// Run benchmark on multiple instances
    pub fn run_on_instances(&mut self, instances: &[TspInstance]) {
        let progress = if self.config.show_progress {
            ProgressBar::new(instances.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            progress.set_style(style);
        }

        for instance in instances {
            progress.set_message(format!("{} (n={})", instance.name, instance.dimension()));
            self.run_full_benchmark(instance);
            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    /// Record a result
    fn record_result(&mut self, instance: &TspInstance, solution: &Solution) {
        let gap_to_best = self
            .best_known
            .get(&instance.name)
            .and_then(|&best| relative_error(solution.cost, best));

        self.results.push(AlgorithmResult {
            algorithm: solution.algorithm.clone(),
            instance: instance.name.clone(),
            dimension: instance.dimension(),
            cost: solution.cost,
            time: solution.computation_time,
            iterations: solution.iterations,
            gap_to_best,
        });
    }

    /// Compute statistics for each algorithm, ordered by algorithm name
    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut by_algorithm: BTreeMap<&str, Vec<&AlgorithmResult>> = BTreeMap::new();
        for result in &self.results {
            by_algorithm
                .entry(result.algorithm.as_str())
                .or_default()
                .push(result);
        }

        by_algorithm
            .into_iter()
            .map(|(algo, results)| {
                let costs: Vec<f64> = results.iter().map(|r| r.cost).collect();
                let times: Vec<f64> = results.iter().map(|r| r.time).collect();
                let gaps: Vec<f64> = results.iter().filter_map(|r| r.gap_to_best).collect();

                let (avg_gap, max_gap) = if gaps.is_empty() {
                    (None, None)
                } else {
                    (
                        Some(gaps.iter().mean()),
                        Some(gaps.iter().cloned().fold(f64::NEG_INFINITY, f64::max)),
                    )
                };

                AlgorithmStatistics {
                    algorithm: algo.to_string(),
                    num_instances: results.len(),
                    avg_cost: costs.iter().mean(),
                    best_cost: costs.iter().cloned().fold(f64::INFINITY, f64::min),
                    worst_cost: costs.iter().cloned().fold(0.0, f64::max),
                    std_cost: costs.iter().population_std_dev(),
                    avg_time: times.iter().mean(),
                    total_time: times.iter().sum::<f64>(),
                    avg_gap,
                    max_gap,
                }
            })
            .collect()
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> csv::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> csv::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer.serialize(stat)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("          TSP Benchmark Report\n");
        report.push_str("========================================\n");
        report.push_str(&format!(
            "Generated: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        report.push_str("Algorithm Performance Summary:\n");
        report.push_str("-".repeat(80).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<22} {:>9} {:>12} {:>12} {:>10} {:>10}\n",
            "Algorithm", "Instances", "Avg Cost", "Best Cost", "Avg Gap%", "Avg Time"
        ));
        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        for stat in self.compute_statistics() {
            let gap_str = stat
                .avg_gap
                .map(|g| format!("{:.2}%", g))
                .unwrap_or_else(|| "-".to_string());

            report.push_str(&format!(
                "{:<22} {:>9} {:>12.2} {:>12.2} {:>10} {:>10.4}\n",
                stat.algorithm, stat.num_instances, stat.avg_cost, stat.best_cost, gap_str, stat.avg_time
            ));
        }

        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        report.push_str("\nPer Instance:\n");
        for result in &self.results {
            let gap_str = result
                .gap_to_best
                .map(|g| format!("{:+.2}%", g))
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "  {} (n={}): {:.2} [{}] gap {}\n",
                result.instance, result.dimension, result.cost, result.algorithm, gap_str
            ));
        }

        report
    }

    /// Get all results
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Get best known values
    pub fn best_known(&self) -> &HashMap<String, f64> {
        &self.best_known
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }
}

/// Helper function to load instances from a directory
pub fn load_instances_from_dir<P: AsRef<Path>>(dir: P) -> Vec<TspInstance> {
    let mut instances = Vec::new();

    match std::fs::read_dir(dir.as_ref()) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map(|e| e == "txt").unwrap_or(false) {
                    match TspInstance::from_file(&path) {
                        Ok(instance) => instances.push(instance),
                        Err(e) => log::warn!("Skipping {:?}: {}", path, e),
                    }
                }
            }
        }
        Err(e) => log::error!("Cannot read directory {:?}: {}", dir.as_ref(), e),
    }

    // Sort by dimension, then name
    instances.sort_by(|a, b| {
        a.dimension()
            .cmp(&b.dimension())
            .then_with(|| a.name.cmp(&b.name))
    });

    instances
}
