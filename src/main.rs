//! TSP Solver - Command Line Interface
//!
//! Solves symmetric TSP instances given as distance matrix files, exactly or
//! with the MST approximation, and compares the two.

use clap::{Parser, Subcommand, ValueEnum};
use tsp_solver::benchmark::{load_instances_from_dir, Benchmark, BenchmarkConfig};
use tsp_solver::exact::{BruteForceSolver, ExactConfig, PRACTICAL_MAX_VERTICES};
use tsp_solver::heuristics::MstApproximation;
use tsp_solver::instance::{random_euclidean, write_matrix_file, TspInstance};
use tsp_solver::report::SolveReport;
use tsp_solver::solution::Solution;
use tsp_solver::solver::TspSolver;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Generated instances up to this size get their optimum in the file name.
const GENERATE_SOLVE_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "tsp-solver")]
#[command(version = "1.0")]
#[command(about = "Exact and MST-approximate solvers for the symmetric TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one instance
    Solve {
        /// Path to the matrix file; prompts for a file name when omitted
        #[arg(short, long)]
        instance: Option<PathBuf>,

        /// Directory the prompted file name is resolved in
        #[arg(long, default_value = "instancias")]
        instances_dir: PathBuf,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "exact")]
        algorithm: Algorithm,

        /// Search the exact solver's partitions in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Write the report as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run both solvers on one instance and compare them
    Compare {
        /// Path to the matrix file
        #[arg(short, long)]
        instance: PathBuf,

        /// Search the exact solver's partitions in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// Run benchmarks on a directory of instances
    Benchmark {
        /// Directory containing `.txt` matrix files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Largest instance handed to the exact solver
        #[arg(long, default_value_t = PRACTICAL_MAX_VERTICES)]
        exact_max_size: usize,

        /// Search the exact solver's partitions in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// Analyze an instance
    Analyze {
        /// Path to the matrix file
        #[arg(short, long)]
        instance: PathBuf,
    },

    /// Generate a random Euclidean instance with integral weights
    Generate {
        /// Number of vertices
        #[arg(short = 'n', long)]
        size: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output directory
        #[arg(short, long, default_value = "instancias")]
        dir: PathBuf,

        /// File name prefix
        #[arg(long, default_value = "random")]
        prefix: String,

        /// Side length of the square the points are drawn from
        #[arg(long, default_value = "1000.0")]
        scale: f64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Exhaustive search (exact, O(n!))
    Exact,
    /// Minimum spanning tree preorder (2-approximation on metric instances)
    Approx,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { instance, instances_dir, algorithm, parallel, output, verbose } => {
            let path = match instance {
                Some(path) => path,
                None => prompt_instance_path(&instances_dir),
            };
            solve_instance(&path, algorithm, parallel, output, verbose);
        }

        Commands::Compare { instance, parallel } => {
            compare_solvers(&instance, parallel);
        }

        Commands::Benchmark { dir, output, exact_max_size, parallel } => {
            run_benchmark(&dir, &output, exact_max_size, parallel);
        }

        Commands::Analyze { instance } => {
            analyze_instance(&instance);
        }

        Commands::Generate { size, seed, dir, prefix, scale } => {
            generate_instance(size, seed, &dir, &prefix, scale);
        }
    }
}

fn exit_with(message: String) -> ! {
    log::error!("{}", message);
    std::process::exit(1);
}

fn prompt_instance_path(dir: &Path) -> PathBuf {
    print!("Enter the TSP instance file name (e.g. five_d_19.txt): ");
    let mut line = String::new();
    let read = io::stdout()
        .flush()
        .and_then(|_| io::stdin().read_line(&mut line));
    if let Err(e) = read {
        exit_with(format!("Cannot read file name: {}", e));
    }
    dir.join(line.trim())
}

fn load_instance(path: &Path) -> TspInstance {
    match TspInstance::from_file(path) {
        Ok(instance) => instance,
        Err(e) => exit_with(format!("Error loading instance: {}", e)),
    }
}

fn exact_solver(parallel: bool) -> BruteForceSolver {
    BruteForceSolver::with_config(ExactConfig { parallel })
}

fn warn_if_too_large(instance: &TspInstance) {
    if instance.dimension() > PRACTICAL_MAX_VERTICES {
        log::warn!(
            "{} vertices: exhaustive search over {}! tours will take very long",
            instance.dimension(),
            instance.dimension() - 1
        );
    }
}

fn run_solver(solver: &dyn TspSolver, instance: &TspInstance) -> (Solution, f64) {
    let start = Instant::now();
    match solver.solve(&instance.matrix) {
        Ok(solution) => (solution, start.elapsed().as_secs_f64()),
        Err(e) => exit_with(format!("{} failed: {}", solver.name(), e)),
    }
}

fn solve_instance(
    path: &Path,
    algorithm: Algorithm,
    parallel: bool,
    output: Option<PathBuf>,
    verbose: bool,
) {
    println!("Loading instance from {:?}...", path);
    let instance = load_instance(path);

    println!("Vertices: {}", instance.dimension());
    match instance.reference_optimum {
        Some(opt) => println!("Expected optimum (from file name): {:.2}", opt),
        None => println!("Expected optimum (from file name): unknown"),
    }

    if verbose {
        println!("\n{}", instance.statistics());
    }

    let solver: Box<dyn TspSolver> = match algorithm {
        Algorithm::Exact => {
            warn_if_too_large(&instance);
            Box::new(exact_solver(parallel))
        }
        Algorithm::Approx => Box::new(MstApproximation::new()),
    };

    println!("\nSolving with {}...", solver.name());
    let (solution, elapsed) = run_solver(solver.as_ref(), &instance);

    let report = SolveReport::new(&instance, &solution, elapsed);
    println!("\n{}", report);

    if let Some(out_path) = output {
        let json = match serde_json::to_string_pretty(&report) {
            Ok(json) => json,
            Err(e) => exit_with(format!("Cannot serialize report: {}", e)),
        };
        if let Err(e) = std::fs::write(&out_path, json) {
            exit_with(format!("Failed to write {:?}: {}", out_path, e));
        }
        println!("\nReport saved to {:?}", out_path);
    }
}

fn compare_solvers(path: &Path, parallel: bool) {
    let instance = load_instance(path);
    println!("Comparing solvers on {} (n={})...\n", instance.name, instance.dimension());
    warn_if_too_large(&instance);

    let (exact, exact_time) = run_solver(&exact_solver(parallel), &instance);
    let (approx, approx_time) = run_solver(&MstApproximation::new(), &instance);

    println!("{}\n", SolveReport::new(&instance, &exact, exact_time));
    println!("{}\n", SolveReport::new(&instance, &approx, approx_time));

    println!("========== Summary ==========");
    println!("{:<20} {:>12} {:>14}", "Algorithm", "Cost", "Time (s)");
    println!("{}", "-".repeat(48));
    println!("{:<20} {:>12.2} {:>14.8}", exact.algorithm, exact.cost, exact_time);
    println!("{:<20} {:>12.2} {:>14.8}", approx.algorithm, approx.cost, approx_time);
    if exact.cost > 0.0 {
        println!("\nApproximation ratio: {:.4}", approx.cost / exact.cost);
    }
}

fn run_benchmark(dir: &Path, output: &Path, exact_max_size: usize, parallel: bool) {
    println!("Loading instances from {:?}...", dir);

    let instances = load_instances_from_dir(dir);
    println!("Found {} instances", instances.len());

    if instances.is_empty() {
        log::error!("No instances found!");
        return;
    }

    if let Err(e) = std::fs::create_dir_all(output) {
        exit_with(format!("Failed to create output directory: {}", e));
    }

    let config = BenchmarkConfig {
        exact_max_size,
        parallel_exact: parallel,
        output_dir: output.to_string_lossy().to_string(),
        ..Default::default()
    };

    let mut benchmark = Benchmark::new(config);
    benchmark.run_on_instances(&instances);

    let results_path = output.join("results.csv");
    match benchmark.export_to_csv(&results_path) {
        Ok(()) => println!("\nResults exported to {:?}", results_path),
        Err(e) => log::error!("Failed to export results: {}", e),
    }

    let stats_path = output.join("statistics.csv");
    match benchmark.export_statistics_csv(&stats_path) {
        Ok(()) => println!("Statistics exported to {:?}", stats_path),
        Err(e) => log::error!("Failed to export statistics: {}", e),
    }

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    match std::fs::write(&report_path, &report) {
        Ok(()) => println!("Report saved to {:?}", report_path),
        Err(e) => log::error!("Failed to save report: {}", e),
    }
}

fn analyze_instance(path: &Path) {
    let instance = load_instance(path);

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    if let Some((i, j, k)) = instance.matrix.triangle_violation(1e-9) {
        println!(
            "Triangle inequality violated: w({},{}) = {:.2} > w({},{}) + w({},{}) = {:.2}",
            i,
            k,
            instance.matrix.distance(i, k),
            i,
            j,
            j,
            k,
            instance.matrix.distance(i, j) + instance.matrix.distance(j, k)
        );
        println!("The MST approximation carries no 2x guarantee on this instance.");
    }

    if instance.dimension() > PRACTICAL_MAX_VERTICES {
        println!(
            "\nExact search would enumerate {}! tours; consider `solve --algorithm approx`.",
            instance.dimension().saturating_sub(1)
        );
    }
}

fn generate_instance(size: usize, seed: u64, dir: &Path, prefix: &str, scale: f64) {
    if size == 0 {
        exit_with("Instance size must be at least 1".to_string());
    }

    let matrix = random_euclidean(size, seed, scale, true);

    let file_name = if size <= GENERATE_SOLVE_LIMIT {
        match BruteForceSolver::parallel().solve(&matrix) {
            Ok(solution) => format!("{}{}_{}.txt", prefix, size, solution.cost.round() as u64),
            Err(e) => exit_with(format!("Cannot solve generated instance: {}", e)),
        }
    } else {
        format!("{}{}.txt", prefix, size)
    };

    if let Err(e) = std::fs::create_dir_all(dir) {
        exit_with(format!("Failed to create {:?}: {}", dir, e));
    }

    let path = dir.join(file_name);
    match write_matrix_file(&matrix, &path) {
        Ok(()) => println!("Instance with {} vertices saved to {:?}", size, path),
        Err(e) => exit_with(format!("Failed to write {:?}: {}", path, e)),
    }
}
