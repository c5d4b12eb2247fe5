use crate::algorithms::Algorithm;
use crate::comparison::{run_comparison, Comparison};
use crate::config::Config;
use crate::error::WorldError;
use crate::statistics::Mean;
use crate::world::WorldGenerator;
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

const CSV_HEADER: &str = "simulation_id,seed,algorithm,grid_size,num_enclosures,num_turfs,success,steps,cost,weighted_cost,reference_cost,efficiency,nodes_expanded,states_reached,max_frontier,elapsed_us";

/// One CSV row: one algorithm on one generated world.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub simulation_id: usize,
    pub seed: u64,
    pub algorithm: Algorithm,
    pub success: bool,
    pub steps: Option<usize>,
    pub cost: Option<f64>,
    pub weighted_cost: Option<f64>,
    pub reference_cost: Option<f64>,
    pub efficiency: Option<f64>,
    pub nodes_expanded: usize,
    pub states_reached: usize,
    pub max_frontier: usize,
    pub elapsed: Duration,
}

impl BatchRow {
    fn from_comparison(simulation_id: usize, seed: u64, comparison: &Comparison) -> Vec<BatchRow> {
        comparison
            .results
            .iter()
            .map(|result| {
                let stats = result.outcome.stats();
                BatchRow {
                    simulation_id,
                    seed,
                    algorithm: result.algorithm,
                    success: result.outcome.is_found(),
                    steps: result.outcome.path().map(|path| path.len() - 1),
                    cost: result.outcome.cost(),
                    weighted_cost: result.weighted_cost,
                    reference_cost: comparison.reference_cost,
                    efficiency: result.efficiency,
                    nodes_expanded: stats.nodes_expanded,
                    states_reached: stats.states_reached,
                    max_frontier: stats.max_frontier,
                    elapsed: result.elapsed,
                }
            })
            .collect()
    }

    /// A placeholder row for a world that could not be generated.
    fn failed(simulation_id: usize, seed: u64, algorithm: Algorithm) -> BatchRow {
        BatchRow {
            simulation_id,
            seed,
            algorithm,
            success: false,
            steps: None,
            cost: None,
            weighted_cost: None,
            reference_cost: None,
            efficiency: None,
            nodes_expanded: 0,
            states_reached: 0,
            max_frontier: 0,
            elapsed: Duration::ZERO,
        }
    }
}

fn csv_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default)]
struct AlgorithmSummary {
    runs: usize,
    successes: usize,
    weighted_cost: Mean,
    efficiency: Mean,
    nodes_expanded: Mean,
    elapsed_us: Mean,
}

/// Runs the selected algorithms over many seeded random worlds and streams
/// the results to CSV.
pub struct BatchRun {
    config: Config,
    algorithms: Vec<Algorithm>,
    pending: Vec<BatchRow>,
    summaries: Vec<(Algorithm, AlgorithmSummary)>,
    start_time: Instant,
    batch_size: usize,
    total_rows_written: usize,
}

impl BatchRun {
    pub fn new(config: Config) -> Self {
        let algorithms = config.selected_algorithms();
        let summaries = algorithms
            .iter()
            .map(|&algorithm| (algorithm, AlgorithmSummary::default()))
            .collect();
        BatchRun {
            config,
            algorithms,
            pending: Vec::new(),
            summaries,
            start_time: Instant::now(),
            batch_size: 100,
            total_rows_written: 0,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn total_rows_written(&self) -> usize {
        self.total_rows_written
    }

    pub fn run(&mut self) -> Result<(), WorldError> {
        self.initialize_csv_file()?;
        if !self.config.quiet {
            println!("=== BATCH RUN STARTED ===");
            println!("Grid size: {}", self.config.grid_size);
            println!(
                "Enclosures: {}, Turfs: {}",
                self.config.num_enclosures, self.config.num_turfs
            );
            println!("Simulations: {}", self.config.num_simulations);
            println!("Timeout: {} seconds", self.config.timeout_seconds);
            println!("Output file: {}", self.config.output_file);
            println!();
        }

        let generator = WorldGenerator::from_config(&self.config);
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        info!("Batch base seed: {} (for reproducibility)", base_seed);
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let mut last_progress_report = Instant::now();
        let progress_interval = Duration::from_secs(10);

        for simulation_id in 0..self.config.num_simulations {
            if self.start_time.elapsed() > timeout {
                warn!("Timeout reached after {} simulations", simulation_id);
                break;
            }

            let seed = base_seed.wrapping_add(simulation_id as u64);
            let rows = match generator.generate(None, seed) {
                Ok(world) => {
                    let searcher = world.searcher()?;
                    let comparison = run_comparison(&searcher, &self.algorithms);
                    BatchRow::from_comparison(simulation_id, seed, &comparison)
                }
                Err(WorldError::Unsolvable { .. }) => {
                    warn!("Simulation {}: no solvable world for seed {}", simulation_id, seed);
                    self.algorithms
                        .iter()
                        .map(|&algorithm| BatchRow::failed(simulation_id, seed, algorithm))
                        .collect()
                }
                Err(e) => return Err(e),
            };

            for row in rows {
                self.record(row);
            }
            if self.pending.len() >= self.batch_size {
                self.flush_results_to_csv()?;
            }

            if last_progress_report.elapsed() > progress_interval {
                let done = simulation_id + 1;
                let percentage = done as f64 / self.config.num_simulations as f64 * 100.0;
                info!(
                    "Progress: {:.1}% ({}/{}) - Elapsed: {:.1}s",
                    percentage,
                    done,
                    self.config.num_simulations,
                    self.start_time.elapsed().as_secs_f64()
                );
                last_progress_report = Instant::now();
            }
        }

        self.flush_results_to_csv()?;

        if !self.config.quiet {
            println!("\n=== BATCH RUN COMPLETED ===");
            println!("Rows written: {}", self.total_rows_written);
            println!("Results saved to: {}", self.config.output_file);
            println!("Total time: {:.2?}", self.start_time.elapsed());
        } else {
            println!(
                "Batch run completed: {} rows in {:.1}s -> {}",
                self.total_rows_written,
                self.start_time.elapsed().as_secs_f64(),
                self.config.output_file
            );
        }
        Ok(())
    }

    fn record(&mut self, row: BatchRow) {
        if let Some((_, summary)) = self.summaries.iter_mut().find(|(a, _)| *a == row.algorithm) {
            summary.runs += 1;
            if row.success {
                summary.successes += 1;
                summary.nodes_expanded.add(row.nodes_expanded as f64);
                summary.elapsed_us.add(row.elapsed.as_secs_f64() * 1e6);
            }
            if let Some(cost) = row.weighted_cost {
                summary.weighted_cost.add(cost);
            }
            if let Some(efficiency) = row.efficiency {
                summary.efficiency.add(efficiency);
            }
        }
        self.pending.push(row);
    }

    fn io_error(&self, source: std::io::Error) -> WorldError {
        WorldError::Io {
            path: Path::new(&self.config.output_file).to_path_buf(),
            source,
        }
    }

    fn initialize_csv_file(&self) -> Result<(), WorldError> {
        let mut file = File::create(&self.config.output_file).map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", CSV_HEADER).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn flush_results_to_csv(&mut self) -> Result<(), WorldError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.config.output_file)
            .map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        for row in &self.pending {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                row.simulation_id,
                row.seed,
                row.algorithm,
                self.config.grid_size,
                self.config.num_enclosures,
                self.config.num_turfs,
                row.success,
                csv_optional(row.steps),
                csv_optional(row.cost),
                csv_optional(row.weighted_cost),
                csv_optional(row.reference_cost),
                csv_optional(row.efficiency.map(|e| format!("{:.6}", e))),
                row.nodes_expanded,
                row.states_reached,
                row.max_frontier,
                row.elapsed.as_micros()
            )
            .map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;

        self.total_rows_written += self.pending.len();
        info!(
            "Flushed {} rows to CSV (total: {})",
            self.pending.len(),
            self.total_rows_written
        );
        self.pending.clear();
        Ok(())
    }

    pub fn print_summary(&self) {
        if self.summaries.iter().all(|(_, summary)| summary.runs == 0) {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SUMMARY ===");
        for (algorithm, summary) in &self.summaries {
            let success_rate = if summary.runs > 0 {
                summary.successes as f64 / summary.runs as f64 * 100.0
            } else {
                0.0
            };
            println!("\n{} Results:", algorithm);
            println!(
                "  Success rate: {}/{} ({:.1}%)",
                summary.successes, summary.runs, success_rate
            );
            if let Some(cost) = summary.weighted_cost.value() {
                println!("  Average weighted cost: {:.2}", cost);
            }
            if let Some(efficiency) = summary.efficiency.value() {
                println!("  Average efficiency: {:.3}", efficiency);
            }
            if let Some(expanded) = summary.nodes_expanded.value() {
                println!("  Average nodes expanded: {:.1}", expanded);
            }
            if let Some(elapsed) = summary.elapsed_us.value() {
                println!("  Average search time: {:.1}µs", elapsed);
            }
        }
    }
}
