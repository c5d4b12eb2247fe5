use crate::algorithms::{Algorithm, SearchOutcome};
use crate::grid::{Action, Position};
use crate::searcher::Searcher;
use crate::statistics::route_efficiency;
use log::info;
use pathfinding::prelude::dijkstra;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    pub outcome: SearchOutcome,
    /// Turf-aware cost of the returned path, so BFS/DFS compare on the same scale.
    pub weighted_cost: Option<f64>,
    /// `weighted_cost / reference cost`; 1.0 is optimal.
    pub efficiency: Option<f64>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    /// Optimal turf-aware cost from an independent solver, if a path exists.
    pub reference_cost: Option<f64>,
    pub results: Vec<AlgorithmResult>,
}

impl Comparison {
    pub fn result(&self, algorithm: Algorithm) -> Option<&AlgorithmResult> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }
}

/// Optimal turf-aware path computed with the `pathfinding` crate's Dijkstra.
///
/// Costs are scaled to half-units so they stay integral.
pub fn reference_optimum(searcher: &Searcher) -> Option<(Vec<Position>, f64)> {
    let result = dijkstra(
        &searcher.initial(),
        |&state| {
            Action::ALL
                .into_iter()
                .filter_map(|action| {
                    let next = searcher.result(state, action)?;
                    if searcher.enclosure_collision(next) {
                        return None;
                    }
                    let half_units = (searcher.action_cost(state, action, next) * 2.0).round() as u32;
                    Some((next, half_units))
                })
                .collect::<Vec<_>>()
        },
        |&state| searcher.is_goal(state),
    );

    result.map(|(path, half_units)| (path, f64::from(half_units) / 2.0))
}

/// Runs each algorithm once on the same searcher.
pub fn run_comparison(searcher: &Searcher, algorithms: &[Algorithm]) -> Comparison {
    let reference_cost = reference_optimum(searcher).map(|(_, cost)| cost);

    let results = algorithms
        .iter()
        .map(|&algorithm| {
            let runner = algorithm.runner();
            let started = Instant::now();
            let outcome = runner.search(searcher);
            let elapsed = started.elapsed();

            let weighted_cost = outcome.path().and_then(|path| searcher.evaluate_path(path));
            let efficiency = weighted_cost
                .zip(reference_cost)
                .map(|(cost, optimal)| route_efficiency(cost, optimal));

            info!(
                "{}: found={} expanded={} in {:.2?}",
                runner.name(),
                outcome.is_found(),
                outcome.stats().nodes_expanded,
                elapsed
            );

            AlgorithmResult {
                algorithm,
                outcome,
                weighted_cost,
                efficiency,
                elapsed,
            }
        })
        .collect();

    Comparison {
        reference_cost,
        results,
    }
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

/// Prints comparison results in a table.
pub fn print_comparison_results(comparison: &Comparison, show_path: bool) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    match comparison.reference_cost {
        Some(cost) => println!("Reference optimal cost (Dijkstra): {:.1}", cost),
        None => println!("Reference solver found no path"),
    }
    println!();

    println!(
        "{:<18} {:<8} {:<8} {:<10} {:<10} {:<10} {:<10} {:<10} {:<12}",
        "Algorithm", "Found", "Steps", "Cost", "Weighted", "Efficiency", "Expanded", "Reached", "Time"
    );
    println!("{}", "-".repeat(100));

    for result in &comparison.results {
        let stats = result.outcome.stats();
        let found_str = if result.outcome.is_found() { "✓" } else { "✗" };
        let steps_str = result
            .outcome
            .path()
            .map_or_else(|| "-".to_string(), |path| (path.len() - 1).to_string());

        println!(
            "{:<18} {:<8} {:<8} {:<10} {:<10} {:<10} {:<10} {:<10} {:<12}",
            result.algorithm.to_string(),
            found_str,
            steps_str,
            format_optional(result.outcome.cost(), 1),
            format_optional(result.weighted_cost, 1),
            format_optional(result.efficiency, 3),
            stats.nodes_expanded,
            stats.states_reached,
            format!("{:.2?}", result.elapsed),
        );
    }

    if show_path {
        println!();
        for result in &comparison.results {
            if let Some(path) = result.outcome.path() {
                let rendered: Vec<String> = path.iter().map(ToString::to_string).collect();
                println!("{}: {}", result.algorithm, rendered.join(" -> "));
            }
        }
    }

    let found: Vec<_> = comparison
        .results
        .iter()
        .filter(|r| r.weighted_cost.is_some())
        .collect();
    if found.is_empty() {
        println!("\nNo algorithm reached the destination.");
        return;
    }

    println!("\n=== PERFORMANCE ANALYSIS ===");
    let cheapest = found.iter().min_by(|a, b| {
        let a = a.weighted_cost.unwrap_or(f64::INFINITY);
        let b = b.weighted_cost.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    if let Some(cheapest) = cheapest {
        println!(
            "Cheapest path: {} ({:.1})",
            cheapest.algorithm,
            cheapest.weighted_cost.unwrap_or_default()
        );
    }
    if let Some(leanest) = found.iter().min_by_key(|r| r.outcome.stats().nodes_expanded) {
        println!(
            "Fewest expansions: {} ({})",
            leanest.algorithm,
            leanest.outcome.stats().nodes_expanded
        );
    }
    if let Some(fastest) = found.iter().min_by_key(|r| r.elapsed) {
        println!("Fastest: {} ({:.2?})", fastest.algorithm, fastest.elapsed);
    }
}
