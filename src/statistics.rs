use std::fmt;

/// Counters collected during a single search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub nodes_expanded: usize,
    /// Distinct states discovered, including the initial state.
    pub states_reached: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

impl SearchStats {
    pub fn observe_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes expanded: {}", self.nodes_expanded)?;
        writeln!(f, "States reached: {}", self.states_reached)?;
        writeln!(f, "Peak frontier size: {}", self.max_frontier)?;
        Ok(())
    }
}

/// How far a path's cost is from the best known cost. 1.0 is optimal.
pub fn route_efficiency(cost: f64, optimal_cost: f64) -> f64 {
    if optimal_cost > 0.0 {
        cost / optimal_cost
    } else if cost == 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Running mean, used by the batch summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean {
    total: f64,
    count: usize,
}

impl Mean {
    pub fn add(&mut self, sample: f64) {
        self.total += sample;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}
