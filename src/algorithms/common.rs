use crate::algorithms::{AStar, BreadthFirst, DepthFirst, GreedyBestFirst, UniformCost};
use crate::grid::Position;
use crate::node::Node;
use crate::searcher::Searcher;
use crate::statistics::SearchStats;
use std::fmt;

pub trait SearchAlgorithm {
    fn name(&self) -> &'static str;

    /// Runs the search to completion. Never fails: an exhausted frontier is
    /// reported as [`SearchOutcome::Exhausted`].
    fn search(&self, searcher: &Searcher) -> SearchOutcome;
}

/// A path from the initial state to the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub path: Vec<Position>,
    /// Sum of the action costs along `path`, on the algorithm's own cost model.
    pub cost: f64,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Solution),
    /// The frontier emptied without reaching the destination.
    Exhausted { stats: SearchStats },
}

impl SearchOutcome {
    pub(crate) fn found(goal: &Node, stats: SearchStats) -> Self {
        SearchOutcome::Found(Solution {
            path: goal.reconstruct_path(),
            cost: goal.path_cost(),
            stats,
        })
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&[Position]> {
        self.solution().map(|solution| solution.path.as_slice())
    }

    pub fn cost(&self) -> Option<f64> {
        self.solution().map(|solution| solution.cost)
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found(solution) => solution.stats,
            SearchOutcome::Exhausted { stats } => *stats,
        }
    }
}

/// Selector for the five searches, usable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    #[value(name = "bfs")]
    BreadthFirst,
    #[value(name = "dfs")]
    DepthFirst,
    #[value(name = "greedy")]
    GreedyBestFirst,
    #[value(name = "a-star")]
    AStar,
    #[value(name = "ucs")]
    UniformCost,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
        Algorithm::AStar,
        Algorithm::UniformCost,
    ];

    pub fn runner(self) -> Box<dyn SearchAlgorithm> {
        match self {
            Algorithm::BreadthFirst => Box::new(BreadthFirst),
            Algorithm::DepthFirst => Box::new(DepthFirst),
            Algorithm::GreedyBestFirst => Box::new(GreedyBestFirst),
            Algorithm::AStar => Box::new(AStar),
            Algorithm::UniformCost => Box::new(UniformCost),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.runner().name())
    }
}
