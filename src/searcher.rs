//! The search problem: a bounded grid, a start, a destination, impassable
//! enclosures and costly turfs.

use crate::algorithms::{
    AStar, Algorithm, BreadthFirst, DepthFirst, GreedyBestFirst, SearchAlgorithm, SearchOutcome,
    UniformCost,
};
use crate::error::{PointRole, RegionKind, SearchError};
use crate::geometry::{any_contains_or_touches, Polygon};
use crate::grid::{Action, Position, GRID_MAX};
use crate::node::Node;
use log::trace;
use std::rc::Rc;

/// Cost of a move onto a plain cell.
pub const STEP_COST: f64 = 1.0;
/// Cost of a move onto a cell inside or touching a turf.
pub const TURF_STEP_COST: f64 = 1.5;

/// Immutable search problem shared by all five algorithms.
#[derive(Debug, Clone)]
pub struct Searcher {
    bound: i32,
    initial: Position,
    destination: Position,
    enclosures: Vec<Polygon>,
    turfs: Vec<Polygon>,
}

impl Searcher {
    /// Builds a searcher on the default `GRID_MAX` x `GRID_MAX` grid.
    pub fn new(
        initial: Position,
        destination: Position,
        enclosures: Vec<Polygon>,
        turfs: Vec<Polygon>,
    ) -> Result<Self, SearchError> {
        Self::with_bound(GRID_MAX, initial, destination, enclosures, turfs)
    }

    /// Builds a searcher whose coordinates must lie in `[0, bound)` on both axes.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive bound, endpoints outside the grid, and polygons
    /// that are degenerate or self-intersecting.
    pub fn with_bound(
        bound: i32,
        initial: Position,
        destination: Position,
        enclosures: Vec<Polygon>,
        turfs: Vec<Polygon>,
    ) -> Result<Self, SearchError> {
        if bound <= 0 {
            return Err(SearchError::InvalidBound(bound));
        }
        for (role, point) in [
            (PointRole::Initial, initial),
            (PointRole::Destination, destination),
        ] {
            if !point.in_bounds(bound) {
                return Err(SearchError::PointOutOfBounds { role, point, bound });
            }
        }
        for (kind, set) in [(RegionKind::Enclosure, &enclosures), (RegionKind::Turf, &turfs)] {
            for (index, polygon) in set.iter().enumerate() {
                polygon
                    .validate()
                    .map_err(|defect| SearchError::InvalidPolygon {
                        kind,
                        index,
                        defect,
                    })?;
            }
        }

        Ok(Searcher {
            bound,
            initial,
            destination,
            enclosures,
            turfs,
        })
    }

    pub fn bound(&self) -> i32 {
        self.bound
    }

    pub fn initial(&self) -> Position {
        self.initial
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn enclosures(&self) -> &[Polygon] {
        &self.enclosures
    }

    pub fn turfs(&self) -> &[Polygon] {
        &self.turfs
    }

    /// Every state offers the same four moves; bounds are checked in [`Searcher::result`].
    pub fn actions(&self, _state: Position) -> [Action; 4] {
        Action::ALL
    }

    /// The state reached by taking `action`, or `None` if it leaves the grid.
    pub fn result(&self, state: Position, action: Action) -> Option<Position> {
        let next = state.shifted(action);
        next.in_bounds(self.bound).then_some(next)
    }

    pub fn enclosure_collision(&self, point: Position) -> bool {
        any_contains_or_touches(&self.enclosures, point)
    }

    pub fn turf_collision(&self, point: Position) -> bool {
        any_contains_or_touches(&self.turfs, point)
    }

    /// Turf-aware step cost. Enclosure collisions never get here, they are
    /// filtered out during expansion.
    pub fn action_cost(&self, _state: Position, _action: Action, result: Position) -> f64 {
        if self.turf_collision(result) {
            TURF_STEP_COST
        } else {
            STEP_COST
        }
    }

    /// Straight-line distance from the node's state to the destination.
    pub fn heuristic(&self, node: &Node) -> f64 {
        node.state().distance(self.destination)
    }

    pub fn is_goal(&self, state: Position) -> bool {
        state == self.destination
    }

    /// Legal successors of `state` with the action that reaches each.
    fn successors(&self, state: Position) -> impl Iterator<Item = (Action, Position)> + '_ {
        self.actions(state).into_iter().filter_map(move |action| {
            self.result(state, action)
                .filter(|next| !self.enclosure_collision(*next))
                .map(|next| (action, next))
        })
    }

    /// Children with turf-aware costs, for the cost-sensitive searches.
    pub fn expand(&self, node: &Rc<Node>) -> Vec<Rc<Node>> {
        let state = node.state();
        let children: Vec<_> = self
            .successors(state)
            .map(|(action, next)| {
                let cost = node.path_cost() + self.action_cost(state, action, next);
                Node::child(next, node, action, cost)
            })
            .collect();
        trace!("expanded {} into {} children", state, children.len());
        children
    }

    /// Children with a flat unit cost, for breadth- and depth-first search.
    pub fn expand_uniform(&self, node: &Rc<Node>) -> Vec<Rc<Node>> {
        let state = node.state();
        let children: Vec<_> = self
            .successors(state)
            .map(|(action, next)| Node::child(next, node, action, node.path_cost() + STEP_COST))
            .collect();
        trace!("expanded {} into {} children (uniform)", state, children.len());
        children
    }

    /// Turf-aware cost of walking `path`, or `None` if some step is not a
    /// legal single move (off-grid, diagonal, or into an enclosure).
    pub fn evaluate_path(&self, path: &[Position]) -> Option<f64> {
        let first = *path.first()?;
        if !first.in_bounds(self.bound) {
            return None;
        }
        path.windows(2).try_fold(0.0, |total, step| {
            let (from, to) = (step[0], step[1]);
            let action = Action::between(from, to)?;
            let next = self.result(from, action)?;
            if self.enclosure_collision(next) {
                return None;
            }
            Some(total + self.action_cost(from, action, next))
        })
    }

    pub fn breadth_first_search(&self) -> SearchOutcome {
        BreadthFirst.search(self)
    }

    pub fn depth_first_search(&self) -> SearchOutcome {
        DepthFirst.search(self)
    }

    pub fn greedy_best_first_search(&self) -> SearchOutcome {
        GreedyBestFirst.search(self)
    }

    pub fn a_star_search(&self) -> SearchOutcome {
        AStar.search(self)
    }

    pub fn uniform_cost_search(&self) -> SearchOutcome {
        UniformCost.search(self)
    }

    pub fn search(&self, algorithm: Algorithm) -> SearchOutcome {
        algorithm.runner().search(self)
    }
}
