//! Priority-driven searches: greedy best-first, A* and uniform-cost.
//!
//! All three share one loop and differ only in how a node is ranked:
//!
//! | search  | priority          |
//! |---------|-------------------|
//! | greedy  | `h(n)`            |
//! | A*      | `g(n) + h(n)`     |
//! | uniform | `g(n)`            |
//!
//! The reached map keeps the cheapest node seen per state. A child is queued
//! only when it is new or strictly cheaper, and queuing goes through
//! [`PriorityQueue::update`] so a state never has two live frontier entries.

use crate::algorithms::common::{SearchAlgorithm, SearchOutcome};
use crate::frontier::PriorityQueue;
use crate::grid::Position;
use crate::node::Node;
use crate::searcher::Searcher;
use crate::statistics::SearchStats;
use log::debug;
use rustc_hash::FxHashMap;
use std::rc::Rc;

fn best_first_search<F>(searcher: &Searcher, name: &str, priority: F) -> SearchOutcome
where
    F: Fn(&Searcher, &Node) -> f64,
{
    debug!(
        "{} search from {} to {}",
        name,
        searcher.initial(),
        searcher.destination()
    );
    let mut stats = SearchStats::default();
    let root = Node::root(searcher.initial());

    let mut frontier: PriorityQueue<Position, Rc<Node>> = PriorityQueue::new();
    frontier.push(root.state(), Rc::clone(&root), priority(searcher, &root));
    let mut reached: FxHashMap<Position, Rc<Node>> = FxHashMap::default();
    reached.insert(root.state(), root);
    stats.observe_frontier(frontier.len());

    while let Some((state, node, _)) = frontier.pop() {
        if searcher.is_goal(state) {
            stats.states_reached = reached.len();
            debug!(
                "{} reached goal at cost {} after {} expansions",
                name,
                node.path_cost(),
                stats.nodes_expanded
            );
            return SearchOutcome::found(&node, stats);
        }

        stats.nodes_expanded += 1;
        for child in searcher.expand(&node) {
            let child_state = child.state();
            let improves = reached
                .get(&child_state)
                .map_or(true, |best| child.path_cost() < best.path_cost());
            if improves {
                let rank = priority(searcher, &child);
                reached.insert(child_state, Rc::clone(&child));
                frontier.update(child_state, child, rank);
            }
        }
        stats.observe_frontier(frontier.len());
    }

    stats.states_reached = reached.len();
    debug!("{} exhausted after {} expansions", name, stats.nodes_expanded);
    SearchOutcome::Exhausted { stats }
}

/// Expands whichever node looks closest to the destination, ignoring the
/// cost already paid. Fast, not optimal.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyBestFirst;

impl SearchAlgorithm for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "Greedy Best-First"
    }

    fn search(&self, searcher: &Searcher) -> SearchOutcome {
        best_first_search(searcher, "greedy best-first", |s, node| s.heuristic(node))
    }
}

/// A* with the straight-line heuristic. The heuristic never exceeds the
/// cheapest step cost per unit of distance, so returned paths are optimal.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn search(&self, searcher: &Searcher) -> SearchOutcome {
        best_first_search(searcher, "A*", |s, node| node.path_cost() + s.heuristic(node))
    }
}

/// Dijkstra-style search ordered by path cost alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformCost;

impl SearchAlgorithm for UniformCost {
    fn name(&self) -> &'static str {
        "Uniform-Cost"
    }

    fn search(&self, searcher: &Searcher) -> SearchOutcome {
        best_first_search(searcher, "uniform-cost", |_, node| node.path_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn straight_line_on_open_grid() {
        let searcher = Searcher::with_bound(10, p(0, 0), p(0, 3), vec![], vec![]).unwrap();
        let expected = vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)];
        for algorithm in [
            &AStar as &dyn SearchAlgorithm,
            &UniformCost as &dyn SearchAlgorithm,
            &GreedyBestFirst as &dyn SearchAlgorithm,
        ] {
            let solution = algorithm.search(&searcher).into_solution().unwrap();
            assert_eq!(solution.path, expected, "{}", algorithm.name());
            assert_eq!(solution.cost, 3.0, "{}", algorithm.name());
        }
    }

    #[test]
    fn crosses_turf_when_detour_is_dearer() {
        // A turf column x = 2, y in 0..=2 sits between start and goal. Crossing
        // it costs an extra 0.5, going over the top costs six extra steps.
        let turf = Polygon::rectangle(p(2, 0), p(2, 2));
        let searcher = Searcher::with_bound(6, p(0, 0), p(4, 0), vec![], vec![turf]).unwrap();
        let astar = AStar.search(&searcher).into_solution().unwrap();
        let ucs = UniformCost.search(&searcher).into_solution().unwrap();
        assert_eq!(astar.cost, 4.5);
        assert_eq!(ucs.cost, 4.5);
        assert_eq!(searcher.evaluate_path(&astar.path), Some(astar.cost));
    }

    #[test]
    fn prefers_plain_cells_over_turf_at_equal_length() {
        // Two shortest routes of length 2 from (0,0) to (1,1): via (1,0),
        // which is turf, or via (0,1), which is not.
        let turf = Polygon::new([p(1, 0), p(3, 0), p(3, -2)]);
        let searcher = Searcher::with_bound(4, p(0, 0), p(1, 1), vec![], vec![turf]).unwrap();
        let solution = UniformCost.search(&searcher).into_solution().unwrap();
        assert_eq!(solution.path, vec![p(0, 0), p(0, 1), p(1, 1)]);
        assert_eq!(solution.cost, 2.0);
    }

    #[test]
    fn equal_cost_rediscovery_keeps_first_parent() {
        // (1, 1) is first reached from (0, 1), then again from (1, 0) at the
        // same cost. The second route must not replace the first.
        let searcher = Searcher::with_bound(3, p(0, 0), p(1, 1), vec![], vec![]).unwrap();
        let solution = UniformCost.search(&searcher).into_solution().unwrap();
        assert_eq!(solution.path, vec![p(0, 0), p(0, 1), p(1, 1)]);
        assert_eq!(solution.cost, 2.0);
        assert_eq!(solution.stats.nodes_expanded, 4);
    }

    #[test]
    fn start_on_goal_pops_immediately() {
        let searcher = Searcher::with_bound(5, p(2, 2), p(2, 2), vec![], vec![]).unwrap();
        for algorithm in [
            &AStar as &dyn SearchAlgorithm,
            &UniformCost as &dyn SearchAlgorithm,
            &GreedyBestFirst as &dyn SearchAlgorithm,
        ] {
            let solution = algorithm.search(&searcher).into_solution().unwrap();
            assert_eq!(solution.path, vec![p(2, 2)]);
            assert_eq!(solution.cost, 0.0);
            assert_eq!(solution.stats.nodes_expanded, 0);
        }
    }

    #[test]
    fn enclosed_goal_exhausts() {
        let cage = Polygon::rectangle(p(3, 3), p(5, 5));
        let searcher = Searcher::with_bound(8, p(0, 0), p(4, 4), vec![cage], vec![]).unwrap();
        let outcome = AStar.search(&searcher);
        assert!(!outcome.is_found());
        // Every free cell is expanded once: 64 cells minus the 9 caged ones.
        assert_eq!(outcome.stats().nodes_expanded, 55);
    }
}
