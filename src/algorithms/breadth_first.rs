use crate::algorithms::common::{SearchAlgorithm, SearchOutcome};
use crate::frontier::Queue;
use crate::node::Node;
use crate::searcher::Searcher;
use crate::statistics::SearchStats;
use log::debug;
use rustc_hash::FxHashSet;

/// Breadth-first search over unit step costs.
///
/// The goal test runs when a child is generated, so the search stops one
/// layer earlier than a pop-time test would.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl SearchAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "Breadth-First"
    }

    fn search(&self, searcher: &Searcher) -> SearchOutcome {
        debug!(
            "breadth-first search from {} to {}",
            searcher.initial(),
            searcher.destination()
        );
        let mut stats = SearchStats::default();
        let root = Node::root(searcher.initial());
        if searcher.is_goal(root.state()) {
            stats.states_reached = 1;
            return SearchOutcome::found(&root, stats);
        }

        let mut reached = FxHashSet::default();
        reached.insert(root.state());
        let mut frontier = Queue::new();
        frontier.push(root);
        stats.observe_frontier(frontier.len());

        while let Some(node) = frontier.pop() {
            stats.nodes_expanded += 1;
            for child in searcher.expand_uniform(&node) {
                let state = child.state();
                if searcher.is_goal(state) {
                    stats.states_reached = reached.len() + 1;
                    debug!("breadth-first reached goal after {} expansions", stats.nodes_expanded);
                    return SearchOutcome::found(&child, stats);
                }
                if reached.insert(state) {
                    frontier.push(child);
                }
            }
            stats.observe_frontier(frontier.len());
        }

        stats.states_reached = reached.len();
        debug!("breadth-first exhausted after {} expansions", stats.nodes_expanded);
        SearchOutcome::Exhausted { stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::grid::Position;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn straight_line_on_open_grid() {
        let searcher = Searcher::with_bound(10, p(0, 0), p(0, 3), vec![], vec![]).unwrap();
        let solution = BreadthFirst.search(&searcher).into_solution().unwrap();
        assert_eq!(solution.path, vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)]);
        assert_eq!(solution.cost, 3.0);
    }

    #[test]
    fn start_on_goal_returns_single_point() {
        let searcher = Searcher::with_bound(10, p(4, 4), p(4, 4), vec![], vec![]).unwrap();
        let solution = BreadthFirst.search(&searcher).into_solution().unwrap();
        assert_eq!(solution.path, vec![p(4, 4)]);
        assert_eq!(solution.cost, 0.0);
        assert_eq!(solution.stats.nodes_expanded, 0);
    }

    #[test]
    fn ignores_turf_cost() {
        let turf = Polygon::rectangle(p(0, 1), p(4, 2));
        let searcher = Searcher::with_bound(5, p(0, 0), p(0, 3), vec![], vec![turf]).unwrap();
        let solution = BreadthFirst.search(&searcher).into_solution().unwrap();
        assert_eq!(solution.cost, 3.0);
        assert_eq!(searcher.evaluate_path(&solution.path), Some(4.0));
    }
}
