use crate::algorithms::common::{SearchAlgorithm, SearchOutcome};
use crate::frontier::Stack;
use crate::node::Node;
use crate::searcher::Searcher;
use crate::statistics::SearchStats;
use log::debug;
use rustc_hash::FxHashSet;

/// Depth-first search over unit step costs. States are marked reached when
/// pushed, so each state enters the stack at most once.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl SearchAlgorithm for DepthFirst {
    fn name(&self) -> &'static str {
        "Depth-First"
    }

    fn search(&self, searcher: &Searcher) -> SearchOutcome {
        debug!(
            "depth-first search from {} to {}",
            searcher.initial(),
            searcher.destination()
        );
        let mut stats = SearchStats::default();
        let root = Node::root(searcher.initial());
        let mut reached = FxHashSet::default();
        reached.insert(root.state());
        let mut frontier = Stack::new();
        frontier.push(root);
        stats.observe_frontier(frontier.len());

        while let Some(node) = frontier.pop() {
            if searcher.is_goal(node.state()) {
                stats.states_reached = reached.len();
                debug!("depth-first reached goal after {} expansions", stats.nodes_expanded);
                return SearchOutcome::found(&node, stats);
            }

            stats.nodes_expanded += 1;
            for child in searcher.expand_uniform(&node) {
                if reached.insert(child.state()) {
                    frontier.push(child);
                }
            }
            stats.observe_frontier(frontier.len());
        }

        stats.states_reached = reached.len();
        debug!("depth-first exhausted after {} expansions", stats.nodes_expanded);
        SearchOutcome::Exhausted { stats }
    }
}
