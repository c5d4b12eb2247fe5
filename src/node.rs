use crate::grid::{Action, Position};
use std::rc::Rc;

/// A search tree node. Children hold a shared reference to their parent and
/// parents never see their children, so the tree cannot form cycles.
#[derive(Debug)]
pub struct Node {
    state: Position,
    parent: Option<Rc<Node>>,
    action: Option<Action>,
    path_cost: f64,
}

impl Node {
    /// The initial node: no parent, no action, zero cost.
    pub fn root(state: Position) -> Rc<Self> {
        Rc::new(Node {
            state,
            parent: None,
            action: None,
            path_cost: 0.0,
        })
    }

    /// A node reached from `parent` by taking `action`.
    pub fn child(state: Position, parent: &Rc<Node>, action: Action, path_cost: f64) -> Rc<Self> {
        Rc::new(Node {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            path_cost,
        })
    }

    pub fn state(&self) -> Position {
        self.state
    }

    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.parent.as_ref()
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    /// Number of moves from the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This node followed by each ancestor up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self), |node| node.parent.as_deref())
    }

    /// States from the root to this node, inclusive.
    pub fn reconstruct_path(&self) -> Vec<Position> {
        let mut path: Vec<Position> = self.ancestors().map(Node::state).collect();
        path.reverse();
        path
    }

    /// Actions from the root to this node.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.ancestors().filter_map(Node::action).collect();
        actions.reverse();
        actions
    }
}
