pub mod best_first;
pub mod breadth_first;
pub mod common;
pub mod depth_first;

pub use best_first::{AStar, GreedyBestFirst, UniformCost};
pub use breadth_first::BreadthFirst;
pub use common::{Algorithm, SearchAlgorithm, SearchOutcome, Solution};
pub use depth_first::DepthFirst;
