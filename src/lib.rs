pub mod algorithms;
pub mod batch;
pub mod comparison;
pub mod config;
pub mod error;
pub mod frontier;
pub mod geometry;
pub mod grid;
pub mod node;
pub mod searcher;
pub mod statistics;
pub mod world;

pub use algorithms::{Algorithm, SearchAlgorithm, SearchOutcome, Solution};
pub use error::{SearchError, WorldError};
pub use geometry::Polygon;
pub use grid::{Action, Position, GRID_MAX};
pub use searcher::Searcher;
