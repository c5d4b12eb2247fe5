use crate::geometry::PolygonDefect;
use crate::grid::Position;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which end of the search a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Initial,
    Destination,
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointRole::Initial => f.write_str("initial"),
            PointRole::Destination => f.write_str("destination"),
        }
    }
}

/// Which obstacle set a polygon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Enclosure,
    Turf,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionKind::Enclosure => f.write_str("enclosure"),
            RegionKind::Turf => f.write_str("turf"),
        }
    }
}

/// Inputs a [`Searcher`](crate::searcher::Searcher) refuses to be built from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("grid bound must be positive, got {0}")]
    InvalidBound(i32),

    #[error("{role} point {point} lies outside the grid [0, {bound})")]
    PointOutOfBounds {
        role: PointRole,
        point: Position,
        bound: i32,
    },

    #[error("{kind} polygon #{index} is invalid: {defect}")]
    InvalidPolygon {
        kind: RegionKind,
        index: usize,
        defect: PolygonDefect,
    },
}

/// Failures while loading or generating a world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("grid size {0} is too small to generate a world (minimum 4)")]
    GridTooSmall(i32),

    #[error("no solvable world found for seed {seed} after {attempts} attempts")]
    Unsolvable { seed: u64, attempts: usize },
}
