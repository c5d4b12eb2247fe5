use crate::algorithms::Algorithm;
use crate::grid::{Position, GRID_MAX};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Exclusive bound for both axes.
    #[arg(long, default_value_t = GRID_MAX)]
    pub grid_size: i32,

    #[arg(long, default_value = "8,10", value_parser = parse_position)]
    pub start: Position,

    #[arg(long, default_value = "43,45", value_parser = parse_position)]
    pub goal: Position,

    /// Enclosure polygon file. Without polygon files a random world is generated.
    #[arg(long)]
    pub enclosures: Option<PathBuf>,

    /// Turf polygon file.
    #[arg(long)]
    pub turfs: Option<PathBuf>,

    /// Algorithms to run; repeat the flag for several. Defaults to all five.
    #[arg(long = "algorithm", value_enum)]
    pub algorithms: Vec<Algorithm>,

    #[arg(long, default_value_t = 6)]
    pub num_enclosures: usize,

    #[arg(long, default_value_t = 4)]
    pub num_turfs: usize,

    /// Seed for random worlds. A random seed is drawn and logged when unset.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 20)]
    pub num_simulations: usize,

    #[arg(long, default_value = "batch_results.csv")]
    pub output_file: String,

    #[arg(long, default_value_t = 300)]
    pub timeout_seconds: u64,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Print every returned path.
    #[arg(long, default_value_t = false)]
    pub show_path: bool,
}

impl Config {
    pub fn selected_algorithms(&self) -> Vec<Algorithm> {
        if self.algorithms.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            self.algorithms.clone()
        }
    }

    pub fn uses_polygon_files(&self) -> bool {
        self.enclosures.is_some() || self.turfs.is_some()
    }
}

/// Parses `x,y`.
pub fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", text))?;
    let x = x.trim().parse().map_err(|e| format!("bad x `{}`: {}", x, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y `{}`: {}", y, e))?;
    Ok(Position::new(x, y))
}
