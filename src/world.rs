//! Worlds: a grid size, two endpoints and the enclosure/turf polygons,
//! either read from polygon files or generated from a seed.
//!
//! Polygon files hold one polygon per line as `x,y` vertices separated by
//! `;`, for example `10,10;20,10;20,20;10,20`.

use crate::comparison::reference_optimum;
use crate::config::Config;
use crate::error::{SearchError, WorldError};
use crate::geometry::Polygon;
use crate::grid::Position;
use crate::searcher::Searcher;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct World {
    pub grid_size: i32,
    pub start: Position,
    pub goal: Position,
    pub enclosures: Vec<Polygon>,
    pub turfs: Vec<Polygon>,
}

impl World {
    /// Reads enclosures and turfs from polygon files. A missing file means an
    /// empty set.
    pub fn load(
        grid_size: i32,
        start: Position,
        goal: Position,
        enclosure_file: Option<&Path>,
        turf_file: Option<&Path>,
    ) -> Result<Self, WorldError> {
        let enclosures = match enclosure_file {
            Some(path) => read_polygons(path)?,
            None => Vec::new(),
        };
        let turfs = match turf_file {
            Some(path) => read_polygons(path)?,
            None => Vec::new(),
        };
        info!(
            "Loaded world: {} enclosures, {} turfs",
            enclosures.len(),
            turfs.len()
        );

        Ok(World {
            grid_size,
            start,
            goal,
            enclosures,
            turfs,
        })
    }

    pub fn searcher(&self) -> Result<Searcher, SearchError> {
        Searcher::with_bound(
            self.grid_size,
            self.start,
            self.goal,
            self.enclosures.clone(),
            self.turfs.clone(),
        )
    }
}

/// Parses polygon-file text. Blank lines and a trailing `;` are ignored.
pub fn parse_polygons(text: &str) -> Result<Vec<Polygon>, WorldError> {
    let mut polygons = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let vertices = line
            .split(';')
            .map(str::trim)
            .filter(|vertex| !vertex.is_empty())
            .map(|vertex| {
                parse_vertex(vertex).map_err(|message| WorldError::Parse {
                    line: index + 1,
                    message,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        polygons.push(Polygon::new(vertices));
    }
    Ok(polygons)
}

fn parse_vertex(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", text))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("bad x coordinate `{}`: {}", x.trim(), e))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("bad y coordinate `{}`: {}", y.trim(), e))?;
    Ok(Position::new(x, y))
}

pub fn read_polygons(path: &Path) -> Result<Vec<Polygon>, WorldError> {
    let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_polygons(&text)
}

/// Seeded random world generation. Enclosures and turfs are axis-aligned
/// rectangles; enclosures never cover either endpoint, and worlds without a
/// path are discarded.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    pub grid_size: i32,
    pub num_enclosures: usize,
    pub num_turfs: usize,
    pub max_attempts: usize,
}

impl WorldGenerator {
    pub fn from_config(config: &Config) -> Self {
        WorldGenerator {
            grid_size: config.grid_size,
            num_enclosures: config.num_enclosures,
            num_turfs: config.num_turfs,
            max_attempts: 50,
        }
    }

    /// Generates a solvable world. With `endpoints` unset, the start is drawn
    /// from the lower-left quarter and the goal from the upper-right quarter.
    pub fn generate(
        &self,
        endpoints: Option<(Position, Position)>,
        seed: u64,
    ) -> Result<World, WorldError> {
        if self.grid_size < 4 {
            return Err(WorldError::GridTooSmall(self.grid_size));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let size = self.grid_size;

        for attempt in 0..self.max_attempts {
            let (start, goal) = endpoints.unwrap_or_else(|| {
                let start = Position::new(rng.gen_range(0..size / 2), rng.gen_range(0..size / 2));
                let goal = Position::new(rng.gen_range(size / 2..size), rng.gen_range(size / 2..size));
                (start, goal)
            });

            let mut enclosures = Vec::new();
            let mut placements = 0;
            while enclosures.len() < self.num_enclosures && placements < self.num_enclosures * 10 {
                let candidate = self.random_rectangle(&mut rng);
                if !candidate.contains_or_touches(start) && !candidate.contains_or_touches(goal) {
                    enclosures.push(candidate);
                }
                placements += 1;
            }
            let turfs: Vec<_> = (0..self.num_turfs)
                .map(|_| self.random_rectangle(&mut rng))
                .collect();

            let world = World {
                grid_size: size,
                start,
                goal,
                enclosures,
                turfs,
            };
            let searcher = world.searcher()?;
            if reference_optimum(&searcher).is_some() {
                debug!(
                    "Generated world on attempt {} - Start: {}, Goal: {}, Enclosures: {}, Turfs: {}",
                    attempt + 1,
                    start,
                    goal,
                    world.enclosures.len(),
                    world.turfs.len()
                );
                return Ok(world);
            }
            warn!("World attempt {} for seed {} has no path, regenerating", attempt + 1, seed);
        }

        Err(WorldError::Unsolvable {
            seed,
            attempts: self.max_attempts,
        })
    }

    fn random_rectangle(&self, rng: &mut StdRng) -> Polygon {
        let max_side = (self.grid_size / 5).max(1);
        let width = rng.gen_range(1..=max_side);
        let height = rng.gen_range(1..=max_side);
        let x = rng.gen_range(0..self.grid_size - width);
        let y = rng.gen_range(0..self.grid_size - height);
        Polygon::rectangle(Position::new(x, y), Position::new(x + width, y + height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn generator() -> WorldGenerator {
        WorldGenerator {
            grid_size: 30,
            num_enclosures: 8,
            num_turfs: 5,
            max_attempts: 50,
        }
    }

    #[test]
    fn parses_polygon_lines() {
        let text = "0,0;4,0;4,4;0,4\n\n 10, 10 ; 12,10; 11,13;\n";
        let polygons = parse_polygons(text).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices(), &[p(0, 0), p(4, 0), p(4, 4), p(0, 4)]);
        assert_eq!(polygons[1].vertices(), &[p(10, 10), p(12, 10), p(11, 13)]);
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse_polygons("0,0;1,0;1,1\n0,0;x,1;2,2\n").unwrap_err();
        match err {
            WorldError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("bad x coordinate"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_polygons("3;4").unwrap_err(),
            WorldError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn huge_polygon_coordinates_build_a_searcher() {
        let text = "-2000000000,-2000000000;2000000000,-2000000000;2000000000,2000000000;-2000000000,2000000000\n";
        let world = World {
            grid_size: 10,
            start: p(0, 0),
            goal: p(9, 9),
            enclosures: Vec::new(),
            turfs: parse_polygons(text).unwrap(),
        };
        let searcher = world.searcher().unwrap();
        assert_eq!(searcher.turfs().len(), 1);
        assert!(searcher.enclosures().is_empty());
        assert!(searcher.turf_collision(p(5, 5)));
        assert_eq!(searcher.a_star_search().cost(), Some(27.0));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_polygons(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generator().generate(None, 7).unwrap();
        let b = generator().generate(None, 7).unwrap();
        assert_eq!(a.start, b.start);
        assert_eq!(a.goal, b.goal);
        assert_eq!(a.enclosures, b.enclosures);
        assert_eq!(a.turfs, b.turfs);
    }

    #[test]
    fn generated_worlds_are_solvable_and_keep_endpoints_clear() {
        for seed in 0..10 {
            let world = generator().generate(Some((p(1, 1), p(28, 27))), seed).unwrap();
            let searcher = world.searcher().unwrap();
            assert!(!searcher.enclosure_collision(world.start));
            assert!(!searcher.enclosure_collision(world.goal));
            assert!(reference_optimum(&searcher).is_some());
        }
    }

    #[test]
    fn tiny_grids_are_rejected() {
        let tiny = WorldGenerator {
            grid_size: 3,
            ..generator()
        };
        assert!(matches!(tiny.generate(None, 1), Err(WorldError::GridTooSmall(3))));
    }
}
