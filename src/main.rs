use clap::Parser;
use log::info;

use turf_search::batch::BatchRun;
use turf_search::comparison::{print_comparison_results, run_comparison};
use turf_search::config::Config;
use turf_search::error::WorldError;
use turf_search::world::{World, WorldGenerator};

fn build_world(config: &Config) -> Result<World, WorldError> {
    if config.uses_polygon_files() {
        World::load(
            config.grid_size,
            config.start,
            config.goal,
            config.enclosures.as_deref(),
            config.turfs.as_deref(),
        )
    } else {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!("World seed: {} (for reproducibility)", seed);
        WorldGenerator::from_config(config).generate(Some((config.start, config.goal)), seed)
    }
}

fn run_single(config: &Config) -> Result<(), WorldError> {
    let world = build_world(config)?;
    let searcher = world.searcher()?;

    if !config.quiet {
        println!("Grid size: {}x{}", world.grid_size, world.grid_size);
        println!("Start: {}, Goal: {}", world.start, world.goal);
        println!(
            "Enclosures: {}, Turfs: {}",
            searcher.enclosures().len(),
            searcher.turfs().len()
        );
    }

    let comparison = run_comparison(&searcher, &config.selected_algorithms());
    print_comparison_results(&comparison, config.show_path);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    if config.batch_mode {
        let mut batch = BatchRun::new(config.clone());
        match batch.run() {
            Ok(()) => {
                if !config.quiet {
                    batch.print_summary();
                }
            }
            Err(e) => {
                eprintln!("Batch run failed: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Err(e) = run_single(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
