//! Headless host loop: runs generations of agents, logs progress and keeps
//! the best network on disk.

use anyhow::Result;
use clap::Parser;
use log::info;

use lanesim::simulation::config::SimConfig;
use lanesim::simulation::persistence::ModelStore;
use lanesim::simulation::world::World;

#[derive(Parser)]
#[command(name = "lanesim")]
#[command(about = "Headless lane driving simulation with evolving agents")]
struct Args {
    /// Simulation configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Model file the best network is loaded from and saved to
    #[arg(short, long, default_value = "best_network.json")]
    model: String,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 10)]
    generations: u32,

    /// Maximum ticks per generation
    #[arg(short, long, default_value_t = 2000)]
    ticks: u64,

    /// Delete the saved model before starting
    #[arg(long)]
    discard_model: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();
    info!("Starting lane simulation");

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            SimConfig::load_from_file(path)?
        }
        None => SimConfig::default(),
    };

    let store = ModelStore::new(&args.model);
    if args.discard_model && store.discard()? {
        info!("Starting from scratch");
    }

    let mut world = World::new(config);
    if world.restore_best(&store)? {
        info!("Continuing from {}", store.path().display());
    }

    for _ in 0..args.generations {
        while world.tick < args.ticks && !world.is_extinct() {
            world.step();
        }

        let best_distance = world.best_agent().map_or(0.0, |agent| agent.distance);
        info!(
            "Generation {}: {} ticks, {}/{} agents alive, best distance {:.1}",
            world.generation,
            world.tick,
            world.alive_agents(),
            world.agents.len(),
            best_distance
        );

        world.save_best(&store)?;
        world.next_generation();
    }

    Ok(())
}
