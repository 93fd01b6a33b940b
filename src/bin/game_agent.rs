use clap::Parser;
use puzzle_solvers::agent::{self, AgentConfig};
use puzzle_solvers::grid::Grid;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for the tile-spawn RNG; random when omitted
    #[clap(short, long)]
    seed: Option<u64>,

    /// Maximum search depth per move
    #[clap(long, default_value_t = agent::DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Time budget per move in milliseconds
    #[clap(long, default_value_t = 180)]
    time_budget_ms: u64,

    /// Print the grid after every move
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = AgentConfig {
        time_budget: Duration::from_millis(args.time_budget_ms),
        max_depth: args.max_depth,
    };

    let mut grid = Grid::new_empty();
    grid.spawn_random_tile(&mut rng);
    grid.spawn_random_tile(&mut rng);

    println!("Seed: {}\n", seed);
    println!("Starting grid:\n{}\n", grid);

    let mut moves_played = 0u32;
    while let Some(direction) = agent::choose_move(&grid, &config) {
        grid = grid.slide(direction);
        moves_played += 1;
        grid.spawn_random_tile(&mut rng);

        if args.verbose {
            println!("Move {}: {}\n{}\n", moves_played, direction, grid);
        }
    }

    println!("Final grid:\n{}\n", grid);
    println!("Moves played: {}", moves_played);
    println!("Largest tile: {}", grid.max_tile());
}
