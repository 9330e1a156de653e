//! CLI for maze generation

use clap::Parser;
use itertools::Itertools;
use maze_runner::{render, Maze, MazeConfig, RenderOptions};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Dual-graph maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Inner rows
    #[arg(long, default_value_t = 7)]
    rows: usize,

    /// Inner columns
    #[arg(long, default_value_t = 7)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the dual graph and solution path, list dead ends
    #[arg(short, long)]
    debug: bool,
}

/// Generate maze, print it
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = if let Some(state) = args.seed {
        StdRng::seed_from_u64(state)
    } else {
        StdRng::from_entropy()
    };
    let maze = Maze::generate(&MazeConfig::with_dimensions(args.rows, args.cols), &mut rng)?;

    let options = RenderOptions {
        player: None,
        show_graph: args.debug,
        show_path: args.debug,
    };
    println!("{}", render(&maze, &options));

    if args.debug {
        println!("Start {}, end {}", maze.start, maze.end);
        println!("Dead ends: {}", maze.graph.dead_ends().iter().join(" "));
        if let Some(path) = maze.solution() {
            println!("Path length: {} steps", path.len() - 1);
        }
        println!("Points on the board: {}", maze.points.remaining());
    }
    Ok(())
}
