//! CLI for playing a move script through successive mazes

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{anyhow, Context};
use clap::Parser;
use maze_runner::{
    render, Direction, MazeConfig, RenderOptions, Session, SessionConfig, StepOutcome,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Run through dual-graph mazes, collecting points on the way to the exit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Inner rows of the first maze
    #[arg(long, default_value_t = 7)]
    rows: usize,

    /// Inner columns of the first maze
    #[arg(long, default_value_t = 7)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds available in the first round
    #[arg(long, default_value_t = 15)]
    time_limit: u64,

    /// Simulated time taken by each move, milliseconds
    #[arg(long, default_value_t = 250)]
    move_time: u64,

    /// Draw the dual graph and solution path over the maze
    #[arg(short, long)]
    debug: bool,

    /// Display every move on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: u64,

    /// Log collected points and round changes
    #[arg(short, long)]
    verbose: bool,

    /// Restarts allowed after running out of time
    #[arg(long, default_value_t = 0)]
    retries: usize,

    /// File with moves (`U`, `D`, `L`, `R`). Use `-` for stdin. Without it,
    /// the first maze is walked along its solution.
    moves: Option<PathBuf>,
}

fn parse_moves(text: &str) -> anyhow::Result<Vec<Direction>> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Direction::from_char(c).ok_or_else(|| anyhow!("Unexpected move `{}`", c)))
        .collect()
}

fn read_moves(path: &Path) -> anyhow::Result<Vec<Direction>> {
    let text = if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?
    };
    parse_moves(&text)
}

/// Status line shown under each playback frame
fn hud<R: Rng>(session: &Session<R>, elapsed_secs: u64) -> String {
    format!(
        "Round {}  Score: {}  Time: {}s",
        session.round(),
        session.player().score,
        session.remaining(elapsed_secs)
    )
}

fn draw<R: Rng>(session: &Session<R>, debug: bool) -> String {
    let options = RenderOptions {
        player: Some(session.player().position),
        show_graph: debug,
        show_path: debug,
    };
    render(session.maze(), &options)
}

/// How moves are fed to the session
struct PlayOptions {
    /// Simulated milliseconds per move
    move_time: u64,
    retries: usize,
    /// Frame length in milliseconds, `None` for no playback
    frame_length: Option<u64>,
    debug: bool,
}

/// Outcome of a played move script
#[derive(Debug, Default, PartialEq)]
struct Report {
    completed_rounds: usize,
    /// Score of completed rounds
    total_score: u32,
    restarts: usize,
    timed_out: bool,
}

/// Feed `moves` to the session, restarting the round on time-outs while
/// retries last
fn play<R: Rng>(
    session: &mut Session<R>,
    moves: &[Direction],
    options: &PlayOptions,
) -> anyhow::Result<Report> {
    let mut report = Report::default();
    let mut elapsed_ms = 0;

    if options.frame_length.is_some() {
        print!("\x1B[2J\x1B[1;1H");
        println!("{}\n{}", draw(session, options.debug), hud(session, 0));
    }

    for direction in moves {
        elapsed_ms += options.move_time;
        match session.step(*direction, elapsed_ms / 1000)? {
            StepOutcome::RoundComplete {
                score,
                next_round,
                time_limit,
            } => {
                report.completed_rounds += 1;
                report.total_score += score;
                elapsed_ms = 0;
                println!(
                    "Reached the end with {} points. Round {} has {} seconds.",
                    score, next_round, time_limit
                );
            }
            StepOutcome::TimeUp if report.restarts < options.retries => {
                report.restarts += 1;
                session.restart()?;
                elapsed_ms = 0;
                println!("You ran out of time! Restarting round {}.", session.round());
            }
            StepOutcome::TimeUp => {
                report.timed_out = true;
                println!("You ran out of time!");
                break;
            }
            StepOutcome::Blocked | StepOutcome::Moved { .. } => (),
        }
        if let Some(frame_length) = options.frame_length {
            thread::sleep(Duration::from_millis(frame_length));
            print!("\x1B[2J\x1B[1;1H");
            println!(
                "{}\n{}",
                draw(session, options.debug),
                hud(session, elapsed_ms / 1000)
            );
        }
    }
    Ok(report)
}

/// Play moves, print report
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    let rng = if let Some(state) = args.seed {
        StdRng::seed_from_u64(state)
    } else {
        StdRng::from_entropy()
    };
    let config = SessionConfig {
        maze: MazeConfig::with_dimensions(args.rows, args.cols),
        initial_time_limit: args.time_limit,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, rng)?;

    let moves = match &args.moves {
        Some(path) => read_moves(path)?,
        None => {
            let path = session
                .maze()
                .solution()
                .context("Start and end are not connected")?;
            path.windows(2)
                .filter_map(|pair| pair[0].direction_to(pair[1]))
                .collect()
        }
    };

    let options = PlayOptions {
        move_time: args.move_time,
        retries: args.retries,
        frame_length: args.playback.then_some(args.frame_length),
        debug: args.debug,
    };
    let report = play(&mut session, &moves, &options)?;

    if !args.playback {
        println!("{}", draw(&session, args.debug));
    }
    println!(
        "Round {}, score {} this round, {} from {} completed round(s), {} restart(s).",
        session.round(),
        session.player().score,
        report.total_score,
        report.completed_rounds,
        report.restarts
    );
    Ok(())
}
