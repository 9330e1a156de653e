//! Round progression: growing mazes and carried-over time

use rand::Rng;
use tracing::info;

use crate::error::MazeError;
use crate::geometry::{Cell, Direction};
use crate::maze::{Maze, MazeConfig};
use crate::movement::{can_move, MoveOutcome, PlayerState};

/// Session policy
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Settings of the first round
    pub maze: MazeConfig,
    /// Rows and columns added after each completed round
    pub growth: usize,
    /// Seconds available in the first round
    pub initial_time_limit: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            growth: 2,
            initial_time_limit: 15,
        }
    }
}

/// What a directional input led to
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StepOutcome {
    Blocked,
    Moved { to: Cell, gained: u32 },
    /// End reached; a larger maze is now in place
    RoundComplete {
        /// Score of the finished round
        score: u32,
        /// Number of the round that starts now, counting from 1
        next_round: usize,
        /// Seconds for the new round: time left plus the round's score
        time_limit: u64,
    },
    /// No time left; the input was ignored
    TimeUp,
}

/// A player's run through successive mazes
///
/// The session owns the random source and the current round. Time is not
/// measured here: callers pass the seconds elapsed since the round started.
pub struct Session<R> {
    config: SessionConfig,
    round_config: MazeConfig,
    rng: R,
    round: usize,
    time_limit: u64,
    maze: Maze,
    player: PlayerState,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, mut rng: R) -> Result<Self, MazeError> {
        let maze = Maze::generate(&config.maze, &mut rng)?;
        let player = PlayerState::new(maze.start);
        Ok(Self {
            config,
            round_config: config.maze,
            rng,
            round: 1,
            time_limit: config.initial_time_limit,
            maze,
            player,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn time_limit(&self) -> u64 {
        self.time_limit
    }

    /// Seconds left in the current round
    pub fn remaining(&self, elapsed_secs: u64) -> u64 {
        self.time_limit.saturating_sub(elapsed_secs)
    }

    /// Apply one input, `elapsed_secs` into the current round
    ///
    /// A move onto the end builds the next maze before the player moves. If
    /// that fails the error is returned and the session is left as it was,
    /// player still in front of the end.
    pub fn step(&mut self, direction: Direction, elapsed_secs: u64) -> Result<StepOutcome, MazeError> {
        let remaining = self.remaining(elapsed_secs);
        if remaining == 0 {
            return Ok(StepOutcome::TimeUp);
        }

        let position = self.player.position;
        let next = if position.step(direction) == Some(self.maze.end)
            && can_move(&self.maze.walls, position, direction)?
        {
            Some(self.next_maze()?)
        } else {
            None
        };

        let (to, gained) = match self
            .player
            .step(&self.maze.walls, &mut self.maze.points, direction)?
        {
            MoveOutcome::Blocked => return Ok(StepOutcome::Blocked),
            MoveOutcome::Moved { to, gained } => (to, gained),
        };
        let Some((round_config, maze)) = next.filter(|_| to == self.maze.end) else {
            return Ok(StepOutcome::Moved { to, gained });
        };

        let score = self.player.score;
        let time_limit = remaining + u64::from(score);
        self.start_round(round_config, maze, time_limit);
        Ok(StepOutcome::RoundComplete {
            score,
            next_round: self.round,
            time_limit,
        })
    }

    fn next_maze(&mut self) -> Result<(MazeConfig, Maze), MazeError> {
        let round_config = self.round_config.grown(self.config.growth);
        let maze = Maze::generate(&round_config, &mut self.rng)?;
        Ok((round_config, maze))
    }

    fn start_round(&mut self, round_config: MazeConfig, maze: Maze, time_limit: u64) {
        self.round_config = round_config;
        self.round += 1;
        self.time_limit = time_limit;
        self.player = PlayerState::new(maze.start);
        self.maze = maze;
        info!(
            round = self.round,
            rows = round_config.inner_rows,
            cols = round_config.inner_cols,
            time_limit,
            "new round"
        );
    }

    /// Start over after running out of time
    ///
    /// A fresh maze of the current size, score and visited cells reset. The
    /// time limit of the round is kept.
    pub fn restart(&mut self) -> Result<(), MazeError> {
        let maze = Maze::generate(&self.round_config, &mut self.rng)?;
        self.player = PlayerState::new(maze.start);
        self.maze = maze;
        info!(round = self.round, "restarted round");
        Ok(())
    }
}
