//! Collision queries and player movement

use std::collections::HashSet;

use tracing::info;

use crate::error::MazeError;
use crate::geometry::{Cell, Direction};
use crate::rewards::PointsMap;
use crate::walls::WallLattice;

/// Can the player leave `cell` towards `direction`
///
/// Only the wall on `cell` itself is consulted. `cell` may be any cell of the
/// lattice, border included; anything else is an error.
pub fn can_move(lattice: &WallLattice, cell: Cell, direction: Direction) -> Result<bool, MazeError> {
    let (side, _) = direction.walls();
    Ok(!lattice.has_wall(cell, side)?)
}

/// Result of one movement request
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MoveOutcome {
    /// Wall or grid edge in the way; nothing changed
    Blocked,
    /// Player is now at `to` and earned `gained` points there
    Moved { to: Cell, gained: u32 },
}

/// Per-round player state, owned by the caller
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PlayerState {
    pub position: Cell,
    pub score: u32,
    /// Cells whose reward has already been credited this round
    pub visited: HashSet<Cell>,
}

impl PlayerState {
    pub fn new(position: Cell) -> Self {
        Self {
            position,
            score: 0,
            visited: HashSet::new(),
        }
    }

    /// Apply one directional input
    ///
    /// Moves if the target is inside the playable grid and no wall blocks
    /// the way. Entering a cell for the first time this round credits its
    /// reward and zeroes it in `points`; later visits credit nothing.
    pub fn step(
        &mut self,
        lattice: &WallLattice,
        points: &mut PointsMap,
        direction: Direction,
    ) -> Result<MoveOutcome, MazeError> {
        let (position, score, outcome) = move_player(
            lattice,
            self.position,
            direction,
            &mut self.visited,
            points,
            self.score,
        )?;
        self.position = position;
        self.score = score;
        Ok(outcome)
    }
}

/// Movement with the session state spelled out
///
/// Returns the new position, the new score and what happened. `visited` and
/// `points` are updated in place when a reward is collected.
pub fn move_player(
    lattice: &WallLattice,
    cell: Cell,
    direction: Direction,
    visited: &mut HashSet<Cell>,
    points: &mut PointsMap,
    score: u32,
) -> Result<(Cell, u32, MoveOutcome), MazeError> {
    let open = can_move(lattice, cell, direction)?;
    let target = cell
        .step(direction)
        .filter(|target| lattice.grid().in_bounds(*target));

    let Some(target) = target.filter(|_| open) else {
        return Ok((cell, score, MoveOutcome::Blocked));
    };

    let mut gained = 0;
    if visited.insert(target) {
        gained = points.collect(target);
        info!("Player gained {} points at {}", gained, target);
    }
    Ok((
        target,
        score + gained,
        MoveOutcome::Moved { to: target, gained },
    ))
}
