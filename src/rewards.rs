//! Point rewards placed on maze cells

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::Cell;
use crate::graph::MazeGraph;

/// Reward on every dead end other than start and end
pub const DEAD_END_REWARD: u32 = 5;

/// Rewards drawn uniformly for every other cell
pub const CORRIDOR_REWARDS: [u32; 3] = [0, 1, 2];

/// Remaining reward per cell
///
/// Values only ever go down: a collected cell is set to zero.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct PointsMap {
    points: BTreeMap<Cell, u32>,
}

impl PointsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reward at `cell`, 0 if none was assigned
    pub fn get(&self, cell: Cell) -> u32 {
        self.points.get(&cell).copied().unwrap_or(0)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.points.contains_key(&cell)
    }

    pub fn insert(&mut self, cell: Cell, points: u32) {
        self.points.insert(cell, points);
    }

    /// Take the reward at `cell`, leaving zero behind
    pub fn collect(&mut self, cell: Cell) -> u32 {
        match self.points.get_mut(&cell) {
            Some(points) => std::mem::take(points),
            None => 0,
        }
    }

    /// Sum of rewards still on the board
    pub fn remaining(&self) -> u32 {
        self.points.values().sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.points.iter().map(|(cell, points)| (*cell, *points))
    }
}

/// Assign rewards to every graph node except `start` and `end`
///
/// Dead ends get [DEAD_END_REWARD]; all other cells a random pick from
/// [CORRIDOR_REWARDS].
pub fn distribute<R: Rng + ?Sized>(
    graph: &MazeGraph,
    start: Cell,
    end: Cell,
    rng: &mut R,
) -> PointsMap {
    let mut points = PointsMap::new();
    for cell in graph.nodes().filter(|cell| *cell != start && *cell != end) {
        let reward = if graph.degree(cell) == 1 {
            DEAD_END_REWARD
        } else {
            *CORRIDOR_REWARDS.choose(rng).unwrap_or(&0)
        };
        points.insert(cell, reward);
    }
    points
}
