//! Complete maze round: walls, graph, start, end and rewards

use rand::Rng;
use tracing::{debug, warn};

use crate::carver::carve;
use crate::error::MazeError;
use crate::geometry::{Cell, Grid};
use crate::graph::MazeGraph;
use crate::rewards::{distribute, PointsMap};
use crate::selector::{select, SelectionPolicy};
use crate::walls::WallLattice;

/// Maze generation settings
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct MazeConfig {
    pub inner_rows: usize,
    pub inner_cols: usize,
    pub selection: SelectionPolicy,
    /// Fresh carves allowed after the first one fails start/end selection
    pub max_regenerations: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            inner_rows: 7,
            inner_cols: 7,
            selection: SelectionPolicy::default(),
            max_regenerations: 32,
        }
    }
}

impl MazeConfig {
    pub fn with_dimensions(inner_rows: usize, inner_cols: usize) -> Self {
        Self {
            inner_rows,
            inner_cols,
            ..Self::default()
        }
    }

    /// Same settings, `by` more rows and columns
    pub fn grown(&self, by: usize) -> Self {
        Self {
            inner_rows: self.inner_rows + by,
            inner_cols: self.inner_cols + by,
            ..*self
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.inner_rows, self.inner_cols)
    }

    /// Reject dimensions where no two cells could ever be start and end
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.grid().admits_endpoints() {
            Ok(())
        } else {
            Err(MazeError::InvalidConfiguration {
                rows: self.inner_rows,
                cols: self.inner_cols,
                reason: "grid too small for a start/end pair".to_string(),
            })
        }
    }
}

/// One generated round
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Maze {
    pub grid: Grid,
    pub walls: WallLattice,
    pub graph: MazeGraph,
    pub start: Cell,
    pub end: Cell,
    pub points: PointsMap,
}

impl Maze {
    /// Carve a maze, place start and end, distribute rewards
    ///
    /// If start/end selection gives up, the maze is thrown away and carved
    /// again, at most [MazeConfig::max_regenerations] times. Nothing partial
    /// is returned on error.
    pub fn generate<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Self, MazeError> {
        config.validate()?;
        let grid = config.grid();

        let mut regenerations = 0;
        let (walls, graph, (start, end)) = loop {
            let (walls, graph) = carve(WallLattice::new(grid), grid.start_cell(), rng)?;
            match select(&graph, grid, config.selection, rng) {
                Ok(pair) => break (walls, graph, pair),
                Err(MazeError::SelectionExhausted { attempts })
                    if regenerations < config.max_regenerations =>
                {
                    regenerations += 1;
                    warn!(attempts, regenerations, "no start/end pair found, carving again");
                }
                Err(err) => return Err(err),
            }
        };

        let points = distribute(&graph, start, end, rng);
        debug!(
            rows = grid.inner_rows(),
            cols = grid.inner_cols(),
            %start,
            %end,
            total_points = points.remaining(),
            "generated maze"
        );
        Ok(Maze {
            grid,
            walls,
            graph,
            start,
            end,
            points,
        })
    }

    /// Tree path from start to end
    pub fn solution(&self) -> Option<Vec<Cell>> {
        self.graph.path(self.start, self.end)
    }
}

/// Generate a round of `inner_rows` x `inner_cols` with default policies
pub fn generate<R: Rng + ?Sized>(
    inner_rows: usize,
    inner_cols: usize,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    Maze::generate(&MazeConfig::with_dimensions(inner_rows, inner_cols), rng)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{generate, Maze, MazeConfig};
    use crate::error::MazeError;
    use crate::rewards::{CORRIDOR_REWARDS, DEAD_END_REWARD};
    use crate::selector::SelectionPolicy;

    fn check(maze: &Maze) {
        let grid = maze.grid;
        assert!(maze.graph.is_spanning_tree());
        assert_eq!(maze.graph.node_count(), grid.inner_rows() * grid.inner_cols());

        for cell in grid.inner_cells() {
            for (direction, next) in grid.neighbors(cell) {
                let (a, b) = direction.walls();
                assert_eq!(
                    maze.walls.has_wall(cell, a).unwrap(),
                    maze.walls.has_wall(next, b).unwrap()
                );
            }
        }

        let (start, end) = (maze.start, maze.end);
        assert_ne!(start, end);
        assert_eq!(maze.graph.degree(start), 1);
        assert_eq!(maze.graph.degree(end), 1);
        assert!(grid.is_valid_endpoint_pair(start, end));

        assert!(!maze.points.contains(start));
        assert!(!maze.points.contains(end));
        for (cell, reward) in maze.points.iter() {
            if maze.graph.degree(cell) == 1 {
                assert_eq!(reward, DEAD_END_REWARD);
            } else {
                assert!(CORRIDOR_REWARDS.contains(&reward));
            }
        }
    }

    #[test]
    fn generated_mazes_hold_invariants() {
        for (seed, (rows, cols)) in [(7, 7), (9, 9), (11, 11), (5, 8), (13, 6)]
            .into_iter()
            .enumerate()
        {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            let maze = generate(rows, cols, &mut rng).unwrap();
            assert_eq!(maze.grid.inner_rows(), rows);
            check(&maze);
        }
    }

    #[test]
    fn reproducible_from_seed() {
        let config = MazeConfig::default();
        let a = Maze::generate(&config, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = Maze::generate(&config, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn solution_connects_start_and_end() {
        let maze = generate(7, 7, &mut StdRng::seed_from_u64(5)).unwrap();
        let path = maze.solution().unwrap();
        assert_eq!(path.first(), Some(&maze.start));
        assert_eq!(path.last(), Some(&maze.end));
        assert!(path.len() > maze.grid.selection_threshold());
    }

    #[test]
    fn tiny_grids_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for (rows, cols) in [(3, 3), (2, 2), (1, 10), (0, 5)] {
            assert!(matches!(
                generate(rows, cols, &mut rng),
                Err(MazeError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn exhausted_selection_is_reported_after_regenerations() {
        // Zero attempts can never select anything
        let config = MazeConfig {
            selection: SelectionPolicy::bounded(0),
            max_regenerations: 3,
            ..MazeConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Maze::generate(&config, &mut rng),
            Err(MazeError::SelectionExhausted { attempts: 0 })
        );
    }

    #[test]
    fn grown_keeps_policies() {
        let config = MazeConfig::default().grown(2);
        assert_eq!((config.inner_rows, config.inner_cols), (9, 9));
        assert_eq!(config.max_regenerations, 32);
    }
}
