//! Procedural mazes carved as a dual graph
//!
//! A maze is carved into a bordered grid by a randomized depth-first
//! traversal. The carved edges form a spanning tree over the playable
//! cells; two distant dead ends become start and end, and the remaining
//! cells hold point rewards that a player collects once per round.
//!
//! # Examples
//! ## Generate a round and walk it
//! ```
//! use maze_runner::{generate, Direction, MoveOutcome, PlayerState};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut maze = generate(7, 7, &mut rng).unwrap();
//! assert_eq!(maze.graph.degree(maze.start), 1);
//! assert!(maze.graph.is_spanning_tree());
//!
//! let mut player = PlayerState::new(maze.start);
//! for direction in Direction::ALL {
//!     if let MoveOutcome::Moved { to, .. } =
//!         player.step(&maze.walls, &mut maze.points, direction).unwrap()
//!     {
//!         assert!(maze.graph.neighbors(maze.start).contains(&to));
//!         break;
//!     }
//! }
//! ```
//!
//! ## Draw it
//! ```
//! use maze_runner::{generate, render, RenderOptions};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let maze = generate(4, 5, &mut StdRng::seed_from_u64(1)).unwrap();
//! let text = render(&maze, &RenderOptions::default());
//! assert_eq!(text.lines().count(), 2 * 4 + 1);
//! assert!(text.contains('S') && text.contains('E'));
//! ```

pub mod carver;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod maze;
pub mod movement;
pub mod render;
pub mod rewards;
pub mod selector;
pub mod session;
pub mod walls;

pub use carver::carve;
pub use error::MazeError;
pub use geometry::{Cell, Direction, Grid, Side};
pub use graph::MazeGraph;
pub use maze::{generate, Maze, MazeConfig};
pub use movement::{can_move, move_player, MoveOutcome, PlayerState};
pub use render::{render, RenderOptions};
pub use rewards::{distribute, PointsMap};
pub use selector::{select, SelectionPolicy};
pub use session::{Session, SessionConfig, StepOutcome};
pub use walls::{WallLattice, Walls};
