//! Maze carving with a randomized depth-first traversal

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::geometry::{Cell, Direction, Grid};
use crate::graph::MazeGraph;
use crate::walls::WallLattice;

/// Traversal frame: a cell and its shuffled neighbours, of which the first
/// `next` have already been considered
struct Frame {
    cell: Cell,
    neighbors: Vec<(Direction, Cell)>,
    next: usize,
}

/// Carve a perfect maze into `walls`, starting at `start`
///
/// `walls` is normally fresh from [WallLattice::new]; its grid bounds the
/// traversal and the carved lattice is handed back with the graph. Walls
/// already open stay open, but the graph only records edges carved here.
///
/// Recursive backtracker, run on an explicit stack so that grid size is not
/// limited by call depth. Entering a cell marks it visited and shuffles its
/// in-bounds neighbours; each unvisited neighbour in that order gets its
/// shared wall removed, an edge in the graph, and is explored fully before
/// the next neighbour is looked at.
///
/// The result is a spanning tree over all inner cells, and the random draws
/// happen in the same order as in the recursive formulation, so a seeded
/// `rng` reproduces the same maze.
pub fn carve<R: Rng + ?Sized>(
    mut walls: WallLattice,
    start: Cell,
    rng: &mut R,
) -> Result<(WallLattice, MazeGraph), MazeError> {
    let grid = walls.grid();
    if !grid.in_bounds(start) {
        return Err(MazeError::OutOfBoundsQuery {
            row: start.row,
            col: start.col,
        });
    }

    let mut graph = MazeGraph::new();
    let mut visited = HashSet::new();
    let mut stack = vec![enter(grid, start, &mut visited, &mut graph, rng)];
    let mut max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&(direction, next)) = frame.neighbors.get(frame.next) else {
            // All neighbours handled, backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;
        if visited.contains(&next) {
            continue;
        }

        let cell = frame.cell;
        walls.carve(cell, direction)?;
        graph.add_edge(cell, next);

        stack.push(enter(grid, next, &mut visited, &mut graph, rng));
        max_depth = max_depth.max(stack.len());
    }

    debug!(
        rows = grid.inner_rows(),
        cols = grid.inner_cols(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        max_depth,
        "carved maze"
    );
    Ok((walls, graph))
}

fn enter<R: Rng + ?Sized>(
    grid: Grid,
    cell: Cell,
    visited: &mut HashSet<Cell>,
    graph: &mut MazeGraph,
    rng: &mut R,
) -> Frame {
    visited.insert(cell);
    graph.add_node(cell);
    let mut neighbors = grid.neighbors(cell);
    neighbors.shuffle(rng);
    Frame {
        cell,
        neighbors,
        next: 0,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::carve;
    use crate::error::MazeError;
    use crate::geometry::{Cell, Direction, Grid};
    use crate::walls::{WallLattice, Walls};

    fn walls(top: bool, bottom: bool, left: bool, right: bool) -> Walls {
        Walls {
            top,
            bottom,
            left,
            right,
        }
    }

    /// A constant zero source turns every shuffle into a rotation by one,
    /// which carves a spiral on the 3x3 grid.
    #[test]
    fn fixed_source_carves_recorded_maze() {
        let grid = Grid::new(3, 3);
        let mut rng = StepRng::new(0, 0);
        let (lattice, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();

        let c = Cell::new;
        let expected_graph: BTreeMap<Cell, Vec<Cell>> = [
            (c(1, 1), vec![c(1, 2)]),
            (c(1, 2), vec![c(1, 1), c(1, 3)]),
            (c(1, 3), vec![c(1, 2), c(2, 3)]),
            (c(2, 1), vec![c(3, 1), c(2, 2)]),
            (c(2, 2), vec![c(2, 1)]),
            (c(2, 3), vec![c(1, 3), c(3, 3)]),
            (c(3, 1), vec![c(3, 2), c(2, 1)]),
            (c(3, 2), vec![c(3, 3), c(3, 1)]),
            (c(3, 3), vec![c(2, 3), c(3, 2)]),
        ]
        .into_iter()
        .collect();
        for (cell, neighbors) in &expected_graph {
            assert_eq!(graph.neighbors(*cell), neighbors.as_slice(), "at {cell}");
        }
        assert_eq!(graph.node_count(), expected_graph.len());

        let expected_walls: BTreeMap<Cell, Walls> = [
            (c(1, 1), walls(true, true, true, false)),
            (c(1, 2), walls(true, true, false, false)),
            (c(1, 3), walls(true, false, false, true)),
            (c(2, 1), walls(true, false, true, false)),
            (c(2, 2), walls(true, true, false, true)),
            (c(2, 3), walls(false, false, true, true)),
            (c(3, 1), walls(false, true, true, false)),
            (c(3, 2), walls(true, true, false, false)),
            (c(3, 3), walls(false, true, false, true)),
        ]
        .into_iter()
        .collect();
        for (cell, w) in lattice.iter() {
            let expected = expected_walls.get(&cell).copied().unwrap_or(Walls::SOLID);
            assert_eq!(*w, expected, "at {cell}");
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let grid = Grid::new(9, 11);
        let carve_seeded = |seed| {
            carve(WallLattice::new(grid), grid.start_cell(), &mut StdRng::seed_from_u64(seed))
        };
        assert_eq!(carve_seeded(42).unwrap(), carve_seeded(42).unwrap());
    }

    #[test]
    fn spans_every_inner_cell() {
        for seed in 0..20 {
            let grid = Grid::new(5 + seed as usize % 4, 6 + seed as usize % 3);
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();

            assert!(graph.is_spanning_tree(), "seed {seed}");
            assert_eq!(graph.node_count(), grid.inner_rows() * grid.inner_cols());
            assert!(graph.nodes().all(|cell| grid.in_bounds(cell)));
        }
    }

    #[test]
    fn walls_match_graph_edges() {
        let grid = Grid::new(8, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let (lattice, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();

        for cell in grid.inner_cells() {
            for (direction, next) in grid.neighbors(cell) {
                let (side_a, side_b) = direction.walls();
                let open_a = !lattice.has_wall(cell, side_a).unwrap();
                let open_b = !lattice.has_wall(next, side_b).unwrap();
                assert_eq!(open_a, open_b, "{cell} -> {next}");
                assert_eq!(open_a, graph.neighbors(cell).contains(&next));
            }
        }
        // Border never carved
        for (cell, w) in lattice.iter() {
            if !grid.in_bounds(cell) {
                assert_eq!(*w, Walls::SOLID, "at {cell}");
            }
        }
        // No opening towards the border either
        for cell in grid.inner_cells() {
            for direction in Direction::ALL {
                let next = cell.step(direction).unwrap();
                if !grid.in_bounds(next) {
                    assert!(lattice.has_wall(cell, direction.walls().0).unwrap());
                }
            }
        }
    }

    #[test]
    fn long_corridors_do_not_overflow() {
        let grid = Grid::new(1, 20_000);
        let mut rng = StdRng::seed_from_u64(1);
        let (_, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 19_999);

        let grid = Grid::new(150, 150);
        let (_, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();
        assert!(graph.is_spanning_tree());
    }

    #[test]
    fn carves_into_given_lattice() {
        let grid = Grid::new(4, 5);
        let mut walls = WallLattice::new(grid);
        // Opening towards the border, never touched by carving
        walls.carve(Cell::new(1, 1), Direction::Up).unwrap();

        let mut rng = StdRng::seed_from_u64(8);
        let (lattice, graph) = carve(walls, grid.start_cell(), &mut rng).unwrap();
        assert_eq!(lattice.grid(), grid);
        assert!(!lattice.has_wall(Cell::new(1, 1), Direction::Up.walls().0).unwrap());
        assert!(!lattice.has_wall(Cell::new(0, 1), Direction::Up.walls().1).unwrap());
        assert!(graph.is_spanning_tree());
        assert_eq!(graph.node_count(), 20);
    }

    #[test]
    fn start_must_be_inside() {
        let grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            carve(WallLattice::new(grid), Cell::new(0, 1), &mut rng),
            Err(MazeError::OutOfBoundsQuery { row: 0, col: 1 })
        );
    }
}
