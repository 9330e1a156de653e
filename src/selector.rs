//! Start and end selection among dead ends

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::geometry::{Cell, Grid};
use crate::graph::MazeGraph;

/// How long to keep sampling start/end candidates
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct SelectionPolicy {
    /// Rejected trials allowed before giving up; `None` samples until a
    /// pair is found.
    pub max_attempts: Option<usize>,
}

impl SelectionPolicy {
    pub const fn bounded(max_attempts: usize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::bounded(10_000)
    }
}

/// Pick start and end among the dead ends of `graph`
///
/// Rejection sampling: draw two distinct dead ends uniformly and accept the
/// first pair that passes [Grid::is_valid_endpoint_pair].
///
/// Returns [MazeError::InvalidConfiguration] if the graph has fewer than two
/// dead ends, and [MazeError::SelectionExhausted] if the attempts of a
/// bounded policy run out. An unbounded policy checks up front that some
/// qualifying pair exists, so it cannot loop forever.
pub fn select<R: Rng + ?Sized>(
    graph: &MazeGraph,
    grid: Grid,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Result<(Cell, Cell), MazeError> {
    let dead_ends = graph.dead_ends();
    if dead_ends.len() < 2 {
        return Err(MazeError::InvalidConfiguration {
            rows: grid.inner_rows(),
            cols: grid.inner_cols(),
            reason: format!("{} dead end(s), need at least 2", dead_ends.len()),
        });
    }

    if policy.max_attempts.is_none() && !has_qualifying_pair(&dead_ends, grid) {
        return Err(MazeError::SelectionExhausted { attempts: 0 });
    }

    let mut attempts = 0;
    loop {
        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(MazeError::SelectionExhausted { attempts });
        }
        attempts += 1;

        let pair: Vec<Cell> = dead_ends.choose_multiple(rng, 2).copied().collect();
        let (start, end) = (pair[0], pair[1]);
        if grid.is_valid_endpoint_pair(start, end) {
            debug!(
                %start,
                %end,
                attempts,
                dead_ends = dead_ends.len(),
                "selected start and end"
            );
            return Ok((start, end));
        }
    }
}

fn has_qualifying_pair(dead_ends: &[Cell], grid: Grid) -> bool {
    dead_ends
        .iter()
        .tuple_combinations()
        .any(|(a, b)| grid.is_valid_endpoint_pair(*a, *b))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{select, SelectionPolicy};
    use crate::carver::carve;
    use crate::error::MazeError;
    use crate::geometry::{Cell, Grid};
    use crate::graph::MazeGraph;
    use crate::walls::WallLattice;

    /// Snake through a 3x5 grid: row 1 left to right, row 2 back, row 3
    /// forward again. Only (1, 1) and (3, 5) are dead ends.
    fn snake() -> MazeGraph {
        let mut order: Vec<Cell> = Vec::new();
        order.extend((1..=5).map(|col| Cell::new(1, col)));
        order.extend((1..=5).rev().map(|col| Cell::new(2, col)));
        order.extend((1..=5).map(|col| Cell::new(3, col)));

        let mut graph = MazeGraph::new();
        for pair in order.windows(2) {
            graph.add_edge(pair[0], pair[1]);
        }
        graph
    }

    #[test]
    fn only_candidate_pair_is_picked_first() {
        let grid = Grid::new(3, 5);
        let graph = snake();
        assert_eq!(graph.dead_ends(), vec![Cell::new(1, 1), Cell::new(3, 5)]);
        assert_eq!(Cell::new(1, 1).manhattan(Cell::new(3, 5)), 6);
        assert_eq!(grid.selection_threshold(), 4);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            // A single attempt suffices
            let (start, end) = select(&graph, grid, SelectionPolicy::bounded(1), &mut rng).unwrap();
            let mut pair = [start, end];
            pair.sort();
            assert_eq!(pair, [Cell::new(1, 1), Cell::new(3, 5)]);
        }
    }

    #[test]
    fn too_few_dead_ends() {
        let grid = Grid::new(3, 3);
        let mut graph = MazeGraph::new();
        graph.add_node(Cell::new(2, 2));
        let mut rng = StdRng::seed_from_u64(0);

        let res = select(&graph, grid, SelectionPolicy::default(), &mut rng);
        assert!(matches!(res, Err(MazeError::InvalidConfiguration { .. })));
    }

    #[test]
    fn unbounded_without_candidates_fails_fast() {
        // Two dead ends on the same row
        let grid = Grid::new(3, 5);
        let mut graph = MazeGraph::new();
        for col in 1..5 {
            graph.add_edge(Cell::new(1, col), Cell::new(1, col + 1));
        }
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            select(&graph, grid, SelectionPolicy::unbounded(), &mut rng),
            Err(MazeError::SelectionExhausted { attempts: 0 })
        );
        assert_eq!(
            select(&graph, grid, SelectionPolicy::bounded(25), &mut rng),
            Err(MazeError::SelectionExhausted { attempts: 25 })
        );
    }

    #[test]
    fn carved_mazes_satisfy_placement_rules() {
        let grid = Grid::new(9, 9);
        let mut found = 0;
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, graph) = carve(WallLattice::new(grid), grid.start_cell(), &mut rng).unwrap();
            let Ok((start, end)) = select(&graph, grid, SelectionPolicy::default(), &mut rng)
            else {
                continue;
            };
            found += 1;

            assert_ne!(start, end);
            assert_eq!(graph.degree(start), 1);
            assert_eq!(graph.degree(end), 1);
            assert_ne!(start.row, end.row);
            assert_ne!(start.col, end.col);
            assert_ne!(start.row.abs_diff(end.row), start.col.abs_diff(end.col));
            assert!(start.manhattan(end) > grid.selection_threshold());
        }
        assert!(found > 0);
    }
}
