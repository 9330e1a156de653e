//! Wall lattice over the bordered grid

use crate::error::MazeError;
use crate::geometry::{Cell, Direction, Grid, Side};

/// Four wall flags of a single cell; `true` means the wall is present
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub const SOLID: Walls = Walls {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn clear(&mut self, side: Side) {
        match side {
            Side::Top => self.top = false,
            Side::Bottom => self.bottom = false,
            Side::Left => self.left = false,
            Side::Right => self.right = false,
        }
    }
}

/// Walls of every cell in the bordered grid, stored row by row
///
/// Walls can only be removed pairwise through [WallLattice::carve], so the
/// two sides of an edge always agree.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct WallLattice {
    grid: Grid,
    cells: Vec<Walls>,
}

impl WallLattice {
    /// All walls present on every cell, border included
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![Walls::SOLID; grid.rows() * grid.cols()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn index(&self, cell: Cell) -> Result<usize, MazeError> {
        if self.grid.contains(cell) {
            Ok(cell.row * self.grid.cols() + cell.col)
        } else {
            Err(MazeError::OutOfBoundsQuery {
                row: cell.row,
                col: cell.col,
            })
        }
    }

    /// Walls of `cell`
    pub fn walls(&self, cell: Cell) -> Result<Walls, MazeError> {
        Ok(self.cells[self.index(cell)?])
    }

    /// Is the wall on `side` of `cell` present
    pub fn has_wall(&self, cell: Cell, side: Side) -> Result<bool, MazeError> {
        Ok(self.walls(cell)?.has(side))
    }

    /// Remove the wall between `cell` and its neighbour in `direction`
    ///
    /// Clears the source-side wall on `cell` and the destination-side wall on
    /// the neighbour. Returns the neighbour.
    pub fn carve(&mut self, cell: Cell, direction: Direction) -> Result<Cell, MazeError> {
        let out_of_bounds = MazeError::OutOfBoundsQuery {
            row: cell.row,
            col: cell.col,
        };
        let next = cell.step(direction).ok_or(out_of_bounds)?;
        let a = self.index(cell)?;
        let b = self.index(next)?;

        let (wall_a, wall_b) = direction.walls();
        self.cells[a].clear(wall_a);
        self.cells[b].clear(wall_b);
        Ok(next)
    }

    /// Cells with their walls, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &Walls)> + '_ {
        let cols = self.grid.cols();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, walls)| (Cell::new(i / cols, i % cols), walls))
    }
}
