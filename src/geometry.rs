//! Grid geometry: cells, directions and bounds

use std::fmt;

/// Location in the bordered grid
///
/// Row 0, column 0 and the last row/column form the impassable border;
/// playable cells start at (1, 1).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell in `direction`, `None` if it would have a negative
    /// coordinate.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        Some(Cell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Direction leading to an adjacent `other`
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| self.step(*dir) == Some(other))
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

/// One side of a cell
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Movement direction
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in neighbour enumeration order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row delta, column delta)
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Wall on the source cell blocking this direction, and the matching
    /// wall on the destination cell.
    pub const fn walls(self) -> (Side, Side) {
        match self {
            Direction::Up => (Side::Top, Side::Bottom),
            Direction::Down => (Side::Bottom, Side::Top),
            Direction::Left => (Side::Left, Side::Right),
            Direction::Right => (Side::Right, Side::Left),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse one move character: `U`, `D`, `L` or `R`, case insensitive
    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Bordered grid around an inner playable area of `inner_rows` x `inner_cols`
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Grid {
    inner_rows: usize,
    inner_cols: usize,
}

impl Grid {
    pub const fn new(inner_rows: usize, inner_cols: usize) -> Self {
        Self {
            inner_rows,
            inner_cols,
        }
    }

    pub const fn inner_rows(&self) -> usize {
        self.inner_rows
    }

    pub const fn inner_cols(&self) -> usize {
        self.inner_cols
    }

    /// Total rows, border included
    pub const fn rows(&self) -> usize {
        self.inner_rows + 2
    }

    /// Total columns, border included
    pub const fn cols(&self) -> usize {
        self.inner_cols + 2
    }

    /// Is the cell playable, i.e. strictly inside the border
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (1..=self.inner_rows).contains(&cell.row) && (1..=self.inner_cols).contains(&cell.col)
    }

    /// Is the cell part of the bordered grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Playable cells, row by row
    pub fn inner_cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.inner_cols;
        (1..=self.inner_rows).flat_map(move |row| (1..=cols).map(move |col| Cell { row, col }))
    }

    /// In-bounds neighbours of `cell`, in [Direction::ALL] order
    pub fn neighbors(&self, cell: Cell) -> Vec<(Direction, Cell)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| cell.step(dir).map(|next| (dir, next)))
            .filter(|(_, next)| self.in_bounds(*next))
            .collect()
    }

    /// Carving starts from the first inner cell
    pub const fn start_cell(&self) -> Cell {
        Cell::new(1, 1)
    }

    /// Start and end must be strictly farther apart than this
    pub const fn selection_threshold(&self) -> usize {
        (self.inner_rows + self.inner_cols) / 2
    }

    /// Do `a` and `b` satisfy the start/end placement rules
    ///
    /// Not on the same row or column, not on a diagonal, and the Manhattan
    /// distance exceeds [Self::selection_threshold].
    pub fn is_valid_endpoint_pair(&self, a: Cell, b: Cell) -> bool {
        let dr = a.row.abs_diff(b.row);
        let dc = a.col.abs_diff(b.col);
        dr != 0 && dc != 0 && dr != dc && dr + dc > self.selection_threshold()
    }

    /// Could any two cells of this grid be placed as start and end
    pub fn admits_endpoints(&self) -> bool {
        if self.inner_rows == 0 || self.inner_cols == 0 {
            return false;
        }
        let threshold = self.selection_threshold();
        (1..self.inner_rows)
            .any(|dr| (1..self.inner_cols).any(|dc| dr != dc && dr + dc > threshold))
    }
}
