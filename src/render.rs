//! Text rendering of a maze

use std::collections::HashSet;

use itertools::Itertools;

use crate::geometry::{Cell, Side};
use crate::maze::Maze;

/// What to draw on top of the walls
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Player marker position
    pub player: Option<Cell>,
    /// Draw dual-graph edges through the openings and a node marker on
    /// empty cells
    pub show_graph: bool,
    /// Mark the tree path from start to end
    pub show_path: bool,
}

const S_PLAYER: char = '@';
const S_START: char = 'S';
const S_END: char = 'E';
const S_PATH: char = '#';
const S_NODE: char = '+';

/// Point ball by value; larger rewards draw bigger
fn point_ball(points: u32) -> char {
    match points {
        0 => ' ',
        1 => '.',
        2 => 'o',
        _ => '*',
    }
}

/// Draw the inner grid as ASCII art
///
/// Each cell is three characters wide, walls are `+`, `-` and `|`. With
/// [RenderOptions::show_graph], carved edges are drawn as `-` and `|`
/// through the gaps and cells without points get a `+`. With
/// [RenderOptions::show_path], cells between start and end show `#`
/// instead of their points.
///
/// ```text
/// +---+---+---+
/// | S   o   . |
/// +---+---+   +
/// | *   .   E |
/// +---+---+---+
/// ```
pub fn render(maze: &Maze, options: &RenderOptions) -> String {
    let grid = maze.grid;
    let wall = |cell: Cell, side: Side| maze.walls.has_wall(cell, side).unwrap_or(true);

    let horizontal = |row: usize, side: Side| -> String {
        let segments = (1..=grid.inner_cols())
            .map(|col| match (wall(Cell::new(row, col), side), options.show_graph) {
                (true, _) => "---",
                (false, true) => " | ",
                (false, false) => "   ",
            })
            .join("+");
        format!("+{}+", segments)
    };

    let path: HashSet<Cell> = if options.show_path {
        maze.solution().unwrap_or_default().into_iter().collect()
    } else {
        HashSet::new()
    };

    let marker = |cell: Cell| -> char {
        if options.player == Some(cell) {
            S_PLAYER
        } else if cell == maze.start {
            S_START
        } else if cell == maze.end {
            S_END
        } else if path.contains(&cell) {
            S_PATH
        } else {
            match point_ball(maze.points.get(cell)) {
                ' ' if options.show_graph => S_NODE,
                ball => ball,
            }
        }
    };

    let mut lines = Vec::with_capacity(grid.inner_rows() * 2 + 1);
    for row in 1..=grid.inner_rows() {
        lines.push(horizontal(row, Side::Top));

        let mut line = String::new();
        for col in 1..=grid.inner_cols() {
            let cell = Cell::new(row, col);
            line.push(match (wall(cell, Side::Left), options.show_graph) {
                (true, _) => '|',
                (false, true) => '-',
                (false, false) => ' ',
            });
            line.push(' ');
            line.push(marker(cell));
            line.push(' ');
        }
        line.push(if wall(Cell::new(row, grid.inner_cols()), Side::Right) {
            '|'
        } else {
            ' '
        });
        lines.push(line);
    }
    lines.push(horizontal(grid.inner_rows(), Side::Bottom));
    lines.iter().join("\n")
}
