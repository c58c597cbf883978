//! Four-in-a-row detection.
//!
//! Every cell is tried as the top (or left) end of a run in each of the four
//! directions. A start is skipped when the run would leave the board, so no
//! direction needs to look backwards.

use super::board::{Board, CellState, Position};
use super::player::PlayerId;

/// Pieces needed in a line to win.
pub const RUN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Downward along a column
    Vertical,
    /// Rightward along a row
    Horizontal,
    /// Down and to the right (\)
    DiagonalRight,
    /// Down and to the left (/)
    DiagonalLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::DiagonalRight,
        Direction::DiagonalLeft,
    ];

    /// Whether a run starting at `start` stays on a `rows` x `columns` board.
    fn fits(self, start: Position, rows: usize, columns: usize) -> bool {
        let fits_down = start.row + RUN_LENGTH <= rows;
        let fits_right = start.column + RUN_LENGTH <= columns;
        let fits_left = start.column >= RUN_LENGTH - 1;
        match self {
            Direction::Vertical => fits_down,
            Direction::Horizontal => fits_right,
            Direction::DiagonalRight => fits_down && fits_right,
            Direction::DiagonalLeft => fits_down && fits_left,
        }
    }

    /// Position `step` cells along this direction. Callers check `fits` first.
    fn step(self, start: Position, step: usize) -> Position {
        match self {
            Direction::Vertical => Position::new(start.column, start.row + step),
            Direction::Horizontal => Position::new(start.column + step, start.row),
            Direction::DiagonalRight => Position::new(start.column + step, start.row + step),
            Direction::DiagonalLeft => Position::new(start.column - step, start.row + step),
        }
    }
}

/// A winning line: its first cell and the direction it extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: Position,
    pub direction: Direction,
}

impl Run {
    pub fn positions(&self) -> [Position; RUN_LENGTH] {
        std::array::from_fn(|i| self.direction.step(self.start, i))
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions().contains(&position)
    }
}

/// Find a run of `player`'s pieces.
///
/// With `last_move` set, only starts within reach of that position are
/// scanned, which finds every run passing through it.
pub fn find_run(board: &Board, player: PlayerId, last_move: Option<Position>) -> Option<Run> {
    let reach = RUN_LENGTH - 1;
    let (rows, columns) = match last_move {
        Some(pos) => (
            pos.row.saturating_sub(reach)..(pos.row + reach + 1).min(board.rows()),
            pos.column.saturating_sub(reach)..(pos.column + reach + 1).min(board.columns()),
        ),
        None => (0..board.rows(), 0..board.columns()),
    };

    for row in rows {
        for column in columns.clone() {
            let start = Position::new(column, row);
            for direction in Direction::ALL {
                if is_run(board, player, start, direction) {
                    return Some(Run { start, direction });
                }
            }
        }
    }
    None
}

/// Check whether `player` has four in a row anywhere on the board
pub fn has_won(board: &Board, player: PlayerId) -> bool {
    find_run(board, player, None).is_some()
}

fn is_run(board: &Board, player: PlayerId, start: Position, direction: Direction) -> bool {
    if !direction.fits(start, board.rows(), board.columns()) {
        return false;
    }
    (0..RUN_LENGTH).all(|i| {
        let pos = direction.step(start, i);
        board.get(pos.column, pos.row) == Some(CellState::Occupied(player))
    })
}
