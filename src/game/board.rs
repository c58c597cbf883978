use crate::error::{MoveError, SetupError};

use super::player::PlayerId;

/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = 64;

/// A (column, row) coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(column: usize, row: usize) -> Self {
        Position { column, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Occupied(PlayerId),
}

impl CellState {
    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

/// One board square. Its position is fixed when the board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    state: CellState,
}

impl Cell {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> CellState {
        self.state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    // row-major
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(rows: usize, columns: usize) -> Result<Self, SetupError> {
        Self::check_dimensions(rows, columns)?;

        let cells = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |column| Cell {
                    position: Position::new(column, row),
                    state: CellState::Empty,
                })
            })
            .collect();

        Ok(Board {
            rows,
            columns,
            cells,
        })
    }

    /// Reject zero-sized or oversized boards
    pub fn check_dimensions(rows: usize, columns: usize) -> Result<(), SetupError> {
        if !(1..=MAX_DIMENSION).contains(&rows) || !(1..=MAX_DIMENSION).contains(&columns) {
            return Err(SetupError::InvalidDimensions { rows, columns });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the state at (column, row), or `None` when off the board
    pub fn get(&self, column: usize, row: usize) -> Option<CellState> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.cells[self.index(column, row)].state)
    }

    /// Iterate over every cell, top row first
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        !matches!(self.get(column, 0), Some(CellState::Empty))
    }

    /// Columns that can still take a piece
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    /// Drop a piece in a column, returns where it landed
    pub fn drop_piece(&mut self, column: usize, player: PlayerId) -> Result<Position, MoveError> {
        if column >= self.columns {
            return Err(MoveError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }

        // Find the lowest empty row in this column
        for row in (0..self.rows).rev() {
            let idx = self.index(column, row);
            if self.cells[idx].state.is_empty() {
                self.cells[idx].state = CellState::Occupied(player);
                return Ok(Position::new(column, row));
            }
        }

        Err(MoveError::ColumnFull(column))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.state.is_empty())
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Empty;
        }
    }

    /// Copy of the grid for a presentation layer
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.clone(),
        }
    }

    fn index(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }
}

/// Read-only view of a board, detached from the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub fn get(&self, column: usize, row: usize) -> Option<CellState> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.columns + column].state)
    }
}
