use std::fmt;

use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Column the engine falls back to and biases towards.
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Single-character symbol used by board diagrams.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }

    fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '.' | '_' => Some(Cell::Empty),
            'R' | 'r' | 'X' | 'x' => Some(Cell::Red),
            'Y' | 'y' | 'O' | 'o' => Some(Cell::Yellow),
            _ => None,
        }
    }
}

/// The grid. Equality and hashing are over the cell contents only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// Axis steps (row delta, col delta) for horizontal, vertical and both diagonals.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom. Panics off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row in `col`, if any.
    pub fn next_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.next_empty_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// True if the mark at (row, col) is part of a run of four or more.
    /// Coordinates off the board are never a win.
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        if row >= ROWS || col >= COLS {
            return false;
        }
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        AXES.iter().any(|&(dr, dc)| {
            let count = 1 + self.run(row, col, dr, dc, cell) + self.run(row, col, -dr, -dc, cell);
            count >= 4
        })
    }

    /// Count contiguous `cell` marks stepping away from (row, col), exclusive.
    fn run(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Parse a diagram of `ROWS` lines, top row first, using `.`, `R`/`X` and
    /// `Y`/`O`. Whitespace inside a line is ignored.
    pub fn from_diagram(text: &str) -> Result<Board, BoardParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount {
                expected: ROWS,
                found: lines.len(),
            });
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if symbols.len() != COLS {
                return Err(BoardParseError::RowWidth {
                    row,
                    expected: COLS,
                    found: symbols.len(),
                });
            }
            for (col, &ch) in symbols.iter().enumerate() {
                board.cells[row][col] =
                    Cell::from_symbol(ch).ok_or(BoardParseError::BadCell { ch, row, col })?;
            }
        }

        // Gravity: nothing may sit above an empty cell.
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty {
                    return Err(BoardParseError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    #[cfg(test)]
    pub(crate) fn with_sides_swapped(&self) -> Board {
        let mut swapped = *self;
        for cell in swapped.cells.iter_mut().flatten() {
            *cell = match *cell {
                Cell::Red => Cell::Yellow,
                Cell::Yellow => Cell::Red,
                Cell::Empty => Cell::Empty,
            };
        }
        swapped
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let line: String = (0..COLS).map(|col| self.cells[row][col].symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
