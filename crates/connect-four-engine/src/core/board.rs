use serde::{Deserialize, Serialize};

use crate::DropError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, player::PlayerId};

/// A (column, row) coordinate on the board.
///
/// Column 0 is the leftmost column, row 0 is the top row and row
/// `Board::HEIGHT - 1` is the bottom row where tokens land first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.column < BOARD_WIDTH && self.row < BOARD_HEIGHT
    }

    /// Returns the position moved by `(dx, dy)`, or `None` if it leaves the board.
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        let moved = Self { column, row };
        moved.is_on_board().then_some(moved)
    }
}

/// A single board cell: its position and optional occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    occupant: Option<PlayerId>,
}

impl Cell {
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.position.row
    }

    #[must_use]
    pub const fn occupant(&self) -> Option<PlayerId> {
        self.occupant
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The 7x6 grid of cells.
///
/// Cells are stored column-major, each column top to bottom. Tokens only ever
/// enter through [`drop_token`](Self::drop_token), which gives two guarantees:
///
/// - **Write-once**: an occupied cell is never changed or cleared.
/// - **Gravity**: the occupied cells of a column form a contiguous run ending at
///   the bottom row.
///
/// # Example
///
/// ```
/// use connect_four_engine::{Board, PlayerId, Position};
///
/// let mut board = Board::new();
/// let row = board.drop_token(3, PlayerId::First).unwrap();
/// assert_eq!(row, Board::HEIGHT - 1);
/// assert_eq!(board.occupant(Position::new(3, row)), Some(PlayerId::First));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [[Option<PlayerId>; BOARD_HEIGHT]; BOARD_WIDTH],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        columns: [[None; BOARD_HEIGHT]; BOARD_WIDTH],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the occupant at `position`.
    ///
    /// Positions off the board read as empty.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<PlayerId> {
        self.columns
            .get(position.column)?
            .get(position.row)
            .copied()
            .flatten()
    }

    /// Returns the cell at `(column, row)`, or `None` if it is off the board.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        let position = Position::new(column, row);
        position.is_on_board().then(|| Cell {
            position,
            occupant: self.columns[column][row],
        })
    }

    /// Iterates over all cells, column by column, each column top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns.iter().enumerate().flat_map(|(column, slots)| {
            slots.iter().enumerate().map(move |(row, &occupant)| Cell {
                position: Position::new(column, row),
                occupant,
            })
        })
    }

    /// Drops a token into `column` and returns the row where it landed.
    ///
    /// The token settles in the lowest empty row. The board is left untouched
    /// when the column is full or out of range.
    pub fn drop_token(&mut self, column: usize, player: PlayerId) -> Result<usize, DropError> {
        let slots = self
            .columns
            .get_mut(column)
            .ok_or(DropError::InvalidColumn { column })?;
        let row = slots
            .iter()
            .rposition(Option::is_none)
            .ok_or(DropError::ColumnFull { column })?;
        slots[row] = Some(player);
        Ok(row)
    }

    /// Returns the number of tokens in `column` (0 for columns off the board).
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        self.columns
            .get(column)
            .map_or(0, |slots| slots.iter().filter(|slot| slot.is_some()).count())
    }

    /// Returns whether `column` has no empty cell left.
    ///
    /// Columns off the board are reported as full.
    #[must_use]
    pub fn is_column_full(&self, column: usize) -> bool {
        self.columns
            .get(column)
            .is_none_or(|slots| slots[0].is_some())
    }

    /// Emits the column indices that can still take a token.
    pub fn available_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::WIDTH).filter(|&column| !self.is_column_full(column))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|cell| !cell.is_empty()).count()
    }

    /// Returns whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        (0..Self::WIDTH).all(|column| self.is_column_full(column))
    }
}
