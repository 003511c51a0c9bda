use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{Board, PlayerId, Position};

/// Number of same-player tokens in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// Scan direction of a line, as seen on screen (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Same row, increasing column.
    Right,
    /// Same column, increasing row.
    Down,
    DownRight,
    DownLeft,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::DownRight, Self::DownLeft];

    /// Returns the `(column, row)` step of this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::DownRight => (1, 1),
            Self::DownLeft => (-1, 1),
        }
    }
}

/// Four consecutive cells held by the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    player: PlayerId,
    direction: Direction,
    positions: [Position; WIN_LENGTH],
}

impl WinningLine {
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells of the line, starting from the scan origin.
    #[must_use]
    pub const fn positions(&self) -> &[Position; WIN_LENGTH] {
        &self.positions
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

/// Result of a full board scan.
///
/// `is_board_full` is only a terminal condition when `winning_line` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub winning_line: Option<WinningLine>,
    pub is_board_full: bool,
}

impl Scan {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winning_line.map(|line| line.player())
    }
}

/// Four-in-a-row search over a [`Board`].
///
/// Every occupied cell is tried as the origin of a line in each of the four
/// [`Direction`]s. A line only matches when all of its cells are on the board
/// and held by the origin's owner; cells off the board are a mismatch, not an
/// error.
///
/// # Example
///
/// ```
/// use connect_four_engine::{Board, PlayerId, WinDetector};
///
/// let mut board = Board::new();
/// for column in 0..4 {
///     board.drop_token(column, PlayerId::Second).unwrap();
/// }
/// assert_eq!(WinDetector::find_winner(&board), Some(PlayerId::Second));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WinDetector;

impl WinDetector {
    /// Scans the board in storage order (column-major, top to bottom).
    ///
    /// The first origin with a matching direction decides the winner. The scan
    /// stops there, and `is_board_full` is then taken from the board directly.
    #[must_use]
    pub fn scan(board: &Board) -> Scan {
        let mut is_board_full = true;
        for cell in board.cells() {
            let Some(player) = cell.occupant() else {
                is_board_full = false;
                continue;
            };
            let line = Direction::ALL
                .into_iter()
                .find_map(|direction| line_from(board, cell.position(), direction, player));
            if let Some(line) = line {
                return Scan {
                    winning_line: Some(line),
                    is_board_full: board.is_full(),
                };
            }
        }
        Scan {
            winning_line: None,
            is_board_full,
        }
    }

    #[must_use]
    pub fn find_winner(board: &Board) -> Option<PlayerId> {
        Self::scan(board).winner()
    }

    #[must_use]
    pub fn find_winning_line(board: &Board) -> Option<WinningLine> {
        Self::scan(board).winning_line
    }
}

fn line_from(
    board: &Board,
    origin: Position,
    direction: Direction,
    player: PlayerId,
) -> Option<WinningLine> {
    let (dx, dy) = direction.delta();
    let mut positions = ArrayVec::<Position, WIN_LENGTH>::new();
    let mut position = origin;
    loop {
        if board.occupant(position) != Some(player) {
            return None;
        }
        positions.push(position);
        if positions.is_full() {
            break;
        }
        position = position.offset(dx, dy)?;
    }
    Some(WinningLine {
        player,
        direction,
        positions: positions.into_inner().ok()?,
    })
}
