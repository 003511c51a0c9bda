use serde::{Deserialize, Serialize};

use crate::core::{Board, Player, PlayerId, Position};

use super::{game_engine::GameEngine, win_detector::WinningLine};

/// Read-only copy of everything a renderer shows, detached from the engine.
///
/// `rows` is row-major with row 0 at the top, so it prints the way the board
/// looks on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: [Player; 2],
    pub current_player: PlayerId,
    pub message: String,
    pub is_game_over: bool,
    pub winner: Option<PlayerId>,
    pub winning_line: Option<WinningLine>,
    pub moves_played: usize,
    pub rows: Vec<Vec<Option<PlayerId>>>,
}

impl GameSnapshot {
    pub(crate) fn capture(engine: &GameEngine) -> Self {
        let board = engine.board();
        let rows = (0..Board::HEIGHT)
            .map(|row| {
                (0..Board::WIDTH)
                    .map(|column| board.occupant(Position::new(column, row)))
                    .collect()
            })
            .collect();
        Self {
            players: engine.players().clone(),
            current_player: engine.current_player(),
            message: engine.message().to_owned(),
            is_game_over: engine.is_game_over(),
            winner: engine.winner(),
            winning_line: engine.winning_line().copied(),
            moves_played: engine.moves_played(),
            rows,
        }
    }

    /// Renders the board as text: `.` for empty, `X` for the first player and
    /// `O` for the second, one line per row.
    #[must_use]
    pub fn board_text(&self) -> String {
        let mut text = String::with_capacity(Board::HEIGHT * (Board::WIDTH + 1));
        for row in &self.rows {
            text.extend(row.iter().map(|slot| match slot {
                None => '.',
                Some(PlayerId::First) => 'X',
                Some(PlayerId::Second) => 'O',
            }));
            text.push('\n');
        }
        text
    }
}
