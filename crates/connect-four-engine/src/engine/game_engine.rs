use tracing::{debug, info, instrument};

use crate::{
    DropError, MoveError,
    core::{Board, Cell, Player, PlayerId, Position, TokenColor},
};

use super::{
    snapshot::GameSnapshot,
    win_detector::{WinDetector, WinningLine},
};

pub const INVALID_COLUMN_MESSAGE: &str = "Bad move. Can't play in that column";
pub const COLUMN_FULL_MESSAGE: &str = "Can't play this column because it is full";
pub const GAME_OVER_MESSAGE: &str = "Game over!";

fn turn_message(player: &Player) -> String {
    format!("{}'s turn!", player.name())
}

fn win_message(player: &Player) -> String {
    format!("{} won!", player.name())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    InProgress,
    /// Terminal. `winner` is `None` when the board filled up without a line.
    Over { winner: Option<PlayerId> },
}

/// Turn and outcome bookkeeping.
///
/// The winner is always decided before the full-board flag, so a board that
/// fills up with a winning move reports the win, and `is_board_full` stays
/// `false` in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    current_player: PlayerId,
    winning_line: Option<WinningLine>,
    is_board_full: bool,
    message: String,
}

impl GameState {
    fn new(first: &Player) -> Self {
        Self {
            current_player: PlayerId::First,
            winning_line: None,
            is_board_full: false,
            message: turn_message(first),
        }
    }

    #[must_use]
    pub const fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winning_line.map(|line| line.player())
    }

    #[must_use]
    pub const fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    #[must_use]
    pub const fn is_board_full(&self) -> bool {
        self.is_board_full
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.winning_line.is_some() || self.is_board_full
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.is_game_over() {
            GameStatus::Over {
                winner: self.winner(),
            }
        } else {
            GameStatus::InProgress
        }
    }
}

/// Where an accepted move landed and what it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub player: PlayerId,
    pub status: GameStatus,
}

/// A cell as a renderer sees it, with its occupant resolved to a [`Player`].
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    cell: Cell,
    player: Option<&'a Player>,
    is_winning: bool,
}

impl<'a> CellView<'a> {
    #[must_use]
    pub const fn position(&self) -> Position {
        self.cell.position()
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.cell.column()
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.cell.row()
    }

    #[must_use]
    pub const fn occupant(&self) -> Option<PlayerId> {
        self.cell.occupant()
    }

    #[must_use]
    pub const fn player(&self) -> Option<&'a Player> {
        self.player
    }

    #[must_use]
    pub fn color(&self) -> Option<TokenColor> {
        self.player.map(Player::color)
    }

    /// Whether the cell is part of the winning line.
    #[must_use]
    pub const fn is_winning(&self) -> bool {
        self.is_winning
    }
}

/// Two-player Connect Four game.
///
/// The engine owns both players, the board and the [`GameState`]. Its only
/// mutator is [`play_column`](Self::play_column); everything else is a
/// read-only view for renderers.
#[derive(Debug, Clone)]
pub struct GameEngine {
    players: [Player; 2],
    board: Board,
    state: GameState,
    moves_played: usize,
}

impl Default for GameEngine {
    fn default() -> Self {
        let [first, second] = Player::default_pair();
        Self::new(first, second)
    }
}

impl GameEngine {
    #[must_use]
    pub fn new(first: Player, second: Player) -> Self {
        let state = GameState::new(&first);
        Self {
            players: [first, second],
            board: Board::new(),
            state,
            moves_played: 0,
        }
    }

    #[must_use]
    pub const fn players(&self) -> &[Player; 2] {
        &self.players
    }

    #[must_use]
    pub const fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.state.message()
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[must_use]
    pub const fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    #[must_use]
    pub const fn winning_line(&self) -> Option<&WinningLine> {
        self.state.winning_line()
    }

    /// Number of tokens placed so far.
    #[must_use]
    pub const fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Iterates over every cell in board storage order (column-major, top to bottom).
    pub fn cells(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        let winning_line = self.state.winning_line();
        self.board.cells().map(move |cell| CellView {
            cell,
            player: cell.occupant().map(|id| self.player(id)),
            is_winning: winning_line.is_some_and(|line| line.contains(cell.position())),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Plays the current player's token into `column`.
    ///
    /// - After the game is over, the call is ignored and the message is kept.
    /// - A column outside the board or a full column sets the matching message;
    ///   the board and the turn are unchanged.
    /// - Otherwise the token drops and the board is scanned: a line ends the
    ///   game with a winner, a full board ends it without one, and anything else
    ///   passes the turn to the other player.
    #[instrument(level = "debug", skip(self), fields(player = ?self.state.current_player))]
    pub fn play_column(&mut self, column: isize) -> Result<Placement, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }

        let Some(index) = usize::try_from(column)
            .ok()
            .filter(|&index| index < Board::WIDTH)
        else {
            return Err(self.reject(MoveError::InvalidColumn { column }));
        };

        let player = self.state.current_player;
        let row = self
            .board
            .drop_token(index, player)
            .map_err(|error: DropError| self.reject(error.into()))?;
        self.moves_played += 1;
        let position = Position::new(index, row);
        debug!(?position, moves_played = self.moves_played, "token placed");

        let scan = WinDetector::scan(&self.board);
        if let Some(line) = scan.winning_line {
            self.state.winning_line = Some(line);
            self.state.message = win_message(self.player(line.player()));
            info!(winner = self.player(line.player()).name(), direction = ?line.direction(), "game won");
        } else if scan.is_board_full {
            self.state.is_board_full = true;
            self.state.message = GAME_OVER_MESSAGE.to_owned();
            info!(moves_played = self.moves_played, "board full, game drawn");
        } else {
            self.state.current_player = player.other();
            self.state.message = turn_message(self.player(self.state.current_player));
        }

        Ok(Placement {
            position,
            player,
            status: self.status(),
        })
    }

    fn reject(&mut self, error: MoveError) -> MoveError {
        debug!(%error, "move rejected");
        match error {
            MoveError::InvalidColumn { .. } => {
                self.state.message = INVALID_COLUMN_MESSAGE.to_owned();
            }
            MoveError::ColumnFull { .. } => {
                self.state.message = COLUMN_FULL_MESSAGE.to_owned();
            }
            MoveError::GameOver => {}
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    const DRAW: [isize; 42] = [
        0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 4, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4,
        5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    ];

    fn engine_ab() -> GameEngine {
        GameEngine::new(
            Player::new("A", TokenColor::Red),
            Player::new("B", TokenColor::Yellow),
        )
    }

    fn play_all(engine: &mut GameEngine, columns: &[isize]) {
        for &column in columns {
            engine.play_column(column).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = engine_ab();
        assert_eq!(engine.current_player(), PlayerId::First);
        assert_eq!(engine.message(), "A's turn!");
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(!engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.moves_played(), 0);
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_first_move_lands_at_bottom() {
        let mut engine = engine_ab();
        let placement = engine.play_column(0).unwrap();

        assert_eq!(placement.position, Position::new(0, 5));
        assert_eq!(placement.player, PlayerId::First);
        assert_eq!(placement.status, GameStatus::InProgress);
        assert_eq!(
            engine.board().occupant(Position::new(0, 5)),
            Some(PlayerId::First)
        );
        assert_eq!(engine.current_player(), PlayerId::Second);
        assert_eq!(engine.message(), "B's turn!");
    }

    #[test]
    fn test_full_column_keeps_turn() {
        let mut engine = engine_ab();
        play_all(&mut engine, &[0, 0, 0, 0, 0, 0]);
        let board = engine.board().clone();
        let player = engine.current_player();

        assert_eq!(
            engine.play_column(0),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(engine.message(), COLUMN_FULL_MESSAGE);
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.current_player(), player);
        assert_eq!(engine.moves_played(), 6);

        // A valid move afterwards resumes the normal message.
        engine.play_column(1).unwrap();
        assert_eq!(engine.message(), "B's turn!");
    }

    #[test]
    fn test_invalid_columns_are_rejected() {
        let mut engine = engine_ab();
        for column in [-1, 7, 99, isize::MIN, isize::MAX] {
            assert_eq!(
                engine.play_column(column),
                Err(MoveError::InvalidColumn { column })
            );
            assert_eq!(engine.message(), INVALID_COLUMN_MESSAGE);
            assert_eq!(engine.board(), &Board::new());
            assert_eq!(engine.current_player(), PlayerId::First);
            assert_eq!(engine.status(), GameStatus::InProgress);
        }
    }

    #[test]
    fn test_horizontal_win_ends_game() {
        let mut engine = engine_ab();
        // A takes the bottom row 0..=3 while B stacks on top of A's tokens.
        play_all(&mut engine, &[0, 0, 1, 1, 2, 2]);
        assert!(!engine.is_game_over());
        assert_eq!(engine.message(), "A's turn!");

        let placement = engine.play_column(3).unwrap();
        assert_eq!(placement.position, Position::new(3, 5));
        assert_eq!(
            placement.status,
            GameStatus::Over {
                winner: Some(PlayerId::First)
            }
        );
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(PlayerId::First));
        assert_eq!(engine.message(), "A won!");
        // The winner keeps the turn; it no longer advances.
        assert_eq!(engine.current_player(), PlayerId::First);
        assert!(!engine.state().is_board_full());

        let line = engine.winning_line().unwrap();
        assert_eq!(
            line.positions(),
            &[
                Position::new(0, 5),
                Position::new(1, 5),
                Position::new(2, 5),
                Position::new(3, 5),
            ]
        );
    }

    #[test]
    fn test_vertical_win_for_second_player() {
        let mut engine = engine_ab();
        play_all(&mut engine, &[0, 6, 1, 6, 0, 6, 1]);
        let placement = engine.play_column(6).unwrap();
        assert_eq!(placement.player, PlayerId::Second);
        assert_eq!(engine.winner(), Some(PlayerId::Second));
        assert_eq!(engine.message(), "B won!");
    }

    #[test]
    fn test_diagonal_win() {
        let mut engine = engine_ab();
        // A builds (0,5) (1,4) (2,3) (3,2).
        play_all(&mut engine, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6]);
        assert!(!engine.is_game_over());
        engine.play_column(3).unwrap();
        assert_eq!(engine.winner(), Some(PlayerId::First));
        let line = engine.winning_line().unwrap();
        assert!(line.contains(Position::new(0, 5)));
        assert!(line.contains(Position::new(3, 2)));
    }

    #[test]
    fn test_moves_after_game_over_are_ignored() {
        let mut engine = engine_ab();
        play_all(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);
        let board = engine.board().clone();

        for column in [4, 0, -1, 99] {
            assert_eq!(engine.play_column(column), Err(MoveError::GameOver));
            assert_eq!(engine.message(), "A won!");
            assert_eq!(engine.board(), &board);
            assert!(engine.is_game_over());
        }
        assert_eq!(engine.moves_played(), 7);
    }

    #[test]
    fn test_draw_when_board_fills() {
        let mut engine = engine_ab();
        let (last, rest) = DRAW.split_last().unwrap();
        play_all(&mut engine, rest);
        assert!(!engine.is_game_over());

        let placement = engine.play_column(*last).unwrap();
        assert_eq!(placement.status, GameStatus::Over { winner: None });
        assert!(engine.is_game_over());
        assert!(engine.state().is_board_full());
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.message(), GAME_OVER_MESSAGE);
        assert_eq!(engine.moves_played(), 42);
        assert_eq!(engine.play_column(0), Err(MoveError::GameOver));
        assert_eq!(engine.message(), GAME_OVER_MESSAGE);
    }

    #[test]
    fn test_cells_resolve_players_and_winning_line() {
        let mut engine = engine_ab();
        play_all(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);

        let bottom_left = engine.cells().find(|cell| cell.position() == Position::new(0, 5)).unwrap();
        assert_eq!(bottom_left.occupant(), Some(PlayerId::First));
        assert_eq!(bottom_left.player().map(Player::name), Some("A"));
        assert_eq!(bottom_left.color(), Some(TokenColor::Red));
        assert!(bottom_left.is_winning());

        let above = engine.cells().find(|cell| cell.position() == Position::new(0, 4)).unwrap();
        assert_eq!(above.color(), Some(TokenColor::Yellow));
        assert!(!above.is_winning());

        let winning = engine.cells().filter(CellView::is_winning).count();
        assert_eq!(winning, 4);
        let empty = engine.cells().filter(|cell| cell.player().is_none()).count();
        assert_eq!(empty, Board::WIDTH * Board::HEIGHT - 7);
    }

    fn assert_gravity(board: &Board) {
        for column in 0..Board::WIDTH {
            let height = board.column_height(column);
            for row in 0..Board::HEIGHT {
                let occupied = board.occupant(Position::new(column, row)).is_some();
                assert_eq!(
                    occupied,
                    row >= Board::HEIGHT - height,
                    "gap in column {column}: {board:?}"
                );
            }
        }
    }

    fn assert_write_once(before: &Board, after: &Board) {
        for cell in before.cells() {
            if let Some(occupant) = cell.occupant() {
                assert_eq!(after.occupant(cell.position()), Some(occupant));
            }
        }
    }

    #[test]
    fn test_random_games_keep_invariants() {
        for seed in 0..500 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut engine = engine_ab();
            let mut was_over = false;

            for _ in 0..120 {
                let column = isize::from(rng.random_range(-2i8..9));
                let board = engine.board().clone();
                let player = engine.current_player();
                let message = engine.message().to_owned();
                let moves_played = engine.moves_played();

                let result = engine.play_column(column);

                assert_write_once(&board, engine.board());
                assert_gravity(engine.board());
                if was_over {
                    assert_eq!(result, Err(MoveError::GameOver));
                    assert!(engine.is_game_over());
                    assert_eq!(engine.board(), &board);
                    assert_eq!(engine.message(), message);
                    continue;
                }

                match result {
                    Ok(placement) => {
                        assert_eq!(placement.player, player);
                        assert_eq!(engine.moves_played(), moves_played + 1);
                        assert_eq!(engine.board().occupied_count(), board.occupied_count() + 1);
                        match placement.status {
                            GameStatus::InProgress => {
                                assert_eq!(engine.current_player(), player.other());
                                assert_eq!(WinDetector::find_winner(engine.board()), None);
                            }
                            GameStatus::Over { winner: Some(winner) } => {
                                assert_eq!(winner, player);
                                // The line did not exist before this token.
                                assert_eq!(WinDetector::find_winner(&board), None);
                                let line = engine.winning_line().unwrap();
                                assert!(line.contains(placement.position));
                            }
                            GameStatus::Over { winner: None } => {
                                assert!(engine.board().is_full());
                            }
                        }
                    }
                    Err(error) => {
                        assert!(error.is_invalid_column() || error.is_column_full());
                        assert_eq!(engine.board(), &board);
                        assert_eq!(engine.current_player(), player);
                        assert_eq!(engine.moves_played(), moves_played);
                    }
                }
                was_over = engine.is_game_over();
            }
        }
    }
}
