//! Game engine logic and state management.
//!
//! This module drives a game on top of the core data structures:
//!
//! - [`WinDetector`] - Four-in-a-row search over a [`Board`](crate::Board)
//! - [`GameEngine`] - Turn order, move application and the instructional message
//! - [`GameSnapshot`] - Serializable, read-only copy of what a renderer shows
//! - [`SharedGameEngine`] - Mutex-guarded engine for hosts with several threads
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`] with two players; the first player moves first
//! 2. The input layer calls [`GameEngine::play_column`] once per move command
//! 3. The token drops, the board is scanned, and the turn passes to the other
//!    player unless the move won the game or filled the board
//! 4. The renderer reads the board, message and game-over flag at its own pace
//!
//! Rejected moves (bad column, full column) leave the board and turn alone and
//! only update the message. Once the game is over every move is ignored.
//!
//! # Example
//!
//! ```
//! use connect_four_engine::GameEngine;
//!
//! let mut engine = GameEngine::default();
//! assert_eq!(engine.message(), "Player 1's turn!");
//!
//! engine.play_column(3).unwrap();
//! assert_eq!(engine.message(), "Player 2's turn!");
//!
//! assert!(engine.play_column(-1).is_err());
//! assert_eq!(engine.message(), "Bad move. Can't play in that column");
//! ```

pub use self::{game_engine::*, shared::*, snapshot::*, win_detector::*};

mod game_engine;
mod shared;
mod snapshot;
mod win_detector;
