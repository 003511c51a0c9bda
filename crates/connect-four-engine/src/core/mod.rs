pub use self::{board::*, player::*};

pub(crate) mod board;
pub(crate) mod player;

pub(crate) const BOARD_WIDTH: usize = 7;
pub(crate) const BOARD_HEIGHT: usize = 6;
