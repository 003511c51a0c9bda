pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DropError {
    #[display("column {column} is outside the board")]
    InvalidColumn { column: usize },
    #[display("column {column} is full")]
    ColumnFull { column: usize },
}

/// Reasons a `play_column` request was rejected.
///
/// All of these are recoverable. The engine has already updated its
/// instructional message (except for [`MoveError::GameOver`], which leaves the
/// final message visible) by the time the error is returned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum MoveError {
    #[display("column {column} is outside the board")]
    InvalidColumn { column: isize },
    #[display("column {column} is full")]
    ColumnFull { column: usize },
    #[display("the game is already over")]
    GameOver,
}

impl From<DropError> for MoveError {
    fn from(error: DropError) -> Self {
        match error {
            DropError::InvalidColumn { column } => Self::InvalidColumn {
                column: isize::try_from(column).unwrap_or(isize::MAX),
            },
            DropError::ColumnFull { column } => Self::ColumnFull { column },
        }
    }
}
