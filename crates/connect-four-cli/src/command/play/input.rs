/// Single-slot buffer between the input handlers and the game loop.
///
/// Holds at most one column. A newer input replaces an unapplied one, and the
/// game loop takes it on its next tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingInput {
    column: Option<isize>,
}

impl PendingInput {
    /// Stores `column`, returning the input it replaced, if any.
    pub fn set(&mut self, column: isize) -> Option<isize> {
        self.column.replace(column)
    }

    pub fn take(&mut self) -> Option<isize> {
        self.column.take()
    }

    pub fn clear(&mut self) {
        self.column = None;
    }
}

/// Maps a screen x coordinate to a board column:
/// `floor((x - board_left) / cell_width)`.
///
/// Clicks left of the board give negative columns and clicks right of it give
/// columns past the last one; the engine rejects both.
pub fn column_at(x: u16, board_left: u16, cell_width: u16) -> isize {
    let offset = i32::from(x) - i32::from(board_left);
    let column = offset.div_euclid(i32::from(cell_width.max(1)));
    isize::try_from(column).unwrap_or(isize::MIN)
}

/// Maps a digit key to a column: `1` is the leftmost column.
///
/// `0`, `8` and `9` map to columns outside the board.
pub fn digit_column(key: char) -> Option<isize> {
    let digit = key.to_digit(10)?;
    isize::try_from(digit).ok().map(|digit| digit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_input_overwrites_pending() {
        let mut pending = PendingInput::default();
        assert_eq!(pending.set(2), None);
        assert_eq!(pending.set(5), Some(2));
        assert_eq!(pending.take(), Some(5));
        assert_eq!(pending.take(), None);

        pending.set(1);
        pending.clear();
        assert_eq!(pending, PendingInput::default());
    }

    #[test]
    fn test_column_at() {
        // Board drawn from x = 10 with 4-wide cells.
        assert_eq!(column_at(10, 10, 4), 0);
        assert_eq!(column_at(13, 10, 4), 0);
        assert_eq!(column_at(14, 10, 4), 1);
        assert_eq!(column_at(37, 10, 4), 6);
        assert_eq!(column_at(38, 10, 4), 7);
        // Left of the board floors towards negative columns.
        assert_eq!(column_at(9, 10, 4), -1);
        assert_eq!(column_at(5, 10, 4), -2);
        assert_eq!(column_at(0, 0, 0), 0);
    }

    #[test]
    fn test_digit_column() {
        assert_eq!(digit_column('1'), Some(0));
        assert_eq!(digit_column('7'), Some(6));
        assert_eq!(digit_column('9'), Some(8));
        assert_eq!(digit_column('0'), Some(-1));
        assert_eq!(digit_column('x'), None);
    }
}
