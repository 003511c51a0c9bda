use std::iter;

use connect_four_engine::{Board, CellView, GameEngine};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

use crate::ui::widgets::style;

#[expect(clippy::cast_possible_truncation)]
const COLUMNS: u16 = Board::WIDTH as u16;
#[expect(clippy::cast_possible_truncation)]
const ROWS: u16 = Board::HEIGHT as u16;
const CURSOR_SYMBOL: &str = "▼";
const DISC_SYMBOL: &str = "██";

/// The board as a grid of colored discs on a dark frame, with a cursor row on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    engine: &'a GameEngine,
    cursor: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    /// Terminal columns per board column.
    pub const CELL_WIDTH: u16 = 4;
    /// Terminal rows per board row.
    pub const CELL_HEIGHT: u16 = 2;

    pub fn new(engine: &'a GameEngine) -> Self {
        Self {
            engine,
            cursor: None,
            block: None,
        }
    }

    /// Shows the drop marker above `column` while the game is running.
    pub fn cursor(self, column: usize) -> Self {
        Self {
            cursor: Some(column),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        COLUMNS * Self::CELL_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        1 + ROWS * Self::CELL_HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Splits `area` into the cursor row and the disc grid.
    fn areas(&self, area: Rect) -> [Rect; 2] {
        let area = self.block.inner_if_some(area);
        let [cursor_row, grid] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(ROWS * Self::CELL_HEIGHT),
        ])
        .areas(area);
        let horizontal =
            Layout::horizontal([Constraint::Length(COLUMNS * Self::CELL_WIDTH)]).flex(Flex::Center);
        let [cursor_row] = cursor_row.layout(&horizontal);
        let [grid] = grid.layout(&horizontal);
        [cursor_row, grid]
    }

    /// Where the disc grid lands when the widget is rendered into `area`.
    ///
    /// Mouse input maps screen columns to board columns relative to this rect.
    pub fn grid_area(&self, area: Rect) -> Rect {
        let [_, grid] = self.areas(area);
        grid
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let [cursor_row, grid] = self.areas(area);

        let columns = Layout::horizontal(
            (0..COLUMNS).map(|_| Constraint::Length(BoardDisplay::CELL_WIDTH)),
        );
        let rows = Layout::vertical((0..ROWS).map(|_| Constraint::Length(BoardDisplay::CELL_HEIGHT)));

        if let Some(cursor) = self.cursor
            && !self.engine.is_game_over()
        {
            let slots = cursor_row.layout::<{ Board::WIDTH }>(&columns);
            if let Some(&slot) = slots.get(cursor) {
                let player = self.engine.player(self.engine.current_player());
                Paragraph::new(CURSOR_SYMBOL)
                    .style(style::player(player.color()))
                    .centered()
                    .render(slot, buf);
            }
        }

        // Cells come column-major, top to bottom; the grid is laid out the same way.
        let grid_cells = grid
            .layout::<{ Board::WIDTH }>(&columns)
            .into_iter()
            .flat_map(|column| column.layout::<{ Board::HEIGHT }>(&rows));
        for (grid_cell, cell) in iter::zip(grid_cells, self.engine.cells()) {
            render_cell(&cell, grid_cell, buf);
        }
    }
}

fn render_cell(cell: &CellView<'_>, area: Rect, buf: &mut Buffer) {
    let style = style::disc(cell.color(), cell.is_winning());
    let symbol = if cell.occupant().is_some() {
        DISC_SYMBOL
    } else {
        ""
    };
    let lines = (0..BoardDisplay::CELL_HEIGHT).map(|_| Line::from(symbol));
    Paragraph::new(Text::from_iter(lines))
        .style(style)
        .centered()
        .render(area, buf);
}
