use std::{cell::Cell, time::Duration};

use connect_four_engine::{Board, GameEngine, Player};
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::Block,
};
use tracing::{debug, info};

use crate::{
    command::play::input::{self, PendingInput},
    tui::{App, RenderMode, Runtime},
    ui::widgets::{BoardDisplay, StatusDisplay, style},
};

const CENTER_COLUMN: usize = Board::WIDTH / 2;
const HELP_HEIGHT: u16 = 2;

/// Interactive game: keyboard and mouse feed a single pending column, and
/// every tick applies at most one of them to the engine.
#[derive(Debug)]
pub struct PlayApp {
    players: [Player; 2],
    engine: GameEngine,
    pending: PendingInput,
    cursor: usize,
    tick_interval: Duration,
    render_mode: RenderMode,
    /// Disc grid position from the last draw, used to map mouse clicks.
    grid_area: Cell<Rect>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(players: [Player; 2], tick_interval: Duration, render_mode: RenderMode) -> Self {
        let engine = new_engine(&players);
        Self {
            players,
            engine,
            pending: PendingInput::default(),
            cursor: CENTER_COLUMN,
            tick_interval,
            render_mode,
            grid_area: Cell::new(Rect::default()),
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn restart(&mut self) {
        info!("starting a new game");
        self.engine = new_engine(&self.players);
        self.pending.clear();
        self.cursor = CENTER_COLUMN;
    }

    fn queue(&mut self, column: isize) {
        if self.engine.is_game_over() {
            return;
        }
        if let Some(replaced) = self.pending.set(column) {
            debug!(replaced, column, "pending input replaced");
        }
    }

    fn handle_input(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event() {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(column) = input::digit_column(c) {
                        self.queue(column);
                    }
                }
                KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
                KeyCode::Right => self.cursor = (self.cursor + 1).min(Board::WIDTH - 1),
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    let column = isize::try_from(self.cursor).unwrap_or(isize::MAX);
                    self.queue(column);
                }
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        } else if let Some(mouse) = event.as_mouse_event()
            && mouse.kind == MouseEventKind::Up(MouseButton::Left)
        {
            let grid = self.grid_area.get();
            let column = input::column_at(mouse.column, grid.x, BoardDisplay::CELL_WIDTH);
            if let Ok(cursor) = usize::try_from(column)
                && cursor < Board::WIDTH
            {
                self.cursor = cursor;
            }
            self.queue(column);
        }
    }

    /// Applies the pending input, if any. Called once per tick.
    fn apply_pending(&mut self) {
        if self.engine.is_game_over() {
            self.pending.clear();
            return;
        }
        let Some(column) = self.pending.take() else {
            return;
        };
        match self.engine.play_column(column) {
            Ok(placement) => debug!(?placement, "move applied"),
            Err(error) => debug!(%error, column, "move rejected"),
        }
    }

    fn help_text(&self) -> [&'static str; 2] {
        if self.engine.is_game_over() {
            ["Controls:", "R (New Game) | Q (Quit)"]
        } else {
            [
                "Controls: Click / 1-7 (Drop) | ← → (Select)",
                "Enter / Space (Drop) | R (New Game) | Q (Quit)",
            ]
        }
    }
}

fn new_engine(players: &[Player; 2]) -> GameEngine {
    let [first, second] = players.clone();
    GameEngine::new(first, second)
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.tick_interval));
        runtime.set_render_mode(self.render_mode);
        runtime.set_mouse_capture(true);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.handle_input(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        let board = BoardDisplay::new(&self.engine).cursor(self.cursor).block(
            Block::bordered()
                .title(Line::from(" Connect Four ").centered())
                .style(style::DEFAULT),
        );
        let status = StatusDisplay::new(&self.engine);
        let help = Text::from_iter(self.help_text()).style(style::HELP).centered();

        let [board_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(StatusDisplay::HEIGHT),
            Constraint::Length(HELP_HEIGHT),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(frame.area());
        let [board_area] = board_area
            .layout(&Layout::horizontal([Constraint::Length(board.width())]).flex(Flex::Center));

        self.grid_area.set(board.grid_area(board_area));
        frame.render_widget(&board, board_area);
        frame.render_widget(&status, status_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.apply_pending();
    }
}
