use connect_four_engine::{GameEngine, GameStatus, PlayerId};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// Instructional message plus a legend of both players' colors.
#[derive(Debug)]
pub struct StatusDisplay<'a> {
    engine: &'a GameEngine,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(engine: &'a GameEngine) -> Self {
        Self { engine }
    }

    pub const HEIGHT: u16 = 2;

    fn message_style(&self) -> Style {
        let highlighted = match self.engine.status() {
            GameStatus::InProgress => Some(self.engine.current_player()),
            GameStatus::Over { winner } => winner,
        };
        match highlighted {
            Some(id) => style::player(self.engine.player(id).color()).add_modifier(Modifier::BOLD),
            None => style::DRAW,
        }
    }

    fn legend(&self) -> Line<'a> {
        let engine = self.engine;
        let spans = PlayerId::ALL.into_iter().flat_map(move |id| {
            let player = engine.player(id);
            let marker = if id == engine.current_player() && !engine.is_game_over() {
                "▶ "
            } else {
                "  "
            };
            [
                Span::styled(marker, style::DEFAULT),
                Span::styled("● ", style::player(player.color())),
                Span::styled(player.name(), style::DEFAULT),
                Span::raw("   "),
            ]
        });
        Line::from_iter(spans)
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = Line::styled(self.engine.message(), self.message_style());
        let text = Text::from(vec![message, self.legend()]).centered();
        Paragraph::new(text).style(style::DEFAULT).render(area, buf);
    }
}
