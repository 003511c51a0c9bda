use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, status_display::*};

mod board_display;
mod status_display;

mod color {
    use connect_four_engine::TokenColor;
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const NAVY: Color = Color::Rgb(0, 0, 160);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const fn token(color: TokenColor) -> Color {
        match color {
            TokenColor::Red => RED,
            TokenColor::Yellow => YELLOW,
            TokenColor::Green => GREEN,
            TokenColor::Blue => BLUE,
            TokenColor::Magenta => MAGENTA,
            TokenColor::Cyan => CYAN,
        }
    }
}

pub mod style {
    use connect_four_engine::TokenColor;
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const FRAME: Style = fg_bg(color::BLACK, color::NAVY);
    pub const WINNING_FRAME: Style = fg_bg(color::BLACK, color::WHITE);
    pub const DRAW: Style = DEFAULT.add_modifier(Modifier::BOLD);

    pub const fn disc(color: Option<TokenColor>, is_winning: bool) -> Style {
        let frame = if is_winning { WINNING_FRAME } else { FRAME };
        match color {
            Some(color) => frame.fg(color::token(color)),
            None => frame,
        }
    }

    pub const fn player(color: TokenColor) -> Style {
        DEFAULT.fg(color::token(color))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
