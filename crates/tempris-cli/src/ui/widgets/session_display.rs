use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tempris_engine::{GameSession, SessionState};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Full session view: stats panel, play field, and state popups.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_start_hint: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            show_start_hint: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Shows the pre-game start popup instead of a terminal-state popup.
    pub fn show_start_hint(self, show_start_hint: bool) -> Self {
        Self {
            show_start_hint,
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.state() {
            SessionState::Running => Style::new().fg(color::WHITE),
            SessionState::GameOver => Style::new().fg(color::RED),
            SessionState::Cleared => Style::new().fg(color::LIGHT_GREEN),
        };

        let game_board = BoardDisplay::new(self.session.grid())
            .active_piece(self.session.active_piece())
            .block(Block::bordered().border_style(border_style).style(style));
        let session_stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);

        let popup = if self.show_start_hint {
            Some(("PRESS ENTER", Style::new().fg(color::BLACK).bg(color::YELLOW)))
        } else {
            match self.session.state() {
                SessionState::Running => None,
                SessionState::GameOver => {
                    Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
                }
                SessionState::Cleared => Some((
                    "YOU WIN!",
                    Style::new().fg(color::BLACK).bg(color::LIGHT_GREEN),
                )),
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
