use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tempris_engine::{GameSession, InputAction, SessionState};

use crate::ui::widgets::SessionDisplay;

/// The single interactive screen: a session plus the pre-game start state.
///
/// The engine session exists from the moment the screen is built, but the
/// clock only matters once the player starts: starting resets the session
/// so the countdown begins at the moment play does.
#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    started: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            started: false,
            is_exiting: false,
        }
    }

    pub fn tick_period(&self) -> Duration {
        self.session.config().tick_period
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn update(&mut self) {
        if self.started {
            self.session.tick();
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };

        if !self.started {
            match key.code {
                KeyCode::Enter => {
                    self.session.reset();
                    self.started = true;
                }
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
            return;
        }

        let is_running = self.session.state().is_running();
        match key.code {
            KeyCode::Left if is_running => _ = self.session.handle_input(InputAction::MoveLeft),
            KeyCode::Right if is_running => _ = self.session.handle_input(InputAction::MoveRight),
            KeyCode::Down if is_running => _ = self.session.handle_input(InputAction::SoftDrop),
            KeyCode::Up if is_running => _ = self.session.handle_input(InputAction::Rotate),
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display =
            SessionDisplay::new(&self.session).show_start_hint(!self.started);

        let help_text = if self.started {
            match self.session.state() {
                SessionState::Running => {
                    "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | R (Restart) | Q (Quit)"
                }
                SessionState::GameOver | SessionState::Cleared => {
                    "Controls: R (Restart) | Q (Quit)"
                }
            }
        } else {
            "Controls: Enter (Start) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }
}
