use crossterm::event::Event;
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, Runtime};
use tempris_engine::GameSession;

use super::screen::PlayScreen;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            screen: PlayScreen::new(session),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.screen.tick_period()));
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.screen.update();
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
