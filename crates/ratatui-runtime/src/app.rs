use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for applications executed by [`Runtime::run`].
///
/// The runtime calls the methods from a single thread, so implementations
/// can hold plain mutable state.
pub trait App {
    /// Called once before the event loop starts. Use this to configure the
    /// runtime's tick interval and render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the event loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, mouse, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances application logic by one tick.
    fn update(&mut self, runtime: &mut Runtime);

    /// Renders the current state.
    fn draw(&self, frame: &mut Frame);
}
