use std::{io, time::Duration};

use crate::{
    App,
    event_loop::{EventLoop, LoopEvent, RenderMode},
};

/// TUI application runtime.
///
/// Owns the event loop and executes an [`App`]: ticks call
/// [`App::update`], renders call [`App::draw`], and terminal events go to
/// [`App::handle_event`], all serialized on the calling thread.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a runtime with no tick interval and dirty-driven rendering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
        }
    }

    /// Sets the logic tick interval; `None` disables ticks. The first tick
    /// fires one full interval after this call.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// Calls `app.init()` first, then enters the event loop inside a
    /// ratatui terminal session.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick => app.update(&mut self),
                    LoopEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    LoopEvent::Input(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
