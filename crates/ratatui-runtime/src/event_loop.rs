use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

/// Events delivered to the runtime's loop.
#[derive(Debug, Clone, derive_more::From)]
pub(crate) enum LoopEvent {
    /// Application logic should advance one step.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// A terminal event such as key input, mouse, or resize.
    Input(event::Event),
}

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render as soon as state changes (a tick or an input event arrived).
    #[default]
    OnDirty,
    /// Render after state changes, but at most once per interval. Events
    /// arriving faster than the interval are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (frames per second).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Timing state for the event loop.
///
/// Tracks when the last tick and render happened and produces the next due
/// event from [`Self::next`]. With no tick interval configured, only input
/// and dirty-renders drive the loop.
#[derive(Debug)]
pub(crate) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(crate) fn new() -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: Instant::now(),
            last_render: None,
            // The first frame must be drawn before anything happens.
            dirty: true,
        }
    }

    /// Sets the tick interval, or disables ticks with `None`.
    ///
    /// The tick clock restarts from now: the first tick fires one full
    /// interval later, never immediately.
    pub(crate) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(crate) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick or render is due or a terminal event
    /// arrives, and returns it.
    pub(crate) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            // Wait for input, but no longer than until the next deadline.
            // With no deadline pending, block on input indefinitely.
            if let Some(timeout) = self.next_deadline_in(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        match self.render_mode {
            RenderMode::OnDirty => true,
            RenderMode::Throttled(interval) => self
                .last_render
                .is_none_or(|at| now.duration_since(at) >= interval),
        }
    }

    fn next_deadline_in(&self, now: Instant) -> Option<Duration> {
        let tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self
                .dirty
                .then(|| self.last_render.map_or(now, |at| at + interval)),
        };
        let deadline = [tick_at, render_at].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}
