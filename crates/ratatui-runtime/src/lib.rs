//! A small event-loop runtime for ratatui applications driven by a fixed
//! logic tick.
//!
//! The runtime multiplexes three event kinds on a single thread: `Tick`
//! (game logic, at a configurable fixed interval), `Render` (drawing, when
//! state changed), and terminal input. Because everything is delivered
//! sequentially from one loop, applications need no internal locking:
//! ticks and input handlers can never run concurrently.
//!
//! An application implements [`App`] and hands itself to [`Runtime::run`];
//! the runtime owns the terminal for the duration of the call and returns
//! when [`App::should_exit`] turns true.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event_loop;
mod runtime;
