//! Game engine logic and state management.
//!
//! This module composes the core data structures into a playable
//! time-attack session:
//!
//! - [`GameConfig`] - Startup parameters (grid size, tick period, time
//!   limit, goal score)
//! - [`PieceSource`] - Seedable random shape generator
//! - [`GameSession`] - The session state machine (grid, falling piece,
//!   score, clock, terminal state)
//!
//! # Game Flow
//!
//! 1. The host builds a [`GameConfig`] and a [`GameSession`]; the first
//!    piece spawns immediately.
//! 2. The host drives [`GameSession::tick`] on the configured period and
//!    forwards player input through [`GameSession::handle_input`].
//! 3. Each tick the falling piece descends one row; when it cannot, it
//!    locks into the grid, full rows are cleared for score, and the next
//!    piece spawns.
//! 4. The session ends when the grid tops out, the time limit expires, or
//!    the goal score is reached. [`GameSession::reset`] starts over.
//!
//! # Example
//!
//! ```
//! use tempris_engine::{GameConfig, GameSession, InputAction};
//!
//! let mut session = GameSession::new(GameConfig::default());
//!
//! session.handle_input(InputAction::MoveLeft);
//! session.tick();
//!
//! assert!(session.state().is_running());
//! assert_eq!(session.score(), 0);
//! ```

pub use self::{config::*, piece_source::*, session::*};

mod config;
mod piece_source;
mod session;
