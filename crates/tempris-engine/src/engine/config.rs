use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Startup parameters for a game session.
///
/// Every value here is configuration, not a constant: the defaults mirror
/// the conventional setup (20x10 grid, 500 ms gravity tick, five-minute
/// limit, 10 000-point goal) but hosts may pass anything non-degenerate.
///
/// The tick period is part of the timer contract: the session derives its
/// clock from the number of ticks delivered, so the host must drive
/// [`crate::GameSession::tick`] on exactly this period for elapsed time to
/// track wall time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameConfig {
    /// Grid height in rows.
    pub rows: usize,
    /// Grid width in columns.
    pub cols: usize,
    /// Period at which the host delivers gravity ticks.
    pub tick_period: Duration,
    /// Elapsed-time limit; reaching it short of the goal loses the session.
    pub time_limit: Duration,
    /// Score at which the session ends in a win.
    pub goal_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            tick_period: Duration::from_millis(500),
            time_limit: Duration::from_secs(300),
            goal_score: 10_000,
        }
    }
}
