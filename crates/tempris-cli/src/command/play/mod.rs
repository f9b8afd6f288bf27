use std::time::Duration;

use tempris_engine::{GameConfig, GameSession, SourceSeed};

use self::app::PlayApp;

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Grid width in columns
    #[clap(long, default_value_t = 10)]
    width: usize,
    /// Grid height in rows
    #[clap(long, default_value_t = 20)]
    height: usize,
    /// Gravity tick period in milliseconds
    #[clap(long, default_value_t = 500)]
    tick_ms: u64,
    /// Session time limit in seconds
    #[clap(long, default_value_t = 300)]
    time_limit_secs: u64,
    /// Score that ends the session in a win
    #[clap(long, default_value_t = 10_000)]
    goal_score: u32,
    /// Piece sequence seed (32 hex characters); random when omitted
    #[clap(long)]
    seed: Option<SourceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            tick_ms: 500,
            time_limit_secs: 300,
            goal_score: 10_000,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.width > 0 && arg.height > 0,
        "grid dimensions must be non-zero"
    );

    let config = GameConfig {
        rows: arg.height,
        cols: arg.width,
        tick_period: Duration::from_millis(arg.tick_ms),
        time_limit: Duration::from_secs(arg.time_limit_secs),
        goal_score: arg.goal_score,
    };
    let session = match arg.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    };

    let mut app = PlayApp::new(session);
    ratatui_runtime::Runtime::new().run(&mut app)?;

    Ok(())
}
