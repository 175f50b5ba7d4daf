use drive_server::config::SimConfig;
use drive_server::logging::init_logging;
use drive_server::net::{bind, serve_viewers};
use drive_server::state::SimState;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    info!("🚀 Starting drive server...");

    let config = SimConfig::from_env()?;
    let sim = SimState::new(&config)?;
    info!(
        obstacles = sim.obstacles.len(),
        tick_hz = config.tick_hz,
        "🚗 Vehicle spawned at {:?}",
        config.spawn
    );
    let state = Arc::new(Mutex::new(sim));

    // Viewers: key events in, snapshots out
    let listener = bind(&config.bind_addr).await?;
    tokio::spawn(serve_viewers(listener, Arc::clone(&state)));

    // Fixed frame rate; one advance per tick
    let frame = Duration::from_secs_f64(1.0 / config.tick_hz);
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let scheduled = ticker.tick().await;
        if scheduled.elapsed() > frame {
            warn!("running too slow, skipped at least one frame");
        }

        let mut sim = state.lock().await;
        let msg = sim.step();
        sim.broadcast(&msg);
    }
}
