//! Game loop thread. Ticks the engine at the configured rate.
//!
//! Client commands arrive via `mpsc` and are applied as soon as they are
//! received, between ticks. Each tick integrates the wall-clock time since
//! the previous one started. Everything the engine emits goes to the
//! outbound sender.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use arena_core::state::Outbound;
use arena_sim::engine::SimulationEngine;

use crate::state::LoopCommand;

/// Duration of one tick at `tick_rate` Hz.
pub fn tick_period(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread that takes ownership of `engine`.
///
/// Returns the command sender for the transport side and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    outbound_tx: mpsc::Sender<Outbound>,
) -> (mpsc::Sender<LoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, outbound_tx))
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown, until the command channel
/// disconnects, or until nobody is listening for output.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    outbound_tx: mpsc::Sender<Outbound>,
) {
    let period = tick_period(engine.config().arena.tick_rate);
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick + period;
    log::info!("game loop started at {:?} per tick", period);

    loop {
        // 1. Apply commands until the deadline
        loop {
            let now = Instant::now();
            if now >= next_tick_time {
                break;
            }
            match cmd_rx.recv_timeout(next_tick_time - now) {
                Ok(LoopCommand::Client(cmd)) => {
                    if !forward(&outbound_tx, engine.handle_command(cmd)) {
                        return;
                    }
                }
                Ok(LoopCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                    log::info!("game loop stopping after {} ticks", engine.tick_count());
                    return;
                }
                Err(RecvTimeoutError::Timeout) => break,
            }
        }

        // 2. Advance by the real elapsed time
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;
        if !forward(&outbound_tx, engine.tick(elapsed_ms)) {
            return;
        }

        // 3. Schedule the next deadline
        next_tick_time += period;
        let now = Instant::now();
        if now > next_tick_time && now - next_tick_time > period * 2 {
            // Too far behind, skip the missed deadlines
            log::warn!(
                "game loop fell {:?} behind, resetting schedule",
                now - next_tick_time
            );
            next_tick_time = now;
        }
    }
}

/// Send every message. Returns false once the receiver is gone.
fn forward(outbound_tx: &mpsc::Sender<Outbound>, messages: Vec<Outbound>) -> bool {
    for message in messages {
        if outbound_tx.send(message).is_err() {
            log::info!("outbound channel closed, stopping game loop");
            return false;
        }
    }
    true
}
