use std::sync::mpsc;

use arena_core::config::ArenaConfig;
use arena_server::{bridge, game_loop};
use arena_sim::engine::SimulationEngine;

/// First CLI argument, then `ARENA_CONFIG`, then built-in defaults.
fn load_config() -> Result<ArenaConfig, arena_core::config::ConfigError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ARENA_CONFIG").ok());
    match path {
        Some(path) => ArenaConfig::load_from_file(path),
        None => Ok(ArenaConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let (outbound_tx, outbound_rx) = mpsc::channel();
    let (cmd_tx, loop_thread) = game_loop::spawn_game_loop(SimulationEngine::new(config), outbound_tx);

    std::thread::Builder::new()
        .name("arena-stdin".into())
        .spawn(move || bridge::pump_commands(std::io::stdin().lock(), &cmd_tx))
        .expect("Failed to spawn stdin thread");

    if let Err(e) = bridge::drain_outbound(outbound_rx, std::io::stdout().lock()) {
        log::error!("stdout closed: {e}");
    }
    let _ = loop_thread.join();
}
