//! Star Dash entry point
//!
//! Headless driver: runs the simulation with the autopilot and logs the
//! events a real host would forward to its renderer, audio sink, and
//! score display. Pass a JSON config path and an optional seed:
//!
//! ```text
//! star-dash [config.json] [seed]
//! ```

use std::process::ExitCode;

use star_dash::audio::{NullSink, route};
use star_dash::sim::VisualHandle;
use star_dash::{Config, GameEvent, GamePhase, GameState, TickInput, tick};

/// Frame budget for a demo run (about three minutes of play)
const MAX_FRAMES: u64 = 10_000;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("invalid config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut audio = NullSink::default();
    let input = TickInput {
        idle: true,
        ..Default::default()
    };

    for _ in 0..MAX_FRAMES {
        tick(&mut state, &input);

        let events = state.drain_events();
        route(&events, &mut audio);
        for event in &events {
            match *event {
                GameEvent::Spawned { id, category } => {
                    // Stand-in for the async model loader: resolve the
                    // visual immediately and attach it
                    state.attach_visual(id, VisualHandle(id));
                    log::debug!("spawned {category:?} as body {id}");
                }
                GameEvent::Despawned { id } => log::debug!("despawned body {id}"),
                GameEvent::ScoreChanged(score) => log::info!("score {score}"),
                GameEvent::SpeedRamped(speed) => log::info!("scroll speed now {speed}"),
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "seed {seed}: score {} after {} frames ({} sounds)",
        state.score.score(),
        state.time_ticks,
        audio.played.len()
    );
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
