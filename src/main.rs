//! Reactor Sim entry point
//!
//! Headless runner: builds a reactor from settings, seeds it and advances a
//! fixed number of ticks, logging a snapshot every simulated second.
//!
//! Usage: `reactor-sim [settings.json] [seconds]`

use std::process::ExitCode;

use reactor_sim::Settings;
use reactor_sim::consts::SIM_DT;
use reactor_sim::sim::{Reactor, clamp_frame_dt, tick};

/// Simulated seconds to run when none are given
const DEFAULT_SECONDS: f32 = 10.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Reactor Sim (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);

    let mut reactor = match Reactor::new(settings) {
        Ok(reactor) => reactor,
        Err(e) => {
            log::error!("Cannot build reactor: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let initial = reactor.settings().initial_round_count;
    reactor.populate(initial);

    let dt = clamp_frame_dt(SIM_DT, reactor.settings().max_dt);
    let total_ticks = (seconds / dt).ceil() as u64;
    let ticks_per_second = (1.0 / dt).round().max(1.0) as u64;

    for n in 1..=total_ticks {
        tick(&mut reactor, dt);
        if n % ticks_per_second == 0 {
            let snap = reactor.snapshot();
            log::info!(
                "t={:.1}s molecules={} (round {}, square {}) energy={:.1} temp={:.2} right-wall hits/s={}",
                snap.time,
                snap.latest.count,
                snap.latest.round_count,
                snap.latest.square_count,
                snap.latest.total_energy,
                snap.latest.mean_energy,
                snap.last_window_hits
            );
        }
    }

    match serde_json::to_string_pretty(&reactor.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
    ExitCode::SUCCESS
}
