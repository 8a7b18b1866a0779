//! Sixty Seconds entry point
//!
//! Headless native driver: runs one session with a simple autopilot and prints
//! the final snapshot summary as JSON. Rendering hosts embed [`Game`] instead.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use glam::DVec2;
use serde::Serialize;

use sixty_seconds::consts::{FRAME_NANOS, TITLE};
use sixty_seconds::sim::InputState;
use sixty_seconds::{FrameTime, Game, Settings};

/// Command-line options
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Options {
    /// Drive the session from the real clocks instead of simulated ones
    #[arg(long)]
    realtime: bool,
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long = "settings")]
    settings_path: Option<PathBuf>,
}

/// Final report printed on exit
#[derive(Debug, Serialize)]
struct RunSummary {
    title: &'static str,
    seed: u64,
    status: sixty_seconds::sim::Status,
    headline: Option<&'static str>,
    message: Option<String>,
    survived_secs: Option<u64>,
    ticks: u64,
    zombies: usize,
}

/// Run away from the nearest zombie along the dominant axis
fn autopilot(game: &Game) -> InputState {
    let state = game.state();
    let player = state.player.pos;
    let Some(nearest) = state
        .zombies
        .iter()
        .map(|z| z.pos)
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
    else {
        return InputState::default();
    };

    let away: DVec2 = player - nearest;
    InputState {
        up: away.y < 0.0,
        down: away.y > 0.0,
        left: away.x < 0.0,
        right: away.x > 0.0,
    }
}

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(options: Options) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let mut settings = match &options.settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if options.seed.is_some() {
        settings.seed = options.seed;
    }

    let mut game = Game::new(settings)?;

    if options.realtime {
        let origin = Instant::now();
        game.start(wall_clock_ms())?;
        while !game.status().is_terminal() {
            game.set_input(autopilot(&game));
            game.on_frame(FrameTime {
                monotonic_ns: origin.elapsed().as_nanos() as u64,
                wall_ms: wall_clock_ms(),
            })?;
            std::thread::sleep(Duration::from_millis(1));
        }
    } else {
        // Simulated clocks: one frame interval per iteration
        let mut now_ns = 0u64;
        game.start(0)?;
        while !game.status().is_terminal() {
            game.set_input(autopilot(&game));
            game.on_frame(FrameTime {
                monotonic_ns: now_ns,
                wall_ms: now_ns / 1_000_000,
            })?;
            now_ns += FRAME_NANOS;
        }
    }

    let end_ms = game.state().ended_at_ms.unwrap_or(0);
    let snapshot = game.snapshot(end_ms);
    Ok(RunSummary {
        title: TITLE,
        seed: game.state().seed,
        status: snapshot.status,
        headline: snapshot.headline(),
        message: snapshot.survival_message(),
        survived_secs: snapshot.survived_secs,
        ticks: snapshot.ticks,
        zombies: snapshot.zombies.len(),
    })
}

fn main() {
    env_logger::init();
    log::info!("{} (native) starting...", TITLE);

    let options = Options::parse();

    match run(options) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {}", e),
        },
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
