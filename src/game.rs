//! Frame-gated driver for a host UI
//!
//! The host forwards frame callbacks and key events; [`Game`] decides when a
//! logic tick is due, owns the current session and hands out read-only
//! [`Snapshot`]s for drawing.

use serde::Serialize;

use crate::consts::FRAME_NANOS;
use crate::error::SimError;
use crate::settings::Settings;
use crate::sim::{Direction, GameState, InputState, Rect, Status, tick};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    /// Anything else; ignored
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            _ => Key::Other,
        }
    }
}

/// Clock readings for one frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Monotonic clock, used only to gate ticks
    pub monotonic_ns: u64,
    /// Wall clock, used for the survival, spawn and stuck timers
    pub wall_ms: u64,
}

/// Read-only view of a session for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub player: Rect,
    pub facing: Direction,
    pub walls: Vec<Rect>,
    pub terrains: Vec<Rect>,
    pub zombies: Vec<Rect>,
    /// Whole seconds left, while running
    pub remaining_secs: Option<u64>,
    /// Whole seconds survived, once the run has ended
    pub survived_secs: Option<u64>,
    pub ticks: u64,
}

impl Snapshot {
    /// Large end-of-run caption
    pub fn headline(&self) -> Option<&'static str> {
        match self.status {
            Status::GameOver => Some("Game Over"),
            Status::Victory => Some("Victory"),
            Status::Idle | Status::Running => None,
        }
    }

    /// End-of-run survival line
    pub fn survival_message(&self) -> Option<String> {
        let secs = self.survived_secs?;
        match self.status {
            Status::Victory => Some(format!("You have survived {} sec!!!", secs)),
            _ => Some(format!("You have survived {} sec", secs)),
        }
    }

    /// Timer text shown while running
    pub fn timer_text(&self) -> Option<String> {
        self.remaining_secs.map(|secs| format!("Time: {}", secs))
    }
}

/// Game instance holding the session and the input/frame bookkeeping
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    /// Base seed; each run uses `seed + run index`
    seed: u64,
    runs: u64,
    state: GameState,
    input: InputState,
    last_tick_ns: Option<u64>,
}

impl Game {
    /// Validate settings and create an idle game
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game seed {}", seed);
        Ok(Self {
            state: GameState::empty(settings.clone(), seed),
            settings,
            seed,
            runs: 0,
            input: InputState::default(),
            last_tick_ns: None,
        })
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Idle -> Running: build the first session
    pub fn start(&mut self, now_ms: u64) -> Result<(), SimError> {
        self.begin_run(now_ms)
    }

    /// Throw away the current session and start a fresh one
    pub fn restart(&mut self, now_ms: u64) -> Result<(), SimError> {
        log::info!("Restarting after {:?}", self.state.status);
        self.begin_run(now_ms)
    }

    fn begin_run(&mut self, now_ms: u64) -> Result<(), SimError> {
        let seed = self.seed.wrapping_add(self.runs);
        self.runs += 1;
        self.state = GameState::new(self.settings.clone(), seed, now_ms)?;
        self.last_tick_ns = None;
        Ok(())
    }

    pub fn on_key_down(&mut self, key: Key) {
        self.set_key(key, true);
    }

    pub fn on_key_up(&mut self, key: Key) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::W => self.input.up = held,
            Key::S => self.input.down = held,
            Key::A => self.input.left = held,
            Key::D => self.input.right = held,
            Key::Other => {}
        }
    }

    /// Replace all held keys at once (autopilots, replays)
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Frame callback: run at most one tick if a full frame interval has passed.
    ///
    /// Missed frames are dropped rather than caught up. Returns true if a tick
    /// ran.
    pub fn on_frame(&mut self, frame: FrameTime) -> Result<bool, SimError> {
        if self.state.status != Status::Running {
            return Ok(false);
        }
        if let Some(last) = self.last_tick_ns {
            if frame.monotonic_ns.saturating_sub(last) < FRAME_NANOS {
                return Ok(false);
            }
        }
        tick(&mut self.state, &self.input, frame.wall_ms)?;
        self.last_tick_ns = Some(frame.monotonic_ns);
        Ok(true)
    }

    /// Current session as plain rectangles
    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        let state = &self.state;
        let running = state.status == Status::Running;
        Snapshot {
            status: state.status,
            player: state.player.bounds(),
            facing: state.player.facing,
            walls: state.walls.clone(),
            terrains: state.terrains.clone(),
            zombies: state.zombies.iter().map(|z| z.bounds()).collect(),
            remaining_secs: running.then(|| state.remaining_secs(now_ms)),
            survived_secs: state
                .status
                .is_terminal()
                .then(|| state.elapsed_ms(now_ms) / 1000),
            ticks: state.time_ticks,
        }
    }
}
