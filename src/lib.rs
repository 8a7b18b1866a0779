//! Sixty Seconds - a top-down zombie survival simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena, placement, zombie AI, tick)
//! - `game`: Frame-gated driver and state machine wrapper for a host UI
//! - `settings`: Validated, serde-loadable tunables
//! - `error`: Fatal configuration errors

pub mod error;
pub mod game;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use game::{FrameTime, Game, Key, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window title shown by hosts
    pub const TITLE: &str = "60 SECONDS";

    /// Fixed logic rate (120 Hz)
    pub const TICK_HZ: u32 = 120;
    /// Minimum monotonic time between two logic ticks
    pub const FRAME_NANOS: u64 = 1_000_000_000 / TICK_HZ as u64;

    /// Arena dimensions
    pub const ARENA_WIDTH: u32 = 800;
    pub const ARENA_HEIGHT: u32 = 800;
    /// Thickness reserved for the boundary walls
    pub const BORDER: u32 = 30;

    /// Procedural obstacles
    pub const TERRAIN_COUNT: usize = 20;
    pub const WALL_COUNT: usize = 10;
    /// Obstacle extent per axis, half-open: [MIN, MAX)
    pub const OBSTACLE_MIN: u32 = 30;
    pub const OBSTACLE_MAX: u32 = 80;
    /// Chance that an interior wall is forced thin on one axis
    pub const THIN_WALL_CHANCE: f64 = 0.5;

    /// Player defaults
    pub const PLAYER_SIZE: f64 = 20.0;
    pub const PLAYER_SPEED: f64 = 5.0;

    /// Zombie defaults (same footprint as the player)
    pub const ZOMBIE_SIZE: f64 = PLAYER_SIZE;
    pub const ZOMBIE_SPEED: f64 = 3.0;
    pub const INITIAL_ZOMBIES: usize = 3;
    /// Per-tick chance of picking a new wander direction
    pub const REDIRECT_CHANCE: f64 = 0.01;
    /// Per-tick chance of seeking the player instead of wandering
    pub const SEEK_CHANCE: f64 = 0.5;
    /// A zombie that has not moved for longer than this is replaced
    pub const STUCK_MS: u64 = 1_500;
    /// Zombies never spawn within this distance of the player box
    pub const SPAWN_BUFFER: f64 = 50.0;

    /// Wall-clock timers
    pub const SPAWN_INTERVAL_MS: u64 = 10_000;
    pub const SURVIVAL_MS: u64 = 60_000;

    /// Rejection sampling cap per placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
    /// Placements slower than this get a warning
    pub const SLOW_PLACEMENT_ATTEMPTS: u32 = 1_000;
}
