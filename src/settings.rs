//! Simulation settings
//!
//! Defaults mirror [`crate::consts`]. Hosts may load overrides from JSON; every
//! loaded value goes through [`Settings::validate`] so rejection sampling is
//! never asked to fill an arena that cannot hold the requested obstacles.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunables for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Arena ===
    pub arena_width: u32,
    pub arena_height: u32,
    pub border: u32,
    pub terrain_count: usize,
    pub wall_count: usize,
    pub obstacle_min: u32,
    pub obstacle_max: u32,
    pub thin_wall_chance: f64,

    // === Player ===
    pub player_size: f64,
    pub player_speed: f64,

    // === Zombies ===
    pub zombie_size: f64,
    pub zombie_speed: f64,
    pub initial_zombies: usize,
    pub redirect_chance: f64,
    pub seek_chance: f64,
    pub stuck_ms: u64,
    pub spawn_buffer: f64,

    // === Timers ===
    pub spawn_interval_ms: u64,
    pub survival_ms: u64,

    /// Rejection sampling cap per placement
    pub max_placement_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            border: BORDER,
            terrain_count: TERRAIN_COUNT,
            wall_count: WALL_COUNT,
            obstacle_min: OBSTACLE_MIN,
            obstacle_max: OBSTACLE_MAX,
            thin_wall_chance: THIN_WALL_CHANCE,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            zombie_size: ZOMBIE_SIZE,
            zombie_speed: ZOMBIE_SPEED,
            initial_zombies: INITIAL_ZOMBIES,
            redirect_chance: REDIRECT_CHANCE,
            seek_chance: SEEK_CHANCE,
            stuck_ms: STUCK_MS,
            spawn_buffer: SPAWN_BUFFER,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            survival_ms: SURVIVAL_MS,

            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Width of the playable interior
    pub fn interior_width(&self) -> f64 {
        self.arena_width as f64 - 2.0 * self.border as f64
    }

    /// Height of the playable interior
    pub fn interior_height(&self) -> f64 {
        self.arena_height as f64 - 2.0 * self.border as f64
    }

    /// Check that the settings describe an arena placement can always fill.
    ///
    /// Requested obstacles may cover at most half of the interior, at their
    /// largest possible extent.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.obstacle_min == 0 || self.obstacle_min >= self.obstacle_max {
            return invalid(format!(
                "obstacle range [{}, {}) is empty",
                self.obstacle_min, self.obstacle_max
            ));
        }
        if self.player_size <= 0.0 || self.zombie_size <= 0.0 {
            return invalid("entity sizes must be positive".into());
        }
        if self.player_speed < 0.0 || self.zombie_speed < 0.0 {
            return invalid("speeds must not be negative".into());
        }
        for (name, p) in [
            ("thin_wall_chance", self.thin_wall_chance),
            ("redirect_chance", self.redirect_chance),
            ("seek_chance", self.seek_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1".into());
        }

        // Candidates are drawn from [border, size - extent - border), which must
        // be non-empty for the largest obstacle and for entities.
        let (w, h) = (self.interior_width(), self.interior_height());
        let largest = self.obstacle_max as f64;
        if w <= largest || h <= largest {
            return invalid(format!(
                "interior {w}x{h} cannot hold an obstacle of extent {largest}"
            ));
        }
        let entity = self.player_size.max(self.zombie_size);
        if w <= entity || h <= entity {
            return invalid(format!("interior {w}x{h} cannot hold an entity of size {entity}"));
        }

        let obstacles = (self.terrain_count + self.wall_count) as f64;
        let worst_case_area = obstacles * largest * largest;
        if worst_case_area > 0.5 * w * h {
            return invalid(format!(
                "{obstacles} obstacles may cover {worst_case_area} of a {} interior",
                w * h
            ));
        }
        Ok(())
    }
}
