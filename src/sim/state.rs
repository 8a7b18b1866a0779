//! Game state and core simulation types
//!
//! A [`GameState`] is one session: it owns the arena, the player and every
//! zombie, and is rebuilt from scratch on each start or restart.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, generate_arena};
use super::rect::Rect;
use super::spawn::{place_player, spawn_zombie};
use crate::error::SimError;
use crate::settings::Settings;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// No session started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Caught by a zombie (terminal)
    GameOver,
    /// Survived the full duration (terminal)
    Victory,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::GameOver | Status::Victory)
    }
}

/// Cardinal heading, screen coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this heading
    pub fn unit(self) -> DVec2 {
        match self {
            Direction::Up => DVec2::NEG_Y,
            Direction::Down => DVec2::Y,
            Direction::Left => DVec2::NEG_X,
            Direction::Right => DVec2::X,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: DVec2,
    pub size: f64,
    pub speed: f64,
    /// Last heading with input held
    pub facing: Direction,
}

impl Player {
    pub fn new(pos: DVec2, settings: &Settings) -> Self {
        Self {
            pos,
            size: settings.player_size,
            speed: settings.player_speed,
            facing: Direction::Up,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// An enemy agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub id: u32,
    /// Top-left corner
    pub pos: DVec2,
    pub size: f64,
    pub speed: f64,
    /// Current wander heading
    pub direction: Direction,
    /// Wall-clock ms of the last accepted move (or of the spawn)
    pub last_moved_ms: u64,
}

impl Zombie {
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// No accepted move for longer than `stuck_ms`
    pub fn is_stuck(&self, now_ms: u64, stuck_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_moved_ms) > stuck_ms
    }
}

/// One survival session (deterministic for a given seed and clock sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed this session's RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Boundary walls first, then interior walls
    pub walls: Vec<Rect>,
    pub terrains: Vec<Rect>,
    /// In spawn order; collision and stuck checks iterate in this order
    pub zombies: Vec<Zombie>,
    pub player: Player,
    pub status: Status,
    /// Wall-clock ms when the session started
    pub started_at_ms: u64,
    /// Wall-clock ms of the last timed spawn
    pub last_spawn_ms: u64,
    /// Wall-clock ms of the terminal transition
    pub ended_at_ms: Option<u64>,
    /// Logic ticks run so far
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a session with an empty arena and the player at the origin.
    ///
    /// Status is `Idle`; call [`GameState::reset`] to populate it.
    pub fn empty(settings: Settings, seed: u64) -> Self {
        let player = Player::new(DVec2::ZERO, &settings);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            walls: Vec::new(),
            terrains: Vec::new(),
            zombies: Vec::new(),
            player,
            status: Status::Idle,
            started_at_ms: 0,
            last_spawn_ms: 0,
            ended_at_ms: None,
            time_ticks: 0,
            next_id: 1,
            settings,
        }
    }

    /// Build and start a fresh session at wall-clock `now_ms`
    pub fn new(settings: Settings, seed: u64, now_ms: u64) -> Result<Self, SimError> {
        let mut state = Self::empty(settings, seed);
        state.reset(now_ms)?;
        Ok(state)
    }

    /// Clear every entity, regenerate the arena and start running.
    ///
    /// The player is placed before the initial zombies so that the spawn
    /// buffer is measured from the player's real position. Settings are
    /// validated first, since sampling cannot cope with impossible ones.
    pub fn reset(&mut self, now_ms: u64) -> Result<(), SimError> {
        self.settings.validate()?;
        self.walls.clear();
        self.terrains.clear();
        self.zombies.clear();

        let Arena { walls, terrains } = generate_arena(&self.settings, &mut self.rng)?;
        self.walls = walls;
        self.terrains = terrains;

        let pos = place_player(
            &mut self.rng,
            &self.settings,
            &self.walls,
            &self.terrains,
            &self.zombies,
        )?;
        self.player = Player::new(pos, &self.settings);

        for _ in 0..self.settings.initial_zombies {
            self.spawn_zombie(now_ms)?;
        }

        self.status = Status::Running;
        self.started_at_ms = now_ms;
        self.last_spawn_ms = now_ms;
        self.ended_at_ms = None;
        self.time_ticks = 0;

        log::info!(
            "Session started (seed {}): player at ({}, {}), {} zombies",
            self.seed,
            self.player.pos.x,
            self.player.pos.y,
            self.zombies.len()
        );
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place one zombie clear of obstacles, other zombies and the player buffer
    pub fn spawn_zombie(&mut self, now_ms: u64) -> Result<(), SimError> {
        let pos = spawn_zombie(
            &mut self.rng,
            &self.settings,
            &self.walls,
            &self.terrains,
            &self.zombies,
            &self.player.bounds(),
        )?;
        let id = self.next_entity_id();
        let direction = Direction::random(&mut self.rng);
        self.zombies.push(Zombie {
            id,
            pos,
            size: self.settings.zombie_size,
            speed: self.settings.zombie_speed,
            direction,
            last_moved_ms: now_ms,
        });
        log::debug!("Spawned zombie {} at ({}, {})", id, pos.x, pos.y);
        Ok(())
    }

    /// Wall-clock ms survived so far (frozen once the session ends)
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let end = self.ended_at_ms.unwrap_or(now_ms);
        end.saturating_sub(self.started_at_ms)
    }

    /// Whole seconds left on the survival timer
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        self.settings.survival_ms.saturating_sub(self.elapsed_ms(now_ms)) / 1000
    }

    /// Move to a terminal status, recording when it happened
    pub(crate) fn finish(&mut self, status: Status, now_ms: u64) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.ended_at_ms = Some(now_ms);
        log::info!(
            "Session ended: {:?} after {} ms ({} ticks)",
            status,
            self.elapsed_ms(now_ms),
            self.time_ticks
        );
    }
}
