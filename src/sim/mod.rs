//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, clocks passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zombie;

pub use arena::{Arena, boundary_walls, generate_arena};
pub use collision::{Interior, blocked_by_obstacles};
pub use rect::{Rect, intersects};
pub use spawn::{place_player, spawn_zombie};
pub use state::{Direction, GameState, Player, Status, Zombie};
pub use tick::{InputState, move_player, tick};
pub use zombie::{AiContext, seek_direction, step_zombie, update_zombies};
