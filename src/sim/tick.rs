//! Fixed timestep simulation tick
//!
//! Advances one session by a single logic step: player movement, the
//! zombie collision check, zombie AI with stuck replacement, timed spawns and
//! the survival timer.

use serde::{Deserialize, Serialize};

use super::collision::{Interior, blocked_by_obstacles};
use super::rect::Rect;
use super::state::{Direction, GameState, Status};
use super::zombie::{AiContext, update_zombies};
use crate::error::SimError;

/// Movement keys held during a tick.
///
/// The flags are independent; opposite keys cancel and diagonals move at full
/// speed on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Apply held input to the player, reverting on obstacle contact.
///
/// Returns true if the player ended on a new position.
pub fn move_player(state: &mut GameState, input: &InputState) -> bool {
    let player = &mut state.player;
    let mut pos = player.pos;

    // Each held key overwrites the facing, so later checks win
    if input.up {
        pos.y -= player.speed;
        player.facing = Direction::Up;
    }
    if input.down {
        pos.y += player.speed;
        player.facing = Direction::Down;
    }
    if input.left {
        pos.x -= player.speed;
        player.facing = Direction::Left;
    }
    if input.right {
        pos.x += player.speed;
        player.facing = Direction::Right;
    }

    let interior = Interior::from_settings(&state.settings);
    let pos = interior.clamp(pos, player.size);
    let candidate = Rect::square(pos, player.size);
    if blocked_by_obstacles(&candidate, &state.walls, &state.terrains) {
        return false;
    }
    let moved = pos != player.pos;
    player.pos = pos;
    moved
}

/// Advance the game state by one fixed timestep at wall-clock `now_ms`.
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, input: &InputState, now_ms: u64) -> Result<(), SimError> {
    if state.status != Status::Running {
        return Ok(());
    }
    state.time_ticks += 1;

    move_player(state, input);

    let player = state.player.bounds();
    if state.zombies.iter().any(|z| z.bounds().intersects(&player)) {
        state.finish(Status::GameOver, now_ms);
    }

    // Zombies still take their step on the tick the player is caught
    let ctx = AiContext {
        interior: Interior::from_settings(&state.settings),
        walls: &state.walls,
        terrains: &state.terrains,
        player_pos: state.player.pos,
        redirect_chance: state.settings.redirect_chance,
        seek_chance: state.settings.seek_chance,
        now_ms,
    };
    let stuck = update_zombies(
        &mut state.zombies,
        &ctx,
        state.settings.stuck_ms,
        &mut state.rng,
    );
    if let Some(index) = stuck {
        let zombie = state.zombies.remove(index);
        log::debug!(
            "Zombie {} stuck at ({}, {}) since {} ms; replacing",
            zombie.id,
            zombie.pos.x,
            zombie.pos.y,
            zombie.last_moved_ms
        );
        state.spawn_zombie(now_ms)?;
    }

    if state.status == Status::Running
        && now_ms.saturating_sub(state.last_spawn_ms) >= state.settings.spawn_interval_ms
    {
        state.spawn_zombie(now_ms)?;
        state.last_spawn_ms = now_ms;
        log::debug!("Timed spawn: {} zombies", state.zombies.len());
    }

    if state.status == Status::Running && state.elapsed_ms(now_ms) >= state.settings.survival_ms {
        state.finish(Status::Victory, now_ms);
    }

    Ok(())
}
