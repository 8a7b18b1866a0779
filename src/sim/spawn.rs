//! Entity placement
//!
//! Players and zombies are dropped at uniformly random interior positions,
//! retrying until the footprint is clear.

use glam::DVec2;
use rand::Rng;

use super::arena::{random_origin, rejection_sample};
use super::collision::blocked_by_obstacles;
use super::rect::Rect;
use super::state::Zombie;
use crate::error::SimError;
use crate::settings::Settings;

fn overlaps_zombie(rect: &Rect, zombies: &[Zombie]) -> bool {
    zombies.iter().any(|z| z.bounds().intersects(rect))
}

/// Pick a player position clear of walls, terrain and zombies
pub fn place_player<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &Settings,
    walls: &[Rect],
    terrains: &[Rect],
    zombies: &[Zombie],
) -> Result<DVec2, SimError> {
    let size = settings.player_size;
    rejection_sample(rng, settings.max_placement_attempts, "player", |rng| {
        let pos = random_origin(rng, settings, size, size);
        let rect = Rect::square(pos, size);
        let clear = !blocked_by_obstacles(&rect, walls, terrains) && !overlaps_zombie(&rect, zombies);
        clear.then_some(pos)
    })
}

/// Pick a zombie position clear of walls, terrain, other zombies and the
/// buffer zone around `player`
pub fn spawn_zombie<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &Settings,
    walls: &[Rect],
    terrains: &[Rect],
    zombies: &[Zombie],
    player: &Rect,
) -> Result<DVec2, SimError> {
    let size = settings.zombie_size;
    let buffer = player.expand(settings.spawn_buffer);
    rejection_sample(rng, settings.max_placement_attempts, "zombie", |rng| {
        let pos = random_origin(rng, settings, size, size);
        let rect = Rect::square(pos, size);
        let clear = !blocked_by_obstacles(&rect, walls, terrains)
            && !overlaps_zombie(&rect, zombies)
            && !rect.intersects(&buffer);
        clear.then_some(pos)
    })
}
