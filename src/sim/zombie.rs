//! Zombie AI
//!
//! Each tick a zombie either seeks the player along the axis of greatest
//! displacement or wanders along its held heading. Moves are all-or-nothing:
//! a blocked candidate leaves the zombie where it was.

use glam::DVec2;
use rand::Rng;

use super::collision::{Interior, blocked_by_obstacles};
use super::rect::Rect;
use super::state::{Direction, Zombie};

/// Everything a zombie needs to know about the world for one tick
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    pub interior: Interior,
    pub walls: &'a [Rect],
    pub terrains: &'a [Rect],
    /// Player top-left corner
    pub player_pos: DVec2,
    pub redirect_chance: f64,
    pub seek_chance: f64,
    pub now_ms: u64,
}

/// Heading toward `target` along the dominant axis.
///
/// Ties go to the Y axis.
pub fn seek_direction(from: DVec2, target: DVec2) -> Direction {
    let delta = target - from;
    if delta.x.abs() > delta.y.abs() {
        if target.x > from.x {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if target.y > from.y {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Roll this tick's heading and return the unclamped candidate position
fn choose_step<R: Rng + ?Sized>(zombie: &mut Zombie, ctx: &AiContext<'_>, rng: &mut R) -> DVec2 {
    if rng.random_bool(ctx.redirect_chance) {
        zombie.direction = Direction::random(rng);
    }
    if rng.random_bool(ctx.seek_chance) {
        zombie.direction = seek_direction(zombie.pos, ctx.player_pos);
    }
    zombie.pos + zombie.direction.unit() * zombie.speed
}

/// Advance the zombie at `index` by one tick.
///
/// Other zombies are checked at their current positions, so zombies earlier in
/// the slice have already moved this tick. Returns true if the move was
/// accepted.
pub fn step_zombie<R: Rng + ?Sized>(
    zombies: &mut [Zombie],
    index: usize,
    ctx: &AiContext<'_>,
    rng: &mut R,
) -> bool {
    let candidate = {
        let zombie = &mut zombies[index];
        let raw = choose_step(zombie, ctx, rng);
        ctx.interior.clamp(raw, zombie.size)
    };

    let self_id = zombies[index].id;
    let rect = Rect::square(candidate, zombies[index].size);
    let blocked = blocked_by_obstacles(&rect, ctx.walls, ctx.terrains)
        || zombies
            .iter()
            .any(|z| z.id != self_id && z.bounds().intersects(&rect));

    if blocked {
        return false;
    }
    let zombie = &mut zombies[index];
    zombie.pos = candidate;
    zombie.last_moved_ms = ctx.now_ms;
    true
}

/// Step zombies in order until one turns out to be stuck.
///
/// Returns the index of the first stuck zombie; zombies after it do not step
/// this tick.
pub fn update_zombies<R: Rng + ?Sized>(
    zombies: &mut [Zombie],
    ctx: &AiContext<'_>,
    stuck_ms: u64,
    rng: &mut R,
) -> Option<usize> {
    for index in 0..zombies.len() {
        step_zombie(zombies, index, ctx, rng);
        if zombies[index].is_stuck(ctx.now_ms, stuck_ms) {
            return Some(index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn zombie(id: u32, x: f64, y: f64, direction: Direction) -> Zombie {
        Zombie {
            id,
            pos: DVec2::new(x, y),
            size: 20.0,
            speed: 3.0,
            direction,
            last_moved_ms: 0,
        }
    }

    fn ctx<'a>(walls: &'a [Rect], player: DVec2, seek: f64, now_ms: u64) -> AiContext<'a> {
        AiContext {
            interior: Interior::new(800.0, 800.0, 30.0),
            walls,
            terrains: &[],
            player_pos: player,
            redirect_chance: 0.0,
            seek_chance: seek,
            now_ms,
        }
    }

    #[test]
    fn test_seek_direction_dominant_axis() {
        let from = DVec2::new(100.0, 100.0);
        assert_eq!(seek_direction(from, DVec2::new(200.0, 150.0)), Direction::Right);
        assert_eq!(seek_direction(from, DVec2::new(0.0, 150.0)), Direction::Left);
        assert_eq!(seek_direction(from, DVec2::new(120.0, 300.0)), Direction::Down);
        assert_eq!(seek_direction(from, DVec2::new(120.0, 0.0)), Direction::Up);
    }

    #[test]
    fn test_seek_tie_goes_to_y_axis() {
        let from = DVec2::new(100.0, 100.0);
        assert_eq!(seek_direction(from, DVec2::new(150.0, 150.0)), Direction::Down);
        assert_eq!(seek_direction(from, DVec2::new(150.0, 50.0)), Direction::Up);
        // Standing on the player
        assert_eq!(seek_direction(from, from), Direction::Up);
    }

    #[test]
    fn test_seek_moves_toward_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut zombies = [zombie(1, 100.0, 100.0, Direction::Up)];
        let ctx = ctx(&[], DVec2::new(400.0, 120.0), 1.0, 50);
        assert!(step_zombie(&mut zombies, 0, &ctx, &mut rng));
        assert_eq!(zombies[0].pos, DVec2::new(103.0, 100.0));
        assert_eq!(zombies[0].direction, Direction::Right);
        assert_eq!(zombies[0].last_moved_ms, 50);
    }

    #[test]
    fn test_wander_follows_heading() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut zombies = [zombie(1, 100.0, 100.0, Direction::Left)];
        let ctx = ctx(&[], DVec2::new(400.0, 400.0), 0.0, 10);
        for _ in 0..3 {
            assert!(step_zombie(&mut zombies, 0, &ctx, &mut rng));
        }
        assert_eq!(zombies[0].pos, DVec2::new(91.0, 100.0));
        assert_eq!(zombies[0].direction, Direction::Left);
    }

    #[test]
    fn test_wander_clamped_at_border() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut zombies = [zombie(1, 31.0, 100.0, Direction::Left)];
        let ctx = ctx(&[], DVec2::new(400.0, 400.0), 0.0, 10);
        assert!(step_zombie(&mut zombies, 0, &ctx, &mut rng));
        assert_eq!(zombies[0].pos, DVec2::new(30.0, 100.0));
    }

    #[test]
    fn test_blocked_by_wall_keeps_position_and_timestamp() {
        let mut rng = Pcg32::seed_from_u64(4);
        let walls = [Rect::new(121.0, 80.0, 40.0, 60.0)];
        let mut zombies = [zombie(1, 100.0, 100.0, Direction::Right)];
        let ctx = ctx(&walls, DVec2::new(400.0, 400.0), 0.0, 999);
        assert!(!step_zombie(&mut zombies, 0, &ctx, &mut rng));
        assert_eq!(zombies[0].pos, DVec2::new(100.0, 100.0));
        assert_eq!(zombies[0].last_moved_ms, 0);
    }

    #[test]
    fn test_blocked_by_other_zombie_not_self() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut zombies = [
            zombie(1, 100.0, 100.0, Direction::Right),
            zombie(2, 122.0, 100.0, Direction::Down),
        ];
        let ctx = ctx(&[], DVec2::new(400.0, 400.0), 0.0, 10);
        // First zombie would overlap the second
        assert!(!step_zombie(&mut zombies, 0, &ctx, &mut rng));
        // Moving down clears the first zombie
        assert!(step_zombie(&mut zombies, 1, &ctx, &mut rng));
        assert_eq!(zombies[1].pos, DVec2::new(122.0, 103.0));
    }

    #[test]
    fn test_later_zombies_see_earlier_moves() {
        let ctx = ctx(&[], DVec2::new(400.0, 400.0), 0.0, 10);
        // Zombie 2's candidate (121..141, 119..139) only overlaps zombie 1
        // after zombie 1 has stepped right to 103..123
        let mut zombies = [
            zombie(1, 100.0, 100.0, Direction::Right),
            zombie(2, 121.0, 122.0, Direction::Up),
        ];
        let mut rng = Pcg32::seed_from_u64(6);
        update_zombies(&mut zombies, &ctx, 1_500, &mut rng);
        assert_eq!(zombies[0].pos, DVec2::new(103.0, 100.0));
        assert_eq!(zombies[1].pos, DVec2::new(121.0, 122.0));

        // In the opposite order zombie 2 moves first and blocks zombie 1
        let mut zombies = [
            zombie(2, 121.0, 122.0, Direction::Up),
            zombie(1, 100.0, 100.0, Direction::Right),
        ];
        update_zombies(&mut zombies, &ctx, 1_500, &mut rng);
        assert_eq!(zombies[0].pos, DVec2::new(121.0, 119.0));
        assert_eq!(zombies[1].pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_update_reports_first_stuck() {
        let mut rng = Pcg32::seed_from_u64(7);
        let walls = [
            Rect::new(121.0, 80.0, 40.0, 60.0),
            Rect::new(321.0, 80.0, 40.0, 60.0),
        ];
        let mut zombies = [
            zombie(1, 500.0, 500.0, Direction::Down),
            zombie(2, 100.0, 100.0, Direction::Right),
            zombie(3, 300.0, 100.0, Direction::Right),
        ];
        let ctx = ctx(&walls, DVec2::new(700.0, 700.0), 0.0, 2_000);
        let stuck = update_zombies(&mut zombies, &ctx, 1_500, &mut rng);
        assert_eq!(stuck, Some(1));
        assert_eq!(zombies[0].last_moved_ms, 2_000);
        // Zombie 3 is also stuck but never gets its turn
        assert_eq!(zombies[2].pos, DVec2::new(300.0, 100.0));
    }

    #[test]
    fn test_zombies_after_stuck_one_do_not_step() {
        let mut rng = Pcg32::seed_from_u64(8);
        let walls = [Rect::new(121.0, 80.0, 40.0, 60.0)];
        let mut zombies = [
            zombie(1, 100.0, 100.0, Direction::Right),
            zombie(2, 400.0, 400.0, Direction::Right),
        ];
        let ctx = ctx(&walls, DVec2::new(700.0, 700.0), 0.0, 5_000);
        assert_eq!(update_zombies(&mut zombies, &ctx, 1_500, &mut rng), Some(0));
        assert_eq!(zombies[1].pos, DVec2::new(400.0, 400.0));
        assert_eq!(zombies[1].last_moved_ms, 0);
    }
}
