//! Procedural arena generation
//!
//! Four boundary walls frame the arena; terrain patches and interior walls are
//! then scattered by rejection sampling so that no two obstacles overlap.

use glam::DVec2;
use rand::Rng;

use super::collision::blocked_by_obstacles;
use super::rect::Rect;
use crate::consts::SLOW_PLACEMENT_ATTEMPTS;
use crate::error::SimError;
use crate::settings::Settings;

/// Static obstacles of one session
#[derive(Debug, Clone, Default)]
pub struct Arena {
    /// Boundary walls first (top, bottom, left, right), then interior walls
    pub walls: Vec<Rect>,
    pub terrains: Vec<Rect>,
}

/// The four walls along the arena edges
pub fn boundary_walls(width: f64, height: f64, border: f64) -> [Rect; 4] {
    [
        Rect::new(0.0, 0.0, width, border),
        Rect::new(0.0, height - border, width, border),
        Rect::new(0.0, 0.0, border, height),
        Rect::new(width - border, 0.0, border, height),
    ]
}

/// Draw proposals until one is accepted or `max_attempts` is exhausted.
///
/// `propose` returns `Some` for an accepted candidate.
pub(crate) fn rejection_sample<R, T>(
    rng: &mut R,
    max_attempts: u32,
    what: &'static str,
    mut propose: impl FnMut(&mut R) -> Option<T>,
) -> Result<T, SimError>
where
    R: Rng + ?Sized,
{
    for attempt in 1..=max_attempts {
        if let Some(value) = propose(rng) {
            if attempt > SLOW_PLACEMENT_ATTEMPTS {
                log::warn!("Placing {} took {} attempts", what, attempt);
            }
            return Ok(value);
        }
    }
    log::error!("Gave up placing {} after {} attempts", what, max_attempts);
    Err(SimError::Placement {
        what,
        attempts: max_attempts,
    })
}

/// Uniform integer top-left corner for a `width`×`height` box inside the border
pub(crate) fn random_origin<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &Settings,
    width: f64,
    height: f64,
) -> DVec2 {
    let lo = settings.border;
    let hi_x = (settings.arena_width as f64 - width - settings.border as f64) as u32;
    let hi_y = (settings.arena_height as f64 - height - settings.border as f64) as u32;
    let x = rng.random_range(lo..hi_x.max(lo + 1));
    let y = rng.random_range(lo..hi_y.max(lo + 1));
    DVec2::new(x as f64, y as f64)
}

fn random_extent<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> u32 {
    rng.random_range(settings.obstacle_min..settings.obstacle_max)
}

/// Generate boundary walls, terrain, then interior walls
pub fn generate_arena<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Result<Arena, SimError> {
    let mut arena = Arena::default();
    arena.walls.extend(boundary_walls(
        settings.arena_width as f64,
        settings.arena_height as f64,
        settings.border as f64,
    ));

    while arena.terrains.len() < settings.terrain_count {
        let terrain = rejection_sample(rng, settings.max_placement_attempts, "terrain", |rng| {
            let w = random_extent(rng, settings) as f64;
            let h = random_extent(rng, settings) as f64;
            let origin = random_origin(rng, settings, w, h);
            let candidate = Rect::new(origin.x, origin.y, w, h);
            (!blocked_by_obstacles(&candidate, &arena.walls, &arena.terrains)).then_some(candidate)
        })?;
        arena.terrains.push(terrain);
    }

    let mut interior_walls = 0;
    while interior_walls < settings.wall_count {
        let wall = rejection_sample(rng, settings.max_placement_attempts, "wall", |rng| {
            let mut w = random_extent(rng, settings);
            let mut h = random_extent(rng, settings);
            // Thin walls: pin one axis to the minimum to form corridors
            if rng.random_bool(settings.thin_wall_chance) {
                if rng.random_bool(0.5) {
                    w = settings.obstacle_min;
                } else {
                    h = settings.obstacle_min;
                }
            }
            let (w, h) = (w as f64, h as f64);
            let origin = random_origin(rng, settings, w, h);
            let candidate = Rect::new(origin.x, origin.y, w, h);
            (!blocked_by_obstacles(&candidate, &arena.walls, &arena.terrains)).then_some(candidate)
        })?;
        arena.walls.push(wall);
        interior_walls += 1;
    }

    log::info!(
        "Generated arena {}x{}: {} walls ({} interior), {} terrain",
        settings.arena_width,
        settings.arena_height,
        arena.walls.len(),
        interior_walls,
        arena.terrains.len()
    );
    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Interior;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn all_obstacles(arena: &Arena) -> Vec<Rect> {
        arena.walls.iter().chain(arena.terrains.iter()).copied().collect()
    }

    #[test]
    fn test_boundary_walls_match_canvas_edges() {
        let walls = boundary_walls(800.0, 800.0, 30.0);
        assert_eq!(walls[0], Rect::new(0.0, 0.0, 800.0, 30.0));
        assert_eq!(walls[1], Rect::new(0.0, 770.0, 800.0, 30.0));
        assert_eq!(walls[2], Rect::new(0.0, 0.0, 30.0, 800.0));
        assert_eq!(walls[3], Rect::new(770.0, 0.0, 30.0, 800.0));
    }

    #[test]
    fn test_generate_counts() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = generate_arena(&settings, &mut rng).unwrap();
        assert_eq!(arena.walls.len(), 4 + settings.wall_count);
        assert_eq!(arena.terrains.len(), settings.terrain_count);
    }

    #[test]
    fn test_obstacle_extents() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let arena = generate_arena(&settings, &mut rng).unwrap();
        for r in arena.walls[4..].iter().chain(arena.terrains.iter()) {
            assert!(r.width >= 30.0 && r.width < 80.0, "{r:?}");
            assert!(r.height >= 30.0 && r.height < 80.0, "{r:?}");
        }
    }

    #[test]
    fn test_thin_walls_have_one_minimum_axis() {
        let settings = Settings {
            thin_wall_chance: 1.0,
            ..Settings::default()
        };
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = generate_arena(&settings, &mut rng).unwrap();
            for r in &arena.walls[4..] {
                assert!(r.width == 30.0 || r.height == 30.0, "{r:?}");
            }
        }
    }

    #[test]
    fn test_walls_without_thin_rule() {
        let settings = Settings {
            thin_wall_chance: 0.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let arena = generate_arena(&settings, &mut rng).unwrap();
        assert_eq!(arena.walls.len(), 4 + settings.wall_count);
        for r in &arena.walls[4..] {
            assert!(r.width >= 30.0 && r.width < 80.0, "{r:?}");
            assert!(r.height >= 30.0 && r.height < 80.0, "{r:?}");
        }
        // Full-size draws are not all forced thin
        assert!(
            arena.walls[4..]
                .iter()
                .any(|r| r.width != 30.0 && r.height != 30.0)
        );
    }

    #[test]
    fn test_first_candidate_accepted_in_empty_arena() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut attempts = 0;
        let placed = rejection_sample(&mut rng, 10, "terrain", |_| {
            attempts += 1;
            let candidate = Rect::new(30.0, 30.0, 30.0, 30.0);
            (!blocked_by_obstacles(&candidate, &[], &[])).then_some(candidate)
        })
        .unwrap();
        assert_eq!(attempts, 1);
        assert_eq!(placed, Rect::new(30.0, 30.0, 30.0, 30.0));
    }

    #[test]
    fn test_exhausted_sampling_is_fatal() {
        let mut rng = Pcg32::seed_from_u64(4);
        let result: Result<Rect, _> = rejection_sample(&mut rng, 25, "wall", |_| None);
        assert!(matches!(
            result,
            Err(SimError::Placement {
                what: "wall",
                attempts: 25
            })
        ));
    }

    #[test]
    fn test_cluttered_arena_errors_instead_of_hanging() {
        let settings = Settings {
            arena_width: 200,
            arena_height: 200,
            terrain_count: 50,
            max_placement_attempts: 500,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(generate_arena(&settings, &mut rng).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_obstacles_never_overlap(seed in any::<u64>()) {
            let settings = Settings::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = generate_arena(&settings, &mut rng).unwrap();
            let obstacles = all_obstacles(&arena);
            for (i, a) in obstacles.iter().enumerate() {
                for b in &obstacles[i + 1..] {
                    // Boundary walls share corners with each other by construction
                    if arena.walls[..4].contains(a) && arena.walls[..4].contains(b) {
                        continue;
                    }
                    prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }

        #[test]
        fn prop_interior_obstacles_inside_border(seed in any::<u64>()) {
            let settings = Settings::default();
            let interior = Interior::from_settings(&settings);
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = generate_arena(&settings, &mut rng).unwrap();
            for r in arena.walls[4..].iter().chain(arena.terrains.iter()) {
                prop_assert!(interior.contains(r), "{:?} escapes the interior", r);
            }
        }
    }
}
