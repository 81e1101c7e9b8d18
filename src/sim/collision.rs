//! Collision detection and response
//!
//! Everything is a circle: lasers are points, asteroids and the ship use
//! their collision radius.

use super::destroy::destroy_asteroid;
use super::random::RandomSource;
use super::state::GameState;
use super::tick::explode_ship;
use crate::distance;

/// Resolve laser hits on asteroids, returning the number of hits.
///
/// Asteroids are scanned from the highest index down, lasers likewise. A
/// laser hits when its centre is strictly inside the asteroid's radius; the
/// asteroid is destroyed at once and the laser starts exploding, so each
/// laser scores at most one asteroid and each asteroid is hit at most once.
/// Children of a split are appended above the scan position and are not
/// visited until the next tick.
pub fn resolve_laser_hits(state: &mut GameState, rng: &mut impl RandomSource) -> u32 {
    let explode_ticks = state.tuning.laser_explode_ticks();
    let mut hits = 0;

    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;
        // A level change inside destroy_asteroid replaces the whole set
        if i >= state.asteroids.len() {
            continue;
        }
        let (roid_pos, roid_radius) = (state.asteroids[i].pos, state.asteroids[i].radius);

        let hit = state
            .ship
            .lasers
            .iter()
            .rposition(|laser| {
                !laser.is_exploding() && distance(roid_pos, laser.pos) < roid_radius
            });

        if let Some(j) = hit {
            state.ship.lasers[j].explode_ticks = explode_ticks;
            destroy_asteroid(state, i, rng);
            hits += 1;
        }
    }

    hits
}

/// Check the ship against every asteroid in ascending order.
///
/// Skipped unless the ship is in play and not invulnerable. The first
/// overlapping asteroid explodes the ship and is destroyed; later overlaps
/// in the same tick are ignored.
pub fn resolve_ship_collision(state: &mut GameState, rng: &mut impl RandomSource) -> bool {
    if !state.ship_active() || state.ship.is_invulnerable() {
        return false;
    }

    let ship = &state.ship;
    let hit = state
        .asteroids
        .iter()
        .position(|roid| distance(ship.pos, roid.pos) < ship.radius + roid.radius);

    match hit {
        Some(index) => {
            explode_ship(state);
            destroy_asteroid(state, index, rng);
            true
        }
        None => false,
    }
}
