//! Entity factories
//!
//! Ships, asteroids and lasers, with all randomness drawn from a
//! [`RandomSource`] so the exact geometry is reproducible.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Asteroid, AsteroidSize, GameState, Laser, Ship};
use crate::tuning::Tuning;
use crate::{distance, heading};

/// Resample limit for belt placement on fields too small for the clearance
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Fresh ship in the middle of the field, facing up, fully invulnerable
pub fn new_ship(tuning: &Tuning) -> Ship {
    Ship {
        pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
        radius: tuning.ship_radius(),
        angle: FRAC_PI_2,
        rotation: 0.0,
        vel: Vec2::ZERO,
        thrusting: false,
        blink_count: tuning.blink_count(),
        blink_ticks: tuning.blink_ticks(),
        can_shoot: true,
        lasers: Vec::with_capacity(tuning.laser_max),
    }
}

/// Asteroid at `pos` with random drift, orientation and outline
pub fn new_asteroid(
    pos: Vec2,
    size: AsteroidSize,
    level: u32,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Asteroid {
    let max_speed =
        tuning.roids_speed * tuning.level_speed_multiplier(level) / tuning.fps as f32;

    let vx = rng.next_range(max_speed) * rng.next_sign();
    let vy = rng.next_range(max_speed) * rng.next_sign();
    let angle = rng.next_range(TAU);

    // floor(u * (vert + 1) + vert / 2): vert/2 ..= vert*1.5 vertices
    let vert = tuning.roids_vert as f32;
    let vertex_count = (rng.next_unit() * (vert + 1.0) + vert / 2.0).floor() as usize;

    let jag = tuning.roids_jag;
    let offsets = (0..vertex_count)
        .map(|_| rng.next_unit() * jag * 2.0 + 1.0 - jag)
        .collect();

    Asteroid {
        pos,
        vel: Vec2::new(vx, vy),
        size,
        radius: tuning.asteroid_radius(size),
        angle,
        offsets,
    }
}

/// Replace the asteroid set with a new belt for the current level.
///
/// Every asteroid is placed at least [`Tuning::spawn_clearance`] away from
/// the ship. Resets the tempo counters.
pub fn create_asteroid_belt(state: &mut GameState, rng: &mut impl RandomSource) {
    let tuning = &state.tuning;
    let count = tuning.asteroid_count(state.level);
    let clearance = tuning.spawn_clearance();

    state.asteroids.clear();
    state.asteroids_total = count * tuning.roids_total_factor;
    state.asteroids_remaining = state.asteroids_total;

    for _ in 0..count {
        let mut attempts = 0;
        let pos = loop {
            let pos = Vec2::new(
                rng.next_range(tuning.field_width).floor(),
                rng.next_range(tuning.field_height).floor(),
            );
            attempts += 1;
            if distance(state.ship.pos, pos) >= clearance {
                break pos;
            }
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                log::warn!(
                    "No clear spawn point after {} attempts, placing asteroid at {:?}",
                    attempts,
                    pos
                );
                break pos;
            }
        };
        let asteroid = new_asteroid(pos, AsteroidSize::Large, state.level, tuning, rng);
        state.asteroids.push(asteroid);
    }
}

/// Laser leaving the ship's nose along its heading
pub fn new_laser(ship: &Ship, tuning: &Tuning) -> Laser {
    Laser {
        pos: ship.nose(),
        vel: heading(ship.angle) * (tuning.laser_speed / tuning.fps as f32),
        traveled: 0.0,
        explode_ticks: 0,
    }
}
