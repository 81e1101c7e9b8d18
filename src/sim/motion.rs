//! Per-tick motion: thrust, drag, rotation, Euler integration and
//! toroidal screen wrap.

use super::state::{Asteroid, Laser, Ship, Turn};
use crate::tuning::Tuning;
use crate::{heading, wrap_axis, wrap_position};

/// Set the rotation rate from the turn intent
pub fn steer(ship: &mut Ship, turn: Turn, tuning: &Tuning) {
    ship.rotation = match turn {
        Turn::None => 0.0,
        Turn::Left => tuning.turn_rate(),
        Turn::Right => -tuning.turn_rate(),
    };
}

/// Accelerate along the heading while thrusting, otherwise bleed speed
pub fn apply_thrust(ship: &mut Ship, tuning: &Tuning) {
    let fps = tuning.fps as f32;
    if ship.thrusting {
        ship.vel += heading(ship.angle) * (tuning.ship_thrust / fps);
    } else {
        apply_drag(ship, tuning);
    }
}

/// Exponential drag toward rest
pub fn apply_drag(ship: &mut Ship, tuning: &Tuning) {
    ship.vel -= ship.vel * (tuning.friction / tuning.fps as f32);
}

/// Rotate, move and wrap the ship
pub fn move_ship(ship: &mut Ship, tuning: &Tuning) {
    ship.angle += ship.rotation;
    ship.pos += ship.vel;
    ship.pos = wrap_position(
        ship.pos,
        ship.radius,
        tuning.field_width,
        tuning.field_height,
    );
}

/// Advance every laser, dropping spent ones.
///
/// Range expiry is checked before anything else; an exploding laser only
/// counts down and is removed when its explosion ends.
pub fn move_lasers(lasers: &mut Vec<Laser>, tuning: &Tuning) {
    let range = tuning.laser_range();
    lasers.retain_mut(|laser| {
        if laser.traveled > range {
            return false;
        }

        if laser.explode_ticks > 0 {
            laser.explode_ticks -= 1;
            if laser.explode_ticks == 0 {
                return false;
            }
        } else {
            laser.pos += laser.vel;
            laser.traveled += laser.vel.length();
        }

        laser.pos.x = wrap_axis(laser.pos.x, 0.0, tuning.field_width);
        laser.pos.y = wrap_axis(laser.pos.y, 0.0, tuning.field_height);
        true
    });
}

/// Drift every asteroid and wrap it by its own radius
pub fn move_asteroids(asteroids: &mut [Asteroid], tuning: &Tuning) {
    for roid in asteroids {
        roid.pos += roid.vel;
        roid.pos = wrap_position(
            roid.pos,
            roid.radius,
            tuning.field_width,
            tuning.field_height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::new_ship;
    use crate::sim::state::AsteroidSize;
    use glam::Vec2;
    use proptest::prelude::*;

    fn asteroid_at(pos: Vec2, vel: Vec2) -> Asteroid {
        Asteroid {
            pos,
            vel,
            size: AsteroidSize::Large,
            radius: 50.0,
            angle: 0.0,
            offsets: vec![1.0; 8],
        }
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let tuning = Tuning::default();
        let mut ship = new_ship(&tuning);
        ship.thrusting = true;
        apply_thrust(&mut ship, &tuning);
        assert!(ship.vel.x.abs() < 1e-6);
        assert!((ship.vel.y + 5.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_decays_without_stopping() {
        let tuning = Tuning::default();
        let mut ship = new_ship(&tuning);
        ship.vel = Vec2::new(6.0, 0.0);
        apply_thrust(&mut ship, &tuning);
        assert!((ship.vel.x - 6.0 * (1.0 - 0.7 / 60.0)).abs() < 1e-5);
        for _ in 0..600 {
            apply_thrust(&mut ship, &tuning);
        }
        assert!(ship.vel.x > 0.0);
        assert!(ship.vel.x < 0.01);
    }

    #[test]
    fn test_steer_sets_rate_without_momentum() {
        let tuning = Tuning::default();
        let mut ship = new_ship(&tuning);
        steer(&mut ship, Turn::Left, &tuning);
        move_ship(&mut ship, &tuning);
        assert!((ship.angle - (std::f32::consts::FRAC_PI_2 + tuning.turn_rate())).abs() < 1e-6);
        steer(&mut ship, Turn::None, &tuning);
        let before = ship.angle;
        move_ship(&mut ship, &tuning);
        assert_eq!(ship.angle, before);
        steer(&mut ship, Turn::Right, &tuning);
        assert_eq!(ship.rotation, -tuning.turn_rate());
    }

    #[test]
    fn test_asteroid_wraps_right_to_left() {
        let tuning = Tuning::default();
        let mut roids = vec![asteroid_at(Vec2::new(850.0, 300.0), Vec2::new(2.0, 0.0))];
        move_asteroids(&mut roids, &tuning);
        assert_eq!(roids[0].pos, Vec2::new(-50.0, 300.0));
        assert_eq!(roids[0].vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_laser_removed_past_range() {
        let tuning = Tuning::default();
        let mut lasers = vec![Laser {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
            traveled: 315.0,
            explode_ticks: 0,
        }];
        // 315 -> 325: still alive this tick, removed on the next
        move_lasers(&mut lasers, &tuning);
        assert_eq!(lasers.len(), 1);
        assert_eq!(lasers[0].traveled, 325.0);
        move_lasers(&mut lasers, &tuning);
        assert!(lasers.is_empty());
    }

    #[test]
    fn test_exploding_laser_holds_position_then_disappears() {
        let tuning = Tuning::default();
        let mut lasers = vec![Laser {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
            traveled: 0.0,
            explode_ticks: 2,
        }];
        move_lasers(&mut lasers, &tuning);
        assert_eq!(lasers[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(lasers[0].explode_ticks, 1);
        move_lasers(&mut lasers, &tuning);
        assert!(lasers.is_empty());
    }

    #[test]
    fn test_laser_wraps_without_radius() {
        let tuning = Tuning::default();
        let mut lasers = vec![Laser {
            pos: Vec2::new(798.0, 10.0),
            vel: Vec2::new(5.0, 0.0),
            traveled: 0.0,
            explode_ticks: 0,
        }];
        move_lasers(&mut lasers, &tuning);
        assert_eq!(lasers[0].pos, Vec2::new(0.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_velocity_and_bounds(
            x in -60.0f32..860.0,
            y in -60.0f32..660.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            let tuning = Tuning::default();
            let mut roids = vec![asteroid_at(Vec2::new(x, y), Vec2::new(vx, vy))];
            for _ in 0..50 {
                move_asteroids(&mut roids, &tuning);
                let p = roids[0].pos;
                prop_assert!(p.x >= -50.0 && p.x <= 850.0);
                prop_assert!(p.y >= -50.0 && p.y <= 650.0);
                prop_assert_eq!(roids[0].vel, Vec2::new(vx, vy));
            }
        }
    }
}
