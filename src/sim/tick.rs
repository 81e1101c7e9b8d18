//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame, plus the
//! phase transitions of the ship life cycle.

use serde::{Deserialize, Serialize};

use super::collision::{resolve_laser_hits, resolve_ship_collision};
use super::motion::{apply_thrust, move_asteroids, move_lasers, move_ship, steer};
use super::random::RandomSource;
use super::spawn::{new_laser, new_ship};
use super::state::{GameEvent, GamePhase, GameState, Turn};

/// Fire button edge, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Pull,
    Release,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub turn: Turn,
    pub thrust: bool,
    /// Fire edges since the previous tick
    pub trigger: Vec<Trigger>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) {
    if state.phase == GamePhase::Respawning {
        respawn(state);
    }

    state.time_ticks += 1;

    // Timers run on the phase carried over from the previous tick
    match state.phase {
        GamePhase::Playing => {
            let blink_ticks = state.tuning.blink_ticks();
            state.ship.tick_blink(blink_ticks);
        }
        GamePhase::ShipExploding { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                end_explosion(state);
            } else {
                state.phase = GamePhase::ShipExploding { ticks_left };
            }
        }
        GamePhase::Respawning | GamePhase::GameOver => {}
    }

    if state.ship_active() {
        control_ship(state, input);
    }

    move_lasers(&mut state.ship.lasers, &state.tuning);
    move_asteroids(&mut state.asteroids, &state.tuning);

    if !state.is_game_over() {
        resolve_laser_hits(state, rng);
        resolve_ship_collision(state, rng);
    }

    let fade = state.tuning.text_fade_step();
    state.message.fade(fade);
}

/// Apply rotation, thrust and fire intents, then move the ship
fn control_ship(state: &mut GameState, input: &TickInput) {
    steer(&mut state.ship, input.turn, &state.tuning);
    set_thrusting(state, input.thrust);
    apply_thrust(&mut state.ship, &state.tuning);

    for trigger in &input.trigger {
        match trigger {
            Trigger::Pull => {
                shoot_laser(state);
            }
            Trigger::Release => state.ship.can_shoot = true,
        }
    }

    move_ship(&mut state.ship, &state.tuning);
}

fn set_thrusting(state: &mut GameState, thrusting: bool) {
    if state.ship.thrusting == thrusting {
        return;
    }
    state.ship.thrusting = thrusting;
    state.events.push(if thrusting {
        GameEvent::ThrustStarted
    } else {
        GameEvent::ThrustStopped
    });
}

/// Fire from the nose if armed and under the laser cap.
///
/// Pulling the trigger disarms it whether or not a laser left; a full
/// queue silently swallows the shot.
pub fn shoot_laser(state: &mut GameState) -> bool {
    let fired = state.ship.can_shoot && state.ship.lasers.len() < state.tuning.laser_max;
    if fired {
        let laser = new_laser(&state.ship, &state.tuning);
        state.ship.lasers.push(laser);
        state.events.push(GameEvent::LaserFired);
    }
    state.ship.can_shoot = false;
    fired
}

/// Playing -> ShipExploding
pub fn explode_ship(state: &mut GameState) {
    let ticks_left = state.tuning.ship_explode_ticks();
    state.phase = GamePhase::ShipExploding { ticks_left };
    state.ship.rotation = 0.0;
    set_thrusting(state, false);
    state.events.push(GameEvent::ShipExploded);
    log::debug!(
        "Ship exploded at ({:.0}, {:.0}), {} lives left",
        state.ship.pos.x,
        state.ship.pos.y,
        state.lives
    );
}

/// ShipExploding -> Respawning | GameOver
fn end_explosion(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost { lives: state.lives });
    if state.lives == 0 {
        game_over(state);
    } else {
        state.phase = GamePhase::Respawning;
    }
}

/// Respawning -> Playing with a fresh, invulnerable ship
fn respawn(state: &mut GameState) {
    state.ship = new_ship(&state.tuning);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::ShipRespawned);
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.message.show("Game Over");
    state.events.push(GameEvent::TempoReset);
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} at level {} (high score {})",
        state.score,
        state.level + 1,
        state.high_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::seeded;
    use crate::sim::state::{Asteroid, AsteroidSize};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> GameState {
        let mut rng = seeded(seed);
        let mut state = GameState::new_game(Tuning::default(), 0, &mut rng);
        state.events.clear();
        state
    }

    fn still_roid(x: f32, y: f32, size: AsteroidSize) -> Asteroid {
        Asteroid {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size,
            radius: Tuning::default().asteroid_radius(size),
            angle: 0.0,
            offsets: vec![1.0; 10],
        }
    }

    fn pull() -> TickInput {
        TickInput {
            trigger: vec![Trigger::Pull],
            ..Default::default()
        }
    }

    #[test]
    fn test_laser_destroys_asteroid_ahead() {
        let mut state = fresh(1);
        state.asteroids = vec![still_roid(400.0, 100.0, AsteroidSize::Large)];
        let mut rng = seeded(2);

        tick(&mut state, &pull(), &mut rng);
        assert_eq!(state.ship.lasers.len(), 1);

        let idle = TickInput::default();
        for _ in 0..30 {
            tick(&mut state, &idle, &mut rng);
        }

        assert_eq!(state.score, 20);
        assert_eq!(state.asteroids.len(), 2);
        for roid in &state.asteroids {
            assert_eq!(roid.size, AsteroidSize::Medium);
            // Children drift well under a pixel per tick
            assert!(roid.pos.distance(Vec2::new(400.0, 100.0)) < 30.0);
        }
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut state = fresh(1);
        let mut rng = seeded(2);
        tick(&mut state, &pull(), &mut rng);
        // Holding the button: no further pulls, no further shots
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.ship.lasers.len(), 1);
        assert!(!state.ship.can_shoot);

        // Release and pull again within one tick
        let input = TickInput {
            trigger: vec![Trigger::Release, Trigger::Pull],
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.ship.lasers.len(), 2);

        // Tap: pull then release leaves the trigger armed
        let input = TickInput {
            trigger: vec![Trigger::Release, Trigger::Pull, Trigger::Release],
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.ship.lasers.len(), 3);
        assert!(state.ship.can_shoot);
    }

    #[test]
    fn test_collision_explodes_then_costs_a_life() {
        let mut state = fresh(3);
        state.ship.blink_count = 0;
        state.asteroids = vec![
            still_roid(400.0, 300.0, AsteroidSize::Small),
            still_roid(700.0, 550.0, AsteroidSize::Large),
        ];
        let mut rng = seeded(4);
        let idle = TickInput::default();

        tick(&mut state, &idle, &mut rng);
        assert_eq!(state.phase, GamePhase::ShipExploding { ticks_left: 18 });
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::ShipExploded));

        for _ in 0..17 {
            tick(&mut state, &idle, &mut rng);
        }
        assert_eq!(state.lives, 3);
        assert!(state.is_exploding());

        tick(&mut state, &idle, &mut rng);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Respawning);

        tick(&mut state, &idle, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.blink_count, 30);
    }

    #[test]
    fn test_exploding_ship_ignores_input() {
        let mut state = fresh(3);
        state.phase = GamePhase::ShipExploding { ticks_left: 10 };
        state.asteroids = vec![still_roid(700.0, 550.0, AsteroidSize::Large)];
        let pos = state.ship.pos;
        let angle = state.ship.angle;
        let mut rng = seeded(4);
        let input = TickInput {
            turn: Turn::Left,
            thrust: true,
            trigger: vec![Trigger::Pull],
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.ship.pos, pos);
        assert_eq!(state.ship.angle, angle);
        assert!(state.ship.lasers.is_empty());
    }

    #[test]
    fn test_last_life_ends_game_and_freezes_ship() {
        let mut state = fresh(5);
        state.lives = 1;
        state.ship.blink_count = 0;
        state.asteroids = vec![
            still_roid(400.0, 300.0, AsteroidSize::Small),
            still_roid(700.0, 550.0, AsteroidSize::Large),
        ];
        let mut rng = seeded(6);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };

        for _ in 0..19 {
            tick(&mut state, &thrust, &mut rng);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.message.text, "Game Over");
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::TempoReset));
        assert!(events.contains(&GameEvent::GameOver { score: 100 }));

        let pos = state.ship.pos;
        for _ in 0..120 {
            tick(&mut state, &thrust, &mut rng);
        }
        assert_eq!(state.ship.pos, pos);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_thrust_events_are_edges() {
        let mut state = fresh(1);
        let mut rng = seeded(2);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &thrust, &mut rng);
        tick(&mut state, &thrust, &mut rng);
        tick(&mut state, &TickInput::default(), &mut rng);
        let thrust_events: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ThrustStarted | GameEvent::ThrustStopped))
            .collect();
        assert_eq!(
            thrust_events,
            vec![GameEvent::ThrustStarted, GameEvent::ThrustStopped]
        );
    }

    #[test]
    fn test_message_fades_over_text_fade_time() {
        let mut state = fresh(1);
        state.asteroids = vec![still_roid(700.0, 550.0, AsteroidSize::Large)];
        let mut rng = seeded(2);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(!state.message.is_faded());
        for _ in 0..51 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(state.message.is_faded());
    }

    #[test]
    fn test_invulnerability_expires_after_three_seconds() {
        let mut state = fresh(1);
        state.asteroids = vec![still_roid(700.0, 550.0, AsteroidSize::Large)];
        let mut rng = seeded(2);
        for _ in 0..179 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(state.ship.is_invulnerable());
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(!state.ship.is_invulnerable());
    }

    proptest! {
        #[test]
        fn prop_laser_cap_holds(edges in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut state = fresh(8);
            state.asteroids.clear();
            state.asteroids.push(still_roid(0.0, 0.0, AsteroidSize::Large));
            let mut rng = seeded(9);
            for pulled in edges {
                let trigger = if pulled {
                    vec![Trigger::Pull, Trigger::Release]
                } else {
                    vec![]
                };
                let input = TickInput { turn: Turn::Left, thrust: false, trigger };
                tick(&mut state, &input, &mut rng);
                prop_assert!(state.ship.lasers.len() <= state.tuning.laser_max);
            }
        }

        #[test]
        fn prop_score_never_decreases(seed in 0u64..500) {
            let mut rng = seeded(seed);
            let mut state = GameState::new_game(Tuning::default(), 0, &mut rng);
            let mut last = 0;
            for i in 0..600u32 {
                let trigger = if i % 4 == 0 {
                    vec![Trigger::Pull, Trigger::Release]
                } else {
                    vec![]
                };
                let input = TickInput { turn: Turn::Right, thrust: i % 90 < 20, trigger };
                tick(&mut state, &input, &mut rng);
                prop_assert!(state.score >= last);
                prop_assert!(state.high_score >= state.score);
                last = state.score;
            }
        }
    }
}
