//! Asteroid destruction, splitting, scoring and level advance

use super::random::RandomSource;
use super::spawn::new_asteroid;
use super::state::{GameEvent, GameState};

/// Destroy the asteroid at `index`.
///
/// Large and medium asteroids leave two children of the next tier at the
/// same position, appended to the end of the set. The remaining asteroids
/// keep their relative order, so descending scans stay valid. Returns
/// `false` if the index is out of range.
pub fn destroy_asteroid(
    state: &mut GameState,
    index: usize,
    rng: &mut impl RandomSource,
) -> bool {
    if index >= state.asteroids.len() {
        return false;
    }

    let roid = state.asteroids.remove(index);
    let points = state.tuning.points(roid.size);

    if let Some(child) = roid.size.split() {
        for _ in 0..2 {
            let piece = new_asteroid(roid.pos, child, state.level, &state.tuning, rng);
            state.asteroids.push(piece);
        }
    }

    state.score += points;
    state.events.push(GameEvent::AsteroidDestroyed {
        size: roid.size,
        points,
    });
    log::debug!(
        "{:?} asteroid destroyed at ({:.0}, {:.0}), +{} points",
        roid.size,
        roid.pos.x,
        roid.pos.y,
        points
    );

    state.asteroids_remaining = state.asteroids_remaining.saturating_sub(1);
    state.events.push(GameEvent::TempoChanged {
        ratio: state.tempo_ratio(),
    });

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::HighScore { score: state.score });
    }

    if state.asteroids.is_empty() {
        state.level += 1;
        state.begin_level(rng);
    }

    true
}
