//! Asteroids - the 1979 arcade classic
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `input`: Key events to ship intents
//! - `render`: Renderer contract and shape geometry
//! - `audio`: Sound contract and music beat scheduling
//! - `persistence`: High score slot storage
//! - `tuning`: Data-driven game balance
//! - `game`: Per-frame driver wiring the simulation to its collaborators

pub mod audio;
pub mod error;
pub mod game;
pub mod highscore;
pub mod input;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{ConfigError, PersistError};
pub use game::Game;
pub use highscore::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation ticks per second
    pub const FPS: u32 = 60;
    /// Friction coefficient of space (0 = none, 1 = lots)
    pub const FRICTION: f32 = 0.7;
    /// Starting number of lives
    pub const GAME_LIVES: u8 = 3;

    /// Playfield dimensions in pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Maximum number of lasers on screen at once
    pub const LASER_MAX: usize = 10;
    /// Laser speed (pixels/s)
    pub const LASER_SPEED: f32 = 500.0;
    /// Max laser travel as a fraction of the field width
    pub const LASER_DISTANCE: f32 = 0.4;
    /// Laser explosion duration (s)
    pub const LASER_EXPLODE_DURATION: f32 = 0.1;

    /// Asteroid jaggedness (0 = round, 1 = very jagged)
    pub const ROIDS_JAG: f32 = 0.3;
    pub const ROIDS_LARGE_POINTS: u64 = 20;
    pub const ROIDS_MEDIUM_POINTS: u64 = 50;
    pub const ROIDS_SMALL_POINTS: u64 = 100;
    /// Asteroids in the level 0 belt
    pub const ROIDS_NUM: u32 = 1;
    /// Large asteroid diameter (pixels)
    pub const ROIDS_SIZE: f32 = 100.0;
    /// Max asteroid speed at level 0 (pixels/s)
    pub const ROIDS_SPEED: f32 = 50.0;
    /// Average polygon vertex count
    pub const ROIDS_VERT: u32 = 10;
    /// Extra speed per level (multiplicative, 1 + 0.1 * level)
    pub const ROIDS_LEVEL_SPEEDUP: f32 = 0.1;
    /// Asteroid total counter per belt asteroid (tempo denominator)
    pub const ROIDS_TOTAL_FACTOR: u32 = 7;

    /// Ship height (pixels)
    pub const SHIP_SIZE: f32 = 30.0;
    /// Ship acceleration (pixels/s²)
    pub const SHIP_THRUST: f32 = 5.0;
    /// Ship explosion duration (s)
    pub const SHIP_EXPLODE_DURATION: f32 = 0.3;
    /// Invulnerability after (re)spawn (s)
    pub const SHIP_INVULNERABILITY_DURATION: f32 = 3.0;
    /// Duration of one blink during invulnerability (s)
    pub const SHIP_BLINK_DURATION: f32 = 0.1;
    /// Turn speed (degrees/s)
    pub const TURN_SPEED: f32 = 360.0;

    /// Message fade-out time (s)
    pub const TEXT_FADE_TIME: f32 = 2.5;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit heading for an angle, screen space (y grows downward)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Toroidal wrap of one coordinate.
///
/// A value past `dim + radius` reappears at `-radius` and vice versa.
#[inline]
pub fn wrap_axis(value: f32, radius: f32, dim: f32) -> f32 {
    if value < -radius {
        dim + radius
    } else if value > dim + radius {
        -radius
    } else {
        value
    }
}

/// Wrap a position on both axes
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, radius, width),
        wrap_axis(pos.y, radius, height),
    )
}

/// Convert a duration in seconds to whole ticks, rounding up
#[inline]
pub fn secs_to_ticks(secs: f32, fps: u32) -> u32 {
    (secs * fps as f32).ceil().max(0.0) as u32
}
