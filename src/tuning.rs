//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override any subset
//! of them. Missing keys fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::secs_to_ticks;
use crate::sim::state::AsteroidSize;

/// Runtime-tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    pub fps: u32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    pub ship_size: f32,
    pub ship_thrust: f32,
    pub friction: f32,
    /// Degrees per second
    pub turn_speed: f32,
    pub ship_explode_duration: f32,
    pub invulnerability_duration: f32,
    pub blink_duration: f32,
    pub lives: u8,

    // === Lasers ===
    pub laser_max: usize,
    pub laser_speed: f32,
    pub laser_distance: f32,
    pub laser_explode_duration: f32,

    // === Asteroids ===
    pub roids_num: u32,
    pub roids_size: f32,
    pub roids_speed: f32,
    pub roids_vert: u32,
    pub roids_jag: f32,
    pub roids_level_speedup: f32,
    pub roids_total_factor: u32,
    pub large_points: u64,
    pub medium_points: u64,
    pub small_points: u64,

    // === HUD ===
    pub text_fade_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_size: SHIP_SIZE,
            ship_thrust: SHIP_THRUST,
            friction: FRICTION,
            turn_speed: TURN_SPEED,
            ship_explode_duration: SHIP_EXPLODE_DURATION,
            invulnerability_duration: SHIP_INVULNERABILITY_DURATION,
            blink_duration: SHIP_BLINK_DURATION,
            lives: GAME_LIVES,

            laser_max: LASER_MAX,
            laser_speed: LASER_SPEED,
            laser_distance: LASER_DISTANCE,
            laser_explode_duration: LASER_EXPLODE_DURATION,

            roids_num: ROIDS_NUM,
            roids_size: ROIDS_SIZE,
            roids_speed: ROIDS_SPEED,
            roids_vert: ROIDS_VERT,
            roids_jag: ROIDS_JAG,
            roids_level_speedup: ROIDS_LEVEL_SPEEDUP,
            roids_total_factor: ROIDS_TOTAL_FACTOR,
            large_points: ROIDS_LARGE_POINTS,
            medium_points: ROIDS_MEDIUM_POINTS,
            small_points: ROIDS_SMALL_POINTS,

            text_fade_time: TEXT_FADE_TIME,
        }
    }
}

impl Tuning {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(
            name: &'static str,
            value: f64,
            ok: bool,
            expected: &'static str,
        ) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected,
                })
            }
        }

        check("fps", self.fps as f64, self.fps > 0, "> 0")?;
        check(
            "field_width",
            self.field_width as f64,
            self.field_width > 0.0,
            "> 0",
        )?;
        check(
            "field_height",
            self.field_height as f64,
            self.field_height > 0.0,
            "> 0",
        )?;
        check("ship_size", self.ship_size as f64, self.ship_size > 0.0, "> 0")?;
        check(
            "friction",
            self.friction as f64,
            (0.0..=self.fps as f32).contains(&self.friction),
            "0..=fps",
        )?;
        check("lives", self.lives as f64, self.lives >= 1, ">= 1")?;
        check("laser_max", self.laser_max as f64, self.laser_max >= 1, ">= 1")?;
        check(
            "laser_distance",
            self.laser_distance as f64,
            self.laser_distance > 0.0,
            "> 0",
        )?;
        check(
            "laser_explode_duration",
            self.laser_explode_duration as f64,
            self.laser_explode_duration > 0.0,
            "> 0",
        )?;
        check("roids_num", self.roids_num as f64, self.roids_num >= 1, ">= 1")?;
        check("roids_size", self.roids_size as f64, self.roids_size > 0.0, "> 0")?;
        check(
            "roids_speed",
            self.roids_speed as f64,
            self.roids_speed >= 0.0,
            ">= 0",
        )?;
        check("roids_vert", self.roids_vert as f64, self.roids_vert >= 2, ">= 2")?;
        check(
            "roids_jag",
            self.roids_jag as f64,
            (0.0..1.0).contains(&self.roids_jag),
            "0..1",
        )?;
        check(
            "blink_duration",
            self.blink_duration as f64,
            self.blink_duration > 0.0,
            "> 0",
        )?;
        check(
            "text_fade_time",
            self.text_fade_time as f64,
            self.text_fade_time > 0.0,
            "> 0",
        )?;
        Ok(())
    }

    /// Ship collision radius
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Rotation applied per tick while a turn key is held
    pub fn turn_rate(&self) -> f32 {
        self.turn_speed.to_radians() / self.fps as f32
    }

    /// Collision radius for an asteroid tier
    pub fn asteroid_radius(&self, size: AsteroidSize) -> f32 {
        let divisor = match size {
            AsteroidSize::Large => 2.0,
            AsteroidSize::Medium => 4.0,
            AsteroidSize::Small => 8.0,
        };
        (self.roids_size / divisor).ceil()
    }

    /// Points awarded for destroying an asteroid tier
    pub fn points(&self, size: AsteroidSize) -> u64 {
        match size {
            AsteroidSize::Large => self.large_points,
            AsteroidSize::Medium => self.medium_points,
            AsteroidSize::Small => self.small_points,
        }
    }

    /// Belt size for a level
    pub fn asteroid_count(&self, level: u32) -> u32 {
        self.roids_num + level
    }

    /// Asteroid speed multiplier for a level
    pub fn level_speed_multiplier(&self, level: u32) -> f32 {
        1.0 + self.roids_level_speedup * level as f32
    }

    /// Minimum belt spawn distance from the ship centre
    pub fn spawn_clearance(&self) -> f32 {
        self.roids_size * 2.0 + self.ship_radius()
    }

    /// Number of blinks in a full invulnerability budget
    pub fn blink_count(&self) -> u32 {
        (self.invulnerability_duration / self.blink_duration).ceil() as u32
    }

    pub fn blink_ticks(&self) -> u32 {
        secs_to_ticks(self.blink_duration, self.fps)
    }

    pub fn ship_explode_ticks(&self) -> u32 {
        secs_to_ticks(self.ship_explode_duration, self.fps)
    }

    pub fn laser_explode_ticks(&self) -> u32 {
        secs_to_ticks(self.laser_explode_duration, self.fps)
    }

    /// Max laser travel before removal
    pub fn laser_range(&self) -> f32 {
        self.laser_distance * self.field_width
    }

    /// Message alpha lost per tick
    pub fn text_fade_step(&self) -> f32 {
        1.0 / self.text_fade_time / self.fps as f32
    }
}
