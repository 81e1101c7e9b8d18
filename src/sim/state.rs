//! Game state and core simulation types
//!
//! All state the per-tick loop reads or writes lives here. Randomness is not
//! part of the state; it is passed into each tick by the driver.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::spawn::{create_asteroid_belt, new_ship};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship under player control
    Playing,
    /// Ship destroyed, explosion running
    ShipExploding { ticks_left: u32 },
    /// Explosion over with lives left; a new ship arrives next tick
    Respawning,
    /// Out of lives, waiting for a new game
    GameOver,
}

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Tier produced when this asteroid breaks apart
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// A drifting asteroid with a fixed jagged outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    /// Polygon orientation (radians), not used for motion
    pub angle: f32,
    /// Per-vertex radius multipliers; one entry per polygon vertex
    pub offsets: Vec<f32>,
}

impl Asteroid {
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }
}

/// A laser bolt fired from the ship's nose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Distance traveled so far (pixels)
    pub traveled: f32,
    /// Explosion ticks remaining (0 = still flying)
    pub explode_ticks: u32,
}

impl Laser {
    pub fn is_exploding(&self) -> bool {
        self.explode_ticks > 0
    }
}

/// Direction of the turn intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    None,
    Left,
    Right,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading (radians, 0 = right, π/2 = up)
    pub angle: f32,
    /// Rotation applied this tick (radians)
    pub rotation: f32,
    /// Accumulated velocity (pixels per tick)
    pub vel: Vec2,
    pub thrusting: bool,
    /// Invulnerability blinks remaining
    pub blink_count: u32,
    /// Ticks left in the current blink
    pub blink_ticks: u32,
    /// Cleared by a shot, set again when the trigger is released
    pub can_shoot: bool,
    pub lasers: Vec<Laser>,
}

impl Ship {
    /// Tip of the ship, where lasers leave from
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading(self.angle) * (4.0 / 3.0 * self.radius)
    }

    /// Immune to asteroid collisions while blinking
    pub fn is_invulnerable(&self) -> bool {
        self.blink_count > 0
    }

    /// Blink phase for rendering; even blink counts are drawn
    pub fn blink_on(&self) -> bool {
        self.blink_count % 2 == 0
    }

    /// Advance the invulnerability countdown by one tick
    pub fn tick_blink(&mut self, blink_ticks: u32) {
        if self.blink_count == 0 {
            return;
        }
        self.blink_ticks = self.blink_ticks.saturating_sub(1);
        if self.blink_ticks == 0 {
            self.blink_ticks = blink_ticks;
            self.blink_count -= 1;
        }
    }
}

/// Fading announcement text ("Level 3", "Game Over")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub alpha: f32,
}

impl Message {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.alpha = 1.0;
    }

    pub fn fade(&mut self, step: f32) {
        self.alpha = (self.alpha - step).max(0.0);
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Cue for the collaborators (audio, persistence, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaserFired,
    AsteroidDestroyed { size: AsteroidSize, points: u64 },
    ShipExploded,
    ThrustStarted,
    ThrustStopped,
    /// Remaining/total asteroid ratio changed (drives music tempo)
    TempoChanged { ratio: f32 },
    /// Music back to its baseline tempo
    TempoReset,
    /// Score beat the stored high score
    HighScore { score: u64 },
    LevelStarted { level: u32 },
    LifeLost { lives: u8 },
    ShipRespawned,
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current level (0-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub message: Message,
    /// Tempo denominator for the current belt
    pub asteroids_total: u32,
    pub asteroids_remaining: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cues produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh game at level 0
    pub fn new_game(tuning: Tuning, high_score: u64, rng: &mut impl RandomSource) -> Self {
        let ship = new_ship(&tuning);
        let mut state = Self {
            lives: tuning.lives,
            tuning,
            level: 0,
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            ship,
            asteroids: Vec::new(),
            message: Message {
                text: String::new(),
                alpha: 0.0,
            },
            asteroids_total: 0,
            asteroids_remaining: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        log::info!("New game (high score {})", high_score);
        state.begin_level(rng);
        state
    }

    /// Announce the current level and generate its belt
    pub fn begin_level(&mut self, rng: &mut impl RandomSource) {
        self.message.show(format!("Level {}", self.level + 1));
        create_asteroid_belt(self, rng);
        self.events.push(GameEvent::LevelStarted { level: self.level });
        log::info!(
            "Level {} started with {} asteroids",
            self.level + 1,
            self.asteroids.len()
        );
    }

    /// Take all queued cues
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remaining/total asteroid ratio in `0..=1`
    pub fn tempo_ratio(&self) -> f32 {
        if self.asteroids_remaining == 0 || self.asteroids_total == 0 {
            1.0
        } else {
            self.asteroids_remaining as f32 / self.asteroids_total as f32
        }
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.phase, GamePhase::ShipExploding { .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether the ship responds to input and can collide
    pub fn ship_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
