//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected randomness only
//! - Stable iteration order (descending for laser hits, ascending for the ship)
//! - No rendering or platform dependencies

pub mod collision;
pub mod destroy;
pub mod motion;
pub mod random;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{resolve_laser_hits, resolve_ship_collision};
pub use destroy::destroy_asteroid;
pub use random::{RandomSource, ScriptedRandom, seeded};
pub use spawn::{create_asteroid_belt, new_asteroid, new_laser, new_ship};
pub use state::{
    Asteroid, AsteroidSize, GameEvent, GamePhase, GameState, Laser, Message, Ship, Turn,
};
pub use tick::{TickInput, Trigger, shoot_laser, tick};
