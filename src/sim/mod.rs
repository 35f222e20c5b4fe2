//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick cadence, no delta time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ambient;
pub mod character;
pub mod collision;
pub mod physics;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use character::{Ability, CharacterProfile, Stats};
pub use collision::Aabb;
pub use snapshot::{RenderSnapshot, TranceView};
pub use state::{
    Biome, GameEvent, Obstacle, ObstacleKind, Particle, Player, RunPhase, RunState, Trance,
};
pub use tick::{TickInput, tick};
