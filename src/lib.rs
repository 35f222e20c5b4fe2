//! Void Runner - a single-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, progression)
//! - `render`: Sprite capability seam between snapshots and a host canvas
//! - `session`: Host-side orchestration of runs, stats and collaborators
//! - `death_message`: Asynchronous game-over text with timeout and fallback
//! - `persistence`: High-score storage backends
//! - `tuning`: Data-driven game balance

pub mod death_message;
pub mod highscores;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants that are not part of the tunable balance
pub mod consts {
    /// Reference tick rate. All rates in `Tuning` are expressed per tick at this cadence.
    pub const TICK_RATE_HZ: u32 = 60;

    /// Number of biomes in the fixed cycle
    pub const BIOME_COUNT: usize = 4;

    /// Size of the ambient particle pool, created once per run
    pub const AMBIENT_PARTICLES: usize = 100;

    /// Default timeout for the death-message collaborator
    pub const DEATH_MESSAGE_TIMEOUT_MS: u64 = 8_000;
}
