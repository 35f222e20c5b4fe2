//! Run state and core simulation types
//!
//! Everything a tick reads or writes lives in `RunState`. A run owns exactly
//! one instance; restarting builds a fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::CharacterProfile;
use crate::consts::{AMBIENT_PARTICLES, BIOME_COUNT};
use crate::tuning::{ConfigError, Tuning};

/// Whole-run phase. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    Ended,
}

/// Trance ability sub-state, present only for ability-bearing characters
///
/// Transitions are one-directional: Dormant -> Startup -> Control -> Spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trance {
    /// Not yet triggered this run
    Dormant,
    /// Automatic rise; collisions are ignored
    Startup { elapsed: u32 },
    /// Player steers vertically; collisions are fatal again
    Control { elapsed: u32 },
    /// Used up for the rest of the run
    Spent,
}

impl Trance {
    /// True while the trance overrides normal physics
    pub fn is_active(&self) -> bool {
        matches!(self, Trance::Startup { .. } | Trance::Control { .. })
    }
}

/// Backdrop cycled purely by distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Abyss,
    Hawkins,
    Lab,
    UpsideDown,
}

impl Biome {
    pub const ALL: [Biome; BIOME_COUNT] = [Biome::Abyss, Biome::Hawkins, Biome::Lab, Biome::UpsideDown];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % BIOME_COUNT]
    }

    pub fn index(&self) -> usize {
        match self {
            Biome::Abyss => 0,
            Biome::Hawkins => 1,
            Biome::Lab => 2,
            Biome::UpsideDown => 3,
        }
    }

    /// HUD label
    pub fn as_str(&self) -> &'static str {
        match self {
            Biome::Abyss => "ABYSS",
            Biome::Hawkins => "HAWKINS",
            Biome::Lab => "LAB",
            Biome::UpsideDown => "UPSIDE DOWN",
        }
    }
}

/// The runner. X is fixed; only the vertical axis moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite footprint
    pub pos: Vec2,
    pub vel_y: f32,
    /// Full sprite footprint (the hurtbox is inset from this)
    pub size: Vec2,
    pub grounded: bool,
}

impl Player {
    /// A player standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.floor_y()),
            vel_y: 0.0,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            grounded: true,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground; must be jumped
    GroundSpike,
    /// Hovers above the ground; timed jump or stay low
    FloatingHazard,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Effective speed captured at spawn time
    pub speed: f32,
}

impl Obstacle {
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Ambient background particle (never collides)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

/// Notifications emitted by a tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BiomeChanged { from: Biome, to: Biome },
    /// Score crossed the trance threshold; startup begins
    TranceAwakened,
    /// Startup finished; the player now steers
    TranceControl,
    TranceEnded,
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    /// An overlap that the startup grace period swallowed
    CollisionIgnored { obstacle_id: u32 },
    /// Emitted exactly once per run
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub tuning: Tuning,
    pub character: CharacterProfile,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RunPhase,
    /// Simulation tick counter
    pub frame: u64,
    /// Cumulative distance, never decreasing
    pub distance: f64,
    /// Base scroll speed within [initial_speed, max_speed]
    pub base_speed: f32,
    pub score: u64,
    pub biome: Biome,
    /// Frame of the most recent spawn
    pub last_spawn_frame: u64,
    /// `None` for characters without the trance ability
    pub trance: Option<Trance>,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Fixed-size pool, created once at run start
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl RunState {
    /// Start a fresh run. Rejects invalid tuning or character stats.
    pub fn new(character: CharacterProfile, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        character.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..AMBIENT_PARTICLES)
            .map(|_| Particle {
                pos: Vec2::new(
                    rng.random::<f32>() * tuning.field_width,
                    rng.random::<f32>() * tuning.field_height,
                ),
                vel: Vec2::new(
                    -0.5 - rng.random::<f32>() * 2.0,
                    (rng.random::<f32>() - 0.5) * 0.5,
                ),
                size: 0.5 + rng.random::<f32>() * 2.0,
            })
            .collect();

        let trance = character.has_trance().then_some(Trance::Dormant);

        Ok(Self {
            player: Player::new(&tuning),
            base_speed: tuning.initial_speed,
            tuning,
            character,
            seed,
            rng,
            phase: RunPhase::Running,
            frame: 0,
            distance: 0.0,
            score: 0,
            biome: Biome::Abyss,
            last_spawn_frame: 0,
            trance,
            obstacles: Vec::new(),
            particles,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Base speed scaled by the character's multiplier
    pub fn effective_speed(&self) -> f32 {
        self.base_speed * self.character.stats.speed
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    /// Collisions are ignored while the trance is starting up
    pub fn in_grace_period(&self) -> bool {
        matches!(self.trance, Some(Trance::Startup { .. }))
    }

    /// Place an obstacle of the given kind at an explicit position, moving at the current effective speed
    pub fn insert_obstacle(&mut self, kind: ObstacleKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let size = Vec2::splat(self.tuning.obstacle_size);
        let speed = self.effective_speed();
        self.obstacles.push(Obstacle {
            id,
            kind,
            pos,
            size,
            speed,
        });
        id
    }
}
