//! Sprite seam between snapshots and a host canvas
//!
//! The crate never touches pixels. `draw` walks a `RenderSnapshot` and
//! tells a `Canvas` what to put where; the host decides how sprites look.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::snapshot::RenderSnapshot;
use crate::sim::{Biome, ObstacleKind};

/// Grounded player bob: amplitude and per-frame phase step
const BOB_AMPLITUDE: f32 = 2.0;
const BOB_RATE: f64 = 0.2;
/// Demogorgon hover: amplitude and per-frame phase step
const HOVER_AMPLITUDE: f32 = 10.0;
const HOVER_RATE: f64 = 0.1;

/// What to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteKey {
    Character { id: String, levitating: bool },
    Spike,
    Demogorgon,
}

impl SpriteKey {
    pub fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::GroundSpike => SpriteKey::Spike,
            ObstacleKind::FloatingHazard => SpriteKey::Demogorgon,
        }
    }
}

/// Drawing capability provided by the host
pub trait Canvas {
    /// Clear and paint the biome backdrop; `distance` drives parallax
    fn background(&mut self, biome: Biome, distance: f64);

    /// Place a sprite with its top-left corner at `pos`
    fn sprite(&mut self, key: &SpriteKey, pos: Vec2, frame: u64);

    /// Ambient particle. Hosts without particle effects can ignore it.
    fn particle(&mut self, _pos: Vec2, _size: f32) {}
}

fn wave(frame: u64, rate: f64, amplitude: f32) -> f32 {
    ((frame as f64 * rate).sin() as f32) * amplitude
}

/// Vertical bob of the grounded player sprite
pub fn bob_offset(frame: u64, settings: &Settings) -> f32 {
    if settings.sprite_motion() {
        wave(frame, BOB_RATE, BOB_AMPLITUDE)
    } else {
        0.0
    }
}

/// Vertical hover of a floating hazard sprite
pub fn hover_offset(frame: u64, settings: &Settings) -> f32 {
    if settings.sprite_motion() {
        wave(frame, HOVER_RATE, HOVER_AMPLITUDE)
    } else {
        0.0
    }
}

/// Issue the canvas calls for one frame: background, particles, obstacles, player
pub fn draw(snapshot: &RenderSnapshot, settings: &Settings, canvas: &mut dyn Canvas) {
    let frame = snapshot.frame;

    canvas.background(snapshot.biome, snapshot.distance);

    for p in &snapshot.particles {
        canvas.particle(Vec2::new(p.x, p.y), p.size);
    }

    for o in &snapshot.obstacles {
        let key = SpriteKey::for_obstacle(o.kind);
        let dy = match key {
            SpriteKey::Demogorgon => hover_offset(frame, settings),
            _ => 0.0,
        };
        canvas.sprite(&key, Vec2::new(o.x, o.y + dy), frame);
    }

    let player = &snapshot.player;
    let dy = if player.grounded {
        bob_offset(frame, settings)
    } else {
        0.0
    };
    let key = SpriteKey::Character {
        id: snapshot.character_id.clone(),
        levitating: snapshot.levitating(),
    };
    canvas.sprite(&key, Vec2::new(player.x, player.y + dy), frame);
}
