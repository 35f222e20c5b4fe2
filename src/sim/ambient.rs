//! Ambient background particles
//!
//! Purely visual: they drift with the scroll speed, wrap at the field edges
//! and never take part in collision.

use super::state::Particle;
use crate::tuning::Tuning;

/// Reference speed at which particles drift at their own velocity
const DRIFT_REFERENCE_SPEED: f32 = 4.0;

/// Advance every particle one tick, wrapping on both axes
pub fn update(particles: &mut [Particle], effective_speed: f32, tuning: &Tuning) {
    let drift = effective_speed / DRIFT_REFERENCE_SPEED;
    for p in particles.iter_mut() {
        p.pos.x += p.vel.x * drift;
        p.pos.y += p.vel.y;

        if p.pos.x < 0.0 {
            p.pos.x = tuning.field_width;
        } else if p.pos.x > tuning.field_width {
            p.pos.x = 0.0;
        }
        if p.pos.y > tuning.field_height {
            p.pos.y = 0.0;
        } else if p.pos.y < 0.0 {
            p.pos.y = tuning.field_height;
        }
    }
}
