//! Obstacle spawning
//!
//! Cadence tightens as effective speed rises, down to a floor interval. At
//! most one obstacle is introduced per interval window.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{ObstacleKind, RunState};
use crate::tuning::Tuning;

/// True once more than `interval` ticks have passed since the last spawn
pub fn spawn_due(frame: u64, last_spawn_frame: u64, interval: f32) -> bool {
    frame.saturating_sub(last_spawn_frame) as f32 > interval
}

/// Pick a kind and top-left position for a new obstacle
pub fn roll_obstacle(rng: &mut Pcg32, tuning: &Tuning) -> (ObstacleKind, Vec2) {
    let x = tuning.field_width + tuning.spawn_margin;
    if rng.random_bool(tuning.floating_chance) {
        let lift = tuning.floating_min_clearance + rng.random::<f32>() * tuning.floating_band;
        (ObstacleKind::FloatingHazard, Vec2::new(x, tuning.ground_y - lift))
    } else {
        (
            ObstacleKind::GroundSpike,
            Vec2::new(x, tuning.ground_y - tuning.obstacle_size),
        )
    }
}

/// Spawn an obstacle if the interval for the current speed has elapsed
pub fn update(state: &mut RunState) -> Option<(u32, ObstacleKind)> {
    let interval = state.tuning.spawn_interval(state.effective_speed());
    if !spawn_due(state.frame, state.last_spawn_frame, interval) {
        return None;
    }

    let (kind, pos) = roll_obstacle(&mut state.rng, &state.tuning);
    let id = state.insert_obstacle(kind, pos);
    state.last_spawn_frame = state.frame;
    Some((id, kind))
}
