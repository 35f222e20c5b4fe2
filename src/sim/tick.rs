//! Fixed-cadence simulation tick
//!
//! One call advances the run by exactly one tick. There is no delta time:
//! every rate in `Tuning` is per tick.

use super::state::{GameEvent, RunPhase, RunState};
use super::{ambient, collision, physics, progression, spawner};
use physics::TranceTransition;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump pressed since the last tick (edge, not hold)
    pub jump: bool,
    /// Trance: rise while held
    pub ability_up: bool,
    /// Trance: descend while held
    pub ability_down: bool,
}

/// Advance the run by one tick, appending anything notable to `events`
///
/// Order: speed, distance, progression, physics, particles, spawner,
/// obstacle motion, collision. Does nothing once the run has ended.
pub fn tick(state: &mut RunState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if state.is_over() {
        return;
    }

    state.frame += 1;

    state.base_speed = (state.base_speed + state.tuning.speed_increment).min(state.tuning.max_speed);
    let speed = state.effective_speed();
    state.distance += speed as f64;

    progression::update(state, events);

    let transition = physics::step_player(
        &mut state.player,
        &mut state.trance,
        &state.character.stats,
        &state.tuning,
        input,
    );
    match transition {
        Some(TranceTransition::Control) => {
            log::debug!("trance control at frame {}", state.frame);
            events.push(GameEvent::TranceControl);
        }
        Some(TranceTransition::Ended) => {
            log::debug!("trance ended at frame {}", state.frame);
            events.push(GameEvent::TranceEnded);
        }
        None => {}
    }

    ambient::update(&mut state.particles, speed, &state.tuning);

    if let Some((id, kind)) = spawner::update(state) {
        events.push(GameEvent::ObstacleSpawned { id, kind });
    }

    advance_obstacles(state);

    let hits = collision::overlapping(&state.player, &state.obstacles, state.tuning.hurtbox_inset);
    if hits.is_empty() {
        return;
    }
    if state.in_grace_period() {
        events.extend(
            hits.into_iter()
                .map(|obstacle_id| GameEvent::CollisionIgnored { obstacle_id }),
        );
        return;
    }

    state.phase = RunPhase::Ended;
    log::info!(
        "run over: score {} at frame {} ({} in {})",
        state.score,
        state.frame,
        state.character.id,
        state.biome.as_str()
    );
    events.push(GameEvent::GameOver { score: state.score });
}

/// Scroll obstacles left by their captured speed and retire the ones fully off-screen
pub(crate) fn advance_obstacles(state: &mut RunState) {
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= obstacle.speed;
    }
    state.obstacles.retain(|o| o.right_edge() >= 0.0);
}
