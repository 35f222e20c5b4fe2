//! Score and biome progression derived from distance

use super::physics;
use super::state::{Biome, GameEvent, RunState};
use crate::consts::BIOME_COUNT;

/// Integer score for a distance: floor(distance / scale)
pub fn score_for_distance(distance: f64, scale: f32) -> u64 {
    (distance / scale as f64).floor() as u64
}

/// Biome for a distance: floor(distance / unit) mod biome count
pub fn biome_for_distance(distance: f64, unit: f32) -> Biome {
    let step = (distance / unit as f64).floor() as u64;
    Biome::from_index((step % BIOME_COUNT as u64) as usize)
}

/// Re-derive score and biome from the current distance, emitting change events
/// and the one-time trance trigger
pub fn update(state: &mut RunState, events: &mut Vec<GameEvent>) {
    let prev_score = state.score;
    state.score = score_for_distance(state.distance, state.tuning.score_scale);

    let biome = biome_for_distance(state.distance, state.tuning.biome_unit);
    if biome != state.biome {
        log::debug!("biome {:?} -> {:?} at distance {:.0}", state.biome, biome, state.distance);
        events.push(GameEvent::BiomeChanged {
            from: state.biome,
            to: biome,
        });
        state.biome = biome;
    }

    let threshold = state.tuning.trance_threshold;
    if prev_score < threshold
        && state.score >= threshold
        && physics::awaken(&mut state.player, &mut state.trance)
    {
        log::debug!("trance awakened at score {}", state.score);
        events.push(GameEvent::TranceAwakened);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character;
    use crate::sim::state::Trance;
    use crate::tuning::Tuning;

    #[test]
    fn test_score_floor() {
        assert_eq!(score_for_distance(0.0, 10.0), 0);
        assert_eq!(score_for_distance(9.99, 10.0), 0);
        assert_eq!(score_for_distance(10.0, 10.0), 1);
        assert_eq!(score_for_distance(12345.6, 10.0), 1234);
    }

    #[test]
    fn test_biome_cycles_every_unit() {
        assert_eq!(biome_for_distance(0.0, 3000.0), Biome::Abyss);
        assert_eq!(biome_for_distance(2999.9, 3000.0), Biome::Abyss);
        assert_eq!(biome_for_distance(3000.0, 3000.0), Biome::Hawkins);
        assert_eq!(biome_for_distance(6500.0, 3000.0), Biome::Lab);
        assert_eq!(biome_for_distance(9000.0, 3000.0), Biome::UpsideDown);
        assert_eq!(biome_for_distance(12000.0, 3000.0), Biome::Abyss);
    }

    #[test]
    fn test_biome_change_event_once() {
        let mut state =
            RunState::new(character::find("dustin").unwrap(), Tuning::default(), 1).unwrap();
        let mut events = Vec::new();

        state.distance = 2990.0;
        update(&mut state, &mut events);
        assert!(events.is_empty());

        state.distance = 3001.0;
        update(&mut state, &mut events);
        state.distance = 3010.0;
        update(&mut state, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::BiomeChanged {
                from: Biome::Abyss,
                to: Biome::Hawkins
            }]
        );
    }

    #[test]
    fn test_trance_trigger_only_on_crossing() {
        let mut state =
            RunState::new(character::find("max").unwrap(), Tuning::default(), 1).unwrap();
        let mut events = Vec::new();

        state.distance = 9_995.0;
        update(&mut state, &mut events);
        assert_eq!(state.trance, Some(Trance::Dormant));

        state.distance = 10_001.0;
        update(&mut state, &mut events);
        assert_eq!(state.trance, Some(Trance::Startup { elapsed: 0 }));
        assert!(events.contains(&GameEvent::TranceAwakened));

        // Staying above the threshold never re-fires
        events.clear();
        state.trance = Some(Trance::Spent);
        state.distance = 10_020.0;
        update(&mut state, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.trance, Some(Trance::Spent));
    }

    #[test]
    fn test_no_trance_for_other_characters() {
        let mut state =
            RunState::new(character::find("lucas").unwrap(), Tuning::default(), 1).unwrap();
        let mut events = Vec::new();
        state.score = 999;
        state.distance = 10_001.0;
        update(&mut state, &mut events);
        assert_eq!(state.trance, None);
        assert!(!events.contains(&GameEvent::TranceAwakened));
    }
}
