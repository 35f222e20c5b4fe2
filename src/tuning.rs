//! Data-driven game balance
//!
//! Every rate is expressed in ticks at the reference cadence; nothing here is
//! scaled by wall-clock time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at construction time
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid character `{id}`: {reason}")]
    InvalidCharacter { id: String, reason: String },
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("unknown character `{0}`")]
    UnknownCharacter(String),
    #[error("failed to parse tuning: {0}")]
    Parse(String),
}

/// Play-field, speed, spawn and trance constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Y of the ground line (screen coordinates, y grows downward)
    pub ground_y: f32,
    /// Highest y the player's top edge may reach
    pub ceiling_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Hurtbox inset from the sprite footprint, applied on all four sides
    pub hurtbox_inset: f32,

    // === Speed ===
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,

    // === Progression ===
    /// Distance units per score point
    pub score_scale: f32,
    /// Distance units per biome
    pub biome_unit: f32,

    // === Spawner ===
    pub spawn_base_interval: f32,
    pub spawn_speed_slope: f32,
    pub spawn_floor_interval: f32,
    /// Chance that a spawn is a floating hazard rather than a ground spike
    pub floating_chance: f64,
    /// Distance past the right edge where obstacles appear
    pub spawn_margin: f32,
    pub obstacle_size: f32,
    /// Floating hazards sit between `ground_y - floating_min_clearance - floating_band`
    /// and `ground_y - floating_min_clearance`
    pub floating_min_clearance: f32,
    pub floating_band: f32,

    // === Trance ===
    pub trance_threshold: u64,
    pub trance_startup_ticks: u32,
    pub trance_total_ticks: u32,
    pub trance_rise: f32,
    pub trance_move: f32,
    pub trance_sink: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 450.0,
            ground_y: 380.0,
            ceiling_y: 40.0,

            player_x: 120.0,
            player_width: 32.0,
            player_height: 52.0,
            hurtbox_inset: 10.0,

            initial_speed: 3.8,
            max_speed: 20.0,
            speed_increment: 0.0002,

            score_scale: 10.0,
            biome_unit: 3000.0,

            spawn_base_interval: 80.0,
            spawn_speed_slope: 3.0,
            spawn_floor_interval: 15.0,
            floating_chance: 0.15,
            spawn_margin: 100.0,
            obstacle_size: 35.0,
            floating_min_clearance: 140.0,
            floating_band: 40.0,

            trance_threshold: 1000,
            trance_startup_ticks: 120,
            trance_total_ticks: 900,
            trance_rise: 1.5,
            trance_move: 4.0,
            trance_sink: 0.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject balance values that would produce degenerate runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::InvalidTuning(msg.to_string()));

        if !(self.initial_speed > 0.0) {
            return fail("initial_speed must be positive");
        }
        if !(self.max_speed >= self.initial_speed) {
            return fail("max_speed must be at least initial_speed");
        }
        if !(self.speed_increment >= 0.0) {
            return fail("speed_increment must not be negative");
        }
        if !(self.score_scale > 0.0) || !(self.biome_unit > 0.0) {
            return fail("score_scale and biome_unit must be positive");
        }
        if !(self.spawn_floor_interval > 0.0)
            || !(self.spawn_base_interval >= self.spawn_floor_interval)
        {
            return fail("spawn intervals must be positive with floor <= base");
        }
        if !(0.0..=1.0).contains(&self.floating_chance) {
            return fail("floating_chance must be within [0, 1]");
        }
        if !(self.hurtbox_inset >= 0.0)
            || self.hurtbox_inset * 2.0 >= self.player_width.min(self.player_height)
        {
            return fail("hurtbox_inset must leave a non-empty hurtbox");
        }
        if !(self.ceiling_y < self.ground_y - self.player_height) {
            return fail("ceiling_y must be above the grounded player's top edge");
        }
        if !(self.obstacle_size > 0.0) {
            return fail("obstacle_size must be positive");
        }
        if !(self.floating_min_clearance >= self.obstacle_size) {
            return fail("floating hazards must clear the ground by at least their own size");
        }
        if self.trance_threshold == 0 {
            return fail("trance_threshold must be at least 1");
        }
        if self.trance_startup_ticks > self.trance_total_ticks {
            return fail("trance startup cannot outlast the whole trance");
        }
        Ok(())
    }

    /// Y of the player's top edge when standing on the ground
    pub fn floor_y(&self) -> f32 {
        self.ground_y - self.player_height
    }

    /// Spawn interval in ticks for the given effective speed
    pub fn spawn_interval(&self, effective_speed: f32) -> f32 {
        (self.spawn_base_interval - self.spawn_speed_slope * effective_speed)
            .max(self.spawn_floor_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 12.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 12.0);
        assert_eq!(tuning.ground_y, 380.0);
        assert_eq!(tuning.trance_threshold, 1000);
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        let err = Tuning::from_json(r#"{ "initial_speed": 5.0, "max_speed": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_oversized_inset() {
        let tuning = Tuning {
            hurtbox_inset: 20.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_trance_threshold() {
        let err = Tuning::from_json(r#"{ "trance_threshold": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));
        assert!(Tuning::from_json(r#"{ "trance_threshold": 1 }"#).is_ok());
    }

    #[test]
    fn test_rejects_floating_hazard_at_ground_level() {
        let tuning = Tuning {
            floating_min_clearance: 20.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let touching = Tuning {
            floating_min_clearance: 35.0,
            ..Default::default()
        };
        assert_eq!(touching.validate(), Ok(()));
    }

    #[test]
    fn test_spawn_interval_floor() {
        let tuning = Tuning::default();
        // 80 - 3 * 6.08 = 61.76
        assert!((tuning.spawn_interval(3.8 * 1.6) - 61.76).abs() < 1e-3);
        assert_eq!(tuning.spawn_interval(32.0), 15.0);
    }
}
