//! Character profiles
//!
//! A profile is immutable for the whole run. Only the physics-relevant stats
//! and the ability tag matter to the simulation; the rest is display data.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Special ability a character may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// Score-triggered levitation: automatic rise, then directional control
    Trance,
}

/// Physics stats for a character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Multiplier applied to the base scroll speed
    pub speed: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_impulse: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
}

/// A validated, selectable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: String,
    pub name: String,
    pub tagline: String,
    /// Hex color used by hosts for UI accents
    pub color: String,
    pub stats: Stats,
    pub ability: Option<Ability>,
}

impl CharacterProfile {
    /// Build a profile, rejecting stats that would give degenerate physics
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: Stats,
        ability: Option<Ability>,
    ) -> Result<Self, ConfigError> {
        let profile = Self {
            id: id.into(),
            name: name.into(),
            tagline: String::new(),
            color: String::from("#ffffff"),
            stats,
            ability,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the physics stats; profiles can be assembled by hand since fields are public
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidCharacter {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        let stats = &self.stats;

        if !stats.speed.is_finite() || stats.speed <= 0.0 {
            return Err(invalid("speed multiplier must be positive"));
        }
        if !stats.jump_impulse.is_finite() || stats.jump_impulse >= 0.0 {
            return Err(invalid("jump impulse must be negative (upward)"));
        }
        if !stats.gravity.is_finite() || stats.gravity <= 0.0 {
            return Err(invalid("gravity must be positive"));
        }
        Ok(())
    }

    fn with_flavor(mut self, tagline: &str, color: &str) -> Self {
        self.tagline = tagline.to_string();
        self.color = color.to_string();
        self
    }

    pub fn has_trance(&self) -> bool {
        self.ability == Some(Ability::Trance)
    }
}

/// (id, name, tagline, color, speed, jump, gravity, ability)
type RosterRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f32,
    f32,
    f32,
    Option<Ability>,
);

const ROSTER: [RosterRow; 5] = [
    ("dustin", "DUSTIN", "The Bard. \"I am on a curiosity voyage!\"", "#3b82f6", 1.6, -15.0, 0.7, None),
    ("el", "EL", "The Mage. \"Friends don't lie.\"", "#ec4899", 1.6, -13.0, 0.4, None),
    ("max", "MAX", "The Zoomer. \"Totally tubular.\"", "#f97316", 1.6, -14.0, 0.8, Some(Ability::Trance)),
    ("lucas", "LUCAS", "The Ranger. \"Stay on the path.\"", "#10b981", 1.6, -17.0, 1.0, None),
    ("mike", "MIKE", "The Paladin. \"Something is coming.\"", "#6366f1", 1.6, -15.0, 0.75, None),
];

/// All selectable characters, in menu order
pub fn roster() -> Vec<CharacterProfile> {
    ROSTER
        .iter()
        .filter_map(|&(id, name, tagline, color, speed, jump_impulse, gravity, ability)| {
            let stats = Stats {
                speed,
                jump_impulse,
                gravity,
            };
            CharacterProfile::new(id, name, stats, ability)
                .ok()
                .map(|p| p.with_flavor(tagline, color))
        })
        .collect()
}

/// Look up a roster character by id
pub fn find(id: &str) -> Result<CharacterProfile, ConfigError> {
    roster()
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| ConfigError::UnknownCharacter(id.to_string()))
}
