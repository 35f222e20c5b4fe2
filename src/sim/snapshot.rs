//! Read-only views of the run for an external renderer

use serde::{Deserialize, Serialize};

use super::state::{Biome, ObstacleKind, RunState, Trance};
use crate::settings::Settings;

/// Frames per half-period of the startup flash
const FLASH_PERIOD: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Trance as the HUD sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranceView {
    Inactive,
    Awakening,
    Trance,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub score: u64,
    pub distance: f64,
    pub biome: Biome,
    pub character_id: String,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub particles: Vec<ParticleView>,
    pub trance: TranceView,
    /// Player sprite drawn in the alert color this frame
    pub flash: bool,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &RunState, settings: &Settings) -> Self {
        let trance = match state.trance {
            Some(Trance::Startup { .. }) => TranceView::Awakening,
            Some(Trance::Control { .. }) => TranceView::Trance,
            _ => TranceView::Inactive,
        };
        let flash = trance == TranceView::Awakening
            && !settings.reduced_motion
            && (state.frame / FLASH_PERIOD) % 2 == 0;

        let particles = if settings.ambient_particles {
            state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            frame: state.frame,
            score: state.score,
            distance: state.distance,
            biome: state.biome,
            character_id: state.character.id.clone(),
            player: PlayerView {
                x: state.player.pos.x,
                y: state.player.pos.y,
                width: state.player.size.x,
                height: state.player.size.y,
                grounded: state.player.grounded,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.size.x,
                    height: o.size.y,
                })
                .collect(),
            particles,
            trance,
            flash,
            game_over: state.is_over(),
        }
    }

    /// HUD location line: the trance phase overrides the biome name
    pub fn location_label(&self) -> &'static str {
        match self.trance {
            TranceView::Awakening => "AWAKENING",
            TranceView::Trance => "TRANCE",
            TranceView::Inactive => self.biome.as_str(),
        }
    }

    pub fn levitating(&self) -> bool {
        self.trance != TranceView::Inactive
    }
}
