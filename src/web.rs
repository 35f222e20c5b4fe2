//! Browser bindings
//!
//! The page owns the canvas and the animation loop; it calls `tick` once per
//! frame and reads back a JSON snapshot to draw.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::death_message::CannedMessages;
use crate::persistence::LocalStorageStore;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{TickInput, character};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
    log::info!("Void Runner starting...");
}

#[wasm_bindgen]
pub struct VoidRunner {
    session: Session,
}

#[wasm_bindgen]
impl VoidRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(character_id: &str, seed: u64) -> Result<VoidRunner, JsError> {
        let mut session = Session::new(
            Settings::load(),
            Tuning::default(),
            Box::new(LocalStorageStore),
            Arc::new(CannedMessages),
        );
        session.start_run(character::find(character_id)?, seed)?;
        Ok(Self { session })
    }

    /// Start over, possibly with another character
    pub fn restart(&mut self, character_id: &str, seed: u64) -> Result<(), JsError> {
        self.session
            .start_run(character::find(character_id)?, seed)?;
        Ok(())
    }

    /// Advance one tick. Returns true when this tick ended the run.
    pub fn tick(&mut self, jump: bool, up: bool, down: bool) -> bool {
        let input = TickInput {
            jump,
            ability_up: up,
            ability_down: down,
        };
        self.session
            .advance(&input)
            .iter()
            .any(|e| matches!(e, crate::sim::GameEvent::GameOver { .. }))
    }

    pub fn score(&self) -> u64 {
        self.session.run().map_or(0, |run| run.score)
    }

    pub fn high_score(&self) -> u64 {
        self.session.high_score()
    }

    pub fn message(&mut self) -> String {
        self.session.poll_message().to_string()
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.snapshot())?)
    }

    pub fn stats_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.stats())?)
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        let settings = Settings {
            reduced_motion: enabled,
            ..self.session.settings().clone()
        };
        settings.save();
        self.session.set_settings(settings);
    }
}
