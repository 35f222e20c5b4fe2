//! Host-side orchestration
//!
//! A session strings runs together: it owns the current run, the best
//! score and its store, per-session stats, and the death-message
//! collaborator. The simulation itself stays pure; everything with side
//! effects happens here, after the tick has returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::death_message::{DeathMessageRequest, DeathMessageSource, WELCOME_MESSAGE};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{CharacterProfile, GameEvent, RenderSnapshot, RunState, TickInput, tick};
use crate::tuning::{ConfigError, Tuning};

/// Per-session counters shown on the menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub last_score: u64,
    pub deaths: u32,
    pub high_score: u64,
}

pub struct Session {
    settings: Settings,
    tuning: Tuning,
    high_score: HighScore,
    store: Box<dyn ScoreStore>,
    stats: SessionStats,
    source: Arc<dyn DeathMessageSource>,
    run: Option<RunState>,
    pending: Option<DeathMessageRequest>,
    message: String,
}

impl Session {
    /// Create a session, reading the best score from `store`
    pub fn new(
        settings: Settings,
        tuning: Tuning,
        store: Box<dyn ScoreStore>,
        source: Arc<dyn DeathMessageSource>,
    ) -> Self {
        let high_score = HighScore::load(store.as_ref());
        Self {
            settings,
            tuning,
            high_score,
            store,
            stats: SessionStats {
                high_score: high_score.best,
                ..Default::default()
            },
            source,
            run: None,
            pending: None,
            message: WELCOME_MESSAGE.to_string(),
        }
    }

    /// Begin a fresh run, dropping any unanswered death message.
    /// The stored best is re-read so other sessions' scores show up.
    pub fn start_run(&mut self, character: CharacterProfile, seed: u64) -> Result<(), ConfigError> {
        let run = RunState::new(character, self.tuning.clone(), seed)?;
        log::info!("Run started: {} (seed {seed})", run.character.id);
        self.high_score.refresh(self.store.as_ref());
        self.stats.high_score = self.high_score.best;
        self.run = Some(run);
        self.pending = None;
        Ok(())
    }

    /// Tick the current run once. Returns the tick's events; empty when no
    /// run is active or the run has already ended.
    pub fn advance(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(run) = self.run.as_mut() else {
            return events;
        };
        tick(run, input, &mut events);

        for event in &events {
            if let GameEvent::GameOver { score } = *event {
                self.finish_run(score);
            }
        }
        events
    }

    fn finish_run(&mut self, score: u64) {
        self.stats.last_score = score;
        self.stats.deaths += 1;
        if self.high_score.record(score) {
            log::info!("New high score: {score}");
        }
        self.high_score.save(self.store.as_mut());
        self.stats.high_score = self.high_score.best;

        self.pending = Some(DeathMessageRequest::spawn(
            Arc::clone(&self.source),
            score,
            self.settings.death_message_timeout(),
        ));
    }

    /// Latest message, picking up a finished request without blocking
    pub fn poll_message(&mut self) -> &str {
        if let Some(message) = self.pending.as_mut().and_then(DeathMessageRequest::try_take) {
            self.message = message;
            self.pending = None;
        }
        &self.message
    }

    /// Block until the pending message resolves or times out
    pub fn wait_for_message(&mut self) -> &str {
        if let Some(request) = self.pending.take() {
            self.message = request.wait();
        }
        &self.message
    }

    pub fn message_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.run
            .as_ref()
            .map(|run| RenderSnapshot::capture(run, &self.settings))
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}
