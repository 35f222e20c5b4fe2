//! Void Runner native entry point
//!
//! Runs a headless autopilot session: `void-runner [character] [seed]`.
//! The browser build is driven from `web::VoidRunner` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::sync::Arc;

    use void_runner::death_message::CannedMessages;
    use void_runner::persistence::FileStore;
    use void_runner::sim::{GameEvent, character};
    use void_runner::{Session, Settings, Tuning};

    env_logger::init();
    log::info!("Void Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let character_id = args.next().unwrap_or_else(|| "dustin".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);

    let profile = match character::find(&character_id) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("{e}");
            let ids: Vec<String> = character::roster().into_iter().map(|c| c.id).collect();
            eprintln!("Available: {}", ids.join(", "));
            std::process::exit(2);
        }
    };

    let mut session = Session::new(
        Settings::load_from(Path::new("void_runner_settings.json")),
        Tuning::default(),
        Box::new(FileStore::new("void_high_score.json")),
        Arc::new(CannedMessages),
    );
    println!("{}", session.poll_message());

    if let Err(e) = session.start_run(profile, seed) {
        eprintln!("Could not start run: {e}");
        std::process::exit(1);
    }

    // Ten simulated minutes at most
    let max_ticks = 10 * 60 * void_runner::consts::TICK_RATE_HZ as u64;
    for _ in 0..max_ticks {
        let Some(run) = session.run() else { break };
        let input = autopilot::decide(run);
        for event in session.advance(&input) {
            match event {
                GameEvent::ObstacleSpawned { .. } => log::trace!("{event:?}"),
                GameEvent::GameOver { score } => log::info!("Game over at {score}"),
                other => log::info!("{other:?}"),
            }
        }
        if session.run().is_some_and(|run| run.is_over()) {
            break;
        }
    }

    let stats = session.stats();
    let score = session.run().map_or(0, |run| run.score);
    println!("SCORE {score}  BEST {}  DEATHS {}", stats.high_score, stats.deaths);
    println!("{}", session.wait_for_message());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

/// Naive controller: hop spikes that are about to arrive
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use void_runner::sim::{ObstacleKind, RunState, TickInput};

    /// Ticks of warning before a spike reaches the player
    const LEAD_TICKS: f32 = 9.0;

    pub fn decide(run: &RunState) -> TickInput {
        let player_right = run.player.pos.x + run.player.size.x;
        let jump = run.player.grounded
            && run.obstacles.iter().any(|o| {
                o.kind == ObstacleKind::GroundSpike
                    && o.right_edge() > run.player.pos.x
                    && o.pos.x - player_right < o.speed * LEAD_TICKS
            });
        TickInput {
            jump,
            ..Default::default()
        }
    }
}
