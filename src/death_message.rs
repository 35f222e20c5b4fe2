//! Game-over text collaborator
//!
//! The message is requested once, after the game-over notification has
//! already been delivered. The request runs on its own worker thread with a
//! deadline; any failure, empty reply or timeout resolves to a fixed
//! fallback line.
//!
//! Workers are detached. Dropping a request (or letting it time out) raises
//! its `CancelToken`; a source that never checks the token keeps its thread
//! alive until `compose` returns on its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use thiserror::Error;

/// Shown before the first death of a session
pub const WELCOME_MESSAGE: &str = "WELCOME TO THE ABYSS.";
/// Used when the source answers with blank text
pub const EMPTY_FALLBACK: &str = "THE UPSIDE DOWN HAS YOU NOW.";
/// Used when the source fails or misses the deadline
pub const FAILURE_FALLBACK: &str = "STAY IN THE LIGHT. FRIENDS DON'T LIE.";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message source failed: {0}")]
    Source(String),
    #[error("no message within {0:?}")]
    Timeout(Duration),
    #[error("message request was abandoned")]
    Cancelled,
    #[error("message worker went away")]
    Disconnected,
}

/// Raised once nobody is waiting for the message any more
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Something that can write a death message for a final score
pub trait DeathMessageSource: Send + Sync {
    /// Long-running sources should give up once `cancel` is raised
    fn compose(&self, score: u64, cancel: &CancelToken) -> Result<String, MessageError>;
}

/// Apply the fallback rules to a source result
pub fn resolve(result: Result<String, MessageError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            log::warn!("Death message failed: {e}");
            FAILURE_FALLBACK.to_string()
        }
    }
}

/// Point in time after which a request falls back.
/// `std::time::Instant` is unavailable in the browser, so wasm reads the JS clock.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    #[cfg(not(target_arch = "wasm32"))]
    at: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    at_ms: f64,
}

impl Deadline {
    #[cfg(not(target_arch = "wasm32"))]
    fn after(timeout: Duration) -> Self {
        Self {
            at: std::time::Instant::now() + timeout,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn after(timeout: Duration) -> Self {
        Self {
            at_ms: js_sys::Date::now() + timeout.as_secs_f64() * 1000.0,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(std::time::Instant::now())
    }

    #[cfg(target_arch = "wasm32")]
    fn remaining(&self) -> Duration {
        let ms = (self.at_ms - js_sys::Date::now()).max(0.0);
        Duration::from_secs_f64(ms / 1000.0)
    }

    fn passed(&self) -> bool {
        self.remaining().is_zero()
    }
}

/// One in-flight message request
pub struct DeathMessageRequest {
    score: u64,
    receiver: Receiver<Result<String, MessageError>>,
    deadline: Deadline,
    timeout: Duration,
    cancel: CancelToken,
    finished: bool,
}

impl DeathMessageRequest {
    /// Start composing on a worker thread and return immediately.
    /// Where threads are unavailable (wasm32) the source runs inline instead.
    pub fn spawn(source: Arc<dyn DeathMessageSource>, score: u64, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let request = Self::waiting_on(rx, score, timeout);

        let worker_source = Arc::clone(&source);
        let worker_tx = tx.clone();
        let worker_cancel = request.cancel.clone();
        let spawned = thread::Builder::new()
            .name("death-message".to_string())
            .spawn(move || {
                // The receiver may be gone if the session moved on; nothing to do then
                let _ = worker_tx.send(worker_source.compose(score, &worker_cancel));
            });
        if let Err(e) = spawned {
            log::debug!("Death-message worker unavailable ({e}), composing inline");
            compose_into(&tx, source.as_ref(), score, &request.cancel);
        }
        request
    }

    /// Compose on the calling thread. The result is queued before this returns.
    pub fn inline(source: &dyn DeathMessageSource, score: u64, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let request = Self::waiting_on(rx, score, timeout);
        compose_into(&tx, source, score, &request.cancel);
        request
    }

    fn waiting_on(
        receiver: Receiver<Result<String, MessageError>>,
        score: u64,
        timeout: Duration,
    ) -> Self {
        Self {
            score,
            receiver,
            deadline: Deadline::after(timeout),
            timeout,
            cancel: CancelToken::default(),
            finished: false,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Non-blocking poll. Yields the message exactly once: when the worker
    /// answers, or with the fallback once the deadline passes.
    pub fn try_take(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) if self.deadline.passed() => {
                self.cancel.cancel();
                Err(MessageError::Timeout(self.timeout))
            }
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(MessageError::Disconnected),
        };
        self.finished = true;
        Some(resolve(result))
    }

    /// Block until the worker answers or the deadline passes
    pub fn wait(self) -> String {
        resolve(self.recv_until_deadline())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn recv_until_deadline(&self) -> Result<String, MessageError> {
        use std::sync::mpsc::RecvTimeoutError;

        match self.receiver.recv_timeout(self.deadline.remaining()) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(MessageError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(MessageError::Disconnected),
        }
    }

    /// The browser cannot block; an inline composition is already queued
    #[cfg(target_arch = "wasm32")]
    fn recv_until_deadline(&self) -> Result<String, MessageError> {
        match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => Err(MessageError::Timeout(self.timeout)),
            Err(TryRecvError::Disconnected) => Err(MessageError::Disconnected),
        }
    }
}

impl Drop for DeathMessageRequest {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn compose_into(
    tx: &Sender<Result<String, MessageError>>,
    source: &dyn DeathMessageSource,
    score: u64,
    cancel: &CancelToken,
) {
    // The receiver is owned by the caller and still alive here
    let _ = tx.send(source.compose(score, cancel));
}

const CANNED_LINES: [&str; 8] = [
    "THE VINES REMEMBER YOUR NAME.",
    "HAWKINS LOST ANOTHER SIGNAL AT {score}.",
    "THE MIND FLAYER COUNTED {score} STEPS.",
    "STATIC. THEN NOTHING.",
    "THE GATE CLOSED BEHIND YOU.",
    "A DEMOGORGON WAITS WHERE THE LIGHTS FLICKER.",
    "{score} METERS INTO THE VOID. NOT FAR ENOUGH.",
    "THE LAB HAS NO RECORD OF YOU.",
];

/// Offline source: picks a line deterministically from the score
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedMessages;

impl DeathMessageSource for CannedMessages {
    fn compose(&self, score: u64, _cancel: &CancelToken) -> Result<String, MessageError> {
        let mut rng = Pcg32::seed_from_u64(score);
        let line = CANNED_LINES
            .choose(&mut rng)
            .ok_or_else(|| MessageError::Source("no canned lines".to_string()))?;
        Ok(line.replace("{score}", &score.to_string()))
    }
}

/// Source that always fails
#[derive(Debug, Clone, Default)]
pub struct FailingSource {
    pub reason: String,
}

impl DeathMessageSource for FailingSource {
    fn compose(&self, _score: u64, _cancel: &CancelToken) -> Result<String, MessageError> {
        Err(MessageError::Source(self.reason.clone()))
    }
}

/// Wraps another source and answers only after a delay.
/// Gives up early once the request is cancelled.
pub struct SlowSource<S> {
    pub inner: S,
    pub delay: Duration,
}

/// Sleep granularity while waiting out a `SlowSource` delay
const CANCEL_POLL: Duration = Duration::from_millis(5);

impl<S: DeathMessageSource> DeathMessageSource for SlowSource<S> {
    fn compose(&self, score: u64, cancel: &CancelToken) -> Result<String, MessageError> {
        let mut left = self.delay;
        while !left.is_zero() {
            if cancel.is_cancelled() {
                return Err(MessageError::Cancelled);
            }
            let step = left.min(CANCEL_POLL);
            thread::sleep(step);
            left -= step;
        }
        self.inner.compose(score, cancel)
    }
}
