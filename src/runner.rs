use crate::models::Side;
use crate::session::{BatchSummary, BatchTally, GUESS_PROMPT};
use crate::state::AppState;
use crate::storage::{clear_progress, save_progress};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Cosmetic per-draw delay for short batches. Never affects tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub enabled: bool,
    /// Batches at or below this size are paced.
    pub threshold: u32,
    pub show: Duration,
    pub settle: Duration,
}

impl Pacing {
    pub const fn animated() -> Self {
        Self {
            enabled: true,
            threshold: 20,
            show: Duration::from_millis(80),
            settle: Duration::from_millis(60),
        }
    }

    pub const fn off() -> Self {
        Self {
            enabled: false,
            ..Self::animated()
        }
    }

    pub fn applies_to(&self, times: u32) -> bool {
        self.enabled && times <= self.threshold
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::animated()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    Completed(BatchSummary),
    /// No side picked yet; the prompt was posted and nothing else changed.
    NeedsGuess,
    /// Another batch is running; the request was dropped.
    Busy,
    /// The batch task died before committing; the session was returned to idle.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Done,
    Busy,
}

pub async fn pick_guess(state: &AppState, side: Side) {
    let mut session = state.session.lock().await;
    session.set_guess(side);
    debug!(side = side.label(), "guess picked");
}

/// Runs one batch of `times` flips and commits it once at the end.
///
/// The draws run on their own task, so the batch still completes and clears
/// `is_flipping` when the caller's future is dropped (client disconnects).
pub async fn flip_batch(state: &AppState, times: NonZeroU32) -> FlipOutcome {
    let times = times.get();

    let guess = {
        let mut session = state.session.lock().await;
        if session.is_flipping {
            debug!(times, "flip requested while a batch is running; ignored");
            return FlipOutcome::Busy;
        }
        let Some(guess) = session.guess else {
            session.message = GUESS_PROMPT.to_string();
            return FlipOutcome::NeedsGuess;
        };
        session.is_flipping = true;
        guess
    };

    let batch = tokio::spawn(run_batch(state.clone(), times, guess));
    match batch.await {
        Ok(summary) => FlipOutcome::Completed(summary),
        Err(err) => {
            error!("flip batch task failed: {err}");
            let mut session = state.session.lock().await;
            session.is_flipping = false;
            session.turned = false;
            FlipOutcome::Aborted
        }
    }
}

async fn run_batch(state: AppState, times: u32, guess: Side) -> BatchSummary {
    let paced = state.pacing.applies_to(times);
    let mut tally = BatchTally::default();
    for _ in 0..times {
        let outcome = state.coin.draw();
        tally.record(outcome, guess);

        if paced {
            show_face(&state, outcome, true).await;
            sleep(state.pacing.show).await;
            show_face(&state, outcome, false).await;
            sleep(state.pacing.settle).await;
        }
    }

    let summary = BatchSummary::from_tally(&tally);
    let mut session = state.session.lock().await;
    session.commit_batch(&tally);
    save_progress(state.store.as_ref(), &session.record()).await;
    session.message = summary.message();
    session.is_flipping = false;
    info!(
        times,
        heads = tally.heads,
        tails = tally.tails,
        correct = tally.correct,
        total = session.total,
        "batch committed"
    );

    summary
}

async fn show_face(state: &AppState, face: Side, turned: bool) {
    let mut session = state.session.lock().await;
    session.face = face;
    session.turned = turned;
}

/// Refused while a batch is running so the in-flight commit is never lost.
pub async fn reset(state: &AppState) -> ResetOutcome {
    let mut session = state.session.lock().await;
    if session.is_flipping {
        return ResetOutcome::Busy;
    }
    session.reset();
    clear_progress(state.store.as_ref()).await;
    info!("progress reset");
    ResetOutcome::Done
}
