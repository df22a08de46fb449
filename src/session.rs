use crate::models::{ProgressRecord, Side, Snapshot};
use crate::stats::proportions;

pub const GREETING: &str = "Make a guess, then flip!";
pub const GUESS_PROMPT: &str = "Pick Heads or Tails first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Majority {
    Tie,
    Heads,
    Tails,
}

/// Per-batch counts, kept apart from the cumulative counters until commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub heads: u64,
    pub tails: u64,
    pub correct: u64,
}

impl BatchTally {
    pub fn record(&mut self, outcome: Side, guess: Side) {
        match outcome {
            Side::Heads => self.heads += 1,
            Side::Tails => self.tails += 1,
        }
        if outcome == guess {
            self.correct += 1;
        }
    }

    pub fn flips(&self) -> u64 {
        self.heads + self.tails
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub flips: u64,
    pub heads: u64,
    pub tails: u64,
    pub correct: u64,
    pub majority: Majority,
}

impl BatchSummary {
    pub fn from_tally(tally: &BatchTally) -> Self {
        let majority = if tally.heads == tally.tails {
            Majority::Tie
        } else if tally.heads > tally.tails {
            Majority::Heads
        } else {
            Majority::Tails
        };
        Self {
            flips: tally.flips(),
            heads: tally.heads,
            tails: tally.tails,
            correct: tally.correct,
            majority,
        }
    }

    pub fn message(&self) -> String {
        let best = match self.majority {
            Majority::Tie => "It was a tie!",
            Majority::Heads => "Heads showed up more!",
            Majority::Tails => "Tails showed up more!",
        };
        format!(
            "You flipped {} time(s). {best} You guessed right {} time(s).",
            self.flips, self.correct
        )
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub guess: Option<Side>,
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
    pub correct: u64,
    pub is_flipping: bool,
    pub message: String,
    pub face: Side,
    pub turned: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_record(ProgressRecord::default())
    }
}

impl Session {
    pub fn from_record(record: ProgressRecord) -> Self {
        Self {
            guess: None,
            heads: record.heads,
            tails: record.tails,
            total: record.total,
            correct: record.correct,
            is_flipping: false,
            message: GREETING.to_string(),
            face: Side::Heads,
            turned: false,
        }
    }

    pub fn set_guess(&mut self, side: Side) {
        self.guess = Some(side);
        self.message = "Nice! Now flip the coin.".to_string();
    }

    /// Applies a finished batch to the cumulative counters in one step.
    pub fn commit_batch(&mut self, tally: &BatchTally) {
        self.heads = self.heads.saturating_add(tally.heads);
        self.tails = self.tails.saturating_add(tally.tails);
        self.correct = self.correct.saturating_add(tally.correct);
        self.total = self.total.saturating_add(tally.flips());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> ProgressRecord {
        ProgressRecord {
            heads: self.heads,
            tails: self.tails,
            total: self.total,
            correct: self.correct,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let stats = proportions(&self.record());
        Snapshot {
            guess: self.guess,
            heads: self.heads,
            tails: self.tails,
            total: self.total,
            correct: self.correct,
            is_flipping: self.is_flipping,
            message: self.message.clone(),
            face: self.face,
            turned: self.turned,
            heads_pct: stats.heads_pct,
            tails_pct: stats.tails_pct,
            accuracy_pct: stats.accuracy_pct,
            leader: stats.leader,
        }
    }
}
