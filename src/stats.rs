use crate::models::{Leader, ProgressRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    pub heads_pct: f64,
    pub tails_pct: f64,
    pub accuracy_pct: f64,
    pub leader: Leader,
}

/// Bar widths and accuracy, as percentages of the total flip count.
pub fn proportions(record: &ProgressRecord) -> Proportions {
    let denom = record.total.max(1) as f64;

    let leader = if record.heads == record.tails {
        Leader::Even
    } else if record.heads > record.tails {
        Leader::Heads
    } else {
        Leader::Tails
    };

    Proportions {
        heads_pct: round_tenth(record.heads as f64 / denom * 100.0),
        tails_pct: round_tenth(record.tails as f64 / denom * 100.0),
        accuracy_pct: round_tenth(record.correct as f64 / denom * 100.0),
        leader,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
