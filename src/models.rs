use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Heads,
    Tails,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Heads => "Heads",
            Side::Tails => "Tails",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "heads" | "h" => Some(Side::Heads),
            "tails" | "t" => Some(Side::Tails),
            _ => None,
        }
    }
}

/// The four cumulative counters as written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressRecord {
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
    pub correct: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    Heads,
    Tails,
    Even,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub side: String,
}

/// `times` stays untyped so out-of-range and non-numeric values get the
/// same 400 as zero.
#[derive(Debug, Deserialize)]
pub struct FlipRequest {
    #[serde(default)]
    pub times: serde_json::Value,
}

/// Read-only render feed handed to the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub guess: Option<Side>,
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
    pub correct: u64,
    pub is_flipping: bool,
    pub message: String,
    pub face: Side,
    pub turned: bool,
    pub heads_pct: f64,
    pub tails_pct: f64,
    pub accuracy_pct: f64,
    pub leader: Leader,
}
