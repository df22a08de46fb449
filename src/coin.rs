use crate::models::Side;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of flip outcomes. Each call is one independent 50/50 draw.
pub trait OutcomeSource: Send + Sync {
    fn draw(&self) -> Side;
}

fn side_from_bool(heads: bool) -> Side {
    if heads { Side::Heads } else { Side::Tails }
}

#[derive(Debug, Default)]
pub struct RandomCoin;

impl OutcomeSource for RandomCoin {
    fn draw(&self) -> Side {
        side_from_bool(rand::thread_rng().gen_bool(0.5))
    }
}

/// Reproducible coin for a given seed.
#[derive(Debug)]
pub struct SeededCoin {
    rng: Mutex<StdRng>,
}

impl SeededCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl OutcomeSource for SeededCoin {
    fn draw(&self) -> Side {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        side_from_bool(rng.gen_bool(0.5))
    }
}

/// Replays a fixed sequence of sides, wrapping around at the end.
#[derive(Debug)]
pub struct ScriptedCoin {
    sequence: Vec<Side>,
    cursor: AtomicUsize,
}

impl ScriptedCoin {
    /// An empty sequence falls back to always landing heads.
    pub fn new(sequence: Vec<Side>) -> Self {
        Self {
            sequence,
            cursor: AtomicUsize::new(0),
        }
    }

    /// `heads` heads followed by `tails` tails.
    pub fn split(heads: usize, tails: usize) -> Self {
        let mut sequence = vec![Side::Heads; heads];
        sequence.extend(std::iter::repeat_n(Side::Tails, tails));
        Self::new(sequence)
    }
}

impl OutcomeSource for ScriptedCoin {
    fn draw(&self) -> Side {
        if self.sequence.is_empty() {
            return Side::Heads;
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.sequence[index % self.sequence.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_coin_is_repeatable() {
        let first = SeededCoin::new(42);
        let second = SeededCoin::new(42);
        let a: Vec<Side> = (0..32).map(|_| first.draw()).collect();
        let b: Vec<Side> = (0..32).map(|_| second.draw()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn random_coin_lands_both_sides() {
        let coin = RandomCoin;
        let heads = (0..2000).filter(|_| coin.draw() == Side::Heads).count();
        // very loose bounds, only guards against a stuck coin
        assert!(heads > 800 && heads < 1200, "heads = {heads}");
    }

    #[test]
    fn scripted_coin_cycles() {
        let coin = ScriptedCoin::split(2, 1);
        let drawn: Vec<Side> = (0..5).map(|_| coin.draw()).collect();
        assert_eq!(
            drawn,
            vec![Side::Heads, Side::Heads, Side::Tails, Side::Heads, Side::Heads]
        );
    }
}
