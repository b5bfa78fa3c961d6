//! Pattern detectors over the opponent's move history.
//!
//! Each detector reads the history (oldest first) and either predicts the
//! opponent's next move or has no opinion. Only `Random` consumes
//! randomness; every other detector is a pure function of the history.

use std::fmt;

use common::Move;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyId {
    #[serde(rename = "frequency")]
    Frequency,
    #[serde(rename = "anti-frequency")]
    AntiFrequency,
    #[serde(rename = "alternating")]
    Alternating,
    #[serde(rename = "repeating")]
    Repeating,
    #[serde(rename = "cycle")]
    Cycle,
    #[serde(rename = "reactive")]
    Reactive,
    #[serde(rename = "markov-2")]
    Markov2,
    #[serde(rename = "markov-3")]
    Markov3,
    #[serde(rename = "random")]
    Random,
}

impl StrategyId {
    /// Evaluation order. Ensemble ties and credit assignment both follow it.
    pub const ALL: [StrategyId; 9] = [
        StrategyId::Frequency,
        StrategyId::AntiFrequency,
        StrategyId::Alternating,
        StrategyId::Repeating,
        StrategyId::Cycle,
        StrategyId::Reactive,
        StrategyId::Markov2,
        StrategyId::Markov3,
        StrategyId::Random,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyId::Frequency => "frequency",
            StrategyId::AntiFrequency => "anti-frequency",
            StrategyId::Alternating => "alternating",
            StrategyId::Repeating => "repeating",
            StrategyId::Cycle => "cycle",
            StrategyId::Reactive => "reactive",
            StrategyId::Markov2 => "markov-2",
            StrategyId::Markov3 => "markov-3",
            StrategyId::Random => "random",
        }
    }

    pub fn predict<R: Rng + ?Sized>(
        self,
        history: &[Move],
        frequency_window: usize,
        rng: &mut R,
    ) -> Option<Move> {
        match self {
            StrategyId::Frequency => frequency(history, frequency_window),
            StrategyId::AntiFrequency => anti_frequency(history, frequency_window),
            StrategyId::Alternating => alternating(history),
            StrategyId::Repeating => repeating(history),
            StrategyId::Cycle => cycle(history),
            StrategyId::Reactive => reactive(history),
            StrategyId::Markov2 => markov(history, 2),
            StrategyId::Markov3 => markov(history, 3),
            StrategyId::Random => Some(Move::random(rng)),
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn tail(history: &[Move], n: usize) -> &[Move] {
    &history[history.len().saturating_sub(n)..]
}

// Counts in order of first appearance, so ties resolve by who showed up first.
fn tally(moves: &[Move]) -> Vec<(Move, usize)> {
    let mut counts: Vec<(Move, usize)> = Vec::with_capacity(Move::ALL.len());
    for &m in moves {
        match counts.iter_mut().find(|(seen, _)| *seen == m) {
            Some((_, count)) => *count += 1,
            None => counts.push((m, 1)),
        }
    }
    counts
}

/// Most common move; ties go to the earliest first-seen move.
fn most_common(moves: &[Move]) -> Option<Move> {
    let mut best: Option<(Move, usize)> = None;
    for (m, count) in tally(moves) {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((m, count));
        }
    }
    best.map(|(m, _)| m)
}

/// Least common move among those that appear at all; ties go to the latest
/// first-seen move.
fn least_common(moves: &[Move]) -> Option<Move> {
    let mut worst: Option<(Move, usize)> = None;
    for (m, count) in tally(moves) {
        if worst.map_or(true, |(_, bottom)| count <= bottom) {
            worst = Some((m, count));
        }
    }
    worst.map(|(m, _)| m)
}

pub fn frequency(history: &[Move], window: usize) -> Option<Move> {
    if history.len() < 3 {
        return None;
    }
    most_common(tail(history, window))
}

pub fn anti_frequency(history: &[Move], window: usize) -> Option<Move> {
    if history.len() < 3 {
        return None;
    }
    least_common(tail(history, window))
}

/// ABAB predicts A. Failing that, ABCABC (with at least two distinct moves
/// in the block) predicts A.
pub fn alternating(history: &[Move]) -> Option<Move> {
    if history.len() < 4 {
        return None;
    }
    if let &[a, b, c, d] = tail(history, 4) {
        if a == c && b == d && a != b {
            return Some(a);
        }
    }
    if history.len() >= 6 {
        let last = tail(history, 6);
        let (block, next) = last.split_at(3);
        let distinct = tally(block).len();
        if block == next && distinct >= 2 {
            return Some(block[0]);
        }
    }
    None
}

/// Two identical moves in a row (which covers three) predict another.
pub fn repeating(history: &[Move]) -> Option<Move> {
    match history {
        [.., a, b] if a == b => Some(*b),
        _ => None,
    }
}

/// Looks for the last two windows of length 3, 4 or 5 being identical and
/// continues the block at `len % length`.
pub fn cycle(history: &[Move]) -> Option<Move> {
    if history.len() < 6 {
        return None;
    }
    for length in [3, 4, 5] {
        if history.len() < length * 2 {
            continue;
        }
        let (first, second) = tail(history, length * 2).split_at(length);
        if first == second {
            return Some(first[history.len() % length]);
        }
    }
    None
}

/// The opponent plays what they played last.
pub fn reactive(history: &[Move]) -> Option<Move> {
    if history.len() < 2 {
        return None;
    }
    history.last().copied()
}

/// Order-`order` Markov chain: the most frequent follower of every earlier
/// occurrence of the last `order` moves.
pub fn markov(history: &[Move], order: usize) -> Option<Move> {
    if history.len() < order + 1 {
        return None;
    }
    let pattern = tail(history, order);
    let followers: Vec<Move> = history
        .windows(order + 1)
        .filter(|w| &w[..order] == pattern)
        .map(|w| w[order])
        .collect();
    most_common(&followers)
}
