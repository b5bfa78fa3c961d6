use std::{fmt, str::FromStr};

use common::model::game::{Move, Outcome};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// One round as seen by the scripted player.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub my_move: Move,
    pub their_move: Move,
    pub outcome: Outcome,
}

impl Round {
    pub fn new(my_move: Move, their_move: Move) -> Self {
        Round {
            my_move,
            their_move,
            outcome: Outcome::of(my_move, their_move),
        }
    }
}

pub trait Strategy {
    fn name(&self) -> &str;
    fn make_move(&mut self, history: &[Round], rng: &mut dyn RngCore) -> Move;
}

// Trivial strategies
pub struct Constant(pub Move);
impl Strategy for Constant {
    fn name(&self) -> &str {
        match self.0 {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
    fn make_move(&mut self, _: &[Round], _: &mut dyn RngCore) -> Move {
        self.0
    }
}

// Random
pub struct RandomMove;
impl Strategy for RandomMove {
    fn name(&self) -> &str {
        "random"
    }
    fn make_move(&mut self, _: &[Round], rng: &mut dyn RngCore) -> Move {
        Move::random(rng)
    }
}

// Patterned
pub struct Cycle(pub Vec<Move>);
impl Strategy for Cycle {
    fn name(&self) -> &str {
        "cycle"
    }
    fn make_move(&mut self, history: &[Round], rng: &mut dyn RngCore) -> Move {
        if self.0.is_empty() {
            return Move::random(rng);
        }
        self.0[history.len() % self.0.len()]
    }
}

pub struct Alternate(pub Move, pub Move);
impl Strategy for Alternate {
    fn name(&self) -> &str {
        "alternate"
    }
    fn make_move(&mut self, history: &[Round], _: &mut dyn RngCore) -> Move {
        if history.len() % 2 == 0 {
            self.0
        } else {
            self.1
        }
    }
}

// Reactive: both look at the other side's previous move
pub struct BeatLast;
impl Strategy for BeatLast {
    fn name(&self) -> &str {
        "beat-last"
    }
    fn make_move(&mut self, history: &[Round], rng: &mut dyn RngCore) -> Move {
        match history.last() {
            Some(round) => round.their_move.counter(),
            None => Move::random(rng),
        }
    }
}

pub struct CopyLast;
impl Strategy for CopyLast {
    fn name(&self) -> &str {
        "copy-last"
    }
    fn make_move(&mut self, history: &[Round], rng: &mut dyn RngCore) -> Move {
        match history.last() {
            Some(round) => round.their_move,
            None => Move::random(rng),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    Rock,
    Paper,
    Scissors,
    Random,
    Cycle,
    Alternate,
    BeatLast,
    CopyLast,
}

impl OpponentKind {
    pub const ALL: [OpponentKind; 8] = [
        OpponentKind::Rock,
        OpponentKind::Paper,
        OpponentKind::Scissors,
        OpponentKind::Random,
        OpponentKind::Cycle,
        OpponentKind::Alternate,
        OpponentKind::BeatLast,
        OpponentKind::CopyLast,
    ];

    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            OpponentKind::Rock => Box::new(Constant(Move::Rock)),
            OpponentKind::Paper => Box::new(Constant(Move::Paper)),
            OpponentKind::Scissors => Box::new(Constant(Move::Scissors)),
            OpponentKind::Random => Box::new(RandomMove),
            OpponentKind::Cycle => Box::new(Cycle(Move::ALL.to_vec())),
            OpponentKind::Alternate => Box::new(Alternate(Move::Rock, Move::Paper)),
            OpponentKind::BeatLast => Box::new(BeatLast),
            OpponentKind::CopyLast => Box::new(CopyLast),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpponentKind::Rock => "rock",
            OpponentKind::Paper => "paper",
            OpponentKind::Scissors => "scissors",
            OpponentKind::Random => "random",
            OpponentKind::Cycle => "cycle",
            OpponentKind::Alternate => "alternate",
            OpponentKind::BeatLast => "beat-last",
            OpponentKind::CopyLast => "copy-last",
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OpponentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = OpponentKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown opponent {s:?}, expected one of {}", known.join(", "))
            })
    }
}
