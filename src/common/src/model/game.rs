use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Result of a round from the point of view of whoever played `mine`.
    pub fn of(mine: Move, theirs: Move) -> Self {
        match mine.beats(&theirs) {
            None => Outcome::Draw,
            Some(true) => Outcome::Win,
            Some(false) => Outcome::Loss,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn beats(&self, other: &Move) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Move::Rock, Move::Scissors)
                    | (Move::Scissors, Move::Paper)
                    | (Move::Paper, Move::Rock)
            ))
        }
    }

    /// The move that defeats this one.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// The move this one defeats.
    pub fn victim(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Move::ALL[rng.gen_range(0..Move::ALL.len())]
    }

    pub fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move {0:?}, expected rock, paper or scissors")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(ParseMoveError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn beats_is_a_three_cycle() {
        assert_eq!(Move::Rock.beats(&Move::Scissors), Some(true));
        assert_eq!(Move::Scissors.beats(&Move::Paper), Some(true));
        assert_eq!(Move::Paper.beats(&Move::Rock), Some(true));
        assert_eq!(Move::Rock.beats(&Move::Paper), Some(false));
        for m in Move::ALL {
            assert_eq!(m.beats(&m), None);
        }
    }

    #[test]
    fn counter_and_victim_are_inverse() {
        for m in Move::ALL {
            assert_eq!(m.counter().beats(&m), Some(true));
            assert_eq!(m.beats(&m.victim()), Some(true));
            assert_eq!(m.counter().victim(), m);
            assert_ne!(m.counter(), m.victim());
        }
    }

    #[test]
    fn outcome_from_both_sides() {
        assert_eq!(Outcome::of(Move::Paper, Move::Rock), Outcome::Win);
        assert_eq!(Outcome::of(Move::Rock, Move::Paper), Outcome::Loss);
        assert_eq!(Outcome::of(Move::Scissors, Move::Scissors), Outcome::Draw);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" s ".parse::<Move>(), Ok(Move::Scissors));
        assert_eq!("p".parse::<Move>(), Ok(Move::Paper));
        assert!("lizard".parse::<Move>().is_err());
        for m in Move::ALL {
            assert_eq!(m.to_string().parse::<Move>(), Ok(m));
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Move::Paper).unwrap(), "\"paper\"");
        let m: Move = serde_json::from_str("\"scissors\"").unwrap();
        assert_eq!(m, Move::Scissors);
    }

    #[test]
    fn random_covers_every_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[Move::random(&mut rng).index()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
