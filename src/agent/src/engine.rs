//! The opponent-modeling engine.
//!
//! A host drives it in lock-step, once per round: `request_move` for the
//! engine's choice, then `report_result` with the opponent's actual move.
//! Calls out of that order are rejected and leave the engine untouched.

use common::Move;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::{ConfigError, EngineConfig},
    ensemble::{Ballot, Prediction},
    history::History,
    ledger::Ledger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("a move was already requested; report the opponent's move first")]
    ResultPending,

    #[error("no move was requested for this round")]
    NoMoveRequested,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    AwaitingRequest,
    AwaitingResult { prediction: Option<Prediction> },
}

pub struct Engine<R: Rng = ChaCha8Rng> {
    config: EngineConfig,
    history: History,
    ledger: Ledger,
    phase: Phase,
    rng: R,
    /// The RNG as it was at construction, restored by `reset`.
    initial_rng: R,
}

impl Engine<ChaCha8Rng> {
    /// Seeds from `config.seed`, or from OS entropy when it is unset.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn seeded(seed: u64) -> Self {
        let config = EngineConfig::default().with_seed(seed);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Engine {
            history: History::new(config.history_cap),
            ledger: Ledger::new(&config),
            phase: Phase::AwaitingRequest,
            initial_rng: rng.clone(),
            rng,
            config,
        }
    }
}

impl<R: Rng + Clone> Engine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine {
            history: History::new(config.history_cap),
            ledger: Ledger::new(&config),
            phase: Phase::AwaitingRequest,
            initial_rng: rng.clone(),
            rng,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The prediction the next `report_result` will be scored against, if any.
    pub fn pending_prediction(&self) -> Option<Prediction> {
        match self.phase {
            Phase::AwaitingResult { prediction } => prediction,
            Phase::AwaitingRequest => None,
        }
    }

    pub fn awaiting_result(&self) -> bool {
        matches!(self.phase, Phase::AwaitingResult { .. })
    }

    /// Picks the engine's move for this round.
    ///
    /// With too little history, or on an exploration roll, the move is
    /// uniformly random and nothing is learned from the round. Otherwise
    /// the engine plays the counter to the ensemble's prediction and keeps
    /// the prediction to score once the opponent's move is known.
    pub fn request_move(&mut self) -> Result<Move, EngineError> {
        if self.awaiting_result() {
            warn!("move requested before the previous round was reported");
            return Err(EngineError::ResultPending);
        }
        let (chosen, prediction) = self.decide();
        self.phase = Phase::AwaitingResult { prediction };
        Ok(chosen)
    }

    fn decide(&mut self) -> (Move, Option<Prediction>) {
        if self.history.len() < self.config.min_history {
            return (Move::random(&mut self.rng), None);
        }
        if self.rng.gen::<f64>() >= self.config.exploit_probability {
            debug!("exploring");
            return (Move::random(&mut self.rng), None);
        }

        let ballot = Ballot::collect(
            self.history.as_slice(),
            &self.ledger,
            self.config.frequency_window,
            &mut self.rng,
        );
        match ballot.winner() {
            Some(prediction) => {
                let votes: Vec<(Move, f64)> = ballot
                    .candidates()
                    .iter()
                    .map(|c| (c.predicted, c.total))
                    .collect();
                debug!(
                    predicted = %prediction.predicted,
                    credited = %prediction.credited,
                    ?votes,
                    "prediction"
                );
                (prediction.predicted.counter(), Some(prediction))
            }
            None => (Move::random(&mut self.rng), None),
        }
    }

    /// Records the opponent's move for the round and scores the pending
    /// prediction, if there was one, against it.
    pub fn report_result(&mut self, opponent: Move) -> Result<(), EngineError> {
        let Phase::AwaitingResult { prediction } =
            std::mem::replace(&mut self.phase, Phase::AwaitingRequest)
        else {
            warn!(%opponent, "result reported without a requested move");
            return Err(EngineError::NoMoveRequested);
        };

        self.history.push(opponent);
        if let Some(prediction) = prediction {
            let correct = prediction.predicted == opponent;
            let record = self.ledger.record(prediction.credited, correct);
            debug!(
                strategy = %prediction.credited,
                correct,
                successes = record.successes,
                attempts = record.attempts,
                weight = record.weight,
                "ledger updated"
            );
        }
        Ok(())
    }

    /// Returns to the state right after construction: no history, initial
    /// weights, and the RNG rewound to where it started.
    pub fn reset(&mut self) {
        self.history.clear();
        self.ledger = Ledger::new(&self.config);
        self.phase = Phase::AwaitingRequest;
        self.rng = self.initial_rng.clone();
    }
}
