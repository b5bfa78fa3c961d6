use common::Move;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{detector::StrategyId, ledger::Ledger};

/// A round's predicted opponent move and the strategy credited with it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub predicted: Move,
    pub credited: StrategyId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub predicted: Move,
    pub total: f64,
    /// Strategies that voted for this move, in evaluation order.
    pub voters: Vec<StrategyId>,
}

/// Weighted votes from every detector, candidates kept in the order they
/// first received a vote.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ballot {
    candidates: Vec<Candidate>,
}

impl Ballot {
    pub fn collect<R: Rng + ?Sized>(
        history: &[Move],
        ledger: &Ledger,
        frequency_window: usize,
        rng: &mut R,
    ) -> Self {
        let mut ballot = Ballot::default();
        for id in StrategyId::ALL {
            let opinion = id.predict(history, frequency_window, rng);
            trace!(strategy = %id, ?opinion, "detector");
            if let Some(predicted) = opinion {
                ballot.cast(id, predicted, ledger.weight(id));
            }
        }
        ballot
    }

    pub fn cast(&mut self, id: StrategyId, predicted: Move, weight: f64) {
        match self
            .candidates
            .iter_mut()
            .find(|c| c.predicted == predicted)
        {
            Some(candidate) => {
                candidate.total += weight;
                candidate.voters.push(id);
            }
            None => self.candidates.push(Candidate {
                predicted,
                total: weight,
                voters: vec![id],
            }),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn total(&self, predicted: Move) -> f64 {
        self.candidates
            .iter()
            .find(|c| c.predicted == predicted)
            .map_or(0.0, |c| c.total)
    }

    /// The move with the strictly greatest total, ties going to the
    /// candidate that received its first vote earliest. Credit goes to
    /// that move's first voter.
    pub fn winner(&self) -> Option<Prediction> {
        let mut best: Option<&Candidate> = None;
        for candidate in &self.candidates {
            if best.map_or(true, |b| candidate.total > b.total) {
                best = Some(candidate);
            }
        }
        let best = best?;
        Some(Prediction {
            predicted: best.predicted,
            credited: *best.voters.first()?,
        })
    }
}
