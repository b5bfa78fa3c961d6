use common::model::game::{Move, Outcome};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    engine::{Engine, EngineError},
    ledger::StrategySnapshot,
    strategy::{Round, Strategy},
};

/// A scripted player and the rounds it has played.
pub struct Client {
    strategy: Box<dyn Strategy>,
    history: Vec<Round>,
}

impl Client {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Client {
            strategy,
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn play(&mut self, rng: &mut dyn RngCore) -> Move {
        self.strategy.make_move(&self.history, rng)
    }

    pub fn record(&mut self, my_move: Move, their_move: Move) -> Outcome {
        let round = Round::new(my_move, their_move);
        self.history.push(round);
        round.outcome
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub opponent: String,
    pub rounds: usize,
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub ledger: Vec<StrategySnapshot>,
}

impl MatchReport {
    /// Share of decided rounds the engine won.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.engine_wins + self.opponent_wins;
        if decided == 0 {
            None
        } else {
            Some(self.engine_wins as f64 / decided as f64)
        }
    }
}

/// Plays `rounds` rounds of engine against client. The opponent draws from
/// its own RNG so the engine's stream depends only on the engine's seed.
pub fn play_match<R: Rng + Clone>(
    engine: &mut Engine<R>,
    client: &mut Client,
    rounds: usize,
    opponent_rng: &mut dyn RngCore,
) -> Result<MatchReport, EngineError> {
    info!(opponent = client.name(), rounds, "match started");
    let (mut engine_wins, mut opponent_wins, mut draws) = (0, 0, 0);
    for round in 1..=rounds {
        let engine_move = engine.request_move()?;
        let opponent_move = client.play(opponent_rng);
        engine.report_result(opponent_move)?;

        let outcome = Outcome::of(engine_move, opponent_move);
        client.record(opponent_move, engine_move);
        match outcome {
            Outcome::Win => engine_wins += 1,
            Outcome::Loss => opponent_wins += 1,
            Outcome::Draw => draws += 1,
        }
        debug!(round, %engine_move, %opponent_move, ?outcome, "round played");
    }

    let report = MatchReport {
        opponent: client.name().to_owned(),
        rounds,
        engine_wins,
        opponent_wins,
        draws,
        ledger: engine.ledger().snapshot(),
    };
    info!(
        opponent = %report.opponent,
        engine_wins,
        opponent_wins,
        draws,
        "match finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{config::EngineConfig, strategy::OpponentKind};

    #[test]
    fn client_records_from_its_side() {
        let mut client = Client::new(OpponentKind::Rock.build());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let m = client.play(&mut rng);
        assert_eq!(m, Move::Rock);
        assert_eq!(client.record(m, Move::Paper), Outcome::Loss);
        assert_eq!(client.history().len(), 1);
        assert_eq!(client.history()[0].their_move, Move::Paper);
    }

    #[test]
    fn tallies_add_up() {
        let mut engine = Engine::seeded(21);
        let mut client = Client::new(OpponentKind::Random.build());
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let report = play_match(&mut engine, &mut client, 25, &mut rng).unwrap();
        assert_eq!(report.rounds, 25);
        assert_eq!(report.engine_wins + report.opponent_wins + report.draws, 25);
        assert_eq!(report.opponent, "random");
        assert_eq!(report.ledger.len(), 9);
        assert_eq!(engine.history().len(), 25);
        assert!(!engine.awaiting_result());
    }

    #[test]
    fn exploits_a_constant_opponent() {
        let config = EngineConfig::default()
            .with_seed(3)
            .with_exploit_probability(1.0);
        let mut engine = Engine::new(config).unwrap();
        let mut client = Client::new(OpponentKind::Scissors.build());
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let report = play_match(&mut engine, &mut client, 25, &mut rng).unwrap();
        // Only the first two rounds are guesses.
        assert!(report.engine_wins >= 23);
    }

    #[test]
    fn win_rate_ignores_draws() {
        let report = MatchReport {
            opponent: "rock".to_owned(),
            rounds: 4,
            engine_wins: 3,
            opponent_wins: 1,
            draws: 0,
            ledger: Vec::new(),
        };
        assert_eq!(report.win_rate(), Some(0.75));
        let drawn = MatchReport {
            engine_wins: 0,
            opponent_wins: 0,
            draws: 4,
            ..report
        };
        assert_eq!(drawn.win_rate(), None);
    }
}
