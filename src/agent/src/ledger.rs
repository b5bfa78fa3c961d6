use serde::{Deserialize, Serialize};

use crate::{config::EngineConfig, detector::StrategyId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StrategyRecord {
    pub weight: f64,
    pub successes: u32,
    pub attempts: u32,
}

impl StrategyRecord {
    fn new(weight: f64) -> Self {
        StrategyRecord {
            weight,
            successes: 0,
            attempts: 0,
        }
    }

    pub fn hit_rate(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(f64::from(self.successes) / f64::from(self.attempts))
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StrategySnapshot {
    pub strategy: StrategyId,
    #[serde(flatten)]
    pub record: StrategyRecord,
}

/// Per-strategy hit counts and vote weights, indexed by `StrategyId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    records: [StrategyRecord; 9],
    min_attempts: u32,
    weight_floor: f64,
    weight_scale: f64,
}

impl Ledger {
    pub fn new(config: &EngineConfig) -> Self {
        let records = StrategyId::ALL.map(|id| match id {
            StrategyId::Random => StrategyRecord::new(config.random_initial_weight),
            _ => StrategyRecord::new(config.initial_weight),
        });
        Ledger {
            records,
            min_attempts: config.min_attempts,
            weight_floor: config.weight_floor,
            weight_scale: config.weight_scale,
        }
    }

    pub fn get(&self, id: StrategyId) -> &StrategyRecord {
        &self.records[id.index()]
    }

    pub fn weight(&self, id: StrategyId) -> f64 {
        self.get(id).weight
    }

    /// Scores one prediction for `id`. The weight only starts tracking the
    /// hit rate once the strategy has enough attempts behind it.
    pub fn record(&mut self, id: StrategyId, correct: bool) -> &StrategyRecord {
        let record = &mut self.records[id.index()];
        if correct {
            record.successes += 1;
        }
        record.attempts += 1;
        if record.attempts >= self.min_attempts {
            let rate = f64::from(record.successes) / f64::from(record.attempts);
            record.weight = self.weight_floor.max(rate * self.weight_scale);
        }
        record
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrategyId, &StrategyRecord)> {
        StrategyId::ALL.into_iter().zip(self.records.iter())
    }

    pub fn snapshot(&self) -> Vec<StrategySnapshot> {
        self.iter()
            .map(|(strategy, record)| StrategySnapshot {
                strategy,
                record: *record,
            })
            .collect()
    }
}
