//! Engine tuning parameters.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest history the detectors are ever asked to scan.
pub const MAX_HISTORY_CAP: usize = 1_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of opponent moves retained. Older moves are evicted first.
    pub history_cap: usize,

    /// How many recent moves the frequency detectors count over.
    pub frequency_window: usize,

    /// Probability of acting on the ensemble prediction instead of playing
    /// a uniformly random move.
    pub exploit_probability: f64,

    /// Below this many moves the engine plays randomly and learns nothing.
    pub min_history: usize,

    /// Attempts a strategy needs before its weight follows its hit rate.
    pub min_attempts: u32,

    /// Lowest weight a strategy can fall to.
    pub weight_floor: f64,

    /// Multiplier applied to the hit rate. With 2.0 a strategy right more
    /// than half the time outvotes a fresh one.
    pub weight_scale: f64,

    pub initial_weight: f64,
    pub random_initial_weight: f64,

    /// Fixed seed for the engine RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_cap: 50,
            frequency_window: 15,
            exploit_probability: 0.85,
            min_history: 2,
            min_attempts: 3,
            weight_floor: 0.1,
            weight_scale: 2.0,
            initial_weight: 1.0,
            random_initial_weight: 0.3,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exploit_probability(mut self, p: f64) -> Self {
        self.exploit_probability = p;
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The cycle and ABCABC checks look at six moves.
        if self.history_cap < 6 {
            return Err(invalid("history_cap", format!("{} is below 6", self.history_cap)));
        }
        if self.history_cap > MAX_HISTORY_CAP {
            return Err(invalid(
                "history_cap",
                format!("{} is above {MAX_HISTORY_CAP}", self.history_cap),
            ));
        }
        if self.frequency_window == 0 {
            return Err(invalid("frequency_window", "must be positive".to_owned()));
        }
        if !(0.0..=1.0).contains(&self.exploit_probability) {
            return Err(invalid(
                "exploit_probability",
                format!("{} is outside [0, 1]", self.exploit_probability),
            ));
        }
        if !(self.weight_floor > 0.0) {
            return Err(invalid("weight_floor", format!("{} is not positive", self.weight_floor)));
        }
        if !(self.weight_scale > 0.0) {
            return Err(invalid("weight_scale", format!("{} is not positive", self.weight_scale)));
        }
        if !(self.initial_weight > 0.0) {
            return Err(invalid(
                "initial_weight",
                format!("{} is not positive", self.initial_weight),
            ));
        }
        if !(self.random_initial_weight > 0.0) {
            return Err(invalid(
                "random_initial_weight",
                format!("{} is not positive", self.random_initial_weight),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_cap, 50);
        assert_eq!(config.frequency_window, 15);
        assert_eq!(config.exploit_probability, 0.85);
        assert_eq!(config.random_initial_weight, 0.3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(9)
            .with_exploit_probability(1.0)
            .with_history_cap(20);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.exploit_probability, 1.0);
        assert_eq!(config.history_cap, 20);
    }

    #[test]
    fn rejects_bad_values() {
        let short = EngineConfig::default().with_history_cap(5);
        assert!(matches!(
            short.validate(),
            Err(ConfigError::Invalid { field: "history_cap", .. })
        ));

        let huge: EngineConfig =
            serde_json::from_str(r#"{ "history_cap": 18446744073709551615, "seed": 1 }"#).unwrap();
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::Invalid { field: "history_cap", .. })
        ));
        let just_over = EngineConfig::default().with_history_cap(MAX_HISTORY_CAP + 1);
        assert!(just_over.validate().is_err());
        assert!(EngineConfig::default()
            .with_history_cap(MAX_HISTORY_CAP)
            .validate()
            .is_ok());

        let odds = EngineConfig::default().with_exploit_probability(1.5);
        assert!(matches!(
            odds.validate(),
            Err(ConfigError::Invalid { field: "exploit_probability", .. })
        ));

        let nan = EngineConfig {
            weight_floor: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "seed": 3, "frequency_window": 10 }"#).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.frequency_window, 10);
        assert_eq!(config.history_cap, 50);
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("agent_config_{}.json", std::process::id()));
        fs::write(&path, r#"{ "exploit_probability": 0.5 }"#).unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.exploit_probability, 0.5);

        fs::write(&path, r#"{ "exploit_probability": -1 }"#).unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Invalid { .. })
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Json(_))));
        fs::remove_file(&path).unwrap();

        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_))));
    }
}
