pub mod client;
pub mod config;
pub mod detector;
pub mod engine;
pub mod ensemble;
pub mod history;
pub mod ledger;
pub mod strategy;

pub use client::{play_match, Client, MatchReport};
pub use config::{ConfigError, EngineConfig};
pub use detector::StrategyId;
pub use engine::{Engine, EngineError};
pub use ensemble::{Ballot, Prediction};
pub use history::History;
pub use ledger::{Ledger, StrategyRecord, StrategySnapshot};
pub use strategy::{OpponentKind, Round, Strategy};
