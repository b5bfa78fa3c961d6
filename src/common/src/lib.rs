pub mod model;

pub use model::game::{Move, Outcome, ParseMoveError};
