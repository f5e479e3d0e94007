pub mod evaluator;
pub mod prompt;
pub mod service;
pub mod state;

pub use evaluator::{FALLBACK_ERROR, FALLBACK_RESPONSE, TurnEvaluator};
pub use service::{GameService, GameTurn};
pub use state::{GameState, RESPONSE_PREFIX, TurnOutcome};
