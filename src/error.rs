use serde::{Deserialize, Serialize};

/// Errors the engine surfaces to its caller. Terminal-but-valid run states
/// (dead player, exhausted enemy list) are outputs, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    /// An input snapshot violated a model invariant.
    InvalidState(String),
    /// The snapshot demands a choice but offers nothing to choose from.
    NoLegalAction(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            EngineError::NoLegalAction(msg) => write!(f, "No legal action: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
