pub mod cache;
pub mod combat;
pub mod config;
pub mod decide;
pub mod driver;
pub mod error;
pub mod evaluate;
pub mod loot_score;
pub mod model;
pub mod search;
pub mod validation;

// Re-export the public surface: one data shape in, one action out, plus
// the two scoring entry points hosts use for inspection.
pub use config::{EngineConfig, EvalWeights, LootWeights, SearchConfig};
pub use decide::{decide, decide_with, Action};
pub use error::EngineError;
pub use evaluate::{evaluate, evaluate_breakdown, evaluate_with, EvalBreakdown};
pub use loot_score::{score_loot, score_loot_breakdown, score_loot_with, LootScoreBreakdown};
pub use model::{Fighter, Gauge, LootKind, LootOffer, Move, MoveStat, RunState};
pub use search::{pick_combat, SearchReport};
