//! Decision entry point.
//!
//! One snapshot in, one action out. Loot phases are a single-step
//! maximization over the offered options; combat runs the expectimax
//! search. The memo table is built fresh inside every call and dropped on
//! return, so consecutive decisions share nothing.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::loot_score::score_loot_with;
use crate::model::{Move, RunState};
use crate::search::pick_combat;
use crate::validation;

/// What the host should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveRock,
    MovePaper,
    MoveScissor,
    PickLoot(usize),
}

impl From<Move> for Action {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Rock => Action::MoveRock,
            Move::Paper => Action::MovePaper,
            Move::Scissor => Action::MoveScissor,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::MoveRock => write!(f, "rock"),
            Action::MovePaper => write!(f, "paper"),
            Action::MoveScissor => write!(f, "scissor"),
            Action::PickLoot(i) => write!(f, "loot #{}", i),
        }
    }
}

/// Decide the next action with the calibrated default profile.
pub fn decide(state: &RunState) -> Result<Action, EngineError> {
    decide_with(state, &EngineConfig::default())
}

/// Decide the next action with an explicit profile.
pub fn decide_with(state: &RunState, cfg: &EngineConfig) -> Result<Action, EngineError> {
    validation::check(state)?;

    if state.loot_phase && !state.loot_options.is_empty() {
        return Ok(Action::PickLoot(pick_loot(state, cfg)));
    }

    if state.is_terminal() {
        // Nothing left to decide; rock is the host's forced-choice marker.
        return Ok(Action::MoveRock);
    }

    let report = pick_combat(state, cfg);
    debug!("combat decision: {}", report.chosen);
    Ok(report.chosen.into())
}

/// Index of the best-scoring offer, earliest index winning ties.
fn pick_loot(state: &RunState, cfg: &EngineConfig) -> usize {
    let mut best_index = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, offer) in state.loot_options.iter().enumerate() {
        let score = score_loot_with(state, offer, cfg);
        debug!("loot #{} scored {:.1}", index, score);
        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }
    best_index
}
