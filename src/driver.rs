//! Offline play-out loop.
//!
//! The minimal host loop needed to exercise the engine end-to-end without
//! the real game server: repeatedly decide, resolve loot picks, apply
//! rounds with an injected enemy-move chooser, and advance past kills.
//! Used by the CLI's `play` subcommand and the test harness; the engine
//! itself never loops.

use log::info;
use serde::Serialize;

use crate::combat::apply_round;
use crate::config::EngineConfig;
use crate::decide::{decide_with, Action};
use crate::error::EngineError;
use crate::model::{Move, RunState};

/// One resolved combat round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    pub player_move: Move,
    pub enemy_move: Move,
    pub player_health: i32,
    pub enemy_index: usize,
}

/// Where a play-out ended.
#[derive(Debug, Clone, Serialize)]
pub struct RunLog {
    pub rounds: Vec<RoundRecord>,
    pub picked_loot: Option<usize>,
    pub survived: bool,
    pub cleared: usize,
    pub complete: bool,
}

/// Drive a snapshot to completion (or `max_rounds`), choosing enemy moves
/// with `enemy_chooser`. An opening loot phase is resolved first; the run
/// then plays combat only, since new loot comes from the host.
pub fn play_out(
    state: &RunState,
    cfg: &EngineConfig,
    max_rounds: usize,
    mut enemy_chooser: impl FnMut(&RunState) -> Move,
) -> Result<RunLog, EngineError> {
    let mut state = state.clone();
    let mut rounds = Vec::new();
    let mut picked_loot = None;

    if state.loot_phase {
        if let Action::PickLoot(index) = decide_with(&state, cfg)? {
            let kind = state.loot_options[index].classify();
            kind.apply_to(&mut state.player);
            state.loot_phase = false;
            state.loot_options.clear();
            picked_loot = Some(index);
            info!("picked loot #{} ({})", index, kind.name());
        }
    }

    for round in 1..=max_rounds {
        if state.is_terminal() {
            break;
        }
        let player_move = match decide_with(&state, cfg)? {
            Action::MoveRock => Move::Rock,
            Action::MovePaper => Move::Paper,
            Action::MoveScissor => Move::Scissor,
            Action::PickLoot(_) => break,
        };
        let enemy_move = enemy_chooser(&state);

        apply_round(&mut state, player_move, enemy_move);
        state.advance_past_dead();

        rounds.push(RoundRecord {
            round,
            player_move,
            enemy_move,
            player_health: state.player.health.current,
            enemy_index: state.current_enemy_index,
        });
    }

    Ok(RunLog {
        rounds,
        picked_loot,
        survived: state.player.is_alive(),
        cleared: state.current_enemy_index.min(state.enemies.len()),
        complete: state.current_enemy_index >= state.enemies.len(),
    })
}
