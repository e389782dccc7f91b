//! Canonical state fingerprints for the search memo.
//!
//! Two search states that agree on everything the evaluator and kernel can
//! observe must produce equal keys, and the key includes the remaining
//! depth because the same position is worth different amounts at different
//! horizons. The memo itself is a plain `HashMap` owned by one decision;
//! nothing is shared across `decide` calls because charges and health move
//! every turn and a stale entry would be worthless.

use std::collections::HashMap;

use crate::model::{Fighter, Move, RunState};

/// Fingerprint of one move slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveKey {
    pub charges: i8,
    pub atk: i32,
    pub def: i32,
}

/// Fingerprint of one fighter: gauges plus the three move slots. Health is
/// keyed at one-decimal precision so fractional host payloads stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FighterKey {
    pub health_tenths: i64,
    pub armor: i32,
    pub moves: [MoveKey; 3],
}

impl FighterKey {
    fn of(fighter: &Fighter) -> Self {
        let moves = [
            MoveKey::of(fighter, Move::Rock),
            MoveKey::of(fighter, Move::Paper),
            MoveKey::of(fighter, Move::Scissor),
        ];
        Self {
            health_tenths: fighter.health.current as i64 * 10,
            armor: fighter.armor.current,
            moves,
        }
    }
}

impl MoveKey {
    fn of(fighter: &Fighter, mv: Move) -> Self {
        let stat = fighter.move_stat(mv);
        Self {
            charges: stat.charges,
            atk: stat.atk,
            def: stat.def,
        }
    }
}

/// Canonical key for one search node. Dead-enemy and cleared states use
/// the shorter terminal form: the enemy's details no longer matter there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Live {
        depth: usize,
        enemy_index: u32,
        player: FighterKey,
        enemy: FighterKey,
    },
    Terminal {
        depth: usize,
        enemy_index: u32,
        player: FighterKey,
    },
}

impl StateKey {
    pub fn of(state: &RunState, depth: usize) -> Self {
        let enemy_index = state.current_enemy_index as u32;
        let player = FighterKey::of(&state.player);
        match state.current_enemy() {
            Some(enemy) if enemy.is_alive() => StateKey::Live {
                depth,
                enemy_index,
                player,
                enemy: FighterKey::of(enemy),
            },
            _ => StateKey::Terminal {
                depth,
                enemy_index,
                player,
            },
        }
    }
}

/// The per-decision memo table.
pub type Memo = HashMap<StateKey, f64>;
