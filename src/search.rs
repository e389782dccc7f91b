//! Expectimax search over combat rounds.
//!
//! The opponent is modeled as a uniform distribution over its charged
//! moves. The one twist on textbook expectimax is the lethal override: a
//! branch with any certainly-lethal child is scored by its worst lethal
//! child instead of the probability-weighted mean, so the engine never
//! trades a guaranteed-safe line for a gamble that can end the run.

use log::{debug, trace};

use crate::cache::{Memo, StateKey};
use crate::combat::apply_round;
use crate::config::EngineConfig;
use crate::evaluate::evaluate_with;
use crate::model::{Move, RunState};

/// Outcome of one root search: the chosen move, its expected value, the
/// per-action root values in exploration order, and search counters.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub chosen: Move,
    pub value: f64,
    pub root_values: Vec<(Move, f64)>,
    pub nodes: usize,
    pub cache_hits: usize,
}

/// Pick a combat move for a live, non-loot snapshot. With no charged move
/// available the report falls back to rock at the current state's score,
/// which the host treats as a forced choice.
pub fn pick_combat(state: &RunState, cfg: &EngineConfig) -> SearchReport {
    let mut searcher = Searcher {
        cfg,
        memo: Memo::new(),
        nodes: 0,
        cache_hits: 0,
    };

    let legal = state.player.legal_moves();
    if legal.is_empty() {
        let value = evaluate_with(state, &cfg.eval);
        return SearchReport {
            chosen: Move::Rock,
            value,
            root_values: Vec::new(),
            nodes: 0,
            cache_hits: 0,
        };
    }

    let depth = cfg.search.horizon.max(1);
    let mut chosen = legal[0];
    let mut best = f64::NEG_INFINITY;
    let mut root_values = Vec::with_capacity(legal.len());

    for action in legal {
        let mut value = searcher.action_value(state, action, depth);
        if !value.is_finite() {
            // Non-finite values must never escape the search.
            value = cfg.eval.death_score;
        }
        trace!("root {}: {:.1}", action, value);
        root_values.push((action, value));
        if value > best {
            best = value;
            chosen = action;
        }
    }

    debug!(
        "picked {} at {:.1} ({} nodes, {} cache hits)",
        chosen, best, searcher.nodes, searcher.cache_hits
    );

    SearchReport {
        chosen,
        value: best,
        root_values,
        nodes: searcher.nodes,
        cache_hits: searcher.cache_hits,
    }
}

struct Searcher<'a> {
    cfg: &'a EngineConfig,
    memo: Memo,
    nodes: usize,
    cache_hits: usize,
}

impl Searcher<'_> {
    /// Best achievable value from `state` with `depth` rounds left.
    fn search(&mut self, state: &RunState, depth: usize) -> f64 {
        self.nodes += 1;
        if depth == 0 || state.is_terminal() {
            return evaluate_with(state, &self.cfg.eval);
        }

        let key = StateKey::of(state, depth);
        if let Some(&cached) = self.memo.get(&key) {
            self.cache_hits += 1;
            return cached;
        }

        let mut legal = state.player.legal_moves();
        if legal.is_empty() {
            // Forced choice: the game makes an uncharged player throw rock.
            legal.push(Move::Rock);
        }

        let mut best = f64::NEG_INFINITY;
        for action in legal {
            let value = self.action_value(state, action, depth);
            if value > best {
                best = value;
            }
        }

        self.memo.insert(key, best);
        best
    }

    /// Expected value of taking `action`, averaging uniformly over the
    /// enemy's charged replies unless a lethal child collapses the branch.
    fn action_value(&mut self, state: &RunState, action: Move, depth: usize) -> f64 {
        let mut enemy_moves = state
            .current_enemy()
            .map(|enemy| enemy.legal_moves())
            .unwrap_or_default();
        if enemy_moves.is_empty() {
            enemy_moves.push(Move::Rock);
        }

        let p = 1.0 / enemy_moves.len() as f64;
        let mut mean = 0.0;
        let mut worst_lethal: Option<f64> = None;

        for enemy_move in enemy_moves {
            let mut child = state.clone();
            apply_round(&mut child, action, enemy_move);
            child.advance_past_dead();

            let value = self.search(&child, depth - 1);
            if value < self.cfg.search.lethal_threshold {
                worst_lethal = Some(worst_lethal.map_or(value, |w: f64| w.min(value)));
            } else {
                mean += value * p;
            }
        }

        // A branch containing certain death is scored by that death, not
        // averaged away against its luckier siblings.
        worst_lethal.unwrap_or(mean)
    }
}
