//! State evaluator.
//!
//! Maps a snapshot to a scalar where higher is better. The weight ordering
//! is deliberate: survival dominates progress, progress dominates
//! aggression, aggression dominates economy, economy dominates threat.
//! The expectimax search and the loot valuator are both calibrated against
//! this profile; changing a weight here moves every decision downstream.

use serde::Serialize;

use crate::config::EvalWeights;
use crate::model::{Move, RunState};

/// The individual weighted terms behind one evaluation. `total` is always
/// the exact sum of the other fields.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EvalBreakdown {
    /// Damage already dealt to the current enemy.
    pub aggression: f64,
    /// Current armor, including the bare-armor penalty.
    pub armor: f64,
    /// Charge-economy bonuses over the player's three moves.
    pub charges: f64,
    /// Branch-exit bonus for a downed current enemy.
    pub enemy_down: f64,
    /// Current player health.
    pub health: f64,
    /// Accumulated atk/def investment.
    pub investment: f64,
    /// Cleared-enemy progress.
    pub progress: f64,
    /// Low-health risk aversion.
    pub risk: f64,
    /// Death sentinel; zero while the player stands.
    pub survival: f64,
    /// Enemy attack power still backed by charges.
    pub threat: f64,
    pub total: f64,
}

/// Score a snapshot with the calibrated default weights.
pub fn evaluate(state: &RunState) -> f64 {
    evaluate_with(state, &EvalWeights::default())
}

/// Score a snapshot with an explicit weight profile.
pub fn evaluate_with(state: &RunState, weights: &EvalWeights) -> f64 {
    evaluate_breakdown(state, weights).total
}

/// Score a snapshot and keep the per-term contributions.
pub fn evaluate_breakdown(state: &RunState, w: &EvalWeights) -> EvalBreakdown {
    let mut b = EvalBreakdown::default();

    if !state.player.is_alive() {
        b.survival = w.death_score;
        b.total = b.survival;
        return b;
    }

    let cleared = state.current_enemy_index.min(state.enemies.len());
    b.progress = cleared as f64 * w.cleared_enemy;

    let player_hp = state.player.health.current as f64;

    // Branch exit: the current enemy just dropped, or the run is already
    // clear. Everything else is noise next to banking the kill.
    let enemy = match state.current_enemy() {
        Some(enemy) if enemy.is_alive() => enemy,
        _ => {
            b.enemy_down = w.enemy_down_bonus;
            b.health = w.enemy_down_health * player_hp;
            b.total = b.progress + b.enemy_down + b.health;
            return b;
        }
    };

    b.health = w.health * player_hp;

    let armor = state.player.armor.current;
    b.armor = w.armor * armor as f64;
    if armor == 0 {
        b.armor -= w.bare_armor_penalty;
    }

    b.aggression = w.damage_dealt * enemy.health.missing() as f64;

    for mv in Move::ALL {
        let stat = state.player.move_stat(mv);
        b.charges += match stat.charges {
            c if c <= 0 => w.charge_spent,
            1 => w.charge_one,
            2 => w.charge_two,
            _ => w.charge_full,
        };
        b.investment += w.investment * (stat.atk + stat.def) as f64;
    }

    for mv in Move::ALL {
        let stat = enemy.move_stat(mv);
        if stat.is_usable() {
            b.threat -= w.threat * stat.atk as f64;
        }
    }

    let ratio = state.player.health.ratio();
    if ratio < w.risk_threshold {
        b.risk = -(w.risk_threshold - ratio) * w.risk_scale;
    }

    b.total = b.aggression
        + b.armor
        + b.charges
        + b.enemy_down
        + b.health
        + b.investment
        + b.progress
        + b.risk
        + b.survival
        + b.threat;
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fighter, Gauge, MoveStat};

    fn fighter(hp: i32, armor: i32, armor_max: i32, stats: [(i32, i32, i8); 3]) -> Fighter {
        Fighter {
            health: Gauge::full(hp),
            armor: Gauge {
                current: armor,
                max: armor_max,
            },
            rock: MoveStat::new(stats[0].0, stats[0].1, stats[0].2),
            paper: MoveStat::new(stats[1].0, stats[1].1, stats[1].2),
            scissor: MoveStat::new(stats[2].0, stats[2].1, stats[2].2),
        }
    }

    fn duel(player: Fighter, enemy: Fighter) -> RunState {
        RunState {
            player,
            enemies: vec![enemy],
            current_enemy_index: 0,
            loot_phase: false,
            loot_options: Vec::new(),
            total_rooms: None,
            current_room_index: None,
        }
    }

    #[test]
    fn dead_player_hits_the_sentinel() {
        let mut state = duel(
            fighter(10, 0, 0, [(1, 0, 1); 3]),
            fighter(10, 0, 0, [(1, 0, 1); 3]),
        );
        state.player.health.current = 0;
        assert_eq!(evaluate(&state), -1_000_000.0);
    }

    #[test]
    fn downed_enemy_banks_the_branch_exit_bonus() {
        let mut state = duel(
            fighter(10, 0, 0, [(1, 0, 1); 3]),
            fighter(10, 0, 0, [(1, 0, 1); 3]),
        );
        state.enemies[0].health.current = 0;
        // No enemies cleared yet, so: 35,000 + 250 * 10.
        assert_eq!(evaluate(&state), 37_500.0);
    }

    #[test]
    fn cleared_run_counts_every_enemy() {
        let mut state = duel(
            fighter(10, 0, 0, [(1, 0, 1); 3]),
            fighter(10, 0, 0, [(1, 0, 1); 3]),
        );
        state.current_enemy_index = 1;
        assert_eq!(evaluate(&state), 20_000.0 + 35_000.0 + 2_500.0);
    }

    #[test]
    fn breakdown_total_is_the_sum_of_terms() {
        let state = duel(
            fighter(21, 2, 5, [(5, 2, 3), (4, 1, 0), (3, 0, -1)]),
            fighter(18, 0, 0, [(6, 0, 2), (2, 1, 1), (0, 0, 0)]),
        );
        let b = evaluate_breakdown(&state, &EvalWeights::default());
        let sum = b.aggression
            + b.armor
            + b.charges
            + b.enemy_down
            + b.health
            + b.investment
            + b.progress
            + b.risk
            + b.survival
            + b.threat;
        assert_eq!(b.total, sum);
        assert_eq!(b.total, evaluate(&state));
    }

    #[test]
    fn threat_counts_only_charged_enemy_moves() {
        let mut state = duel(
            fighter(30, 1, 5, [(5, 2, 3), (4, 1, 2), (3, 0, 1)]),
            fighter(30, 0, 0, [(8, 0, 2), (6, 0, 0), (4, 0, -1)]),
        );
        let charged = evaluate_breakdown(&state, &EvalWeights::default()).threat;
        state.enemies[0].rock.charges = 0;
        let disarmed = evaluate_breakdown(&state, &EvalWeights::default()).threat;
        assert_eq!(charged, -200.0);
        assert_eq!(disarmed, 0.0);
    }

    #[test]
    fn low_health_triggers_risk_aversion() {
        let mut state = duel(
            fighter(30, 1, 5, [(5, 2, 3), (4, 1, 2), (3, 0, 1)]),
            fighter(30, 0, 0, [(1, 0, 1); 3]),
        );
        state.player.health.current = 6; // ratio 0.2
        let b = evaluate_breakdown(&state, &EvalWeights::default());
        assert!((b.risk - (-(0.35 - 0.2) * 2000.0)).abs() < 1e-9);
    }

    #[test]
    fn evaluation_is_pure() {
        let state = duel(
            fighter(21, 2, 5, [(5, 2, 3), (4, 1, 0), (3, 0, -1)]),
            fighter(18, 0, 0, [(6, 0, 2), (2, 1, 1), (0, 0, 0)]),
        );
        assert_eq!(evaluate(&state), evaluate(&state.clone()));
    }
}
