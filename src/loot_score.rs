//! Loot valuator.
//!
//! Each offered boon is scored in isolation against the current snapshot
//! from three signals: the evaluator delta from applying it (SDV), a soft
//! build-preference bias, and a short greedy micro-simulation that prices
//! its near-term combat impact. Heals carry hard overrides because a heal
//! at full health is worse than anything else on the table.

use log::trace;
use serde::Serialize;

use crate::combat::apply_round;
use crate::config::{EngineConfig, LootWeights};
use crate::evaluate::evaluate_with;
use crate::model::{Fighter, LootKind, LootOffer, Move, RunState};

/// The signals behind one loot score. `total` is
/// `(sdv + bias + power + sim) * multiplier` unless an override fired.
#[derive(Debug, Clone, Serialize)]
pub struct LootScoreBreakdown {
    /// Build-preference soft bias.
    pub bias: f64,
    /// Classified kind of the offer.
    pub kind: String,
    /// Future-floor multiplier from remaining rooms.
    pub multiplier: f64,
    /// Quadratic weapon power term.
    pub power: f64,
    /// State delta value: evaluator after minus before.
    pub sdv: f64,
    /// Micro-simulation delta (time-to-kill and survival).
    pub sim: f64,
    pub total: f64,
}

impl LootScoreBreakdown {
    fn overridden(kind: &LootKind, total: f64) -> Self {
        Self {
            bias: 0.0,
            kind: kind.name().to_string(),
            multiplier: 1.0,
            power: 0.0,
            sdv: 0.0,
            sim: 0.0,
            total,
        }
    }
}

/// Score an offer with the calibrated default profile.
pub fn score_loot(state: &RunState, offer: &LootOffer) -> f64 {
    score_loot_with(state, offer, &EngineConfig::default())
}

/// Score an offer with an explicit profile.
pub fn score_loot_with(state: &RunState, offer: &LootOffer, cfg: &EngineConfig) -> f64 {
    score_loot_breakdown(state, offer, cfg).total
}

/// Score an offer and keep the per-signal contributions.
pub fn score_loot_breakdown(
    state: &RunState,
    offer: &LootOffer,
    cfg: &EngineConfig,
) -> LootScoreBreakdown {
    let w = &cfg.loot;
    let kind = offer.classify();

    // Heal overrides: pointless at full health, near-pointless close to it.
    if kind.is_heal() {
        if state.player.health.missing() < 1 {
            return LootScoreBreakdown::overridden(&kind, w.heal_full_score);
        }
        if state.player.health.ratio() > w.heal_topped_ratio {
            return LootScoreBreakdown::overridden(&kind, w.heal_topped_score);
        }
    }
    if kind == LootKind::Unknown {
        return LootScoreBreakdown::overridden(&kind, 0.0);
    }

    let mut applied = state.clone();
    kind.apply_to(&mut applied.player);

    let sdv = evaluate_with(&applied, &cfg.eval) - evaluate_with(state, &cfg.eval);

    let prefs = BuildPrefs::of(&state.player);
    let (bias, power) = preference_terms(&kind, &prefs, w);

    let base = micro_sim(state, w.sim_rounds);
    let modified = micro_sim(&applied, w.sim_rounds);
    let ttk_delta = modified.ttk as f64 - base.ttk as f64;
    let survival_delta = modified.alive as i32 - base.alive as i32;
    let sim = -w.ttk_weight * ttk_delta + w.survival_weight * survival_delta as f64;

    let multiplier = 1.0 + (state.remaining_rooms() as f64 * w.room_step).min(w.room_cap);
    let mut total = (sdv + bias + power + sim) * multiplier;
    if !total.is_finite() {
        total = w.non_finite_score;
    }

    trace!(
        "loot {}: sdv {:.1}, bias {:.1}, power {:.1}, sim {:.1}, x{:.2} -> {:.1}",
        kind.name(),
        sdv,
        bias,
        power,
        sim,
        multiplier,
        total
    );

    LootScoreBreakdown {
        bias,
        kind: kind.name().to_string(),
        multiplier,
        power,
        sdv,
        sim,
        total,
    }
}

/// Normalized appetite for each kind of boon, derived from the build.
struct BuildPrefs {
    rock: f64,
    paper: f64,
    scissor: f64,
    hp: f64,
    armor: f64,
    charges: f64,
}

impl BuildPrefs {
    fn of(player: &Fighter) -> Self {
        let weapon = |mv: Move| {
            let stat = player.move_stat(mv);
            stat.atk as f64 * (stat.charges as f64).clamp(1.0, 3.0) + stat.def as f64 * 0.5
        };
        let rock = weapon(Move::Rock);
        let paper = weapon(Move::Paper);
        let scissor = weapon(Move::Scissor);
        let strongest = rock.max(paper).max(scissor);
        let norm = |score: f64| {
            if strongest > 0.0 {
                score / strongest
            } else {
                0.0
            }
        };

        Self {
            rock: norm(rock),
            paper: norm(paper),
            scissor: norm(scissor),
            hp: 1.0 - player.health.ratio(),
            armor: player.armor.current as f64 / player.armor.max.max(1) as f64,
            charges: 1.0 - (player.total_positive_charges() as f64 / 9.0).min(1.0),
        }
    }
}

/// Soft bias plus the weapon power term. +1 trinket upgrades are flattened
/// hard so a real upgrade on the same weapon outranks them decisively.
fn preference_terms(kind: &LootKind, prefs: &BuildPrefs, w: &LootWeights) -> (f64, f64) {
    let weapon_terms = |pref: f64, mult: f64, atk: i32, def: i32| {
        let mut bias = pref * w.weapon_bias * mult;
        let mut power = (atk * atk) as f64 * w.atk_power + (def * def) as f64 * w.def_power;
        if atk + def <= 1 {
            bias *= w.trinket_factor;
            power *= w.trinket_factor;
        }
        (bias, power)
    };

    match *kind {
        LootKind::UpgradeRock(atk, def) => weapon_terms(prefs.rock, w.rock_mult, atk, def),
        LootKind::UpgradePaper(atk, def) => weapon_terms(prefs.paper, w.paper_mult, atk, def),
        LootKind::UpgradeScissor(atk, def) => weapon_terms(prefs.scissor, w.scissor_mult, atk, def),
        LootKind::AddMaxHealth(_) => (prefs.hp * w.stat_bias, 0.0),
        LootKind::AddMaxArmor(_) => (prefs.armor * w.stat_bias, 0.0),
        LootKind::GrantCharges { .. } => (prefs.charges * w.stat_bias, 0.0),
        LootKind::Heal(_) => (prefs.hp * w.heal_bias, 0.0),
        LootKind::Unknown => (0.0, 0.0),
    }
}

struct SimOutcome {
    /// Round the starting enemy died in, or rounds+1 if it survived.
    ttk: usize,
    alive: bool,
}

/// Forward-simulate a few rounds of greedy play on a clone: both sides
/// always throw their hardest-hitting charged move, ties broken in
/// rock/paper/scissor order.
fn micro_sim(state: &RunState, rounds: usize) -> SimOutcome {
    let mut sim = state.clone();
    sim.loot_phase = false;
    let target = sim.current_enemy_index;
    let mut ttk = rounds + 1;

    for round in 1..=rounds {
        if sim.is_terminal() {
            break;
        }
        let player_move = greedy_move(&sim.player);
        let enemy_move = sim.current_enemy().map(greedy_move).unwrap_or(Move::Rock);
        apply_round(&mut sim, player_move, enemy_move);

        if ttk > rounds
            && sim.current_enemy_index == target
            && sim.current_enemy().is_some_and(|enemy| !enemy.is_alive())
        {
            ttk = round;
        }
        sim.advance_past_dead();
    }

    SimOutcome {
        ttk,
        alive: sim.player.is_alive(),
    }
}

/// Highest-atk charged move, rock first on ties; rock when nothing is
/// charged (the forced throw).
fn greedy_move(fighter: &Fighter) -> Move {
    let mut best: Option<Move> = None;
    for mv in fighter.legal_moves() {
        match best {
            Some(current) if fighter.move_stat(mv).atk <= fighter.move_stat(current).atk => {}
            _ => best = Some(mv),
        }
    }
    best.unwrap_or(Move::Rock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gauge, MoveStat};

    fn fighter(hp: i32, max_hp: i32, stats: [(i32, i32, i8); 3]) -> Fighter {
        Fighter {
            health: Gauge {
                current: hp,
                max: max_hp,
            },
            armor: Gauge { current: 0, max: 4 },
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
            loot_phase: true,
            loot_options: Vec::new(),
            total_rooms: None,
            current_room_index: None,
        }
    }

    fn tough_enemy() -> Fighter {
        fighter(200, 200, [(1, 0, 3), (1, 0, 3), (1, 0, 3)])
    }

    #[test]
    fn greedy_move_prefers_atk_then_order() {
        let f = fighter(10, 10, [(4, 0, 3), (6, 0, 2), (6, 0, 2)]);
        assert_eq!(greedy_move(&f), Move::Paper);
        let forced = fighter(10, 10, [(4, 0, 0), (6, 0, -1), (6, 0, 0)]);
        assert_eq!(greedy_move(&forced), Move::Rock);
    }

    #[test]
    fn micro_sim_reports_rounds_to_kill() {
        // Player deals 10 per round into 25 HP: dead in round 3.
        let state = duel(
            fighter(50, 50, [(10, 0, 3), (0, 0, 3), (0, 0, 3)]),
            fighter(25, 25, [(1, 0, 3), (1, 0, 3), (1, 0, 3)]),
        );
        let out = micro_sim(&state, 3);
        assert_eq!(out.ttk, 3);
        assert!(out.alive);
    }

    #[test]
    fn micro_sim_caps_unfinished_kills() {
        let state = duel(
            fighter(50, 50, [(2, 0, 3), (0, 0, 3), (0, 0, 3)]),
            tough_enemy(),
        );
        assert_eq!(micro_sim(&state, 3).ttk, 4);
    }

    #[test]
    fn heal_at_full_health_is_poison() {
        let state = duel(fighter(30, 30, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]), tough_enemy());
        let score = score_loot(&state, &LootOffer::tagged("Heal", 10, 0));
        assert!(score < -1.0e8);
    }

    #[test]
    fn heal_near_full_is_heavily_penalized() {
        let state = duel(
            fighter(28, 30, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]),
            tough_enemy(),
        );
        let score = score_loot(&state, &LootOffer::tagged("Heal", 10, 0));
        assert!(score <= -1.0e6);
        assert!(score > -1.0e8);
    }

    #[test]
    fn unknown_loot_scores_zero() {
        let state = duel(fighter(20, 30, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]), tough_enemy());
        let offer = LootOffer::labelled("Dubious Trinket", 9, 9);
        assert_eq!(score_loot(&state, &offer), 0.0);
    }

    #[test]
    fn future_floor_scales_with_remaining_rooms() {
        let player = fighter(20, 30, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]);
        let mut near_end = duel(player.clone(), tough_enemy());
        near_end.total_rooms = Some(10);
        near_end.current_room_index = Some(9);
        let mut early = duel(player, tough_enemy());
        early.total_rooms = Some(10);
        early.current_room_index = Some(2);

        let offer = LootOffer::tagged("UpgradeRock", 2, 0);
        let cfg = EngineConfig::default();
        let late = score_loot_breakdown(&near_end, &offer, &cfg);
        let soon = score_loot_breakdown(&early, &offer, &cfg);
        assert!((late.multiplier - 1.05).abs() < 1e-9);
        assert!((soon.multiplier - 1.40).abs() < 1e-9);
        assert!(soon.total > late.total);
    }

    #[test]
    fn sdv_matches_the_evaluator_delta() {
        let state = duel(fighter(20, 30, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]), tough_enemy());
        let offer = LootOffer::tagged("AddMaxArmor", 2, 0);
        let cfg = EngineConfig::default();
        let b = score_loot_breakdown(&state, &offer, &cfg);

        let mut applied = state.clone();
        offer.classify().apply_to(&mut applied.player);
        let expected = evaluate_with(&applied, &cfg.eval) - evaluate_with(&state, &cfg.eval);
        assert!((b.sdv - expected).abs() < 1e-9);
    }
}
