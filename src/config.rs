//! Engine configuration.
//!
//! Every coefficient the evaluator, loot valuator, and search engine use
//! lives here, with `Default` carrying the calibrated profile. The numbers
//! are defaults, not oracle: hosts may tune them, but the shipped tests
//! pin the default profile.

use serde::{Deserialize, Serialize};

/// Weights for the state evaluator. Calibrated so that survival dominates
/// progress, progress dominates aggression, aggression dominates economy,
/// and economy dominates threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Returned outright when the player is down.
    pub death_score: f64,
    /// Per enemy index already cleared.
    pub cleared_enemy: f64,
    /// Branch-exit bonus when the current enemy just died.
    pub enemy_down_bonus: f64,
    /// Per point of player health on the branch-exit return.
    pub enemy_down_health: f64,
    /// Per point of current player health.
    pub health: f64,
    /// Per point of current player armor.
    pub armor: f64,
    /// Flat penalty for sitting at zero armor.
    pub bare_armor_penalty: f64,
    /// Per point of damage already dealt to the current enemy.
    pub damage_dealt: f64,
    /// Charge-count bonuses per player move: spent, one, two, full.
    pub charge_spent: f64,
    pub charge_one: f64,
    pub charge_two: f64,
    pub charge_full: f64,
    /// Per point of (atk + def) across the player's moves.
    pub investment: f64,
    /// Per point of enemy atk on moves the enemy can still use.
    pub threat: f64,
    /// Health ratio under which the risk-aversion penalty kicks in.
    pub risk_threshold: f64,
    /// Penalty per point of ratio below the threshold.
    pub risk_scale: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            death_score: -1_000_000.0,
            cleared_enemy: 20_000.0,
            enemy_down_bonus: 35_000.0,
            enemy_down_health: 250.0,
            health: 300.0,
            armor: 120.0,
            bare_armor_penalty: 800.0,
            damage_dealt: 80.0,
            charge_spent: -120.0,
            charge_one: 35.0,
            charge_two: 60.0,
            charge_full: 90.0,
            investment: 30.0,
            threat: 25.0,
            risk_threshold: 0.35,
            risk_scale: 2000.0,
        }
    }
}

/// Weights for the loot valuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootWeights {
    /// Soft-bias magnitudes per loot family.
    pub weapon_bias: f64,
    pub stat_bias: f64,
    pub heal_bias: f64,
    /// Per-weapon build multipliers; scissor defaults to neutral-weak.
    pub rock_mult: f64,
    pub paper_mult: f64,
    pub scissor_mult: f64,
    /// Quadratic power term per upgraded atk/def point.
    pub atk_power: f64,
    pub def_power: f64,
    /// Multiplier flattening +1 trinket upgrades.
    pub trinket_factor: f64,
    /// Micro-simulation horizon and its reward terms.
    pub sim_rounds: usize,
    pub ttk_weight: f64,
    pub survival_weight: f64,
    /// Heal overrides: offered at full health, and near-full (ratio above
    /// `heal_topped_ratio`).
    pub heal_full_score: f64,
    pub heal_topped_score: f64,
    pub heal_topped_ratio: f64,
    /// Replacement for any non-finite score.
    pub non_finite_score: f64,
    /// Future-floor multiplier: 1 + min(cap, remaining_rooms * step).
    pub room_step: f64,
    pub room_cap: f64,
}

impl Default for LootWeights {
    fn default() -> Self {
        Self {
            weapon_bias: 50.0,
            stat_bias: 40.0,
            heal_bias: 30.0,
            rock_mult: 1.0,
            paper_mult: 1.0,
            scissor_mult: 0.7,
            atk_power: 40.0,
            def_power: 20.0,
            trinket_factor: 0.15,
            sim_rounds: 3,
            ttk_weight: 1200.0,
            survival_weight: 4000.0,
            heal_full_score: -1.0e9,
            heal_topped_score: -1.0e6,
            heal_topped_ratio: 0.9,
            non_finite_score: -1.0e12,
            room_step: 0.05,
            room_cap: 0.4,
        }
    }
}

/// Expectimax search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fixed search depth in rounds.
    pub horizon: usize,
    /// Any child value below this marks its branch as certainly lethal.
    pub lethal_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            horizon: 6,
            lethal_threshold: -900_000.0,
        }
    }
}

/// The full engine profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub eval: EvalWeights,
    pub loot: LootWeights,
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Default profile with a different search depth.
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            search: SearchConfig {
                horizon,
                ..SearchConfig::default()
            },
            ..Self::default()
        }
    }
}
