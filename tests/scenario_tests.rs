//! End-to-end decision scenarios.
//!
//! Each test pins one calibrated behavior of the engine on a hand-built
//! snapshot: the heal overrides, the upgrade preferences, the forced
//! survival pick, the lethal override, and the exact arithmetic of a tie
//! round.

use gauntlet_engine::combat::apply_round;
use gauntlet_engine::model::{LootOffer, Move, RunState};
use gauntlet_engine::{decide, decide_with, evaluate, pick_combat, score_loot, Action, EngineConfig};

mod common;
use common::{duel, fighter, loot_phase};

/// A fat practice dummy: hits for 1, survives any 3-round burst.
fn training_dummy() -> gauntlet_engine::model::Fighter {
    fighter(200, 200, 0, 0, [(1, 0, 3), (1, 0, 3), (1, 0, 3)])
}

#[test]
fn heal_while_full_is_never_worth_taking() {
    let player = fighter(30, 30, 0, 4, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]);
    let state = duel(player, training_dummy());
    let score = score_loot(&state, &LootOffer::tagged("Heal", 10, 0));
    assert!(score < -1.0e8);

    // Offered next to anything useful, the full heal loses.
    let state = loot_phase(
        state,
        vec![
            LootOffer::tagged("Heal", 10, 0),
            LootOffer::tagged("UpgradeRock", 1, 0),
        ],
    );
    assert_eq!(decide(&state).unwrap(), Action::PickLoot(1));
}

#[test]
fn heal_value_grows_with_missing_health() {
    let critical = duel(
        fighter(3, 30, 0, 4, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]),
        training_dummy(),
    );
    let healthy = duel(
        fighter(20, 30, 0, 4, [(5, 0, 3), (3, 0, 3), (2, 0, 3)]),
        training_dummy(),
    );
    let offer = LootOffer::tagged("Heal", 10, 0);
    assert!(score_loot(&critical, &offer) > score_loot(&healthy, &offer));
}

#[test]
fn real_upgrades_dwarf_plus_one_trinkets() {
    let player = fighter(30, 30, 0, 4, [(5, 0, 3), (1, 0, 1), (1, 0, 1)]);
    let state = duel(player, training_dummy());

    let big = score_loot(&state, &LootOffer::tagged("UpgradeRock", 2, 0));
    let small = score_loot(&state, &LootOffer::tagged("UpgradeRock", 1, 0));
    assert!(big > 0.0 && small > 0.0);
    assert!(big >= small * 5.0, "big {} vs small {}", big, small);
}

#[test]
fn durability_beats_a_tiny_offweapon_upgrade() {
    let player = fighter(12, 30, 0, 4, [(5, 0, 3), (1, 0, 1), (1, 0, 1)]);
    let state = loot_phase(
        duel(player, training_dummy()),
        vec![
            LootOffer::tagged("AddMaxHealth", 2, 0),
            LootOffer::tagged("UpgradeScissor", 1, 0),
        ],
    );
    assert_eq!(decide(&state).unwrap(), Action::PickLoot(0));
}

#[test]
fn the_only_surviving_move_is_chosen() {
    // The enemy's single charged move one-shots the player through any
    // loss or tie; winning the throw with paper also finishes the enemy.
    let player = fighter(10, 10, 0, 0, [(5, 0, 3), (30, 0, 1), (5, 0, 1)]);
    let enemy = fighter(20, 20, 0, 0, [(25, 0, 1), (0, 0, 0), (0, 0, 0)]);
    let state = duel(player, enemy);

    assert_eq!(decide(&state).unwrap(), Action::MovePaper);
}

#[test]
fn lethal_branches_are_not_averaged_away() {
    // One enemy reply kills the rock line outright while another hands it
    // a fight-winning child, so its naive expectation beats the safe
    // paper line. The override must still refuse the gamble.
    let player = fighter(10, 10, 0, 0, [(30, 0, 3), (0, 0, 3), (0, 0, 0)]);
    let enemy = fighter(
        25,
        25,
        0,
        0,
        [(20000, 0, 3), (4, 0, 1), (4, 0, 1)],
    );
    let state = duel(player, enemy);
    let cfg = EngineConfig::with_horizon(1);

    let naive_rock = naive_expectation(&state, Move::Rock);
    let naive_paper = naive_expectation(&state, Move::Paper);
    assert!(
        naive_rock > naive_paper,
        "trap missing: rock {} vs paper {}",
        naive_rock,
        naive_paper
    );

    let report = pick_combat(&state, &cfg);
    assert_eq!(report.chosen, Move::Paper);

    let (_, rock_value) = report.root_values[0];
    assert_eq!(rock_value, -1_000_000.0);

    assert_eq!(decide_with(&state, &cfg).unwrap(), Action::MovePaper);
}

/// Probability-weighted mean over enemy replies with no lethal override.
fn naive_expectation(state: &RunState, action: Move) -> f64 {
    let replies = state.enemies[state.current_enemy_index].legal_moves();
    let p = 1.0 / replies.len() as f64;
    replies
        .into_iter()
        .map(|reply| {
            let mut child = state.clone();
            apply_round(&mut child, action, reply);
            child.advance_past_dead();
            evaluate(&child) * p
        })
        .sum()
}

#[test]
fn tie_rounds_land_both_attacks_past_fresh_armor() {
    let player = fighter(30, 30, 0, 4, [(5, 2, 3), (0, 0, 1), (0, 0, 1)]);
    let enemy = fighter(30, 30, 0, 4, [(3, 1, 3), (0, 0, 1), (0, 0, 1)]);
    let mut state = duel(player, enemy);

    apply_round(&mut state, Move::Rock, Move::Rock);

    assert_eq!(state.player.health.current, 27);
    assert_eq!(state.player.armor.current, 2);
    assert_eq!(state.player.rock.charges, 2);
    let enemy = &state.enemies[0];
    assert_eq!(enemy.health.current, 25);
    assert_eq!(enemy.armor.current, 1);
    assert_eq!(enemy.rock.charges, 2);
}

#[test]
fn one_round_of_rock_flips_the_charge_triple() {
    let player = fighter(30, 30, 0, 0, [(5, 0, 1), (3, 0, 0), (4, 0, -1)]);
    let mut state = duel(player, training_dummy());

    apply_round(&mut state, Move::Rock, Move::Rock);

    assert_eq!(state.player.rock.charges, -1);
    assert_eq!(state.player.paper.charges, 1);
    assert_eq!(state.player.scissor.charges, 0);
}
