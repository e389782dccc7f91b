//! One-round combat kernel.
//!
//! Resolution order within a round is fixed: classify the exchange, read
//! both sides' damage and armor gain, settle each fighter (armor gain,
//! then absorption against the armor carried into the round, then health),
//! and finally update charges on both sides. Enemy-index advancement after
//! a kill belongs to the caller, which keeps the kernel single-step.

use crate::model::{Fighter, Move, RunState, CHARGES_MAX};

/// Who took the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Tie,
    PlayerWins,
    EnemyWins,
}

/// Classify a simultaneous exchange of moves.
pub fn classify(player_move: Move, enemy_move: Move) -> RoundOutcome {
    if player_move == enemy_move {
        RoundOutcome::Tie
    } else if player_move.beats() == enemy_move {
        RoundOutcome::PlayerWins
    } else {
        RoundOutcome::EnemyWins
    }
}

/// Advance the run exactly one round against the enemy at
/// `current_enemy_index`. Precondition: that enemy exists and is alive,
/// and the run is not in a loot phase.
pub fn apply_round(state: &mut RunState, player_move: Move, enemy_move: Move) {
    let Some(enemy) = state.enemies.get_mut(state.current_enemy_index) else {
        return;
    };

    let player_stat = *state.player.move_stat(player_move);
    let enemy_stat = *enemy.move_stat(enemy_move);

    // Incoming damage and armor gain per side, by outcome. Only the
    // winner's attack lands; a tie lands both.
    let (player_incoming, player_gain, enemy_incoming, enemy_gain) =
        match classify(player_move, enemy_move) {
            RoundOutcome::Tie => (enemy_stat.atk, player_stat.def, player_stat.atk, enemy_stat.def),
            RoundOutcome::PlayerWins => (0, player_stat.def, player_stat.atk, 0),
            RoundOutcome::EnemyWins => (enemy_stat.atk, 0, 0, enemy_stat.def),
        };

    settle(&mut state.player, player_gain, player_incoming);
    settle(enemy, enemy_gain, enemy_incoming);

    update_charges(&mut state.player, player_move);
    update_charges(enemy, enemy_move);
}

/// Apply one side's armor gain and incoming damage. Absorption capacity is
/// the armor carried into the round; armor gained from this round's def
/// lands on top and does not soak this round's damage.
fn settle(fighter: &mut Fighter, armor_gain: i32, incoming: i32) {
    let shield = fighter.armor.current;
    fighter.armor.gain(armor_gain);

    let absorbed = incoming.min(shield);
    fighter.armor.current -= absorbed;
    fighter.health.deplete(incoming - absorbed);
}

/// Charge bookkeeping after a round. The used move burns a charge (its
/// last charge becomes the -1 cooldown); each unused move ticks back up,
/// with -1 recovering to 0 first.
fn update_charges(fighter: &mut Fighter, used: Move) {
    for mv in Move::ALL {
        let stat = fighter.move_stat_mut(mv);
        if mv == used {
            if stat.charges > 1 {
                stat.charges -= 1;
            } else if stat.charges == 1 {
                stat.charges = -1;
            }
        } else if stat.charges == -1 {
            stat.charges = 0;
        } else if stat.charges < CHARGES_MAX {
            stat.charges += 1;
        }
    }
}
