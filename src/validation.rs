//! Input snapshot validation.
//!
//! `check` enforces the model invariants strictly and is what `decide`
//! runs first. `sanitize` (also exposed as `RunState::sanitized`) is the
//! opt-in defensive alternative for hosts with lossy upstream data: it
//! clamps gauges and charges into range instead of rejecting. An exhausted enemy list or an out-of-range enemy
//! index is a terminal state, not a validation failure.

use crate::error::EngineError;
use crate::model::{Fighter, RunState, CHARGES_MAX, CHARGES_MIN};

/// Verify every model invariant on the snapshot.
pub fn check(state: &RunState) -> Result<(), EngineError> {
    check_fighter(&state.player, "player")?;
    for (i, enemy) in state.enemies.iter().enumerate() {
        check_fighter(enemy, &format!("enemies[{}]", i))?;
    }
    if state.loot_phase && state.loot_options.is_empty() {
        return Err(EngineError::NoLegalAction(
            "loot phase with no loot options".to_string(),
        ));
    }
    Ok(())
}

fn check_fighter(fighter: &Fighter, who: &str) -> Result<(), EngineError> {
    check_gauge(fighter.health.current, fighter.health.max, who, "health")?;
    check_gauge(fighter.armor.current, fighter.armor.max, who, "armor")?;
    for (name, charges) in [
        ("rock", fighter.rock.charges),
        ("paper", fighter.paper.charges),
        ("scissor", fighter.scissor.charges),
    ] {
        if !(CHARGES_MIN..=CHARGES_MAX).contains(&charges) {
            return Err(EngineError::InvalidState(format!(
                "{} {} charges {} outside [{}, {}]",
                who, name, charges, CHARGES_MIN, CHARGES_MAX
            )));
        }
    }
    for (name, stat) in [
        ("rock", &fighter.rock),
        ("paper", &fighter.paper),
        ("scissor", &fighter.scissor),
    ] {
        if stat.atk < 0 || stat.def < 0 {
            return Err(EngineError::InvalidState(format!(
                "{} {} has negative atk/def",
                who, name
            )));
        }
    }
    Ok(())
}

fn check_gauge(current: i32, max: i32, who: &str, gauge: &str) -> Result<(), EngineError> {
    if current < 0 || max < 0 || current > max {
        return Err(EngineError::InvalidState(format!(
            "{} {} gauge {}/{} out of range",
            who, gauge, current, max
        )));
    }
    Ok(())
}

/// Clamp a snapshot into validity instead of rejecting it: gauges into
/// [0, max], charges into [-1, 3]. Negative maxes become zero.
pub fn sanitize(state: &RunState) -> RunState {
    let mut state = state.clone();
    sanitize_fighter(&mut state.player);
    for enemy in &mut state.enemies {
        sanitize_fighter(enemy);
    }
    state
}

impl RunState {
    /// A clamped copy of this snapshot; see [`sanitize`].
    pub fn sanitized(&self) -> RunState {
        sanitize(self)
    }
}

fn sanitize_fighter(fighter: &mut Fighter) {
    fighter.health.max = fighter.health.max.max(0);
    fighter.health.current = fighter.health.current.clamp(0, fighter.health.max);
    fighter.armor.max = fighter.armor.max.max(0);
    fighter.armor.current = fighter.armor.current.clamp(0, fighter.armor.max);
    for stat in [
        &mut fighter.rock,
        &mut fighter.paper,
        &mut fighter.scissor,
    ] {
        stat.charges = stat.charges.clamp(CHARGES_MIN, CHARGES_MAX);
        stat.atk = stat.atk.max(0);
        stat.def = stat.def.max(0);
    }
}
