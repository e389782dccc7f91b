use serde::{Deserialize, Serialize};

use super::fighter::Fighter;
use super::loot::LootOffer;

/// The full observable snapshot of a run. This is the wire contract with
/// the host: one snapshot in, one action out, nothing retained between
/// calls. Field names follow the host's JSON payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub player: Fighter,
    #[serde(default)]
    pub enemies: Vec<Fighter>,
    #[serde(default)]
    pub current_enemy_index: usize,
    #[serde(default)]
    pub loot_phase: bool,
    #[serde(default)]
    pub loot_options: Vec<LootOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_room_index: Option<u32>,
}

impl RunState {
    /// The enemy the player is currently fighting, if any remain.
    pub fn current_enemy(&self) -> Option<&Fighter> {
        self.enemies.get(self.current_enemy_index)
    }

    pub fn current_enemy_mut(&mut self) -> Option<&mut Fighter> {
        self.enemies.get_mut(self.current_enemy_index)
    }

    /// A run ends when the player is down or every enemy has been cleared.
    pub fn is_terminal(&self) -> bool {
        !self.player.is_alive() || self.current_enemy_index >= self.enemies.len()
    }

    /// Rooms still ahead of the player, per the optional progress fields.
    /// Used only by tiebreak heuristics; absent fields mean 0.
    pub fn remaining_rooms(&self) -> u32 {
        match (self.total_rooms, self.current_room_index) {
            (Some(total), Some(index)) => total.saturating_sub(index),
            _ => 0,
        }
    }

    /// Step past any dead enemies at the current index. Called by the
    /// kernel's callers after a round resolves, never by the kernel itself.
    pub fn advance_past_dead(&mut self) {
        while self
            .current_enemy()
            .is_some_and(|enemy| !enemy.is_alive())
        {
            self.current_enemy_index += 1;
        }
    }
}
