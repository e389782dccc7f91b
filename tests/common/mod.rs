use gauntlet_engine::model::{Fighter, Gauge, MoveStat, RunState};
use std::fs;
use std::path::PathBuf;

/// Load a snapshot from the tests/scenarios directory.
#[allow(dead_code)]
pub fn load_scenario(filename: &str) -> RunState {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/scenarios");
    path.push(filename);

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read scenario file {:?}: {}", path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse scenario {:?}: {}", path, e))
}

/// Build a move stat triple in rock/paper/scissor order.
#[allow(dead_code)]
pub fn fighter(hp: i32, max_hp: i32, armor: i32, max_armor: i32, stats: [(i32, i32, i8); 3]) -> Fighter {
    Fighter {
        health: Gauge {
            current: hp,
            max: max_hp,
        },
        armor: Gauge {
            current: armor,
            max: max_armor,
        },
        rock: MoveStat::new(stats[0].0, stats[0].1, stats[0].2),
        paper: MoveStat::new(stats[1].0, stats[1].1, stats[1].2),
        scissor: MoveStat::new(stats[2].0, stats[2].1, stats[2].2),
    }
}

/// A one-on-one combat snapshot.
#[allow(dead_code)]
pub fn duel(player: Fighter, enemy: Fighter) -> RunState {
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

/// The same snapshot flipped into a loot phase.
#[allow(dead_code)]
pub fn loot_phase(mut state: RunState, options: Vec<gauntlet_engine::model::LootOffer>) -> RunState {
    state.loot_phase = true;
    state.loot_options = options;
    state
}
