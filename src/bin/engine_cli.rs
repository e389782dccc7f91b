use clap::{Parser, Subcommand};
use gauntlet_engine::driver::play_out;
use gauntlet_engine::model::{Move, RunState};
use gauntlet_engine::{
    decide_with, evaluate_breakdown, pick_combat, score_loot_breakdown, validation, EngineConfig,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "engine_cli")]
#[command(about = "Offline inspection tools for the crawler decision engine")]
struct Cli {
    /// Search horizon override (rounds)
    #[arg(long, global = true)]
    horizon: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide the next action for a snapshot
    Decide {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,
        /// Also print per-action expected values and search counters
        #[arg(short, long)]
        explain: bool,
    },
    /// Print the evaluator score and its term breakdown
    Evaluate {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,
    },
    /// Score every offered loot option
    Loot {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,
    },
    /// Play a snapshot out against a randomly-acting opponent
    Play {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,
        /// Maximum number of rounds to play
        #[arg(short, long, default_value = "100")]
        max_rounds: usize,
        /// RNG seed for the opponent
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Validate a snapshot JSON for common errors
    Validate {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,
    },
}

// --- Main Entry Point ---

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.horizon {
        Some(horizon) => EngineConfig::with_horizon(horizon),
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Decide { snapshot, explain } => run_decide(&snapshot, &config, explain),
        Commands::Evaluate { snapshot } => run_evaluate(&snapshot, &config),
        Commands::Loot { snapshot } => run_loot(&snapshot, &config),
        Commands::Play {
            snapshot,
            max_rounds,
            seed,
        } => run_play(&snapshot, &config, max_rounds, seed),
        Commands::Validate { snapshot } => run_validate(&snapshot),
    }
}

// --- Decide Subcommand ---

fn run_decide(snapshot_path: &PathBuf, config: &EngineConfig, explain: bool) {
    let state = load_snapshot(snapshot_path);

    match decide_with(&state, config) {
        Ok(action) => {
            println!("Action: {}", action);
            if explain {
                explain_decision(&state, config);
            }
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    }
}

fn explain_decision(state: &RunState, config: &EngineConfig) {
    if state.loot_phase {
        print_loot_table(state, config);
        return;
    }
    if state.is_terminal() {
        println!("(terminal state: forced choice)");
        return;
    }

    let report = pick_combat(state, config);
    println!("\n=== Search Report ===");
    for (mv, value) in &report.root_values {
        let marker = if *mv == report.chosen { " <-" } else { "" };
        println!("{:>8}: {:>12.1}{}", mv.to_string(), value, marker);
    }
    println!(
        "\nExplored {} nodes, {} cache hits",
        report.nodes, report.cache_hits
    );
}

// --- Evaluate Subcommand ---

fn run_evaluate(snapshot_path: &PathBuf, config: &EngineConfig) {
    let state = load_snapshot(snapshot_path);
    let breakdown = evaluate_breakdown(&state, &config.eval);

    println!("=== Evaluator Breakdown ===");
    println!("{:<12} {:>12.1}", "survival", breakdown.survival);
    println!("{:<12} {:>12.1}", "progress", breakdown.progress);
    println!("{:<12} {:>12.1}", "enemy_down", breakdown.enemy_down);
    println!("{:<12} {:>12.1}", "health", breakdown.health);
    println!("{:<12} {:>12.1}", "armor", breakdown.armor);
    println!("{:<12} {:>12.1}", "aggression", breakdown.aggression);
    println!("{:<12} {:>12.1}", "charges", breakdown.charges);
    println!("{:<12} {:>12.1}", "investment", breakdown.investment);
    println!("{:<12} {:>12.1}", "threat", breakdown.threat);
    println!("{:<12} {:>12.1}", "risk", breakdown.risk);
    println!("{:-<25}", "");
    println!("{:<12} {:>12.1}", "total", breakdown.total);
}

// --- Loot Subcommand ---

fn run_loot(snapshot_path: &PathBuf, config: &EngineConfig) {
    let state = load_snapshot(snapshot_path);
    if state.loot_options.is_empty() {
        println!("No loot options in snapshot.");
        return;
    }
    print_loot_table(&state, config);
}

fn print_loot_table(state: &RunState, config: &EngineConfig) {
    println!("\n=== Loot Scores ===");
    println!(
        "{:>3} {:<14} {:>10} {:>8} {:>8} {:>8} {:>6} {:>12}",
        "#", "kind", "sdv", "bias", "power", "sim", "mult", "total"
    );
    for (index, offer) in state.loot_options.iter().enumerate() {
        let b = score_loot_breakdown(state, offer, config);
        println!(
            "{:>3} {:<14} {:>10.1} {:>8.1} {:>8.1} {:>8.1} {:>6.2} {:>12.1}",
            index, b.kind, b.sdv, b.bias, b.power, b.sim, b.multiplier, b.total
        );
    }
}

// --- Play Subcommand ---

fn run_play(snapshot_path: &PathBuf, config: &EngineConfig, max_rounds: usize, seed: u64) {
    let state = load_snapshot(snapshot_path);
    let mut rng = SmallRng::seed_from_u64(seed);

    let log = play_out(&state, config, max_rounds, |s| {
        let legal = s
            .current_enemy()
            .map(|enemy| enemy.legal_moves())
            .unwrap_or_default();
        if legal.is_empty() {
            Move::Rock
        } else {
            legal[rng.gen_range(0..legal.len())]
        }
    });

    let log = match log {
        Ok(log) => log,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Play Log (seed {}) ===\n", seed);
    if let Some(index) = log.picked_loot {
        println!("Opening loot pick: #{}\n", index);
    }
    for record in &log.rounds {
        println!(
            "Round {:>3}: {} vs {} | player HP {:>4} | enemy #{}",
            record.round,
            record.player_move,
            record.enemy_move,
            record.player_health,
            record.enemy_index
        );
    }
    println!();
    match (log.survived, log.complete) {
        (true, true) => println!("Run cleared: {} enemies down.", log.cleared),
        (true, false) => println!(
            "Stopped after {} rounds with {} enemies down.",
            log.rounds.len(),
            log.cleared
        ),
        (false, _) => println!("Player died with {} enemies down.", log.cleared),
    }
}

// --- Validate Subcommand ---

fn run_validate(snapshot_path: &PathBuf) {
    println!("=== Validating Snapshot ===\n");

    let content = match fs::read_to_string(snapshot_path) {
        Ok(c) => c,
        Err(e) => {
            println!("[ERROR] Failed to read file: {}", e);
            return;
        }
    };

    let state: RunState = match serde_json::from_str(&content) {
        Ok(s) => s,
        Err(e) => {
            println!("[ERROR] Invalid snapshot JSON: {}", e);
            return;
        }
    };

    let mut errors = 0;
    let mut warnings = 0;

    if let Err(e) = validation::check(&state) {
        println!("[ERROR] {}", e);
        errors += 1;
    }

    if !state.loot_phase && state.current_enemy().is_none() && !state.enemies.is_empty() {
        println!(
            "[WARN] enemy index {} is past the end of the list; snapshot is terminal",
            state.current_enemy_index
        );
        warnings += 1;
    }

    for (i, offer) in state.loot_options.iter().enumerate() {
        if offer.classify() == gauntlet_engine::LootKind::Unknown {
            println!(
                "[WARN] lootOptions[{}] ('{}') is unrecognized and will score 0",
                i,
                offer.label.as_deref().unwrap_or(&offer.kind)
            );
            warnings += 1;
        }
    }

    println!();
    if errors == 0 && warnings == 0 {
        println!("[INFO] Snapshot is valid. Ready to decide.");
    } else {
        println!(
            "[INFO] Validation complete: {} errors, {} warnings",
            errors, warnings
        );
    }
}

// --- Helper Functions ---

fn load_snapshot(path: &PathBuf) -> RunState {
    let content = fs::read_to_string(path).expect("Failed to read snapshot file");
    serde_json::from_str(&content).expect("Failed to parse snapshot JSON")
}
