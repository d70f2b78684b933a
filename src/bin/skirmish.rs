//! Local skirmish CLI.
//!
//! Plays the full decision pipeline against the built-in scripted
//! opponent, printing per-turn info lines and the final outcome.
//!
//! Usage:
//!   cargo run --release --bin skirmish -- [OPTIONS]
//!
//! Options:
//!   --turns N       Maximum number of turns (default: 100)
//!   --depth N       Search depth (default: 3)
//!   --budget-ms MS  Search budget per turn in ms, 0 for unlimited (default: 2000)
//!   --seed N        Stall RNG seed (default: 0)
//!   --config FILE   Host config JSON path (default: built-in)
//!   --quiet         Suppress per-turn info lines

use std::env;
use std::fs;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use sortie::agent::Agent;
use sortie::board::Side;
use sortie::host::LocalArena;
use sortie::protocol::GameConfig;
use sortie::search;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut max_turns: u32 = 100;
    let mut depth: u8 = search::DEFAULT_DEPTH;
    let mut budget_ms: u64 = 2000;
    let mut seed: u64 = 0;
    let mut config_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                i += 1;
                max_turns = args[i].parse().expect("invalid --turns value");
            }
            "--depth" => {
                i += 1;
                depth = args[i].parse().expect("invalid --depth value");
            }
            "--budget-ms" => {
                i += 1;
                budget_ms = args[i].parse().expect("invalid --budget-ms value");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("invalid --seed value");
            }
            "--config" => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(&path).expect("failed to read config file");
            GameConfig::from_json(&raw).expect("failed to decode config file")
        }
        None => GameConfig::default(),
    };

    let budget = (budget_ms > 0).then(|| Duration::from_millis(budget_ms));
    let costs = config.costs;
    let mut agent = Agent::with_search(config, depth, budget).with_seed(seed);
    let mut arena = LocalArena::new(costs);

    if !quiet {
        eprintln!(
            "Skirmish: max {} turns, depth {}, budget {}ms, seed {}",
            max_turns, depth, budget_ms, seed
        );
    }

    let start = Instant::now();
    let mut sink: Box<dyn Write> = if quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let mut played = 0u32;
    while played < max_turns && !arena.is_over() {
        agent
            .play_turn(&mut arena, &mut sink)
            .expect("info sink write failed");
        played += 1;
    }

    let snap = arena.snapshot();
    let outcome = match arena.winner() {
        Some(Side::Own) => "win",
        Some(Side::Enemy) => "loss",
        None if arena.is_over() => "draw",
        None => "undecided",
    };
    eprintln!(
        "Match over after {} turns in {:.1}s: {} (health {:.0} vs {:.0})",
        played,
        start.elapsed().as_secs_f64(),
        outcome,
        snap.health[Side::Own as usize],
        snap.health[Side::Enemy as usize]
    );
}

fn print_usage() {
    eprintln!("Usage: skirmish [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --turns N       Maximum number of turns (default: 100)");
    eprintln!("  --depth N       Search depth (default: 3)");
    eprintln!("  --budget-ms MS  Search budget per turn in ms, 0 for unlimited (default: 2000)");
    eprintln!("  --seed N        Stall RNG seed (default: 0)");
    eprintln!("  --config FILE   Host config JSON path (default: built-in)");
    eprintln!("  --quiet         Suppress per-turn info lines");
    eprintln!("  --help          Show this help");
}
