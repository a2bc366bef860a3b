//! case-runner: headless driver for the case simulation engine.
//!
//! Usage:
//!   case-runner --data case_simulator_data.json --open 10
//!   case-runner --data case_simulator_data.json --ipc-mode
//!
//! In IPC mode the runner reads one JSON command per line on stdin and
//! answers one JSON response per line on stdout — the same contract any
//! front end speaks. Without it, the runner opens a batch of cases and
//! prints a summary.

use anyhow::Result;
use casesim_core::{
    api::{dispatch, ApiResponse},
    command::CaseCommand,
    store::CaseStore,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = str_arg(&args, "--data", "case_simulator_data.json");
    let opens = parse_arg(&args, "--open", 10i64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let seed = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse::<u64>().ok());

    let mut store = CaseStore::open(&data)?;
    if let Some(seed) = seed {
        store = store.with_seed(seed);
    }

    if ipc_mode {
        run_ipc_loop(&mut store)?;
    } else {
        run_demo(&mut store, opens, &data)?;
    }

    Ok(())
}

fn run_ipc_loop(store: &mut CaseStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<CaseCommand>(&buffer) {
            Ok(command) => dispatch(store, command),
            Err(err) => {
                log::warn!("rejected request: {err}");
                ApiResponse::failure(format!("bad request: {err}"))
            }
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_demo(store: &mut CaseStore, opens: i64, data: &str) -> Result<()> {
    println!("case-runner");
    println!("  data:  {data}");
    println!("  opens: {opens}");
    println!();

    let results = store.open_case(opens)?;
    for result in &results {
        println!(
            "  roll {:>8.3} | {:<12} | {}",
            result.roll, result.rarity.name, result.item.name
        );
    }
    if results.is_empty() {
        println!("  (no draws landed — check the catalog bands and item weights)");
    }

    print_summary(store);
    Ok(())
}

fn print_summary(store: &CaseStore) {
    let state = store.state();

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  total opened: {}", state.stats.total_opened);
    println!("  total spent:  {:.2}", state.stats.total_spent);
    println!("  history:      {} entries", state.history.len());

    println!();
    println!("=== INVENTORY ===");
    if state.inventory.is_empty() {
        println!("  (empty)");
    }
    for (item_id, quantity) in &state.inventory {
        let name = state
            .find_item(item_id)
            .map(|i| i.name.as_str())
            .unwrap_or("<unknown item>");
        println!("  {quantity:>4} x {name}");
    }

    println!();
    println!("=== DROPS BY RARITY ===");
    for rarity in &state.rarities {
        let count = state.stats.by_rarity.get(&rarity.id).copied().unwrap_or(0);
        println!("  {:<12} {count}", rarity.name);
    }
}

fn str_arg(args: &[String], flag: &str, default: &str) -> String {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .unwrap_or_else(|| default.to_string())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
