// Cascade Sweep Runner — coupled-network case grid with statistical aggregation
// Runs every A×B pairing of the predefined cases over a swept initial-failure
// fraction, seedable PRNG, per-point 95% CI
//
// Usage:
//   cargo run --release --bin bench                     # Full 5x5 case grid
//   cargo run --release --bin bench -- --nodes 1000     # Smaller networks
//   cargo run --release --bin bench -- --trials 30      # More trials per p
//   cargo run --release --bin bench -- CASE_5           # Filter by case name
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

mod cases;
mod report;

use cascade_engine::experiment;
use cases::{cases, Case};
use report::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    nodes: usize,
    trials: usize,
    p_steps: usize,
    seed: u64,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        nodes: 10_000,
        trials: 10,
        p_steps: 10,
        seed: 0,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--nodes" => {
                i += 1;
                if i < args.len() {
                    cli.nodes = args[i].parse().unwrap_or(10_000);
                }
            }
            "--trials" => {
                i += 1;
                if i < args.len() {
                    cli.trials = args[i].parse().unwrap_or(10);
                }
            }
            "--p-steps" => {
                i += 1;
                if i < args.len() {
                    cli.p_steps = args[i].parse().unwrap_or(10);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

/// Evenly spaced p values over [0.01, 0.5], matching the reference sweep.
fn p_values(steps: usize) -> Vec<f64> {
    let (lo, hi) = (0.01, 0.5);
    if steps <= 1 {
        return vec![lo];
    }
    (0..steps)
        .map(|i| lo + (hi - lo) * i as f64 / (steps - 1) as f64)
        .collect()
}

fn matches_filter(case: &Case, filter: &Option<String>) -> bool {
    match filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            case.name.to_lowercase().contains(&f_lower)
                || case.label.to_lowercase().contains(&f_lower)
        }
        None => true,
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    simple_logger::init_with_level(log::Level::Warn).expect("logger init");

    let cli = parse_args();
    let all_cases = cases();
    let ps = p_values(cli.p_steps);

    let to_run: Vec<&Case> = all_cases
        .iter()
        .filter(|c| matches_filter(c, &cli.filter))
        .collect();

    if to_run.is_empty() {
        eprintln!("No cases match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Cascade Sweep Runner v0.2.0");
    println!(
        "  PRNG: ChaCha8Rng | N: {} | Trials/p: {} | Base seed: {}",
        cli.nodes, cli.trials, cli.seed
    );
    println!(
        "  Running {} case pairing(s) x {} p value(s)...\n",
        to_run.len() * to_run.len(),
        ps.len()
    );

    let suite_start = Instant::now();
    let mut case_reports = Vec::new();
    let mut invariant_violations = 0usize;

    for case_a in &to_run {
        for case_b in &to_run {
            println!("  A: {}  |  B: {}", case_a.label, case_b.label);
            println!(
                "  {:>6} {:>14} {:>18} {:>18} {:>9} {:>7}",
                "p", "rounds", "surviving A", "surviving B", "collapse", "time"
            );

            let mut points = Vec::with_capacity(ps.len());
            for &p in &ps {
                let point_start = Instant::now();
                let outcomes = match experiment::run_point(
                    cli.nodes,
                    &case_a.config,
                    &case_b.config,
                    p,
                    cli.trials,
                    cli.seed,
                ) {
                    Ok(outcomes) => outcomes,
                    Err(e) => {
                        eprintln!("Configuration error: {}", e);
                        std::process::exit(1);
                    }
                };

                for o in &outcomes {
                    let in_range = (0.0..=1.0).contains(&o.surviving_fraction_a)
                        && (0.0..=1.0).contains(&o.surviving_fraction_b);
                    if !in_range || o.rounds as usize > 2 * cli.nodes {
                        invariant_violations += 1;
                    }
                }

                let point = PointReport::from_trials(p, &outcomes);
                println!(
                    "  {:>6.3} {:>9.1}±{:<4.1} {:>13.4}±{:<4.3} {:>13.4}±{:<4.3} {:>6}/{:<2} {:>5.0}ms",
                    point.p,
                    point.rounds.mean,
                    (point.rounds.ci_upper - point.rounds.ci_lower) / 2.0,
                    point.surviving_a.mean,
                    (point.surviving_a.ci_upper - point.surviving_a.ci_lower) / 2.0,
                    point.surviving_b.mean,
                    (point.surviving_b.ci_upper - point.surviving_b.ci_lower) / 2.0,
                    point.collapse_count,
                    cli.trials,
                    point_start.elapsed().as_millis(),
                );
                points.push(point);
            }
            println!();

            case_reports.push(CaseReport {
                case_a: case_a.name.to_string(),
                case_b: case_b.name.to_string(),
                label_a: case_a.label.to_string(),
                label_b: case_b.label.to_string(),
                points,
            });
        }
    }

    let suite_elapsed = suite_start.elapsed();
    println!(
        "  {} case pairing(s) swept in {:.1}s  Invariant violations: {}\n",
        case_reports.len(),
        suite_elapsed.as_secs_f64(),
        invariant_violations
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis();
    let timestamp = format!("{}", ts);

    let sweep_report = SweepReport {
        timestamp: timestamp.clone(),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        nodes: cli.nodes,
        trials_per_point: cli.trials,
        base_seed: cli.seed,
        cases: case_reports,
    };

    let dir = std::path::Path::new("sweep-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create sweep-results/");
    }
    let path = dir.join(format!("sweep-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&sweep_report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write sweep file");
    println!("  Results saved to: {}\n", path.display());

    if invariant_violations > 0 {
        std::process::exit(1);
    }
}
