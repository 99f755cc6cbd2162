// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Experiment Harness
//
// Monte-Carlo layer: repeated independent coupled cascades per swept
// initial-failure fraction, aggregated by arithmetic mean. Every trial is
// fully private (fresh networks, fresh seeded PRNG), so equal seeds give
// bit-identical outcomes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::coupler::CascadeCoupler;
use crate::loadgen::{ConfigError, LoadModelConfig};
use crate::network::NetworkState;
use crate::types::{SweepConfig, SweepPoint, TrialOutcome};

/// Run one coupled cascade with a dedicated seed.
///
/// A single `ChaCha8Rng` drives network A's draw, then network B's, then
/// the initial-failure selection, so the whole trial is a pure function of
/// `(nodes, configs, p, seed)`.
pub fn run_trial(
    nodes: usize,
    config_a: &LoadModelConfig,
    config_b: &LoadModelConfig,
    p: f64,
    seed: u64,
) -> Result<TrialOutcome, ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = NetworkState::new(nodes, config_a, &mut rng)?;
    let b = NetworkState::new(nodes, config_b, &mut rng)?;
    let initial = a.generate_initial_failures(p, &mut rng);

    let mut coupler = CascadeCoupler::new(a, b);
    Ok(coupler.run(&initial))
}

/// Run `trials` independent trials at one `p`, seeds `base_seed + i`.
///
/// The first `ConfigError` aborts the whole point; there is no trial-level
/// failure mode besides configuration.
pub fn run_point(
    nodes: usize,
    config_a: &LoadModelConfig,
    config_b: &LoadModelConfig,
    p: f64,
    trials: usize,
    base_seed: u64,
) -> Result<Vec<TrialOutcome>, ConfigError> {
    (0..trials)
        .map(|i| run_trial(nodes, config_a, config_b, p, base_seed + i as u64))
        .collect()
}

/// Arithmetic-mean aggregation of one point's trials.
pub fn summarize(p: f64, outcomes: &[TrialOutcome]) -> SweepPoint {
    let n = outcomes.len();
    if n == 0 {
        return SweepPoint {
            p,
            mean_rounds: 0.0,
            mean_surviving_a: 0.0,
            mean_surviving_b: 0.0,
            trials: 0,
        };
    }
    let inv = 1.0 / n as f64;
    SweepPoint {
        p,
        mean_rounds: outcomes.iter().map(|o| o.rounds as f64).sum::<f64>() * inv,
        mean_surviving_a: outcomes.iter().map(|o| o.surviving_fraction_a).sum::<f64>() * inv,
        mean_surviving_b: outcomes.iter().map(|o| o.surviving_fraction_b).sum::<f64>() * inv,
        trials: n,
    }
}

/// Sweep every `p` in the configuration and aggregate per point.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepPoint>, ConfigError> {
    config
        .p_values
        .iter()
        .map(|&p| {
            let outcomes = run_point(
                config.nodes,
                &config.network_a,
                &config.network_b,
                p,
                config.trials,
                config.base_seed,
            )?;
            let point = summarize(p, &outcomes);
            log::info!(
                "p={:.3}: mean surviving A={:.4} B={:.4} over {} trials",
                p,
                point.mean_surviving_a,
                point.mean_surviving_b,
                point.trials
            );
            Ok(point)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
