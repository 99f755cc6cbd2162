// Sweep Report Types
// Structured output for independent analysis of cascade sweeps

use cascade_engine::TrialOutcome;
use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                ci_lower: 0.0,
                ci_upper: 0.0,
                min: 0.0,
                max: 0.0,
                n: 0,
            };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Per-p Point Report ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PointReport {
    pub p: f64,
    pub rounds: Stats,
    pub surviving_a: Stats,
    pub surviving_b: Stats,
    /// Trials in which either network fully collapsed.
    pub collapse_count: usize,
}

impl PointReport {
    pub fn from_trials(p: f64, outcomes: &[TrialOutcome]) -> Self {
        let rounds: Vec<f64> = outcomes.iter().map(|o| o.rounds as f64).collect();
        let a: Vec<f64> = outcomes.iter().map(|o| o.surviving_fraction_a).collect();
        let b: Vec<f64> = outcomes.iter().map(|o| o.surviving_fraction_b).collect();
        let collapse_count = outcomes
            .iter()
            .filter(|o| o.surviving_fraction_a == 0.0)
            .count();
        Self {
            p,
            rounds: Stats::from_samples(&rounds),
            surviving_a: Stats::from_samples(&a),
            surviving_b: Stats::from_samples(&b),
            collapse_count,
        }
    }
}

// ─── Per Case-Pair Report ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub case_a: String,
    pub case_b: String,
    pub label_a: String,
    pub label_b: String,
    pub points: Vec<PointReport>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub nodes: usize,
    pub trials_per_point: usize,
    pub base_seed: u64,
    pub cases: Vec<CaseReport>,
}
