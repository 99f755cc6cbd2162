// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Type Definitions

use serde::{Deserialize, Serialize};

use crate::loadgen::LoadModelConfig;

// ─── Trial Outcome ──────────────────────────────────────────────────────────

/// Result of one coupled cascade: rounds executed and each network's final
/// surviving fraction (survivors / N).
///
/// When either network fully collapses, both fractions are reported as zero
/// even if the partner still has survivors. This mirrors the reference
/// behavior and is a deliberate design choice; every aggregate statistic
/// downstream inherits it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub rounds: u32,
    pub surviving_fraction_a: f64,
    pub surviving_fraction_b: f64,
}

// ─── Sweep Aggregation ──────────────────────────────────────────────────────

/// Mean outcome over all trials at one initial-failure fraction `p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub p: f64,
    pub mean_rounds: f64,
    pub mean_surviving_a: f64,
    pub mean_surviving_b: f64,
    pub trials: usize,
}

// ─── Sweep Configuration ────────────────────────────────────────────────────

/// Everything the experiment harness needs for a full sweep: node count per
/// network, trial count per `p`, the swept `p` values, and the two networks'
/// load-model configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub nodes: usize,
    pub trials: usize,
    pub p_values: Vec<f64>,
    pub network_a: LoadModelConfig,
    pub network_b: LoadModelConfig,
    pub base_seed: u64,
}
