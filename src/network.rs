// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Network State
//
// One network's node arrays plus failure injection and equal-share load
// redistribution. Nodes carry no topology: a failed node's load is spread
// uniformly over all survivors.

use rand::Rng;

use crate::conservation::ConservationAudit;
use crate::loadgen::{self, ConfigError, LoadModelConfig};

/// Per-node load/capacity state for one network.
///
/// "Active" is derived, not stored: a node is active iff its capacity is
/// nonzero. Failure zeroes both load and capacity permanently; a failed
/// node never reactivates and never participates in redistribution again.
#[derive(Debug, Clone)]
pub struct NetworkState {
    load: Vec<f64>,
    capacity: Vec<f64>,
    audit: ConservationAudit,
}

impl NetworkState {
    /// Draw a fresh network of `n` nodes from the configured load model.
    pub fn new(
        n: usize,
        config: &LoadModelConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        let nodes = loadgen::generate(config, n, rng)?;
        Ok(Self::from_parts(nodes.load, nodes.capacity))
    }

    /// Build directly from load/capacity vectors. Callers must uphold
    /// `capacity[i] >= load[i] > 0` for every node they intend to be active.
    pub fn from_parts(load: Vec<f64>, capacity: Vec<f64>) -> Self {
        assert_eq!(load.len(), capacity.len());
        Self {
            load,
            capacity,
            audit: ConservationAudit::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.load.len()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.capacity[index] != 0.0
    }

    pub fn load_of(&self, index: usize) -> f64 {
        self.load[index]
    }

    pub fn capacity_of(&self, index: usize) -> f64 {
        self.capacity[index]
    }

    /// Count of nodes still carrying load.
    pub fn surviving_count(&self) -> usize {
        self.load.iter().filter(|l| **l != 0.0).count()
    }

    pub fn surviving_fraction(&self) -> f64 {
        if self.load.is_empty() {
            return 0.0;
        }
        self.surviving_count() as f64 / self.load.len() as f64
    }

    pub fn total_load(&self) -> f64 {
        self.load.iter().sum()
    }

    /// Conservation audit accumulated over every redistribution pass run on
    /// this instance.
    pub fn audit(&self) -> &ConservationAudit {
        &self.audit
    }

    /// Select `floor(p * N)` distinct node indices uniformly at random.
    ///
    /// Only ever called on a freshly initialized network, so selection is
    /// over all N nodes, not just active ones. A zero count returns an
    /// empty list (a no-op downstream, not an error).
    pub fn generate_initial_failures(&self, p: f64, rng: &mut impl Rng) -> Vec<usize> {
        let n = self.num_nodes();
        let count = ((p * n as f64).floor() as usize).min(n);
        if count == 0 {
            return Vec::new();
        }
        rand::seq::index::sample(rng, n, count).into_vec()
    }

    /// Force the given nodes to fail and redistribute their combined load.
    ///
    /// Idempotent per node: an already-failed index holds zero load and
    /// contributes nothing to the redistributed total. Returns the nodes
    /// that newly failed downstream of this injection.
    pub fn apply_failures(&mut self, indices: &[usize]) -> Vec<usize> {
        let mut lost_load = 0.0;
        for &i in indices {
            lost_load += self.load[i];
            self.load[i] = 0.0;
            self.capacity[i] = 0.0;
        }
        self.redistribute(lost_load)
    }

    /// Spread `lost_load` equally over survivors, failing every node whose
    /// load reaches its capacity (inclusive threshold: load == capacity is
    /// a failure), until no load remains in flight.
    ///
    /// Passes are batch-synchronous: the survivor count and share are fixed
    /// at the top of each pass, and all overload checks within a pass see
    /// the same share. Every continuing pass fails at least one node, so
    /// the loop is bounded by N; the explicit guard only fires if that
    /// invariant is broken by non-finite arithmetic.
    ///
    /// Returns the indices that failed during this call, in discovery
    /// order, duplicate-free (a node's capacity is zeroed the moment it is
    /// recorded, so it can never be recorded twice).
    pub fn redistribute(&mut self, mut lost_load: f64) -> Vec<usize> {
        let n = self.load.len();
        let mut newly_failed = Vec::new();
        let mut passes = 0usize;

        while lost_load != 0.0 {
            let survivors = self.surviving_count();
            if survivors == 0 {
                // Full collapse: nowhere left to shed load. Normal outcome.
                break;
            }

            let share = lost_load / survivors as f64;
            if !share.is_finite() {
                log::error!(
                    "non-finite share from lost load {} over {} survivors",
                    lost_load,
                    survivors
                );
                break;
            }
            self.audit.verify_pass(lost_load, share, survivors);

            let mut next_lost = 0.0;
            for i in 0..n {
                if self.capacity[i] == 0.0 {
                    continue;
                }
                self.load[i] += share;
                if self.load[i] >= self.capacity[i] {
                    newly_failed.push(i);
                    next_lost += self.load[i];
                    self.load[i] = 0.0;
                    self.capacity[i] = 0.0;
                }
            }

            lost_load = next_lost;
            passes += 1;
            if passes > n {
                log::error!("redistribution exceeded {} passes; aborting cascade", n);
                break;
            }
        }

        newly_failed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
