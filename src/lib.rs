// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload")
//
// Models cascading overload failures in a pair of interdependent networks:
// equal-share load redistribution within each network, index-coupled
// failure propagation between them, and a Monte-Carlo harness sweeping the
// initial-failure fraction.

pub mod conservation;
pub mod coupler;
pub mod experiment;
pub mod loadgen;
pub mod network;
pub mod types;

pub use coupler::CascadeCoupler;
pub use loadgen::{ConfigError, LoadKind, LoadModelConfig, Params, SpareKind};
pub use network::NetworkState;
pub use types::{SweepConfig, SweepPoint, TrialOutcome};
