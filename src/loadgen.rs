// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Load Model
//
// Draws per-node base load L and spare capacity S from a configured
// distribution pair. Capacity C = L + S is computed once here and never
// changes again except for the all-zero failure write in network.rs.

use rand::Rng;
use rand_distr::{Distribution, Pareto, Uniform, Weibull};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised while building a network's load model. Non-retryable: construction
/// fails before any simulation begins, and a sweep aborts on the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown base-load distribution: {0:?}")]
    UnknownDistribution(String),
    #[error("unknown spare-capacity rule: {0:?}")]
    UnknownSpareRule(String),
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("invalid value for parameter: {0}")]
    InvalidParameter(&'static str),
}

// ---------------------------------------------------------------------------
// Distribution selectors
// ---------------------------------------------------------------------------

/// Base-load distribution. Closed variant set; anything else is a
/// `ConfigError` at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadKind {
    /// Shifted Weibull: `l_min + Weibull(scale = lambda, shape = k)`.
    Weibull,
    /// `Uniform(l_min, l_max)`.
    Uniform,
    /// `Pareto(scale = l_min, shape = b)`.
    Pareto,
}

impl LoadKind {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "weibull" => Ok(Self::Weibull),
            "uniform" => Ok(Self::Uniform),
            "pareto" => Ok(Self::Pareto),
            other => Err(ConfigError::UnknownDistribution(other.to_string())),
        }
    }
}

/// Spare-capacity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpareKind {
    /// `S = alpha * L`, so total capacity is `(1 + alpha) * L`.
    Linear,
    /// `S ~ Uniform(s_min, s_max)`, drawn independently of the load.
    Uniform,
}

impl SpareKind {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "linear" => Ok(Self::Linear),
            "uniform" => Ok(Self::Uniform),
            other => Err(ConfigError::UnknownSpareRule(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter record
// ---------------------------------------------------------------------------

/// Flat parameter record. Which keys are required depends on the selected
/// kinds; the serde names match the schema shared with the analytical
/// evaluation collaborator (`L_min`, `lambda`, `k`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(rename = "L_min")]
    pub l_min: Option<f64>,
    #[serde(rename = "L_max")]
    pub l_max: Option<f64>,
    /// Weibull scale.
    pub lambda: Option<f64>,
    /// Weibull shape.
    pub k: Option<f64>,
    /// Pareto shape.
    pub b: Option<f64>,
    /// Linear spare multiplier.
    pub alpha: Option<f64>,
    #[serde(rename = "S_min")]
    pub s_min: Option<f64>,
    #[serde(rename = "S_max")]
    pub s_max: Option<f64>,
}

fn require(value: Option<f64>, name: &'static str) -> Result<f64, ConfigError> {
    value.ok_or(ConfigError::MissingParameter(name))
}

// ---------------------------------------------------------------------------
// Load model configuration
// ---------------------------------------------------------------------------

/// One network's full load-model selection: a base-load distribution, a
/// spare-capacity rule, and the parameter record both draw from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadModelConfig {
    pub load: LoadKind,
    pub spare: SpareKind,
    pub params: Params,
}

impl LoadModelConfig {
    pub fn new(load: LoadKind, spare: SpareKind, params: Params) -> Self {
        Self { load, spare, params }
    }

    /// Parse from distribution/rule names, as they appear in the shared
    /// parameter schema.
    pub fn from_names(load: &str, spare: &str, params: Params) -> Result<Self, ConfigError> {
        Ok(Self {
            load: LoadKind::from_name(load)?,
            spare: SpareKind::from_name(spare)?,
            params,
        })
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Per-node load and capacity vectors produced by one draw.
///
/// Invariant on output: `capacity[i] >= load[i] > 0` for every node, so no
/// node starts overloaded.
#[derive(Debug, Clone)]
pub struct NodeLoads {
    pub load: Vec<f64>,
    pub capacity: Vec<f64>,
}

/// Draw `n` nodes' base loads and spare capacities from `config`.
///
/// # Errors
/// `MissingParameter` if the selected kinds need a key absent from the
/// record, `InvalidParameter` for values the samplers reject (non-positive
/// scale/shape, inverted uniform bounds, negative alpha).
pub fn generate(
    config: &LoadModelConfig,
    n: usize,
    rng: &mut impl Rng,
) -> Result<NodeLoads, ConfigError> {
    let load = sample_loads(config, n, rng)?;
    let spare = sample_spares(config, &load, rng)?;
    let capacity = load.iter().zip(spare.iter()).map(|(l, s)| l + s).collect();
    Ok(NodeLoads { load, capacity })
}

fn sample_loads(
    config: &LoadModelConfig,
    n: usize,
    rng: &mut impl Rng,
) -> Result<Vec<f64>, ConfigError> {
    let p = &config.params;
    match config.load {
        LoadKind::Weibull => {
            let l_min = require(p.l_min, "L_min")?;
            let lambda = require(p.lambda, "lambda")?;
            let k = require(p.k, "k")?;
            if l_min < 0.0 {
                return Err(ConfigError::InvalidParameter("L_min"));
            }
            let dist =
                Weibull::new(lambda, k).map_err(|_| ConfigError::InvalidParameter("lambda"))?;
            Ok((0..n).map(|_| l_min + dist.sample(rng)).collect())
        }
        LoadKind::Uniform => {
            let l_min = require(p.l_min, "L_min")?;
            let l_max = require(p.l_max, "L_max")?;
            if !(l_min > 0.0 && l_max > l_min) {
                return Err(ConfigError::InvalidParameter("L_max"));
            }
            let dist = Uniform::new(l_min, l_max);
            Ok((0..n).map(|_| dist.sample(rng)).collect())
        }
        LoadKind::Pareto => {
            let l_min = require(p.l_min, "L_min")?;
            let b = require(p.b, "b")?;
            let dist = Pareto::new(l_min, b).map_err(|_| ConfigError::InvalidParameter("b"))?;
            Ok((0..n).map(|_| dist.sample(rng)).collect())
        }
    }
}

fn sample_spares(
    config: &LoadModelConfig,
    load: &[f64],
    rng: &mut impl Rng,
) -> Result<Vec<f64>, ConfigError> {
    let p = &config.params;
    match config.spare {
        SpareKind::Linear => {
            let alpha = require(p.alpha, "alpha")?;
            if alpha < 0.0 {
                return Err(ConfigError::InvalidParameter("alpha"));
            }
            Ok(load.iter().map(|l| alpha * l).collect())
        }
        SpareKind::Uniform => {
            let s_min = require(p.s_min, "S_min")?;
            let s_max = require(p.s_max, "S_max")?;
            if !(s_min >= 0.0 && s_max > s_min) {
                return Err(ConfigError::InvalidParameter("S_max"));
            }
            let dist = Uniform::new(s_min, s_max);
            Ok(load.iter().map(|_| dist.sample(rng)).collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weibull_linear() -> LoadModelConfig {
        LoadModelConfig::new(
            LoadKind::Weibull,
            SpareKind::Linear,
            Params {
                l_min: Some(10.0),
                lambda: Some(100.0),
                k: Some(0.6),
                alpha: Some(3.74),
                ..Params::default()
            },
        )
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(
            LoadKind::from_name("gaussian"),
            Err(ConfigError::UnknownDistribution("gaussian".to_string()))
        );
        assert_eq!(
            SpareKind::from_name("quadratic"),
            Err(ConfigError::UnknownSpareRule("quadratic".to_string()))
        );
    }

    #[test]
    fn test_config_from_names() {
        let config = LoadModelConfig::from_names("pareto", "linear", Params::default()).unwrap();
        assert_eq!(config.load, LoadKind::Pareto);
        assert_eq!(config.spare, SpareKind::Linear);

        let err = LoadModelConfig::from_names("weibull", "exponential", Params::default());
        assert_eq!(
            err,
            Err(ConfigError::UnknownSpareRule("exponential".to_string()))
        );
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let config = LoadModelConfig::new(
            LoadKind::Weibull,
            SpareKind::Linear,
            Params {
                l_min: Some(10.0),
                k: Some(0.6),
                alpha: Some(3.74),
                ..Params::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = generate(&config, 10, &mut rng).unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("lambda"));
    }

    #[test]
    fn test_inverted_uniform_bounds_rejected() {
        let config = LoadModelConfig::new(
            LoadKind::Uniform,
            SpareKind::Linear,
            Params {
                l_min: Some(30.0),
                l_max: Some(10.0),
                alpha: Some(1.0),
                ..Params::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = generate(&config, 10, &mut rng).unwrap_err();
        assert_eq!(err, ConfigError::InvalidParameter("L_max"));
    }

    #[test]
    fn test_linear_spare_scales_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let nodes = generate(&weibull_linear(), 200, &mut rng).unwrap();
        for (l, c) in nodes.load.iter().zip(nodes.capacity.iter()) {
            assert!(*l > 0.0);
            assert!((c - l * 4.74).abs() < 1e-9 * c.abs());
        }
    }

    #[test]
    fn test_uniform_load_uniform_spare_bounds() {
        let config = LoadModelConfig::new(
            LoadKind::Uniform,
            SpareKind::Uniform,
            Params {
                l_min: Some(10.0),
                l_max: Some(30.0),
                s_min: Some(40.0),
                s_max: Some(50.0),
                ..Params::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let nodes = generate(&config, 500, &mut rng).unwrap();
        for (l, c) in nodes.load.iter().zip(nodes.capacity.iter()) {
            assert!(*l >= 10.0 && *l < 30.0);
            let spare = c - l;
            assert!(spare >= 40.0 && spare < 50.0);
        }
    }

    #[test]
    fn test_pareto_respects_scale_floor() {
        let config = LoadModelConfig::new(
            LoadKind::Pareto,
            SpareKind::Linear,
            Params {
                l_min: Some(10.0),
                b: Some(2.0),
                alpha: Some(2.3),
                ..Params::default()
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let nodes = generate(&config, 500, &mut rng).unwrap();
        for l in &nodes.load {
            assert!(*l >= 10.0);
        }
    }

    #[test]
    fn test_no_node_starts_overloaded() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let nodes = generate(&weibull_linear(), 1000, &mut rng).unwrap();
        for (l, c) in nodes.load.iter().zip(nodes.capacity.iter()) {
            assert!(*c >= *l && *l > 0.0);
        }
    }

    #[test]
    fn test_seeded_draw_is_deterministic() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let a = generate(&weibull_linear(), 100, &mut rng_a).unwrap();
        let b = generate(&weibull_linear(), 100, &mut rng_b).unwrap();
        assert_eq!(a.load, b.load);
        assert_eq!(a.capacity, b.capacity);
    }

    #[test]
    fn test_params_deserialize_shared_schema() {
        let params: Params =
            serde_json::from_str(r#"{"L_min": 10, "lambda": 100, "k": 0.6, "alpha": 3.74}"#)
                .unwrap();
        assert_eq!(params.l_min, Some(10.0));
        assert_eq!(params.lambda, Some(100.0));
        assert_eq!(params.alpha, Some(3.74));
        assert_eq!(params.s_min, None);
    }
}
