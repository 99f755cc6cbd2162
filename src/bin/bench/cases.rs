// Case Definitions — the five predefined distribution cases
// Parameter values match the shared case tables used by the analytical model

use cascade_engine::{LoadKind, LoadModelConfig, Params, SpareKind};

// ─── Case Configuration ─────────────────────────────────────────────────────

pub struct Case {
    pub name: &'static str,
    pub label: &'static str,
    pub config: LoadModelConfig,
}

pub fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "CASE_1_WEIBULL_LINEAR",
            label: "L~Weibull(10,100,0.6) S=3.74L",
            config: LoadModelConfig::new(
                LoadKind::Weibull,
                SpareKind::Linear,
                Params {
                    l_min: Some(10.0),
                    lambda: Some(100.0),
                    k: Some(0.6),
                    alpha: Some(3.74),
                    ..Params::default()
                },
            ),
        },
        Case {
            name: "CASE_2_WEIBULL_UNIFORM",
            label: "L~Weibull(10,100,0.6) S~U(60,80)",
            config: LoadModelConfig::new(
                LoadKind::Weibull,
                SpareKind::Uniform,
                Params {
                    l_min: Some(10.0),
                    lambda: Some(100.0),
                    k: Some(0.6),
                    s_min: Some(60.0),
                    s_max: Some(80.0),
                    ..Params::default()
                },
            ),
        },
        Case {
            name: "CASE_3_UNIFORM_LINEAR",
            label: "L~U(10,30) S=2.74L",
            config: LoadModelConfig::new(
                LoadKind::Uniform,
                SpareKind::Linear,
                Params {
                    l_min: Some(10.0),
                    l_max: Some(30.0),
                    alpha: Some(2.74),
                    ..Params::default()
                },
            ),
        },
        Case {
            name: "CASE_4_UNIFORM_UNIFORM",
            label: "L~U(10,30) S~U(40,50)",
            config: LoadModelConfig::new(
                LoadKind::Uniform,
                SpareKind::Uniform,
                Params {
                    l_min: Some(10.0),
                    l_max: Some(30.0),
                    s_min: Some(40.0),
                    s_max: Some(50.0),
                    ..Params::default()
                },
            ),
        },
        Case {
            name: "CASE_5_PARETO_LINEAR",
            label: "L~Pareto(10,2) S=2.3L",
            config: LoadModelConfig::new(
                LoadKind::Pareto,
                SpareKind::Linear,
                Params {
                    l_min: Some(10.0),
                    b: Some(2.0),
                    alpha: Some(2.3),
                    ..Params::default()
                },
            ),
        },
    ]
}
