//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-(de)serializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]: integrator and recording options (optional block)
//! - [`ParametersConfig`]: physical constants and the time step
//! - [`BodyConfig`]: initial state for each body
//! - [`ScenarioConfig`]: top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! name: binary
//!
//! engine:
//!   integrator: "verlet"    # or "rk4" / "euler"
//!   record_every: 10        # keep every 10th step in the trajectory
//!   trail_length: 500       # recent positions kept per body
//!
//! parameters:
//!   gravitational_constant: 1.0
//!   softening_length: 0.0
//!   time_step: 0.001
//!   total_time: 10.0        # used by the CLI when --duration is not given
//!
//! bodies:
//!   - name: a
//!     mass: 1.0
//!     position: [ -0.5, 0.0, 0.0 ]
//!     velocity: [  0.0, -0.7071067811865476, 0.0 ]
//!   - name: b
//!     mass: 1.0
//!     position: [  0.5, 0.0, 0.0 ]
//!     velocity: [  0.0, 0.7071067811865476, 0.0 ]
//! ```
//!
//! JSON documents are YAML too, so the same loader reads them. Documents
//! written by the older desktop tool (top-level `G`, `dt`, `integrator_type`,
//! `total_sim_time_s` and `initial_bodies` with `pos`/`vel`) are recognised by
//! their missing `parameters` block and converted.
//!
//! Only structure is checked here (required fields, 3-element vectors).
//! Physical validity (positive masses, positive time step, ...) is checked by
//! the engine when the runner is built.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::simulation::engine::{RunnerSettings, DEFAULT_TRAIL_LENGTH};
use crate::simulation::integrator::IntegratorKind;
use crate::simulation::params::SimulationConfig;
use crate::simulation::runner::SimulationRunner;
use crate::simulation::states::{Body, NVec3};

/// Which integrator method used by the engine
/// `integrator: "verlet"`, `"rk4"` or `"euler"`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "verlet")] // velocity Verlet: symplectic, bounded energy error
    Verlet,

    #[serde(rename = "rk4")] // classical 4th-order Runge-Kutta, not symplectic
    Rk4,

    #[serde(rename = "euler")] // explicit Euler, comparison only
    Euler,
}

impl From<IntegratorConfig> for IntegratorKind {
    fn from(cfg: IntegratorConfig) -> Self {
        match cfg {
            IntegratorConfig::Verlet => IntegratorKind::Verlet,
            IntegratorConfig::Rk4 => IntegratorKind::Rk4,
            IntegratorConfig::Euler => IntegratorKind::Euler,
        }
    }
}

impl From<IntegratorKind> for IntegratorConfig {
    fn from(kind: IntegratorKind) -> Self {
        match kind {
            IntegratorKind::Verlet => IntegratorConfig::Verlet,
            IntegratorKind::Rk4 => IntegratorConfig::Rk4,
            IntegratorKind::Euler => IntegratorConfig::Euler,
        }
    }
}

/// Engine configuration: how the run is stepped and recorded
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // time integrator used for advancing the system state
    #[serde(default = "default_record_every")]
    pub record_every: usize, // trajectory cadence in steps
    #[serde(default = "default_trail_length")]
    pub trail_length: usize, // per-body recent position window
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::default(),
            record_every: default_record_every(),
            trail_length: default_trail_length(),
        }
    }
}

fn default_record_every() -> usize {
    1
}

fn default_trail_length() -> usize {
    DEFAULT_TRAIL_LENGTH
}

/// Physical and numerical parameters
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    #[serde(alias = "G")]
    pub gravitational_constant: f64,
    #[serde(default)]
    pub softening_length: f64, // Plummer softening, 0 = exact inverse-square law
    #[serde(alias = "dt")]
    pub time_step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>, // default run length for the CLI
}

/// Initial state of one body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    #[serde(alias = "pos")]
    pub position: [f64; 3],
    #[serde(alias = "vel")]
    pub velocity: [f64; 3],
}

/// Top-level scenario configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(alias = "initial_bodies")]
    pub bodies: Vec<BodyConfig>,
}

/// Layout written by the older desktop tool. Unknown keys (ids, radii,
/// colours, camera state, ...) are ignored.
#[derive(Deserialize, Debug)]
struct LegacyScenarioConfig {
    #[serde(rename = "G")]
    g: f64,
    dt: f64,
    #[serde(default)]
    integrator_type: Option<String>,
    #[serde(default)]
    collision_model: Option<String>,
    #[serde(default)]
    total_sim_time_s: Option<f64>,
    #[serde(default)]
    initial_bodies: Vec<BodyConfig>,
}

impl LegacyScenarioConfig {
    fn into_scenario(self) -> Result<ScenarioConfig> {
        let integrator = match self.integrator_type.as_deref() {
            None | Some("rk4") => IntegratorConfig::Rk4, // the old tool's default
            Some("verlet") => IntegratorConfig::Verlet,
            Some("euler") => IntegratorConfig::Euler,
            Some(other) => anyhow::bail!("unknown integrator_type '{other}'"),
        };

        if let Some(model) = self.collision_model.as_deref() {
            if model != "ignore" {
                warn!("collision_model '{model}' is not supported, bodies will pass through each other");
            }
        }

        Ok(ScenarioConfig {
            name: None,
            engine: EngineConfig {
                integrator,
                ..EngineConfig::default()
            },
            parameters: ParametersConfig {
                gravitational_constant: self.g,
                softening_length: 0.0,
                time_step: self.dt,
                total_time: self.total_sim_time_s,
            },
            bodies: self.initial_bodies,
        })
    }
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::new(
            self.name.clone(),
            self.mass,
            NVec3::from(self.position),
            NVec3::from(self.velocity),
        )
    }

    pub fn from_body(b: &Body) -> Self {
        Self {
            name: b.name.clone(),
            mass: b.mass,
            position: [b.position.x, b.position.y, b.position.z],
            velocity: [b.velocity.x, b.velocity.y, b.velocity.z],
        }
    }
}

impl ScenarioConfig {
    /// Parse a YAML or JSON document
    pub fn parse(text: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(text).context("scenario is not valid YAML/JSON")?;
        Self::from_value(doc)
    }

    /// Load a scenario file (YAML or JSON)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("cannot open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        let doc: serde_yaml::Value =
            serde_yaml::from_reader(reader).with_context(|| format!("cannot parse scenario {}", path.display()))?;
        let cfg = Self::from_value(doc).with_context(|| format!("invalid scenario {}", path.display()))?;

        info!("loaded scenario {} with {} bodies", path.display(), cfg.bodies.len());
        Ok(cfg)
    }

    /// Write the scenario as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        serde_yaml::to_writer(BufWriter::new(file), self)
            .with_context(|| format!("cannot write scenario {}", path.display()))?;

        info!("saved scenario to {}", path.display());
        Ok(())
    }

    fn from_value(doc: serde_yaml::Value) -> Result<Self> {
        let is_legacy = doc.get("parameters").is_none() && doc.get("G").is_some();
        if is_legacy {
            let legacy: LegacyScenarioConfig = serde_yaml::from_value(doc)?;
            return legacy.into_scenario();
        }
        Ok(serde_yaml::from_value(doc)?)
    }

    /// Runtime physics config (not yet validated)
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(
            self.parameters.gravitational_constant,
            self.parameters.softening_length,
            self.parameters.time_step,
            self.bodies.iter().map(BodyConfig::to_body).collect(),
        )
    }

    pub fn runner_settings(&self) -> RunnerSettings {
        RunnerSettings {
            integrator: self.engine.integrator.into(),
            record_every: self.engine.record_every,
            trail_length: self.engine.trail_length,
        }
    }

    /// Validate and build a runner. Semantic errors surface as `ConfigError`
    /// wrapped in `anyhow`.
    pub fn build_runner(&self) -> Result<SimulationRunner> {
        let runner = SimulationRunner::new(self.simulation_config(), self.runner_settings())?;
        Ok(runner)
    }

    /// Inverse of [`ScenarioConfig::simulation_config`] / [`ScenarioConfig::runner_settings`]
    pub fn from_runtime(config: &SimulationConfig, settings: &RunnerSettings, total_time: Option<f64>) -> Self {
        Self {
            name: None,
            engine: EngineConfig {
                integrator: settings.integrator.into(),
                record_every: settings.record_every,
                trail_length: settings.trail_length,
            },
            parameters: ParametersConfig {
                gravitational_constant: config.gravitational_constant,
                softening_length: config.softening_length,
                time_step: config.time_step,
                total_time,
            },
            bodies: config.initial_bodies.iter().map(BodyConfig::from_body).collect(),
        }
    }
}
