//! Numerical and physical parameters for a run
//!
//! `SimulationConfig` holds everything the physics needs:
//! - gravitational constant and Plummer softening length,
//! - the fixed integration step,
//! - the initial bodies, in the order they keep for the whole run.
//!
//! It is checked once by [`SimulationConfig::validate`] when a runner is built
//! and never mutated afterwards.

use std::collections::HashSet;

use super::error::ConfigError;
use super::states::Body;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub gravitational_constant: f64, // G, any unit system
    pub softening_length: f64,       // epsilon, 0 gives the exact inverse-square law
    pub time_step: f64,              // fixed dt
    pub initial_bodies: Vec<Body>,
}

impl SimulationConfig {
    pub fn new(gravitational_constant: f64, softening_length: f64, time_step: f64, initial_bodies: Vec<Body>) -> Self {
        Self {
            gravitational_constant,
            softening_length,
            time_step,
            initial_bodies,
        }
    }

    /// Semantic checks: at least one body, every mass positive and finite,
    /// unique names, `dt > 0`, `epsilon >= 0`, `G > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.time_step));
        }
        if !self.softening_length.is_finite() || self.softening_length < 0.0 {
            return Err(ConfigError::NegativeSoftening(self.softening_length));
        }
        if !self.gravitational_constant.is_finite() || self.gravitational_constant <= 0.0 {
            return Err(ConfigError::NonPositiveGravitationalConstant(self.gravitational_constant));
        }

        let mut seen = HashSet::with_capacity(self.initial_bodies.len());
        for b in &self.initial_bodies {
            if !b.mass.is_finite() {
                return Err(ConfigError::NonFiniteValue {
                    name: b.name.clone(),
                    field: "mass",
                });
            }
            if b.mass <= 0.0 {
                return Err(ConfigError::NonPositiveMass {
                    name: b.name.clone(),
                    mass: b.mass,
                });
            }
            if b.position.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::NonFiniteValue {
                    name: b.name.clone(),
                    field: "position",
                });
            }
            if b.velocity.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::NonFiniteValue {
                    name: b.name.clone(),
                    field: "velocity",
                });
            }
            if !seen.insert(b.name.as_str()) {
                return Err(ConfigError::DuplicateName(b.name.clone()));
            }
        }

        Ok(())
    }
}
