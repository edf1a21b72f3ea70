//! Configuration errors raised when a runner is built
//!
//! These are the only errors the engine produces. Everything past
//! construction (force evaluation, integration, recording) is infallible.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoBodies,
    NonPositiveMass { name: String, mass: f64 },
    NonPositiveTimeStep(f64),
    NegativeSoftening(f64),
    NonPositiveGravitationalConstant(f64),
    NonFiniteValue { name: String, field: &'static str },
    DuplicateName(String),
    ZeroRecordCadence,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBodies => write!(f, "simulation needs at least one body"),
            ConfigError::NonPositiveMass { name, mass } => {
                write!(f, "body '{name}' has non-positive mass {mass}")
            }
            ConfigError::NonPositiveTimeStep(dt) => {
                write!(f, "time step must be positive, got {dt}")
            }
            ConfigError::NegativeSoftening(eps) => {
                write!(f, "softening length must be non-negative, got {eps}")
            }
            ConfigError::NonPositiveGravitationalConstant(g) => {
                write!(f, "gravitational constant must be positive, got {g}")
            }
            ConfigError::NonFiniteValue { name, field } => {
                write!(f, "body '{name}' has a non-finite {field}")
            }
            ConfigError::DuplicateName(name) => {
                write!(f, "body name '{name}' is used more than once")
            }
            ConfigError::ZeroRecordCadence => {
                write!(f, "record_every must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
