//! High-level runtime engine settings
//!
//! Selects the integration scheme and the recording policy used by a
//! `SimulationRunner`. None of this changes the physics of a single step.

use super::integrator::IntegratorKind;

/// Trail length used when a scenario does not set one
pub const DEFAULT_TRAIL_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerSettings {
    pub integrator: IntegratorKind, // verlet, rk4 or euler
    pub record_every: usize,        // keep every k-th step in the trajectory, k >= 1
    pub trail_length: usize,        // recent positions kept per body, 0 = off
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::Verlet,
            record_every: 1,
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }
}

impl RunnerSettings {
    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_record_every(mut self, record_every: usize) -> Self {
        self.record_every = record_every;
        self
    }

    pub fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }
}
