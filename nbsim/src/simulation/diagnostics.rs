//! Conservation diagnostics
//!
//! A [`Diagnostics`] value is a read-only summary of one state: energies,
//! momenta and the center of mass. Comparing two of them gives the drift
//! checks used for stability monitoring. The engine only reports drift, it
//! never adjusts the state to remove it.

use std::fmt;

use super::forces::AccelSet;
use super::states::{NVec3, SystemState};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub time: f64,
    pub steps: u64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_energy: f64,
    pub momentum: NVec3,
    pub momentum_scale: f64, // sum of m |v|, the scale momentum drift is measured against
    pub angular_momentum: NVec3,
    pub center_of_mass: NVec3,
    pub center_of_mass_velocity: NVec3,
}

/// Non-fatal drift report. The run continues regardless.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalInstabilityWarning {
    EnergyDrift { relative: f64, tolerance: f64 },
    MomentumDrift { relative: f64, tolerance: f64 },
}

impl fmt::Display for NumericalInstabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalInstabilityWarning::EnergyDrift { relative, tolerance } => {
                write!(f, "relative energy drift {relative:.3e} exceeds tolerance {tolerance:.3e}")
            }
            NumericalInstabilityWarning::MomentumDrift { relative, tolerance } => {
                write!(f, "relative momentum drift {relative:.3e} exceeds tolerance {tolerance:.3e}")
            }
        }
    }
}

/// Drift thresholds supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftTolerance {
    pub relative_energy: f64,
    pub relative_momentum: f64,
}

impl Default for DriftTolerance {
    fn default() -> Self {
        Self {
            relative_energy: 1e-3,
            relative_momentum: 1e-9,
        }
    }
}

impl Diagnostics {
    /// Summarise `sys` using the potential energy reported by `forces`
    pub fn measure(sys: &SystemState, forces: &AccelSet, steps: u64) -> Self {
        let kinetic_energy = sys.kinetic_energy();
        let potential_energy = forces.potential_energy(sys);
        let (center_of_mass, center_of_mass_velocity) = sys.center_of_mass();

        Self {
            time: sys.time,
            steps,
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
            momentum: sys.total_momentum(),
            momentum_scale: sys.bodies.iter().map(|b| b.mass * b.velocity.norm()).sum(),
            angular_momentum: sys.total_angular_momentum(),
            center_of_mass,
            center_of_mass_velocity,
        }
    }

    /// `|E - E0| / |E0|`, or the absolute difference when `E0` is zero
    pub fn energy_drift(&self, baseline: &Diagnostics) -> f64 {
        let diff = (self.total_energy - baseline.total_energy).abs();
        if baseline.total_energy == 0.0 {
            diff
        } else {
            diff / baseline.total_energy.abs()
        }
    }

    /// `|P - P0| / sum(m |v|)` of the baseline, or the absolute difference
    /// when every baseline body is at rest
    pub fn momentum_drift(&self, baseline: &Diagnostics) -> f64 {
        let diff = (self.momentum - baseline.momentum).norm();
        if baseline.momentum_scale == 0.0 {
            diff
        } else {
            diff / baseline.momentum_scale
        }
    }

    /// Compare against `baseline`, returning one warning per exceeded threshold
    pub fn check_stability(&self, baseline: &Diagnostics, tolerance: DriftTolerance) -> Vec<NumericalInstabilityWarning> {
        let mut warnings = Vec::new();

        // negated comparisons so a NaN drift is reported too
        let relative = self.energy_drift(baseline);
        if !(relative <= tolerance.relative_energy) {
            warnings.push(NumericalInstabilityWarning::EnergyDrift {
                relative,
                tolerance: tolerance.relative_energy,
            });
        }

        let relative = self.momentum_drift(baseline);
        if !(relative <= tolerance.relative_momentum) {
            warnings.push(NumericalInstabilityWarning::MomentumDrift {
                relative,
                tolerance: tolerance.relative_momentum,
            });
        }

        warnings
    }
}
