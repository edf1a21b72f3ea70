//! Core state types for the N-body simulation.
//!
//! - `Body`        one point mass (name, mass, position, velocity)
//! - `SystemState` the ordered body list plus the current simulation time
//!
//! Body order is fixed when a state is built and every integrator preserves
//! it, so an index into `bodies` identifies the same body for the whole run.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // label for I/O only, never used by the physics
    pub mass: f64,
    pub position: NVec3,
    pub velocity: NVec3,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, position: NVec3, velocity: NVec3) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
        }
    }

    /// Linear momentum `m v`
    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    /// Kinetic energy `1/2 m |v|^2`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Angular momentum about the origin, `r x (m v)`
    pub fn angular_momentum(&self) -> NVec3 {
        self.position.cross(&self.momentum())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    pub bodies: Vec<Body>,
    pub time: f64,
}

impl SystemState {
    /// State at `t = 0` holding `bodies` in the given order
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, time: 0.0 }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Sum of `m v` over all bodies. Constant for an isolated system.
    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .map(Body::momentum)
            .fold(NVec3::zeros(), |acc, p| acc + p)
    }

    pub fn total_angular_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .map(Body::angular_momentum)
            .fold(NVec3::zeros(), |acc, l| acc + l)
    }

    /// Mass-weighted mean position and velocity.
    ///
    /// Returns zero vectors when there are no bodies or the total mass is zero.
    pub fn center_of_mass(&self) -> (NVec3, NVec3) {
        let total = self.total_mass();
        if self.bodies.is_empty() || total == 0.0 {
            return (NVec3::zeros(), NVec3::zeros());
        }

        let mut com_x = NVec3::zeros();
        let mut com_v = NVec3::zeros();
        for b in &self.bodies {
            com_x += b.position * b.mass;
            com_v += b.velocity * b.mass;
        }
        (com_x / total, com_v / total)
    }
}
