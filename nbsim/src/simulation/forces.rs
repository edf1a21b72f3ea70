//! Force / acceleration contributors for the n-body engine
//!
//! Defines the [`Acceleration`] trait, the [`AccelSet`] that sums several
//! contributors into one buffer, and direct-summation Newtonian gravity with
//! Plummer softening.

use crate::simulation::states::{NVec3, SystemState};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &SystemState, out: &mut [NVec3]) {
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }

    /// Allocating form of [`AccelSet::accumulate_accels`]
    pub fn accels(&self, sys: &SystemState) -> Vec<NVec3> {
        let mut out = vec![NVec3::zeros(); sys.bodies.len()];
        self.accumulate_accels(sys.time, sys, &mut out);
        out
    }

    /// Sum of the potential energy reported by every term
    pub fn potential_energy(&self, sys: &SystemState) -> f64 {
        self.terms.iter().map(|t| t.potential_energy(sys)).sum()
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`SystemState`].
/// Implementations add their contribution into `out[i]` for each body and
/// must not fail: bad parameters are rejected before a term is built.
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &SystemState, out: &mut [NVec3]);

    /// Potential energy associated with this term, 0 for non-conservative ones
    fn potential_energy(&self, _sys: &SystemState) -> f64 {
        0.0
    }
}

/// Newtonian gravity with Plummer softening (direct n^2 sum)
///
/// `eps2 = 0` is the exact inverse-square law.
pub struct NewtonianGravity {
    pub g: f64,    // gravitational constant
    pub eps2: f64, // softening length squared
}

impl NewtonianGravity {
    pub fn new(g: f64, softening_length: f64) -> Self {
        Self {
            g,
            eps2: softening_length * softening_length,
        }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &SystemState, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        // Each unordered pair (i, j), i < j, is evaluated once and applied to
        // both bodies with opposite signs. Same result as the full i != j sum.
        for i in 0..n {
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.position - bi.position;

                // d2 = |r|^2 + eps^2
                let d2 = r.dot(&r) + self.eps2;

                // Only reachable with eps = 0 and coincident bodies. r is the
                // zero vector there, so the pair contributes nothing.
                if d2 == 0.0 {
                    continue;
                }

                // G / d2^(3/2)
                let inv_d = d2.sqrt().recip();
                let coef = self.g * inv_d * inv_d * inv_d;

                // a_i +=  G m_j r / d^3
                // a_j += -G m_i r / d^3
                out[i] += coef * bj.mass * r;
                out[j] -= coef * bi.mass * r;
            }
        }
    }

    /// `-sum_{i<j} G m_i m_j / sqrt(|r|^2 + eps^2)`
    fn potential_energy(&self, sys: &SystemState) -> f64 {
        let n = sys.bodies.len();
        let mut pe = 0.0;

        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                let r = bj.position - bi.position;
                let d2 = r.dot(&r) + self.eps2;
                if d2 == 0.0 {
                    continue;
                }
                pe -= self.g * bi.mass * bj.mass / d2.sqrt();
            }
        }
        pe
    }
}
