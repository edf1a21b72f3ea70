//! Fixed-step time integrators for the N-body system
//!
//! Every integrator takes the current [`SystemState`] by reference and
//! returns the state one step later as a new value. Nothing is updated in
//! place, so a half-finished step can never leak into the next force
//! evaluation.
//!
//! - [`VelocityVerlet`]: symplectic, second order, two force evaluations.
//!   The default.
//! - [`RungeKutta4`]: classical fourth order, four force evaluations, not
//!   symplectic (energy drifts slowly over long runs).
//! - [`ExplicitEuler`]: first order, one evaluation. Kept for comparison only,
//!   its energy error grows every step.
//!
//! A negative `dt` integrates backwards in time.

use super::forces::AccelSet;
use super::states::{NVec3, SystemState};

/// A time-stepping scheme
pub trait Integrator {
    /// Advance `sys` by `dt`, returning the new state
    fn step(&self, sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState;

    /// Number of full force evaluations one call to `step` performs
    fn force_evaluations_per_step(&self) -> usize;
}

/// Which integration scheme a runner uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[default]
    Verlet,
    Rk4,
    Euler,
}

impl IntegratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::Verlet => "verlet",
            IntegratorKind::Rk4 => "rk4",
            IntegratorKind::Euler => "euler",
        }
    }
}

impl Integrator for IntegratorKind {
    fn step(&self, sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
        match self {
            IntegratorKind::Verlet => VelocityVerlet.step(sys, dt, forces),
            IntegratorKind::Rk4 => RungeKutta4.step(sys, dt, forces),
            IntegratorKind::Euler => ExplicitEuler.step(sys, dt, forces),
        }
    }

    fn force_evaluations_per_step(&self) -> usize {
        match self {
            IntegratorKind::Verlet => VelocityVerlet.force_evaluations_per_step(),
            IntegratorKind::Rk4 => RungeKutta4.force_evaluations_per_step(),
            IntegratorKind::Euler => ExplicitEuler.force_evaluations_per_step(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for VelocityVerlet {
    fn step(&self, sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
        verlet_step(sys, dt, forces)
    }

    fn force_evaluations_per_step(&self) -> usize {
        2
    }
}

impl Integrator for RungeKutta4 {
    fn step(&self, sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
        rk4_step(sys, dt, forces)
    }

    fn force_evaluations_per_step(&self) -> usize {
        4
    }
}

impl Integrator for ExplicitEuler {
    fn step(&self, sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
        euler_step(sys, dt, forces)
    }

    fn force_evaluations_per_step(&self) -> usize {
        1
    }
}

/// Advance the system by one step using velocity-Verlet
///
/// ```text
/// a_n     = a(x_n)
/// x_n+1   = x_n + dt v_n + 1/2 dt^2 a_n
/// a_n+1   = a(x_n+1)
/// v_n+1   = v_n + 1/2 dt (a_n + a_n+1)
/// ```
///
/// Every body's new position is in place before `a_n+1` is evaluated.
pub fn verlet_step(sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
    let half_dt = 0.5 * dt;

    // a_n from x_n at time t_n
    let a_old = forces.accels(sys);

    // Drift every body to x_n+1, velocities still v_n
    let mut next = sys.clone();
    for (b, a) in next.bodies.iter_mut().zip(a_old.iter()) {
        b.position += dt * b.velocity + half_dt * dt * *a;
    }
    next.time = sys.time + dt;

    // a_n+1 from x_n+1 at time t_n+1
    let a_new = forces.accels(&next);

    // v_n+1 = v_n + dt/2 (a_n + a_n+1)
    for ((b, a0), a1) in next.bodies.iter_mut().zip(a_old.iter()).zip(a_new.iter()) {
        b.velocity += half_dt * (*a0 + *a1);
    }

    next
}

/// Advance the system by one step using classical Runge-Kutta.
///
/// The state vector is every body's (x, v); each stage evaluates the force
/// model over the whole body set at the stage positions.
pub fn rk4_step(sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
    let half_dt = 0.5 * dt;
    let t0 = sys.time;

    // k1 = (v_n, a(x_n))
    let k1_x: Vec<NVec3> = sys.bodies.iter().map(|b| b.velocity).collect();
    let k1_v = forces.accels(sys);

    let s2 = offset_state(sys, &k1_x, &k1_v, half_dt, t0 + half_dt);
    let k2_x: Vec<NVec3> = s2.bodies.iter().map(|b| b.velocity).collect();
    let k2_v = forces.accels(&s2);

    let s3 = offset_state(sys, &k2_x, &k2_v, half_dt, t0 + half_dt);
    let k3_x: Vec<NVec3> = s3.bodies.iter().map(|b| b.velocity).collect();
    let k3_v = forces.accels(&s3);

    let s4 = offset_state(sys, &k3_x, &k3_v, dt, t0 + dt);
    let k4_x: Vec<NVec3> = s4.bodies.iter().map(|b| b.velocity).collect();
    let k4_v = forces.accels(&s4);

    let sixth = dt / 6.0;
    let mut next = sys.clone();
    for (i, b) in next.bodies.iter_mut().enumerate() {
        b.position += sixth * (k1_x[i] + 2.0 * k2_x[i] + 2.0 * k3_x[i] + k4_x[i]);
        b.velocity += sixth * (k1_v[i] + 2.0 * k2_v[i] + 2.0 * k3_v[i] + k4_v[i]);
    }
    next.time = t0 + dt;

    next
}

/// Advance the system by one explicit Euler step.
/// Positions move with the old velocities, velocities with the old accelerations.
pub fn euler_step(sys: &SystemState, dt: f64, forces: &AccelSet) -> SystemState {
    let a = forces.accels(sys);

    let mut next = sys.clone();
    for (b, a) in next.bodies.iter_mut().zip(a.iter()) {
        b.position += dt * b.velocity;
        b.velocity += dt * *a;
    }
    next.time = sys.time + dt;

    next
}

/// Intermediate RK stage: `x = x_n + h dx`, `v = v_n + h dv`
fn offset_state(sys: &SystemState, dx: &[NVec3], dv: &[NVec3], h: f64, time: f64) -> SystemState {
    let mut stage = sys.clone();
    for ((b, dx), dv) in stage.bodies.iter_mut().zip(dx.iter()).zip(dv.iter()) {
        b.position += h * *dx;
        b.velocity += h * *dv;
    }
    stage.time = time;
    stage
}
