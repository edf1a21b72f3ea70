use std::time::Instant;

use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity};
use crate::simulation::integrator::{Integrator, IntegratorKind};
use crate::simulation::states::{Body, NVec3, SystemState};

const G: f64 = 0.1;
const SOFTENING: f64 = 1e-2;
const DT: f64 = 1e-3;

/// Time one direct-sum force evaluation for a range of n
pub fn bench_gravity() {
    let ns = [10, 25, 50, 100, 200, 400, 800];

    for n in ns {
        let sys = make_system(n);
        let mut out = vec![NVec3::zeros(); n];
        let gravity = NewtonianGravity::new(G, SOFTENING);

        // Warm up
        gravity.acceleration(0.0, &sys, &mut out);

        let reps = reps_for(n);
        let t0 = Instant::now();
        for _ in 0..reps {
            for a in out.iter_mut() {
                *a = NVec3::zeros();
            }
            gravity.acceleration(0.0, &sys, &mut out);
        }
        let per_eval = t0.elapsed().as_secs_f64() / reps as f64;

        println!("N = {n:4}, direct = {:10.3} us", per_eval * 1e6);
    }
}

/// Time one step of each integrator for a range of n
pub fn bench_integrators() {
    let ns = [10, 25, 50, 100, 200, 400];
    let kinds = [IntegratorKind::Verlet, IntegratorKind::Rk4, IntegratorKind::Euler];

    for n in ns {
        let forces = AccelSet::new().with(NewtonianGravity::new(G, SOFTENING));
        let template = make_system(n);

        let mut line = format!("N = {n:4}");
        for kind in kinds {
            let per_step = time_steps(kind, &template, &forces, reps_for(n));
            line.push_str(&format!(", {} = {:10.3} us", kind.name(), per_step * 1e6));
        }
        println!("{line}");
    }
}

/// Per-step cost curve for every integrator
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrator_curve() {
    println!("N,verlet_us,rk4_us,euler_us");

    for n in (10..=400).step_by(10) {
        let forces = AccelSet::new().with(NewtonianGravity::new(G, SOFTENING));
        let template = make_system(n);
        let reps = reps_for(n);

        let verlet = time_steps(IntegratorKind::Verlet, &template, &forces, reps);
        let rk4 = time_steps(IntegratorKind::Rk4, &template, &forces, reps);
        let euler = time_steps(IntegratorKind::Euler, &template, &forces, reps);

        println!("{},{:.3},{:.3},{:.3}", n, verlet * 1e6, rk4 * 1e6, euler * 1e6);
    }
}

/// Mean wall time of one step, in seconds
fn time_steps(kind: IntegratorKind, template: &SystemState, forces: &AccelSet, reps: usize) -> f64 {
    // Warm-up one step
    let mut sys = kind.step(template, DT, forces);

    let t0 = Instant::now();
    for _ in 0..reps {
        sys = kind.step(&sys, DT, forces);
    }
    t0.elapsed().as_secs_f64() / reps as f64
}

// small systems are noisy, average over more repetitions
fn reps_for(n: usize) -> usize {
    (20_000 / (n * n)).clamp(3, 2_000)
}

/// Helper to build a deterministic system of size `n`
fn make_system(n: usize) -> SystemState {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            Body::new(format!("b{i}"), 1.0, x, NVec3::zeros())
        })
        .collect();

    SystemState::new(bodies)
}
