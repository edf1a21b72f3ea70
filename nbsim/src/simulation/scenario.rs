//! Built-in initial conditions
//!
//! Each preset returns a [`SimulationConfig`] ready to hand to
//! `SimulationRunner::new`, together with a sensible default run length.

use std::f64::consts::PI;

use super::params::SimulationConfig;
use super::states::{Body, NVec3};

/// SI gravitational constant, m^3 kg^-1 s^-2
pub const G_SI: f64 = 6.674e-11;

const EARTH_MASS: f64 = 5.972e24; // kg
const MOON_MASS: f64 = 7.348e22; // kg
const EARTH_MOON_DISTANCE: f64 = 3.844e8; // m

/// A preset plus how long it is meant to run
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub config: SimulationConfig,
    pub total_time: f64,
}

/// Earth and Moon on circular orbits about their barycenter, SI units,
/// one-hour steps, 60 days of simulated time.
pub fn earth_moon() -> Preset {
    let m_total = EARTH_MASS + MOON_MASS;

    // distances from the barycenter
    let r_earth = MOON_MASS / m_total * EARTH_MOON_DISTANCE;
    let r_moon = EARTH_MASS / m_total * EARTH_MOON_DISTANCE;

    let omega = (G_SI * m_total / EARTH_MOON_DISTANCE.powi(3)).sqrt();

    let earth = Body::new(
        "Earth",
        EARTH_MASS,
        NVec3::new(-r_earth, 0.0, 0.0),
        NVec3::new(0.0, omega * r_earth, 0.0),
    );
    let moon = Body::new(
        "Moon",
        MOON_MASS,
        NVec3::new(r_moon, 0.0, 0.0),
        NVec3::new(0.0, -omega * r_moon, 0.0),
    );

    Preset {
        name: "earth_moon",
        config: SimulationConfig::new(G_SI, 0.0, 3600.0, vec![earth, moon]),
        total_time: 60.0 * 24.0 * 3600.0,
    }
}

/// Two equal masses `m` a distance `d` apart on a circular orbit.
///
/// Each body moves at `v = sqrt(G m / (2 d))`, in opposite directions, so the
/// total momentum is zero and the orbit closes after [`circular_binary_period`].
pub fn circular_binary(m: f64, d: f64, g: f64, time_step: f64) -> Preset {
    let v = (g * m / (2.0 * d)).sqrt();

    let a = Body::new("a", m, NVec3::new(-0.5 * d, 0.0, 0.0), NVec3::new(0.0, -v, 0.0));
    let b = Body::new("b", m, NVec3::new(0.5 * d, 0.0, 0.0), NVec3::new(0.0, v, 0.0));

    Preset {
        name: "circular_binary",
        config: SimulationConfig::new(g, 0.0, time_step, vec![a, b]),
        total_time: circular_binary_period(m, d, g),
    }
}

/// Orbital period of [`circular_binary`]: `2 pi (d/2) / v`
pub fn circular_binary_period(m: f64, d: f64, g: f64) -> f64 {
    let v = (g * m / (2.0 * d)).sqrt();
    2.0 * PI * (0.5 * d) / v
}

/// Three equal masses chasing each other along a figure-eight
/// (Chenciner & Montgomery 2000), `G = m = 1`.
pub fn figure_eight(time_step: f64) -> Preset {
    let x1 = NVec3::new(-0.970_004_36, 0.243_087_53, 0.0);
    let v3 = NVec3::new(-0.932_407_37, -0.864_731_46, 0.0);

    let bodies = vec![
        Body::new("a", 1.0, x1, -0.5 * v3),
        Body::new("b", 1.0, -x1, -0.5 * v3),
        Body::new("c", 1.0, NVec3::zeros(), v3),
    ];

    Preset {
        name: "figure_eight",
        config: SimulationConfig::new(1.0, 0.0, time_step, bodies),
        total_time: 6.325_9,
    }
}

/// Look up a preset by name with its default step
pub fn by_name(name: &str) -> Option<Preset> {
    match name {
        "earth_moon" => Some(earth_moon()),
        "circular_binary" => Some(circular_binary(1.0, 1.0, 1.0, 1e-3)),
        "figure_eight" => Some(figure_eight(1e-3)),
        _ => None,
    }
}

pub const PRESET_NAMES: [&str; 3] = ["earth_moon", "circular_binary", "figure_eight"];
