pub mod simulation;
pub mod configuration;
pub mod export;
pub mod benchmark;

pub use simulation::states::{Body, SystemState, NVec3};
pub use simulation::params::SimulationConfig;
pub use simulation::engine::RunnerSettings;
pub use simulation::error::ConfigError;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{Integrator, IntegratorKind, VelocityVerlet, RungeKutta4, ExplicitEuler, verlet_step};
pub use simulation::diagnostics::{Diagnostics, DriftTolerance, NumericalInstabilityWarning};
pub use simulation::runner::{SimulationRunner, RunnerPhase, Snapshot, Trajectory};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use export::trajectory_csv::{export_trajectory, write_trajectory};

pub use benchmark::benchmark::{bench_gravity, bench_integrators, bench_integrator_curve};
