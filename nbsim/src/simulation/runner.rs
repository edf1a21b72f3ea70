//! Simulation driver
//!
//! [`SimulationRunner`] owns a validated [`SimulationConfig`], the current
//! [`SystemState`] and everything recorded so far. Validation happens once in
//! [`SimulationRunner::new`]; `step`/`run` never fail afterwards.
//!
//! Recording policy lives here, not in the integrators:
//! - the trajectory keeps every `record_every`-th state (plus the initial one),
//! - each body keeps a bounded window of its most recent positions (trails).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use super::diagnostics::{Diagnostics, DriftTolerance, NumericalInstabilityWarning};
use super::engine::RunnerSettings;
use super::error::ConfigError;
use super::forces::{AccelSet, NewtonianGravity};
use super::integrator::Integrator;
use super::params::SimulationConfig;
use super::states::{NVec3, SystemState};

/// One recorded state
pub type Snapshot = SystemState;

/// Lifecycle of a runner. A config that fails validation never produces a
/// runner, so there is no uninitialized variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    Ready,   // built or reset, no step taken yet
    Running, // at least one step taken
}

/// Append-only list of recorded snapshots
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    snapshots: Vec<Snapshot>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Export view: `(time, [(name, position, velocity)])` per snapshot
    pub fn records(&self) -> impl Iterator<Item = (f64, Vec<(&str, NVec3, NVec3)>)> + '_ {
        self.snapshots.iter().map(|s| {
            let bodies = s
                .bodies
                .iter()
                .map(|b| (b.name.as_str(), b.position, b.velocity))
                .collect();
            (s.time, bodies)
        })
    }

    fn clear(&mut self) {
        self.snapshots.clear();
    }
}

pub struct SimulationRunner {
    config: SimulationConfig,
    settings: RunnerSettings,
    forces: AccelSet,
    state: SystemState,
    trajectory: Trajectory,
    trails: Vec<VecDeque<NVec3>>,
    steps: u64,
    phase: RunnerPhase,
    initial_diagnostics: Diagnostics,
}

impl SimulationRunner {
    /// Validate `config` and `settings` and record the initial state
    pub fn new(config: SimulationConfig, settings: RunnerSettings) -> Result<Self, ConfigError> {
        config.validate()?;
        if settings.record_every == 0 {
            return Err(ConfigError::ZeroRecordCadence);
        }

        let forces = AccelSet::new().with(NewtonianGravity::new(
            config.gravitational_constant,
            config.softening_length,
        ));

        let state = SystemState::new(config.initial_bodies.clone());
        let initial_diagnostics = Diagnostics::measure(&state, &forces, 0);

        debug!(
            "runner ready: {} bodies, dt = {}, eps = {}, integrator = {}",
            state.body_count(),
            config.time_step,
            config.softening_length,
            settings.integrator.name()
        );

        let mut runner = Self {
            config,
            settings,
            forces,
            state,
            trajectory: Trajectory::new(),
            trails: Vec::new(),
            steps: 0,
            phase: RunnerPhase::Ready,
            initial_diagnostics,
        };
        runner.start_recording();
        Ok(runner)
    }

    /// Advance exactly one time step and return the new state
    pub fn step(&mut self) -> &SystemState {
        self.state = self
            .settings
            .integrator
            .step(&self.state, self.config.time_step, &self.forces);
        self.steps += 1;
        self.phase = RunnerPhase::Running;

        if self.steps % self.settings.record_every as u64 == 0 {
            self.trajectory.push(self.state.clone());
        }
        self.push_trails();

        &self.state
    }

    /// Take `num_steps` steps. `run(0)` changes nothing.
    pub fn run(&mut self, num_steps: usize) -> &SystemState {
        for _ in 0..num_steps {
            self.step();
        }
        &self.state
    }

    /// Like [`SimulationRunner::run`] but checks `cancel` before every step.
    /// Returns the number of steps actually taken; the state is always at a
    /// whole-step boundary.
    pub fn run_until(&mut self, num_steps: usize, cancel: &AtomicBool) -> usize {
        let mut taken = 0;
        while taken < num_steps {
            if cancel.load(Ordering::Relaxed) {
                debug!("run cancelled after {taken} of {num_steps} steps");
                break;
            }
            self.step();
            taken += 1;
        }
        taken
    }

    /// Run `floor(total_time / dt)` steps, returning how many were taken
    pub fn run_for_duration(&mut self, total_time: f64) -> usize {
        let n = steps_for_duration(total_time, self.config.time_step);
        self.run(n);
        n
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(&self.state, &self.forces, self.steps)
    }

    /// Diagnostics of the initial state, the usual drift baseline
    pub fn initial_diagnostics(&self) -> &Diagnostics {
        &self.initial_diagnostics
    }

    /// Compare the current state with the initial one and log any warning
    pub fn check_drift(&self, tolerance: DriftTolerance) -> Vec<NumericalInstabilityWarning> {
        let warnings = self
            .diagnostics()
            .check_stability(&self.initial_diagnostics, tolerance);
        for w in &warnings {
            warn!("t = {}: {}", self.state.time, w);
        }
        warnings
    }

    /// Back to the initial bodies at `t = 0` with fresh recordings
    pub fn reset(&mut self) {
        self.state = SystemState::new(self.config.initial_bodies.clone());
        self.steps = 0;
        self.phase = RunnerPhase::Ready;
        self.start_recording();
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Recent positions of body `index`, oldest first
    pub fn trail(&self, index: usize) -> Option<&VecDeque<NVec3>> {
        self.trails.get(index)
    }

    pub fn trails(&self) -> &[VecDeque<NVec3>] {
        &self.trails
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    fn start_recording(&mut self) {
        self.trajectory.clear();
        self.trajectory.push(self.state.clone());

        // trails grow as steps are taken; trail_length is only an upper bound
        self.trails = vec![VecDeque::new(); self.state.body_count()];
        self.push_trails();
    }

    fn push_trails(&mut self) {
        let cap = self.settings.trail_length;
        if cap == 0 {
            return;
        }
        for (trail, b) in self.trails.iter_mut().zip(self.state.bodies.iter()) {
            if trail.len() == cap {
                trail.pop_front();
            }
            trail.push_back(b.position);
        }
    }
}

/// Whole steps of size `dt` that fit in `total_time`
pub fn steps_for_duration(total_time: f64, dt: f64) -> usize {
    if !total_time.is_finite() || total_time <= 0.0 || dt <= 0.0 {
        return 0;
    }
    (total_time / dt).floor() as usize
}
