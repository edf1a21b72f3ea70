use nbsim::simulation::runner::steps_for_duration;
use nbsim::simulation::scenario::{self, PRESET_NAMES};
use nbsim::{bench_gravity, bench_integrator_curve, bench_integrators};
use nbsim::{export_trajectory, Diagnostics, DriftTolerance, ScenarioConfig, SimulationRunner};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Direct-summation gravitational N-body simulator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file or a built-in preset
    Run {
        /// Scenario file (YAML or JSON); bare names are looked up in scenarios/
        #[arg(short, long, default_value = "two_body.yaml", conflicts_with = "preset")]
        file_name: String,

        /// Built-in preset instead of a file
        #[arg(short, long)]
        preset: Option<String>,

        /// Simulated time to cover; defaults to the scenario's total_time
        #[arg(short, long)]
        duration: Option<f64>,

        /// Write the recorded trajectory here as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Log diagnostics every this many steps (0 = only at the end)
        #[arg(long, default_value_t = 0)]
        report_every: usize,

        /// Relative energy drift that triggers a warning
        #[arg(long, default_value_t = 1e-3)]
        energy_tolerance: f64,

        /// Momentum drift, relative to the initial sum of m|v|, that triggers a warning
        #[arg(long, default_value_t = 1e-9)]
        momentum_tolerance: f64,
    },
    /// Write a built-in preset out as a scenario file
    Save {
        preset: String,
        out: PathBuf,
    },
    /// Time the force model and integrators
    Bench {
        #[arg(value_enum, default_value_t = BenchKind::Integrators)]
        kind: BenchKind,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BenchKind {
    Gravity,
    Integrators,
    Curve,
}

// resolve here to keep main clean
fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn load_scenario(file_name: &str, preset: Option<&str>) -> Result<ScenarioConfig> {
    match preset {
        Some(name) => {
            let p = scenario::by_name(name)
                .ok_or_else(|| anyhow!("unknown preset '{name}', expected one of {PRESET_NAMES:?}"))?;
            let mut cfg = ScenarioConfig::from_runtime(&p.config, &Default::default(), Some(p.total_time));
            cfg.name = Some(p.name.to_string());
            Ok(cfg)
        }
        None => ScenarioConfig::load(scenario_path(file_name)),
    }
}

fn print_diagnostics(d: &Diagnostics) {
    println!("t = {:.6e} after {} steps", d.time, d.steps);
    println!(
        "  energy   kinetic {:.9e}  potential {:.9e}  total {:.9e}",
        d.kinetic_energy, d.potential_energy, d.total_energy
    );
    println!(
        "  momentum [{:.6e}, {:.6e}, {:.6e}]",
        d.momentum.x, d.momentum.y, d.momentum.z
    );
    println!(
        "  center of mass [{:.6e}, {:.6e}, {:.6e}]",
        d.center_of_mass.x, d.center_of_mass.y, d.center_of_mass.z
    );
}

fn run(
    cfg: ScenarioConfig,
    duration: Option<f64>,
    csv: Option<PathBuf>,
    report_every: usize,
    tolerance: DriftTolerance,
) -> Result<()> {
    let total_time = match duration.or(cfg.parameters.total_time) {
        Some(t) => t,
        None => bail!("no --duration given and the scenario has no total_time"),
    };

    let mut runner: SimulationRunner = cfg.build_runner()?;
    let num_steps = steps_for_duration(total_time, runner.config().time_step);
    info!(
        "running {} for {} steps ({} bodies)",
        cfg.name.as_deref().unwrap_or("scenario"),
        num_steps,
        runner.state().body_count()
    );

    print_diagnostics(runner.initial_diagnostics());

    let chunk = if report_every == 0 { num_steps.max(1) } else { report_every };
    let mut done = 0;
    while done < num_steps {
        let n = chunk.min(num_steps - done);
        runner.run(n);
        done += n;
        if report_every != 0 {
            let d = runner.diagnostics();
            info!(
                "step {done}: E = {:.9e}, drift = {:.3e}",
                d.total_energy,
                d.energy_drift(runner.initial_diagnostics())
            );
        }
    }

    print_diagnostics(&runner.diagnostics());

    // warnings are logged by check_drift
    runner.check_drift(tolerance);

    if let Some(path) = csv {
        export_trajectory(runner.trajectory(), &path)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Run {
            file_name,
            preset,
            duration,
            csv,
            report_every,
            energy_tolerance,
            momentum_tolerance,
        } => {
            let cfg = load_scenario(&file_name, preset.as_deref())?;
            let tolerance = DriftTolerance {
                relative_energy: energy_tolerance,
                relative_momentum: momentum_tolerance,
            };
            run(cfg, duration, csv, report_every, tolerance)?;
        }
        Command::Save { preset, out } => {
            let cfg = load_scenario("", Some(&preset))?;
            cfg.save(&out)?;
        }
        Command::Bench { kind } => match kind {
            BenchKind::Gravity => bench_gravity(),
            BenchKind::Integrators => bench_integrators(),
            BenchKind::Curve => bench_integrator_curve(),
        },
    }

    Ok(())
}
