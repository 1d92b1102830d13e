mod scenario;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gungale_input::{InputSampler, InputScript};
use gungale_kernel::{FrameClock, PlayerFrame, SimEvent, Simulation, Tuning};
use gungale_render::{DebugTextRenderer, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

const ASPECT: f32 = 16.0 / 9.0;

#[derive(Parser)]
#[command(name = "gungale-cli", about = "Headless driver for the gungale movement core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Validate a tuning file and print it, or print the defaults
    Tuning {
        /// Tuning JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Simulate a built-in input scenario
    Run {
        #[arg(short, long, value_enum, default_value_t = Scenario::Walk)]
        scenario: Scenario,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Tuning JSON file
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Write the generated inputs to this input script
        #[arg(long)]
        script: Option<PathBuf>,
        /// Sleep `dt` between ticks and step with the measured wall time
        #[arg(long)]
        realtime: bool,
    },
    /// Re-run a recorded input script and print the resulting state
    Replay {
        /// Input script JSON file
        #[arg(short, long)]
        script: PathBuf,
        /// Tuning JSON file
        #[arg(long)]
        tuning: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gungale-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gungale_common::crate_info());
            println!("kernel: {}", gungale_kernel::crate_info());
            println!("input: {}", gungale_input::crate_info());
            println!("render: {}", gungale_render::crate_info());
        }
        Commands::Tuning { file } => {
            let tuning = load_tuning(file.as_deref())?;
            println!("{}", tuning.to_json_pretty()?);
        }
        Commands::Run {
            scenario,
            ticks,
            dt,
            tuning,
            script,
            realtime,
        } => {
            anyhow::ensure!(dt.is_finite() && dt > 0.0, "--dt must be positive, got {dt}");
            let pace = realtime_pace(dt, realtime)?;
            let tuning = load_tuning(tuning.as_deref())?;
            println!("Scenario {scenario:?}: ticks={ticks}, dt={dt}");

            let mut sim = Simulation::new(tuning);
            let mut clock = FrameClock::new(120);
            let outcome = run_scenario(
                &mut sim,
                scenario,
                ticks,
                dt,
                pace,
                &mut clock,
                script.is_some(),
            );

            print_summary(&sim, &outcome.frame, &outcome.tally);
            if realtime {
                let timer = clock.timer();
                println!(
                    "Frame time: avg={:?} min={:?} max={:?} over {} frames",
                    timer.average(),
                    timer.min(),
                    timer.max(),
                    timer.count()
                );
            }
            if let (Some(path), Some(recorded)) = (script, outcome.recorded) {
                recorded
                    .save(&path)
                    .with_context(|| format!("writing input script {}", path.display()))?;
                println!("Recorded {} steps to {}", recorded.len(), path.display());
            }
        }
        Commands::Replay { script, tuning } => {
            let tuning = load_tuning(tuning.as_deref())?;
            let recorded = InputScript::from_json_file(&script)
                .with_context(|| format!("reading input script {}", script.display()))?;
            println!(
                "Replaying {} steps ({:.2}s) from {}",
                recorded.len(),
                recorded.duration(),
                script.display()
            );

            let mut sim = Simulation::replay(tuning, recorded.steps());
            let mut tally = EventTally::default();
            tally.absorb(sim.drain_events());
            let frame = sim.frame();
            print_summary(&sim, &frame, &tally);
        }
    }

    Ok(())
}

fn load_tuning(path: Option<&Path>) -> anyhow::Result<Tuning> {
    match path {
        Some(path) => Tuning::from_json_file(path)
            .with_context(|| format!("loading tuning {}", path.display())),
        None => Ok(Tuning::default()),
    }
}

/// Logs the body's speed once per simulated second.
#[derive(Debug)]
struct SpeedReporter {
    next_report: f64,
}

impl Default for SpeedReporter {
    fn default() -> Self {
        Self { next_report: 1.0 }
    }
}

impl SpeedReporter {
    fn observe(&mut self, sim: &Simulation, frame: &PlayerFrame) {
        if sim.elapsed() < self.next_report {
            return;
        }
        while self.next_report <= sim.elapsed() {
            self.next_report += 1.0;
        }
        tracing::info!(
            tick = sim.tick(),
            velocity_len = frame.velocity.length(),
            horizontal = frame.horizontal_speed(),
            grounded = frame.grounded,
            "velocity len"
        );
    }
}

/// Sleep between realtime ticks. Rejects a `dt` too large to express as a `Duration`.
fn realtime_pace(dt: f32, realtime: bool) -> anyhow::Result<Option<Duration>> {
    if !realtime {
        return Ok(None);
    }
    let pace = Duration::try_from_secs_f32(dt)
        .with_context(|| format!("--dt {dt} is not a usable sleep duration"))?;
    Ok(Some(pace))
}

/// Running counts of simulation events, fed a drained batch at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct EventTally {
    total: u64,
    jumps: u64,
    landings: u64,
    hardest_impact: f32,
}

impl EventTally {
    fn absorb(&mut self, events: Vec<SimEvent>) {
        for event in events {
            self.total += 1;
            match event {
                SimEvent::Stepped { .. } => {}
                SimEvent::Jumped { .. } => self.jumps += 1,
                SimEvent::Landed { impact_speed, .. } => {
                    self.landings += 1;
                    self.hardest_impact = self.hardest_impact.max(impact_speed);
                }
            }
        }
    }
}

struct RunOutcome {
    frame: PlayerFrame,
    tally: EventTally,
    /// Present only when recording was requested.
    recorded: Option<InputScript>,
}

/// Drive `sim` with a built-in scenario for `ticks` ticks.
///
/// Events are drained every tick, so memory stays flat however long the run.
fn run_scenario(
    sim: &mut Simulation,
    scenario: Scenario,
    ticks: u64,
    dt: f32,
    pace: Option<Duration>,
    clock: &mut FrameClock,
    record: bool,
) -> RunOutcome {
    let mut sampler = InputSampler::default();
    let mut recorded = record.then(InputScript::new);
    let mut reporter = SpeedReporter::default();
    let mut tally = EventTally::default();
    let mut frame = sim.frame();

    if pace.is_some() {
        clock.tick();
    }
    for tick in 0..ticks {
        scenario.drive(&mut sampler, tick);
        let input = sampler.sample();
        let step_dt = match pace {
            Some(pace) => {
                std::thread::sleep(pace);
                clock.tick()
            }
            None => dt,
        };
        frame = sim.step(&input, step_dt);
        tally.absorb(sim.drain_events());
        if let Some(recorded) = recorded.as_mut() {
            recorded.record(input, step_dt);
        }
        reporter.observe(sim, &frame);
    }

    RunOutcome {
        frame,
        tally,
        recorded,
    }
}

fn print_summary(sim: &Simulation, frame: &PlayerFrame, tally: &EventTally) {
    let view = RenderView::from_frame(frame, ASPECT);
    print!("{}", DebugTextRenderer::new().render(sim, &view));
    println!(
        "Events: {} total, {} jumps, {} landings (hardest {:.2})",
        tally.total, tally.jumps, tally.landings, tally.hardest_impact
    );
    println!("State hash: {:#018x}", sim.state_hash());
}
