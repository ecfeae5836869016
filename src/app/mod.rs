//! Front ends that drive a [`Simulation`]: an interactive terminal view and
//! a headless runner.

pub mod input;
pub mod render;
pub mod shutdown;
pub mod state;
pub mod telemetry;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use nomads_core::simulation::{RunOutcome, Simulation, StepObserver, StepReport};
use nomads_tui::Tui;
use std::io::Write;
use std::time::{Duration, Instant};

pub use shutdown::ShutdownManager;
pub use state::App;
pub use telemetry::Telemetry;

/// Longest single wait on the input queue while paused or pacing.
const INPUT_POLL: Duration = Duration::from_millis(50);

struct TuiObserver<'a, W: Write> {
    tui: &'a mut Tui,
    app: &'a mut App,
    telemetry: &'a mut Telemetry<W>,
    shutdown: &'a ShutdownManager,
}

impl<W: Write> TuiObserver<'_, W> {
    /// Waits out the tick pacing while handling keys. Returns early on quit.
    fn pace(&mut self, sim: &Simulation) -> Result<()> {
        let snapshot = sim.snapshot()?;
        let mut deadline = Instant::now() + self.app.tick_pacing;
        loop {
            if self.shutdown.is_shutdown_requested() {
                return Ok(());
            }
            let now = Instant::now();
            if !self.app.paused && now >= deadline {
                return Ok(());
            }
            let wait = if self.app.paused {
                INPUT_POLL
            } else {
                (deadline - now).min(INPUT_POLL)
            };
            if !event::poll(wait)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let was_paused = self.app.paused;
                self.app.handle_key(key);
                if !self.app.running {
                    self.shutdown.request_shutdown();
                    return Ok(());
                }
                if was_paused && !self.app.paused {
                    deadline = Instant::now() + self.app.tick_pacing;
                }
                self.tui
                    .terminal
                    .draw(|f| self.app.draw(f, &snapshot))?;
            }
        }
    }
}

impl<W: Write> StepObserver for TuiObserver<'_, W> {
    fn on_step(&mut self, sim: &Simulation, report: &StepReport) -> Result<()> {
        self.telemetry.on_step(sim, report)?;
        self.app.observe(sim.stats());
        let snapshot = sim.snapshot()?;
        self.tui
            .terminal
            .draw(|f| self.app.draw(f, &snapshot))?;
        self.pace(sim)
    }
}

/// Runs the simulation in the terminal UI until extinction, quit, or the
/// step limit.
pub fn run_tui<W: Write>(
    sim: &mut Simulation,
    telemetry: &mut Telemetry<W>,
    shutdown: &ShutdownManager,
    max_steps: Option<u64>,
) -> Result<RunOutcome> {
    let output = &sim.config().output;
    let mut app = App::new(
        Duration::from_millis(output.tick_pacing_ms),
        sim.config().vegetation.max_fraction,
    );
    app.observe(sim.stats());

    let mut tui = Tui::new()?;
    tui.init()?;
    let outcome = {
        let mut observer = TuiObserver {
            tui: &mut tui,
            app: &mut app,
            telemetry,
            shutdown,
        };
        sim.run(&mut observer, shutdown.flag(), max_steps)
    };
    tui.exit()?;
    outcome
}

/// Runs the simulation without a terminal, as fast as it will go.
pub fn run_headless<W: Write>(
    sim: &mut Simulation,
    telemetry: &mut Telemetry<W>,
    shutdown: &ShutdownManager,
    max_steps: Option<u64>,
) -> Result<RunOutcome> {
    tracing::info!(
        population = sim.population().len(),
        seed = ?sim.config().world.seed,
        "Starting headless run"
    );
    sim.run(telemetry, shutdown.flag(), max_steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomads_core::config::AppConfig;

    #[test]
    fn test_headless_honours_step_limit() {
        let mut config = AppConfig::default();
        config.world.seed = Some(3);
        let mut sim = Simulation::new(config).unwrap();
        let mut telemetry = Telemetry::<Vec<u8>>::disabled();
        let shutdown = ShutdownManager::new();

        let outcome = run_headless(&mut sim, &mut telemetry, &shutdown, Some(25)).unwrap();
        match outcome {
            RunOutcome::StepLimit { time } => assert_eq!(time, 25),
            RunOutcome::Extinct { time } => assert!(time <= 25),
            RunOutcome::Stopped { .. } => panic!("nobody asked to stop"),
        }
    }

    #[test]
    fn test_headless_stops_when_requested() {
        let mut config = AppConfig::default();
        config.world.seed = Some(3);
        let mut sim = Simulation::new(config).unwrap();
        let mut telemetry = Telemetry::<Vec<u8>>::disabled();
        let shutdown = ShutdownManager::new();
        shutdown.request_shutdown();

        let outcome = run_headless(&mut sim, &mut telemetry, &shutdown, None).unwrap();
        assert_eq!(outcome, RunOutcome::Stopped { time: 0 });
        assert_eq!(sim.time(), 0);
    }
}
