//! The simulation driver: owns the world and advances it one step at a time.

use crate::clock::SimClock;
use crate::config::AppConfig;
use crate::error::SimResult;
use crate::generation;
use crate::grid::Grid;
use crate::metrics::Metrics;
use crate::population::{Birth, Death, Population};
use crate::snapshot::GridSnapshot;
use crate::stats::summarize;
use nomads_data::{LiveEvent, PopulationStats, TerrainLayout};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Everything that happened during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// The tick that was played.
    pub time: u64,
    pub population: usize,
    pub births: Vec<Birth>,
    pub deaths: Vec<Death>,
    pub deferred_deaths: usize,
    pub vegetation_grown: usize,
    /// Present on ticks that are a multiple of `output.stats_interval`.
    pub stats: Option<PopulationStats>,
    pub events: Vec<LiveEvent>,
}

impl StepReport {
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.population == 0
    }
}

/// Why [`Simulation::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Extinct { time: u64 },
    Stopped { time: u64 },
    StepLimit { time: u64 },
}

/// Receives every step report. Pacing and telemetry live here, never in the core.
pub trait StepObserver {
    fn on_step(&mut self, sim: &Simulation, report: &StepReport) -> anyhow::Result<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(&Simulation, &StepReport) -> anyhow::Result<()>,
{
    fn on_step(&mut self, sim: &Simulation, report: &StepReport) -> anyhow::Result<()> {
        self(sim, report)
    }
}

#[derive(Debug)]
pub struct Simulation {
    config: AppConfig,
    grid: Grid,
    population: Population,
    clock: SimClock,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

fn seeded_rng(config: &AppConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl Simulation {
    /// Builds a procedurally generated world.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(&config);
        let grid = generation::generate_terrain(&config.world, &mut rng)?;
        Self::populate(config, grid, rng)
    }

    /// Builds a world on top of a fixed terrain layout.
    pub fn from_layout(config: AppConfig, layout: &TerrainLayout) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = seeded_rng(&config);
        let grid = generation::terrain_from_layout(&config.world, layout)?;
        Self::populate(config, grid, rng)
    }

    fn populate(config: AppConfig, mut grid: Grid, mut rng: ChaCha8Rng) -> anyhow::Result<Self> {
        let planted =
            generation::seed_vegetation(&mut grid, config.world.vegetation_density, &mut rng)?;
        let population = generation::seed_nomads(&mut grid, &config.nomads, &mut rng)?;
        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            nomads = population.len(),
            plants = planted,
            fingerprint = %config.fingerprint(),
            "World seeded"
        );
        Ok(Self::from_parts(config, grid, population, rng))
    }

    /// Assembles a simulation from an already-populated grid.
    #[must_use]
    pub fn from_parts(
        config: AppConfig,
        grid: Grid,
        population: Population,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            config,
            grid,
            population,
            clock: SimClock::new(),
            rng,
            metrics: Metrics::new(),
        }
    }

    /// Plays the current tick, then advances the clock.
    pub fn step(&mut self) -> SimResult<StepReport> {
        let started = Instant::now();
        let time = self.clock.tick();

        let outcome =
            self.population
                .step(&mut self.grid, time, &self.config, &mut self.rng)?;
        let vegetation_grown = self.population.regrow(
            &mut self.grid,
            time,
            &self.config.vegetation,
            &mut self.rng,
        );
        let stats = self
            .clock
            .is_due(self.config.output.stats_interval)
            .then(|| self.stats());

        let mut events = Vec::with_capacity(outcome.births.len() + outcome.deaths.len());
        for b in &outcome.births {
            events.push(LiveEvent::Birth {
                id: b.id,
                mother: b.mother,
                father: b.father,
                position: b.position,
                tribe: b.tribe,
                generation: b.generation,
                tick: time,
                timestamp: LiveEvent::now(),
            });
        }
        for d in &outcome.deaths {
            events.push(LiveEvent::Death {
                id: d.id,
                age: d.age,
                tick: time,
                timestamp: LiveEvent::now(),
                cause: d.cause,
            });
        }
        if self.population.is_extinct() {
            tracing::info!(tick = time, "Population extinct");
            events.push(LiveEvent::Extinction {
                tick: time,
                timestamp: LiveEvent::now(),
            });
        }

        self.metrics
            .increment_counter("births", outcome.births.len() as u64);
        self.metrics
            .increment_counter("deaths", outcome.deaths.len() as u64);
        self.metrics.record_step(
            started.elapsed(),
            self.population.len(),
            self.population.vegetation_count(),
        );
        self.clock.advance();

        Ok(StepReport {
            time,
            population: self.population.len(),
            births: outcome.births,
            deaths: outcome.deaths,
            deferred_deaths: outcome.deferred_deaths,
            vegetation_grown,
            stats,
            events,
        })
    }

    /// Steps until extinction, an external stop, or `max_steps` steps.
    pub fn run<O: StepObserver + ?Sized>(
        &mut self,
        observer: &mut O,
        stop: &AtomicBool,
        max_steps: Option<u64>,
    ) -> anyhow::Result<RunOutcome> {
        let mut steps = 0;
        loop {
            let time = self.clock.tick();
            if self.population.is_extinct() {
                return Ok(RunOutcome::Extinct { time });
            }
            if stop.load(Ordering::Relaxed) {
                return Ok(RunOutcome::Stopped { time });
            }
            if max_steps.is_some_and(|limit| steps >= limit) {
                return Ok(RunOutcome::StepLimit { time });
            }
            let report = self.step()?;
            observer.on_step(self, &report)?;
            steps += 1;
        }
    }

    pub fn snapshot(&self) -> SimResult<GridSnapshot> {
        GridSnapshot::capture(self.clock.tick(), &self.grid, &self.population)
    }

    /// Summary record for the current state.
    #[must_use]
    pub fn stats(&self) -> PopulationStats {
        summarize(
            self.clock.tick(),
            self.grid.area(),
            self.population.vegetation_count(),
            self.population.nomads(),
        )
    }

    /// One line per live nomad, for post-mortem inspection.
    #[must_use]
    pub fn debug_dump(&self) -> Vec<String> {
        self.population
            .nomads()
            .iter()
            .map(nomads_data::Nomad::debug_line)
            .collect()
    }

    #[must_use]
    pub fn time(&self) -> u64 {
        self.clock.tick()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = seeded(1);
        config.world.width = 0;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_step_advances_time_and_emits_stats() {
        let mut sim = Simulation::new(seeded(1)).unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.time, 0);
        assert!(report.stats.is_some());
        assert_eq!(sim.time(), 1);

        let report = sim.step().unwrap();
        assert!(report.stats.is_none());
        assert_eq!(sim.metrics().step_count(), 2);
    }

    #[test]
    fn test_run_respects_step_limit() {
        let mut sim = Simulation::new(seeded(2)).unwrap();
        let stop = AtomicBool::new(false);
        let mut seen = 0;
        let mut observer = |_: &Simulation, _: &StepReport| -> anyhow::Result<()> {
            seen += 1;
            Ok(())
        };
        let outcome = sim.run(&mut observer, &stop, Some(25)).unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::StepLimit { time: 25 } | RunOutcome::Extinct { .. }
        ));
        assert!(seen <= 25);
    }

    #[test]
    fn test_run_stops_on_flag() {
        let mut sim = Simulation::new(seeded(3)).unwrap();
        let stop = AtomicBool::new(true);
        let mut observer = |_: &Simulation, _: &StepReport| -> anyhow::Result<()> { Ok(()) };
        let outcome = sim.run(&mut observer, &stop, None).unwrap();
        assert_eq!(outcome, RunOutcome::Stopped { time: 0 });
    }

    #[test]
    fn test_empty_world_is_extinct_immediately() {
        let mut config = seeded(4);
        config.nomads.initial_count = 0;
        let mut sim = Simulation::new(config).unwrap();
        let stop = AtomicBool::new(false);
        let mut observer = |_: &Simulation, _: &StepReport| -> anyhow::Result<()> { Ok(()) };
        let outcome = sim.run(&mut observer, &stop, None).unwrap();
        assert_eq!(outcome, RunOutcome::Extinct { time: 0 });
    }

    #[test]
    fn test_snapshot_matches_population() {
        let sim = Simulation::new(seeded(5)).unwrap();
        let snapshot = sim.snapshot().unwrap();
        assert_eq!(snapshot.nomad_count(), sim.population().len());
        assert_eq!(snapshot.cells.len(), sim.grid().area());
        assert_eq!(sim.debug_dump().len(), sim.population().len());
    }
}
