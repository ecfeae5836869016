//! Run metrics and logging setup.
//!
//! Provides structured logging and counters for monitoring simulation health.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How often, in steps, a progress line is logged at info level.
pub const PROGRESS_INTERVAL: u64 = 100;

/// Metrics collector for one simulation run.
pub struct Metrics {
    step_count: AtomicU64,
    population: AtomicU64,
    vegetation: AtomicU64,
    pub counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("step_count", &self.step_count())
            .field("population", &self.population())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            vegetation: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&self, duration: Duration, population: usize, vegetation: usize) {
        let step = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(population as u64, Ordering::Relaxed);
        self.vegetation.store(vegetation as u64, Ordering::Relaxed);

        if step % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                step,
                population,
                vegetation,
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    /// Adds `by` to a named counter.
    pub fn increment_counter(&self, name: &str, by: u64) {
        if by == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += by;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn vegetation(&self) -> u64 {
        self.vegetation.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize a stderr tracing subscriber. `RUST_LOG` overrides `default_directive`.
pub fn init_logging(default_directive: &str) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_directive))
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}

/// Initialize a tracing subscriber that appends to `dir/nomads.log`, keeping
/// the terminal free for the TUI.
pub fn init_file_logging(dir: &Path, default_directive: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(dir.join("nomads.log"))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_directive))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish(),
    )
    .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.step_count(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new();
        metrics.record_step(Duration::from_millis(2), 40, 15);
        assert_eq!(metrics.step_count(), 1);
        assert_eq!(metrics.population(), 40);
        assert_eq!(metrics.vegetation(), 15);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.increment_counter("births", 2);
        metrics.increment_counter("births", 1);
        metrics.increment_counter("deaths", 0);
        assert_eq!(metrics.counter("births"), 3);
        assert_eq!(metrics.counter("deaths"), 0);
    }
}
