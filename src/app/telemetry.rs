//! Step observer that writes the stats CSV and the event log.

use anyhow::Result;
use nomads_core::simulation::{Simulation, StepObserver, StepReport};
use nomads_io::{HistoryLogger, StatsWriter};
use std::io::Write;

pub struct Telemetry<W: Write = std::io::BufWriter<std::fs::File>> {
    stats: Option<StatsWriter<W>>,
    history: HistoryLogger,
}

impl<W: Write> Telemetry<W> {
    pub fn new(stats: Option<StatsWriter<W>>, history: HistoryLogger) -> Self {
        Self { stats, history }
    }

    /// Discards everything.
    pub fn disabled() -> Self {
        Self::new(None, HistoryLogger::new_dummy())
    }

    pub fn rows_written(&self) -> usize {
        self.stats.as_ref().map_or(0, StatsWriter::rows)
    }

    /// Flushes both sinks. Called once on the way out.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(stats) = self.stats.as_mut() {
            stats.flush()?;
        }
        self.history.flush()?;
        Ok(())
    }

    pub fn into_stats(self) -> Option<StatsWriter<W>> {
        self.stats
    }
}

impl<W: Write> StepObserver for Telemetry<W> {
    fn on_step(&mut self, _sim: &Simulation, report: &StepReport) -> Result<()> {
        if let (Some(writer), Some(stats)) = (self.stats.as_mut(), report.stats.as_ref()) {
            writer.record(stats)?;
        }
        self.history.log_all(&report.events)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomads_core::config::AppConfig;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_rows_follow_stats_interval() {
        let mut config = AppConfig::default();
        config.world.seed = Some(8);
        config.output.stats_interval = 5;
        let mut sim = Simulation::new(config).unwrap();
        let writer = StatsWriter::from_writer(Vec::new()).unwrap();
        let mut telemetry = Telemetry::new(Some(writer), HistoryLogger::new_dummy());

        let stop = AtomicBool::new(false);
        let outcome = sim.run(&mut telemetry, &stop, Some(12)).unwrap();
        telemetry.finish().unwrap();

        if matches!(outcome, nomads_core::RunOutcome::StepLimit { .. }) {
            // Ticks 0, 5 and 10.
            assert_eq!(telemetry.rows_written(), 3);
        }
        let text = String::from_utf8(telemetry.into_stats().unwrap().into_inner().unwrap()).unwrap();
        assert!(text.starts_with(nomads_io::CSV_HEADER));
    }
}
