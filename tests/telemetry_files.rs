mod common;

use common::seeded;
use nomads_io::{HistoryLogger, StatsWriter};
use nomads_lib::app::{run_headless, ShutdownManager, Telemetry};
use nomads_core::simulation::RunOutcome;

#[test]
fn test_headless_run_writes_readable_telemetry() {
    let dir = tempfile::tempdir().unwrap();
    let stats_path = dir.path().join("stats.csv");
    let log_dir = dir.path().join("logs");

    let mut sim = seeded(2024);
    let interval = sim.config().output.stats_interval;
    let mut telemetry = Telemetry::new(
        Some(StatsWriter::create(&stats_path).unwrap()),
        HistoryLogger::new_at(&log_dir).unwrap(),
    );
    let shutdown = ShutdownManager::new();

    let outcome = run_headless(&mut sim, &mut telemetry, &shutdown, Some(100)).unwrap();
    telemetry.finish().unwrap();

    let rows = nomads_io::read_stats(&stats_path).unwrap();
    assert_eq!(rows.len(), telemetry.rows_written());
    assert!(rows.iter().all(|r| r.time % interval == 0));
    assert_eq!(rows[0].time, 0);

    let events = nomads_io::read_events(log_dir.join("live.jsonl")).unwrap();
    if let RunOutcome::Extinct { .. } = outcome {
        assert!(events
            .iter()
            .any(|e| matches!(e, nomads_data::LiveEvent::Extinction { .. })));
    }
    let mut ticks: Vec<u64> = events.iter().map(|e| e.tick()).collect();
    let sorted = {
        let mut t = ticks.clone();
        t.sort_unstable();
        t
    };
    assert_eq!(ticks, sorted, "events are written in tick order");
    ticks.dedup();
    assert!(ticks.iter().all(|t| *t < 100));
}

#[test]
fn test_sample_map_loads() {
    let layout = nomads_io::load_map("maps/river.toml").unwrap();
    let mut config = nomads_core::config::AppConfig::default();
    config.world.width = layout.width;
    config.world.height = layout.height;
    config.world.seed = Some(5);
    let sim = nomads_core::Simulation::from_layout(config, &layout).unwrap();
    assert!(!sim.population().is_empty());
}

#[test]
fn test_sample_config_is_valid() {
    let config = nomads_io::load_config("config.toml").unwrap();
    assert_eq!(
        config.fingerprint(),
        nomads_core::config::AppConfig::default().fingerprint()
    );
    assert_eq!(config.world.seed, None);
}
