//! Application layer for Nomads: the terminal front end, the headless runner
//! and the telemetry observer that ties the simulation to `nomads_io`.

pub mod app;

pub use app::{run_headless, run_tui, App, ShutdownManager, Telemetry};
