//! # Nomads Core
//!
//! The deterministic simulation engine for Nomads, a grid-based artificial
//! life simulation of foraging, breeding and tribal nomads.
//!
//! This crate contains:
//! - The world grid with its occupancy overlay
//! - Per-tick nomad behaviour (foraging, reproduction, tribes, death)
//! - Population bookkeeping and vegetation regrowth
//! - World seeding, the simulation driver, and read-only snapshots
//! - Configuration, metrics and structured logging
//!
//! All randomness flows through one seeded `ChaCha8Rng`, so a seed fully
//! determines a run.
//!
//! ## Example
//!
//! ```
//! use nomads_core::config::AppConfig;
//! use nomads_core::simulation::Simulation;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//! let mut sim = Simulation::new(config).unwrap();
//! let report = sim.step().unwrap();
//! assert_eq!(report.time, 0);
//! println!("{}", sim.snapshot().unwrap());
//! ```

/// Simulation time
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for invariant violations
pub mod error;
/// Initial terrain, vegetation and founder placement
pub mod generation;
/// Trait blending and offspring genomes
pub mod genome;
/// The world grid and its occupancy overlay
pub mod grid;
/// Performance metrics collection and logging
pub mod metrics;
/// Per-tick nomad behaviour
pub mod nomad;
/// Live population management
pub mod population;
/// The simulation driver
pub mod simulation;
/// Read-only grid views for renderers
pub mod snapshot;
/// Per-step summary records
pub mod stats;
/// Tribal membership rules
pub mod tribe;

pub use error::{SimError, SimResult};
pub use genome::GenomeLogic;
pub use grid::{Grid, NeighborContent, TerrainLogic};
pub use metrics::{init_file_logging, init_logging, Metrics};
pub use nomad::NomadLogic;
pub use simulation::{RunOutcome, Simulation, StepObserver, StepReport};
pub use snapshot::{CellView, GridSnapshot};
