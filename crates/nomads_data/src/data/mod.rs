//! Core data structures for the Nomads simulation.

pub mod entity;
pub mod events;
pub mod genome;
pub mod stats;
pub mod terrain;
