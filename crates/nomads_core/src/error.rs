//! Error types for the simulation core.
//!
//! These signal broken invariants (an occupancy entry naming a nomad that is
//! not in the population, a birth onto a taken cell). Expected conditions such
//! as a blocked move never surface here.

use nomads_data::{NomadId, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The grid names an occupant the population does not know.
    #[error("Grid cell {position} is occupied by unknown nomad {id}")]
    UnknownOccupant { id: NomadId, position: Position },

    /// Attempted to place a nomad on a cell that is not open.
    #[error("Cannot place nomad {id} on non-open cell {position}")]
    CellOccupied { id: NomadId, position: Position },

    /// A position outside the grid was written.
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),

    /// An external terrain layout disagrees with the configured dimensions.
    #[error("Terrain layout is {actual_width}x{actual_height} ({cells} cells) but the world is {width}x{height}")]
    LayoutMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
        cells: usize,
    },
}

/// Result type alias for simulation operations.
pub type SimResult<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display() {
        let err = SimError::OutOfBounds(Position::new(3, 40));
        assert_eq!(err.to_string(), "Position (3, 40) is out of bounds");
    }

    #[test]
    fn test_unknown_occupant_mentions_cell() {
        let err = SimError::UnknownOccupant {
            id: NomadId(Uuid::nil()),
            position: Position::new(1, 2),
        };
        assert!(err.to_string().contains("(1, 2)"));
    }
}
