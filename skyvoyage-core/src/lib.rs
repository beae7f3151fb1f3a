pub mod seat;
pub mod occupancy;
pub mod engine;
pub mod view;

pub use seat::{SeatId, SeatLayout};
pub use occupancy::OccupancyPolicy;
pub use engine::{SeatSelectionEngine, ToggleOutcome};
pub use view::{SeatCell, SeatMapView, SeatRowView, SeatState};

use std::fmt;

/// Why a seat was refused by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatRejection {
    /// The seat id could not be parsed ("A1", "0C", "12").
    Malformed,
    /// The seat lies outside the current grid.
    OutOfBounds,
    /// The seat is taken on the current map.
    Occupied,
}

impl fmt::Display for SeatRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatRejection::Malformed => write!(f, "not a seat id"),
            SeatRejection::OutOfBounds => write!(f, "outside the seat map"),
            SeatRejection::Occupied => write!(f, "already occupied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatError {
    #[error("Invalid seat {seat}: {reason}")]
    InvalidSeat {
        seat: String,
        reason: SeatRejection,
    },
    #[error("Invalid capacity: at least one seat is required")]
    InvalidCapacity,
    #[error("Invalid seat layout: {0}")]
    InvalidLayout(String),
}

impl SeatError {
    pub(crate) fn invalid_seat(seat: impl fmt::Display, reason: SeatRejection) -> Self {
        SeatError::InvalidSeat {
            seat: seat.to_string(),
            reason,
        }
    }
}

pub type SeatResult<T> = Result<T, SeatError>;
