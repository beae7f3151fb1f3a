pub mod assembler;
pub mod models;
pub mod reference;
pub mod session;

pub use assembler::{BookingAssembler, BookingForm};
pub use models::{Booking, BookingStatus, Contact, FlightSummary, PassengerName, PassengerSeat};
pub use reference::{generate_booking_ref, is_booking_ref};
pub use session::{BookingSession, BookingSummary, DEFAULT_MAX_PASSENGERS};

use skyvoyage_core::SeatError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error("No flight selected")]
    NoFlightSelected,

    #[error("Passenger count must be between 1 and {max}, got {count}")]
    InvalidPassengerCount { count: i64, max: u32 },

    #[error("Select {required} seat(s) before booking, {selected} selected")]
    IncompleteSeats { selected: usize, required: usize },

    #[error("Missing contact field: {0}")]
    MissingContact(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Expected {expected} passenger(s), got {got}")]
    PassengerMismatch { expected: usize, got: usize },

    #[error("Passenger {0} needs a first and last name")]
    MissingPassengerName(usize),
}

impl BookingError {
    /// Form problems the user can fix, as opposed to seat-map rejections.
    pub fn is_validation(&self) -> bool {
        !matches!(self, BookingError::Seat(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
