use chrono::{DateTime, NaiveDate, Utc};
use skyvoyage_catalog::{total_price, Flight};
use skyvoyage_core::SeatId;

use crate::models::{Booking, BookingStatus, Contact, FlightSummary, PassengerName, PassengerSeat};
use crate::{BookingError, BookingResult};

/// Everything the booking form holds at submit time.
#[derive(Debug, Clone, Copy)]
pub struct BookingForm<'a> {
    pub flight: Option<&'a Flight>,
    pub passenger_count: u32,
    pub selection: &'a [SeatId],
    pub contact: &'a Contact,
    pub passengers: &'a [PassengerName],
}

impl<'a> BookingForm<'a> {
    /// Checks run in form order; the first failure is returned.
    pub fn validate(&self) -> BookingResult<&'a Flight> {
        let flight = self.flight.ok_or(BookingError::NoFlightSelected)?;

        let required = self.passenger_count as usize;
        if self.selection.len() != required {
            return Err(BookingError::IncompleteSeats {
                selected: self.selection.len(),
                required,
            });
        }

        if self.contact.username.trim().is_empty() {
            return Err(BookingError::MissingContact("username"));
        }
        let email = self.contact.email.expose().trim();
        if email.is_empty() {
            return Err(BookingError::MissingContact("email"));
        }
        if !email.contains('@') {
            return Err(BookingError::InvalidEmail);
        }

        if self.passengers.len() != required {
            return Err(BookingError::PassengerMismatch {
                expected: required,
                got: self.passengers.len(),
            });
        }
        if let Some(index) = self.passengers.iter().position(|p| !p.is_complete()) {
            return Err(BookingError::MissingPassengerName(index + 1));
        }

        Ok(flight)
    }
}

pub struct BookingAssembler;

impl BookingAssembler {
    /// Validates the form and pairs passenger `i` with `selection[i]`.
    pub fn assemble(
        form: &BookingForm<'_>,
        reference: String,
        travel_date: Option<NaiveDate>,
        booked_at: DateTime<Utc>,
    ) -> BookingResult<Booking> {
        let flight = form.validate()?;

        let passengers = form
            .passengers
            .iter()
            .zip(form.selection)
            .map(|(name, seat)| PassengerSeat {
                first_name: name.first_name.trim().to_string(),
                last_name: name.last_name.trim().to_string(),
                seat: *seat,
            })
            .collect();

        Ok(Booking {
            reference,
            username: form.contact.username.trim().to_string(),
            email: form.contact.email.expose().trim().to_string().into(),
            flight: FlightSummary::of(flight, travel_date.unwrap_or(flight.date)),
            passengers,
            seats: form.selection.to_vec(),
            total_price_cents: total_price(flight, form.passenger_count),
            booked_at,
            status: BookingStatus::Confirmed,
        })
    }
}
