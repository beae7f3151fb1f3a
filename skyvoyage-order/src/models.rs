use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skyvoyage_catalog::{Airport, Flight};
use skyvoyage_core::SeatId;
use skyvoyage_shared::Masked;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerName {
    pub first_name: String,
    pub last_name: String,
}

impl PassengerName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub username: String,
    pub email: Masked<String>,
}

impl Contact {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: Masked(email.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerSeat {
    pub first_name: String,
    pub last_name: String,
    pub seat: SeatId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightSummary {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    pub from: Airport,
    pub to: Airport,
    pub date: NaiveDate,
}

impl FlightSummary {
    pub fn of(flight: &Flight, date: NaiveDate) -> Self {
        Self {
            id: flight.id.clone(),
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            from: flight.from.clone(),
            to: flight.to.clone(),
            date,
        }
    }
}

/// A confirmed booking. Passenger `i` sits in `seats[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub reference: String,
    pub username: String,
    pub email: Masked<String>,
    pub flight: FlightSummary,
    pub passengers: Vec<PassengerSeat>,
    pub seats: Vec<SeatId>,
    pub total_price_cents: u64,
    pub booked_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }
}
