use chrono::{DateTime, NaiveDate, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use skyvoyage_catalog::{format_price, total_price, Flight};
use skyvoyage_core::{
    OccupancyPolicy, SeatId, SeatLayout, SeatMapView, SeatSelectionEngine, ToggleOutcome,
};
use tracing::{debug, info};

use crate::assembler::{BookingAssembler, BookingForm};
use crate::models::{Booking, Contact, PassengerName};
use crate::reference::generate_booking_ref;
use crate::{BookingError, BookingResult};

/// The passenger dropdown offers 1 to 9 travellers.
pub const DEFAULT_MAX_PASSENGERS: u32 = 9;

/// What the summary panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    /// "NYC → LDN", or "--" with no flight.
    pub route: String,
    pub passengers: u32,
    pub seats: Vec<SeatId>,
    pub total_price_cents: u64,
    pub total_display: String,
}

/// One user's way through the booking page: chosen flight, passenger count
/// and the seat map they are picking from.
#[derive(Debug, Clone)]
pub struct BookingSession {
    engine: SeatSelectionEngine<ChaCha8Rng>,
    selected_flight: Option<Flight>,
    passenger_count: u32,
    max_passengers: u32,
    reference_rng: ChaCha8Rng,
    last_active: DateTime<Utc>,
}

impl BookingSession {
    /// One passenger, no flight, freshly generated map.
    pub fn new(layout: SeatLayout, policy: OccupancyPolicy) -> BookingResult<Self> {
        let engine = SeatSelectionEngine::new(1)?;
        Ok(Self::from_parts(engine, ChaCha8Rng::from_entropy(), layout, policy))
    }

    /// Same seed, same seat maps and booking references.
    pub fn seeded(layout: SeatLayout, policy: OccupancyPolicy, seed: u64) -> BookingResult<Self> {
        let engine = SeatSelectionEngine::seeded(1, seed)?;
        let reference_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        Ok(Self::from_parts(engine, reference_rng, layout, policy))
    }

    fn from_parts(
        mut engine: SeatSelectionEngine<ChaCha8Rng>,
        reference_rng: ChaCha8Rng,
        layout: SeatLayout,
        policy: OccupancyPolicy,
    ) -> Self {
        engine.generate(layout, policy);
        Self {
            engine,
            selected_flight: None,
            passenger_count: 1,
            max_passengers: DEFAULT_MAX_PASSENGERS,
            reference_rng,
            last_active: Utc::now(),
        }
    }

    pub fn with_max_passengers(mut self, max: u32) -> Self {
        self.max_passengers = max.max(1);
        self
    }

    pub fn select_flight(&mut self, flight: Flight) {
        info!(flight_id = %flight.id, "Flight selected");
        self.selected_flight = Some(flight);
        self.engine.reset();
        self.engine.regenerate();
        self.touch();
    }

    /// Changes capacity, which clears the selection, then redraws the map.
    pub fn set_passenger_count(&mut self, count: i64) -> BookingResult<()> {
        let max = self.max_passengers;
        let valid = u32::try_from(count).ok().filter(|n| (1..=max).contains(n));
        let Some(count) = valid else {
            return Err(BookingError::InvalidPassengerCount { count, max });
        };

        self.engine.set_capacity(count)?;
        self.passenger_count = count;
        self.engine.regenerate();
        self.touch();

        debug!(passengers = count, "Passenger count changed");
        Ok(())
    }

    pub fn toggle_seat(&mut self, seat: SeatId) -> BookingResult<ToggleOutcome> {
        self.touch();
        Ok(self.engine.toggle_outcome(seat)?)
    }

    pub fn clear_seats(&mut self) {
        self.engine.reset();
        self.touch();
    }

    pub fn summary(&self) -> BookingSummary {
        let total = self
            .selected_flight
            .as_ref()
            .map_or(0, |f| total_price(f, self.passenger_count));

        BookingSummary {
            route: self
                .selected_flight
                .as_ref()
                .map_or_else(|| "--".to_string(), Flight::route),
            passengers: self.passenger_count,
            seats: self.engine.selection().to_vec(),
            total_price_cents: total,
            total_display: format_price(total),
        }
    }

    /// Validates the form and builds a booking under a fresh reference.
    /// The session itself is left as it was, so a booking that cannot be
    /// stored loses nothing. Each call draws a new reference.
    pub fn prepare_booking(
        &mut self,
        contact: &Contact,
        passengers: &[PassengerName],
        travel_date: Option<NaiveDate>,
    ) -> BookingResult<Booking> {
        let form = BookingForm {
            flight: self.selected_flight.as_ref(),
            passenger_count: self.passenger_count,
            selection: self.engine.selection(),
            contact,
            passengers,
        };
        form.validate()?;

        let reference = generate_booking_ref(&mut self.reference_rng);
        let booking = BookingAssembler::assemble(&form, reference, travel_date, Utc::now())?;
        self.touch();
        Ok(booking)
    }

    /// Starts over once `booking` is stored: no flight, empty selection,
    /// a new map. The passenger count stays.
    pub fn complete_booking(&mut self, booking: &Booking) {
        info!(
            reference = %booking.reference,
            email = ?booking.email,
            seats = booking.seats.len(),
            "Booking confirmed"
        );

        self.selected_flight = None;
        self.engine.reset();
        self.engine.regenerate();
        self.touch();
    }

    pub fn selected_flight(&self) -> Option<&Flight> {
        self.selected_flight.as_ref()
    }

    pub fn passenger_count(&self) -> u32 {
        self.passenger_count
    }

    pub fn max_passengers(&self) -> u32 {
        self.max_passengers
    }

    pub fn selection(&self) -> &[SeatId] {
        self.engine.selection()
    }

    pub fn engine(&self) -> &SeatSelectionEngine<ChaCha8Rng> {
        &self.engine
    }

    pub fn seat_map(&self) -> SeatMapView {
        self.engine.view()
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}
