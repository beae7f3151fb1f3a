use serde::Serialize;

use crate::flight::Flight;

/// Seats at or below this count are shown as running low.
pub const LOW_AVAILABILITY_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Low,
}

impl Availability {
    pub fn of(seats_available: u32) -> Self {
        if seats_available <= LOW_AVAILABILITY_THRESHOLD {
            Availability::Low
        } else {
            Availability::Available
        }
    }
}

/// Total fare for a party: per-passenger price times passengers.
pub fn total_price(flight: &Flight, passengers: u32) -> u64 {
    flight.price_cents * u64::from(passengers)
}

/// US-dollar display string with thousands separators: `124900` -> `"$1,249.00"`.
pub fn format_price(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${}.{:02}", grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlightCatalog;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "$0.00");
        assert_eq!(format_price(64_900), "$649.00");
        assert_eq!(format_price(124_900), "$1,249.00");
        assert_eq!(format_price(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn test_total_price() {
        let catalog = FlightCatalog::mock();
        let flight = catalog.get("FL003").unwrap();
        assert_eq!(total_price(flight, 3), 374_700);
        assert_eq!(format_price(total_price(flight, 3)), "$3,747.00");
    }

    #[test]
    fn test_availability() {
        assert_eq!(Availability::of(8), Availability::Low);
        assert_eq!(Availability::of(10), Availability::Low);
        assert_eq!(Availability::of(11), Availability::Available);
    }
}
