use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    Economy,
    Premium,
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::Premium => "premium",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premium" => Ok(CabinClass::Premium),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            other => Err(CatalogError::UnknownCabinClass(other.to_string())),
        }
    }
}

/// One end of a flight. `time` is the local display time ("03:45 PM +1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub city: String,
    pub time: String,
}

impl Airport {
    fn new(code: &str, city: &str, time: &str) -> Self {
        Self {
            code: code.to_string(),
            city: city.to_string(),
            time: time.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub from: Airport,
    pub to: Airport,
    pub duration: String,
    /// Per-passenger fare in US cents.
    pub price_cents: u64,
    pub seats_available: u32,
    pub cabin_class: CabinClass,
    pub date: NaiveDate,
}

impl Flight {
    /// "NYC → LDN"
    pub fn route(&self) -> String {
        format!("{} → {}", self.from.code, self.to.code)
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_flight(
    id: &str,
    airline: &str,
    flight_number: &str,
    from: Airport,
    to: Airport,
    duration: &str,
    price_dollars: u64,
    seats_available: u32,
    date: (i32, u32, u32),
) -> Option<Flight> {
    Some(Flight {
        id: id.to_string(),
        airline: airline.to_string(),
        flight_number: flight_number.to_string(),
        from,
        to,
        duration: duration.to_string(),
        price_cents: price_dollars * 100,
        seats_available,
        cabin_class: CabinClass::Economy,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
    })
}

/// The fixed demo schedule served by the catalog.
pub(crate) fn demo_flights() -> Vec<Flight> {
    [
        demo_flight(
            "FL001",
            "SkyVoyage Airways",
            "SV-1234",
            Airport::new("NYC", "New York", "08:00 AM"),
            Airport::new("LDN", "London", "08:30 PM"),
            "7h 30m",
            649,
            45,
            (2025, 12, 1),
        ),
        demo_flight(
            "FL002",
            "Atlantic Airlines",
            "AA-5678",
            Airport::new("LAX", "Los Angeles", "10:15 AM"),
            Airport::new("TKY", "Tokyo", "03:45 PM +1"),
            "11h 30m",
            899,
            12,
            (2025, 12, 1),
        ),
        demo_flight(
            "FL003",
            "Pacific Wings",
            "PW-9012",
            Airport::new("SFO", "San Francisco", "06:30 AM"),
            Airport::new("SYD", "Sydney", "09:00 PM +1"),
            "15h 30m",
            1249,
            28,
            (2025, 12, 2),
        ),
        demo_flight(
            "FL004",
            "Euro Connect",
            "EC-3456",
            Airport::new("CHI", "Chicago", "02:00 PM"),
            Airport::new("PAR", "Paris", "06:30 AM +1"),
            "8h 30m",
            729,
            56,
            (2025, 12, 1),
        ),
        demo_flight(
            "FL005",
            "Desert Express",
            "DE-7890",
            Airport::new("MIA", "Miami", "11:45 PM"),
            Airport::new("DXB", "Dubai", "10:15 PM +1"),
            "14h 30m",
            1099,
            8,
            (2025, 12, 3),
        ),
        demo_flight(
            "FL006",
            "SkyVoyage Airways",
            "SV-2468",
            Airport::new("LDN", "London", "09:00 AM"),
            Airport::new("NYC", "New York", "12:00 PM"),
            "8h 00m",
            599,
            34,
            (2025, 12, 2),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
