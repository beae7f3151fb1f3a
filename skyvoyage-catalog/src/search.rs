use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::flight::{demo_flights, CabinClass, Flight};
use crate::{CatalogError, CatalogResult};

/// Search form criteria. Empty strings count as "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

impl FlightQuery {
    fn criterion(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    fn cabin_class(&self) -> CatalogResult<Option<CabinClass>> {
        Self::criterion(&self.class)
            .map(|c| c.parse::<CabinClass>())
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportInfo {
    pub code: String,
    pub city: String,
}

/// Read-only flight list. Booking never changes `seats_available`.
#[derive(Debug, Clone)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
}

impl FlightCatalog {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    pub fn mock() -> Self {
        Self::new(demo_flights())
    }

    pub fn all(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, id: &str) -> CatalogResult<&Flight> {
        self.flights
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| CatalogError::FlightNotFound(id.to_string()))
    }

    pub fn search(&self, query: &FlightQuery) -> CatalogResult<Vec<Flight>> {
        let from = FlightQuery::criterion(&query.from);
        let to = FlightQuery::criterion(&query.to);
        let class = query.cabin_class()?;

        let matches: Vec<Flight> = self
            .flights
            .iter()
            .filter(|f| from.map_or(true, |code| f.from.code == code))
            .filter(|f| to.map_or(true, |code| f.to.code == code))
            .filter(|f| class.map_or(true, |c| f.cabin_class == c))
            .cloned()
            .collect();

        tracing::debug!(?query, results = matches.len(), "Flight search");
        Ok(matches)
    }

    /// Distinct airports served, sorted by code.
    pub fn airports(&self) -> Vec<AirportInfo> {
        let mut seen = BTreeMap::new();
        for airport in self.flights.iter().flat_map(|f| [&f.from, &f.to]) {
            seen.entry(airport.code.clone())
                .or_insert_with(|| airport.city.clone());
        }
        seen.into_iter()
            .map(|(code, city)| AirportInfo { code, city })
            .collect()
    }
}

impl Default for FlightCatalog {
    fn default() -> Self {
        Self::mock()
    }
}
