pub mod flight;
pub mod pricing;
pub mod search;

pub use flight::{Airport, CabinClass, Flight};
pub use pricing::{format_price, total_price, Availability};
pub use search::{AirportInfo, FlightCatalog, FlightQuery};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Unknown cabin class: {0}")]
    UnknownCabinClass(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
