pub mod app_config;
pub mod booking_repo;

pub use app_config::Config;
pub use booking_repo::{BookingRepository, InMemoryBookingRepository, RepositoryError};
