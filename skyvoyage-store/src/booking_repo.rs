use async_trait::async_trait;
use skyvoyage_order::Booking;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Duplicate booking reference: {0}")]
    DuplicateReference(String),
}

/// Storage for confirmed bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &Booking) -> Result<(), RepositoryError>;

    async fn get(&self, reference: &str) -> Result<Option<Booking>, RepositoryError>;

    /// Newest first.
    async fn list_for_user(&self, username: &str) -> Result<Vec<Booking>, RepositoryError>;
}

/// Keeps bookings for the lifetime of the process only.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<String, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.reference) {
            return Err(RepositoryError::DuplicateReference(booking.reference.clone()));
        }
        bookings.insert(booking.reference.clone(), booking.clone());
        tracing::debug!(reference = %booking.reference, total = bookings.len(), "Booking stored");
        Ok(())
    }

    async fn get(&self, reference: &str) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read().await.get(reference).cloned())
    }

    async fn list_for_user(&self, username: &str) -> Result<Vec<Booking>, RepositoryError> {
        let bookings = self.bookings.read().await;
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| b.username == username)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use skyvoyage_catalog::FlightCatalog;
    use skyvoyage_order::{BookingStatus, FlightSummary, PassengerSeat};

    fn booking(reference: &str, username: &str, minutes_ago: i64) -> Booking {
        let catalog = FlightCatalog::mock();
        let flight = catalog.get("FL001").unwrap();
        let seat = "1A".parse().unwrap();
        Booking {
            reference: reference.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com").into(),
            flight: FlightSummary::of(flight, flight.date),
            passengers: vec![PassengerSeat {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                seat,
            }],
            seats: vec![seat],
            total_price_cents: flight.price_cents,
            booked_at: Utc::now() - Duration::minutes(minutes_ago),
            status: BookingStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking("SV-AAAAAA", "jane", 0)).await.unwrap();

        let found = repo.get("SV-AAAAAA").await.unwrap().unwrap();
        assert_eq!(found.username, "jane");
        assert!(repo.get("SV-ZZZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_reference_rejected() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking("SV-AAAAAA", "jane", 0)).await.unwrap();
        let err = repo.save(&booking("SV-AAAAAA", "john", 0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateReference(r) if r == "SV-AAAAAA"));
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking("SV-OLD001", "jane", 30)).await.unwrap();
        repo.save(&booking("SV-NEW001", "jane", 1)).await.unwrap();
        repo.save(&booking("SV-MID001", "jane", 10)).await.unwrap();
        repo.save(&booking("SV-OTHER1", "john", 5)).await.unwrap();

        let refs: Vec<String> = repo
            .list_for_user("jane")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.reference)
            .collect();
        assert_eq!(refs, ["SV-NEW001", "SV-MID001", "SV-OLD001"]);
        assert!(repo.list_for_user("nobody").await.unwrap().is_empty());
    }
}
