use chrono::{NaiveDate, Utc};
use serde::Serialize;
use skyvoyage_catalog::Flight;
use skyvoyage_core::{OccupancyPolicy, SeatId, SeatLayout, SeatMapView};
use skyvoyage_order::{Booking, BookingSession, BookingSummary, Contact, PassengerName};
use skyvoyage_shared::models::events::{SessionEvent, SessionEventKind};
use skyvoyage_store::{BookingRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

/// Fresh references drawn before a checkout gives up on collisions.
const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// Everything the booking page needs to redraw itself.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub flight: Option<Flight>,
    pub passengers: u32,
    pub max_passengers: u32,
    pub selection: Vec<SeatId>,
    pub complete: bool,
    pub seat_map: SeatMapView,
    pub summary: BookingSummary,
}

impl SessionSnapshot {
    pub fn of(id: Uuid, session: &BookingSession) -> Self {
        Self {
            id,
            flight: session.selected_flight().cloned(),
            passengers: session.passenger_count(),
            max_passengers: session.max_passengers(),
            selection: session.selection().to_vec(),
            complete: session.engine().is_complete(),
            seat_map: session.seat_map(),
            summary: session.summary(),
        }
    }
}

/// Live booking sessions keyed by id. Each session owns its own seat map,
/// so requests for different sessions never touch the same engine.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, BookingSession>>>,
    layout: SeatLayout,
    policy: OccupancyPolicy,
    max_passengers: u32,
}

impl SessionStore {
    pub fn new(layout: SeatLayout, policy: OccupancyPolicy, max_passengers: u32) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            layout,
            policy,
            max_passengers,
        }
    }

    pub async fn create(&self, passengers: Option<i64>) -> Result<SessionSnapshot, AppError> {
        let mut session = BookingSession::new(self.layout.clone(), self.policy)?
            .with_max_passengers(self.max_passengers);
        if let Some(count) = passengers {
            session.set_passenger_count(count)?;
        }

        let id = Uuid::new_v4();
        let snapshot = SessionSnapshot::of(id, &session);
        self.sessions.write().await.insert(id, session);

        tracing::info!(event = ?SessionEvent::new(id, SessionEventKind::Created, None, snapshot.passengers));
        Ok(snapshot)
    }

    /// Runs `f` against one session under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFoundError(format!("Session not found: {}", id)))?;
        f(session)
    }

    /// Books the session's flight and seats. The session only starts over
    /// once `bookings` has stored the result; a reference collision draws a
    /// new one, and any other failure leaves the session as it was.
    pub async fn checkout(
        &self,
        id: Uuid,
        bookings: &dyn BookingRepository,
        contact: &Contact,
        passengers: &[PassengerName],
        travel_date: Option<NaiveDate>,
    ) -> Result<Booking, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFoundError(format!("Session not found: {}", id)))?;

        let mut attempt = 1;
        loop {
            let booking = session.prepare_booking(contact, passengers, travel_date)?;
            match bookings.save(&booking).await {
                Ok(()) => {
                    session.complete_booking(&booking);
                    return Ok(booking);
                }
                Err(RepositoryError::DuplicateReference(reference))
                    if attempt < MAX_REFERENCE_ATTEMPTS =>
                {
                    tracing::warn!(%reference, attempt, "Booking reference taken, drawing another");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|session| SessionSnapshot::of(id, session))
            .ok_or_else(|| AppError::NotFoundError(format!("Session not found: {}", id)))
    }

    /// Drops sessions idle for longer than `idle_ttl`. Returns how many went.
    pub async fn cleanup_expired(&self, idle_ttl: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();

        sessions.retain(|id, session| {
            let idle = (now - session.last_active()).to_std().unwrap_or(Duration::ZERO);
            if idle < idle_ttl {
                return true;
            }
            tracing::info!(event = ?SessionEvent::new(
                *id,
                SessionEventKind::Expired,
                session.selected_flight().map(|f| f.id.clone()),
                session.passenger_count(),
            ));
            false
        });

        initial_count - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skyvoyage_store::InMemoryBookingRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reports the first `collisions` saves as duplicates, then stores normally.
    struct CollidingRepository {
        collisions: AtomicUsize,
        inner: InMemoryBookingRepository,
    }

    impl CollidingRepository {
        fn new(collisions: usize) -> Self {
            Self { collisions: AtomicUsize::new(collisions), inner: InMemoryBookingRepository::new() }
        }
    }

    #[async_trait]
    impl BookingRepository for CollidingRepository {
        async fn save(&self, booking: &Booking) -> Result<(), RepositoryError> {
            let left = self.collisions.load(Ordering::SeqCst);
            if left > 0 {
                self.collisions.store(left - 1, Ordering::SeqCst);
                return Err(RepositoryError::DuplicateReference(booking.reference.clone()));
            }
            self.inner.save(booking).await
        }

        async fn get(&self, reference: &str) -> Result<Option<Booking>, RepositoryError> {
            self.inner.get(reference).await
        }

        async fn list_for_user(&self, username: &str) -> Result<Vec<Booking>, RepositoryError> {
            self.inner.list_for_user(username).await
        }
    }

    /// A session on FL001 with one free seat picked.
    async fn ready_session(store: &SessionStore) -> (Uuid, SeatId) {
        let id = store.create(None).await.unwrap().id;
        let flight = skyvoyage_catalog::FlightCatalog::mock().get("FL001").unwrap().clone();
        let seat = store
            .with_session(id, |session| {
                session.select_flight(flight);
                let seat = session
                    .engine()
                    .layout()
                    .seats()
                    .find(|s| !session.engine().is_occupied(s))
                    .unwrap();
                session.toggle_seat(seat)?;
                Ok(seat)
            })
            .await
            .unwrap();
        (id, seat)
    }

    fn jane() -> (Contact, Vec<PassengerName>) {
        (Contact::new("jane", "jane@example.com"), vec![PassengerName::new("Jane", "Doe")])
    }

    fn store() -> SessionStore {
        SessionStore::new(SeatLayout::default(), OccupancyPolicy::default(), 9)
    }

    #[tokio::test]
    async fn test_create_and_snapshot() {
        let store = store();
        let created = store.create(Some(3)).await.unwrap();
        assert_eq!(created.passengers, 3);
        assert_eq!(created.summary.route, "--");

        let fetched = store.snapshot(created.id).await.unwrap();
        assert_eq!(fetched.seat_map, created.seat_map);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_passenger_count() {
        let store = store();
        assert!(matches!(store.create(Some(12)).await, Err(AppError::ValidationError(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = store();
        let missing = Uuid::new_v4();
        assert!(matches!(store.snapshot(missing).await, Err(AppError::NotFoundError(_))));
        let result = store.with_session(missing, |_| Ok(())).await;
        assert!(matches!(result, Err(AppError::NotFoundError(_))));
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = store();
        store.create(None).await.unwrap();
        store.create(None).await.unwrap();

        assert_eq!(store.cleanup_expired(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.cleanup_expired(Duration::ZERO).await, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_checkout_stores_then_resets() {
        let store = store();
        let repo = InMemoryBookingRepository::new();
        let (id, seat) = ready_session(&store).await;
        let (contact, names) = jane();

        let booking = store.checkout(id, &repo, &contact, &names, None).await.unwrap();
        assert_eq!(booking.seats, vec![seat]);
        assert!(repo.get(&booking.reference).await.unwrap().is_some());

        let after = store.snapshot(id).await.unwrap();
        assert!(after.flight.is_none());
        assert!(after.selection.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_draws_new_reference_on_collision() {
        let store = store();
        let repo = CollidingRepository::new(2);
        let (id, _) = ready_session(&store).await;
        let (contact, names) = jane();

        let booking = store.checkout(id, &repo, &contact, &names, None).await.unwrap();
        assert_eq!(repo.list_for_user("jane").await.unwrap().len(), 1);
        assert!(repo.get(&booking.reference).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unstored_booking_keeps_session() {
        let store = store();
        let repo = CollidingRepository::new(usize::MAX);
        let (id, seat) = ready_session(&store).await;
        let (contact, names) = jane();

        let result = store.checkout(id, &repo, &contact, &names, None).await;
        assert!(matches!(result, Err(AppError::InternalServerError(_))));

        let after = store.snapshot(id).await.unwrap();
        assert_eq!(after.flight.map(|f| f.id), Some("FL001".to_string()));
        assert_eq!(after.selection, vec![seat]);
        assert!(repo.list_for_user("jane").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_validation_error_keeps_session() {
        let store = store();
        let repo = InMemoryBookingRepository::new();
        let (id, seat) = ready_session(&store).await;
        let contact = Contact::new("jane", "not-an-email");
        let names = vec![PassengerName::new("Jane", "Doe")];

        let result = store.checkout(id, &repo, &contact, &names, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(store.snapshot(id).await.unwrap().selection, vec![seat]);
    }
}
