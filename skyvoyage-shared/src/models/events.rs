use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::pii::Masked;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEventKind {
    Created,
    FlightSelected,
    PassengersChanged,
    Expired,
}

/// Booking session lifecycle, emitted through `tracing`.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct SessionEvent {
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub flight_id: Option<String>,
    pub passengers: u32,
    pub timestamp: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(session_id: Uuid, kind: SessionEventKind, flight_id: Option<String>, passengers: u32) -> Self {
        Self {
            session_id,
            kind,
            flight_id,
            passengers,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub session_id: Uuid,
    pub reference: String,
    pub username: String,
    pub email: Masked<String>,
    pub flight_id: String,
    pub seats: Vec<String>,
    pub total_price_cents: u64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_event_debug_hides_email() {
        let event = BookingConfirmedEvent {
            session_id: Uuid::new_v4(),
            reference: "SV-AB12CD".to_string(),
            username: "jane".to_string(),
            email: Masked("jane@example.com".to_string()),
            flight_id: "FL001".to_string(),
            seats: vec!["1A".to_string()],
            total_price_cents: 64_900,
            timestamp: Utc::now(),
        };

        let debug = format!("{:?}", event);
        assert!(!debug.contains("jane@example.com"));
        assert!(debug.contains("SV-AB12CD"));
    }

    #[test]
    fn test_session_event_kind_serializes_screaming() {
        let event = SessionEvent::new(Uuid::new_v4(), SessionEventKind::FlightSelected, Some("FL002".into()), 2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "FLIGHT_SELECTED");
        assert_eq!(json["flight_id"], "FL002");
    }
}
