use serde::Serialize;
use std::collections::BTreeSet;

use crate::seat::{SeatId, SeatLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatState {
    Free,
    Occupied,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatCell {
    pub id: SeatId,
    pub state: SeatState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRowView {
    pub row: u8,
    pub seats: Vec<SeatCell>,
}

/// Render-ready snapshot of a seat map, consumed by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatMapView {
    pub letters: Vec<char>,
    pub aisle_after: usize,
    pub rows: Vec<SeatRowView>,
    pub free_count: usize,
    pub occupied_count: usize,
    pub selected: Vec<SeatId>,
}

impl SeatMapView {
    pub fn build(layout: &SeatLayout, occupied: &BTreeSet<SeatId>, selection: &[SeatId]) -> Self {
        let rows = (1..=layout.rows())
            .map(|row| SeatRowView {
                row,
                seats: layout
                    .letters()
                    .iter()
                    .map(|&letter| {
                        let id = SeatId::new(row, letter);
                        let state = if occupied.contains(&id) {
                            SeatState::Occupied
                        } else if selection.contains(&id) {
                            SeatState::Selected
                        } else {
                            SeatState::Free
                        };
                        SeatCell { id, state }
                    })
                    .collect(),
            })
            .collect();

        Self {
            letters: layout.letters().to_vec(),
            aisle_after: layout.aisle_after(),
            rows,
            free_count: layout.seat_count() - occupied.len(),
            occupied_count: occupied.len(),
            selected: selection.to_vec(),
        }
    }

    pub fn state_of(&self, seat: &SeatId) -> Option<SeatState> {
        self.rows
            .iter()
            .find(|r| r.row == seat.row())
            .and_then(|r| r.seats.iter().find(|c| c.id == *seat))
            .map(|c| c.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SeatSelectionEngine;

    #[test]
    fn test_view_marks_every_cell() {
        let mut engine = SeatSelectionEngine::seeded(2, 11).unwrap();
        engine.regenerate();

        let free: Vec<SeatId> = engine
            .layout()
            .seats()
            .filter(|s| !engine.is_occupied(s))
            .take(2)
            .collect();
        for seat in &free {
            engine.toggle(*seat).unwrap();
        }

        let view = engine.view();
        assert_eq!(view.rows.len(), 8);
        assert!(view.rows.iter().all(|r| r.seats.len() == 6));
        assert_eq!(view.aisle_after, 3);
        assert_eq!(view.occupied_count, engine.occupied().len());
        assert_eq!(view.free_count + view.occupied_count, 48);

        for seat in engine.occupied() {
            assert_eq!(view.state_of(seat), Some(SeatState::Occupied));
        }
        for seat in &free {
            assert_eq!(view.state_of(seat), Some(SeatState::Selected));
        }
        assert_eq!(view.selected, free);
    }

    #[test]
    fn test_view_json_shape() {
        let engine = SeatSelectionEngine::seeded(1, 3).unwrap();
        let json = serde_json::to_value(engine.view()).unwrap();

        assert_eq!(json["letters"][0], "A");
        assert_eq!(json["rows"][0]["seats"][0]["id"], "1A");
        assert_eq!(json["rows"][0]["seats"][0]["state"], "free");
    }
}
