use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::occupancy::{sample_occupied, OccupancyPolicy};
use crate::seat::{SeatId, SeatLayout};
use crate::view::SeatMapView;
use crate::{SeatError, SeatRejection, SeatResult};

/// What a successful toggle did to the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Selected { seat: SeatId },
    Deselected { seat: SeatId },
    /// At capacity: the oldest selected seat made room for `seat`.
    Replaced { seat: SeatId, evicted: SeatId },
}

/// Seat map plus the user's ordered seat selection for one booking session.
///
/// Selection order is insertion order; the seat at index `i` goes to
/// passenger `i`. Once the selection is full, picking another free seat
/// evicts the oldest pick.
#[derive(Debug, Clone)]
pub struct SeatSelectionEngine<R = ChaCha8Rng> {
    layout: SeatLayout,
    policy: OccupancyPolicy,
    occupied: BTreeSet<SeatId>,
    capacity: u32,
    selection: Vec<SeatId>,
    rng: R,
}

impl SeatSelectionEngine<ChaCha8Rng> {
    pub fn new(capacity: u32) -> SeatResult<Self> {
        Self::with_rng(capacity, ChaCha8Rng::from_entropy())
    }

    /// Reproducible engine for tests and demos.
    pub fn seeded(capacity: u32, seed: u64) -> SeatResult<Self> {
        Self::with_rng(capacity, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SeatSelectionEngine<R> {
    /// Engine over the default layout with an empty (all free) map.
    pub fn with_rng(capacity: u32, rng: R) -> SeatResult<Self> {
        if capacity == 0 {
            return Err(SeatError::InvalidCapacity);
        }

        Ok(Self {
            layout: SeatLayout::default(),
            policy: OccupancyPolicy::default(),
            occupied: BTreeSet::new(),
            capacity,
            selection: Vec::new(),
            rng,
        })
    }

    /// Replace the map with a fresh random one.
    pub fn generate(&mut self, layout: SeatLayout, policy: OccupancyPolicy) {
        let before = self.selection.len();
        self.selection.retain(|seat| layout.contains(seat));
        if self.selection.len() != before {
            debug!(
                dropped = before - self.selection.len(),
                "Dropped selected seats outside the new layout"
            );
        }

        self.occupied = sample_occupied(&mut self.rng, &layout, &policy, &self.selection);
        self.layout = layout;
        self.policy = policy;

        debug!(
            occupied = self.occupied.len(),
            seats = self.layout.seat_count(),
            "Generated seat map"
        );
    }

    /// Re-randomise occupancy on the current layout and policy.
    pub fn regenerate(&mut self) {
        let layout = self.layout.clone();
        self.generate(layout, self.policy);
    }

    pub fn set_capacity(&mut self, capacity: u32) -> SeatResult<()> {
        if capacity == 0 {
            return Err(SeatError::InvalidCapacity);
        }
        self.capacity = capacity;
        self.selection.clear();
        Ok(())
    }

    /// Toggle a seat and return the updated selection, oldest first.
    pub fn toggle(&mut self, seat: SeatId) -> SeatResult<&[SeatId]> {
        self.toggle_outcome(seat)?;
        Ok(&self.selection)
    }

    pub fn toggle_outcome(&mut self, seat: SeatId) -> SeatResult<ToggleOutcome> {
        if !self.layout.contains(&seat) {
            warn!(%seat, "Rejected toggle outside the seat map");
            return Err(SeatError::invalid_seat(seat, SeatRejection::OutOfBounds));
        }
        if self.occupied.contains(&seat) {
            warn!(%seat, "Rejected toggle of an occupied seat");
            return Err(SeatError::invalid_seat(seat, SeatRejection::Occupied));
        }

        let outcome = if let Some(index) = self.selection.iter().position(|s| *s == seat) {
            self.selection.remove(index);
            ToggleOutcome::Deselected { seat }
        } else if self.selection.len() < self.capacity as usize {
            self.selection.push(seat);
            ToggleOutcome::Selected { seat }
        } else {
            let evicted = self.selection.remove(0);
            self.selection.push(seat);
            ToggleOutcome::Replaced { seat, evicted }
        };

        debug!(?outcome, selected = self.selection.len(), capacity = self.capacity, "Seat toggled");
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.selection.clear();
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn selection(&self) -> &[SeatId] {
        &self.selection
    }

    pub fn occupied(&self) -> &BTreeSet<SeatId> {
        &self.occupied
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn policy(&self) -> OccupancyPolicy {
        self.policy
    }

    pub fn is_occupied(&self, seat: &SeatId) -> bool {
        self.occupied.contains(seat)
    }

    /// Every passenger has a seat.
    pub fn is_complete(&self) -> bool {
        self.selection.len() == self.capacity as usize
    }

    pub fn free_count(&self) -> usize {
        self.layout.seat_count() - self.occupied.len()
    }

    pub fn view(&self) -> SeatMapView {
        SeatMapView::build(&self.layout, &self.occupied, &self.selection)
    }
}
