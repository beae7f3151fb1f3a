use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::seat::{SeatId, SeatLayout};

/// How many seats a freshly generated map marks as taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyPolicy {
    pub min: usize,
    pub max: usize,
}

impl OccupancyPolicy {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    /// The range narrowed to what `available` free seats can satisfy.
    pub fn clamped(&self, available: usize) -> RangeInclusive<usize> {
        let max = self.max.min(available);
        let min = self.min.min(max);
        min..=max
    }
}

impl Default for OccupancyPolicy {
    fn default() -> Self {
        Self { min: 10, max: 24 }
    }
}

/// Draws a random occupied set. Seats in `keep_free` are never drawn.
pub(crate) fn sample_occupied<R: Rng + ?Sized>(
    rng: &mut R,
    layout: &SeatLayout,
    policy: &OccupancyPolicy,
    keep_free: &[SeatId],
) -> BTreeSet<SeatId> {
    let available = layout.seat_count().saturating_sub(keep_free.len());
    let target = rng.gen_range(policy.clamped(available));

    let letters = layout.letters();
    let mut occupied = BTreeSet::new();

    while occupied.len() < target {
        let row = rng.gen_range(1..=layout.rows());
        let letter = letters[rng.gen_range(0..letters.len())];
        let seat = SeatId::new(row, letter);

        if keep_free.contains(&seat) {
            continue;
        }
        occupied.insert(seat);
    }

    occupied
}
