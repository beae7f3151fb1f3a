//! Property-based invariant tests for the seat selection engine.
//!
//! Verifies:
//! 1. Selection never exceeds capacity, never repeats, never holds an occupied seat
//! 2. Deselecting removes exactly that seat and keeps the others in order
//! 3. Selecting below capacity appends at the end
//! 4. Selecting at capacity evicts index 0 and appends at the end
//! 5. Occupied seats are refused and leave the selection untouched
//! 6. set_capacity always empties the selection
//! 7. Generation stays inside the grid and the occupancy range

use proptest::prelude::*;
use skyvoyage_core::{
    OccupancyPolicy, SeatError, SeatId, SeatLayout, SeatRejection, SeatSelectionEngine,
};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_seat() -> impl Strategy<Value = SeatId> {
    // Slightly larger than the default 8x6 grid so out-of-bounds ids show up.
    (1u8..=9, prop::sample::select(vec!['A', 'B', 'C', 'D', 'E', 'F', 'G']))
        .prop_map(|(row, letter)| SeatId::new(row, letter))
}

fn arb_engine() -> impl Strategy<Value = SeatSelectionEngine> {
    (1u32..=9, any::<u64>()).prop_map(|(capacity, seed)| {
        let mut engine = SeatSelectionEngine::seeded(capacity, seed).unwrap();
        engine.regenerate();
        engine
    })
}

fn assert_invariants(engine: &SeatSelectionEngine) {
    let selection = engine.selection();
    assert!(selection.len() <= engine.capacity() as usize);
    for (i, seat) in selection.iter().enumerate() {
        assert!(!selection[..i].contains(seat), "duplicate {seat}");
        assert!(!engine.is_occupied(seat), "{seat} is occupied");
        assert!(engine.layout().contains(seat));
    }
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_invariants_hold_for_any_toggle_sequence(
        mut engine in arb_engine(),
        seats in prop::collection::vec(arb_seat(), 0..64),
    ) {
        for seat in seats {
            let _ = engine.toggle(seat);
            assert_invariants(&engine);
        }
    }

    #[test]
    fn toggle_follows_deselect_append_evict_rules(
        mut engine in arb_engine(),
        seats in prop::collection::vec(arb_seat(), 1..48),
    ) {
        for seat in seats {
            let before = engine.selection().to_vec();
            let capacity = engine.capacity() as usize;

            match engine.toggle(seat).map(|s| s.to_vec()) {
                Err(SeatError::InvalidSeat { reason, .. }) => {
                    prop_assert!(reason == SeatRejection::Occupied || reason == SeatRejection::OutOfBounds);
                    prop_assert_eq!(engine.selection(), before.as_slice());
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
                Ok(after) => {
                    if let Some(index) = before.iter().position(|s| *s == seat) {
                        let mut expected = before.clone();
                        expected.remove(index);
                        prop_assert_eq!(after, expected);
                    } else if before.len() < capacity {
                        let mut expected = before.clone();
                        expected.push(seat);
                        prop_assert_eq!(after, expected);
                    } else {
                        let mut expected = before[1..].to_vec();
                        expected.push(seat);
                        prop_assert_eq!(after, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn occupied_seats_are_always_refused(mut engine in arb_engine(), pick in any::<prop::sample::Index>()) {
        let occupied: Vec<SeatId> = engine.occupied().iter().copied().collect();
        prop_assume!(!occupied.is_empty());
        let seat = occupied[pick.index(occupied.len())];
        let before = engine.selection().to_vec();

        let err = engine.toggle(seat).unwrap_err();
        prop_assert!(
            matches!(err, SeatError::InvalidSeat { reason: SeatRejection::Occupied, .. }),
            "expected an occupied-seat rejection"
        );
        prop_assert_eq!(engine.selection(), before.as_slice());
    }

    #[test]
    fn set_capacity_resets_selection(
        mut engine in arb_engine(),
        seats in prop::collection::vec(arb_seat(), 0..16),
        capacity in 1u32..=9,
    ) {
        for seat in seats {
            let _ = engine.toggle(seat);
        }
        engine.set_capacity(capacity).unwrap();
        prop_assert!(engine.selection().is_empty());
        prop_assert_eq!(engine.capacity(), capacity);
    }

    #[test]
    fn generation_stays_in_range(seed in any::<u64>(), min in 0usize..=30, span in 0usize..=20) {
        let mut engine = SeatSelectionEngine::seeded(1, seed).unwrap();
        let policy = OccupancyPolicy::new(min, min + span);
        engine.generate(SeatLayout::default(), policy);

        let occupied = engine.occupied().len();
        prop_assert!(occupied >= min.min(48));
        prop_assert!(occupied <= (min + span).min(48));
        prop_assert!(engine.occupied().iter().all(|s| engine.layout().contains(s)));
    }

    #[test]
    fn default_policy_on_default_grid(seed in any::<u64>()) {
        let mut engine = SeatSelectionEngine::seeded(1, seed).unwrap();
        engine.generate(SeatLayout::default(), OccupancyPolicy::default());
        prop_assert!((10..=24).contains(&engine.occupied().len()));
    }
}
