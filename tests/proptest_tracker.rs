//! Property-based tests for the sensor bar tracker.
//!
//! Covers:
//! - two visible dots are returned and their separation recorded
//! - a lost secondary dot is predicted from the last separation
//! - a lost primary dot promotes the secondary and negates the separation
//! - without dots nothing is reported

use proptest::prelude::*;
use wiimote_api::ir::{IrData, IrDot, SensorBarTracker, IR_DOT_COUNT};

fn dots(positions: &[(usize, u16, u16)]) -> [Option<IrDot>; IR_DOT_COUNT] {
    let mut dots = [None; IR_DOT_COUNT];
    for &(index, x, y) in positions {
        dots[index] = Some(IrDot::at(x, y));
    }
    dots
}

#[test]
fn test_tracks_and_predicts() {
    let mut tracker = SensorBarTracker::default();

    let [first, second] = tracker
        .update(&dots(&[(0, 100, 100), (1, 300, 100)]), true)
        .unwrap();
    assert_eq!((first.x, first.y, first.index), (100.0, 100.0, Some(0)));
    assert_eq!((second.x, second.y, second.index), (300.0, 100.0, Some(1)));
    assert_eq!(tracker.last_separation(), [200.0, 0.0]);

    let [first, predicted] = tracker.update(&dots(&[(0, 110, 100)]), true).unwrap();
    assert_eq!(first.index, Some(0));
    assert_eq!((predicted.x, predicted.y, predicted.index), (310.0, 100.0, None));

    assert!(tracker.update(&dots(&[(0, 110, 100)]), false).is_none());
    assert_eq!(tracker.last_separation(), [0.0, 0.0]);
}

#[test]
fn test_lost_primary_promotes_secondary() {
    let mut tracker = SensorBarTracker::default();
    tracker.update(&dots(&[(0, 100, 100), (1, 300, 120)]), true);

    let [primary, predicted] = tracker.update(&dots(&[(1, 300, 120)]), true).unwrap();

    assert_eq!(primary.index, Some(1));
    assert_eq!((predicted.x, predicted.y), (100.0, 100.0));
    assert_eq!(tracker.indices(), [Some(1), None]);
}

#[test]
fn test_midpoint() {
    let mut ir = IrData::default();
    let mut data = [0xFF; 12];
    // Dot 0 at (0, 0), dot 1 at (1023, 767)
    data[0..3].copy_from_slice(&[0x00, 0x00, 0x00]);
    data[3..6].copy_from_slice(&[0xFF, 0xFF, 0b1011_0000]);
    assert!(ir.interpret(&data));

    let [x, y] = ir.midpoint(false).unwrap();

    assert!((x - 0.5).abs() < 1e-6);
    assert!((y - 0.5).abs() < 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Any two visible dots are tracked, the primary one in the lower slot.
    #[test]
    fn prop_two_dots_tracked(
        slots in proptest::sample::subsequence(vec![0usize, 1, 2, 3], 2),
        positions in proptest::array::uniform4((0u16..1024, 0u16..768)),
    ) {
        let visible: Vec<_> = slots
            .iter()
            .map(|&slot| (slot, positions[slot].0, positions[slot].1))
            .collect();
        let mut tracker = SensorBarTracker::default();

        let [primary, secondary] = tracker.update(&dots(&visible), false).unwrap();

        prop_assert_eq!(primary.index, Some(slots[0]));
        prop_assert_eq!(secondary.index, Some(slots[1]));
        prop_assert_eq!(
            tracker.last_separation(),
            [secondary.x - primary.x, secondary.y - primary.y]
        );
    }

    /// The predicted dot keeps the separation of the last full update.
    #[test]
    fn prop_prediction_keeps_separation(
        start in (0u16..1024, 0u16..768),
        other in (0u16..1024, 0u16..768),
        moved in (0u16..1024, 0u16..768),
    ) {
        let mut tracker = SensorBarTracker::default();
        tracker.update(&dots(&[(0, start.0, start.1), (1, other.0, other.1)]), true);
        let separation = tracker.last_separation();

        let [primary, predicted] = tracker.update(&dots(&[(0, moved.0, moved.1)]), true).unwrap();

        prop_assert_eq!(predicted.index, None);
        prop_assert_eq!(predicted.x - primary.x, separation[0]);
        prop_assert_eq!(predicted.y - primary.y, separation[1]);
    }

    /// Without visible dots the tracker reports nothing.
    #[test]
    fn prop_no_dots(predict: bool) {
        let mut tracker = SensorBarTracker::default();
        tracker.update(&dots(&[(2, 10, 10), (3, 20, 20)]), predict);

        prop_assert!(tracker.update(&dots(&[]), predict).is_none());
        prop_assert_eq!(tracker.last_separation(), [0.0, 0.0]);
    }
}
