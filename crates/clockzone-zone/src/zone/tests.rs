//! Tests for zones, guard translation and synchronization.

use clockzone_core::{
    encode, Bound, Update, ZoneError, DBM_INF, DBM_INFINITY, LE_ZERO, LS_ZERO,
};
use clockzone_test::{clocks, eq, ge, gt, le, lt, RawMatrix};

use super::*;

fn zone(raw: Vec<Raw>) -> Zone {
    Zone::from_raw(raw).unwrap()
}

// x in [1, 4], y in [2, 6]
fn boxed_zone() -> Zone {
    zone(
        RawMatrix::new(3)
            .lower(1, Bound::le(1))
            .upper(1, Bound::le(4))
            .lower(2, Bound::le(2))
            .upper(2, Bound::le(6))
            .build(),
    )
}

// ============================================================================
// Primitive-backed Operation Tests
// ============================================================================

mod primitive_tests {
    use super::*;

    #[test]
    fn test_new_zero_zone() {
        let z: Zone = Zone::new(3, false);
        assert_eq!(z.size(), 3);
        assert_eq!(z.clock_count(), 2);
        assert!(z.raw().iter().all(|&r| r == LE_ZERO));
        assert!(z.is_valid());
    }

    #[test]
    fn test_new_delayed_zone() {
        let z: Zone = Zone::new(2, true);
        assert_eq!(z.raw(), &[LE_ZERO, LE_ZERO, DBM_INF, LE_ZERO]);
        assert_eq!(z.to_string(), "[1, 1, 2147483646, 1]");
    }

    #[test]
    fn test_unconstrained_and_init() {
        let free: Zone = Zone::unconstrained(3);
        assert!(free.is_valid());
        assert!(free.can_delay_indefinitely());
        assert_eq!(free.get(1, 2), DBM_INF);

        let mut z: Zone = Zone::new(3, false);
        z.init();
        assert_eq!(z, free);
    }

    #[test]
    fn test_from_raw_rejects_non_square() {
        assert_eq!(
            Zone::<ClosureDbm>::from_raw(vec![1, 1, 1]).unwrap_err(),
            ZoneError::NotSquare(3)
        );
        assert_eq!(
            Zone::<ClosureDbm>::from_raw(Vec::new()).unwrap_err(),
            ZoneError::NotSquare(0)
        );
    }

    #[test]
    fn test_accessors() {
        let z = boxed_zone();
        assert_eq!(z.element_at(1), z.get(0, 1));
        assert_eq!(z.element_at(3), z.get(1, 0));
        assert_eq!(z.lower_bound(1), Bound::le(1));
        assert_eq!(z.upper_bound(2), Bound::le(6));

        let values = Zone::<ClosureDbm>::new(2, true).zone_values();
        assert_eq!(values, vec![0, 0, DBM_INFINITY, 0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original: Zone = Zone::new(2, true);
        let mut copy = original.clone();
        copy.constrain_bound(1, 0, 3, false);
        assert_ne!(copy, original);
        assert!(original.upper_bound(1).is_infinite());
    }

    #[test]
    fn test_constrain_bound_idempotent() {
        let mut z: Zone = Zone::new(2, true);
        z.constrain_bound(1, 0, 5, false);
        let snapshot = z.clone();

        z.constrain_bound(1, 0, 5, false).constrain_bound(1, 0, 7, true);
        assert_eq!(z, snapshot);
    }

    #[test]
    fn test_constrain_bound_can_empty() {
        let mut z: Zone = Zone::new(2, true);
        z.constrain_bound(1, 0, 3, false);
        assert!(z.is_valid());

        z.constrain_bound(0, 1, -4, false);
        assert!(!z.is_valid());
    }

    #[test]
    fn test_constrain_raw() {
        let mut z: Zone = Zone::new(2, true);
        z.constrain_raw(1, 0, encode(8, true));
        assert_eq!(z.upper_bound(1), Bound::lt(8));
    }

    #[test]
    fn test_delay_monotonic_and_idempotent() {
        let z = boxed_zone();
        let mut delayed = z.clone();
        delayed.delay();

        assert!(z.is_subset(&delayed).unwrap());
        assert!(delayed.can_delay_indefinitely());

        let mut twice = delayed.clone();
        twice.delay();
        assert_eq!(twice, delayed);
    }

    #[test]
    fn test_free_down() {
        let mut z = boxed_zone();
        z.free_down(1);
        assert_eq!(z.lower_bound(1), Bound::LE_ZERO);
        assert_eq!(z.upper_bound(1), Bound::le(4));
        assert!(z.is_valid());
    }

    #[test]
    fn test_update_value() {
        let mut z: Zone = Zone::new(3, true);
        z.update_value(1, 0);

        assert_eq!(z.lower_bound(1), Bound::le(0));
        assert_eq!(z.upper_bound(1), Bound::le(0));
        assert!(z.upper_bound(2).is_infinite());
        assert!(z.is_valid());
    }

    #[test]
    fn test_extrapolate_max_bounds() {
        let mut z: Zone = Zone::new(2, true);
        z.constrain_bound(0, 1, -7, false);
        z.extrapolate_max_bounds(5);

        // x >= 7 widens to x > 5
        assert_eq!(z.lower_bound(1), Bound::lt(5));
        assert!(z.upper_bound(1).is_infinite());
    }

    #[test]
    fn test_extrapolate_zero_constant() {
        let mut z: Zone = Zone::new(2, true);
        z.constrain_bound(1, 0, 3, false);
        z.extrapolate_max_bounds(0);

        assert!(z.upper_bound(1).is_infinite());
        assert_eq!(z.lower_bound(1), Bound::LE_ZERO);
    }

    #[test]
    fn test_extrapolate_with() {
        let mut z = boxed_zone();
        let before = z.clone();
        z.extrapolate_with(None);
        assert_eq!(z, before);

        z.extrapolate_with(Some(3));
        assert!(z.upper_bound(1).is_infinite());
        assert!(before.is_subset(&z).unwrap());
    }

    #[test]
    fn test_subset_reflexive() {
        let z = boxed_zone();
        assert!(z.is_subset(&z).unwrap());
        assert!(z.is_subset(&Zone::unconstrained(3)).unwrap());
        assert!(!Zone::<ClosureDbm>::unconstrained(3).is_subset(&z).unwrap());
    }

    #[test]
    fn test_dimension_mismatch() {
        let small: Zone = Zone::new(2, true);
        let big: Zone = Zone::new(3, true);
        let expected = ZoneError::DimensionMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(small.is_subset(&big).unwrap_err(), expected);
        assert_eq!(small.intersects(&big).unwrap_err(), expected);
    }

    #[test]
    fn test_intersects() {
        let z = boxed_zone();
        let late = zone(RawMatrix::new(3).lower(1, Bound::le(4)).build());
        let too_late = zone(RawMatrix::new(3).lower(1, Bound::lt(4)).build());

        assert!(z.intersects(&late).unwrap());
        assert!(!z.intersects(&too_late).unwrap());
    }

    #[test]
    fn test_contains_negatives() {
        let z: Zone = Zone::new(3, true);
        assert!(!z.contains_negatives());

        let mut raw = boxed_zone().into_raw();
        raw[5] = LS_ZERO;
        assert!(zone(raw).contains_negatives());
    }
}

// ============================================================================
// Guard Translation Tests
// ============================================================================

mod translate_tests {
    use super::*;

    #[test]
    fn test_guard_round_trip() {
        let cs = clocks(&["x"]);
        let mut z: Zone = Zone::new(2, true);
        z.build_constraints_for_guard(&ge(&cs[0], 2), 1)
            .build_constraints_for_guard(&lt(&cs[0], 5), 1);

        let guards = z.build_guards_from_zone(&cs).unwrap();
        assert_eq!(guards, vec![ge(&cs[0], 2), lt(&cs[0], 5)]);
    }

    #[test]
    fn test_equality_guard() {
        let cs = clocks(&["x", "y"]);
        let mut z: Zone = Zone::unconstrained(3);
        z.build_constraints_for_guard(&eq(&cs[1], 3), 2);

        assert_eq!(z.lower_bound(2), Bound::le(3));
        assert_eq!(z.upper_bound(2), Bound::le(3));
        assert_eq!(
            z.build_guards_from_zone(&cs).unwrap(),
            vec![ge(&cs[1], 3), le(&cs[1], 3)]
        );
    }

    #[test]
    fn test_guards_from_trivial_zone() {
        let cs = clocks(&["x", "y"]);
        let z: Zone = Zone::new(3, true);
        assert!(z.build_guards_from_zone(&cs).unwrap().is_empty());
    }

    #[test]
    fn test_guards_from_zone_in_clock_order() {
        let cs = clocks(&["x", "y"]);
        let guards = boxed_zone().build_guards_from_zone(&cs).unwrap();
        assert_eq!(
            guards,
            vec![ge(&cs[0], 1), le(&cs[0], 4), ge(&cs[1], 2), le(&cs[1], 6)]
        );
    }

    #[test]
    fn test_clock_count_mismatch() {
        let z: Zone = Zone::new(3, true);
        assert_eq!(
            z.build_guards_from_zone(&clocks(&["x"])).unwrap_err(),
            ZoneError::ClockCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_constrain_guards_normalizes() {
        let cs = clocks(&["x", "y"]);
        let mut z: Zone = Zone::unconstrained(3);
        z.constrain_guards(
            &[ge(&cs[0], 1), ge(&cs[0], 2), le(&cs[1], 9), lt(&cs[1], 9)],
            &cs,
        )
        .unwrap();

        assert_eq!(z.lower_bound(1), Bound::le(2));
        assert_eq!(z.upper_bound(2), Bound::lt(9));
    }

    #[test]
    fn test_constrain_guards_unknown_clock() {
        let cs = clocks(&["x", "y"]);
        let stranger = clocks(&["z"]).remove(0);
        let mut z: Zone = Zone::new(3, true);
        let before = z.clone();

        let err = z
            .constrain_guards(&[ge(&cs[0], 1), ge(&stranger, 2)], &cs)
            .unwrap_err();
        assert_eq!(err, ZoneError::UnknownClock("z".to_string()));
        assert_eq!(z, before);
    }

    #[test]
    fn test_absolute_zone_lower_guard_on_delayed_zero() {
        let cs = clocks(&["x"]);
        let start: Zone = Zone::new(2, true);

        let abs = start.absolute_zone(&[ge(&cs[0], 2)], &cs).unwrap();
        assert_eq!(abs.lower_bound(1), Bound::le(2));
        assert!(abs.upper_bound(1).is_infinite());
        assert_eq!(start, Zone::new(2, true));
    }

    #[test]
    fn test_absolute_zone_upper_guard_on_delayed_zero() {
        let cs = clocks(&["x"]);
        let start: Zone = Zone::new(2, true);

        let abs = start.absolute_zone(&[le(&cs[0], 4)], &cs).unwrap();
        assert_eq!(abs.lower_bound(1), Bound::LE_ZERO);
        assert_eq!(abs.upper_bound(1), Bound::le(4));
    }

    #[test]
    fn test_absolute_zone_offsets_by_lower_bound() {
        let cs = clocks(&["x"]);
        let mut start: Zone = Zone::new(2, true);
        start.constrain_bound(0, 1, -2, false);

        // x >= 5 when x already waited 2 leaves 3 more
        let abs = start.absolute_zone(&[ge(&cs[0], 5)], &cs).unwrap();
        assert_eq!(abs.lower_bound(1), Bound::le(3));
        assert!(abs.upper_bound(1).is_infinite());
    }

    #[test]
    fn test_absolute_zone_strict_lower_guard() {
        let cs = clocks(&["x"]);
        let mut start: Zone = Zone::new(2, true);
        start.constrain_bound(0, 1, -2, false);

        // x > 2 when x already waited 2 needs a strictly positive delay
        let abs = start.absolute_zone(&[gt(&cs[0], 2)], &cs).unwrap();
        assert_eq!(abs.lower_bound(1), Bound::lt(0));
        assert_eq!(abs.get(0, 1), LS_ZERO);
        assert!(abs.is_valid());
    }

    #[test]
    fn test_absolute_zone_saturates_passed_lower_guard() {
        let cs = clocks(&["x"]);
        let mut start: Zone = Zone::new(2, true);
        start.constrain_bound(0, 1, -4, false);

        let abs = start.absolute_zone(&[ge(&cs[0], 2)], &cs).unwrap();
        assert_eq!(abs.lower_bound(1), Bound::LE_ZERO);
    }

    #[test]
    fn test_absolute_zone_clips_upper_bound() {
        let cs = clocks(&["x"]);
        let start = zone(
            RawMatrix::new(2)
                .lower(1, Bound::le(1))
                .upper(1, Bound::le(4))
                .build(),
        );

        let loose = start.absolute_zone(&[le(&cs[0], 10)], &cs).unwrap();
        assert_eq!(loose.lower_bound(1), Bound::LE_ZERO);
        assert_eq!(loose.upper_bound(1), Bound::le(3));

        let tight = start.absolute_zone(&[le(&cs[0], 3)], &cs).unwrap();
        assert_eq!(tight.upper_bound(1), Bound::le(2));
    }

    #[test]
    fn test_absolute_zone_frees_unvisited_clocks() {
        let cs = clocks(&["x", "y"]);
        let start = boxed_zone();

        let abs = start.absolute_zone(&[le(&cs[0], 3)], &cs).unwrap();
        assert!(abs.is_valid());
        assert_eq!(abs.upper_bound(1), Bound::le(2));
        assert_eq!(abs.lower_bound(2), Bound::LE_ZERO);
        assert_eq!(abs.upper_bound(2), Bound::le(4));
        assert_eq!(start, boxed_zone());
    }

    #[test]
    fn test_absolute_zone_unknown_clock() {
        let cs = clocks(&["x"]);
        let other = clocks(&["y"]);
        let start: Zone = Zone::new(2, true);

        assert_eq!(
            start.absolute_zone(&[ge(&other[0], 1)], &cs).unwrap_err(),
            ZoneError::UnknownClock("y".to_string())
        );
    }

    #[test]
    fn test_lower_bound_to_upper_bound() {
        assert_eq!(<Zone>::lower_bound_to_upper_bound(encode(-2, false)), encode(2, false));
        assert_eq!(<Zone>::lower_bound_to_upper_bound(encode(-2, true)), encode(2, true));
    }

    #[test]
    fn test_apply_updates() {
        let cs = clocks(&["x", "y"]);
        let mut z: Zone = Zone::new(3, true);
        z.apply_updates(&[Update::new(cs[0].clone(), 3)], &cs).unwrap();

        assert_eq!(z.lower_bound(1), Bound::le(3));
        assert_eq!(z.upper_bound(1), Bound::le(3));
        assert!(z.upper_bound(2).is_infinite());
    }

    #[test]
    fn test_apply_updates_rejects_before_mutating() {
        let cs = clocks(&["x", "y"]);
        let stranger = clocks(&["w"]).remove(0);
        let mut z: Zone = Zone::new(3, true);
        let before = z.clone();

        let result = z.apply_updates(
            &[Update::new(cs[0].clone(), 3), Update::new(stranger, 1)],
            &cs,
        );
        assert!(result.is_err());
        assert_eq!(z, before);
    }
}

// ============================================================================
// Synchronization Tests
// ============================================================================

mod sync_tests {
    use super::*;

    // single clock within [lower, upper]
    fn interval(lower: i32, upper: i32) -> Zone {
        zone(
            RawMatrix::new(2)
                .lower(1, Bound::le(lower))
                .upper(1, Bound::le(upper))
                .build(),
        )
    }

    #[test]
    fn test_max_raw_delay() {
        // x is 3 wide, y is 4 wide
        assert_eq!(boxed_zone().max_raw_delay(), encode(3, false));
        assert_eq!(Zone::<ClosureDbm>::new(3, true).max_raw_delay(), DBM_INF);
    }

    #[test]
    fn test_can_delay_indefinitely() {
        let mut z: Zone = Zone::new(3, true);
        assert!(z.can_delay_indefinitely());

        z.constrain_bound(2, 0, 10, false);
        assert!(!z.can_delay_indefinitely());
    }

    #[test]
    fn test_is_urgent() {
        assert!(Zone::<ClosureDbm>::new(3, false).is_urgent());
        assert!(zone(RawMatrix::new(3).exact(1, 2).exact(2, 5).build()).is_urgent());
        assert!(!boxed_zone().is_urgent());
        assert!(!Zone::<ClosureDbm>::new(3, true).is_urgent());
    }

    #[test]
    fn test_raw_row_max_and_column_min() {
        let z = boxed_zone();
        assert_eq!(z.raw_row_max(), encode(-2, false));
        assert_eq!(z.raw_column_min(), encode(4, false));

        let free: Zone = Zone::new(2, true);
        assert_eq!(free.raw_row_max(), LE_ZERO);
        assert_eq!(free.raw_column_min(), DBM_INF);
    }

    #[test]
    fn test_absolute_zones_intersect() {
        let early = interval(1, 4);
        let overlapping = interval(3, 8);
        let disjoint = interval(5, 8);

        assert!(early.absolute_zones_intersect(&overlapping));
        assert!(overlapping.absolute_zones_intersect(&early));
        assert!(!early.absolute_zones_intersect(&disjoint));
    }

    #[test]
    fn test_timeline_empty_intersection() {
        let arrival = zone(RawMatrix::new(2).exact(1, 5).build());
        let guard = zone(RawMatrix::new(2).upper(1, Bound::le(3)).build());

        assert!(arrival.create_timeline(&guard).unwrap().is_none());
    }

    #[test]
    fn test_timeline_interval() {
        let arrival = zone(RawMatrix::new(2).upper(1, Bound::le(2)).build());
        let guard = interval(3, 6);

        let timeline = arrival.create_timeline(&guard).unwrap().unwrap();
        assert_eq!(timeline.size(), 2);
        assert_eq!(timeline.raw(), &[LE_ZERO, encode(-1, false), encode(6, false), LE_ZERO]);
        assert!(timeline.is_valid());
    }

    #[test]
    fn test_timeline_start_clamped() {
        let arrival = zone(RawMatrix::new(2).upper(1, Bound::le(5)).build());
        let guard = zone(RawMatrix::new(2).lower(1, Bound::le(1)).build());

        let timeline = arrival.create_timeline(&guard).unwrap().unwrap();
        assert_eq!(timeline.get(0, 1), LE_ZERO);
        assert_eq!(timeline.get(1, 0), DBM_INF);
    }

    #[test]
    fn test_timeline_dimension_mismatch() {
        let arrival: Zone = Zone::new(2, true);
        let guard: Zone = Zone::new(3, true);
        assert!(matches!(
            arrival.create_timeline(&guard),
            Err(ZoneError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_update_lower_bounds() {
        let previous = zone(
            RawMatrix::new(3)
                .lower(1, Bound::le(1))
                .lower(2, Bound::le(2))
                .build(),
        );
        let mut z: Zone = Zone::unconstrained(3);
        z.update_lower_bounds(&previous, encode(-2, false)).unwrap();

        assert_eq!(z.lower_bound(1), Bound::le(3));
        assert_eq!(z.lower_bound(2), Bound::le(4));

        let snapshot = z.clone();
        z.update_lower_bounds(&previous, encode(-2, false)).unwrap();
        assert_eq!(z, snapshot);
    }

    #[test]
    fn test_update_lower_bounds_dimension_mismatch() {
        let previous: Zone = Zone::new(2, true);
        let mut z: Zone = Zone::new(3, true);
        assert!(z.update_lower_bounds(&previous, LE_ZERO).is_err());
    }

    #[test]
    fn test_update_arrival_zone() {
        let mut arrival: Zone = Zone::new(2, true);
        let timeline = zone(vec![LE_ZERO, LE_ZERO, encode(6, false), LE_ZERO]);

        arrival.update_arrival_zone(&timeline).unwrap();
        assert!(arrival.is_valid());
        assert_eq!(arrival, Zone::new(2, false));
    }

    #[test]
    fn test_update_arrival_zone_rejects_non_timeline() {
        let mut arrival: Zone = Zone::new(2, true);
        let not_a_timeline: Zone = Zone::new(3, true);
        assert_eq!(
            arrival.update_arrival_zone(&not_a_timeline).unwrap_err(),
            ZoneError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }
}

// ============================================================================
// Dump Tests
// ============================================================================

mod dump_tests {
    use super::*;

    #[test]
    fn test_raw_dump() {
        let z: Zone = Zone::new(2, true);
        let expected = "---------------------------------------\n\
                        1             1\n\
                        2147483646    1\n\
                        ---------------------------------------";
        assert_eq!(z.dump(DumpOptions::default()), expected);
    }

    #[test]
    fn test_decoded_dump() {
        let z: Zone = Zone::new(2, true);
        let text = z.dump(DumpOptions {
            column_width: 6,
            ..DumpOptions::decoded()
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "0 ≤   0 ≤");
        assert_eq!(lines[2], "1073741823 <0 ≤");
    }
}
