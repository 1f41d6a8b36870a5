use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use proptest::prelude::*;
use tempora::{DayRange, DaySeeker, Period, Relation, RelationFilter, SeekDirection, TimeRange};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Ranges over a small grid so shared and touching boundaries are common.
fn small_range() -> impl Strategy<Value = TimeRange> {
    (0i64..12, 0i64..6).prop_map(|(start, len)| {
        let start = base() + TimeDelta::hours(start);
        TimeRange::new(start, start + TimeDelta::hours(len)).unwrap()
    })
}

/// Each relation stated directly from the boundaries of target `t` and reference `r`.
fn holds(relation: Relation, t: &TimeRange, r: &TimeRange) -> bool {
    let (ts, te, rs, re) = (t.start(), t.end(), r.start(), r.end());
    let exact = ts == rs && te == re;
    let moment_in_reference = ts == te && rs <= ts && te <= re && !exact;
    let reference_moment_inside = rs == re && ts <= rs && re <= te && !exact;
    let general = te > rs && ts < re && !exact && !moment_in_reference && !reference_moment_inside;

    match relation {
        Relation::After => te < rs,
        Relation::Before => ts > re,
        Relation::ExactMatch => exact,
        Relation::StartTouching => {
            (te == rs && ts != re && rs != re) || moment_in_reference
        }
        Relation::EndTouching => (ts == re && te != rs && ts != te) || reference_moment_inside,
        Relation::EnclosingStartTouching => general && ts == rs && te < re,
        Relation::EnclosingEndTouching => general && te == re && ts > rs,
        Relation::Enclosing => general && rs < ts && te < re,
        Relation::InsideStartTouching => general && ts == rs && te > re,
        Relation::InsideEndTouching => general && te == re && ts < rs,
        Relation::Inside => general && ts < rs && re < te,
        Relation::StartInside => general && ts < rs && te < re,
        Relation::EndInside => general && rs < ts && re < te,
    }
}

proptest! {
    #[test]
    fn prop_exactly_one_relation(t in small_range(), r in small_range()) {
        let matching: Vec<Relation> = Relation::ALL
            .iter()
            .copied()
            .filter(|relation| holds(*relation, &t, &r))
            .collect();
        prop_assert_eq!(matching.len(), 1, "{} vs {}: {:?}", t, r, matching);
        prop_assert_eq!(t.relation_to(&r), matching[0]);
    }

    #[test]
    fn prop_relation_is_anti_symmetric(a in small_range(), b in small_range()) {
        prop_assert_eq!(b.relation_to(&a), a.relation_to(&b).inverse());
    }

    #[test]
    fn prop_overlap_agrees_with_relation(a in small_range(), b in small_range()) {
        prop_assert_eq!(a.overlaps(&b), a.relation_to(&b).is_overlapping());
    }
}

fn limits() -> TimeRange {
    let at = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    TimeRange::new(at(1990), at(2060)).unwrap()
}

fn day_in_limits() -> impl Strategy<Value = DayRange> {
    (0i64..14_600).prop_map(|offset| {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + TimeDelta::days(offset);
        DayRange::new(date).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_filter_free_round_trip(start in day_in_limits(), offset in -400i64..400) {
        let seeker = DaySeeker::new(RelationFilter::new().with_limits(limits()), SeekDirection::Forward);
        let found = seeker.find(&start, offset).unwrap().unwrap();
        prop_assert_eq!(found.date(), start.date() + TimeDelta::days(offset));
        prop_assert_eq!(seeker.find(&found, -offset).unwrap(), Some(start));
    }

    #[test]
    fn prop_working_days_never_weekend(start in day_in_limits(), offset in -60i64..60) {
        prop_assume!(offset != 0);
        let filter = RelationFilter::new().working_days().with_limits(limits());
        for direction in [SeekDirection::Forward, SeekDirection::Backward] {
            let seeker = DaySeeker::new(filter.clone(), direction);
            let found = seeker.find(&start, offset).unwrap().unwrap();
            prop_assert!(!matches!(found.date().weekday(), Weekday::Sat | Weekday::Sun));
        }
    }
}
