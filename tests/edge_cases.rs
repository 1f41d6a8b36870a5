use chrono::{Month, NaiveDate, NaiveDateTime, TimeDelta};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tempora::{
    CalendarVisitor, DayRange, DaySeeker, GregorianCalendar, Granule, MonthSeeker, Period,
    RelationFilter, SeekDirection, SeekerBuilder, TimeBlock, TimeError, TimePeriodChain,
    TimeRange, VisitOutcome, VisitStrategy,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> DayRange {
    DayRange::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
}

/// Test 1: One seeker shared by many threads
#[test]
fn test_concurrent_finds_share_one_seeker() {
    let seeker = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
    let start = day(2020, 1, 10);
    let expected = seeker.find(&start, 20).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| seeker.find(&start, 20).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Test 2: Unbounded limits with a filter that never matches
#[test]
fn test_unsatisfiable_filter_is_bounded_by_ceiling() {
    let seeker = SeekerBuilder::new()
        .filter(RelationFilter::new().with_months([Month::April]).with_days([31]))
        .max_visits(Some(5_000))
        .build_day_seeker()
        .unwrap();
    let result = seeker.find(&day(2020, 1, 1), 1);
    assert_eq!(result, Err(TimeError::VisitLimitExceeded { limit: 5_000 }));
}

/// Test 3: The same filter over bounded limits exhausts normally
#[test]
fn test_unsatisfiable_filter_with_limits_is_none() {
    let filter = RelationFilter::new()
        .with_months([Month::April])
        .with_days([31])
        .with_limits(TimeRange::new(at(2000, 1, 1), at(2030, 1, 1)).unwrap());
    let seeker = DaySeeker::new(filter, SeekDirection::Forward);
    assert_eq!(seeker.find(&day(2020, 1, 1), 1).unwrap(), None);
    assert_eq!(seeker.find(&day(2020, 1, 1), -1).unwrap(), None);
}

/// Test 4: Leap days
#[test]
fn test_day_of_month_filter_across_leap_years() {
    let filter = RelationFilter::new().with_months([Month::February]).with_days([29]);
    let seeker = DaySeeker::new(filter, SeekDirection::Forward);

    let dates: Vec<_> = (1..=3)
        .map(|n| seeker.find(&day(2019, 1, 1), n).unwrap().unwrap().date())
        .collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2028, 2, 29).unwrap(),
        ]
    );
}

/// Test 5: Large offsets
#[test]
fn test_large_offset() {
    let seeker = DaySeeker::new(RelationFilter::new(), SeekDirection::Forward);
    let found = seeker.find(&day(2000, 1, 1), 36_525).unwrap().unwrap();
    assert_eq!(found.date(), NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());

    let back = seeker.find(&found, -36_525).unwrap();
    assert_eq!(back, Some(day(2000, 1, 1)));
}

/// Test 6: Edges of the representable calendar
#[test]
fn test_representable_extremes() {
    let seeker = DaySeeker::new(RelationFilter::new(), SeekDirection::Forward);
    let last = DayRange::new(NaiveDate::MAX.pred_opt().unwrap()).unwrap();
    assert_eq!(seeker.find(&last, 1).unwrap(), None);

    let first = DayRange::new(NaiveDate::MIN).unwrap();
    assert_eq!(seeker.find(&first, -1).unwrap(), None);
    assert_eq!(
        seeker.find(&first, 1).unwrap().map(|d| d.date()),
        NaiveDate::MIN.succ_opt()
    );

    assert!(TimeRange::ANYTIME.is_anytime());
    assert!(TimeRange::ANYTIME.shift(TimeDelta::days(1)).is_err());
}

/// Test 7: Cancellation from another thread
#[test]
fn test_cancellation_stops_walk() {
    let cancelled = AtomicBool::new(false);
    // Matches nothing, so only the flag or the limits end the walk
    let filter = RelationFilter::new()
        .with_months([Month::June])
        .with_days([31])
        .with_limits(TimeRange::new(at(2020, 1, 1), at(4000, 1, 1)).unwrap());
    let seeker = DaySeeker::new(filter, SeekDirection::Forward).with_max_visits(None);

    thread::scope(|scope| {
        let handle = scope.spawn(|| seeker.find_cancellable(&day(2020, 1, 1), 1, &cancelled));
        cancelled.store(true, Ordering::Relaxed);
        assert_eq!(handle.join().unwrap().unwrap(), None);
    });
}

/// Test 8: Custom strategies see every pruned level in the report
#[test]
fn test_custom_strategy_report() {
    struct FirstOfMonth;

    impl VisitStrategy for FirstOfMonth {
        type Context = Vec<NaiveDate>;

        fn enter_days(&self, month: &tempora::MonthRange, _firsts: &Vec<NaiveDate>) -> bool {
            month.month() != Month::December
        }

        fn on_visit(&self, candidate: &Granule, firsts: &mut Vec<NaiveDate>) -> bool {
            if let Some(day) = candidate.as_day()
                && day.day() == 1
            {
                firsts.push(day.date());
            }
            true
        }
    }

    let mut firsts = Vec::new();
    let report = CalendarVisitor::new(GregorianCalendar::default())
        .visit(
            &TimeRange::new(at(2020, 1, 1), at(2021, 1, 1)).unwrap(),
            SeekDirection::Forward,
            &FirstOfMonth,
            &mut firsts,
        )
        .unwrap();

    assert_eq!(firsts.len(), 11);
    assert_eq!(report.outcome, VisitOutcome::Exhausted);
    assert_eq!(report.stats.pruned, 1);
    assert_eq!(report.stats.visits, 366 - 31);
}

/// Test 9: Chains reject gaps and overlaps at construction
#[test]
fn test_chain_rejects_non_contiguous() {
    let hour = TimeDelta::hours(1);
    let first = TimeBlock::new(at(2020, 1, 1), hour).unwrap();
    let overlapping = TimeBlock::new(at(2020, 1, 1) + TimeDelta::minutes(30), hour).unwrap();

    let result = TimePeriodChain::from_periods([first, overlapping]);
    assert!(matches!(result, Err(TimeError::NonContiguous { index: 1, .. })));

    let empty = TimePeriodChain::<TimeBlock>::new();
    assert!(empty.span().is_none());
    assert_eq!(empty.duration(), TimeDelta::zero());
}

/// Test 10: Month seeking with limits derived from a collection
#[test]
fn test_month_seek_within_derived_limits() {
    let calendar = GregorianCalendar::default();
    let months: tempora::TimePeriodCollection<tempora::MonthRange> = [Month::March, Month::June]
        .into_iter()
        .map(|m| tempora::MonthRange::new(2020, m, &calendar).unwrap())
        .collect();
    let filter = RelationFilter::new().with_limits_from(&months).unwrap();
    let seeker = MonthSeeker::new(filter, SeekDirection::Forward);

    let found = seeker.find_month(2020, Month::March, 3).unwrap().unwrap();
    assert_eq!(found.month(), Month::June);
    assert!(found.end() <= months.max_end().unwrap());
    assert_eq!(seeker.find_month(2020, Month::March, 4).unwrap(), None);
}
