//! End-time computation checked against an independent re-derivation of the
//! published timetable policy.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use cinema_backend::services::scheduling::compute_session_end;

fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap())
}

/// Oracle: hours and leftover minutes handled separately, the leftover
/// bucketed onto {:00, :30} after a 15 minute cleaning pad.
fn expected_end(start: NaiveDateTime, run_time_mins: i32) -> NaiveDateTime {
    let run_time = i64::from(run_time_mins);
    let rem = run_time % 60;
    let start_minute = i64::from(start.time().minute());

    let raw = (start_minute + rem + 15) % 60;
    let mut carry = (start_minute + rem) / 60;
    let offset = if raw > 30 {
        carry += 1;
        0
    } else if raw != 0 {
        30
    } else {
        0
    };

    start + Duration::hours(run_time / 60 + carry) + Duration::minutes(offset)
}

#[test]
fn matches_the_oracle_across_the_full_grid() {
    for start_hour in 0..24u32 {
        for start_minute in 0..60u32 {
            for run_time in [1, 29, 30, 59, 60, 61, 90, 105, 119, 120, 125, 180, 240, 300] {
                let start = at((2026, 5, 20), (start_hour, start_minute));
                assert_eq!(
                    compute_session_end(start, run_time),
                    expected_end(start, run_time),
                    "start {start} runtime {run_time}"
                );
            }
        }
    }
}

#[test]
fn worked_examples_from_the_timetable() {
    assert_eq!(
        compute_session_end(at((2026, 3, 14), (14, 0)), 125),
        at((2026, 3, 14), (16, 30))
    );
    assert_eq!(
        compute_session_end(at((2026, 3, 14), (19, 45)), 90),
        at((2026, 3, 14), (22, 15))
    );
    assert_eq!(
        compute_session_end(at((2026, 3, 14), (10, 0)), 105),
        at((2026, 3, 14), (11, 0))
    );
}

#[test]
fn published_timetable_slots_stay_on_half_hour_marks() {
    for start_minute in [0u32, 30] {
        for run_time in 1..=300 {
            let end = compute_session_end(at((2026, 5, 20), (11, start_minute)), run_time);
            assert!(end.time().minute() == 0 || end.time().minute() == 30);
        }
    }
}

#[test]
fn sessions_crossing_midnight_land_on_the_next_date() {
    let end = compute_session_end(at((2026, 2, 28), (23, 30)), 100);
    assert_eq!(end, at((2026, 3, 1), (2, 0)));
}
