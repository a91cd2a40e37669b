//! Session scheduling engine.
//!
//! Owns the mapping from (movie runtime, requested start) to the displayed
//! end instant. The end time pads the literal end of the film with a cleaning
//! buffer and snaps the displayed minutes to a half-hour boundary; the exact
//! branching below is the product policy and is preserved verbatim, not
//! simplified into "nicer" rounding.

use chrono::{Duration, NaiveDateTime, Timelike};
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::session::{Session, SessionResponse};
use crate::services::catalog::MovieCatalog;
use crate::types::MovieId;

/// Minutes reserved for cleaning between sessions, folded into the
/// minute-rounding step.
const CLEANING_BUFFER_MINS: i64 = 15;

/// Computes the displayed end instant for a session.
///
/// Decomposes the runtime into whole hours and leftover minutes, buckets the
/// buffered minute remainder onto {:00, :30}, and adds the resulting offset
/// to the start instant. Date arithmetic is calendar-aware, so sessions that
/// cross midnight (or a month/year boundary) land on the following date.
pub fn compute_session_end(start: NaiveDateTime, run_time_mins: i32) -> NaiveDateTime {
    let run_time = i64::from(run_time_mins);
    let run_time_hours = run_time / 60;
    let run_time_rem = run_time % 60;
    let start_minute = i64::from(start.time().minute());

    let raw = (start_minute + run_time_rem + CLEANING_BUFFER_MINS) % 60;
    let mut carry_hours = (start_minute + run_time_rem) / 60;

    // raw of exactly 0 stays at 0; only nonzero remainders at or below the
    // half hour snap to 30.
    let minute_offset = if raw > 30 {
        carry_hours += 1;
        0
    } else if raw != 0 {
        30
    } else {
        0
    };

    start
        + Duration::hours(run_time_hours + carry_hours)
        + Duration::minutes(minute_offset)
}

/// Annotates raw session rows with their derived end instants, resolving
/// runtimes through the catalog façade. Lookups are memoized per movie so a
/// listing of one movie's sessions costs a single catalog read.
pub async fn annotate_sessions(
    catalog: &dyn MovieCatalog,
    sessions: Vec<Session>,
) -> Result<Vec<SessionResponse>, AppError> {
    let mut run_times: HashMap<MovieId, i32> = HashMap::new();
    let mut annotated = Vec::with_capacity(sessions.len());

    for session in sessions {
        let run_time = match run_times.get(&session.movie_id) {
            Some(cached) => *cached,
            None => {
                let fetched = catalog.run_time_minutes(session.movie_id).await?;
                run_times.insert(session.movie_id, fetched);
                fetched
            }
        };
        let end = compute_session_end(session.session_time, run_time);
        annotated.push(SessionResponse::from_parts(session, end));
    }

    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockMovieCatalog;
    use crate::types::{SessionId, TheatreId};
    use chrono::{NaiveDate, NaiveTime};

    fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap())
    }

    #[test]
    fn two_hour_five_movie_at_two_ends_at_four_thirty() {
        // raw = (0 + 5 + 15) % 60 = 20 -> snap to 30; hours = 2.
        let end = compute_session_end(at((2026, 3, 14), (14, 0)), 125);
        assert_eq!(end, at((2026, 3, 14), (16, 30)));
    }

    #[test]
    fn ninety_minute_movie_at_quarter_to_eight() {
        // minute 45: raw = (45 + 30 + 15) % 60 = 30 -> snap to 30;
        // carry = (45 + 30) / 60 = 1; added hours = 1 + 1 = 2.
        let end = compute_session_end(at((2026, 3, 14), (19, 45)), 90);
        assert_eq!(end, at((2026, 3, 14), (22, 15)));
    }

    #[test]
    fn minute_bucket_is_added_to_the_start_not_substituted_for_it() {
        // The {0, 30} bucket is an offset on the start instant. Substituting
        // it for the start's minute field would give 21:30 here; the policy
        // adds it after the carry, giving 22:15.
        let end = compute_session_end(at((2026, 3, 14), (19, 45)), 90);
        assert_eq!(end, at((2026, 3, 14), (22, 15)));
        assert_ne!(end, at((2026, 3, 14), (21, 30)));
    }

    #[test]
    fn raw_of_exactly_zero_is_not_bumped_to_thirty() {
        // minute 0, rem 45: raw = (0 + 45 + 15) % 60 = 0 -> minutes stay 0.
        let end = compute_session_end(at((2026, 3, 14), (10, 0)), 105);
        assert_eq!(end, at((2026, 3, 14), (11, 0)));
    }

    #[test]
    fn raw_above_thirty_rounds_to_the_next_hour() {
        // minute 30, rem 0: raw = 45 > 30 -> zero minutes, extra hour.
        let end = compute_session_end(at((2026, 3, 14), (10, 30)), 120);
        assert_eq!(end, at((2026, 3, 14), (13, 30)));
    }

    #[test]
    fn exact_hour_runtime_gets_the_buffer_snap() {
        // rem 0, minute 0: raw = 15 -> snap to 30.
        let end = compute_session_end(at((2026, 3, 14), (10, 0)), 120);
        assert_eq!(end, at((2026, 3, 14), (12, 30)));
    }

    #[test]
    fn end_rolls_over_midnight() {
        let end = compute_session_end(at((2026, 3, 14), (23, 30)), 100);
        assert_eq!(end, at((2026, 3, 15), (2, 0)));
    }

    #[test]
    fn end_rolls_over_year_boundary() {
        let end = compute_session_end(at((2025, 12, 31), (23, 45)), 30);
        assert_eq!(end, at((2026, 1, 1), (1, 15)));
    }

    #[test]
    fn half_hour_aligned_starts_always_display_whole_or_half_hours() {
        // The published timetable only uses :00/:30 starts; for those the
        // displayed end minute is always 0 or 30, whatever the runtime.
        for start_minute in [0u32, 30] {
            for start_hour in 0..24u32 {
                for run_time in 1..=300 {
                    let start = at((2026, 6, 1), (start_hour, start_minute));
                    let end = compute_session_end(start, run_time);
                    assert!(
                        end.time().minute() == 0 || end.time().minute() == 30,
                        "start {start} runtime {run_time} gave end {end}"
                    );
                }
            }
        }
    }

    #[test]
    fn end_is_never_before_the_padded_film_end_for_short_remainders() {
        // Where the buffered remainder does not wrap the hour, the displayed
        // end covers the full runtime. (Runtimes whose leftover minutes push
        // start_minute + rem + 15 past 60 under-shoot by construction of the
        // formula; that behavior is preserved, not fixed.)
        for start_minute in [0u32, 30] {
            for run_time in 1..=300i32 {
                let rem = i64::from(run_time) % 60;
                if i64::from(start_minute) + rem + 15 >= 60 {
                    continue;
                }
                let start = at((2026, 6, 1), (12, start_minute));
                let end = compute_session_end(start, run_time);
                assert!(
                    end >= start + Duration::minutes(i64::from(run_time)),
                    "start minute {start_minute} runtime {run_time} gave end {end}"
                );
            }
        }
    }

    fn session(id: i64, movie: i64, start: NaiveDateTime) -> Session {
        Session {
            id: SessionId::new(id),
            theatre_id: TheatreId::new(1),
            movie_id: MovieId::new(movie),
            session_time: start,
            seats_sold: 0,
        }
    }

    #[tokio::test]
    async fn annotate_resolves_each_movie_once() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_run_time_minutes()
            .withf(|id| *id == MovieId::new(7))
            .times(1)
            .returning(|_| Ok(125));

        let sessions = vec![
            session(1, 7, at((2026, 3, 14), (14, 0))),
            session(2, 7, at((2026, 3, 14), (18, 0))),
        ];

        let annotated = annotate_sessions(&catalog, sessions).await.unwrap();
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].session_end_time, "16:30");
        assert_eq!(annotated[1].session_end_time, "20:30");
    }

    #[tokio::test]
    async fn two_sessions_may_share_a_theatre_and_time_slot() {
        // Nothing in the domain rejects a double booking; both sessions come
        // back annotated.
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_run_time_minutes().returning(|_| Ok(90));

        let start = at((2026, 3, 14), (19, 45));
        let annotated = annotate_sessions(&catalog, vec![session(1, 7, start), session(2, 7, start)])
            .await
            .unwrap();
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].theatre_id, annotated[1].theatre_id);
        assert_eq!(annotated[0].session_start_time, annotated[1].session_start_time);
    }

    #[tokio::test]
    async fn annotate_propagates_missing_movie() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_run_time_minutes()
            .returning(|_| Err(AppError::NotFound("Movie not found".to_string())));

        let result =
            annotate_sessions(&catalog, vec![session(1, 9, at((2026, 3, 14), (14, 0)))]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
