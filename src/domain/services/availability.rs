use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::cmp::{max, min};

use crate::domain::models::booking::Booking;
use crate::domain::models::schedule::{AvailabilityRule, RecurringBlock, TimeBlock};
use crate::domain::services::intervals::{overlaps, subtract, MinuteSpan};

pub const MINUTES_PER_DAY: i32 = 1440;

/// Weekday index in the rule table's convention: 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// One local calendar day in the business timezone, as the half-open UTC
/// range `[start_utc, end_utc)` between consecutive local midnights.
pub struct DayWindow {
    pub date: NaiveDate,
    pub tz: Tz,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl DayWindow {
    /// None when a local midnight does not exist or is ambiguous (DST edge).
    pub fn new(date: NaiveDate, tz: Tz) -> Option<Self> {
        let start = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap()).single()?;
        let next = date.succ_opt()?;
        let end = tz.from_local_datetime(&next.and_hms_opt(0, 0, 0).unwrap()).single()?;

        Some(Self {
            date,
            tz,
            start_utc: start.with_timezone(&Utc),
            end_utc: end.with_timezone(&Utc),
        })
    }

    /// Clip an absolute range to this day and convert it to minute-of-day.
    /// A range spanning midnight yields its own clipped segment on each day
    /// it touches. None if the range misses the day entirely.
    pub fn clip_to_minutes(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<MinuteSpan> {
        let s = max(start, self.start_utc);
        let e = min(end, self.end_utc);
        if s >= e {
            return None;
        }

        let end_minute = if e == self.end_utc { MINUTES_PER_DAY } else { self.minute_of_day(e) };
        Some(MinuteSpan::new(self.minute_of_day(s), end_minute))
    }

    fn minute_of_day(&self, instant: DateTime<Utc>) -> i32 {
        let local = instant.with_timezone(&self.tz);
        (local.hour() * 60 + local.minute()) as i32
    }

    /// The UTC instant at `minute` past local midnight. None for local times
    /// skipped or duplicated by a DST transition.
    pub fn instant_at(&self, minute: i32) -> Option<DateTime<Utc>> {
        let time = NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0)?;
        self.tz
            .from_local_datetime(&self.date.and_time(time))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Combine the weekday's rules with recurring and one-off closures into the
/// day's free minute-of-day intervals.
///
/// No active rules means the day is closed: hours are opt-in per weekday,
/// there is no implicit default.
pub fn resolve_free_intervals(
    window: &DayWindow,
    rules: &[AvailabilityRule],
    recurring: &[RecurringBlock],
    blocks: &[TimeBlock],
    granularity_min: i32,
) -> Vec<MinuteSpan> {
    if rules.is_empty() {
        return Vec::new();
    }

    let base: Vec<MinuteSpan> = rules
        .iter()
        .map(|r| MinuteSpan::new(r.start_minutes, r.end_minutes))
        .collect();

    let mut cuts: Vec<MinuteSpan> = recurring
        .iter()
        .map(|b| MinuteSpan::new(b.start_minutes, b.end_minutes))
        .collect();
    cuts.extend(
        blocks
            .iter()
            .filter_map(|b| window.clip_to_minutes(b.start_time, b.end_time)),
    );

    subtract(&base, &cuts, granularity_min)
}

pub struct SlotQuery<'a> {
    pub free: &'a [MinuteSpan],
    pub duration_min: i32,
    pub interval_min: i32,
    pub buffer_min: i32,
    /// The day's calendar-occupying bookings.
    pub bookings: &'a [Booking],
    pub now: DateTime<Utc>,
}

/// Walk the free intervals at the slot granularity and return the offerable
/// start instants, ascending. A candidate occupies `[m, m + duration +
/// buffer)` and must clear every existing booking's span padded by the same
/// buffer on its end; padding one side of each comparison keeps the gap
/// guarantee without double-counting.
pub fn generate_slots(window: &DayWindow, query: &SlotQuery) -> Vec<DateTime<Utc>> {
    if query.duration_min <= 0 || query.interval_min <= 0 {
        return Vec::new();
    }

    let occupied: Vec<MinuteSpan> = query
        .bookings
        .iter()
        .filter_map(|b| window.clip_to_minutes(b.start_time, b.end_time))
        .map(|span| MinuteSpan::new(span.start, span.end + query.buffer_min))
        .collect();

    let today = query.now.with_timezone(&window.tz).date_naive() == window.date;
    let needed = query.duration_min + query.buffer_min;

    let mut slots = Vec::new();
    for span in query.free {
        let mut cursor = span.start;
        while cursor + needed <= span.end {
            let candidate = MinuteSpan::new(cursor, cursor + needed);

            if let Some(start) = window.instant_at(cursor) {
                let in_past = today && start < query.now;
                let conflict = occupied.iter().any(|b| overlaps(candidate, *b));

                if !in_past && !conflict {
                    slots.push(start);
                }
            }
            cursor += query.interval_min;
        }
    }

    // Overlapping rule windows can produce the same candidate twice.
    slots.sort();
    slots.dedup();
    slots
}
