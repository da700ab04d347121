use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// How far into a calendar period a moment is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSpan {
    pub elapsed: Duration,
    pub total: Duration,
}

impl TimeSpan {
    fn between(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> Self {
        let total = end - start;
        let elapsed = (now - start).clamp(Duration::zero(), total);
        Self { elapsed, total }
    }

    /// Elapsed share of the period, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let total = self.total.num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        (self.elapsed.num_milliseconds() as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> Duration {
        self.total - self.elapsed
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month arithmetic below only produces months in 1..=12.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub fn day_span(now: NaiveDateTime) -> TimeSpan {
    let start = midnight(now.date());
    TimeSpan::between(start, start + Duration::days(1), now)
}

/// Weeks start on Monday.
pub fn week_span(now: NaiveDateTime) -> TimeSpan {
    let offset = now.date().weekday().num_days_from_monday() as i64;
    let start = midnight(now.date() - Duration::days(offset));
    TimeSpan::between(start, start + Duration::weeks(1), now)
}

pub fn month_span(now: NaiveDateTime) -> TimeSpan {
    let date = now.date();
    let start = first_of_month(date.year(), date.month());
    let end = if date.month() == 12 {
        first_of_month(date.year() + 1, 1)
    } else {
        first_of_month(date.year(), date.month() + 1)
    };
    TimeSpan::between(midnight(start), midnight(end), now)
}

pub fn year_span(now: NaiveDateTime) -> TimeSpan {
    let year = now.date().year();
    TimeSpan::between(
        midnight(first_of_month(year, 1)),
        midnight(first_of_month(year + 1, 1)),
        now,
    )
}

/// Compact rendering like `3d 04h` or `12h 30m`.
pub fn format_remaining(remaining: Duration) -> String {
    let minutes = remaining.num_minutes().max(0);
    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    if days > 0 {
        format!("{days}d {hours:02}h")
    } else {
        format!("{hours}h {mins:02}m")
    }
}
