//! Day buckets and per-day counts.
//!
//! Classes belong to the calendar day their start falls on, as seen in a
//! given time zone. A class running past midnight only counts for the day
//! it started. Everything here is pure: the anchor day and zone are always
//! passed in.

use chrono::{Days, NaiveDate, TimeZone};

use crate::class_record::ClassRecord;
use crate::constants::MAX_WINDOW_DAYS;

/// Classes starting on `day` in zone `tz`, in list order.
pub fn classes_on<'a, Tz: TimeZone>(
    classes: &'a [ClassRecord],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a ClassRecord> {
    classes
        .iter()
        .filter(|c| start_day(c, tz) == day)
        .collect()
}

/// Calendar day a class starts on, in zone `tz`.
pub fn start_day<Tz: TimeZone>(class: &ClassRecord, tz: &Tz) -> NaiveDate {
    class.start_time.with_timezone(tz).date_naive()
}

/// Number of classes on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Counts for `window_days` consecutive days starting at `anchor`.
///
/// The window is capped at [`MAX_WINDOW_DAYS`] and ends early if it would run
/// past the last representable date.
pub fn counts_for_window<Tz: TimeZone>(
    classes: &[ClassRecord],
    anchor: NaiveDate,
    window_days: u32,
    tz: &Tz,
) -> Vec<DayCount> {
    (0..window_days.min(MAX_WINDOW_DAYS))
        .map_while(|offset| anchor.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| DayCount {
            date,
            count: classes_on(classes, date, tz).len(),
        })
        .collect()
}

/// "Today", "Tomorrow", or the date as `dd - MM - yyyy`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%d - %m - %Y").to_string(),
    }
}

/// Headline counters plus the per-day distribution for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSummary {
    pub today: NaiveDate,
    pub slices: Vec<DayCount>,
}

impl WeekSummary {
    pub fn compute<Tz: TimeZone>(
        classes: &[ClassRecord],
        today: NaiveDate,
        window_days: u32,
        tz: &Tz,
    ) -> Self {
        WeekSummary {
            today,
            slices: counts_for_window(classes, today, window_days, tz),
        }
    }

    pub fn today_count(&self) -> usize {
        self.slices.first().map(|s| s.count).unwrap_or(0)
    }

    // A window of one day has no tomorrow slice
    pub fn tomorrow_count(&self) -> usize {
        self.slices.get(1).map(|s| s.count).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Fraction of the window's classes falling on `slice`, 0.0 when empty.
    pub fn share(&self, slice: &DayCount) -> f64 {
        match self.total() {
            0 => 0.0,
            total => slice.count as f64 / total as f64,
        }
    }

    pub fn label(&self, slice: &DayCount) -> String {
        day_label(slice.date, self.today)
    }
}
