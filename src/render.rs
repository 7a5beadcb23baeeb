//! Terminal rendering for timetable types.
//!
//! Extension traits that add colored output to timetable-core types using
//! owo_colors.

use chrono::NaiveDate;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use timetable_core::ClassRecord;
use timetable_core::day_filter::{WeekSummary, day_label};
use timetable_core::reminder::ReminderRequest;

/// Width of the distribution bars in `week`.
const BAR_WIDTH: usize = 30;

pub trait Render {
    fn render(&self, tz: &Tz) -> String;
}

impl Render for ClassRecord {
    /// `  09:00-10:00  Math  with Robet Smith  [1a2b3c4d]`
    fn render(&self, tz: &Tz) -> String {
        let start = self.start_time.with_timezone(tz);
        let end = self.end_time.with_timezone(tz);
        let time = format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"));
        let id = format!("[{}]", self.short_id());

        format!(
            "  {} {} {} {}",
            time.cyan(),
            self.class_name.bold(),
            format!("with {}", self.tutor_name).dimmed(),
            id.dimmed()
        )
    }
}

impl Render for ReminderRequest {
    fn render(&self, tz: &Tz) -> String {
        let at = self.at.with_timezone(tz).format("%d - %m - %Y %H:%M");
        format!("  {} {}", at.to_string().cyan(), self.subtitle)
    }
}

/// A titled day bucket, or the empty-day message.
pub fn render_day(title: &str, classes: &[&ClassRecord], tz: &Tz) -> String {
    let mut lines = vec![title.bold().to_string()];

    if classes.is_empty() {
        lines.push(format!("  {}", "No classes Found!".dimmed()));
    } else {
        lines.extend(classes.iter().map(|c| c.render(tz)));
    }

    lines.join("\n")
}

/// Label for a date relative to today, with the weekday for later dates.
pub fn heading(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 | 1 => day_label(date, today),
        _ => format!("{} ({})", day_label(date, today), date.format("%a")),
    }
}

pub fn render_summary(summary: &WeekSummary) -> String {
    let mut lines = vec![
        format!(
            "{} {}    {} {}",
            "Today".bold(),
            summary.today_count().to_string().green(),
            "Tomorrow".bold(),
            summary.tomorrow_count().to_string().green()
        ),
        String::new(),
    ];

    let label_width = summary
        .slices
        .iter()
        .map(|s| summary.label(s).len())
        .max()
        .unwrap_or(0);

    for slice in &summary.slices {
        let share = summary.share(slice);
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled));

        lines.push(format!(
            "  {:<width$}  {} {:>2} {}",
            summary.label(slice),
            bar.blue(),
            slice.count,
            format!("({:.0}%)", share * 100.0).dimmed(),
            width = label_width
        ));
    }

    if summary.total() == 0 {
        lines.push(String::new());
        lines.push(format!("  {}", "No classes in this period".dimmed()));
    }

    lines.join("\n")
}
