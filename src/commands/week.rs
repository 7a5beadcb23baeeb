use anyhow::Result;
use timetable_core::day_filter::WeekSummary;
use timetable_core::timetable::Timetable;

use crate::render::render_summary;

pub fn run(timetable: &Timetable, days: Option<u32>) -> Result<()> {
    let window_days = days.unwrap_or_else(|| timetable.window_days());

    let manager = timetable.open_classes();
    let summary = WeekSummary::compute(
        manager.classes(),
        timetable.today(),
        window_days,
        timetable.timezone(),
    );

    println!("{}", render_summary(&summary));

    Ok(())
}
