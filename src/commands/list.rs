use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::day_filter::start_day;
use timetable_core::timetable::Timetable;

use crate::render::{Render, heading};

/// Print every class in stored order, with a heading whenever the day changes.
pub fn run(timetable: &Timetable) -> Result<()> {
    let manager = timetable.open_classes();
    let tz = timetable.timezone();
    let today = timetable.today();

    if manager.is_empty() {
        println!("{}", "No classes yet. Add one with `timetable add`.".dimmed());
        return Ok(());
    }

    let mut current_date = None;

    for class in manager.classes() {
        let date = start_day(class, tz);

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", heading(date, today).bold());
            current_date = Some(date);
        }

        println!("{}", class.render(tz));
    }

    Ok(())
}
