use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use timetable_core::day_filter::classes_on;
use timetable_core::timetable::Timetable;

use crate::datetime;
use crate::render::{heading, render_day};

pub fn today(timetable: &Timetable) -> Result<()> {
    show(timetable, timetable.today())
}

pub fn tomorrow(timetable: &Timetable) -> Result<()> {
    show(timetable, timetable.today() + Duration::days(1))
}

pub fn day(timetable: &Timetable, input: &str) -> Result<()> {
    show(
        timetable,
        datetime::parse_date(input, timetable.timezone(), Utc::now())?,
    )
}

fn show(timetable: &Timetable, date: NaiveDate) -> Result<()> {
    let manager = timetable.open_classes();
    let tz = timetable.timezone();

    let classes = classes_on(manager.classes(), date, tz);
    println!("{}", render_day(&heading(date, timetable.today()), &classes, tz));

    Ok(())
}
