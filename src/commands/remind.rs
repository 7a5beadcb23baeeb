use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use timetable_core::reminder::{NotificationGateway, ReminderRequest};
use timetable_core::timetable::Timetable;

use super::resolve_class;
use crate::datetime::parse_datetime;
use crate::desktop::DesktopGateway;
use crate::render::Render;

pub fn run(timetable: &Timetable, id: &str, at: &str, note: String) -> Result<()> {
    let manager = timetable.open_classes();
    let class = resolve_class(&manager, id)?;
    let tz = timetable.timezone();

    let now = Utc::now();
    let at = parse_datetime(at, tz, now)?;
    if at < now {
        anyhow::bail!("Reminder time is in the past");
    }

    let request = ReminderRequest::for_class(&class, at, note, timetable.reminder_title());
    let rendered = request.render(tz);

    let mut gateway = DesktopGateway::new(timetable.open_reminders());
    gateway.schedule_notification(request)?;

    println!("{}", "  Reminder set:".green());
    println!("{}", rendered);
    println!(
        "{}",
        "  Run `timetable notify --watch` to receive it.".dimmed()
    );

    Ok(())
}
