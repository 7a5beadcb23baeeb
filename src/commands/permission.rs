use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::reminder::NotificationGateway;
use timetable_core::timetable::Timetable;

use crate::desktop::DesktopGateway;

pub fn run(timetable: &Timetable) -> Result<()> {
    let mut gateway = DesktopGateway::new(timetable.open_reminders());

    if gateway.request_permission()? {
        println!("{}", "Notifications enabled".green());
    } else {
        println!(
            "{}",
            "Desktop notifications are not available in this session".yellow()
        );
    }

    Ok(())
}
