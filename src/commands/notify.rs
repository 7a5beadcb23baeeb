use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use timetable_core::timetable::Timetable;

use crate::desktop::DesktopGateway;
use crate::render::Render;

pub fn run(timetable: &Timetable, watch: bool, interval: u64) -> Result<()> {
    let tz = timetable.timezone();

    if watch {
        let pending = DesktopGateway::new(timetable.open_reminders()).pending().len();
        println!(
            "{}",
            format!(
                "Watching {} pending {} (Ctrl-C to stop)",
                pending,
                if pending == 1 { "reminder" } else { "reminders" }
            )
            .dimmed()
        );
    }

    loop {
        // Reopen each pass so reminders added meanwhile by `remind` are seen
        let mut gateway = DesktopGateway::new(timetable.open_reminders());
        let shown = gateway.deliver_due(Utc::now())?;
        for reminder in &shown {
            println!("{}", reminder.render(tz));
        }

        if !watch {
            if shown.is_empty() {
                println!("{}", "No reminders due".dimmed());
            }
            return Ok(());
        }

        std::thread::sleep(Duration::from_secs(interval.max(1)));
    }
}
