use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use dialoguer::Input;
use owo_colors::OwoColorize;
use timetable_core::ClassRecord;
use timetable_core::timetable::Timetable;

use crate::datetime::{apply_duration, parse_datetime, parse_end};
use crate::render::Render;

pub fn run(
    timetable: &Timetable,
    name: Option<String>,
    tutor: Option<String>,
    start: Option<String>,
    end: Option<String>,
    duration: Option<String>,
) -> Result<()> {
    let tz = timetable.timezone();
    let now = Utc::now();
    let interactive = name.is_none() || start.is_none();

    // --- Class name ---
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Class name")
            .interact_text()?,
    };

    // --- Tutor ---
    let tutor = match tutor {
        Some(t) => t,
        None if interactive => Input::new()
            .with_prompt("  Tutor (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    // --- Start ---
    let start_time = match start {
        Some(s) => parse_datetime(&s, tz, now)?,
        None => prompt_with_retry("  When?", |input| parse_datetime(input, tz, now))?,
    };

    // --- End ---
    let end_time = if let Some(end_input) = end {
        parse_end(&end_input, start_time, tz, now)?
    } else if let Some(dur_input) = duration {
        apply_duration(start_time, &dur_input)?
    } else if interactive {
        prompt_end(start_time, tz, now)?
    } else {
        default_end(start_time)
    };

    let class = ClassRecord::new(name, tutor, start_time, end_time);
    if !class.is_well_ordered() {
        anyhow::bail!("A class can't end before it starts");
    }

    let rendered = class.render(tz);
    let mut manager = timetable.open_classes();
    manager.add_record(class)?;

    if interactive {
        println!();
    }
    println!("{}", "  Added:".green());
    println!("{}", rendered);

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<DateTime<Utc>>
where
    F: Fn(&str) -> Result<DateTime<Utc>>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_end(start: DateTime<Utc>, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  How long? (1 hour)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(default_end(start));
        }
        match parse_end(&input, start, tz, now) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Classes default to an hour.
fn default_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::hours(1)
}
