use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use timetable_core::timetable::Timetable;

use super::resolve_class;
use crate::render::Render;

pub fn run(timetable: &Timetable, id: &str, force: bool) -> Result<()> {
    let mut manager = timetable.open_classes();
    let class = resolve_class(&manager, id)?;
    let tz = timetable.timezone();

    println!("{}", class.render(tz));

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", class.class_name))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Nothing deleted".dimmed());
            return Ok(());
        }
    }

    manager.delete_record(&class);
    println!("{}", format!("  Deleted: {}", class.class_name).red());

    Ok(())
}
