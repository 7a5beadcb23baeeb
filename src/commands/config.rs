use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::timetable::Timetable;
use timetable_core::timetable_config::TimetableConfig;

pub fn run(timetable: &Timetable) -> Result<()> {
    let config_path = TimetableConfig::config_path()?;
    let slots = timetable.slots();

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", timetable.data_path().display());
    println!(
        "  Classes:    {}",
        slots.slot_path(&timetable.config().storage_key).display()
    );
    println!();
    println!("{}", "Settings".bold());
    println!("  Time zone:  {}", timetable.timezone());
    println!("  Window:     {} days", timetable.window_days());

    Ok(())
}
