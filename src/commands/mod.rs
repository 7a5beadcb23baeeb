pub mod add;
pub mod agenda;
pub mod config;
pub mod delete;
pub mod list;
pub mod notify;
pub mod permission;
pub mod remind;
pub mod week;

use anyhow::Result;
use timetable_core::ClassRecord;
use timetable_core::manager::ClassManager;
use timetable_core::store::SlotStore;

/// Find the one class whose id starts with `prefix`.
pub fn resolve_class<S: SlotStore>(manager: &ClassManager<S>, prefix: &str) -> Result<ClassRecord> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        anyhow::bail!("Class id must not be empty");
    }

    match manager.find_by_prefix(prefix).as_slice() {
        [] => anyhow::bail!(
            "No class with id '{}'. Run `timetable list` to see class ids.",
            prefix
        ),
        [class] => Ok((*class).clone()),
        matches => {
            let names: Vec<String> = matches
                .iter()
                .map(|c| format!("{} ({})", c.short_id(), c.class_name))
                .collect();
            anyhow::bail!(
                "Id '{}' matches several classes: {}. Use more characters.",
                prefix,
                names.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use timetable_core::store::{ClassStore, MemorySlotStore};

    fn manager() -> ClassManager<MemorySlotStore> {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        ClassManager::open_at(ClassStore::new(MemorySlotStore::new(), "allClasses"), now)
    }

    #[test]
    fn resolves_full_and_short_ids() {
        let manager = manager();
        let target = manager.classes()[2].clone();

        assert_eq!(resolve_class(&manager, &target.id_string()).unwrap(), target);
        assert_eq!(resolve_class(&manager, &target.short_id()).unwrap(), target);
    }

    #[test]
    fn rejects_unknown_and_empty_ids() {
        let manager = manager();
        assert!(resolve_class(&manager, "zzzz").is_err());
        assert!(resolve_class(&manager, "  ").is_err());
    }
}
