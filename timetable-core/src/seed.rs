//! Example classes shown before the user has saved anything.

use chrono::{DateTime, Duration, Utc};

use crate::class_record::ClassRecord;
use crate::constants::SEED_CLASS_MINUTES;

const SEED_CLASSES: [(&str, &str); 7] = [
    ("Math", "Robet Smith"),
    ("Biology", "John Doe"),
    ("History", "Jane Smith"),
    ("Physics", "Alice Johnson"),
    ("English", "Bob Brown"),
    ("Chemistry", "Eva Davis"),
    ("Hindi", "Ram Sharma"),
];

/// One class per day for a week, starting at `now`, each an hour long.
pub fn seed_classes(now: DateTime<Utc>) -> Vec<ClassRecord> {
    SEED_CLASSES
        .iter()
        .zip(0i64..)
        .map(|((class_name, tutor_name), day)| {
            let start = now + Duration::days(day);
            let end = start + Duration::minutes(SEED_CLASS_MINUTES);
            ClassRecord::new(*class_name, *tutor_name, start, end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn seeds_one_hour_class_per_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap();
        let classes = seed_classes(now);

        assert_eq!(classes.len(), 7);
        for (i, class) in classes.iter().enumerate() {
            assert_eq!(class.start_time, now + Duration::days(i as i64));
            assert_eq!(class.end_time, class.start_time + Duration::hours(1));
        }
        assert_eq!(classes[0].class_name, "Math");
        assert_eq!(classes[6].tutor_name, "Ram Sharma");
    }

    #[test]
    fn seeded_ids_are_unique() {
        let classes = seed_classes(Utc::now());
        let ids: HashSet<_> = classes.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), classes.len());
    }
}
