//! The scheduled class record.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scheduled class.
///
/// Identity is the `id`, assigned once at creation. Two records are equal
/// when their ids match, whatever their other fields say, and hashing uses
/// the id alone so it agrees with equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    id: Uuid,
    pub class_name: String,
    pub tutor_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ClassRecord {
    /// Create a record with a freshly generated id.
    ///
    /// No ordering is enforced between `start_time` and `end_time`; see
    /// [`ClassRecord::is_well_ordered`].
    pub fn new(
        class_name: impl Into<String>,
        tutor_name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        ClassRecord {
            id: Uuid::new_v4(),
            class_name: class_name.into(),
            tutor_name: tutor_name.into(),
            start_time,
            end_time,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Hyphenated id, as written to storage.
    pub fn id_string(&self) -> String {
        self.id.hyphenated().to_string()
    }

    /// First 8 characters of the id, enough to address a class from the CLI.
    pub fn short_id(&self) -> String {
        self.id_string().chars().take(8).collect()
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Whether the class ends no earlier than it starts.
    pub fn is_well_ordered(&self) -> bool {
        self.start_time <= self.end_time
    }
}

impl PartialEq for ClassRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassRecord {}

impl Hash for ClassRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn art() -> ClassRecord {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        ClassRecord::new("Art", "Frida Kahlo", start, start + Duration::hours(1))
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let a = art();
        let b = art();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn equality_ignores_mutable_fields() {
        let a = art();
        let mut renamed = a.clone();
        renamed.class_name = "Sculpture".into();
        renamed.tutor_name = "Someone Else".into();
        renamed.end_time = renamed.start_time + Duration::hours(3);

        assert_eq!(a, renamed);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(renamed), "hash must agree with equality");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let record = art();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], record.id_string());
        assert_eq!(json["className"], "Art");
        assert_eq!(json["tutorName"], "Frida Kahlo");
        assert_eq!(json["startTime"], "2024-03-01T09:00:00Z");
        assert_eq!(json["endTime"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn well_ordered_allows_zero_length() {
        let mut record = art();
        assert!(record.is_well_ordered());
        assert_eq!(record.duration(), Duration::hours(1));

        record.end_time = record.start_time;
        assert!(record.is_well_ordered());

        record.end_time = record.start_time - Duration::minutes(5);
        assert!(!record.is_well_ordered());
    }

    #[test]
    fn short_id_is_prefix_of_full_id() {
        let record = art();
        assert_eq!(record.short_id().len(), 8);
        assert!(record.id_string().starts_with(&record.short_id()));
    }
}
