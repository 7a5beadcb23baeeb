/// Storage key holding the serialized class list.
pub const DEFAULT_STORAGE_KEY: &str = "allClasses";

/// Storage key holding pending reminders.
pub const REMINDERS_KEY: &str = "reminders";

/// Version tag written into the persisted class envelope.
pub const STORAGE_VERSION: u32 = 1;

/// Number of days covered by the rolling summary (today plus six).
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Length of a seeded example class, in minutes.
pub const SEED_CLASS_MINUTES: i64 = 60;

/// Longest window the summary will count, in days.
pub const MAX_WINDOW_DAYS: u32 = 366;
