//! Local key-value persistence for the class list.
//!
//! Storage is a set of named slots, each holding one opaque blob. The class
//! list lives in a single slot as a versioned JSON envelope:
//!
//! ```json
//! {"version": 1, "classes": [{"id": "...", "className": "Math", ...}]}
//! ```
//!
//! Slots written before the envelope existed hold a bare JSON array; those
//! still load (as [`LoadedClasses::Legacy`]).

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::class_record::ClassRecord;
use crate::constants::STORAGE_VERSION;
use crate::error::{TimetableError, TimetableResult};

/// Durable storage addressed by slot name.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` means nothing was ever written there.
    fn read(&self, key: &str) -> TimetableResult<Option<Vec<u8>>>;

    /// Replace the contents of a slot.
    fn write(&self, key: &str, bytes: &[u8]) -> TimetableResult<()>;
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlotStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> TimetableResult<Option<Vec<u8>>> {
        let path = self.slot_path(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> TimetableResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.slot_path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        // Write-then-rename so a crash never leaves a half-written slot
        std::fs::write(&temp, bytes)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// Slots kept in memory. Clones share the same slots, so a test can hand
/// one clone to a manager and inspect or reopen with another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.slots.borrow().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.slots.borrow_mut().insert(key.to_string(), bytes.into());
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> TimetableResult<Option<Vec<u8>>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> TimetableResult<()> {
        self.put_raw(key, bytes);
        Ok(())
    }
}

/// Outcome of reading the class slot.
#[derive(Debug)]
pub enum LoadedClasses {
    /// Nothing has been persisted yet.
    Missing,
    /// A value exists but could not be decoded. It is left as is.
    Unreadable,
    /// Unversioned bare array.
    Legacy(Vec<ClassRecord>),
    /// Versioned envelope. An empty list here is a deliberate user state.
    Current(Vec<ClassRecord>),
}

impl LoadedClasses {
    /// Whether the caller should fall back to seed data.
    ///
    /// An unversioned empty array cannot be told apart from "never used", so
    /// it keeps the seed fallback. A versioned empty list does not.
    pub fn needs_seed(&self) -> bool {
        match self {
            LoadedClasses::Missing | LoadedClasses::Unreadable => true,
            LoadedClasses::Legacy(classes) => classes.is_empty(),
            LoadedClasses::Current(_) => false,
        }
    }

    pub fn into_classes(self) -> Vec<ClassRecord> {
        match self {
            LoadedClasses::Missing | LoadedClasses::Unreadable => Vec::new(),
            LoadedClasses::Legacy(classes) | LoadedClasses::Current(classes) => classes,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    classes: &'a [ClassRecord],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    classes: Vec<ClassRecord>,
}

/// Reads and writes the whole class list in one slot.
pub struct ClassStore<S: SlotStore> {
    slots: S,
    key: String,
}

impl<S: SlotStore> ClassStore<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        ClassStore {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Serialize the full list and replace the slot contents.
    pub fn save(&self, classes: &[ClassRecord]) -> TimetableResult<()> {
        let envelope = EnvelopeRef {
            version: STORAGE_VERSION,
            classes,
        };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        self.slots.write(&self.key, &bytes)
    }

    /// Read the slot. Failures are logged and reported as
    /// [`LoadedClasses::Unreadable`]; the stored value is never rewritten here.
    pub fn load(&self) -> LoadedClasses {
        let bytes = match self.slots.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return LoadedClasses::Missing,
            Err(e) => {
                log::warn!("Could not read classes from slot '{}': {e}", self.key);
                return LoadedClasses::Unreadable;
            }
        };

        match decode(&bytes) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("Could not decode classes from slot '{}': {e}", self.key);
                LoadedClasses::Unreadable
            }
        }
    }
}

fn decode(bytes: &[u8]) -> TimetableResult<LoadedClasses> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    if value.is_array() {
        let classes: Vec<ClassRecord> = serde_json::from_value(value)?;
        return Ok(LoadedClasses::Legacy(classes));
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    if envelope.version > STORAGE_VERSION {
        return Err(TimetableError::UnsupportedVersion {
            found: envelope.version,
            supported: STORAGE_VERSION,
        });
    }

    Ok(LoadedClasses::Current(envelope.classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    const KEY: &str = "allClasses";

    fn sample() -> Vec<ClassRecord> {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        vec![
            ClassRecord::new("Math", "Robet Smith", t, t + Duration::hours(1)),
            ClassRecord::new("Art", "Frida Kahlo", t + Duration::days(1), t + Duration::days(1)),
            ClassRecord::new("Late", "Owl", t + Duration::hours(14), t + Duration::hours(16)),
        ]
    }

    fn assert_same_records(left: &[ClassRecord], right: &[ClassRecord]) {
        assert_eq!(left.len(), right.len());
        for (a, b) in left.iter().zip(right) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.class_name, b.class_name);
            assert_eq!(a.tutor_name, b.tutor_name);
            assert_eq!(a.start_time, b.start_time);
            assert_eq!(a.end_time, b.end_time);
        }
    }

    #[test]
    fn missing_slot_is_missing() {
        let store = ClassStore::new(MemorySlotStore::new(), KEY);
        let loaded = store.load();
        assert!(matches!(loaded, LoadedClasses::Missing));
        assert!(loaded.needs_seed());
    }

    #[test]
    fn save_then_load_keeps_order_and_fields() {
        let store = ClassStore::new(MemorySlotStore::new(), KEY);
        let classes = sample();

        store.save(&classes).unwrap();

        match store.load() {
            LoadedClasses::Current(loaded) => assert_same_records(&classes, &loaded),
            other => panic!("expected current envelope, got {other:?}"),
        }
    }

    #[test]
    fn saved_blob_carries_version() {
        let slots = MemorySlotStore::new();
        let store = ClassStore::new(slots.clone(), KEY);
        store.save(&sample()).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&slots.raw(KEY).unwrap()).unwrap();
        assert_eq!(json["version"], STORAGE_VERSION);
        assert_eq!(json["classes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn empty_envelope_does_not_need_seed() {
        let store = ClassStore::new(MemorySlotStore::new(), KEY);
        store.save(&[]).unwrap();

        let loaded = store.load();
        assert!(matches!(loaded, LoadedClasses::Current(ref c) if c.is_empty()));
        assert!(!loaded.needs_seed());
    }

    #[test]
    fn legacy_array_loads() {
        let slots = MemorySlotStore::new();
        let classes = sample();
        slots.put_raw(KEY, serde_json::to_vec(&classes).unwrap());

        let loaded = ClassStore::new(slots, KEY).load();
        assert!(!loaded.needs_seed());
        match loaded {
            LoadedClasses::Legacy(loaded) => assert_same_records(&classes, &loaded),
            other => panic!("expected legacy array, got {other:?}"),
        }
    }

    #[test]
    fn legacy_empty_array_needs_seed() {
        let slots = MemorySlotStore::new();
        slots.put_raw(KEY, "[]");

        assert!(ClassStore::new(slots, KEY).load().needs_seed());
    }

    #[test]
    fn malformed_blob_is_unreadable_and_untouched() {
        let slots = MemorySlotStore::new();
        slots.put_raw(KEY, "{not json");

        let loaded = ClassStore::new(slots.clone(), KEY).load();
        assert!(matches!(loaded, LoadedClasses::Unreadable));
        assert!(loaded.into_classes().is_empty());
        assert_eq!(slots.raw(KEY).unwrap(), b"{not json");
    }

    #[test]
    fn newer_version_is_unreadable() {
        let slots = MemorySlotStore::new();
        slots.put_raw(KEY, r#"{"version": 99, "classes": []}"#);

        let loaded = ClassStore::new(slots, KEY).load();
        assert!(matches!(loaded, LoadedClasses::Unreadable));
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlotStore::new(dir.path().join("data"));
        let store = ClassStore::new(slots.clone(), KEY);

        assert!(matches!(store.load(), LoadedClasses::Missing));

        let classes = sample();
        store.save(&classes).unwrap();

        assert!(slots.slot_path(KEY).exists());
        assert!(!dir.path().join("data/allClasses.json.tmp").exists());

        let reopened = ClassStore::new(FileSlotStore::new(dir.path().join("data")), KEY);
        assert_same_records(&classes, &reopened.load().into_classes());
    }
}
