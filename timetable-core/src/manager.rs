//! The observable owner of the class list.
//!
//! `ClassManager` is the only thing that mutates the list. Every successful
//! mutation first notifies subscribers with the new list, then writes the
//! whole list back to storage. A failed write is logged and the in-memory
//! list stays as it is.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::class_record::ClassRecord;
use crate::error::{TimetableError, TimetableResult};
use crate::seed::seed_classes;
use crate::store::{ClassStore, LoadedClasses, SlotStore};

/// Callback invoked with the full list after each mutation.
pub type ClassListObserver = Box<dyn FnMut(&[ClassRecord])>;

/// Handle returned by [`ClassManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct ClassManager<S: SlotStore> {
    classes: Vec<ClassRecord>,
    store: ClassStore<S>,
    observers: Vec<(SubscriptionId, ClassListObserver)>,
    next_subscription: u64,
}

impl<S: SlotStore> ClassManager<S> {
    /// Load the list from `store`, seeding it relative to the current time
    /// when nothing usable is stored.
    pub fn open(store: ClassStore<S>) -> Self {
        Self::open_at(store, Utc::now())
    }

    /// Like [`ClassManager::open`] with an explicit "now" for the seed.
    ///
    /// A seed built because nothing was stored is written straight away, so
    /// its ids stay valid across runs. A seed built because the stored value
    /// could not be read is not written; the stored bytes stay until the
    /// first mutation.
    pub fn open_at(store: ClassStore<S>, now: DateTime<Utc>) -> Self {
        let (classes, persist) = match store.load() {
            LoadedClasses::Unreadable => {
                log::info!("Stored classes in slot '{}' are unreadable, using seed data", store.key());
                (seed_classes(now), false)
            }
            loaded if loaded.needs_seed() => {
                log::info!("No stored classes in slot '{}', using seed data", store.key());
                (seed_classes(now), true)
            }
            loaded => (dedupe_ids(loaded.into_classes()), false),
        };

        let manager = ClassManager {
            classes,
            store,
            observers: Vec::new(),
            next_subscription: 0,
        };

        if persist {
            manager.persist();
        }

        manager
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&ClassRecord> {
        self.classes.iter().find(|c| c.id() == id)
    }

    /// All classes whose hyphenated id starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&ClassRecord> {
        let prefix = prefix.to_lowercase();
        self.classes
            .iter()
            .filter(|c| c.id_string().starts_with(&prefix))
            .collect()
    }

    pub fn store(&self) -> &ClassStore<S> {
        &self.store
    }

    /// Register a callback that receives the list after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[ClassRecord]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Append a class to the end of the list.
    ///
    /// Fails only when a class with the same id is already present.
    pub fn add_record(&mut self, record: ClassRecord) -> TimetableResult<()> {
        if self.get(record.id()).is_some() {
            return Err(TimetableError::DuplicateClass(record.id()));
        }

        self.classes.push(record);
        self.commit();
        Ok(())
    }

    /// Remove the class with the same id as `target`. A no-op if absent.
    pub fn delete_record(&mut self, target: &ClassRecord) -> Option<ClassRecord> {
        self.delete_by_id(target.id())
    }

    pub fn delete_by_id(&mut self, id: Uuid) -> Option<ClassRecord> {
        let index = self.classes.iter().position(|c| c.id() == id)?;
        let removed = self.classes.remove(index);
        self.commit();
        Some(removed)
    }

    fn commit(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.classes);
        }

        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.classes) {
            log::error!("Could not save classes to slot '{}': {e}", self.store.key());
        }
    }
}

/// Keep the first occurrence of each id.
fn dedupe_ids(classes: Vec<ClassRecord>) -> Vec<ClassRecord> {
    let mut seen = HashSet::new();
    classes
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.id());
            if !fresh {
                log::warn!("Dropping stored class with repeated id {}", c.id());
            }
            fresh
        })
        .collect()
}
