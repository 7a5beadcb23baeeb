//! Local reminders.
//!
//! The front end schedules reminders through a [`NotificationGateway`].
//! Reminders are fire-and-forget: scheduling returns no handle, and deleting
//! a class leaves any reminder already scheduled for it in place.
//!
//! [`ReminderQueue`] is the persisted list of reminders that have been
//! scheduled but not yet shown. A gateway implementation pushes onto it and
//! later drains the due entries with [`ReminderQueue::take_due`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::class_record::ClassRecord;
use crate::constants::REMINDERS_KEY;
use crate::error::TimetableResult;
use crate::store::SlotStore;

/// How a reminder is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Fire once at an absolute date and time.
    Date,
}

/// A request to show a local alert at `at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub at: DateTime<Utc>,
    pub kind: TriggerKind,
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl ReminderRequest {
    /// Reminder for a class: the subtitle names the class and tutor, the body
    /// carries the user's note.
    pub fn for_class(
        class: &ClassRecord,
        at: DateTime<Utc>,
        note: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        ReminderRequest {
            at,
            kind: TriggerKind::Date,
            title: title.into(),
            subtitle: format!("{} with {}", class.class_name, class.tutor_name),
            body: note.into(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.at <= now
    }
}

/// Something that can deliver local alerts.
pub trait NotificationGateway {
    /// Ask the platform for permission to show alerts.
    fn request_permission(&mut self) -> TimetableResult<bool>;

    /// Schedule an alert. Nothing is returned to cancel it with.
    fn schedule_notification(&mut self, request: ReminderRequest) -> TimetableResult<()>;
}

/// Pending reminders persisted in their own storage slot.
///
/// Another process may change the slot while a queue is open (`remind`
/// while `notify --watch` runs), so every write starts from a fresh read of
/// the slot rather than from the list loaded at open. Writes from two
/// processes can still interleave between that read and the write.
pub struct ReminderQueue<S: SlotStore> {
    slots: S,
    pending: Vec<ReminderRequest>,
}

impl<S: SlotStore> ReminderQueue<S> {
    /// Load pending reminders. An unreadable slot is logged and treated as
    /// empty.
    pub fn open(slots: S) -> Self {
        let pending = read_pending(&slots);
        ReminderQueue { slots, pending }
    }

    pub fn pending(&self) -> &[ReminderRequest] {
        &self.pending
    }

    pub fn push(&mut self, request: ReminderRequest) -> TimetableResult<()> {
        self.pending = read_pending(&self.slots);
        self.pending.push(request);
        self.save()
    }

    /// Remove and return every reminder due at `now`, earliest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> TimetableResult<Vec<ReminderRequest>> {
        let (mut due, rest): (Vec<_>, Vec<_>) = read_pending(&self.slots)
            .into_iter()
            .partition(|r| r.is_due(now));
        self.pending = rest;

        if due.is_empty() {
            return Ok(due);
        }

        due.sort_by_key(|r| r.at);
        self.save()?;
        Ok(due)
    }

    fn save(&self) -> TimetableResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.pending)?;
        self.slots.write(REMINDERS_KEY, &bytes)
    }
}

fn read_pending<S: SlotStore>(slots: &S) -> Vec<ReminderRequest> {
    match slots.read(REMINDERS_KEY) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            log::warn!("Could not decode pending reminders: {e}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("Could not read pending reminders: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySlotStore;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn math() -> ClassRecord {
        ClassRecord::new("Math", "Robet Smith", now(), now() + Duration::hours(1))
    }

    #[test]
    fn class_reminder_text() {
        let request = ReminderRequest::for_class(&math(), now(), "Bring a calculator", "Timetable");

        assert_eq!(request.kind, TriggerKind::Date);
        assert_eq!(request.title, "Timetable");
        assert_eq!(request.subtitle, "Math with Robet Smith");
        assert_eq!(request.body, "Bring a calculator");
    }

    #[test]
    fn take_due_returns_only_past_reminders_in_order() {
        let slots = MemorySlotStore::new();
        let mut queue = ReminderQueue::open(slots.clone());
        let class = math();

        queue
            .push(ReminderRequest::for_class(&class, now() + Duration::minutes(10), "b", "T"))
            .unwrap();
        queue
            .push(ReminderRequest::for_class(&class, now() - Duration::minutes(10), "a", "T"))
            .unwrap();
        queue
            .push(ReminderRequest::for_class(&class, now() + Duration::days(1), "later", "T"))
            .unwrap();

        let due = queue.take_due(now() + Duration::minutes(30)).unwrap();
        let bodies: Vec<&str> = due.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["a", "b"]);
        assert_eq!(queue.pending().len(), 1);

        let reopened = ReminderQueue::open(slots);
        assert_eq!(reopened.pending().len(), 1);
        assert_eq!(reopened.pending()[0].body, "later");
    }

    #[test]
    fn reminders_outlive_their_class() {
        let slots = MemorySlotStore::new();
        let mut queue = ReminderQueue::open(slots.clone());
        let class = math();
        queue
            .push(ReminderRequest::for_class(&class, now(), "note", "T"))
            .unwrap();
        drop(class);

        assert_eq!(ReminderQueue::open(slots).pending().len(), 1);
    }

    #[test]
    fn reminders_pushed_by_another_queue_are_kept() {
        let slots = MemorySlotStore::new();
        let class = math();
        let mut watcher = ReminderQueue::open(slots.clone());
        watcher
            .push(ReminderRequest::for_class(&class, now(), "due", "T"))
            .unwrap();

        let mut other = ReminderQueue::open(slots.clone());
        other
            .push(ReminderRequest::for_class(&class, now() + Duration::days(1), "added later", "T"))
            .unwrap();

        let due = watcher.take_due(now()).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(watcher.pending().len(), 1);

        let remaining = ReminderQueue::open(slots);
        assert_eq!(remaining.pending().len(), 1);
        assert_eq!(remaining.pending()[0].body, "added later");
    }

    #[test]
    fn unreadable_slot_opens_empty() {
        let slots = MemorySlotStore::new();
        slots.put_raw(REMINDERS_KEY, "nope");

        let queue = ReminderQueue::open(slots);
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn persisted_kind_is_date() {
        let slots = MemorySlotStore::new();
        let mut queue = ReminderQueue::open(slots.clone());
        queue
            .push(ReminderRequest::for_class(&math(), now(), "", "T"))
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&slots.raw(REMINDERS_KEY).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "date");
    }
}
