//! Desktop notification gateway.
//!
//! Scheduling pushes onto the persisted reminder queue; `deliver_due` pops the
//! reminders whose time has come and shows them with notify-rust.

use chrono::{DateTime, Utc};
use notify_rust::Notification;
use timetable_core::reminder::{NotificationGateway, ReminderQueue, ReminderRequest};
use timetable_core::store::SlotStore;
use timetable_core::{TimetableError, TimetableResult};

const APP_NAME: &str = "timetable";

pub struct DesktopGateway<S: SlotStore> {
    queue: ReminderQueue<S>,
}

impl<S: SlotStore> DesktopGateway<S> {
    pub fn new(queue: ReminderQueue<S>) -> Self {
        DesktopGateway { queue }
    }

    pub fn pending(&self) -> &[ReminderRequest] {
        self.queue.pending()
    }

    /// Show every reminder due at `now`. Returns the ones shown.
    ///
    /// A reminder that fails to show is logged and not retried.
    pub fn deliver_due(&mut self, now: DateTime<Utc>) -> TimetableResult<Vec<ReminderRequest>> {
        let due = self.queue.take_due(now)?;

        for reminder in &due {
            if let Err(e) = show(reminder) {
                log::error!("Could not show reminder '{}': {e}", reminder.subtitle);
            }
        }

        Ok(due)
    }
}

impl<S: SlotStore> NotificationGateway for DesktopGateway<S> {
    // Desktop sessions have no permission prompt; a notification that shows
    // counts as granted.
    fn request_permission(&mut self) -> TimetableResult<bool> {
        let shown = Notification::new()
            .appname(APP_NAME)
            .summary("Timetable")
            .body("Reminders will appear like this.")
            .show()
            .map(|_| ());

        match shown {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("Desktop notifications unavailable: {e}");
                Ok(false)
            }
        }
    }

    fn schedule_notification(&mut self, request: ReminderRequest) -> TimetableResult<()> {
        log::info!("Scheduling reminder '{}' at {}", request.subtitle, request.at);
        self.queue.push(request)
    }
}

fn show(reminder: &ReminderRequest) -> TimetableResult<()> {
    let body = if reminder.body.is_empty() {
        reminder.subtitle.clone()
    } else {
        format!("{}\n{}", reminder.subtitle, reminder.body)
    };

    Notification::new()
        .appname(APP_NAME)
        .summary(&reminder.title)
        .body(&body)
        .show()
        .map(|_| ())
        .map_err(|e| TimetableError::Notification(e.to_string()))
}
