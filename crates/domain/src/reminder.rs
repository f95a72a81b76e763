use crate::duration::{resolve_due_at, FormatError};
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// A `Reminder` is a message a user asked to receive in a private
/// channel once `remind_at` has passed.
///
/// It is never updated. The send reminders job deletes it right after
/// the delivery attempt, so a `Reminder` that still exists has not been
/// delivered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The chat user who should receive the `Reminder`
    pub user_id: String,
    /// Free form text given by the user
    pub message: String,
    /// The instant after which the `Reminder` is due
    pub remind_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(user_id: String, message: String, remind_at: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            message,
            remind_at,
        }
    }

    /// Creates a `Reminder` that is due `offset` after `now`, e.g. `5d3h30m`
    pub fn from_offset(
        user_id: String,
        message: String,
        offset: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, FormatError> {
        let remind_at = resolve_due_at(now, offset)?;
        Ok(Self::new(user_id, message, remind_at))
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.remind_at < now
    }

    /// The text that is sent to the user when the `Reminder` is delivered
    pub fn delivery_text(&self) -> String {
        format!(
            "Hi there! You asked me to remind you about {} - this is that reminder!",
            self.message
        )
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
