use chrono::{DateTime, Utc};
use remindly_domain::{OccurrenceRule, Reminder, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    /// `null` when the reminder does not repeat
    pub occurrence: Option<OccurrenceRule>,
    pub remind_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            title: reminder.title,
            description: reminder.description,
            reminder_type: reminder.reminder_type,
            occurrence: reminder.occurrence,
            remind_at: reminder.remind_at,
            created_at: reminder.created,
            updated_at: reminder.updated,
        }
    }
}
