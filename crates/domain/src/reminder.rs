use crate::{
    occurrence::{next_due_time, OccurrenceRule},
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

/// A `Reminder` is something the owner wants to be reminded of at `remind_at`,
/// and again at every following occurrence given by its `OccurrenceRule`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The owner of this `Reminder`, as identified by the auth token
    pub owner_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: ReminderType,
    /// `None` means that the `Reminder` does not repeat
    pub occurrence: Option<OccurrenceRule>,
    /// The next point in time at which this `Reminder` is due.
    /// This is the only field the scheduler ever changes.
    pub remind_at: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Reminder {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.remind_at <= now
    }

    /// The next `remind_at` of this `Reminder`, or `None` if it does not repeat
    pub fn next_occurrence(&self) -> Option<DateTime<Utc>> {
        self.occurrence
            .map(|rule| next_due_time(self.remind_at, rule))
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum ReminderType {
    Payment,
    Birthday,
    Event,
}

impl Default for ReminderType {
    fn default() -> Self {
        Self::Event
    }
}

impl ReminderType {
    pub fn as_symbol(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Birthday => "birthday",
            Self::Event => "event",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "payment" => Some(Self::Payment),
            "birthday" => Some(Self::Birthday),
            "event" => Some(Self::Event),
            _ => None,
        }
    }

    /// Older clients send the position in the enumeration instead of the name
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Payment),
            1 => Some(Self::Birthday),
            2 => Some(Self::Event),
            _ => None,
        }
    }

    /// Values read back from storage are never rejected
    pub fn from_stored(symbol: &str) -> Self {
        Self::from_symbol(symbol).unwrap_or_default()
    }
}

/// How an enumerated value is represented on the wire: either its
/// symbolic name or its legacy ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumRepr {
    Ordinal(i64),
    Symbol(String),
}

#[derive(Error, Debug, PartialEq)]
#[error("Unsupported value: {0:?}")]
pub struct UnsupportedValue(pub EnumRepr);

impl TryFrom<EnumRepr> for ReminderType {
    type Error = UnsupportedValue;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        let parsed = match &repr {
            EnumRepr::Symbol(s) => Self::from_symbol(s),
            EnumRepr::Ordinal(o) => Self::from_ordinal(*o),
        };
        parsed.ok_or(UnsupportedValue(repr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_reminder_type_from_symbol_and_ordinal() {
        let t: ReminderType = serde_json::from_str("\"birthday\"").unwrap();
        assert_eq!(t, ReminderType::Birthday);
        let t: ReminderType = serde_json::from_str("0").unwrap();
        assert_eq!(t, ReminderType::Payment);
        let t: ReminderType = serde_json::from_str("2").unwrap();
        assert_eq!(t, ReminderType::Event);
    }

    #[test]
    fn rejects_unknown_reminder_types() {
        assert!(serde_json::from_str::<ReminderType>("-1").is_err());
        assert!(serde_json::from_str::<ReminderType>("3").is_err());
        // Ordinals have to be numbers
        assert!(serde_json::from_str::<ReminderType>("\"1\"").is_err());
        assert!(serde_json::from_str::<ReminderType>("\"holiday\"").is_err());
    }

    #[test]
    fn serializes_reminder_type_symbolically() {
        assert_eq!(
            serde_json::to_string(&ReminderType::Payment).unwrap(),
            "\"payment\""
        );
    }

    #[test]
    fn stored_values_fall_back_to_default() {
        assert_eq!(ReminderType::from_stored("birthday"), ReminderType::Birthday);
        assert_eq!(ReminderType::from_stored("garbage"), ReminderType::Event);
    }

    #[test]
    fn next_occurrence_of_reminder() {
        let remind_at = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        let mut reminder = Reminder {
            id: Default::default(),
            owner_id: Default::default(),
            title: "Pay rent".into(),
            description: None,
            reminder_type: ReminderType::Payment,
            occurrence: Some(OccurrenceRule::Weekly),
            remind_at,
            created: remind_at,
            updated: remind_at,
        };
        assert_eq!(
            reminder.next_occurrence(),
            Some(Utc.with_ymd_and_hms(2021, 3, 8, 12, 0, 0).unwrap())
        );
        assert!(reminder.is_due(remind_at));
        assert!(!reminder.is_due(remind_at - chrono::Duration::milliseconds(1)));

        reminder.occurrence = None;
        assert_eq!(reminder.next_occurrence(), None);
    }
}
