use chrono::{DateTime, Datelike, SubsecRound, Utc};
use remindly_api_structs::ReminderRequestBody;
use remindly_domain::{EnumRepr, OccurrenceRule, ReminderType};
use std::convert::TryFrom;

const MIN_REMIND_AT_YEAR: i32 = 1970;
const MAX_REMIND_AT_YEAR: i32 = 9999;

/// The fields of a reminder as sent by the client, before validation
#[derive(Debug, Clone, Default)]
pub struct ReminderInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_type: Option<EnumRepr>,
    pub occurrence: Option<EnumRepr>,
    pub remind_at: Option<DateTime<Utc>>,
}

impl From<ReminderRequestBody> for ReminderInput {
    fn from(body: ReminderRequestBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            reminder_type: body.reminder_type,
            occurrence: body.occurrence,
            remind_at: body.remind_at,
        }
    }
}

/// The fields of a reminder that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReminderInput {
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: ReminderType,
    pub occurrence: Option<OccurrenceRule>,
    pub remind_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReminderInput {
    MissingTitle,
    MissingRemindAt,
    RemindAtOutOfRange,
    UnsupportedType,
    UnsupportedOccurrence,
}

impl InvalidReminderInput {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingTitle => "Title is required.",
            Self::MissingRemindAt => "Remind At is required.",
            Self::RemindAtOutOfRange => "Remind At is out of range.",
            Self::UnsupportedType => "Type is not supported.",
            Self::UnsupportedOccurrence => "Occurrence is not supported.",
        }
    }
}

impl ReminderInput {
    pub fn validate(self) -> Result<ValidReminderInput, InvalidReminderInput> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => return Err(InvalidReminderInput::MissingTitle),
        };

        // Stored timestamps only keep microseconds
        let remind_at = self
            .remind_at
            .ok_or(InvalidReminderInput::MissingRemindAt)?
            .trunc_subsecs(6);
        if !(MIN_REMIND_AT_YEAR..=MAX_REMIND_AT_YEAR).contains(&remind_at.year()) {
            return Err(InvalidReminderInput::RemindAtOutOfRange);
        }

        let reminder_type = match self.reminder_type {
            Some(repr) => {
                ReminderType::try_from(repr).map_err(|_| InvalidReminderInput::UnsupportedType)?
            }
            None => ReminderType::default(),
        };

        let occurrence = match self.occurrence {
            Some(repr) => OccurrenceRule::parse_setting(repr)
                .map_err(|_| InvalidReminderInput::UnsupportedOccurrence)?,
            None => Some(OccurrenceRule::default()),
        };

        Ok(ValidReminderInput {
            title,
            description: self.description,
            reminder_type,
            occurrence,
            remind_at,
        })
    }
}
