mod occurrence;
mod reminder;
mod shared;

pub use occurrence::{next_due_time, OccurrenceRule, NO_REPEAT_SYMBOL};
pub use reminder::{EnumRepr, Reminder, ReminderType, UnsupportedValue};
pub use shared::entity::{Entity, InvalidIDError, ID};
