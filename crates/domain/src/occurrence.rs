use crate::reminder::{EnumRepr, UnsupportedValue};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How often a `Reminder` repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum OccurrenceRule {
    Daily,
    EveryOtherDay,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

/// Symbol used on the wire for a `Reminder` that does not repeat
pub const NO_REPEAT_SYMBOL: &str = "none";

enum Step {
    Days(i64),
    Months(u32),
}

impl Default for OccurrenceRule {
    fn default() -> Self {
        Self::Yearly
    }
}

impl OccurrenceRule {
    pub fn as_symbol(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::EveryOtherDay => "every_other_day",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi_weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half_yearly",
            Self::Yearly => "yearly",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let rule = match symbol {
            "daily" => Self::Daily,
            "every_other_day" => Self::EveryOtherDay,
            "weekly" => Self::Weekly,
            "bi_weekly" => Self::BiWeekly,
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            "half_yearly" => Self::HalfYearly,
            "yearly" => Self::Yearly,
            _ => return None,
        };
        Some(rule)
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        let rule = match ordinal {
            0 => Self::Daily,
            1 => Self::EveryOtherDay,
            2 => Self::Weekly,
            3 => Self::BiWeekly,
            4 => Self::Monthly,
            5 => Self::Quarterly,
            6 => Self::HalfYearly,
            7 => Self::Yearly,
            _ => return None,
        };
        Some(rule)
    }

    /// Parses the occurrence setting of a client request where the
    /// `NO_REPEAT_SYMBOL` turns repetition off.
    pub fn parse_setting(repr: EnumRepr) -> Result<Option<Self>, UnsupportedValue> {
        match &repr {
            EnumRepr::Symbol(s) if s == NO_REPEAT_SYMBOL => Ok(None),
            _ => Self::try_from(repr).map(Some),
        }
    }

    /// Unrecognized stored rules are treated as yearly
    pub fn from_stored(symbol: Option<&str>) -> Option<Self> {
        symbol.map(|s| Self::from_symbol(s).unwrap_or_default())
    }

    fn step(&self) -> Step {
        match self {
            Self::Daily => Step::Days(1),
            Self::EveryOtherDay => Step::Days(2),
            Self::Weekly => Step::Days(7),
            Self::BiWeekly => Step::Days(14),
            Self::Monthly => Step::Months(1),
            Self::Quarterly => Step::Months(3),
            Self::HalfYearly => Step::Months(6),
            Self::Yearly => Step::Months(12),
        }
    }

    /// Day based rules add an exact duration. Month based rules add calendar
    /// months and clamp to the last day of the target month when the day does
    /// not exist there, e.g. Jan 31 + 1 month = Feb 28 (or 29).
    pub fn next_due_time(&self, current: DateTime<Utc>) -> DateTime<Utc> {
        let next = match self.step() {
            Step::Days(days) => current.checked_add_signed(Duration::days(days)),
            Step::Months(months) => current.checked_add_months(Months::new(months)),
        };
        next.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl TryFrom<EnumRepr> for OccurrenceRule {
    type Error = UnsupportedValue;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        let parsed = match &repr {
            EnumRepr::Symbol(s) => Self::from_symbol(s),
            EnumRepr::Ordinal(o) => Self::from_ordinal(*o),
        };
        parsed.ok_or(UnsupportedValue(repr))
    }
}

pub fn next_due_time(current: DateTime<Utc>, rule: OccurrenceRule) -> DateTime<Utc> {
    rule.next_due_time(current)
}
