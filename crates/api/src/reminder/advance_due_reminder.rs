use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use remindly_domain::Reminder;
use remindly_infra::{AdvanceResult, RemindlyContext};
use tracing::{error, info};

/// Moves a single `Reminder` from its current `remind_at` to its next
/// occurrence. The caller provides the snapshot it read from the store,
/// and the write only succeeds if the stored `remind_at` still matches it.
#[derive(Debug)]
pub struct AdvanceDueReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Advanced {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The `Reminder` has no occurrence rule
    NonRepeating,
    /// A concurrent advance already moved it to the same next occurrence
    AlreadyAdvanced,
    /// Someone else moved `remind_at` to another value after the snapshot was taken
    Conflict,
    /// Deleted after the snapshot was taken
    NotFound,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for AdvanceDueReminderUseCase {
    type Response = AdvanceOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "AdvanceDueReminder";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        let reminder = &self.reminder;
        let from = reminder.remind_at;
        let to = match reminder.next_occurrence() {
            Some(next) => next,
            None => return Ok(AdvanceOutcome::Skipped(SkipReason::NonRepeating)),
        };

        let res = ctx
            .repos
            .reminders
            .advance(&reminder.id, from, to)
            .await
            .map_err(|e| {
                error!("Unable to advance reminder: {}. Err: {:?}", reminder.id, e);
                UseCaseError::StorageError
            })?;

        let outcome = match res {
            AdvanceResult::Advanced => {
                info!("Updated {}. Next occurrence: {}", reminder.id, to);
                AdvanceOutcome::Advanced { from, to }
            }
            AdvanceResult::AlreadyAdvanced => AdvanceOutcome::Skipped(SkipReason::AlreadyAdvanced),
            AdvanceResult::Conflict { current } => {
                info!(
                    "Reminder {} was moved to {} by someone else, not advancing it",
                    reminder.id, current
                );
                AdvanceOutcome::Skipped(SkipReason::Conflict)
            }
            AdvanceResult::NotFound => AdvanceOutcome::Skipped(SkipReason::NotFound),
        };

        Ok(outcome)
    }
}
