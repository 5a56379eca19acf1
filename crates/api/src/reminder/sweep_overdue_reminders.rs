use super::advance_due_reminder::{AdvanceDueReminderUseCase, AdvanceOutcome};
use crate::shared::usecase::{execute, UseCase};
use chrono::{DateTime, Utc};
use remindly_infra::RemindlyContext;
use tracing::{debug, error, info};

/// Advances every overdue `Reminder` of every owner by one occurrence
#[derive(Debug)]
pub struct SweepOverdueRemindersUseCase {
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    pub found: usize,
    pub advanced: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SweepOverdueRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SweepOverdueReminders";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        let overdue = ctx
            .repos
            .reminders
            .find_overdue(self.now)
            .await
            .map_err(|e| {
                error!("Unable to query overdue reminders. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut report = SweepReport {
            found: overdue.len(),
            ..Default::default()
        };
        if overdue.is_empty() {
            debug!("No overdue reminders at {}", self.now);
            return Ok(report);
        }

        // A failing reminder must not stop the rest of the sweep
        for reminder in overdue {
            let usecase = AdvanceDueReminderUseCase { reminder };
            match execute(usecase, ctx).await {
                Ok(AdvanceOutcome::Advanced { .. }) => report.advanced += 1,
                Ok(AdvanceOutcome::Skipped(_)) => report.skipped += 1,
                Err(_) => report.failed += 1,
            }
        }

        info!(
            "Swept overdue reminders. Found: {}, advanced: {}, skipped: {}, failed: {}",
            report.found, report.advanced, report.skipped, report.failed
        );

        Ok(report)
    }
}
