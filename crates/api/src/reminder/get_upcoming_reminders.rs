use super::advance_due_reminder::AdvanceDueReminderUseCase;
use crate::error::RemindlyError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindly_api_structs::get_upcoming_reminders::*;
use remindly_domain::{Reminder, ID};
use remindly_infra::{RemindlyContext, UpcomingAdvancePolicy};
use tracing::{debug, error, info};

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindlyContext>,
) -> Result<HttpResponse, RemindlyError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = GetUpcomingRemindersUseCase { owner_id: owner.id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(RemindlyError::from)
}

/// Finds the `Reminder`s of the owner that are due within the next
/// `upcoming_window` and advances them according to the configured
/// `UpcomingAdvancePolicy`. The returned reminders are the snapshots taken
/// before advancing.
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub owner_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for RemindlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_datetime();
        let to = now + ctx.config.upcoming_window;

        let upcoming = ctx
            .repos
            .reminders
            .find_due_within(&self.owner_id, now, to)
            .await
            .map_err(|e| {
                error!(
                    "Unable to query upcoming reminders of owner: {}. Err: {:?}",
                    self.owner_id, e
                );
                UseCaseError::StorageError
            })?
            .into_iter()
            // Reminders due exactly now are not upcoming
            .filter(|r| r.remind_at > now)
            .collect::<Vec<_>>();

        if upcoming.is_empty() {
            debug!("No upcoming reminders");
            return Ok(upcoming);
        }
        info!("Got {} upcoming reminder(s)", upcoming.len());

        for reminder in &upcoming {
            let should_advance = match ctx.config.upcoming_advance_policy {
                UpcomingAdvancePolicy::AdvanceAll => true,
                UpcomingAdvancePolicy::OverdueOnly => reminder.is_due(now),
            };
            if !should_advance {
                continue;
            }

            let usecase = AdvanceDueReminderUseCase {
                reminder: reminder.clone(),
            };
            execute(usecase, ctx).await.map_err(|e| {
                error!(
                    "Unable to advance upcoming reminder: {}. Err: {:?}",
                    reminder.id, e
                );
                UseCaseError::StorageError
            })?;
        }

        Ok(upcoming)
    }
}
