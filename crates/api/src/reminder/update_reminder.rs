use super::reminder_input::{InvalidReminderInput, ReminderInput};
use crate::error::RemindlyError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindly_api_structs::update_reminder::*;
use remindly_domain::{Reminder, ID};
use remindly_infra::RemindlyContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindlyContext>,
) -> Result<HttpResponse, RemindlyError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = UpdateReminderUseCase {
        owner_id: owner.id,
        reminder_id: path.reminder_id.clone(),
        input: body.0.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(RemindlyError::from)
}

/// Overwrites every client owned field of the reminder
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub owner_id: ID,
    pub reminder_id: ID,
    pub input: ReminderInput,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidInput(InvalidReminderInput),
    StorageError,
}

impl From<UseCaseError> for RemindlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::InvalidInput(e) => Self::UnprocessableEntity(e.message().into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            Some(reminder) if reminder.owner_id == self.owner_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let input = self
            .input
            .clone()
            .validate()
            .map_err(UseCaseError::InvalidInput)?;

        reminder.title = input.title;
        reminder.description = input.description;
        reminder.reminder_type = input.reminder_type;
        reminder.occurrence = input.occurrence;
        reminder.remind_at = input.remind_at;
        reminder.updated = ctx.sys.get_datetime();

        let saved = ctx
            .repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !saved {
            // Deleted after it was read
            return Err(UseCaseError::NotFound(self.reminder_id.clone()));
        }

        Ok(reminder)
    }
}
