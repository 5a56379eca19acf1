use super::reminder_input::{InvalidReminderInput, ReminderInput};
use crate::error::RemindlyError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindly_api_structs::create_reminder::*;
use remindly_domain::{Reminder, ID};
use remindly_infra::RemindlyContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindlyContext>,
) -> Result<HttpResponse, RemindlyError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = CreateReminderUseCase {
        owner_id: owner.id,
        input: body.0.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(RemindlyError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub input: ReminderInput,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(InvalidReminderInput),
    StorageError,
}

impl From<UseCaseError> for RemindlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(e) => Self::UnprocessableEntity(e.message().into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        let input = self
            .input
            .clone()
            .validate()
            .map_err(UseCaseError::InvalidInput)?;

        let now = ctx.sys.get_datetime();
        let reminder = Reminder {
            id: Default::default(),
            owner_id: self.owner_id.clone(),
            title: input.title,
            description: input.description,
            reminder_type: input.reminder_type,
            occurrence: input.occurrence,
            remind_at: input.remind_at,
            created: now,
            updated: now,
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use remindly_domain::{EnumRepr, OccurrenceRule, ReminderType};

    #[actix_web::main]
    #[test]
    async fn creates_reminder() {
        let ctx = RemindlyContext::create_inmemory();
        let owner_id = ID::default();
        let remind_at = Utc.with_ymd_and_hms(2021, 6, 1, 8, 0, 0).unwrap();

        let mut usecase = CreateReminderUseCase {
            owner_id: owner_id.clone(),
            input: ReminderInput {
                title: Some("Mom".into()),
                description: Some("Buy flowers".into()),
                reminder_type: Some(EnumRepr::Symbol("birthday".into())),
                occurrence: None,
                remind_at: Some(remind_at),
            },
        };

        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminder.owner_id, owner_id);
        assert_eq!(reminder.reminder_type, ReminderType::Birthday);
        assert_eq!(reminder.occurrence, Some(OccurrenceRule::Yearly));
        assert_eq!(reminder.remind_at, remind_at);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(reminder));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_reminder_without_remind_at() {
        let ctx = RemindlyContext::create_inmemory();
        let owner_id = ID::default();

        let mut usecase = CreateReminderUseCase {
            owner_id: owner_id.clone(),
            input: ReminderInput {
                title: Some("Mom".into()),
                ..Default::default()
            },
        };

        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidInput(
                InvalidReminderInput::MissingRemindAt
            ))
        );
        assert!(ctx
            .repos
            .reminders
            .find_by_owner(&owner_id)
            .await
            .unwrap()
            .is_empty());
    }
}
