use crate::error::RemindlyError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindly_api_structs::delete_reminders::*;
use remindly_domain::ID;
use remindly_infra::{DeleteResult, RemindlyContext};

pub async fn delete_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindlyContext>,
) -> Result<HttpResponse, RemindlyError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = DeleteRemindersUseCase { owner_id: owner.id };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                deleted_count: res.deleted_count,
            })
        })
        .map_err(RemindlyError::from)
}

/// Removes every reminder of the owner
#[derive(Debug)]
pub struct DeleteRemindersUseCase {
    pub owner_id: ID,
}

#[derive(Debug)]
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
impl UseCase for DeleteRemindersUseCase {
    type Response = DeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminders";

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_owner(&self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
