use remindly_infra::RemindlyContext;
use std::fmt::Debug;
use tracing::error;

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Error;

    /// Identifier used in the tracing spans
    const NAME: &'static str;

    async fn execute(&mut self, ctx: &RemindlyContext) -> Result<Self::Response, Self::Error>;
}

#[tracing::instrument(name = "UseCase executed", fields(usecase = %U::NAME), skip(usecase, ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &RemindlyContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
    U::Error: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
