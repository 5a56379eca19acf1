use super::utils::create_token;
use remindly_api::Application;
use remindly_domain::ID;
use remindly_infra::{RemindlyContext, StaticTimeSys};
use remindly_sdk::RemindlySDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: RemindlyContext,
    pub address: String,
}

impl TestApp {
    /// SDK acting on behalf of a new owner
    pub fn new_owner(&self) -> (ID, RemindlySDK) {
        let owner_id = ID::default();
        let token = create_token(&self.ctx.config.jwt_secret, &owner_id.as_string());
        (owner_id, RemindlySDK::new(self.address.clone(), token))
    }

    pub fn anonymous(&self) -> RemindlySDK {
        RemindlySDK::new(self.address.clone(), "")
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    spawn_app_with_context(RemindlyContext::create_inmemory()).await
}

/// Like `spawn_app` but the clock of the application is stuck at `now_ts`
pub async fn spawn_app_at(now_ts: i64) -> TestApp {
    let mut ctx = RemindlyContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now_ts));
    spawn_app_with_context(ctx).await
}

async fn spawn_app_with_context(mut ctx: RemindlyContext) -> TestApp {
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { ctx, address }
}
