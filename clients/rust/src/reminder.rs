use crate::{APIResponse, BaseClient, ID};
use chrono::{DateTime, Utc};
use remindly_api_structs::*;
use remindly_domain::EnumRepr;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

/// Used both for creating and for overwriting a reminder
#[derive(Debug, Clone, Default)]
pub struct ReminderInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_type: Option<EnumRepr>,
    pub occurrence: Option<EnumRepr>,
    pub remind_at: Option<DateTime<Utc>>,
}

impl ReminderInput {
    pub fn new<T: Into<String>>(title: T, remind_at: DateTime<Utc>) -> Self {
        Self {
            title: Some(title.into()),
            remind_at: Some(remind_at),
            ..Default::default()
        }
    }

    pub fn with_occurrence<T: Into<String>>(mut self, occurrence: T) -> Self {
        self.occurrence = Some(EnumRepr::Symbol(occurrence.into()));
        self
    }

    pub fn with_type<T: Into<String>>(mut self, reminder_type: T) -> Self {
        self.reminder_type = Some(EnumRepr::Symbol(reminder_type.into()));
        self
    }

    fn into_body(self) -> ReminderRequestBody {
        ReminderRequestBody {
            title: self.title,
            description: self.description,
            reminder_type: self.reminder_type,
            occurrence: self.occurrence,
            remind_at: self.remind_at,
        }
    }
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: ReminderInput) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(input.into_body(), "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn get_upcoming(&self) -> APIResponse<get_upcoming_reminders::APIResponse> {
        self.base
            .get("reminders/upcoming".into(), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        reminder_id: ID,
        input: ReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        self.base
            .put(
                input.into_body(),
                format!("reminders/{}", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn delete_all(&self) -> APIResponse<delete_reminders::APIResponse> {
        self.base.delete("reminders".into(), StatusCode::OK).await
    }
}
