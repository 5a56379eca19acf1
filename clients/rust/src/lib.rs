mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use reminder::ReminderClient;
pub use reminder::ReminderInput;
pub use remindly_api_structs::dtos::ReminderDTO as Reminder;
pub use remindly_domain::{EnumRepr, OccurrenceRule, ReminderType, ID};
use status::StatusClient;
use std::sync::Arc;

/// Remindly Server SDK
///
/// The SDK contains methods for interacting with the Remindly server
/// API on behalf of the owner identified by the given token.
#[derive(Clone)]
pub struct RemindlySDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl RemindlySDK {
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        let token = token.into();
        if !token.is_empty() {
            base.set_token(token);
        }
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
