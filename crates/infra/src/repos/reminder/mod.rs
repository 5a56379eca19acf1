mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use remindly_domain::{Reminder, ID};

/// Outcome of a conditional write of `remind_at`
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult {
    /// `remind_at` was equal to the expected value and has been moved
    Advanced,
    /// `remind_at` already had the new value, nothing was written
    AlreadyAdvanced,
    /// Someone else changed `remind_at` to a different value in the meantime
    Conflict { current: DateTime<Utc> },
    NotFound,
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Overwrites the stored `Reminder`, `false` if there was none to overwrite
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Ordered by creation
    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// All `Reminder`s of every owner with `remind_at <= as_of`
    async fn find_overdue(&self, as_of: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    /// `Reminder`s of the owner with `from <= remind_at <= to`, ordered by creation
    async fn find_due_within(
        &self,
        owner_id: &ID,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Atomically sets `remind_at` to `next` if it is still `expected`
    async fn advance(
        &self,
        reminder_id: &ID,
        expected: DateTime<Utc>,
        next: DateTime<Utc>,
    ) -> anyhow::Result<AdvanceResult>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult>;
}
