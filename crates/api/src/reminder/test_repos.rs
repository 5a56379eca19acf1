use chrono::{DateTime, Utc};
use remindly_domain::{Reminder, ID};
use remindly_infra::{AdvanceResult, DeleteResult, IReminderRepo, InMemoryReminderRepo};
use std::sync::Mutex;

/// Reminder repo that delegates to an in memory repo but can be told to
/// fail the queries or the advance of chosen reminders
#[derive(Default)]
pub struct FlakyReminderRepo {
    pub inner: InMemoryReminderRepo,
    pub fail_queries: bool,
    pub fail_advance_of: Mutex<Vec<ID>>,
    /// Deletes the reminder right before it is saved, like a concurrent delete would
    pub delete_before_save: bool,
}

impl FlakyReminderRepo {
    pub fn failing_queries() -> Self {
        Self {
            fail_queries: true,
            ..Default::default()
        }
    }

    pub fn fail_advance_of(&self, reminder_id: &ID) {
        self.fail_advance_of
            .lock()
            .unwrap()
            .push(reminder_id.clone());
    }

    fn check_queries(&self) -> anyhow::Result<()> {
        if self.fail_queries {
            anyhow::bail!("Store is unavailable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FlakyReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        if self.delete_before_save {
            self.inner.delete(&reminder.id).await?;
        }
        self.inner.save(reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_by_owner(owner_id).await
    }

    async fn find_overdue(&self, as_of: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        self.check_queries()?;
        self.inner.find_overdue(as_of).await
    }

    async fn find_due_within(
        &self,
        owner_id: &ID,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        self.check_queries()?;
        self.inner.find_due_within(owner_id, from, to).await
    }

    async fn advance(
        &self,
        reminder_id: &ID,
        expected: DateTime<Utc>,
        next: DateTime<Utc>,
    ) -> anyhow::Result<AdvanceResult> {
        if self.fail_advance_of.lock().unwrap().contains(reminder_id) {
            anyhow::bail!("Unable to advance reminder: {}", reminder_id);
        }
        self.inner.advance(reminder_id, expected, next).await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.delete(reminder_id).await
    }

    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult> {
        self.inner.delete_by_owner(owner_id).await
    }
}
