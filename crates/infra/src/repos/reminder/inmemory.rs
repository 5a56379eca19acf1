use super::{AdvanceResult, IReminderRepo};
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use chrono::{DateTime, Utc};
use remindly_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        Ok(save(reminder, &self.reminders))
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.owner_id == *owner_id))
    }

    async fn find_overdue(&self, as_of: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.remind_at <= as_of))
    }

    async fn find_due_within(
        &self,
        owner_id: &ID,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.owner_id == *owner_id && from <= r.remind_at && r.remind_at <= to
        }))
    }

    async fn advance(
        &self,
        reminder_id: &ID,
        expected: DateTime<Utc>,
        next: DateTime<Utc>,
    ) -> anyhow::Result<AdvanceResult> {
        // The lock is held for both the comparison and the write
        let mut reminders = self.reminders.lock().unwrap();
        let reminder = match reminders.iter_mut().find(|r| r.id == *reminder_id) {
            Some(r) => r,
            None => return Ok(AdvanceResult::NotFound),
        };

        let res = if reminder.remind_at == expected {
            reminder.remind_at = next;
            reminder.updated = Utc::now();
            AdvanceResult::Advanced
        } else if reminder.remind_at == next {
            AdvanceResult::AlreadyAdvanced
        } else {
            AdvanceResult::Conflict {
                current: reminder.remind_at,
            }
        };
        Ok(res)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| r.owner_id == *owner_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use remindly_domain::{OccurrenceRule, ReminderType};

    fn reminder_factory(owner_id: &ID, remind_at: DateTime<Utc>) -> Reminder {
        Reminder {
            id: Default::default(),
            owner_id: owner_id.clone(),
            title: "Water the plants".into(),
            description: None,
            reminder_type: ReminderType::Event,
            occurrence: Some(OccurrenceRule::Daily),
            remind_at,
            created: remind_at,
            updated: remind_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn advance_is_conditional_and_idempotent() {
        let repo = InMemoryReminderRepo::new();
        let reminder = reminder_factory(&ID::default(), now());
        repo.insert(&reminder).await.unwrap();

        let next = now() + Duration::days(1);
        let res = repo.advance(&reminder.id, now(), next).await.unwrap();
        assert_eq!(res, AdvanceResult::Advanced);

        // Same destination a second time is a no-op
        let res = repo.advance(&reminder.id, now(), next).await.unwrap();
        assert_eq!(res, AdvanceResult::AlreadyAdvanced);
        let stored = repo.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.remind_at, next);

        // Stale expectation with a different destination does not clobber
        let other = now() + Duration::days(3);
        let res = repo.advance(&reminder.id, now(), other).await.unwrap();
        assert_eq!(res, AdvanceResult::Conflict { current: next });
        let stored = repo.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.remind_at, next);

        let res = repo.advance(&ID::default(), now(), next).await.unwrap();
        assert_eq!(res, AdvanceResult::NotFound);
    }

    #[tokio::test]
    async fn find_due_within_is_inclusive_ordered_and_owner_scoped() {
        let repo = InMemoryReminderRepo::new();
        let owner = ID::default();
        let other_owner = ID::default();
        let to = now() + Duration::hours(1);

        let later = reminder_factory(&owner, now() + Duration::minutes(50));
        let at_start = reminder_factory(&owner, now());
        let at_end = reminder_factory(&owner, to);
        let outside = reminder_factory(&owner, to + Duration::minutes(1));
        let foreign = reminder_factory(&other_owner, now() + Duration::minutes(10));
        for r in &[&later, &at_start, &at_end, &outside, &foreign] {
            repo.insert(r).await.unwrap();
        }

        let res = repo.find_due_within(&owner, now(), to).await.unwrap();
        assert_eq!(res, vec![later, at_start, at_end]);

        let res = repo.find_due_within(&other_owner, now(), to).await.unwrap();
        assert_eq!(res, vec![foreign]);
    }

    #[tokio::test]
    async fn find_overdue_spans_all_owners() {
        let repo = InMemoryReminderRepo::new();
        let overdue_1 = reminder_factory(&ID::default(), now() - Duration::days(10));
        let overdue_2 = reminder_factory(&ID::default(), now());
        let not_due = reminder_factory(&ID::default(), now() + Duration::seconds(1));
        for r in &[&overdue_1, &overdue_2, &not_due] {
            repo.insert(r).await.unwrap();
        }

        let res = repo.find_overdue(now()).await.unwrap();
        assert_eq!(res, vec![overdue_1, overdue_2]);
    }

    #[tokio::test]
    async fn crud() {
        let repo = InMemoryReminderRepo::new();
        let owner = ID::default();
        let mut reminder = reminder_factory(&owner, now());
        let second = reminder_factory(&owner, now());
        repo.insert(&reminder).await.unwrap();
        repo.insert(&second).await.unwrap();

        reminder.title = "Water the cactus".into();
        assert!(repo.save(&reminder).await.unwrap());
        assert_eq!(
            repo.find(&reminder.id).await.unwrap().unwrap().title,
            "Water the cactus"
        );
        assert_eq!(repo.find_by_owner(&owner).await.unwrap().len(), 2);

        let missing = reminder_factory(&owner, now());
        assert!(!repo.save(&missing).await.unwrap());
        assert!(repo.find(&missing.id).await.unwrap().is_none());

        let deleted = repo.delete(&reminder.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, reminder.id);
        assert!(repo.find(&reminder.id).await.unwrap().is_none());

        let res = repo.delete_by_owner(&owner).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(repo.find_by_owner(&owner).await.unwrap().is_empty());
    }
}
