use super::{AdvanceResult, IReminderRepo};
use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, Utc};
use remindly_domain::{OccurrenceRule, Reminder, ReminderType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REMINDER_COLUMNS: &str = "reminder_uid, owner_uid, title, description, reminder_type, occurrence, remind_at, created, updated";

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    description: Option<String>,
    reminder_type: String,
    occurrence: Option<String>,
    remind_at: DateTime<Utc>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct RemindAtRaw {
    remind_at: DateTime<Utc>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            owner_id: raw.owner_uid.into(),
            title: raw.title,
            description: raw.description,
            reminder_type: ReminderType::from_stored(&raw.reminder_type),
            occurrence: OccurrenceRule::from_stored(raw.occurrence.as_deref()),
            remind_at: raw.remind_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

fn into_reminders(raws: Vec<ReminderRaw>) -> Vec<Reminder> {
    raws.into_iter().map(Reminder::from).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, owner_uid, title, description, reminder_type, occurrence, remind_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.owner_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.reminder_type.as_symbol())
        .bind(reminder.occurrence.map(|o| o.as_symbol()))
        .bind(reminder.remind_at)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            description = $3,
            reminder_type = $4,
            occurrence = $5,
            remind_at = $6,
            updated = $7
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.reminder_type.as_symbol())
        .bind(reminder.occurrence.map(|o| o.as_symbol()))
        .bind(reminder.remind_at)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(&format!(
            "SELECT {} FROM reminders WHERE reminder_uid = $1",
            REMINDER_COLUMNS
        ))
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(Reminder::from))
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(&format!(
            "SELECT {} FROM reminders WHERE owner_uid = $1 ORDER BY seq",
            REMINDER_COLUMNS
        ))
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(raws))
    }

    async fn find_overdue(&self, as_of: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(&format!(
            "SELECT {} FROM reminders WHERE remind_at <= $1 ORDER BY seq",
            REMINDER_COLUMNS
        ))
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(raws))
    }

    async fn find_due_within(
        &self,
        owner_id: &ID,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(&format!(
            r#"
            SELECT {} FROM reminders
            WHERE owner_uid = $1 AND
            remind_at >= $2 AND
            remind_at <= $3
            ORDER BY seq
            "#,
            REMINDER_COLUMNS
        ))
        .bind(owner_id.inner_ref())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(raws))
    }

    async fn advance(
        &self,
        reminder_id: &ID,
        expected: DateTime<Utc>,
        next: DateTime<Utc>,
    ) -> anyhow::Result<AdvanceResult> {
        let updated = sqlx::query_as::<_, RemindAtRaw>(
            r#"
            UPDATE reminders
            SET remind_at = $3,
            updated = $4
            WHERE reminder_uid = $1 AND
            remind_at = $2
            RETURNING remind_at
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(expected)
        .bind(next)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            return Ok(AdvanceResult::Advanced);
        }

        let current = sqlx::query_as::<_, RemindAtRaw>(
            "SELECT remind_at FROM reminders WHERE reminder_uid = $1",
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        let res = match current {
            None => AdvanceResult::NotFound,
            Some(c) if c.remind_at == next => AdvanceResult::AlreadyAdvanced,
            Some(c) => AdvanceResult::Conflict {
                current: c.remind_at,
            },
        };
        Ok(res)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(&format!(
            "DELETE FROM reminders WHERE reminder_uid = $1 RETURNING {}",
            REMINDER_COLUMNS
        ))
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(Reminder::from))
    }

    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query("DELETE FROM reminders WHERE owner_uid = $1")
            .bind(owner_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
