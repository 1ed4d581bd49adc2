use super::IReminderRepo;
use crate::repos::shared::repo::UpdateResult;
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, Transaction};
use std::convert::{TryFrom, TryInto};
use steward_domain::{EntityRef, Reminder, ReminderSchedule, ReminderStatus, ID};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    church_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    priority: String,
    due_ts: i64,
    reminder_type: String,
    related_entity_type: Option<String>,
    related_entity_uid: Option<Uuid>,
    parent_reminder_uid: Option<Uuid>,
    acknowledged: bool,
    acknowledged_at: Option<i64>,
    acknowledged_action: Option<String>,
    snoozed_until: Option<i64>,
    snooze_count: i64,
    escalated: bool,
    escalated_at: Option<i64>,
    escalated_to: Option<Uuid>,
    status: String,
    created_by: Uuid,
    created: i64,
    updated: i64,
    version: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        let related_entity = match (raw.related_entity_type, raw.related_entity_uid) {
            (Some(entity_type), Some(entity_uid)) => {
                Some(EntityRef::new(entity_type.parse()?, entity_uid.into()))
            }
            _ => None,
        };

        Ok(Self {
            id: raw.reminder_uid.into(),
            church_id: raw.church_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            priority: raw.priority.parse()?,
            due_ts: raw.due_ts,
            reminder_type: raw.reminder_type.parse()?,
            related_entity,
            parent_reminder_id: raw.parent_reminder_uid.map(ID::from),
            acknowledged: raw.acknowledged,
            acknowledged_at: raw.acknowledged_at,
            acknowledged_action: raw
                .acknowledged_action
                .map(|action| action.parse())
                .transpose()?,
            snoozed_until: raw.snoozed_until,
            snooze_count: raw.snooze_count,
            escalated: raw.escalated,
            escalated_at: raw.escalated_at,
            escalated_to: raw.escalated_to.map(ID::from),
            status: raw.status.parse()?,
            created_by: raw.created_by.into(),
            created: raw.created,
            updated: raw.updated,
            version: raw.version,
        })
    }
}

#[derive(Debug, FromRow)]
struct ScheduleRaw {
    schedule_uid: Uuid,
    reminder_uid: Uuid,
    trigger_ts: i64,
    trigger_offset: Option<String>,
    triggered: bool,
    triggered_at: Option<i64>,
    superseded: bool,
    created: i64,
}

impl TryFrom<ScheduleRaw> for ReminderSchedule {
    type Error = anyhow::Error;

    fn try_from(raw: ScheduleRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.schedule_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            trigger_ts: raw.trigger_ts,
            offset: raw.trigger_offset.map(|o| o.parse()).transpose()?,
            triggered: raw.triggered,
            triggered_at: raw.triggered_at,
            superseded: raw.superseded,
            created: raw.created,
        })
    }
}

fn into_reminders(rows: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    rows.into_iter().map(|row| row.try_into()).collect()
}

fn into_schedules(rows: Vec<ScheduleRaw>) -> anyhow::Result<Vec<ReminderSchedule>> {
    rows.into_iter().map(|row| row.try_into()).collect()
}

async fn insert_schedule(
    tx: &mut Transaction<'_, Postgres>,
    schedule: &ReminderSchedule,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reminder_schedules
        (schedule_uid, reminder_uid, trigger_ts, trigger_offset, triggered, triggered_at, superseded, created)
        VALUES($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(schedule.id.inner_ref())
    .bind(schedule.reminder_id.inner_ref())
    .bind(schedule.trigger_ts)
    .bind(schedule.offset.as_ref().map(|o| o.token().to_string()))
    .bind(schedule.triggered)
    .bind(schedule.triggered_at)
    .bind(schedule.superseded)
    .bind(schedule.created)
    .execute(&mut *tx)
    .await?;

    Ok(())
}

/// Writes the mutable state of the `Reminder` if the stored version matches
async fn compare_and_swap(
    tx: &mut Transaction<'_, Postgres>,
    reminder: &Reminder,
) -> anyhow::Result<UpdateResult> {
    let res = sqlx::query(
        r#"
        UPDATE reminders SET
            acknowledged = $2,
            acknowledged_at = $3,
            acknowledged_action = $4,
            snoozed_until = $5,
            snooze_count = $6,
            escalated = $7,
            escalated_at = $8,
            escalated_to = $9,
            status = $10,
            updated = $11,
            version = version + 1
        WHERE reminder_uid = $1 AND version = $12
        "#,
    )
    .bind(reminder.id.inner_ref())
    .bind(reminder.acknowledged)
    .bind(reminder.acknowledged_at)
    .bind(reminder.acknowledged_action.map(|a| a.as_str()))
    .bind(reminder.snoozed_until)
    .bind(reminder.snooze_count)
    .bind(reminder.escalated)
    .bind(reminder.escalated_at)
    .bind(reminder.escalated_to.as_ref().map(|id| *id.inner_ref()))
    .bind(reminder.status.as_str())
    .bind(reminder.updated)
    .bind(reminder.version)
    .execute(&mut *tx)
    .await?;

    if res.rows_affected() == 0 {
        return Ok(UpdateResult::VersionConflict);
    }
    Ok(UpdateResult::Updated)
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(
        &self,
        reminder: &Reminder,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO reminders(
                reminder_uid,
                church_uid,
                user_uid,
                title,
                description,
                priority,
                due_ts,
                reminder_type,
                related_entity_type,
                related_entity_uid,
                parent_reminder_uid,
                acknowledged,
                acknowledged_at,
                acknowledged_action,
                snoozed_until,
                snooze_count,
                escalated,
                escalated_at,
                escalated_to,
                status,
                created_by,
                created,
                updated,
                version
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.church_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.priority.as_str())
        .bind(reminder.due_ts)
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.related_entity.as_ref().map(|e| e.entity_type.as_str()))
        .bind(reminder.related_entity.as_ref().map(|e| *e.id.inner_ref()))
        .bind(reminder.parent_reminder_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.acknowledged)
        .bind(reminder.acknowledged_at)
        .bind(reminder.acknowledged_action.map(|a| a.as_str()))
        .bind(reminder.snoozed_until)
        .bind(reminder.snooze_count)
        .bind(reminder.escalated)
        .bind(reminder.escalated_at)
        .bind(reminder.escalated_to.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.status.as_str())
        .bind(reminder.created_by.inner_ref())
        .bind(reminder.created)
        .bind(reminder.updated)
        .bind(reminder.version)
        .execute(&mut tx)
        .await?;

        for schedule in schedules {
            insert_schedule(&mut tx, schedule).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;
        let res = compare_and_swap(&mut tx, reminder).await?;
        tx.commit().await?;
        Ok(res)
    }

    async fn save_and_reschedule(
        &self,
        reminder: &Reminder,
        replacement: Option<&ReminderSchedule>,
    ) -> anyhow::Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;
        if compare_and_swap(&mut tx, reminder).await? == UpdateResult::VersionConflict {
            tx.rollback().await?;
            return Ok(UpdateResult::VersionConflict);
        }

        sqlx::query(
            r#"
            UPDATE reminder_schedules SET superseded = TRUE
            WHERE reminder_uid = $1 AND triggered = FALSE AND superseded = FALSE
            "#,
        )
        .bind(reminder.id.inner_ref())
        .execute(&mut tx)
        .await?;

        if let Some(replacement) = replacement {
            insert_schedule(&mut tx, replacement).await?;
        }

        tx.commit().await?;
        Ok(UpdateResult::Updated)
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored reminder {} is malformed: {:?}", reminder_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find reminder {}: {:?}", reminder_id, e);
                None
            }
        }
    }

    async fn find_by_user(
        &self,
        church_id: &ID,
        user_id: &ID,
        status: Option<ReminderStatus>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.church_uid = $1
                AND (r.user_uid = $2 OR r.created_by = $2 OR r.escalated_to = $2)
                AND ($3::text IS NULL OR r.status = $3)
            ORDER BY r.due_ts ASC
            "#,
        )
        .bind(church_id.inner_ref())
        .bind(user_id.inner_ref())
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn find_overdue(
        &self,
        now: i64,
        after: Option<&Reminder>,
        limit: usize,
    ) -> anyhow::Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = 'active'
                AND r.acknowledged = FALSE
                AND GREATEST(r.due_ts, COALESCE(r.snoozed_until, r.due_ts)) <= $1
                AND ($3::BIGINT IS NULL OR (r.due_ts, r.reminder_uid) > ($3, $4::uuid))
            ORDER BY r.due_ts ASC, r.reminder_uid ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit as i64)
        .bind(after.map(|r| r.due_ts))
        .bind(after.map(|r| *r.id.inner_ref()))
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn find_schedules(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        let rows = sqlx::query_as::<_, ScheduleRaw>(
            r#"
            SELECT * FROM reminder_schedules AS s
            WHERE s.reminder_uid = $1
            ORDER BY s.trigger_ts ASC
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_schedules(rows)
    }

    async fn claim_due_schedules(
        &self,
        before: i64,
        now: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let rows = sqlx::query_as::<_, ScheduleRaw>(
            r#"
            UPDATE reminder_schedules AS s
            SET triggered = TRUE, triggered_at = $2
            WHERE s.triggered = FALSE AND s.superseded = FALSE AND s.trigger_ts <= $1
            RETURNING *
            "#,
        )
        .bind(before)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        into_schedules(rows)
    }
}
