use super::IEscalationLogRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use steward_domain::{EscalationLog, ID};
use tracing::error;

pub struct PostgresEscalationLogRepo {
    pool: PgPool,
}

impl PostgresEscalationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EscalationLogRaw {
    escalation_uid: Uuid,
    reminder_uid: Uuid,
    escalated_from: Uuid,
    escalated_to: Uuid,
    reason: Option<String>,
    status: String,
    resolved_at: Option<i64>,
    created: i64,
}

impl TryFrom<EscalationLogRaw> for EscalationLog {
    type Error = anyhow::Error;

    fn try_from(raw: EscalationLogRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.escalation_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            escalated_from: raw.escalated_from.into(),
            escalated_to: raw.escalated_to.into(),
            reason: raw.reason,
            status: raw.status.parse()?,
            resolved_at: raw.resolved_at,
            created: raw.created,
        })
    }
}

fn into_logs(rows: Vec<EscalationLogRaw>) -> anyhow::Result<Vec<EscalationLog>> {
    rows.into_iter().map(|row| row.try_into()).collect()
}

#[async_trait::async_trait]
impl IEscalationLogRepo for PostgresEscalationLogRepo {
    async fn insert_if_absent(&self, log: &EscalationLog) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO escalation_logs
            (escalation_uid, reminder_uid, escalated_from, escalated_to, reason, status, resolved_at, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (reminder_uid, escalated_to) DO NOTHING
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.reminder_id.inner_ref())
        .bind(log.escalated_from.inner_ref())
        .bind(log.escalated_to.inner_ref())
        .bind(&log.reason)
        .bind(log.status.as_str())
        .bind(log.resolved_at)
        .bind(log.created)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn save(&self, log: &EscalationLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE escalation_logs
            SET status = $2, resolved_at = $3
            WHERE escalation_uid = $1
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.status.as_str())
        .bind(log.resolved_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, log_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM escalation_logs AS e
            WHERE e.escalation_uid = $1
            "#,
        )
        .bind(log_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, log_id: &ID) -> Option<EscalationLog> {
        let raw = sqlx::query_as::<_, EscalationLogRaw>(
            r#"
            SELECT * FROM escalation_logs AS e
            WHERE e.escalation_uid = $1
            "#,
        )
        .bind(log_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored escalation log {} is malformed: {:?}", log_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find escalation log {}: {:?}", log_id, e);
                None
            }
        }
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<EscalationLog>> {
        let rows = sqlx::query_as::<_, EscalationLogRaw>(
            r#"
            SELECT * FROM escalation_logs AS e
            WHERE e.reminder_uid = $1
            ORDER BY e.created ASC
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_logs(rows)
    }

    async fn find_by_target(&self, user_id: &ID) -> anyhow::Result<Vec<EscalationLog>> {
        let rows = sqlx::query_as::<_, EscalationLogRaw>(
            r#"
            SELECT * FROM escalation_logs AS e
            WHERE e.escalated_to = $1
            ORDER BY e.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_logs(rows)
    }
}
