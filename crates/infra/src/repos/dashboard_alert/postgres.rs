use super::IDashboardAlertRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use steward_domain::{AlertSeverity, DashboardAlert, EntityRef, ID};
use tracing::error;

pub struct PostgresDashboardAlertRepo {
    pool: PgPool,
}

impl PostgresDashboardAlertRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn severity_rank(severity: AlertSeverity) -> i16 {
    match severity {
        AlertSeverity::Soft => 0,
        AlertSeverity::Urgent => 1,
        AlertSeverity::Critical => 2,
    }
}

#[derive(Debug, FromRow)]
struct DashboardAlertRaw {
    alert_uid: Uuid,
    church_uid: Uuid,
    user_uid: Uuid,
    alert_type: String,
    related_entity_type: Option<String>,
    related_entity_uid: Option<Uuid>,
    severity: String,
    message: Option<String>,
    active: bool,
    acknowledged_at: Option<i64>,
    dismissed_by: Option<Uuid>,
    dismissed_at: Option<i64>,
    created: i64,
}

impl TryFrom<DashboardAlertRaw> for DashboardAlert {
    type Error = anyhow::Error;

    fn try_from(raw: DashboardAlertRaw) -> anyhow::Result<Self> {
        let related_entity = match (raw.related_entity_type, raw.related_entity_uid) {
            (Some(entity_type), Some(entity_uid)) => {
                Some(EntityRef::new(entity_type.parse()?, entity_uid.into()))
            }
            _ => None,
        };

        Ok(Self {
            id: raw.alert_uid.into(),
            church_id: raw.church_uid.into(),
            user_id: raw.user_uid.into(),
            alert_type: raw.alert_type.parse()?,
            related_entity,
            severity: raw.severity.parse()?,
            message: raw.message,
            active: raw.active,
            acknowledged_at: raw.acknowledged_at,
            dismissed_by: raw.dismissed_by.map(ID::from),
            dismissed_at: raw.dismissed_at,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IDashboardAlertRepo for PostgresDashboardAlertRepo {
    async fn insert(&self, alert: &DashboardAlert) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO dashboard_alerts(
                alert_uid,
                church_uid,
                user_uid,
                alert_type,
                related_entity_type,
                related_entity_uid,
                severity,
                severity_rank,
                message,
                active,
                acknowledged_at,
                dismissed_by,
                dismissed_at,
                created
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(alert.id.inner_ref())
        .bind(alert.church_id.inner_ref())
        .bind(alert.user_id.inner_ref())
        .bind(alert.alert_type.as_str())
        .bind(alert.related_entity.as_ref().map(|e| e.entity_type.as_str()))
        .bind(alert.related_entity.as_ref().map(|e| *e.id.inner_ref()))
        .bind(alert.severity.as_str())
        .bind(severity_rank(alert.severity))
        .bind(&alert.message)
        .bind(alert.active)
        .bind(alert.acknowledged_at)
        .bind(alert.dismissed_by.as_ref().map(|id| *id.inner_ref()))
        .bind(alert.dismissed_at)
        .bind(alert.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, alert: &DashboardAlert) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE dashboard_alerts
            SET active = $2, acknowledged_at = $3, dismissed_by = $4, dismissed_at = $5
            WHERE alert_uid = $1
            "#,
        )
        .bind(alert.id.inner_ref())
        .bind(alert.active)
        .bind(alert.acknowledged_at)
        .bind(alert.dismissed_by.as_ref().map(|id| *id.inner_ref()))
        .bind(alert.dismissed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<DashboardAlert> {
        let raw = sqlx::query_as::<_, DashboardAlertRaw>(
            r#"
            SELECT * FROM dashboard_alerts AS a
            WHERE a.alert_uid = $1
            "#,
        )
        .bind(alert_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored alert {} is malformed: {:?}", alert_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find alert {}: {:?}", alert_id, e);
                None
            }
        }
    }

    async fn find_active(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<DashboardAlert>> {
        let rows = sqlx::query_as::<_, DashboardAlertRaw>(
            r#"
            SELECT * FROM dashboard_alerts AS a
            WHERE a.user_uid = $1 AND a.active = TRUE
            ORDER BY a.severity_rank DESC, a.created DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }
}
