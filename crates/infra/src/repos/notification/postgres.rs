use super::INotificationRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use steward_domain::{Notification, ID};
use tracing::error;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    church_uid: Uuid,
    user_uid: Uuid,
    reminder_uid: Option<Uuid>,
    title: String,
    message: Option<String>,
    notification_type: String,
    priority: String,
    channel: String,
    read: bool,
    read_at: Option<i64>,
    dismissed: bool,
    dismissed_at: Option<i64>,
    requires_action: bool,
    action_url: Option<String>,
    created: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.notification_uid.into(),
            church_id: raw.church_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_id: raw.reminder_uid.map(ID::from),
            title: raw.title,
            message: raw.message,
            notification_type: raw.notification_type.parse()?,
            priority: raw.priority.parse()?,
            channel: raw.channel.parse()?,
            read: raw.read,
            read_at: raw.read_at,
            dismissed: raw.dismissed,
            dismissed_at: raw.dismissed_at,
            requires_action: raw.requires_action,
            action_url: raw.action_url,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications(
                notification_uid,
                church_uid,
                user_uid,
                reminder_uid,
                title,
                message,
                notification_type,
                priority,
                channel,
                read,
                read_at,
                dismissed,
                dismissed_at,
                requires_action,
                action_url,
                created
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.church_id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.reminder_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.priority.as_str())
        .bind(notification.channel.as_str())
        .bind(notification.read)
        .bind(notification.read_at)
        .bind(notification.dismissed)
        .bind(notification.dismissed_at)
        .bind(notification.requires_action)
        .bind(&notification.action_url)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET read = $2, read_at = $3, dismissed = $4, dismissed_at = $5
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.read)
        .bind(notification.read_at)
        .bind(notification.dismissed)
        .bind(notification.dismissed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        let raw = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored notification {} is malformed: {:?}", notification_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find notification {}: {:?}", notification_id, e);
                None
            }
        }
    }

    async fn find_feed(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1 AND n.dismissed = FALSE
            ORDER BY n.created DESC
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
