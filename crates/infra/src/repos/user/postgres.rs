use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use steward_domain::{Role, User, ID};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    church_uid: Uuid,
    role: String,
    created: i64,
}

impl TryFrom<UserRaw> for User {
    type Error = anyhow::Error;

    fn try_from(raw: UserRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.user_uid.into(),
            church_id: raw.church_uid.into(),
            role: raw.role.parse()?,
            created: raw.created,
        })
    }
}

fn into_users(rows: Vec<UserRaw>) -> anyhow::Result<Vec<User>> {
    rows.into_iter().map(|row| row.try_into()).collect()
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, church_uid, role, created)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(user.church_id.inner_ref())
        .bind(user.role.as_str())
        .bind(user.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let raw = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored user {} is malformed: {:?}", user_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find user {}: {:?}", user_id, e);
                None
            }
        }
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        let ids = user_ids.iter().map(|id| *id.inner_ref()).collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        into_users(rows)
    }

    async fn find_by_role(&self, church_id: &ID, role: Role) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.church_uid = $1 AND u.role = $2
            ORDER BY u.created ASC
            "#,
        )
        .bind(church_id.inner_ref())
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        into_users(rows)
    }
}
