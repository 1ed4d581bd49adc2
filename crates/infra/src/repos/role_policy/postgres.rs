use super::IRolePolicyRepo;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use std::convert::{TryFrom, TryInto};
use steward_domain::{Role, RolePolicy, TenantRolePolicy, ID};
use tracing::error;

pub struct PostgresRolePolicyRepo {
    pool: PgPool,
}

impl PostgresRolePolicyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRolePolicyRaw {
    church_uid: Uuid,
    role: String,
    policy: Json<RolePolicy>,
    updated: i64,
}

impl TryFrom<TenantRolePolicyRaw> for TenantRolePolicy {
    type Error = anyhow::Error;

    fn try_from(raw: TenantRolePolicyRaw) -> anyhow::Result<Self> {
        Ok(Self {
            church_id: raw.church_uid.into(),
            role: raw.role.parse()?,
            policy: raw.policy.0,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IRolePolicyRepo for PostgresRolePolicyRepo {
    async fn upsert(&self, policy: &TenantRolePolicy) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tenant_role_policies(church_uid, role, policy, updated)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (church_uid, role)
            DO UPDATE SET policy = EXCLUDED.policy, updated = EXCLUDED.updated
            "#,
        )
        .bind(policy.church_id.inner_ref())
        .bind(policy.role.as_str())
        .bind(Json(&policy.policy))
        .bind(policy.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, church_id: &ID, role: Role) -> Option<TenantRolePolicy> {
        let raw = sqlx::query_as::<_, TenantRolePolicyRaw>(
            r#"
            SELECT * FROM tenant_role_policies AS p
            WHERE p.church_uid = $1 AND p.role = $2
            "#,
        )
        .bind(church_id.inner_ref())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await;

        match raw {
            Ok(Some(raw)) => raw
                .try_into()
                .map_err(|e| error!("Stored role policy for church {} is malformed: {:?}", church_id, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!("Unable to find role policy for church {}: {:?}", church_id, e);
                None
            }
        }
    }
}
