use super::IEscalationRuleRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use steward_domain::{EscalationRule, ID};

pub struct PostgresEscalationRuleRepo {
    pool: PgPool,
}

impl PostgresEscalationRuleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EscalationRuleRaw {
    rule_uid: Uuid,
    church_uid: Uuid,
    source_role: String,
    escalate_after_minutes: i64,
    reminder_type: Option<String>,
    priority: Option<String>,
    active: bool,
    created: i64,
}

impl TryFrom<EscalationRuleRaw> for EscalationRule {
    type Error = anyhow::Error;

    fn try_from(raw: EscalationRuleRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.rule_uid.into(),
            church_id: raw.church_uid.into(),
            source_role: raw.source_role.parse()?,
            escalate_after_minutes: raw.escalate_after_minutes,
            reminder_type: raw.reminder_type.map(|t| t.parse()).transpose()?,
            priority: raw.priority.map(|p| p.parse()).transpose()?,
            active: raw.active,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IEscalationRuleRepo for PostgresEscalationRuleRepo {
    async fn insert(&self, rule: &EscalationRule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO escalation_rules
            (rule_uid, church_uid, source_role, escalate_after_minutes, reminder_type, priority, active, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(rule.id.inner_ref())
        .bind(rule.church_id.inner_ref())
        .bind(rule.source_role.as_str())
        .bind(rule.escalate_after_minutes)
        .bind(rule.reminder_type.map(|t| t.as_str()))
        .bind(rule.priority.map(|p| p.as_str()))
        .bind(rule.active)
        .bind(rule.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_church(&self, church_id: &ID) -> anyhow::Result<Vec<EscalationRule>> {
        let rows = sqlx::query_as::<_, EscalationRuleRaw>(
            r#"
            SELECT * FROM escalation_rules AS r
            WHERE r.church_uid = $1
            ORDER BY r.created ASC
            "#,
        )
        .bind(church_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }
}
