use serde::{Deserialize, Serialize};
use steward_domain::{
    AcknowledgeAction, EntityRef, Priority, Reminder, ReminderEntityType, ReminderOffset,
    ReminderSchedule, ReminderStatus, ReminderType, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub church_id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_ts: i64,
    pub reminder_type: ReminderType,
    pub related_entity: Option<EntityRef<ReminderEntityType>>,
    pub parent_reminder_id: Option<ID>,
    pub acknowledged: bool,
    pub acknowledged_at: Option<i64>,
    pub acknowledged_action: Option<AcknowledgeAction>,
    pub snoozed_until: Option<i64>,
    pub snooze_count: i64,
    pub escalated: bool,
    pub escalated_at: Option<i64>,
    pub escalated_to: Option<ID>,
    pub status: ReminderStatus,
    pub created_by: ID,
    pub created: i64,
    pub updated: i64,
    pub version: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            church_id: reminder.church_id,
            user_id: reminder.user_id,
            title: reminder.title,
            description: reminder.description,
            priority: reminder.priority,
            due_ts: reminder.due_ts,
            reminder_type: reminder.reminder_type,
            related_entity: reminder.related_entity,
            parent_reminder_id: reminder.parent_reminder_id,
            acknowledged: reminder.acknowledged,
            acknowledged_at: reminder.acknowledged_at,
            acknowledged_action: reminder.acknowledged_action,
            snoozed_until: reminder.snoozed_until,
            snooze_count: reminder.snooze_count,
            escalated: reminder.escalated,
            escalated_at: reminder.escalated_at,
            escalated_to: reminder.escalated_to,
            status: reminder.status,
            created_by: reminder.created_by,
            created: reminder.created,
            updated: reminder.updated,
            version: reminder.version,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderScheduleDTO {
    pub id: ID,
    pub reminder_id: ID,
    pub trigger_ts: i64,
    pub offset: Option<ReminderOffset>,
    pub triggered: bool,
    pub triggered_at: Option<i64>,
    pub superseded: bool,
    pub created: i64,
}

impl ReminderScheduleDTO {
    pub fn new(schedule: ReminderSchedule) -> Self {
        Self {
            id: schedule.id,
            reminder_id: schedule.reminder_id,
            trigger_ts: schedule.trigger_ts,
            offset: schedule.offset,
            triggered: schedule.triggered,
            triggered_at: schedule.triggered_at,
            superseded: schedule.superseded,
            created: schedule.created,
        }
    }
}
