mod helpers;

use helpers::setup::spawn_app;
use helpers::utils::{create_member, now_millis, HOUR};
use steward_sdk::{
    AcknowledgeAction, AcknowledgeReminderInput, AlertType, CreateEscalationRuleInput,
    CreateNotificationInput, CreateReminderInput, CreateUserInput, EscalateReminderInput,
    EscalationStatus, Priority, RaiseAlertInput, ReminderStatus, Role, SetRolePolicyInput,
    StatusCode, StewardSDK, ID,
};

fn reminder_input(due_ts: i64) -> CreateReminderInput {
    CreateReminderInput {
        user_id: None,
        title: "Follow up with the new visitors".into(),
        description: Some("Call them before Sunday".into()),
        priority: Some(Priority::High),
        due_ts: Some(due_ts),
        reminder_type: None,
        related_entity: None,
        parent_reminder_id: None,
    }
}

#[actix_web::test]
async fn test_status_ok() {
    let (_, admin) = spawn_app().await;
    assert!(admin.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_admin_endpoints_require_the_admin_secret() {
    let (app, _) = spawn_app().await;
    let anonymous = StewardSDK::new(app.address.clone());
    let res = anonymous
        .user
        .create(CreateUserInput {
            church_id: ID::new(),
            role: Role::Pastor,
        })
        .await;
    assert_eq!(res.err().and_then(|e| e.status()), Some(StatusCode::UNAUTHORIZED));

    let wrong_secret = StewardSDK::admin(app.address.clone(), "wrong secret");
    assert!(wrong_secret
        .user
        .create(CreateUserInput {
            church_id: ID::new(),
            role: Role::Pastor,
        })
        .await
        .is_err());
}

#[actix_web::test]
async fn test_member_session() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (user, member) = create_member(&app, &admin, &church_id, Role::Worker).await;

    let me = member.user.me().await.expect("Expected to get member");
    assert_eq!(me.user.id, user.id);
    assert_eq!(me.user.church_id, church_id);
    assert_eq!(me.user.role, Role::Worker);

    let anonymous = StewardSDK::member(app.address.clone(), "not a token");
    assert_eq!(
        anonymous.user.me().await.err().and_then(|e| e.status()),
        Some(StatusCode::UNAUTHORIZED)
    );
}

#[actix_web::test]
async fn test_worker_reminder_gets_schedules_from_the_role_policy() {
    let (app, admin) = spawn_app().await;
    let (_, worker) = create_member(&app, &admin, &ID::new(), Role::Worker).await;

    let due_ts = now_millis() + 2 * HOUR;
    let res = worker
        .reminder
        .create(reminder_input(due_ts))
        .await
        .expect("Expected to create reminder");
    assert_eq!(res.reminder.status, ReminderStatus::Active);
    assert_eq!(res.schedules.len(), 1);
    assert_eq!(res.schedules[0].trigger_ts, due_ts - HOUR);

    let schedules = worker
        .reminder
        .schedules(res.reminder.id.clone())
        .await
        .expect("Expected to get schedules")
        .schedules;
    assert_eq!(schedules.len(), 1);

    let reminders = worker
        .reminder
        .list(Some(ReminderStatus::Active))
        .await
        .expect("Expected to list reminders")
        .reminders;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, res.reminder.id);
}

#[actix_web::test]
async fn test_reminder_validation() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (_, worker) = create_member(&app, &admin, &church_id, Role::Worker).await;
    let (colleague, _) = create_member(&app, &admin, &church_id, Role::Worker).await;

    let mut input = reminder_input(now_millis() + HOUR);
    input.title = " ".into();
    assert_eq!(
        worker.reminder.create(input).await.err().and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );

    let mut input = reminder_input(now_millis() + HOUR);
    input.due_ts = None;
    assert_eq!(
        worker.reminder.create(input).await.err().and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );

    // Workers are not allowed to assign reminders to others
    let mut input = reminder_input(now_millis() + HOUR);
    input.user_id = Some(colleague.id.clone());
    assert_eq!(
        worker.reminder.create(input).await.err().and_then(|e| e.status()),
        Some(StatusCode::FORBIDDEN)
    );
}

#[actix_web::test]
async fn test_snooze_limit_of_worker() {
    let (app, admin) = spawn_app().await;
    let (_, worker) = create_member(&app, &admin, &ID::new(), Role::Worker).await;
    let reminder = worker
        .reminder
        .create(reminder_input(now_millis() + 2 * HOUR))
        .await
        .expect("Expected to create reminder")
        .reminder;

    let snooze = || AcknowledgeReminderInput {
        reminder_id: reminder.id.clone(),
        action: AcknowledgeAction::Snoozed,
        snooze_duration: Some(10 * 60 * 1000),
    };
    for expected_count in 1..=3 {
        let res = worker
            .reminder
            .acknowledge(snooze())
            .await
            .expect("Expected to snooze reminder");
        assert_eq!(res.reminder.snooze_count, expected_count);
        assert!(!res.reminder.acknowledged);
    }

    let res = worker.reminder.acknowledge(snooze()).await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::UNPROCESSABLE_ENTITY)
    );
    let stored = worker
        .reminder
        .get(reminder.id.clone())
        .await
        .expect("Expected to get reminder")
        .reminder;
    assert_eq!(stored.snooze_count, 3);
}

#[actix_web::test]
async fn test_cancelled_reminder_can_not_be_acknowledged() {
    let (app, admin) = spawn_app().await;
    let (_, member) = create_member(&app, &admin, &ID::new(), Role::Member).await;
    let reminder = member
        .reminder
        .create(reminder_input(now_millis() + 3 * HOUR))
        .await
        .expect("Expected to create reminder")
        .reminder;

    let acknowledge = |action| AcknowledgeReminderInput {
        reminder_id: reminder.id.clone(),
        action,
        snooze_duration: None,
    };
    let cancelled = member
        .reminder
        .acknowledge(acknowledge(AcknowledgeAction::Cancelled))
        .await
        .expect("Expected to cancel reminder")
        .reminder;
    assert_eq!(cancelled.status, ReminderStatus::Cancelled);

    let res = member
        .reminder
        .acknowledge(acknowledge(AcknowledgeAction::Confirmed))
        .await;
    assert_eq!(res.err().and_then(|e| e.status()), Some(StatusCode::CONFLICT));
    let stored = member
        .reminder
        .get(reminder.id.clone())
        .await
        .expect("Expected to get reminder")
        .reminder;
    assert_eq!(stored.status, ReminderStatus::Cancelled);
}

#[actix_web::test]
async fn test_escalate_reminder_to_admin() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (worker_user, worker) = create_member(&app, &admin, &church_id, Role::Worker).await;
    let (admin_user, church_admin) = create_member(&app, &admin, &church_id, Role::Admin).await;
    let reminder = worker
        .reminder
        .create(reminder_input(now_millis() + 2 * HOUR))
        .await
        .expect("Expected to create reminder")
        .reminder;

    let escalate = || EscalateReminderInput {
        reminder_id: reminder.id.clone(),
        to_user_id: admin_user.id.clone(),
        reason: Some("no response".into()),
    };
    let res = worker
        .reminder
        .escalate(escalate())
        .await
        .expect("Expected to escalate reminder");
    assert!(res.reminder.escalated);
    assert_eq!(res.reminder.escalated_to, Some(admin_user.id.clone()));
    assert_eq!(res.escalation.status, EscalationStatus::Pending);
    assert_eq!(res.escalation.escalated_from, worker_user.id);
    assert_eq!(res.escalation.reason.as_deref(), Some("no response"));

    // Escalating again keeps the single log
    let again = worker
        .reminder
        .escalate(escalate())
        .await
        .expect("Expected escalation to be idempotent");
    assert_eq!(again.escalation.id, res.escalation.id);

    let escalations = church_admin
        .escalation
        .list()
        .await
        .expect("Expected to list escalations")
        .escalations;
    assert_eq!(escalations.len(), 1);

    // The admin can see and act on the escalated reminder
    let feed = church_admin.alert.feed().await.expect("Expected feed");
    assert_eq!(feed.notifications.len(), 1);
    assert_eq!(feed.alerts.len(), 1);
    assert_eq!(feed.alerts[0].alert_type, AlertType::EscalatedIssue);
    assert_eq!(feed.unread_count, 1);
    assert_eq!(feed.urgent_count, 1);
    assert_eq!(feed.badge, 2);
    assert!(!feed.pulsing);
    assert_eq!(feed.poll_interval_secs, app.config.client_poll_interval_secs);

    church_admin
        .reminder
        .acknowledge(AcknowledgeReminderInput {
            reminder_id: reminder.id.clone(),
            action: AcknowledgeAction::Confirmed,
            snooze_duration: None,
        })
        .await
        .expect("Expected escalation target to confirm the reminder");
    let escalations = church_admin
        .escalation
        .list()
        .await
        .expect("Expected to list escalations")
        .escalations;
    assert_eq!(escalations[0].status, EscalationStatus::Resolved);
}

#[actix_web::test]
async fn test_escalation_target_must_hold_the_supervisor_role() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (_, worker) = create_member(&app, &admin, &church_id, Role::Worker).await;
    let (colleague, _) = create_member(&app, &admin, &church_id, Role::Worker).await;
    let reminder = worker
        .reminder
        .create(reminder_input(now_millis() + 2 * HOUR))
        .await
        .expect("Expected to create reminder")
        .reminder;

    let res = worker
        .reminder
        .escalate(EscalateReminderInput {
            reminder_id: reminder.id.clone(),
            to_user_id: colleague.id.clone(),
            reason: None,
        })
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::UNPROCESSABLE_ENTITY)
    );
}

#[actix_web::test]
async fn test_notifications_and_alerts() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (member_user, member) = create_member(&app, &admin, &church_id, Role::Member).await;
    let (_, worker) = create_member(&app, &admin, &church_id, Role::Worker).await;
    let (_, guest) = create_member(&app, &admin, &church_id, Role::Guest).await;

    let notification_input = || CreateNotificationInput {
        user_id: member_user.id.clone(),
        reminder_id: None,
        title: "The youth meeting moved to 7pm".into(),
        message: None,
        notification_type: None,
        priority: None,
        channel: None,
        requires_action: None,
        action_url: None,
    };
    assert_eq!(
        guest
            .notification
            .create(notification_input())
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::FORBIDDEN)
    );
    let notification = worker
        .notification
        .create(notification_input())
        .await
        .expect("Expected to notify member")
        .notification;
    assert!(!notification.read);

    let alert = worker
        .alert
        .raise(RaiseAlertInput {
            user_id: member_user.id.clone(),
            alert_type: AlertType::OverdueTask,
            related_entity: None,
            severity: None,
            message: Some("The chairs are still not set up".into()),
        })
        .await
        .expect("Expected to raise alert")
        .alert;
    assert!(alert.active);

    let feed = member.alert.feed().await.expect("Expected feed");
    assert_eq!(feed.unread_count, 1);
    assert_eq!(feed.urgent_count, 0);
    assert_eq!(feed.badge, 1);

    // Only the recipient can touch its notifications
    assert_eq!(
        worker
            .notification
            .mark_read(notification.id.clone())
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::NOT_FOUND)
    );
    let read = member
        .notification
        .mark_read(notification.id.clone())
        .await
        .expect("Expected to mark notification as read")
        .notification;
    assert!(read.read);
    member
        .alert
        .acknowledge(alert.id.clone())
        .await
        .expect("Expected to acknowledge alert");
    member
        .alert
        .dismiss(alert.id.clone())
        .await
        .expect("Expected to dismiss alert");
    member
        .notification
        .dismiss(notification.id.clone())
        .await
        .expect("Expected to dismiss notification");

    let feed = member.alert.feed().await.expect("Expected feed");
    assert!(feed.notifications.is_empty());
    assert!(feed.alerts.is_empty());
    assert_eq!(feed.badge, 0);
}

#[actix_web::test]
async fn test_church_role_policy_override() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (_, pastor) = create_member(&app, &admin, &church_id, Role::Pastor).await;
    let (_, member) = create_member(&app, &admin, &church_id, Role::Member).await;

    let policy = member
        .role_policy
        .get(Role::Member)
        .await
        .expect("Expected to get role policy");
    assert!(!policy.overridden);
    assert_eq!(policy.policy.snooze_limit, 2);

    let input = || SetRolePolicyInput {
        offsets: vec!["30m".into(), "3h".into()],
        escalate_to: Some(Role::Worker),
        snooze_limit: 4,
    };
    assert_eq!(
        member
            .role_policy
            .set(Role::Member, input())
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::FORBIDDEN)
    );
    let mut invalid = input();
    invalid.offsets.push("abc".into());
    assert_eq!(
        pastor
            .role_policy
            .set(Role::Member, invalid)
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );
    let res = pastor
        .role_policy
        .set(Role::Member, input())
        .await
        .expect("Expected to override role policy");
    assert!(res.overridden);

    let due_ts = now_millis() + 4 * HOUR;
    let schedules = member
        .reminder
        .create(reminder_input(due_ts))
        .await
        .expect("Expected to create reminder")
        .schedules;
    let trigger_times = schedules.iter().map(|s| s.trigger_ts).collect::<Vec<_>>();
    assert_eq!(trigger_times, vec![due_ts - 3 * HOUR, due_ts - HOUR / 2]);
}

#[actix_web::test]
async fn test_escalation_rules() {
    let (app, admin) = spawn_app().await;
    let church_id = ID::new();
    let (_, pastor) = create_member(&app, &admin, &church_id, Role::Pastor).await;
    let (_, worker) = create_member(&app, &admin, &church_id, Role::Worker).await;

    let input = |minutes| CreateEscalationRuleInput {
        source_role: Role::Worker,
        escalate_after_minutes: minutes,
        reminder_type: None,
        priority: None,
    };
    assert_eq!(
        worker
            .escalation
            .create_rule(input(30))
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::FORBIDDEN)
    );
    assert_eq!(
        pastor
            .escalation
            .create_rule(input(0))
            .await
            .err()
            .and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );
    let rule = pastor
        .escalation
        .create_rule(input(30))
        .await
        .expect("Expected to create escalation rule")
        .rule;

    let rules = worker
        .escalation
        .rules()
        .await
        .expect("Expected to list escalation rules")
        .rules;
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].id, rule.id);
    assert_eq!(rules[0].escalate_after_minutes, 30);
}
