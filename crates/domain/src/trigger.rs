use crate::{offset::ReminderOffset, policy::RolePolicy};

/// Computes the instants at which a `Reminder` due at `due_ts` should trigger.
///
/// Every offset of the `RolePolicy` is subtracted from `due_ts` and only the
/// instants strictly after `now_ts` are kept, so a `Reminder` created close to
/// its due time can end up with no trigger points at all.
/// The result keeps the policy order, longest lead time first.
pub fn calculate_trigger_times(
    due_ts: i64,
    policy: &RolePolicy,
    now_ts: i64,
) -> Vec<(ReminderOffset, i64)> {
    policy
        .offsets
        .iter()
        .filter_map(|offset| {
            let trigger_ts = due_ts.checked_sub(offset.millis())?;
            Some((offset.clone(), trigger_ts))
        })
        .filter(|(_, trigger_ts)| *trigger_ts > now_ts)
        .collect()
}
