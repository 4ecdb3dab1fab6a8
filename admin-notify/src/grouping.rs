use admin_core::Notification;
use chrono::{DateTime, TimeZone};

/// A page of notifications split for display.
#[derive(Debug, Default, PartialEq)]
pub struct NotificationGroups<'a> {
    pub scheduled: Vec<&'a Notification>,
    pub today: Vec<&'a Notification>,
    pub yesterday: Vec<&'a Notification>,
    pub older: Vec<&'a Notification>,
}

impl<'a> NotificationGroups<'a> {
    pub fn len(&self) -> usize {
        self.scheduled.len() + self.today.len() + self.yesterday.len() + self.older.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty sections in display order.
    pub fn sections(&self) -> Vec<(&'static str, &[&'a Notification])> {
        [
            ("Scheduled", self.scheduled.as_slice()),
            ("Today", self.today.as_slice()),
            ("Yesterday", self.yesterday.as_slice()),
            ("Older", self.older.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }
}

/// Partition notifications by status and calendar day in `now`'s time zone.
///
/// Pending notifications are always `scheduled`. Everything else is bucketed by
/// the date of `sent_at` (or `created_at`) against today and yesterday; any other
/// date, including a future one, lands in `older`.
pub fn group_notifications<'a, Tz: TimeZone>(
    notifications: &'a [Notification],
    now: &DateTime<Tz>,
) -> NotificationGroups<'a> {
    let today = now.date_naive();
    let yesterday = today.pred_opt();
    let tz = now.timezone();

    let mut groups = NotificationGroups::default();
    for notification in notifications {
        if notification.is_scheduled() {
            groups.scheduled.push(notification);
            continue;
        }

        let day = notification.reference_time().with_timezone(&tz).date_naive();
        if day == today {
            groups.today.push(notification);
        } else if Some(day) == yesterday {
            groups.yesterday.push(notification);
        } else {
            groups.older.push(notification);
        }
    }
    groups
}
