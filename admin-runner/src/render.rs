use admin_core::{Notification, RecipientType, Toast, User};
use admin_notify::{NotificationBoard, NotificationGroups, RecipientPicker};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::{self, Write};

fn timestamp<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

pub fn item<Tz: TimeZone>(n: &Notification, selected: bool, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let marker = if selected { "[x]" } else { "[ ]" };
    let channels = n
        .notification_types
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");
    let recipients = match n.recipient_type {
        RecipientType::All => format!("all users ({})", n.target_count),
        RecipientType::Specific => format!("{} selected users", n.target_count),
    };
    let when = match (n.scheduled_at, n.sent_at) {
        (Some(at), _) if n.is_scheduled() => format!("scheduled {}", timestamp(at, tz)),
        (_, Some(at)) => format!("sent {}", timestamp(at, tz)),
        _ => format!("created {}", timestamp(n.created_at, tz)),
    };

    let mut out = format!("{} {} #{}  {}\n", marker, n.status, n.id, n.title);
    let _ = writeln!(out, "      {}", n.message);
    let _ = write!(out, "      {} · {} · {}", channels, recipients, when);
    if let Some(by) = &n.created_by {
        let _ = write!(out, " · by {}", by);
    }
    out
}

pub fn groups<Tz: TimeZone>(groups: &NotificationGroups<'_>, board: &NotificationBoard, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    if groups.is_empty() {
        return "No notifications found.".to_string();
    }

    let mut out = String::new();
    for (title, items) in groups.sections() {
        let _ = writeln!(out, "{} ({})", title, items.len());
        for n in items {
            let _ = writeln!(out, "{}", item(n, board.is_selected(&n.id), tz));
        }
    }
    out.trim_end().to_string()
}

pub fn pagination(page: u32, total: u64, has_prev: bool, has_next: bool) -> String {
    let prev = if has_prev { "‹ prev" } else { "      " };
    let next = if has_next { "next ›" } else { "" };
    format!("{}  Page {} · {} total  {}", prev, page, total, next)
        .trim_end()
        .to_string()
}

pub fn users(picker: &RecipientPicker) -> String {
    let visible: Vec<&User> = picker.visible();
    if visible.is_empty() {
        return "No users found.".to_string();
    }
    visible
        .iter()
        .map(|u| {
            format!(
                "{:>6}  {:<24} {:<32} @{} ({})",
                u.id, u.name, u.email, u.username, u.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.level, toast.message)
}
