use admin_core::{Channel, NotificationStatus, ParseError, RecipientType, RemoteId};
use admin_notify::filters::parse_facet;
use admin_notify::{ChannelSelection, NotificationDraft, NotificationFilters, ScheduleInput};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notify-admin", version, about = "Manage platform notifications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notifications grouped by day
    List(ViewArgs),
    /// Send a notification now or schedule it
    Send(SendArgs),
    /// Cancel a scheduled notification
    Cancel {
        id: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Delete a notification
    Delete {
        id: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Delete several notifications in one request
    BulkDelete {
        /// Display ids to delete
        ids: Vec<String>,
        /// Select every notification on the page instead
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// List recipient candidates
    Users {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub search: Option<String>,
    /// push, email, in_app or all
    #[arg(long = "type", default_value = "all")]
    pub notification_type: String,
    /// pending, sent, failed, cancelled or all
    #[arg(long, default_value = "all")]
    pub status: String,
}

impl ViewArgs {
    /// Unfiltered first page.
    pub fn first_page() -> Self {
        ViewArgs {
            page: 1,
            search: None,
            notification_type: "all".to_string(),
            status: "all".to_string(),
        }
    }

    pub fn filters(&self) -> Result<NotificationFilters, ParseError> {
        Ok(NotificationFilters {
            search: self.search.clone().unwrap_or_default(),
            notification_type: parse_facet::<Channel>(&self.notification_type)?,
            status: parse_facet::<NotificationStatus>(&self.status)?,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub message: String,
    /// Delivery channel, repeatable; defaults to push
    #[arg(long = "channel")]
    pub channels: Vec<String>,
    /// Target user id, repeatable; omit to notify all users
    #[arg(long = "user")]
    pub users: Vec<i64>,
    /// Local date (YYYY-MM-DD) to schedule for
    #[arg(long)]
    pub date: Option<String>,
    /// Local time (HH:MM) to schedule for
    #[arg(long)]
    pub time: Option<String>,
}

impl SendArgs {
    pub fn draft(&self) -> anyhow::Result<NotificationDraft> {
        let channels = if self.channels.is_empty() {
            ChannelSelection::default()
        } else {
            let parsed = self
                .channels
                .iter()
                .map(|c| c.parse::<Channel>())
                .collect::<Result<Vec<_>, _>>()?;
            ChannelSelection::from_channels(parsed)?
        };

        let recipient_type = if self.users.is_empty() {
            RecipientType::All
        } else {
            RecipientType::Specific
        };

        let schedule = match (&self.date, &self.time) {
            (None, None) => None,
            (date, time) => Some(ScheduleInput::new(
                date.clone().unwrap_or_default(),
                time.clone().unwrap_or_default(),
            )),
        };

        Ok(NotificationDraft {
            title: self.title.clone(),
            message: self.message.clone(),
            recipient_type,
            user_ids: self.users.clone(),
            channels,
            schedule,
        })
    }
}

pub fn remote_id(raw: &str) -> RemoteId {
    RemoteId::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("notify-admin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn send_builds_targeted_draft() {
        let cli = parse(&[
            "send", "--title", "Hi", "--message", "There", "--channel", "push", "--channel", "email",
            "--user", "3", "--user", "7",
        ]);
        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        let draft = args.draft().unwrap();

        assert_eq!(draft.recipient_type, RecipientType::Specific);
        assert_eq!(draft.user_ids, vec![3, 7]);
        assert_eq!(draft.channels.as_slice(), &[Channel::Push, Channel::Email]);
        assert_eq!(draft.schedule, None);
    }

    #[test]
    fn send_with_only_date_still_schedules() {
        let cli = parse(&["send", "--title", "a", "--message", "b", "--date", "2026-10-20"]);
        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        let draft = args.draft().unwrap();
        assert_eq!(draft.schedule, Some(ScheduleInput::new("2026-10-20", "")));
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let cli = parse(&["send", "--title", "a", "--message", "b", "--channel", "fax"]);
        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert!(args.draft().is_err());
    }

    #[test]
    fn list_filters() {
        let cli = parse(&["list", "--page", "3", "--type", "in_app", "--status", "pending"]);
        let Command::List(view) = cli.command else {
            panic!("expected list");
        };
        let filters = view.filters().unwrap();
        assert_eq!(view.page, 3);
        assert_eq!(filters.notification_type, Some(Channel::InApp));
        assert_eq!(filters.status, Some(NotificationStatus::Pending));
    }

    #[test]
    fn bulk_delete_ids() {
        let cli = parse(&["bulk-delete", "disp-1", "42"]);
        let Command::BulkDelete { ids, all, .. } = cli.command else {
            panic!("expected bulk-delete");
        };
        assert!(!all);
        assert_eq!(
            ids.iter().map(|id| remote_id(id)).collect::<Vec<_>>(),
            vec![RemoteId::Text("disp-1".to_string()), RemoteId::Number(42)]
        );
    }
}
