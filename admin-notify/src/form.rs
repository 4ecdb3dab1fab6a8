use admin_api::ApiClient;
use admin_core::{
    AdminError, Channel, DispatchReceipt, DispatchRequest, RecipientType, Result, ToastDispatcher,
    ValidationError,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Selected delivery channels. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSelection(Vec<Channel>);

impl Default for ChannelSelection {
    fn default() -> Self {
        ChannelSelection(vec![Channel::Push])
    }
}

impl ChannelSelection {
    pub fn from_channels<I: IntoIterator<Item = Channel>>(channels: I) -> Result<Self, ValidationError> {
        let mut selected = Vec::new();
        for channel in channels {
            if !selected.contains(&channel) {
                selected.push(channel);
            }
        }
        if selected.is_empty() {
            return Err(ValidationError::NoChannels);
        }
        Ok(ChannelSelection(selected))
    }

    /// Add an unselected channel or remove a selected one; the last channel
    /// cannot be removed.
    pub fn toggle(&mut self, channel: Channel) -> Result<(), ValidationError> {
        if self.0.contains(&channel) {
            if self.0.len() == 1 {
                return Err(ValidationError::LastChannel);
            }
            self.0.retain(|c| *c != channel);
        } else {
            self.0.push(channel);
        }
        Ok(())
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.0.contains(&channel)
    }

    pub fn as_slice(&self) -> &[Channel] {
        &self.0
    }
}

/// Local date and time as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleInput {
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM
}

impl ScheduleInput {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Resolve to an instant in `now`'s zone that lies more than a minute ahead.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DateTime<Utc>, ValidationError> {
        let (date, time) = (self.date.trim(), self.time.trim());
        if date.is_empty() || time.is_empty() {
            return Err(ValidationError::MissingSchedule);
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidSchedule(format!("bad date '{}'", date)))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| ValidationError::InvalidSchedule(format!("bad time '{}'", time)))?;

        let at = now
            .timezone()
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| ValidationError::InvalidSchedule("time does not exist in local zone".to_string()))?
            .with_timezone(&Utc);

        if at <= now.with_timezone(&Utc) + Duration::minutes(1) {
            return Err(ValidationError::ScheduleTooSoon);
        }
        Ok(at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Immediate,
    Scheduled,
}

/// A validated request ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: SubmissionKind,
    pub payload: DispatchRequest,
}

/// Composition form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub recipient_type: RecipientType,
    pub user_ids: Vec<i64>,
    pub channels: ChannelSelection,
    /// `Some` when the send is scheduled.
    pub schedule: Option<ScheduleInput>,
}

impl Default for NotificationDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            recipient_type: RecipientType::All,
            user_ids: Vec::new(),
            channels: ChannelSelection::default(),
            schedule: None,
        }
    }
}

impl NotificationDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Toggle a channel, warning instead of emptying the selection.
    pub fn toggle_channel(&mut self, channel: Channel, toasts: &ToastDispatcher) -> bool {
        match self.channels.toggle(channel) {
            Ok(()) => true,
            Err(e) => {
                toasts.warning(e.to_string());
                false
            }
        }
    }

    pub fn validate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Submission, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let user_ids = match self.recipient_type {
            RecipientType::All => None,
            RecipientType::Specific if self.user_ids.is_empty() => {
                return Err(ValidationError::NoRecipients)
            }
            RecipientType::Specific => Some(self.user_ids.clone()),
        };

        let scheduled_at = self
            .schedule
            .as_ref()
            .map(|input| input.resolve(now))
            .transpose()?;

        let kind = if scheduled_at.is_some() {
            SubmissionKind::Scheduled
        } else {
            SubmissionKind::Immediate
        };

        Ok(Submission {
            kind,
            payload: DispatchRequest {
                title: title.to_string(),
                message: message.to_string(),
                recipient_type: self.recipient_type,
                notification_types: self.channels.as_slice().to_vec(),
                user_ids,
                scheduled_at: scheduled_at.map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            },
        })
    }

    /// Validate and post; on success the draft is cleared.
    ///
    /// Validation failures are reported without touching the network. The caller
    /// refreshes its listing after a successful submit.
    pub async fn submit<Tz: TimeZone>(
        &mut self,
        client: &ApiClient,
        toasts: &ToastDispatcher,
        now: &DateTime<Tz>,
    ) -> Result<DispatchReceipt> {
        let submission = match self.validate(now) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::debug!("Notification draft rejected: {}", e);
                toasts.error(e.to_string());
                return Err(AdminError::Validation(e));
            }
        };

        let outcome = match submission.kind {
            SubmissionKind::Immediate => {
                toasts.loading("Sending notification...");
                client.send_immediate(&submission.payload).await
            }
            SubmissionKind::Scheduled => {
                toasts.loading("Scheduling notification...");
                client.schedule(&submission.payload).await
            }
        };

        match outcome {
            Ok(receipt) => {
                toasts.success(success_message(submission.kind, &receipt));
                self.reset();
                Ok(receipt)
            }
            Err(e) => {
                let action = match submission.kind {
                    SubmissionKind::Immediate => "Send notification",
                    SubmissionKind::Scheduled => "Schedule notification",
                };
                toasts.report(action, &e);
                Err(e)
            }
        }
    }
}

fn success_message(kind: SubmissionKind, receipt: &DispatchReceipt) -> String {
    match (kind, receipt.target_count) {
        (SubmissionKind::Immediate, Some(count)) => format!("Notification sent to {} users", count),
        (SubmissionKind::Scheduled, Some(count)) => format!("Notification scheduled for {} users", count),
        _ => receipt.message.clone().unwrap_or_else(|| match kind {
            SubmissionKind::Immediate => "Notification sent".to_string(),
            SubmissionKind::Scheduled => "Notification scheduled".to_string(),
        }),
    }
}
