use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ParseError;

/// Delivery medium of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Push,
    Email,
    InApp,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Push => "push",
            Channel::Email => "email",
            Channel::InApp => "in_app",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Push => "Push",
            Channel::Email => "Email",
            Channel::InApp => "In-App",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "push" => Ok(Channel::Push),
            "email" => Ok(Channel::Email),
            "in_app" | "inapp" => Ok(Channel::InApp),
            _ => Err(ParseError::UnknownValue {
                field: "notification type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
    Cancelled,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "scheduled" => Ok(NotificationStatus::Pending),
            "sent" => Ok(NotificationStatus::Sent),
            "failed" => Ok(NotificationStatus::Failed),
            "cancelled" | "canceled" => Ok(NotificationStatus::Cancelled),
            _ => Err(ParseError::UnknownValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    All,
    Specific,
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientType::All => f.write_str("all"),
            RecipientType::Specific => f.write_str("specific"),
        }
    }
}

/// Identifier as the server sends it: numeric entity ids or string display keys.
///
/// Ids compare by their textual form, so `12` and `"12"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl RemoteId {
    fn key(&self) -> Cow<'_, str> {
        match self {
            RemoteId::Number(n) => Cow::Owned(n.to_string()),
            RemoteId::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for RemoteId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RemoteId {}

impl Hash for RemoteId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RemoteId {
    fn from(value: i64) -> Self {
        RemoteId::Number(value)
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| RemoteId::Text(value.to_string()))
    }
}

impl FromStr for RemoteId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(RemoteId::Number)
            .unwrap_or_else(|_| RemoteId::Text(s.to_string())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: RemoteId,
    pub original_id: Option<RemoteId>,
    pub title: String,
    pub message: String,
    pub notification_types: Vec<Channel>,
    pub status: NotificationStatus,
    pub recipient_type: RecipientType,
    pub target_count: u64,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl Notification {
    /// Id the server expects for mutations.
    pub fn remote_id(&self) -> &RemoteId {
        self.original_id.as_ref().unwrap_or(&self.id)
    }

    /// Timestamp used for day grouping.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.sent_at.unwrap_or(self.created_at)
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == NotificationStatus::Pending
    }
}

/// Wire form of a notification; channels come as a list or as a single value.
#[derive(Debug, Deserialize)]
struct RawNotification {
    id: RemoteId,
    #[serde(default)]
    original_id: Option<RemoteId>,
    title: String,
    message: String,
    #[serde(default)]
    notification_types: Option<Vec<Channel>>,
    #[serde(default)]
    notification_type: Option<Channel>,
    status: NotificationStatus,
    recipient_type: RecipientType,
    target_count: u64,
    #[serde(default)]
    scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    sent_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    created_by: Option<String>,
}

impl Notification {
    fn from_raw(raw: RawNotification) -> Result<Self, ParseError> {
        let notification_types = match (raw.notification_types, raw.notification_type) {
            (Some(list), _) if !list.is_empty() => list,
            (_, Some(single)) => vec![single],
            _ => {
                return Err(ParseError::InvalidNotification {
                    id: raw.id.to_string(),
                    reason: "no notification type".to_string(),
                })
            }
        };

        if raw.status == NotificationStatus::Pending && raw.scheduled_at.is_none() {
            tracing::debug!("Pending notification {} has no scheduled_at", raw.id);
        }

        Ok(Notification {
            id: raw.id,
            original_id: raw.original_id,
            title: raw.title,
            message: raw.message,
            notification_types,
            status: raw.status,
            recipient_type: raw.recipient_type,
            target_count: raw.target_count,
            scheduled_at: raw.scheduled_at,
            sent_at: raw.sent_at,
            created_at: raw.created_at,
            created_by: raw.created_by,
        })
    }
}

/// Query sent to the unified notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationQuery {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<Channel>,
}

/// One page of the unified notification listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    notifications: Vec<RawNotification>,
    stats: RawStats,
    pagination: RawPagination,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct RawPagination {
    has_next: bool,
    has_prev: bool,
}

impl NotificationPage {
    pub const ENDPOINT: &'static str = "unified notifications";

    pub fn from_json(body: &[u8]) -> Result<Self, ParseError> {
        let raw: RawPage =
            serde_json::from_slice(body).map_err(|e| ParseError::malformed(Self::ENDPOINT, e))?;

        let notifications = raw
            .notifications
            .into_iter()
            .map(Notification::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NotificationPage {
            notifications,
            total: raw.stats.total,
            has_next: raw.pagination.has_next,
            has_prev: raw.pagination.has_prev,
        })
    }
}

/// Recipient candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUserList {
    Plain(Vec<User>),
    Paged { results: Vec<User> },
}

impl User {
    pub const ENDPOINT: &'static str = "dashboard users";

    pub fn list_from_json(body: &[u8]) -> Result<Vec<User>, ParseError> {
        let raw: RawUserList =
            serde_json::from_slice(body).map_err(|e| ParseError::malformed(Self::ENDPOINT, e))?;
        Ok(match raw {
            RawUserList::Plain(users) => users,
            RawUserList::Paged { results } => results,
        })
    }
}

/// Body of the send-immediate and schedule requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRequest {
    pub title: String,
    pub message: String,
    pub recipient_type: RecipientType,
    pub notification_types: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Server acknowledgement of a send or schedule request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DispatchReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub target_count: Option<u64>,
    #[serde(default)]
    pub notification_id: Option<RemoteId>,
}

impl DispatchReceipt {
    pub const ENDPOINT: &'static str = "notification dispatch";

    /// An empty body still acknowledges the send.
    pub fn from_json(body: &[u8]) -> Result<Self, ParseError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| ParseError::malformed(Self::ENDPOINT, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page_body(notifications: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "notifications": notifications,
            "stats": { "total": 12, "pending": 1 },
            "pagination": { "has_next": true, "has_prev": false, "page": 1 }
        }))
        .unwrap()
    }

    #[test]
    fn parses_unified_page() {
        let body = page_body(json!([
            {
                "id": "disp-12",
                "original_id": 42,
                "title": "Payout",
                "message": "Earnings paid",
                "notification_types": ["push", "email"],
                "status": "sent",
                "recipient_type": "all",
                "target_count": 120,
                "sent_at": "2026-10-14T08:00:00Z",
                "created_at": "2026-10-14T07:59:00Z",
                "created_by": "admin"
            },
            {
                "id": 7,
                "title": "Maintenance",
                "message": "Tonight",
                "notification_type": "in_app",
                "status": "pending",
                "recipient_type": "specific",
                "target_count": 2,
                "scheduled_at": "2026-10-20T22:00:00Z",
                "created_at": "2026-10-14T09:00:00Z"
            }
        ]));

        let page = NotificationPage::from_json(&body).unwrap();
        assert_eq!(page.total, 12);
        assert!(page.has_next);
        assert!(!page.has_prev);

        let first = &page.notifications[0];
        assert_eq!(first.id, RemoteId::Text("disp-12".to_string()));
        assert_eq!(first.remote_id(), &RemoteId::Number(42));
        assert_eq!(first.notification_types, vec![Channel::Push, Channel::Email]);

        let second = &page.notifications[1];
        assert_eq!(second.remote_id(), &RemoteId::Number(7));
        assert_eq!(second.notification_types, vec![Channel::InApp]);
        assert!(second.is_scheduled());
        assert_eq!(second.reference_time(), second.created_at);
    }

    #[test]
    fn missing_pagination_is_a_parse_error() {
        let body = serde_json::to_vec(&json!({
            "notifications": [],
            "stats": { "total": 0 }
        }))
        .unwrap();

        let err = NotificationPage::from_json(&body).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
        assert!(err.to_string().contains("pagination"));
    }

    #[test]
    fn notification_without_channel_is_rejected() {
        let body = page_body(json!([{
            "id": 3,
            "title": "t",
            "message": "m",
            "notification_types": [],
            "status": "sent",
            "recipient_type": "all",
            "target_count": 1,
            "created_at": "2026-10-14T07:59:00Z"
        }]));

        let err = NotificationPage::from_json(&body).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNotification {
                id: "3".to_string(),
                reason: "no notification type".to_string(),
            }
        );
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let body = page_body(json!([{
            "id": 3,
            "title": "t",
            "message": "m",
            "notification_type": "push",
            "status": "exploded",
            "recipient_type": "all",
            "target_count": 1,
            "created_at": "2026-10-14T07:59:00Z"
        }]));

        assert!(NotificationPage::from_json(&body).is_err());
    }

    #[test]
    fn user_list_accepts_plain_and_paged_shapes() {
        let user = json!({
            "id": 3,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "username": "ada",
            "status": "active"
        });

        let plain = serde_json::to_vec(&json!([user.clone()])).unwrap();
        let paged = serde_json::to_vec(&json!({ "count": 1, "results": [user] })).unwrap();

        assert_eq!(User::list_from_json(&plain).unwrap()[0].username, "ada");
        assert_eq!(User::list_from_json(&paged).unwrap()[0].id, 3);
        assert!(User::list_from_json(b"{\"users\": 3}").is_err());
    }

    #[test]
    fn dispatch_request_omits_unset_fields() {
        let request = DispatchRequest {
            title: "Hello".to_string(),
            message: "World".to_string(),
            recipient_type: RecipientType::All,
            notification_types: vec![Channel::InApp],
            user_ids: None,
            scheduled_at: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "title": "Hello",
                "message": "World",
                "recipient_type": "all",
                "notification_types": ["in_app"]
            })
        );
    }

    #[test]
    fn remote_id_parsing() {
        assert_eq!(RemoteId::from("42"), RemoteId::Number(42));
        assert_eq!(RemoteId::from("disp-12"), RemoteId::Text("disp-12".to_string()));
        assert_eq!(RemoteId::Number(42).to_string(), "42");
    }

    #[test]
    fn string_encoded_numeric_id_matches_typed_id() {
        let body = page_body(json!([{
            "id": "12",
            "title": "t",
            "message": "m",
            "notification_type": "push",
            "status": "sent",
            "recipient_type": "all",
            "target_count": 1,
            "created_at": "2026-10-14T07:59:00Z"
        }]));
        let page = NotificationPage::from_json(&body).unwrap();

        assert_eq!(page.notifications[0].id, RemoteId::Text("12".to_string()));
        assert_eq!(page.notifications[0].id, RemoteId::from("12"));
        assert_ne!(RemoteId::from("12"), RemoteId::from("012"));
    }

    #[test]
    fn empty_dispatch_body_is_an_acknowledgement() {
        assert_eq!(DispatchReceipt::from_json(b"").unwrap(), DispatchReceipt::default());
        assert_eq!(DispatchReceipt::from_json(b" \n").unwrap(), DispatchReceipt::default());
        assert!(DispatchReceipt::from_json(b"<html>").is_err());
    }

    #[test]
    fn channel_and_status_from_cli_text() {
        assert_eq!("In-App".parse::<Channel>().unwrap(), Channel::InApp);
        assert_eq!("canceled".parse::<NotificationStatus>().unwrap(), NotificationStatus::Cancelled);
        assert!("fax".parse::<Channel>().is_err());
    }
}
