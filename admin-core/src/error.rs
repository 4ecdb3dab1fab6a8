use thiserror::Error;

pub type Result<T, E = AdminError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Admin token missing, set ADMIN_TOKEN or ADMIN_COOKIE")]
    MissingToken,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminError {
    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::MissingToken)
            || matches!(self, AdminError::Http { status, .. } if *status == 401 || *status == 403)
    }
}

/// A response body that does not match the contract of its endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },

    #[error("Invalid notification {id}: {reason}")]
    InvalidNotification { id: String, reason: String },

    #[error("Unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

impl ParseError {
    pub fn malformed(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ParseError::Malformed {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Input rejected before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Message is required")]
    EmptyMessage,

    #[error("Select at least one user for a targeted notification")]
    NoRecipients,

    #[error("Select at least one notification type")]
    NoChannels,

    #[error("At least one notification type must remain selected")]
    LastChannel,

    #[error("Schedule date and time are required")]
    MissingSchedule,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Scheduled time must be at least one minute in the future")]
    ScheduleTooSoon,

    #[error("No notifications selected")]
    EmptySelection,

    #[error("Notification {0} is not on the current page")]
    UnknownNotification(String),

    #[error("Notification {0} is not scheduled")]
    NotScheduled(String),
}
