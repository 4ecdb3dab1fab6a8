pub mod config;
pub mod context;
pub mod error;
pub mod session;
pub mod toast;
pub mod types;

pub use config::Config;
pub use context::AdminContext;
pub use error::{AdminError, ParseError, Result, ValidationError};
pub use session::AdminSession;
pub use toast::{Toast, ToastDispatcher, ToastLevel, ToastReceiver};
pub use types::{
    Channel, DispatchReceipt, DispatchRequest, Notification, NotificationPage, NotificationQuery,
    NotificationStatus, RecipientType, RemoteId, User,
};
