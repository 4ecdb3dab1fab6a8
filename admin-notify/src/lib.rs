pub mod board;
pub mod filters;
pub mod form;
pub mod grouping;
pub mod recipients;
pub mod selection;

pub use board::NotificationBoard;
pub use filters::NotificationFilters;
pub use form::{ChannelSelection, NotificationDraft, ScheduleInput, Submission, SubmissionKind};
pub use grouping::{group_notifications, NotificationGroups};
pub use recipients::RecipientPicker;
pub use selection::Selection;
