pub mod auth;
pub mod client;
pub mod notifications;
pub mod users;

pub use client::ApiClient;
