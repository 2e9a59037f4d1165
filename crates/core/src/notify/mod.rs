//! Chat notifications about timesheets

pub mod ports;
pub mod service;

pub use service::{find_chat_user_by_email, NotificationService, NotifierSettings};
