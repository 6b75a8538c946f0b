//! Session module - view-state the upload page binds to.

mod session_model;
mod session_service;


pub use session_model::{Notification, NotificationKind};
pub use session_service::{read_csv_content, TradeBookSession};
