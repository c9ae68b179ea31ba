//! Injectable application state containers.

pub mod notifications;

pub use notifications::{NotificationProvider, NotificationState};
