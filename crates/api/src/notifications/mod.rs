//! Notification delivery.
//!
//! The [`NotificationDispatcher`] subscribes to the event bus and turns each
//! event into transactional emails.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
