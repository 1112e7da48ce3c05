//! Superfix event bus and transactional email.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SuperfixEvent`] -- the domain events that trigger email.
//! - [`templates`] -- Handlebars templates turning an event into its emails.
//! - [`delivery`] -- the [`Mailer`] seam and its SMTP implementation.

pub mod bus;
pub mod delivery;
pub mod templates;

pub use bus::{EventBus, SuperfixEvent};
pub use templates::EmailTemplates;
pub use delivery::email::{EmailConfig, EmailError, Mailer, OutgoingEmail, RecordingMailer, SmtpMailer};
