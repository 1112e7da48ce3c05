//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`SuperfixEvent`]s. It is
//! shared via `Arc<EventBus>`; handlers publish after their write commits and
//! never wait on delivery.

use std::fmt;

use chrono::{DateTime, Utc};
use superfix_core::types::DbId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SuperfixEvent
// ---------------------------------------------------------------------------

/// A plaintext credential carried only as far as the welcome email.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Something that happened which someone should be told about.
#[derive(Debug, Clone)]
pub enum SuperfixEvent {
    /// A public hero application was stored.
    ApplicationReceived {
        application_id: DbId,
        name: String,
        email: String,
        phone: String,
        category: String,
    },
    /// An admin created a hero account.
    HeroRecruited {
        hero_id: DbId,
        alias: String,
        username: String,
        email: Option<String>,
        password: Credential,
    },
    /// A client asked a hero for help.
    MissionCreated {
        mission_id: DbId,
        hero_id: DbId,
        hero_email: Option<String>,
        client_name: String,
        description: String,
    },
    /// The assigned hero accepted a mission.
    MissionAccepted {
        mission_id: DbId,
        hero_alias: String,
        client_email: Option<String>,
    },
}

impl SuperfixEvent {
    /// Dot-separated event name used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            SuperfixEvent::ApplicationReceived { .. } => "application.received",
            SuperfixEvent::HeroRecruited { .. } => "hero.recruited",
            SuperfixEvent::MissionCreated { .. } => "mission.created",
            SuperfixEvent::MissionAccepted { .. } => "mission.accepted",
        }
    }
}

/// An event stamped with the moment it was published.
#[derive(Debug, Clone)]
pub struct Published<E> {
    pub event: E,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use superfix_events::bus::{EventBus, SuperfixEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SuperfixEvent::MissionAccepted {
///     mission_id: 1,
///     hero_alias: "Aqua Man".into(),
///     client_email: None,
/// });
/// ```
pub struct EventBus {
    sender: broadcast::Sender<Published<SuperfixEvent>>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is dropped.
    pub fn publish(&self, event: SuperfixEvent) {
        tracing::debug!(event_type = event.event_type(), "Publishing event");
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.sender.send(Published {
            event,
            timestamp: Utc::now(),
        });
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<Published<SuperfixEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
