use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the rest sits behind
/// `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: superfix_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Handlers publish here after their writes commit.
    pub event_bus: Arc<superfix_events::EventBus>,
}
