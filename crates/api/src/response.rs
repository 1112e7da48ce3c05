//! Shared response bodies for API handlers.

use serde::Serialize;
use superfix_core::types::DbId;

/// `{ "success": true, "id"? }` acknowledgement returned by public form
/// submissions and deletions.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: DbId) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}
