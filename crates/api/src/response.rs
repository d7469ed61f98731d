//! Shared response payloads for API handlers.

use serde::Serialize;

/// `{ "message": ... }` confirmation body returned by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
