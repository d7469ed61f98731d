//! Studio entity model and DTOs.

use anidex_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// A studio record from `studios.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Keys written by other tools, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Studio {
    const ENTITY: &'static str = "Studio";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a new studio.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudio {
    pub name: String,
    pub location: String,
}

/// DTO for updating a studio. Every mutable field must be resupplied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudio {
    pub name: String,
    pub location: String,
}
