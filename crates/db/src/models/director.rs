//! Director entity model and DTOs.
//!
//! Directors are not referenced by any other entity kind.

use anidex_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// A director record from `directors.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Director {
    const ENTITY: &'static str = "Director";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDirector {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDirector {
    pub name: String,
}
