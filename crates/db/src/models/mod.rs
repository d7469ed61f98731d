//! Entity records as they are stored on disk, plus the input DTOs and the
//! enriched read views served to clients.

pub mod anime;
pub mod character;
pub mod director;
pub mod studio;

use anidex_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record that can live in a [`CollectionStore`](crate::store::CollectionStore).
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;
}

/// Deserialize a foreign key field, reading anything other than a JSON
/// integer (a string, a float, `null`) as "not supplied".
///
/// Lookups compare ids strictly, so `"1"` never names record `1`; the
/// reference check then rejects the write as an invalid reference instead
/// of the body failing to parse.
pub fn reference_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_i64()))
}

#[cfg(test)]
mod tests {
    use super::anime::CreateAnime;

    #[test]
    fn integer_reference_is_kept() {
        let input: CreateAnime =
            serde_json::from_str(r#"{"title":"T","genre":"G","studioId":3}"#).unwrap();
        assert_eq!(input.studio_id, Some(3));
    }

    #[test]
    fn non_integer_reference_reads_as_missing() {
        for raw in [r#""1""#, "1.5", "null", "true"] {
            let body = format!(r#"{{"title":"T","genre":"G","studioId":{raw}}}"#);
            let input: CreateAnime = serde_json::from_str(&body).unwrap();
            assert_eq!(input.studio_id, None, "studioId {raw}");
        }
    }

    #[test]
    fn absent_reference_reads_as_missing() {
        let input: CreateAnime = serde_json::from_str(r#"{"title":"T","genre":"G"}"#).unwrap();
        assert_eq!(input.studio_id, None);
    }
}
