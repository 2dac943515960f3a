//! Document ids are UUIDv7 values stored as hyphenated strings.
//!
//! The plain `Uuid` serde impl writes BSON binary through the driver but a
//! string through `serde_json`; pinning the string form keeps `_id` identical
//! in both and lets filters be built from `Uuid::to_string`.

use mongodb::bson::{Document, doc};
use uuid::Uuid;

/// `#[serde(with = "uuid_as_string")]` for `Uuid` fields.
pub mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&id.hyphenated())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(de::Error::custom)
    }
}

/// Filter matching a single document by id
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(rename = "_id", with = "uuid_as_string")]
        id: Uuid,
    }

    #[test]
    fn test_uuid_stored_as_string_in_bson() {
        let id = Uuid::now_v7();
        let document = bson::to_document(&Doc { id }).unwrap();

        assert_eq!(document.get("_id"), Some(&Bson::String(id.to_string())));
        assert_eq!(document, id_filter(id));

        let back: Doc = bson::from_document(document).unwrap();
        assert_eq!(back.id, id);
    }

    #[test]
    fn test_uuid_json_matches_bson() {
        let id = Uuid::now_v7();
        let json = serde_json::to_value(Doc { id }).unwrap();
        assert_eq!(json["_id"], id.to_string());
    }

    #[test]
    fn test_invalid_uuid_string_rejected() {
        let result: Result<Doc, _> = bson::from_document(doc! { "_id": "nope" });
        assert!(result.is_err());
    }
}
