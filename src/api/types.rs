/// Wire types shared with the expressions backend
///
/// Every metadata field is optional on read: the backend may omit a
/// field or send an explicit null, and both read as empty. Writes
/// always carry fully-populated values. Unknown fields returned by
/// the backend are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Read a field that may be missing or an explicit JSON null;
/// either way it becomes the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// User-editable metadata attached to an expression
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExpressionMetadata {
    /// Short name for the GIF expression
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Longer notes about the GIF expression
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-form tags, ordered as the user entered them
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// A single processed-GIF record owned by the backend.
/// The client never constructs an id; they arrive from the server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: String,
    /// Server-assigned filename of the processed GIF, used as the
    /// suggested name when downloading
    #[serde(default, deserialize_with = "null_as_default")]
    pub processed_filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ExpressionMetadata,
}

/// Full-replace update payload for one record's metadata.
/// Partial updates are not supported; all three fields are always sent.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetadataUpdate {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Everything needed to create a new expression on the backend
#[derive(Debug, Clone)]
pub struct NewExpression {
    /// Original filename of the chosen GIF, forwarded in the multipart part
    pub file_name: String,
    /// Raw GIF bytes
    pub bytes: Vec<u8>,
    pub title: String,
    pub description: String,
    /// Tags exactly as typed; the backend does its own splitting
    pub tags_raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "abc-123",
            "original_filename": "abc-123_wink.gif",
            "processed_filename": "abc-123_processed.gif",
            "metadata": {"title": "Wink", "description": "A quick wink", "tags": ["happy", "eye"]}
        }"#;

        let expression: Expression = serde_json::from_str(json).unwrap();

        assert_eq!(expression.id, "abc-123");
        assert_eq!(expression.processed_filename, "abc-123_processed.gif");
        assert_eq!(expression.metadata.title, "Wink");
        assert_eq!(expression.metadata.tags, vec!["happy", "eye"]);
    }

    #[test]
    fn test_deserialize_sparse_metadata() {
        // Older records may carry partial or missing metadata
        let json = r#"{"id": "abc-123", "metadata": {"title": "Wink"}}"#;
        let expression: Expression = serde_json::from_str(json).unwrap();

        assert_eq!(expression.metadata.title, "Wink");
        assert_eq!(expression.metadata.description, "");
        assert!(expression.metadata.tags.is_empty());
        assert_eq!(expression.processed_filename, "");

        let json = r#"{"id": "def-456"}"#;
        let expression: Expression = serde_json::from_str(json).unwrap();
        assert_eq!(expression.metadata, ExpressionMetadata::default());
    }

    #[test]
    fn test_deserialize_null_fields_as_empty() {
        let json = r#"{
            "id": "abc-123",
            "processed_filename": null,
            "metadata": {"title": null, "description": null, "tags": null}
        }"#;

        let expression: Expression = serde_json::from_str(json).unwrap();

        assert_eq!(expression.processed_filename, "");
        assert_eq!(expression.metadata, ExpressionMetadata::default());

        // A null metadata object reads the same as a missing one
        let json = r#"{"id": "def-456", "metadata": null}"#;
        let expression: Expression = serde_json::from_str(json).unwrap();
        assert_eq!(expression.metadata, ExpressionMetadata::default());
    }

    #[test]
    fn test_update_serializes_all_fields() {
        let update = MetadataUpdate {
            title: "Wink".to_string(),
            description: String::new(),
            tags: Vec::new(),
        };

        let json = serde_json::to_value(&update).unwrap();

        // Empty values are still sent; the update is a full replace
        assert_eq!(json["title"], "Wink");
        assert_eq!(json["description"], "");
        assert!(json["tags"].as_array().unwrap().is_empty());
    }
}
