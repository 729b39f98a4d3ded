//! Field projection
//!
//! Copies caller-selected logical fields out of raw platform records. Some
//! logical fields can appear under more than one name on the raw record
//! depending on which scraper variant produced it; the first present alias
//! wins.

use serde_json::Value;

use crate::domain::job::FieldSelection;
use crate::domain::record::{ProjectedRecord, RawRecord};

/// Source-field aliases for each logical field, in priority order.
const IMAGE_URL_ALIASES: &[&str] = &["imageUrl", "displayUrl"];
const CAPTION_ALIASES: &[&str] = &["caption", "text"];
const TIMESTAMP_ALIASES: &[&str] = &["timestamp"];
const LIKES_ALIASES: &[&str] = &["likesCount"];
const COMMENTS_ALIASES: &[&str] = &["commentsCount"];

/// Projects each raw record down to the selected logical fields.
///
/// Record count and order are preserved 1:1. A selected field with no present
/// source alias is omitted from that record rather than set to null.
pub fn project(records: &[RawRecord], fields: &FieldSelection) -> Vec<ProjectedRecord> {
    records
        .iter()
        .map(|record| project_one(record, fields))
        .collect()
}

fn project_one(record: &RawRecord, fields: &FieldSelection) -> ProjectedRecord {
    let mut out = ProjectedRecord::new();

    if fields.image_url {
        copy_first(record, IMAGE_URL_ALIASES, "imageUrl", &mut out);
    }
    if fields.caption {
        copy_first(record, CAPTION_ALIASES, "caption", &mut out);
    }
    if fields.timestamp {
        copy_first(record, TIMESTAMP_ALIASES, "timestamp", &mut out);
    }
    if fields.likes {
        copy_first(record, LIKES_ALIASES, "likes", &mut out);
    }
    if fields.comments {
        copy_first(record, COMMENTS_ALIASES, "comments", &mut out);
    }

    out
}

/// Copies the first present, non-null alias value under the logical name.
fn copy_first(record: &RawRecord, aliases: &[&str], logical: &str, out: &mut ProjectedRecord) {
    for alias in aliases {
        if let Some(value) = record.get(*alias) {
            if !value.is_null() {
                out.insert(logical.to_string(), value.clone());
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("raw record fixtures must be objects"),
        }
    }

    #[test]
    fn test_alias_resolution() {
        let records = vec![
            raw(json!({"imageUrl": "a.jpg", "text": "hello"})),
            raw(json!({"displayUrl": "b.jpg", "caption": "world"})),
        ];
        let fields = FieldSelection {
            image_url: true,
            caption: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].get("imageUrl"), Some(&json!("a.jpg")));
        assert_eq!(projected[0].get("caption"), Some(&json!("hello")));
        assert_eq!(projected[1].get("imageUrl"), Some(&json!("b.jpg")));
        assert_eq!(projected[1].get("caption"), Some(&json!("world")));
    }

    #[test]
    fn test_count_and_order_preserved() {
        let records = vec![
            raw(json!({"caption": "first"})),
            raw(json!({})),
            raw(json!({"caption": "third"})),
        ];
        let fields = FieldSelection {
            caption: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert_eq!(projected.len(), 3);
        assert_eq!(projected[0].get("caption"), Some(&json!("first")));
        assert!(projected[1].is_empty());
        assert_eq!(projected[2].get("caption"), Some(&json!("third")));
    }

    #[test]
    fn test_unselected_fields_never_appear() {
        let records = vec![raw(json!({
            "imageUrl": "a.jpg",
            "caption": "hello",
            "likesCount": 42
        }))];
        let fields = FieldSelection {
            caption: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert_eq!(projected[0].len(), 1);
        assert!(projected[0].get("imageUrl").is_none());
        assert!(projected[0].get("likes").is_none());
    }

    #[test]
    fn test_missing_source_is_omitted_not_null() {
        let records = vec![raw(json!({"caption": "hello"}))];
        let fields = FieldSelection {
            image_url: true,
            caption: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert!(!projected[0].contains_key("imageUrl"));
        assert_eq!(projected[0].get("caption"), Some(&json!("hello")));
    }

    #[test]
    fn test_null_alias_falls_through() {
        let records = vec![raw(json!({"imageUrl": null, "displayUrl": "b.jpg"}))];
        let fields = FieldSelection {
            image_url: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert_eq!(projected[0].get("imageUrl"), Some(&json!("b.jpg")));
    }

    #[test]
    fn test_counter_fields_rename() {
        let records = vec![raw(json!({
            "likesCount": 10,
            "commentsCount": 3,
            "timestamp": "2025-05-10T00:00:00Z"
        }))];
        let fields = FieldSelection {
            timestamp: true,
            likes: true,
            comments: true,
            ..Default::default()
        };

        let projected = project(&records, &fields);

        assert_eq!(projected[0].get("likes"), Some(&json!(10)));
        assert_eq!(projected[0].get("comments"), Some(&json!(3)));
        assert_eq!(
            projected[0].get("timestamp"),
            Some(&json!("2025-05-10T00:00:00Z"))
        );
    }
}
