//! Core data model: documents, tags, and the index structures that the
//! catalog persists between runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Ids are derived from the screenshot timestamp, e.g. `24-01-15:143-527`.
/// Lexicographic order on ids matches chronological order.
pub type DocumentId = String;

/// Sorted id collections keep the on-disk JSON canonical.
pub type IdSet = BTreeSet<DocumentId>;

/// A tagged screenshot. Tags map a name to a (possibly empty) set of
/// values; a valueless tag is a plain label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub file_path: String,
    #[serde(rename = "tagMap")]
    pub tags: BTreeMap<String, BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, file_path: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            file_path: file_path.into(),
            tags: BTreeMap::new(),
            description: None,
        }
    }

    /// All tags rendered on one line, in the same syntax the tag
    /// language accepts: `color:red, shape:[round square], starred`.
    pub fn tag_summary(&self) -> String {
        self.tags
            .iter()
            .map(|(name, values)| format_tag(name, values))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders a single tag back into tag-language syntax.
pub fn format_tag(name: &str, values: &BTreeSet<String>) -> String {
    match values.len() {
        0 => name.to_string(),
        1 => {
            let value = values.iter().next().map(String::as_str).unwrap_or_default();
            format!("{name}:{value}")
        }
        _ => {
            let joined = values.iter().cloned().collect::<Vec<_>>().join(" ");
            format!("{name}:[{joined}]")
        }
    }
}

/// One row of an index: every id filed under the key, plus a curated
/// description of the tag itself. The description is edited through
/// the document flow and survives rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(default)]
    pub description: String,
    pub ids: IdSet,
}

impl IndexEntry {
    pub fn with_ids(ids: IdSet) -> Self {
        IndexEntry {
            description: String::new(),
            ids,
        }
    }
}

/// The persisted state: every document plus both indexes. Indexes are
/// snapshots; they are only rebuilt on initialization or an explicit
/// rebuild, so they may lag behind `docs` within a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "metaById")]
    pub docs: BTreeMap<DocumentId, Document>,
    pub primary_index: BTreeMap<String, IndexEntry>,
    pub secondary_index: BTreeMap<String, IndexEntry>,
}

/// Key under which a tag name/value pair is filed in the secondary
/// index, e.g. `color:red`.
pub fn secondary_key(name: &str, value: &str) -> String {
    format!("{name}:{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_tag_valueless() {
        assert_eq!(format_tag("starred", &BTreeSet::new()), "starred");
    }

    #[test]
    fn test_format_tag_single_value() {
        assert_eq!(format_tag("color", &values(&["red"])), "color:red");
    }

    #[test]
    fn test_format_tag_multiple_values_sorted() {
        assert_eq!(
            format_tag("shape", &values(&["square", "round"])),
            "shape:[round square]"
        );
    }

    #[test]
    fn test_tag_summary_joins_tags() {
        let mut doc = Document::new("24-01-15:143-527", "pics/a.png");
        doc.tags.insert("starred".into(), BTreeSet::new());
        doc.tags.insert("color".into(), values(&["red"]));
        assert_eq!(doc.tag_summary(), "color:red, starred");
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let mut doc = Document::new("24-01-15:143-527", "pics/a.png");
        doc.tags.insert("color".into(), values(&["red"]));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["filePath"], "pics/a.png");
        assert_eq!(json["tagMap"]["color"][0], "red");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_metadata_serializes_meta_by_id() {
        let mut meta = Metadata::default();
        meta.docs.insert(
            "24-01-15:143-527".into(),
            Document::new("24-01-15:143-527", "pics/a.png"),
        );
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["metaById"].get("24-01-15:143-527").is_some());
        assert!(json.get("primaryIndex").is_some());
        assert!(json.get("secondaryIndex").is_some());
    }

    #[test]
    fn test_metadata_round_trips() {
        let mut meta = Metadata::default();
        let mut doc = Document::new("24-01-15:143-527", "pics/a.png");
        doc.description = Some("login page".into());
        meta.docs.insert(doc.id.clone(), doc);
        let mut entry = IndexEntry::default();
        entry.ids.insert("24-01-15:143-527".into());
        meta.primary_index.insert("color".into(), entry);

        let text = serde_json::to_string(&meta).unwrap();
        let back: Metadata = serde_json::from_str(&text).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn test_secondary_key_format() {
        assert_eq!(secondary_key("color", "red"), "color:red");
    }
}
