use std::collections::BTreeMap;

use unicode_width::UnicodeWidthStr;

use super::{CmdMessage, CmdResult};
use crate::catalog::Catalog;
use crate::error::{Result, SnapzError};
use crate::store::MetaStore;

/// Index entries to put in front of the operator: primary keys, or the
/// `name:value` keys of one allow-listed tag.
pub fn entries(catalog: &Catalog, tag_name: Option<&str>) -> Result<Vec<(String, String)>> {
    match tag_name {
        None => Ok(catalog
            .primary_index()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.description.clone()))
            .collect()),
        Some(name) => Ok(catalog
            .secondary_entries_for(name)?
            .into_iter()
            .map(|(key, entry)| (key.to_string(), entry.description.clone()))
            .collect()),
    }
}

/// Renders entries as an editable `key | description` table, keys
/// padded to a shared column width.
pub fn format_entries(entries: &[(String, String)]) -> String {
    let column_width = entries
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(key, description)| {
            let padding = " ".repeat(column_width.saturating_sub(key.width()));
            format!("{key}{padding} | {description}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads the table back. Everything before the first `|` is the key,
/// everything after it (up to a second `|`, if any) the description,
/// both trimmed; lines without a usable key are skipped.
pub fn parse_entries(buffer: &str) -> BTreeMap<String, String> {
    let mut descriptions = BTreeMap::new();
    for line in buffer.lines() {
        let mut parts = line.split('|');
        let key = parts.next().unwrap_or_default().trim();
        let description = parts.next().unwrap_or_default().trim();
        if !key.is_empty() {
            descriptions.insert(key.to_string(), description.to_string());
        }
    }
    descriptions
}

/// Applies an edited table to the matching index and persists. Edits
/// to keys that no longer exist are dropped.
pub fn update<S: MetaStore>(
    catalog: &mut Catalog,
    store: &mut S,
    tag_name: Option<&str>,
    buffer: &str,
) -> Result<CmdResult> {
    let descriptions = parse_entries(buffer);
    match tag_name {
        None => catalog.update_primary_descriptions(&descriptions),
        Some(name) => {
            if !catalog.config().is_secondary(name) {
                return Err(SnapzError::ConfigInconsistency(name.to_string()));
            }
            catalog.update_secondary_descriptions(&descriptions);
        }
    }
    store.save(&catalog.to_metadata())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Done"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapzConfig;
    use crate::model::{Document, Metadata};
    use crate::store::memory::InMemoryStore;

    fn setup() -> (Catalog, InMemoryStore) {
        let mut metadata = Metadata::default();
        let mut doc = Document::new("24-01-15:143-527", "pics/a.png");
        doc.tags
            .insert("color".into(), ["red".to_string()].into());
        doc.tags.insert("starred".into(), [].into());
        metadata.docs.insert(doc.id.clone(), doc);

        let config = SnapzConfig {
            secondary_indexes: ["color".to_string()].into_iter().collect(),
            ..SnapzConfig::default()
        };
        let mut catalog = Catalog::from_metadata(metadata, config);
        catalog.rebuild_indexes();
        (catalog, InMemoryStore::new())
    }

    #[test]
    fn test_format_aligns_keys() {
        let entries = vec![
            ("color".to_string(), "hue".to_string()),
            ("starred".to_string(), String::new()),
        ];
        assert_eq!(format_entries(&entries), "color   | hue\nstarred | ");
    }

    #[test]
    fn test_parse_reads_edited_lines() {
        let parsed = parse_entries("color   | hue of the subject\nstarred |\n\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["color"], "hue of the subject");
        assert_eq!(parsed["starred"], "");
    }

    #[test]
    fn test_primary_entries_and_update() {
        let (mut catalog, mut store) = setup();
        let listed = entries(&catalog, None).unwrap();
        assert_eq!(listed.len(), 2);

        let edited = "color | hue\nstarred | worth keeping";
        update(&mut catalog, &mut store, None, edited).unwrap();

        let persisted = store.load().unwrap();
        assert_eq!(persisted.primary_index["color"].description, "hue");
        assert_eq!(
            persisted.primary_index["starred"].description,
            "worth keeping"
        );
    }

    #[test]
    fn test_secondary_entries_and_update() {
        let (mut catalog, mut store) = setup();
        let listed = entries(&catalog, Some("color")).unwrap();
        assert_eq!(listed, [("color:red".to_string(), String::new())]);

        update(&mut catalog, &mut store, Some("color"), "color:red | mostly red").unwrap();
        let persisted = store.load().unwrap();
        assert_eq!(
            persisted.secondary_index["color:red"].description,
            "mostly red"
        );
    }

    #[test]
    fn test_unlisted_tag_is_rejected() {
        let (mut catalog, mut store) = setup();
        assert!(entries(&catalog, Some("starred")).is_err());
        assert!(update(&mut catalog, &mut store, Some("starred"), "").is_err());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let (mut catalog, mut store) = setup();
        update(&mut catalog, &mut store, None, "vanished | text").unwrap();
        assert!(!store.load().unwrap().primary_index.contains_key("vanished"));
    }
}
