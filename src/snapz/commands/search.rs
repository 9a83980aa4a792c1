use super::{sort_for_display, CmdResult};
use crate::catalog::Catalog;
use crate::error::{Result, SnapzError};
use crate::lang::{parse_search, SearchExpr};

/// Parses and evaluates a search query. An empty query selects
/// everything.
pub fn run(catalog: &Catalog, query: &str) -> Result<CmdResult> {
    let expr = parse_search(query)?.unwrap_or(SearchExpr::SelectAll);
    let ids = catalog.evaluate(&expr);

    let mut docs = Vec::with_capacity(ids.len());
    for id in &ids {
        // Name lookups read the index verbatim, so a stale index can
        // hand back an id with no document behind it.
        let doc = catalog.document(id).ok_or_else(|| {
            SnapzError::Store(format!(
                "index entry \"{id}\" has no document; run rebuild-index"
            ))
        })?;
        docs.push(doc.clone());
    }
    sort_for_display(&mut docs);

    Ok(CmdResult::default().with_docs(docs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapzConfig;
    use crate::model::{Document, IndexEntry, Metadata};

    fn catalog() -> Catalog {
        let mut metadata = Metadata::default();
        let mut tagged = Document::new("24-01-15:143-527", "pics/2024-01-15_14-35-27.png");
        tagged
            .tags
            .insert("color".into(), ["red".to_string()].into());
        metadata.docs.insert(tagged.id.clone(), tagged);
        metadata.docs.insert(
            "24-01-16:090-000".into(),
            Document::new("24-01-16:090-000", "pics/2024-01-16_09-00-00.png"),
        );

        let mut catalog = Catalog::from_metadata(metadata, SnapzConfig::default());
        catalog.rebuild_indexes();
        catalog
    }

    #[test]
    fn test_query_narrows_results() {
        let result = run(&catalog(), "color:red").unwrap();
        assert_eq!(result.docs.len(), 1);
        assert_eq!(result.docs[0].id, "24-01-15:143-527");
    }

    #[test]
    fn test_empty_query_selects_everything() {
        let result = run(&catalog(), "  ").unwrap();
        assert_eq!(result.docs.len(), 2);
        // Newest first.
        assert_eq!(result.docs[0].id, "24-01-16:090-000");
    }

    #[test]
    fn test_no_matches_is_empty_not_an_error() {
        let result = run(&catalog(), "missing").unwrap();
        assert!(result.docs.is_empty());
    }

    #[test]
    fn test_parse_errors_bubble_up() {
        assert!(run(&catalog(), "a +").is_err());
    }

    #[test]
    fn test_dangling_index_entry_is_a_store_error() {
        let mut metadata = Metadata::default();
        metadata.primary_index.insert(
            "color".into(),
            IndexEntry::with_ids(["ghost".to_string()].into()),
        );
        let catalog = Catalog::from_metadata(metadata, SnapzConfig::default());

        let err = run(&catalog, "color").unwrap_err();
        assert!(matches!(err, SnapzError::Store(msg) if msg.contains("rebuild-index")));
    }
}
