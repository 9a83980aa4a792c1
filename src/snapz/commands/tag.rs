use super::{CmdMessage, CmdResult};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::lang::{parse_modification, ModOp, Modification};
use crate::model::DocumentId;
use crate::store::MetaStore;

/// Parses a modification line and applies it to the selected
/// documents. Unless this is a dry run, the updated state is persisted
/// before returning.
pub fn run<S: MetaStore>(
    catalog: &mut Catalog,
    store: &mut S,
    ids: &[DocumentId],
    line: &str,
    dry_run: bool,
) -> Result<CmdResult> {
    let modification = parse_modification(line)?;
    apply(catalog, store, ids, &modification, dry_run)
}

/// The deprecated untag flow: plain tag names become remove-tag
/// operations.
pub fn run_untag<S: MetaStore>(
    catalog: &mut Catalog,
    store: &mut S,
    ids: &[DocumentId],
    names: &[String],
) -> Result<CmdResult> {
    let ops = names
        .iter()
        .map(|name| ModOp::RemoveTag(name.clone()))
        .collect();
    apply(catalog, store, ids, &Modification::new(ops), false)
}

/// Overwrites one document's description.
pub fn set_description<S: MetaStore>(
    catalog: &mut Catalog,
    store: &mut S,
    id: &DocumentId,
    text: String,
) -> Result<CmdResult> {
    let modification = Modification::new(vec![ModOp::SetDescription(text)]);
    apply(catalog, store, std::slice::from_ref(id), &modification, false)
}

fn apply<S: MetaStore>(
    catalog: &mut Catalog,
    store: &mut S,
    ids: &[DocumentId],
    modification: &Modification,
    dry_run: bool,
) -> Result<CmdResult> {
    let docs = catalog.apply_modification(ids, modification, dry_run)?;

    let mut result = CmdResult::default().with_docs(docs);
    if dry_run {
        result.add_message(CmdMessage::info("Dry run; nothing was saved."));
    } else {
        store.save(&catalog.to_metadata())?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapzConfig;
    use crate::error::SnapzError;
    use crate::model::{Document, Metadata};
    use crate::store::memory::InMemoryStore;

    fn setup() -> (Catalog, InMemoryStore) {
        let mut metadata = Metadata::default();
        metadata.docs.insert(
            "24-01-15:143-527".into(),
            Document::new("24-01-15:143-527", "pics/2024-01-15_14-35-27.png"),
        );
        let mut store = InMemoryStore::new();
        store.save(&metadata).unwrap();
        let mut catalog = Catalog::from_metadata(metadata, SnapzConfig::default());
        catalog.rebuild_indexes();
        (catalog, store)
    }

    fn id() -> Vec<DocumentId> {
        vec!["24-01-15:143-527".to_string()]
    }

    #[test]
    fn test_tag_applies_and_persists() {
        let (mut catalog, mut store) = setup();
        let result = run(&mut catalog, &mut store, &id(), "color:red starred", false).unwrap();

        assert_eq!(result.docs[0].tag_summary(), "color:red, starred");
        let persisted = store.load().unwrap();
        assert!(persisted.docs["24-01-15:143-527"].tags.contains_key("color"));
    }

    #[test]
    fn test_dry_run_does_not_persist() {
        let (mut catalog, mut store) = setup();
        let result = run(&mut catalog, &mut store, &id(), "color:red", true).unwrap();

        assert!(result.docs[0].tags.contains_key("color"));
        assert!(!result.messages.is_empty());
        let persisted = store.load().unwrap();
        assert!(persisted.docs["24-01-15:143-527"].tags.is_empty());
    }

    #[test]
    fn test_conflict_leaves_persisted_state_alone() {
        let (mut catalog, mut store) = setup();
        run(&mut catalog, &mut store, &id(), "status:[a b]", false).unwrap();

        let err = run(&mut catalog, &mut store, &id(), "status:c", false).unwrap_err();
        assert!(matches!(err, SnapzError::SoftSetConflict { .. }));
        let persisted = store.load().unwrap();
        assert_eq!(persisted.docs["24-01-15:143-527"].tags["status"].len(), 2);
    }

    #[test]
    fn test_parse_error_stops_before_applying() {
        let (mut catalog, mut store) = setup();
        assert!(run(&mut catalog, &mut store, &id(), "a:", false).is_err());
        assert!(catalog.document("24-01-15:143-527").unwrap().tags.is_empty());
    }

    #[test]
    fn test_untag_removes_names() {
        let (mut catalog, mut store) = setup();
        run(&mut catalog, &mut store, &id(), "a b:c", false).unwrap();
        let result = run_untag(
            &mut catalog,
            &mut store,
            &id(),
            &["a".to_string(), "b".to_string()],
        )
        .unwrap();

        assert!(result.docs[0].tags.is_empty());
        let persisted = store.load().unwrap();
        assert!(persisted.docs["24-01-15:143-527"].tags.is_empty());
    }

    #[test]
    fn test_set_description_overwrites() {
        let (mut catalog, mut store) = setup();
        set_description(
            &mut catalog,
            &mut store,
            &"24-01-15:143-527".to_string(),
            "the login page\n".to_string(),
        )
        .unwrap();

        let persisted = store.load().unwrap();
        assert_eq!(
            persisted.docs["24-01-15:143-527"].description.as_deref(),
            Some("the login page\n")
        );
    }
}
