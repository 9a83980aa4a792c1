//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for all snapz operations, regardless of the UI
//! being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., expanding input-id shorthands to
//!   full document ids)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs` and `catalog.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over MetaStore
//!
//! `SnapzApi<S: MetaStore>` is generic over the storage backend:
//! - Production: `SnapzApi<FileStore>`
//! - Testing: `SnapzApi<InMemoryStore>`
//!
//! This enables testing the API layer without touching the filesystem.

use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::commands;
use crate::config::SnapzConfig;
use crate::error::Result;
use crate::model::DocumentId;
use crate::pictures::Picture;
use crate::store::MetaStore;
use crate::timestamp::expand_input_id;

/// The main API facade for snapz operations.
///
/// Generic over `MetaStore` to allow different storage backends.
/// All UI clients should interact through this API.
pub struct SnapzApi<S: MetaStore> {
    store: S,
    catalog: Catalog,
    root: PathBuf,
}

impl<S: MetaStore> SnapzApi<S> {
    /// Reconciles discovered pictures against prior metadata, rebuilds
    /// both indexes, and persists the refreshed state. Every command
    /// run starts here.
    pub fn initialize(
        store: S,
        root: impl Into<PathBuf>,
        pictures: &[Picture],
        config: SnapzConfig,
    ) -> Result<Self> {
        let mut store = store;
        let prior = store.load()?;
        let catalog = Catalog::initialize(pictures, prior, config);
        store.save(&catalog.to_metadata())?;

        Ok(Self {
            store,
            catalog,
            root: root.into(),
        })
    }

    pub fn list(&self, count: usize) -> Result<commands::CmdResult> {
        commands::list::run(&self.catalog, count)
    }

    pub fn get(&self, input: &str) -> Result<commands::CmdResult> {
        let id = expand_input_id(input)?;
        commands::get::run(&self.catalog, &id)
    }

    pub fn latest(&self) -> Result<commands::CmdResult> {
        commands::get::run_latest(&self.catalog)
    }

    pub fn search(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.catalog, query)
    }

    pub fn tag<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        line: &str,
        dry_run: bool,
    ) -> Result<commands::CmdResult> {
        let ids = expand_ids(inputs)?;
        commands::tag::run(&mut self.catalog, &mut self.store, &ids, line, dry_run)
    }

    pub fn untag<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        names: &[String],
    ) -> Result<commands::CmdResult> {
        let ids = expand_ids(inputs)?;
        commands::tag::run_untag(&mut self.catalog, &mut self.store, &ids, names)
    }

    pub fn set_description(&mut self, input: &str, text: String) -> Result<commands::CmdResult> {
        let id = expand_input_id(input)?;
        commands::tag::set_description(&mut self.catalog, &mut self.store, &id, text)
    }

    pub fn document_entries(&self, tag_name: Option<&str>) -> Result<Vec<(String, String)>> {
        commands::document::entries(&self.catalog, tag_name)
    }

    pub fn update_documentation(
        &mut self,
        tag_name: Option<&str>,
        buffer: &str,
    ) -> Result<commands::CmdResult> {
        commands::document::update(&mut self.catalog, &mut self.store, tag_name, buffer)
    }

    pub fn index(&self, filters: &[String]) -> Result<commands::CmdResult> {
        commands::index::run(&self.catalog, filters)
    }

    pub fn rebuild_index(&mut self) -> Result<commands::CmdResult> {
        commands::rebuild::run(&mut self.catalog, &mut self.store)
    }

    pub fn backup(&self) -> Result<commands::CmdResult> {
        commands::backup::run(&self.root)
    }
}

fn expand_ids<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DocumentId>> {
    inputs
        .iter()
        .map(|input| expand_input_id(input.as_ref()))
        .collect()
}

pub use commands::{CmdMessage, CmdResult, IndexRow, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn pictures(names: &[&str]) -> Vec<Picture> {
        names
            .iter()
            .map(|name| Picture::from_file_name(name).unwrap())
            .collect()
    }

    fn api_with(store: InMemoryStore, names: &[&str]) -> SnapzApi<InMemoryStore> {
        SnapzApi::initialize(store, ".", &pictures(names), SnapzConfig::default()).unwrap()
    }

    #[test]
    fn test_initialize_registers_new_pictures() {
        let api = api_with(
            InMemoryStore::default(),
            &["2024-01-15_14-35-27.png", "2024-01-16_09-00-00.png"],
        );

        let result = api.list(100).unwrap();
        assert_eq!(result.docs.len(), 2);
        // Newest first.
        assert_eq!(result.docs[0].id, "24-01-16:090-000");
    }

    #[test]
    fn test_initialize_persists_reconciled_state() {
        let store = StoreFixture::new()
            .with_tagged_document("24-01-15:143-527", "starred")
            .build();
        let api = api_with(store, &["2024-01-15_14-35-27.png"]);

        let saved = api.store.load().unwrap();
        assert!(saved.docs.contains_key("24-01-15:143-527"));
        assert!(saved.primary_index.contains_key("starred"));
    }

    #[test]
    fn test_get_expands_shorthand_ids() {
        let api = api_with(InMemoryStore::default(), &["2024-01-15_14-35-27.png"]);

        let result = api.get("24-01-15:143527").unwrap();
        assert_eq!(result.docs[0].id, "24-01-15:143-527");
        assert!(api.get("24-01-15:999-999").is_err());
    }

    #[test]
    fn test_tag_then_search_after_rebuild() {
        let mut api = api_with(InMemoryStore::default(), &["2024-01-15_14-35-27.png"]);

        api.tag(&["24-01-15:143-527"], "color:red", false).unwrap();
        // The primary index is stale until an explicit rebuild.
        assert!(api.search("color").unwrap().docs.is_empty());

        api.rebuild_index().unwrap();
        let result = api.search("color").unwrap();
        assert_eq!(result.docs.len(), 1);
        assert_eq!(result.docs[0].tag_summary(), "color:red");
    }

    #[test]
    fn test_latest_on_empty_store() {
        let api = api_with(InMemoryStore::default(), &[]);
        assert!(api.latest().unwrap().docs.is_empty());
    }
}
