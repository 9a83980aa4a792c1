//! # Catalog
//!
//! The catalog owns the document store and both derived indexes, and
//! implements the read and write semantics on top of them:
//!
//! - **Primary index**: tag name to the ids carrying that tag.
//! - **Secondary index**: `name:value` to the ids carrying that value,
//!   kept only for tag names listed in [`SnapzConfig::secondary_indexes`].
//!
//! ## Consistency
//!
//! Indexes are snapshots. They are recomputed wholesale by
//! [`Catalog::initialize`] and [`Catalog::rebuild_indexes`]; routine
//! modification updates documents in place and leaves both indexes
//! untouched, so index-backed lookups reflect the state as of the last
//! rebuild. Value lookups re-check candidates against the live document
//! before accepting them, which narrows (but does not eliminate) the
//! window. Setting `eagerReindex` in `.snapz-config` opts into a
//! rebuild on every persisting modification instead.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::SnapzConfig;
use crate::error::{Result, SnapzError};
use crate::lang::{ModOp, Modification, SearchExpr};
use crate::model::{secondary_key, Document, DocumentId, IdSet, IndexEntry, Metadata};
use crate::pictures::Picture;

pub struct Catalog {
    docs: BTreeMap<DocumentId, Document>,
    primary_index: BTreeMap<String, IndexEntry>,
    secondary_index: BTreeMap<String, IndexEntry>,
    config: SnapzConfig,
}

impl Catalog {
    /// Reconciles discovered pictures with previously persisted state:
    /// every picture gets a document (keeping tags and description when
    /// one already existed), documents whose picture vanished are
    /// dropped, and both indexes are rebuilt to match.
    pub fn initialize(pictures: &[Picture], prior: Metadata, config: SnapzConfig) -> Self {
        let Metadata {
            docs: mut prior_docs,
            primary_index,
            secondary_index,
        } = prior;

        let mut docs = BTreeMap::new();
        for picture in pictures {
            let id = picture.id();
            let doc = match prior_docs.remove(&id) {
                Some(mut existing) => {
                    existing.file_path = picture.file_path();
                    existing
                }
                None => Document::new(id.clone(), picture.file_path()),
            };
            docs.insert(id, doc);
        }

        let mut catalog = Catalog {
            docs,
            primary_index,
            secondary_index,
            config,
        };
        catalog.rebuild_indexes();
        catalog
    }

    pub fn from_metadata(metadata: Metadata, config: SnapzConfig) -> Self {
        Catalog {
            docs: metadata.docs,
            primary_index: metadata.primary_index,
            secondary_index: metadata.secondary_index,
            config,
        }
    }

    pub fn to_metadata(&self) -> Metadata {
        Metadata {
            docs: self.docs.clone(),
            primary_index: self.primary_index.clone(),
            secondary_index: self.secondary_index.clone(),
        }
    }

    pub fn config(&self) -> &SnapzConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.docs.values()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.docs.get(id)
    }

    pub fn get_document(&self, id: &str) -> Result<&Document> {
        self.docs
            .get(id)
            .ok_or_else(|| SnapzError::DocumentNotFound(id.to_string()))
    }

    /// Ids order chronologically, so the largest key is the newest
    /// capture.
    pub fn latest(&self) -> Option<&Document> {
        self.docs.values().next_back()
    }

    pub fn primary_index(&self) -> &BTreeMap<String, IndexEntry> {
        &self.primary_index
    }

    pub fn secondary_index(&self) -> &BTreeMap<String, IndexEntry> {
        &self.secondary_index
    }

    /// Recomputes both indexes from the live documents. Membership is
    /// rebuilt from scratch; entry descriptions are carried over by key
    /// from the outgoing state, since they are operator-authored and
    /// independent of which ids are filed under the key.
    pub fn rebuild_indexes(&mut self) {
        let mut primary: BTreeMap<String, IndexEntry> = BTreeMap::new();
        let mut secondary: BTreeMap<String, IndexEntry> = BTreeMap::new();

        for doc in self.docs.values() {
            for (name, values) in &doc.tags {
                primary
                    .entry(name.clone())
                    .or_default()
                    .ids
                    .insert(doc.id.clone());
                if self.config.is_secondary(name) {
                    for value in values {
                        secondary
                            .entry(secondary_key(name, value))
                            .or_default()
                            .ids
                            .insert(doc.id.clone());
                    }
                }
            }
        }

        for (key, entry) in &mut primary {
            if let Some(prior) = self.primary_index.get(key) {
                entry.description = prior.description.clone();
            }
        }
        for (key, entry) in &mut secondary {
            if let Some(prior) = self.secondary_index.get(key) {
                entry.description = prior.description.clone();
            }
        }

        self.primary_index = primary;
        self.secondary_index = secondary;
    }

    /// Candidate lookup. With a non-empty value list on an allow-listed
    /// tag this unions the matching secondary entries; otherwise it
    /// returns the primary entry's ids. Candidates are not verified
    /// against live documents here.
    pub fn get_ids(&self, name: &str, values: &[String]) -> IdSet {
        if !values.is_empty() && self.config.is_secondary(name) {
            let mut ids = IdSet::new();
            for value in values {
                if let Some(entry) = self.secondary_index.get(&secondary_key(name, value)) {
                    ids.extend(entry.ids.iter().cloned());
                }
            }
            return ids;
        }

        self.primary_index
            .get(name)
            .map(|entry| entry.ids.clone())
            .unwrap_or_default()
    }

    /// Evaluates a search tree to the matching id set. Name-only
    /// lookups read the primary index verbatim; value lookups take
    /// index candidates and re-check the predicate against the live
    /// document, dropping candidates whose document or tag is gone.
    pub fn evaluate(&self, expr: &SearchExpr) -> IdSet {
        match expr {
            SearchExpr::SelectAll => self.docs.keys().cloned().collect(),
            SearchExpr::HasTag(name) => self
                .primary_index
                .get(name)
                .map(|entry| entry.ids.clone())
                .unwrap_or_default(),
            SearchExpr::HasAnyValue { name, values } => {
                self.verify_candidates(name, values, |tag_values| {
                    values.iter().any(|v| tag_values.contains(v))
                })
            }
            SearchExpr::HasAllValues { name, values } => {
                self.verify_candidates(name, values, |tag_values| {
                    values.iter().all(|v| tag_values.contains(v))
                })
            }
            SearchExpr::HasExactValues { name, values } => {
                let want: BTreeSet<String> = values.iter().cloned().collect();
                self.verify_candidates(name, values, |tag_values| *tag_values == want)
            }
            SearchExpr::Intersection(left, right) => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                left.intersection(&right).cloned().collect()
            }
            SearchExpr::Union(left, right) => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                left.union(&right).cloned().collect()
            }
            SearchExpr::Difference(left, right) => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                left.difference(&right).cloned().collect()
            }
        }
    }

    fn verify_candidates<F>(&self, name: &str, values: &[String], matches: F) -> IdSet
    where
        F: Fn(&BTreeSet<String>) -> bool,
    {
        self.get_ids(name, values)
            .into_iter()
            .filter(|id| {
                self.docs
                    .get(id)
                    .and_then(|doc| doc.tags.get(name))
                    .is_some_and(&matches)
            })
            .collect()
    }

    /// Applies a parsed modification to the selected documents,
    /// operation-major: each operation runs over every document before
    /// the next operation starts. The whole batch commits or none of it
    /// does; work happens on clones and is copied back only once every
    /// application succeeded. A dry run returns the would-be documents
    /// without committing anything.
    pub fn apply_modification(
        &mut self,
        ids: &[DocumentId],
        modification: &Modification,
        dry_run: bool,
    ) -> Result<Vec<Document>> {
        let mut staged = Vec::with_capacity(ids.len());
        for id in ids {
            staged.push(self.get_document(id)?.clone());
        }

        for op in &modification.ops {
            for doc in &mut staged {
                op.apply(doc)?;
            }
        }

        if !dry_run {
            for doc in &staged {
                self.docs.insert(doc.id.clone(), doc.clone());
            }
            if self.config.eager_reindex {
                self.rebuild_indexes();
            }
        }

        Ok(staged)
    }

    /// Convenience for the untag flow: every name becomes a
    /// [`ModOp::RemoveTag`].
    pub fn remove_tags(&mut self, ids: &[DocumentId], names: &[String]) -> Result<Vec<Document>> {
        let ops = names
            .iter()
            .map(|name| ModOp::RemoveTag(name.clone()))
            .collect();
        self.apply_modification(ids, &Modification::new(ops), false)
    }

    /// Unique values a tag currently holds, gathered from the live
    /// documents behind the primary entry.
    pub fn tag_values(&self, name: &str) -> BTreeSet<String> {
        let mut values = BTreeSet::new();
        if let Some(entry) = self.primary_index.get(name) {
            for id in &entry.ids {
                if let Some(doc_values) = self.docs.get(id).and_then(|doc| doc.tags.get(name)) {
                    values.extend(doc_values.iter().cloned());
                }
            }
        }
        values
    }

    /// Secondary entries filed under `tag_name`, for the document
    /// flow. The tag must be allow-listed in the config.
    pub fn secondary_entries_for(&self, tag_name: &str) -> Result<Vec<(&str, &IndexEntry)>> {
        if !self.config.is_secondary(tag_name) {
            return Err(SnapzError::ConfigInconsistency(tag_name.to_string()));
        }
        let prefix = format!("{tag_name}:");
        Ok(self
            .secondary_index
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, entry)| (key.as_str(), entry))
            .collect())
    }

    /// Writes back edited descriptions by key; keys that no longer
    /// exist in the index are ignored.
    pub fn update_primary_descriptions(&mut self, descriptions: &BTreeMap<String, String>) {
        for (key, entry) in &mut self.primary_index {
            if let Some(description) = descriptions.get(key) {
                entry.description = description.clone();
            }
        }
    }

    pub fn update_secondary_descriptions(&mut self, descriptions: &BTreeMap<String, String>) {
        for (key, entry) in &mut self.secondary_index {
            if let Some(description) = descriptions.get(key) {
                entry.description = description.clone();
            }
        }
    }
}
