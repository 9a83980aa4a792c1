use super::MetaStore;
use crate::error::Result;
use crate::model::Metadata;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    metadata: Metadata,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(metadata: Metadata) -> Self {
        Self { metadata }
    }
}

impl MetaStore for InMemoryStore {
    fn load(&self) -> Result<Metadata> {
        Ok(self.metadata.clone())
    }

    fn save(&mut self, metadata: &Metadata) -> Result<()> {
        self.metadata = metadata.clone();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::lang::parse_modification;
    use crate::model::Document;
    use crate::timestamp::Timestamp;

    /// Builds an [`InMemoryStore`] pre-seeded with documents, so api
    /// tests never touch the filesystem.
    pub struct StoreFixture {
        metadata: Metadata,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                metadata: Metadata::default(),
            }
        }

        /// Adds an untagged document for the given full id.
        pub fn with_document(self, id: &str) -> Self {
            self.with_tagged_document(id, "")
        }

        /// Adds a document and applies a modification line to it, e.g.
        /// `"color:red starred #the login page"`.
        pub fn with_tagged_document(mut self, id: &str, line: &str) -> Self {
            let file_name = Timestamp::parse_id(id)
                .map(|ts| format!("{}.png", ts.formatted()))
                .unwrap_or_else(|_| format!("{id}.png"));
            let mut doc = Document::new(id, format!("pics/{file_name}"));
            let modification = parse_modification(line).unwrap();
            for op in &modification.ops {
                op.apply(&mut doc).unwrap();
            }
            self.metadata.docs.insert(doc.id.clone(), doc);
            self
        }

        pub fn build(self) -> InMemoryStore {
            InMemoryStore::with_metadata(self.metadata)
        }
    }
}
