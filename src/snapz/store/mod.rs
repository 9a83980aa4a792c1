//! # Storage Layer
//!
//! Persistence for the catalog's state lives behind the [`MetaStore`]
//! trait so the command layer never touches the filesystem directly.
//!
//! - [`fs::FileStore`]: production storage, one pretty-printed JSON
//!   document at `.metadata` in the workspace root.
//! - [`memory::InMemoryStore`]: no persistence, for tests.
//!
//! A missing or unparseable `.metadata` file loads as empty state
//! rather than an error: initialization rebuilds everything from the
//! discovered pictures anyway, so an unreadable file is recoverable
//! and refusing to start would help nobody.

use crate::error::Result;
use crate::model::Metadata;

pub mod fs;
pub mod memory;

/// Abstract interface for loading and saving the persisted catalog
/// state.
pub trait MetaStore {
    /// Load the persisted state; empty state if nothing usable exists.
    fn load(&self) -> Result<Metadata>;

    /// Persist the given state wholesale.
    fn save(&mut self, metadata: &Metadata) -> Result<()>;
}
