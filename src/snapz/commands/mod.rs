//! Business logic for each subcommand. Command functions operate on
//! the catalog (and a [`MetaStore`](crate::store::MetaStore) when they
//! persist) and return structured [`CmdResult`] values; they never
//! print or exit.

use crate::model::Document;

pub mod backup;
pub mod document;
pub mod get;
pub mod index;
pub mod list;
pub mod rebuild;
pub mod search;
pub mod tag;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of the `index` listing: a tag name, plus its unique live
/// values when the caller asked for them.
#[derive(Debug, Clone)]
pub struct IndexRow {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub docs: Vec<Document>,
    pub index_rows: Vec<IndexRow>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_docs(mut self, docs: Vec<Document>) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_index_rows(mut self, rows: Vec<IndexRow>) -> Self {
        self.index_rows = rows;
        self
    }
}

/// Newest first: canonical file names embed the timestamp, so path
/// order is capture order.
pub fn sort_for_display(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.file_path.cmp(&a.file_path));
}
