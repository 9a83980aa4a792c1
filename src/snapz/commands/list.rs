use super::{sort_for_display, CmdResult};
use crate::catalog::Catalog;
use crate::error::Result;

pub const DEFAULT_COUNT: usize = 100;

/// Lists the latest `count` documents, newest first.
pub fn run(catalog: &Catalog, count: usize) -> Result<CmdResult> {
    let mut docs: Vec<_> = catalog.documents().cloned().collect();
    sort_for_display(&mut docs);
    docs.truncate(count);
    Ok(CmdResult::default().with_docs(docs))
}
