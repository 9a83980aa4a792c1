use super::CmdResult;
use crate::catalog::Catalog;
use crate::error::Result;

/// Fetches one document by its full id.
pub fn run(catalog: &Catalog, id: &str) -> Result<CmdResult> {
    let doc = catalog.get_document(id)?.clone();
    Ok(CmdResult::default().with_docs(vec![doc]))
}

/// Fetches the most recent document; an empty store is not an error.
pub fn run_latest(catalog: &Catalog) -> Result<CmdResult> {
    let docs = catalog.latest().cloned().into_iter().collect();
    Ok(CmdResult::default().with_docs(docs))
}
