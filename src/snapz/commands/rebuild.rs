use super::{CmdMessage, CmdResult};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::store::MetaStore;

/// Rebuilds both indexes from the live documents and persists.
pub fn run<S: MetaStore>(catalog: &mut Catalog, store: &mut S) -> Result<CmdResult> {
    catalog.rebuild_indexes();
    store.save(&catalog.to_metadata())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Done"));
    Ok(result)
}
