//! The two tag languages: a boolean search language and an imperative
//! modification language, sharing one lexical layer.

pub mod modify;
mod scan;
pub mod search;

pub use modify::{parse_modification, ModOp, Modification};
pub use search::{parse_search, SearchExpr};
