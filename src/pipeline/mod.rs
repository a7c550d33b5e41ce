mod backfill;
mod crosslink;
mod pager;
mod writer;

pub use backfill::{run_backfill, BackfillReport};
pub use crosslink::{run_crosslink, CrosslinkReport};
